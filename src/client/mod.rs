//! Client for the OSRM HTTP API
//!
//! Wraps the `route`, `table`, `nearest`, `trip` and `match` services of a
//! running `osrm-routed`. Every call is a single GET; a non-2xx answer or an
//! envelope whose `code` is not `"Ok"` fails the call. There is no retry.
//!
//! ```rust,no_run
//! use osrm_setup::client::{Coordinate, OsrmClient, RouteOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OsrmClient::new("http://localhost:5000");
//! let route = client
//!     .route(
//!         Coordinate::new(13.38886, 52.517037),
//!         Coordinate::new(13.397634, 52.529407),
//!         &RouteOptions::default(),
//!     )
//!     .await?;
//! println!("{:.2} km", route.distance / 1000.0);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use log::{debug, error};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;

use crate::core::error::{Error, Result};

pub mod types;

pub use types::{
    format_coordinates, Coordinate, DistanceMatrix, Geometries, Maneuver, MatchSummary,
    Overview, RouteOptions, RouteStep, RouteSummary, TripEndpoint, TripOptions, TripSummary,
    Waypoint,
};

use types::{Envelope, MatchResponse, NearestResponse, RouteResponse, TripResponse};

/// Default address of a local `osrm-routed`
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Profile segment used in request paths
pub const DEFAULT_PROFILE: &str = "driving";

fn user_agent() -> String {
    format!("osrm-setup/{}", env!("OSRM_SETUP_VERSION"))
}

/// Shared HTTP client for clients built without a timeout
static GLOBAL_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .user_agent(user_agent())
        .build()
        .expect("Failed to create HTTP client")
});

/// Connection settings for [`OsrmClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Server address; a trailing `/` is ignored
    pub base_url: String,

    /// Profile path segment (`driving`, `car`, ...)
    pub profile: String,

    /// Per-request timeout; requests wait indefinitely when unset
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            timeout: None,
        }
    }
}

/// OSRM HTTP API client
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: Client,
    base_url: String,
    profile: String,
}

impl Default for OsrmClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl OsrmClient {
    /// Client for the server at `base_url` using the `driving` profile
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: GLOBAL_CLIENT.clone(),
            base_url: trim_base_url(base_url.into()),
            profile: DEFAULT_PROFILE.to_string(),
        }
    }

    /// Client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http = match config.timeout {
            Some(timeout) => ClientBuilder::new()
                .user_agent(user_agent())
                .timeout(timeout)
                .build()?,
            None => GLOBAL_CLIENT.clone(),
        };

        Ok(Self {
            http,
            base_url: trim_base_url(config.base_url),
            profile: config.profile,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Route between two points
    pub async fn route(
        &self,
        start: Coordinate,
        end: Coordinate,
        options: &RouteOptions,
    ) -> Result<RouteSummary> {
        self.fetch_route(start, end, options)
            .await
            .inspect_err(|e| error!("Route calculation failed: {e}"))
    }

    async fn fetch_route(
        &self,
        start: Coordinate,
        end: Coordinate,
        options: &RouteOptions,
    ) -> Result<RouteSummary> {
        let params = [
            ("overview", options.overview.as_str().to_string()),
            ("steps", options.steps.to_string()),
            ("geometries", options.geometries.as_str().to_string()),
        ];

        let response: RouteResponse = self.get("route", &[start, end], &params).await?;
        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidResponse("response contains no routes".to_string()))?;

        let steps = route
            .legs
            .into_iter()
            .next()
            .map(|leg| leg.steps)
            .unwrap_or_default();

        Ok(RouteSummary {
            distance: route.distance,
            duration: route.duration,
            geometry: route.geometry,
            steps,
        })
    }

    /// Distance and duration matrix between all locations
    pub async fn table(&self, locations: &[Coordinate]) -> Result<DistanceMatrix> {
        let params = [("annotations", "distance,duration".to_string())];

        self.get("table", locations, &params)
            .await
            .inspect_err(|e| error!("Distance matrix calculation failed: {e}"))
    }

    /// Nearest road segments to a location
    pub async fn nearest(&self, location: Coordinate, number: u32) -> Result<Vec<Waypoint>> {
        let params = [("number", number.to_string())];

        self.get::<NearestResponse>("nearest", &[location], &params)
            .await
            .map(|response| response.waypoints)
            .inspect_err(|e| error!("Nearest road search failed: {e}"))
    }

    /// Optimized visiting order for multiple stops
    pub async fn trip(&self, locations: &[Coordinate], options: &TripOptions) -> Result<TripSummary> {
        self.fetch_trip(locations, options)
            .await
            .inspect_err(|e| error!("Route optimization failed: {e}"))
    }

    async fn fetch_trip(&self, locations: &[Coordinate], options: &TripOptions) -> Result<TripSummary> {
        let params = [
            ("roundtrip", options.roundtrip.to_string()),
            ("source", options.source.as_str().to_string()),
            ("destination", options.destination.as_str().to_string()),
            ("overview", "full".to_string()),
        ];

        let response: TripResponse = self.get("trip", locations, &params).await?;
        let trip = response
            .trips
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidResponse("response contains no trips".to_string()))?;

        Ok(TripSummary {
            distance: trip.distance,
            duration: trip.duration,
            geometry: trip.geometry,
            waypoints: response.waypoints,
        })
    }

    /// Snap a GPS trace to the road network
    ///
    /// `timestamps` are Unix seconds, one per location.
    pub async fn match_trace(
        &self,
        locations: &[Coordinate],
        timestamps: Option<&[i64]>,
    ) -> Result<MatchSummary> {
        self.fetch_match(locations, timestamps)
            .await
            .inspect_err(|e| error!("Map matching failed: {e}"))
    }

    async fn fetch_match(
        &self,
        locations: &[Coordinate],
        timestamps: Option<&[i64]>,
    ) -> Result<MatchSummary> {
        let mut params = vec![("overview", "full".to_string())];
        if let Some(timestamps) = timestamps.filter(|t| !t.is_empty()) {
            let joined = timestamps
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(";");
            params.push(("timestamps", joined));
        }

        let response: MatchResponse = self.get("match", locations, &params).await?;
        let matching = response
            .matchings
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidResponse("response contains no matchings".to_string()))?;

        Ok(MatchSummary {
            distance: matching.distance,
            duration: matching.duration,
            geometry: matching.geometry,
            confidence: matching.confidence,
        })
    }

    /// Issue a GET against `service` and unwrap the status envelope
    async fn get<T: DeserializeOwned>(
        &self,
        service: &str,
        coordinates: &[Coordinate],
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!(
            "{}/{}/v1/{}/{}",
            self.base_url,
            service,
            self.profile,
            format_coordinates(coordinates)
        );
        debug!("GET {url} {params:?}");

        let response = self.http.get(&url).query(params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // OSRM reports request errors as a 4xx carrying a regular envelope.
        let envelope = match serde_json::from_str::<Envelope>(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(Error::HttpError(format!("{status} from {url}")));
            }
            Err(e) => return Err(e.into()),
        };

        if envelope.code != "Ok" {
            return Err(Error::ApiError {
                code: envelope.code,
                message: envelope.message,
            });
        }

        if !status.is_success() {
            return Err(Error::HttpError(format!("{status} from {url}")));
        }

        Ok(serde_json::from_value(serde_json::Value::Object(envelope.payload))?)
    }
}

fn trim_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}
