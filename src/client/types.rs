//! Request options and response shapes for the OSRM HTTP API
//!
//! Responses are consumed structurally: only the fields the client hands back
//! are typed, geometry stays an opaque JSON value.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A WGS84 position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<(f64, f64)> for Coordinate {
    /// `(longitude, latitude)`
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

/// Join coordinates into the `lon,lat;lon,lat` path segment OSRM expects
pub fn format_coordinates(coordinates: &[Coordinate]) -> String {
    coordinates
        .iter()
        .map(Coordinate::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

/// Level of detail of the returned geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overview {
    #[default]
    Full,
    Simplified,
    False,
}

impl Overview {
    pub fn as_str(&self) -> &'static str {
        match self {
            Overview::Full => "full",
            Overview::Simplified => "simplified",
            Overview::False => "false",
        }
    }
}

/// Geometry encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Geometries {
    #[default]
    GeoJson,
    Polyline,
    Polyline6,
}

impl Geometries {
    pub fn as_str(&self) -> &'static str {
        match self {
            Geometries::GeoJson => "geojson",
            Geometries::Polyline => "polyline",
            Geometries::Polyline6 => "polyline6",
        }
    }
}

/// Which waypoint a trip must start or end at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripEndpoint {
    Any,
    First,
    Last,
}

impl TripEndpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripEndpoint::Any => "any",
            TripEndpoint::First => "first",
            TripEndpoint::Last => "last",
        }
    }
}

/// Options for [`crate::OsrmClient::route`]
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    pub overview: Overview,
    /// Include turn-by-turn instructions
    pub steps: bool,
    pub geometries: Geometries,
}

/// Options for [`crate::OsrmClient::trip`]
#[derive(Debug, Clone)]
pub struct TripOptions {
    /// Return to the starting point
    pub roundtrip: bool,
    pub source: TripEndpoint,
    pub destination: TripEndpoint,
}

impl Default for TripOptions {
    fn default() -> Self {
        Self {
            roundtrip: true,
            source: TripEndpoint::First,
            destination: TripEndpoint::Last,
        }
    }
}

/// Status envelope wrapping every OSRM response
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, Value>,
}

/// Maneuver of a route step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Maneuver {
    #[serde(default)]
    pub location: [f64; 2],
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub modifier: Option<String>,
    #[serde(default)]
    pub bearing_before: f64,
    #[serde(default)]
    pub bearing_after: f64,
}

/// One turn-by-turn instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Meters
    #[serde(default)]
    pub distance: f64,
    /// Seconds
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub geometry: Option<Value>,
    #[serde(default)]
    pub maneuver: Maneuver,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RouteLeg {
    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Route {
    pub distance: f64,
    pub duration: f64,
    #[serde(default)]
    pub geometry: Option<Value>,
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

/// Input coordinate snapped to the road network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Name of the street the coordinate snapped to
    #[serde(default)]
    pub name: String,
    /// Snapped `[lon, lat]`
    pub location: [f64; 2],
    /// Distance in meters from the input coordinate to the snapped location
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub hint: Option<String>,
    /// OSM node ids of the snapped segment (nearest service)
    #[serde(default)]
    pub nodes: Option<Vec<u64>>,
    /// Position of this waypoint in the optimized trip (trip service)
    #[serde(default)]
    pub waypoint_index: Option<usize>,
    /// Index of the trip this waypoint belongs to (trip service)
    #[serde(default)]
    pub trips_index: Option<usize>,
}

/// Result of [`crate::OsrmClient::route`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    /// Meters
    pub distance: f64,
    /// Seconds
    pub duration: f64,
    pub geometry: Option<Value>,
    /// Steps of the first leg; empty unless steps were requested
    pub steps: Vec<RouteStep>,
}

/// Result of [`crate::OsrmClient::table`]
///
/// Cells are `None` when the pair is unreachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    /// Meters
    #[serde(default)]
    pub distances: Vec<Vec<Option<f64>>>,
    /// Seconds
    #[serde(default)]
    pub durations: Vec<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NearestResponse {
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RouteResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TripResponse {
    #[serde(default)]
    pub trips: Vec<Route>,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

/// Result of [`crate::OsrmClient::trip`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSummary {
    pub distance: f64,
    pub duration: f64,
    pub geometry: Option<Value>,
    pub waypoints: Vec<Waypoint>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Matching {
    pub distance: f64,
    pub duration: f64,
    #[serde(default)]
    pub geometry: Option<Value>,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MatchResponse {
    #[serde(default)]
    pub matchings: Vec<Matching>,
}

/// Result of [`crate::OsrmClient::match_trace`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub distance: f64,
    pub duration: f64,
    pub geometry: Option<Value>,
    /// 0 when the server reports none
    pub confidence: f64,
}
