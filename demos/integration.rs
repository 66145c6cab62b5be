//! OSRM integration example
//!
//! Queries a running osrm-routed (default http://localhost:5000, override with
//! OSRM_BASE_URL) for a route, a distance matrix, the nearest road and an
//! optimized delivery tour around Berlin.
//!
//! ```sh
//! cargo run --example integration
//! ```

use anyhow::{Context, Result};
use osrm_setup::client::{Coordinate, OsrmClient, RouteOptions, TripOptions, DEFAULT_BASE_URL};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
    }
}

async fn run() -> Result<()> {
    let base_url = std::env::var("OSRM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let client = OsrmClient::new(base_url);

    println!("Calculating route...");
    let route = client
        .route(
            Coordinate::new(13.38886, 52.517037),
            Coordinate::new(13.397634, 52.529407),
            &RouteOptions::default(),
        )
        .await
        .context("route")?;
    println!("Distance: {:.2} km", route.distance / 1000.0);
    println!("Duration: {:.2} minutes", route.duration / 60.0);

    println!("\nCalculating distance matrix...");
    let locations = [
        Coordinate::new(13.38886, 52.517037),
        Coordinate::new(13.397634, 52.529407),
        Coordinate::new(13.428555, 52.523219),
    ];
    let matrix = client.table(&locations).await.context("table")?;
    println!("Distance matrix (km):");
    for row in &matrix.distances {
        let cells: Vec<String> = row
            .iter()
            .map(|d| d.map_or_else(|| "-".to_string(), |d| format!("{:.2}", d / 1000.0)))
            .collect();
        println!("[{}]", cells.join(", "));
    }

    println!("\nFinding nearest road...");
    let nearest = client
        .nearest(Coordinate::new(13.38886, 52.517037), 1)
        .await
        .context("nearest")?;
    if let Some(road) = nearest.first() {
        let name = if road.name.is_empty() { "Unknown" } else { &road.name };
        println!("Nearest road: {name}");
        if let Some(distance) = road.distance {
            println!("Distance to road: {distance:.2} meters");
        }
    }

    println!("\nOptimizing delivery route...");
    let optimized = client
        .trip(&locations, &TripOptions::default())
        .await
        .context("trip")?;
    println!("Optimized total distance: {:.2} km", optimized.distance / 1000.0);
    println!("Optimized total duration: {:.2} minutes", optimized.duration / 60.0);

    Ok(())
}
