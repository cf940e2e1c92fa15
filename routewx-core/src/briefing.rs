//! End-to-end briefing: parse the route, fetch products, build and render.

use tracing::{info, warn};

use crate::{
    error::{BriefingError, ErrorKind},
    provider::WeatherSource,
    route::extract_codes,
    summary::{build_summary, render_report},
};

/// Generate the briefing for `route`, surfacing failures as typed errors.
///
/// The route is validated before any request is made. Product and SIGMET
/// requests are issued concurrently.
pub async fn try_generate_weather_summary(
    source: &dyn WeatherSource,
    route: &str,
) -> Result<String, BriefingError> {
    let parsed = extract_codes(route);
    let (origin, destination) = parsed.endpoints()?;

    let (products, sigmets) =
        tokio::try_join!(source.fetch_products(&parsed.airports), source.fetch_sigmets())?;

    let summary = build_summary(
        &products.metar,
        &products.taf,
        &products.pirep,
        &parsed.airports,
        &parsed.waypoints,
    );

    info!(
        origin,
        destination,
        waypoints = parsed.waypoints.len(),
        conditions = summary.conditions.len(),
        sigmets = sigmets.len(),
        "generated weather summary"
    );

    Ok(render_report(origin, destination, &summary, &sigmets))
}

/// Generate the briefing for `route` as display text. Failures become the
/// returned text instead of an error.
pub async fn generate_weather_summary(source: &dyn WeatherSource, route: &str) -> String {
    match try_generate_weather_summary(source, route).await {
        Ok(report) => report,
        Err(err) => {
            warn!(error = %err, "weather summary failed");
            describe_failure(&err)
        }
    }
}

pub fn describe_failure(err: &BriefingError) -> String {
    match err.kind() {
        ErrorKind::Input => format!("Invalid route: {err}"),
        ErrorKind::Transport | ErrorKind::Parse => format!("Error fetching weather data: {err}"),
    }
}
