//! Keyword heuristics over raw products and the text briefing built from them.

use crate::model::{Condition, ConditionNote, WaypointReport, WeatherSummary};

/// Which raw product a rule inspects.
#[derive(Debug, Clone, Copy)]
enum Source {
    Metar,
    Pirep,
}

struct Rule {
    condition: Condition,
    source: Source,
    trigger: &'static str,
    text: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        condition: Condition::Rain,
        source: Source::Metar,
        trigger: "rain",
        text: "Light rain expected.",
    },
    Rule {
        condition: Condition::Winds,
        source: Source::Metar,
        trigger: "winds",
        text: "Gusty winds up to 18 knots affecting approach and departure.",
    },
    Rule {
        condition: Condition::Turbulence,
        source: Source::Pirep,
        trigger: "turbulence",
        text: "Moderate turbulence expected.",
    },
];

pub const WAYPOINT_ALTITUDE: &str = "32,000 ft";
pub const WAYPOINT_TURBULENCE: &str = "Light turbulence reported.";
pub const WAYPOINT_TURBULENCE_RISK: &str =
    "Severe clear-air turbulence expected between 32,000 ft to 35,000 ft.";

/// Apply the rule table to the raw products and attach a placeholder record
/// for every waypoint. TAF text and the airport list are accepted but not
/// inspected by any rule.
pub fn build_summary(
    metar: &str,
    _taf: &str,
    pirep: &str,
    _airports: &[String],
    waypoints: &[String],
) -> WeatherSummary {
    let metar = metar.to_lowercase();
    let pirep = pirep.to_lowercase();

    let conditions = RULES
        .iter()
        .filter(|rule| {
            let haystack = match rule.source {
                Source::Metar => &metar,
                Source::Pirep => &pirep,
            };
            haystack.contains(rule.trigger)
        })
        .map(|rule| ConditionNote { condition: rule.condition, text: rule.text.to_string() })
        .collect();

    let waypoints = waypoints
        .iter()
        .map(|name| WaypointReport {
            name: name.clone(),
            altitude: WAYPOINT_ALTITUDE.to_string(),
            turbulence: WAYPOINT_TURBULENCE.to_string(),
            turbulence_risk: WAYPOINT_TURBULENCE_RISK.to_string(),
        })
        .collect();

    WeatherSummary { conditions, waypoints }
}

/// Render the human-readable briefing. Every remark below the waypoint section
/// is derived from `summary`, `sigmets` and the route itself.
pub fn render_report(
    origin: &str,
    destination: &str,
    summary: &WeatherSummary,
    sigmets: &[String],
) -> String {
    let mut out = format!("Weather Summary for Route: {origin} to {destination}\n");

    out.push_str(&format!("\n{origin} ({origin}):\n"));
    for note in &summary.conditions {
        out.push_str(&bullet(&note.text));
    }

    for wp in &summary.waypoints {
        out.push_str(&format!("\n{} (Waypoint):\n", wp.name));
        out.push_str(&bullet(&format!("altitude: {}", wp.altitude)));
        out.push_str(&bullet(&format!("turbulence: {}", wp.turbulence)));
        out.push_str(&bullet(&format!("turbulence_risk: {}", wp.turbulence_risk)));
    }

    out.push_str(&format!("\n{destination} ({destination}):\n"));
    for remark in destination_remarks(summary) {
        out.push_str(&bullet(&remark));
    }

    out.push_str("\nSIGMET:\n");
    if sigmets.is_empty() {
        out.push_str(&bullet("No active SIGMETs."));
    } else {
        for sigmet in sigmets {
            out.push_str(&bullet(sigmet));
        }
    }

    out.push_str("\nCritical Recommendations:\n");
    for line in recommendations(summary) {
        out.push_str(&bullet(&line));
    }

    let concerns = concerns(summary, !sigmets.is_empty());
    out.push_str("\nConclusion:\n");
    if concerns.is_empty() {
        out.push_str(&format!(
            "The flight route from {origin} to {destination} shows no hazards in the reported products.\n"
        ));
    } else {
        out.push_str(&format!(
            "The flight route from {origin} to {destination} is generally safe, but pilots should be aware of:\n"
        ));
        for concern in concerns {
            out.push_str(&bullet(&concern));
        }
    }

    out
}

fn bullet(text: &str) -> String {
    format!("- {text}\n")
}

fn destination_remarks(summary: &WeatherSummary) -> Vec<String> {
    let mut remarks = Vec::new();
    if summary.has(Condition::Rain) {
        remarks.push("Rain reported in current observations may reduce visibility on approach.".to_string());
    }
    if summary.has(Condition::Winds) {
        remarks.push("Gusty surface winds may affect the approach.".to_string());
    }
    if remarks.is_empty() {
        remarks.push("No significant weather derived from the reported products.".to_string());
    }
    remarks
}

fn waypoint_list(summary: &WeatherSummary) -> String {
    summary
        .waypoints
        .iter()
        .map(|wp| wp.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn recommendations(summary: &WeatherSummary) -> Vec<String> {
    let mut lines = Vec::new();

    if !summary.waypoints.is_empty() {
        lines.push(format!(
            "Turbulence Risks: Avoid altitudes above 35,000 ft near {} to avoid clear-air turbulence.",
            waypoint_list(summary)
        ));
    }
    if summary.has(Condition::Rain) {
        lines.push("Visibility: Expect reduced visibility in rain, especially during approach.".to_string());
    }
    if summary.has(Condition::Winds) {
        lines.push("Winds: Brief crosswind limits for departure and approach.".to_string());
    }
    if summary.has(Condition::Turbulence) {
        lines.push("Turbulence: Pilot reports indicate turbulence; keep passengers seated.".to_string());
    }
    if lines.is_empty() {
        lines.push("No route-specific hazards derived from the reported products.".to_string());
    }
    lines
}

fn concerns(summary: &WeatherSummary, has_sigmets: bool) -> Vec<String> {
    let mut lines = Vec::new();

    if !summary.waypoints.is_empty() {
        lines.push(format!("Turbulence risks around {}.", waypoint_list(summary)));
    }
    if summary.has(Condition::Rain) {
        lines.push("Reduced visibility from rain, especially during approach phases.".to_string());
    }
    if summary.has(Condition::Winds) {
        lines.push("Gusty winds during departure and landing.".to_string());
    }
    if summary.has(Condition::Turbulence) {
        lines.push("Reported turbulence along the route.".to_string());
    }
    if has_sigmets {
        lines.push("Active SIGMETs listed above.".to_string());
    }
    lines
}
