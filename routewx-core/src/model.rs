/// Upstream weather product kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    Metar,
    Taf,
    Pirep,
    Sigmet,
}

impl Product {
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::Metar => "METAR",
            Product::Taf => "TAF",
            Product::Pirep => "PIREP",
            Product::Sigmet => "SIGMET",
        }
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Products served as raw text under the API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawProduct {
    Metar,
    Taf,
    Pirep,
}

impl RawProduct {
    /// Path segment under the API base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            RawProduct::Metar => "metar",
            RawProduct::Taf => "taf",
            RawProduct::Pirep => "pirep",
        }
    }
}

impl From<RawProduct> for Product {
    fn from(raw: RawProduct) -> Self {
        match raw {
            RawProduct::Metar => Product::Metar,
            RawProduct::Taf => Product::Taf,
            RawProduct::Pirep => Product::Pirep,
        }
    }
}

/// Raw text bodies returned by the upstream service, untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProducts {
    pub metar: String,
    pub taf: String,
    pub pirep: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Rain,
    Winds,
    Turbulence,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionNote {
    pub condition: Condition,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaypointReport {
    pub name: String,
    pub altitude: String,
    pub turbulence: String,
    pub turbulence_risk: String,
}

/// Heuristic summary of the fetched products, built fresh for every briefing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherSummary {
    /// Detected conditions, in rule-table order.
    pub conditions: Vec<ConditionNote>,
    pub waypoints: Vec<WaypointReport>,
}

impl WeatherSummary {
    pub fn condition(&self, condition: Condition) -> Option<&str> {
        self.conditions
            .iter()
            .find(|note| note.condition == condition)
            .map(|note| note.text.as_str())
    }

    pub fn has(&self, condition: Condition) -> bool {
        self.condition(condition).is_some()
    }
}
