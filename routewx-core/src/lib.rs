//! Core library for the `routewx` CLI.
//!
//! This crate defines:
//! - Route parsing into airport codes and waypoints
//! - Abstraction over aviation weather sources, with an aviationweather.gov client
//! - Keyword heuristics and the rendered route briefing
//! - Configuration handling
//!
//! It is used by `routewx-cli`, but can also be reused by other binaries or services.

pub mod briefing;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod route;
pub mod sigmet;
pub mod summary;

pub use briefing::{generate_weather_summary, try_generate_weather_summary};
pub use config::Config;
pub use error::{BriefingError, ErrorKind};
pub use model::{Condition, Product, RawProduct, RawProducts, WaypointReport, WeatherSummary};
pub use provider::{AviationWeatherClient, WeatherSource, source_from_config};
pub use route::{Route, extract_codes};
pub use summary::{build_summary, render_report};
