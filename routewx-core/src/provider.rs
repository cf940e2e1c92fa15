use crate::{Config, error::BriefingError, model::RawProducts};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod aviationweather;

pub use aviationweather::AviationWeatherClient;

/// A source of raw aviation weather products.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// METAR, TAF and PIREP text for the given airports, bodies returned verbatim.
    async fn fetch_products(&self, airports: &[String]) -> Result<RawProducts, BriefingError>;

    /// Raw text of currently active SIGMETs. Not scoped to any route.
    async fn fetch_sigmets(&self) -> Result<Vec<String>, BriefingError>;
}

/// Construct the weather source described by the config.
pub fn source_from_config(config: &Config) -> Box<dyn WeatherSource> {
    Box::new(AviationWeatherClient::new(
        config.api_base_url.clone(),
        config.dataserver_url.clone(),
    ))
}
