use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{
    error::BriefingError,
    model::{Product, RawProduct, RawProducts},
    sigmet::parse_sigmets,
};

use super::WeatherSource;

pub const DEFAULT_API_BASE_URL: &str = "https://aviationweather.gov/api/data";
pub const DEFAULT_DATASERVER_URL: &str = "https://aviationweather.gov/api/data/dataserver";

/// Fixed query for the dataserver: all AIR/SIGMETs issued within the last hour.
const SIGMET_QUERY: &[(&str, &str)] = &[
    ("requestType", "retrieve"),
    ("dataSource", "airsigmets"),
    ("format", "xml"),
    ("hoursBeforeNow", "1"),
];

/// Client for the aviationweather.gov data API.
#[derive(Debug, Clone)]
pub struct AviationWeatherClient {
    api_base_url: String,
    dataserver_url: String,
    http: Client,
}

impl AviationWeatherClient {
    pub fn new(api_base_url: String, dataserver_url: String) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            dataserver_url,
            http: Client::new(),
        }
    }

    async fn fetch_raw(&self, raw: RawProduct, ids: &str) -> Result<String, BriefingError> {
        let product = Product::from(raw);
        let url = format!("{}/{}", self.api_base_url, raw.endpoint());
        debug!(%product, %url, ids, "requesting raw product");

        let res = self
            .http
            .get(&url)
            .query(&[("ids", ids), ("format", "raw")])
            .send()
            .await
            .map_err(|e| BriefingError::transport(product, e))?;

        // Upstream status is not checked; the body is used as-is.
        let body = res.text().await.map_err(|e| BriefingError::transport(product, e))?;
        debug!(%product, bytes = body.len(), "received raw product");

        Ok(body)
    }
}

#[async_trait]
impl WeatherSource for AviationWeatherClient {
    async fn fetch_products(&self, airports: &[String]) -> Result<RawProducts, BriefingError> {
        let ids = airports.join(",");

        let (metar, taf, pirep) = tokio::try_join!(
            self.fetch_raw(RawProduct::Metar, &ids),
            self.fetch_raw(RawProduct::Taf, &ids),
            self.fetch_raw(RawProduct::Pirep, &ids),
        )?;

        Ok(RawProducts { metar, taf, pirep })
    }

    async fn fetch_sigmets(&self) -> Result<Vec<String>, BriefingError> {
        debug!(url = %self.dataserver_url, "requesting SIGMETs");

        let res = self
            .http
            .get(&self.dataserver_url)
            .query(SIGMET_QUERY)
            .send()
            .await
            .map_err(|e| BriefingError::transport(Product::Sigmet, e))?;

        let body = res.text().await.map_err(|e| BriefingError::transport(Product::Sigmet, e))?;

        let sigmets = parse_sigmets(&body)?;
        debug!(count = sigmets.len(), "parsed SIGMETs");

        Ok(sigmets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> AviationWeatherClient {
        AviationWeatherClient::new(
            format!("{}/api/data", server.uri()),
            format!("{}/api/data/dataserver", server.uri()),
        )
    }

    async fn mount_product(server: &MockServer, endpoint: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/api/data/{endpoint}")))
            .and(query_param("ids", "KJFK,VABB"))
            .and(query_param("format", "raw"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn fetches_each_product_with_joined_ids() {
        let server = MockServer::start().await;
        mount_product(&server, "metar", "METAR KJFK 011251Z RA").await;
        mount_product(&server, "taf", "TAF VABB 011100Z").await;
        mount_product(&server, "pirep", "UA /OV JFK /TB MOD").await;

        let client = client_for(&server);
        let airports = vec!["KJFK".to_string(), "VABB".to_string()];
        let products = client.fetch_products(&airports).await.unwrap();

        assert_eq!(products.metar, "METAR KJFK 011251Z RA");
        assert_eq!(products.taf, "TAF VABB 011100Z");
        assert_eq!(products.pirep, "UA /OV JFK /TB MOD");
    }

    #[tokio::test]
    async fn error_status_body_is_returned_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let products = client.fetch_products(&["KJFK".to_string()]).await.unwrap();

        assert_eq!(products.metar, "maintenance");
        assert_eq!(products.pirep, "maintenance");
    }

    #[tokio::test]
    async fn fetches_sigmets_with_fixed_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/data/dataserver"))
            .and(query_param("requestType", "retrieve"))
            .and(query_param("dataSource", "airsigmets"))
            .and(query_param("format", "xml"))
            .and(query_param("hoursBeforeNow", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<response><data><AIRSIGMET><rawText>SIGMET A1</rawText></AIRSIGMET><AIRSIGMET/></data></response>",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let sigmets = client_for(&server).fetch_sigmets().await.unwrap();

        assert_eq!(sigmets, vec!["SIGMET A1", "No data"]);
    }

    #[tokio::test]
    async fn non_xml_sigmet_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/data/dataserver"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>oops"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_sigmets().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn one_failing_product_fails_the_fetch() {
        let server = MockServer::start().await;
        // The other requests may be dropped once TAF fails, so no call counts here.
        Mock::given(method("GET"))
            .and(path("/api/data/metar"))
            .respond_with(ResponseTemplate::new(200).set_body_string("METAR KJFK"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/data/pirep"))
            .respond_with(ResponseTemplate::new(200).set_body_string("UA /OV JFK"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/data/taf"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", "http://127.0.0.1:1/"))
            .mount(&server)
            .await;

        let airports = vec!["KJFK".to_string(), "VABB".to_string()];
        let err = client_for(&server).fetch_products(&airports).await.unwrap_err();

        assert!(matches!(err, BriefingError::Transport { product: Product::Taf, .. }));
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        // Nothing listens on port 1.
        let client = AviationWeatherClient::new(
            "http://127.0.0.1:1/api/data".into(),
            "http://127.0.0.1:1/api/data/dataserver".into(),
        );

        let err = client.fetch_products(&["KJFK".to_string()]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);

        let err = client.fetch_sigmets().await.unwrap_err();
        assert!(matches!(err, BriefingError::Transport { product: Product::Sigmet, .. }));
    }
}
