use crate::{
    Config,
    model::{CurrentConditions, ForecastEntry},
    provider::wtx::WtxClient,
};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod wtx;

/// Failure of a fetch cycle.
///
/// The variants distinguish causes for logs and tests; the widget renders a
/// single fixed message for all of them, so users never see which request
/// failed or why.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the response body not read.
    #[error("request to weather service failed: {0}")]
    Request(String),

    /// The provider answered with a non-success HTTP status.
    #[error("weather service returned status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    /// The payload did not match the expected shape.
    #[error("malformed weather payload: {0}")]
    Malformed(String),

    /// The forecast payload contained no days, so today's high/low cannot
    /// be derived.
    #[error("forecast payload contained no days")]
    EmptyForecast,
}

/// Both raw payloads of one fetch cycle: current conditions plus the
/// provider-ordered forecast sequence.
pub type FetchOutcome = Result<(CurrentConditions, Vec<ForecastEntry>), FetchError>;

/// Abstraction over the weather data source.
///
/// One call covers a whole fetch cycle: both provider requests for a single
/// location code. Either request failing fails the cycle as a whole.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch(&self, location_code: &str) -> FetchOutcome;
}

/// Construct the HTTP client from config.
///
/// Fails with an actionable hint when no token is configured.
pub fn client_from_config(config: &Config) -> anyhow::Result<WtxClient> {
    let token = config.require_token()?;

    WtxClient::new(config.base_url.clone(), token.to_owned(), config.timeout())
}
