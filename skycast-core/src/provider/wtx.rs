use anyhow::Context;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::model::{CurrentConditions, ForecastEntry};
use crate::provider::{FetchError, FetchOutcome, WeatherFetcher};

/// Realtime conditions endpoint, relative to the configured base URL.
const REALTIME_PATH: &str = "/v2/cn/area/basic";
/// Multi-day forecast endpoint.
const FORECAST_PATH: &str = "/v2/cn/city/basic";

/// HTTP client for the WTX weather provider.
///
/// One fetch cycle issues both GETs concurrently and succeeds only when both
/// payloads arrive and parse. No retry, no caching.
#[derive(Debug, Clone)]
pub struct WtxClient {
    base_url: String,
    token: String,
    http: Client,
}

impl WtxClient {
    pub fn new(base_url: String, token: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { base_url, token, http })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        location: &str,
    ) -> Result<T, FetchError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, location, "requesting weather payload");

        let res = self
            .http
            .get(&url)
            .query(&[("location", location), ("token", self.token.as_str())])
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| FetchError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))
    }

    async fn fetch_current(&self, location: &str) -> Result<CurrentConditions, FetchError> {
        let envelope: WtxEnvelope<WtxRealtime> = self.get_json(REALTIME_PATH, location).await?;
        Ok(envelope.result.into_domain())
    }

    async fn fetch_forecast(&self, location: &str) -> Result<Vec<ForecastEntry>, FetchError> {
        let envelope: WtxEnvelope<WtxForecast> = self.get_json(FORECAST_PATH, location).await?;
        Ok(envelope.result.datas.into_iter().map(WtxForecastDay::into_domain).collect())
    }
}

#[async_trait::async_trait]
impl WeatherFetcher for WtxClient {
    async fn fetch(&self, location_code: &str) -> FetchOutcome {
        // Both requests go out together; the cycle resolves once both are in.
        let (current, forecast) = tokio::try_join!(
            self.fetch_current(location_code),
            self.fetch_forecast(location_code),
        )?;

        debug!(days = forecast.len(), "fetch cycle complete");

        Ok((current, forecast))
    }
}

/// Common wrapper around both provider payloads; only `result` is consumed.
#[derive(Debug, Deserialize)]
struct WtxEnvelope<T> {
    result: T,
}

#[derive(Debug, Deserialize)]
struct WtxRealtime {
    wp: String,
    wp_code: String,
    tem: f64,
    prs: f64,
    rh: f64,
    wd_desc: String,
    ws_desc: String,
}

impl WtxRealtime {
    fn into_domain(self) -> CurrentConditions {
        CurrentConditions {
            description: self.wp,
            condition_code: self.wp_code,
            temperature: self.tem,
            pressure: self.prs,
            humidity: self.rh,
            wind_direction: self.wd_desc,
            wind_strength: self.ws_desc,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WtxForecast {
    datas: Vec<WtxForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WtxForecastDay {
    week: String,
    fc_time: String,
    wp_day: String,
    wp_day_code: String,
    wp_night: String,
    wp_night_code: String,
    tem_min: f64,
    tem_max: f64,
    real_tem_min: f64,
    real_tem_max: f64,
    pre_pro_day: f64,
    pre_pro_night: f64,
    pre_day: f64,
    pre_night: f64,
    rh_min: f64,
    rh_max: f64,
    prs: f64,
    sunrise: String,
    sunset: String,
    wd_day: String,
    wd_night: String,
    ws_day: String,
    ws_night: String,
}

impl WtxForecastDay {
    fn into_domain(self) -> ForecastEntry {
        ForecastEntry {
            weekday: self.week,
            forecast_time: self.fc_time,
            day_condition: self.wp_day,
            day_condition_code: self.wp_day_code,
            night_condition: self.wp_night,
            night_condition_code: self.wp_night_code,
            temp_min: self.tem_min,
            temp_max: self.tem_max,
            real_temp_min: self.real_tem_min,
            real_temp_max: self.real_tem_max,
            precip_prob_day: self.pre_pro_day,
            precip_prob_night: self.pre_pro_night,
            precip_day: self.pre_day,
            precip_night: self.pre_night,
            humidity_min: self.rh_min,
            humidity_max: self.rh_max,
            pressure: self.prs,
            sunrise: self.sunrise,
            sunset: self.sunset,
            wind_dir_day: self.wd_day,
            wind_dir_night: self.wd_night,
            wind_speed_day: self.ws_day,
            wind_speed_night: self.ws_night,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = body.char_indices().take_while(|(i, _)| *i <= MAX).last().map_or(0, |(i, _)| i);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
