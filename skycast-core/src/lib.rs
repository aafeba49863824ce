//! Core library for the `skycast` weather widget.
//!
//! This crate defines:
//! - Configuration handling (provider token, endpoint, extra cities)
//! - The enumerated city set and its location codes
//! - The provider HTTP client and the fetcher abstraction
//! - The merged view model and the display-state machine
//!
//! It is used by `skycast-cli`, but can also be reused by other frontends.

pub mod city;
pub mod config;
pub mod controller;
pub mod model;
pub mod provider;

pub use city::{City, CityBook};
pub use config::Config;
pub use controller::{DisplayController, DisplayState, FETCH_ERROR_MESSAGE, FetchGeneration};
pub use model::{CurrentConditions, ForecastEntry, ViewModel};
pub use provider::{FetchError, FetchOutcome, WeatherFetcher, client_from_config, wtx::WtxClient};
