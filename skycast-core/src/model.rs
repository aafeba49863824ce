use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::provider::FetchError;

/// Current conditions for the selected city, as reported by the provider.
///
/// Replaced wholesale on every successful fetch cycle; never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Human-readable condition text, e.g. "多云".
    pub description: String,
    /// Provider condition code matching `description`.
    pub condition_code: String,
    /// Temperature in the provider's unit (degrees Celsius).
    pub temperature: f64,
    /// Atmospheric pressure, hPa.
    pub pressure: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    /// Wind direction text, e.g. "东南风".
    pub wind_direction: String,
    /// Wind strength text, e.g. "3-4级".
    pub wind_strength: String,
}

/// One day of the provider's multi-day forecast.
///
/// The provider returns these in chronological order with index 0 being
/// "today"; the widget derives today's high/low from index 0 and shows the
/// remaining days as the forecast strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Day-of-week label, e.g. "周一".
    pub weekday: String,
    /// Timestamp the forecast was issued for, provider-formatted.
    pub forecast_time: String,
    pub day_condition: String,
    pub day_condition_code: String,
    pub night_condition: String,
    pub night_condition_code: String,
    pub temp_min: f64,
    pub temp_max: f64,
    pub real_temp_min: f64,
    pub real_temp_max: f64,
    /// Precipitation probability, percent.
    pub precip_prob_day: f64,
    pub precip_prob_night: f64,
    /// Precipitation amount, mm.
    pub precip_day: f64,
    pub precip_night: f64,
    pub humidity_min: f64,
    pub humidity_max: f64,
    pub pressure: f64,
    pub sunrise: String,
    pub sunset: String,
    pub wind_dir_day: String,
    pub wind_dir_night: String,
    pub wind_speed_day: String,
    pub wind_speed_night: String,
}

/// Display-ready merge of one fetch cycle's two payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub current: CurrentConditions,
    /// Today's minimum, taken from the first forecast day.
    pub low: f64,
    /// Today's maximum, taken from the first forecast day.
    pub high: f64,
    /// The next days, up to 7 entries, excluding today.
    pub forecast: Vec<ForecastEntry>,
    pub fetched_at: DateTime<Utc>,
}

impl ViewModel {
    /// Merge the two raw payloads into a display-ready structure.
    ///
    /// Pure: the timestamp is passed in by the caller. Fails with
    /// [`FetchError::EmptyForecast`] when the forecast sequence is empty,
    /// since today's high/low cannot be derived.
    pub fn build(
        current: CurrentConditions,
        forecast: Vec<ForecastEntry>,
        fetched_at: DateTime<Utc>,
    ) -> Result<Self, FetchError> {
        let (low, high) = {
            let today = forecast.first().ok_or(FetchError::EmptyForecast)?;
            (today.temp_min, today.temp_max)
        };

        let forecast = forecast.into_iter().skip(1).take(7).collect();

        Ok(Self { current, low, high, forecast, fetched_at })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn sample_current() -> CurrentConditions {
        CurrentConditions {
            description: "Cloudy".to_string(),
            condition_code: "01".to_string(),
            temperature: 22.0,
            pressure: 1012.0,
            humidity: 65.0,
            wind_direction: "东南风".to_string(),
            wind_strength: "3-4级".to_string(),
        }
    }

    pub(crate) fn sample_day(weekday: &str, min: f64, max: f64) -> ForecastEntry {
        ForecastEntry {
            weekday: weekday.to_string(),
            forecast_time: "2026-08-24 08:00:00".to_string(),
            day_condition: "多云".to_string(),
            day_condition_code: "01".to_string(),
            night_condition: "晴".to_string(),
            night_condition_code: "00".to_string(),
            temp_min: min,
            temp_max: max,
            real_temp_min: min - 1.0,
            real_temp_max: max + 1.0,
            precip_prob_day: 10.0,
            precip_prob_night: 5.0,
            precip_day: 0.0,
            precip_night: 0.0,
            humidity_min: 40.0,
            humidity_max: 80.0,
            pressure: 1010.0,
            sunrise: "05:30".to_string(),
            sunset: "18:45".to_string(),
            wind_dir_day: "东南风".to_string(),
            wind_dir_night: "东风".to_string(),
            wind_speed_day: "3-4级".to_string(),
            wind_speed_night: "<3级".to_string(),
        }
    }

    pub(crate) fn eight_days() -> Vec<ForecastEntry> {
        let labels = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun", "Mon"];
        labels
            .iter()
            .enumerate()
            .map(|(i, w)| sample_day(w, 18.0 + i as f64, 24.0 + i as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{eight_days, sample_current, sample_day};
    use super::*;

    #[test]
    fn build_derives_high_low_from_first_day() {
        let view = ViewModel::build(sample_current(), eight_days(), Utc::now())
            .expect("non-empty forecast must build");

        assert_eq!(view.low, 18.0);
        assert_eq!(view.high, 24.0);
    }

    #[test]
    fn build_trims_strip_to_seven_days_excluding_today() {
        let days = eight_days();
        let expected: Vec<ForecastEntry> = days[1..8].to_vec();

        let view = ViewModel::build(sample_current(), days, Utc::now())
            .expect("non-empty forecast must build");

        assert_eq!(view.forecast.len(), 7);
        assert_eq!(view.forecast, expected);
        assert_eq!(view.forecast[0].weekday, "Tue");
    }

    #[test]
    fn build_keeps_fewer_days_when_provider_returns_short_forecast() {
        let days: Vec<ForecastEntry> = eight_days().into_iter().take(3).collect();

        let view = ViewModel::build(sample_current(), days, Utc::now())
            .expect("non-empty forecast must build");

        assert_eq!(view.forecast.len(), 2);
    }

    #[test]
    fn build_with_single_day_yields_empty_strip() {
        let days = vec![sample_day("Mon", 18.0, 24.0)];

        let view = ViewModel::build(sample_current(), days, Utc::now())
            .expect("single-day forecast must still build");

        assert_eq!(view.low, 18.0);
        assert_eq!(view.high, 24.0);
        assert!(view.forecast.is_empty());
    }

    #[test]
    fn build_rejects_empty_forecast() {
        let err = ViewModel::build(sample_current(), Vec::new(), Utc::now()).unwrap_err();
        assert!(matches!(err, FetchError::EmptyForecast));
    }

    #[test]
    fn build_preserves_current_conditions_fields() {
        let current = sample_current();
        let view = ViewModel::build(current.clone(), eight_days(), Utc::now())
            .expect("non-empty forecast must build");

        assert_eq!(view.current, current);
        assert_eq!(view.current.temperature, 22.0);
        assert_eq!(view.current.description, "Cloudy");
    }
}
