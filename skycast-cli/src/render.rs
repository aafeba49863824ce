//! Terminal rendering for the three display states.
//!
//! Pure string builders; the caller decides when and where to print. Display
//! text is hardcoded, matching the widget's original wording.

use skycast_core::{DisplayState, ViewModel};

const LOADING_TEXT: &str = "加载中...";
const FORECAST_HEADER: &str = "未来七天天气预报";

/// Render whatever the controller currently holds.
pub fn state(city: &str, state: &DisplayState) -> String {
    match state {
        DisplayState::Loading => loading(),
        DisplayState::Error(message) => error(message),
        DisplayState::Ready(view) => ready(city, view),
    }
}

pub fn loading() -> String {
    LOADING_TEXT.to_string()
}

pub fn error(message: &str) -> String {
    message.to_string()
}

/// The full weather panel: header, current conditions, forecast strip.
pub fn ready(city: &str, view: &ViewModel) -> String {
    let mut out = String::new();

    out.push_str(city);
    out.push('\n');
    out.push_str(&format!("{}°\n", degrees(view.current.temperature)));
    out.push_str(&format!("最高{}° 最低{}°\n", degrees(view.high), degrees(view.low)));
    out.push_str(&view.current.description);
    out.push('\n');

    out.push('\n');
    out.push_str(FORECAST_HEADER);
    out.push('\n');
    for entry in &view.forecast {
        out.push_str(&format!(
            "{}  {}  {}°-{}°\n",
            entry.weekday,
            entry.day_condition,
            degrees(entry.temp_min),
            degrees(entry.temp_max),
        ));
    }

    out.push_str(&format!("更新于 {}\n", view.fetched_at.format("%Y-%m-%d %H:%M")));

    out
}

/// Whole degrees print without the fraction, e.g. `22°` rather than `22.0°`.
fn degrees(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}
