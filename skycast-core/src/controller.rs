use chrono::Utc;
use tracing::{debug, warn};

use crate::model::ViewModel;
use crate::provider::FetchOutcome;

/// The one user-visible failure message, regardless of what went wrong.
pub const FETCH_ERROR_MESSAGE: &str = "无法获取天气数据，请稍后再试。";

/// What the widget shows right now. Exactly one of these at any time.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState {
    Loading,
    Error(String),
    Ready(ViewModel),
}

/// Tag for one fetch cycle, issued by [`DisplayController::begin_fetch`].
///
/// A result carrying a stale tag is discarded on apply, so a slow fetch for a
/// previously selected city can never overwrite a newer city's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchGeneration(u64);

/// State machine driving the widget: `Loading -> {Ready | Error}`, re-entered
/// at `Loading` on every city change.
///
/// Each widget instance owns its own controller; state is only ever touched
/// from the owning task, so there is no locking.
#[derive(Debug)]
pub struct DisplayController {
    state: DisplayState,
    generation: u64,
}

impl DisplayController {
    pub fn new() -> Self {
        Self { state: DisplayState::Loading, generation: 0 }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Start a new fetch cycle for the current selection.
    ///
    /// Synchronously enters `Loading`, discarding whatever was on display,
    /// and returns the tag the cycle's result must carry to be applied.
    pub fn begin_fetch(&mut self) -> FetchGeneration {
        self.generation += 1;
        self.state = DisplayState::Loading;

        FetchGeneration(self.generation)
    }

    /// Resolve a fetch cycle.
    ///
    /// Stale results (tag older than the latest `begin_fetch`) are dropped
    /// without touching the display. A successful pair of payloads goes
    /// through the view model builder; any failure, including an empty
    /// forecast, lands in `Error` with the fixed message.
    pub fn apply(&mut self, generation: FetchGeneration, outcome: FetchOutcome) {
        if generation.0 != self.generation {
            debug!(stale = generation.0, current = self.generation, "discarding stale fetch result");
            return;
        }

        let built = outcome
            .and_then(|(current, forecast)| ViewModel::build(current, forecast, Utc::now()));

        self.state = match built {
            Ok(view) => DisplayState::Ready(view),
            Err(err) => {
                warn!(error = %err, "fetch cycle failed");
                DisplayState::Error(FETCH_ERROR_MESSAGE.to_string())
            }
        };
    }
}

impl Default for DisplayController {
    fn default() -> Self {
        Self::new()
    }
}
