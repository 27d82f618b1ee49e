//! Progress reporting for batch analysis (feature `progress`).
//!
//! * [`EventTimer`] – wall time spent analyzing each event, measured around the event only
//!   (reading the next event is not counted), with the running mean over the run.
//! * [`fmt_dur`] – compact duration formatting (`"253µs"`, `"42ms"`, `"3.14s"`).
//! * [`event_progress_bar`] – the styled [`ProgressBar`] used by
//!   [`OverlapAnalyzer::analyze_events`](crate::overlap::analyzer::OverlapAnalyzer::analyze_events).

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

#[derive(Debug, Default)]
pub(crate) struct EventTimer {
    total: Duration,
    last: Duration,
    events: u32,
}

impl EventTimer {
    /// Run `analyze` and account its duration as one event.
    pub(crate) fn time<R>(&mut self, analyze: impl FnOnce() -> R) -> R {
        let start = Instant::now();
        let result = analyze();
        self.last = start.elapsed();
        self.total += self.last;
        self.events = self.events.saturating_add(1);
        result
    }

    pub(crate) fn last(&self) -> Duration {
        self.last
    }

    pub(crate) fn mean(&self) -> Duration {
        if self.events == 0 {
            Duration::ZERO
        } else {
            self.total / self.events
        }
    }

    pub(crate) fn message(&self) -> String {
        format!("last: {}, mean: {}", fmt_dur(self.last()), fmt_dur(self.mean()))
    }
}

pub(crate) fn fmt_dur(d: Duration) -> String {
    match (d.as_micros(), d.as_millis()) {
        (us, _) if us < 1_000 => format!("{us}µs"),
        (_, ms) if ms < 1_000 => format!("{ms}ms"),
        _ => format!("{:.2}s", d.as_secs_f32()),
    }
}

/// Progress bar over `total` events; `total` may be zero when the input length is unknown.
pub(crate) fn event_progress_bar(total: u64) -> ProgressBar {
    let pb = if total == 0 {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::new(total)
    };
    pb.set_style(
        ProgressStyle::with_template(
            "{bar:40.cyan/blue} {pos}/{len} events ({percent:>3}%) | {per_sec} | ETA {eta_precise} | {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.enable_steady_tick(Duration::from_millis(200));
    pb
}
