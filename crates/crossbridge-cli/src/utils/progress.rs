use crossbridge::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::fmt::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// The bar plus the name of the property grid it currently tracks.
struct GridBar {
    bar: ProgressBar,
    phase: &'static str,
}

/// Drives one terminal bar per property grid.
///
/// Cells that fail to evaluate are counted into the bar as they happen and
/// summarized on the line the bar leaves behind.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<GridBar>>,
    phase_failures: Arc<AtomicUsize>,
    total_failures: Arc<AtomicUsize>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr())
            .with_style(spinner_style())
            .with_message("Initializing...");
        bar.finish_and_clear();

        Self {
            state: Arc::new(Mutex::new(GridBar { bar, phase: "" })),
            phase_failures: Arc::new(AtomicUsize::new(0)),
            total_failures: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Cells reported as failed across every grid since the handler was created.
    pub fn failed_cells(&self) -> usize {
        self.total_failures.load(Ordering::Relaxed)
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let handler = self.clone();
        Box::new(move |progress: Progress| handler.handle(progress))
    }

    fn handle(&self, progress: Progress) {
        if let Progress::CellFailed { .. } = progress {
            self.phase_failures.fetch_add(1, Ordering::Relaxed);
            self.total_failures.fetch_add(1, Ordering::Relaxed);
        }

        let Ok(mut state) = self.state.lock() else {
            warn!("Progress bar mutex was poisoned. Cannot update progress.");
            return;
        };

        match progress {
            Progress::PhaseStart { name } => {
                self.phase_failures.store(0, Ordering::Relaxed);
                state.phase = name;
                state.bar.reset();
                state.bar.set_length(0);
                state.bar.set_style(spinner_style());
                state
                    .bar
                    .enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                state.bar.set_message(name);
            }
            Progress::TaskStart { total_steps } => {
                state.bar.disable_steady_tick();
                state.bar.reset();
                state.bar.set_length(total_steps);
                state.bar.set_style(bar_style(self.phase_failures.clone()));
                state.bar.set_message(state.phase);
            }
            Progress::TaskIncrement => state.bar.inc(1),
            Progress::CellFailed { .. } => state.bar.tick(),
            Progress::TaskFinish => {
                let length = state.bar.length().unwrap_or(0);
                state.bar.set_position(length);
                state.bar.finish();
            }
            Progress::PhaseFinish => {
                let failures = self.phase_failures.load(Ordering::Relaxed);
                state.bar.disable_steady_tick();
                state
                    .bar
                    .finish_with_message(phase_summary(state.phase, failures));
            }
            Progress::Message(msg) => {
                if state.bar.is_finished() {
                    state.bar.set_message(msg);
                } else {
                    state.bar.println(format!("  {}", msg));
                }
            }
        }
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn phase_summary(phase: &str, failures: usize) -> String {
    match failures {
        0 => format!("✓ {}", phase),
        n => format!("! {}: {} cell(s) stored as NaN", phase, n),
    }
}

fn write_failures(failures: usize, w: &mut dyn Write) {
    if failures > 0 {
        let _ = write!(w, ", {} NaN", failures);
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style(failures: Arc<AtomicUsize>) -> ProgressStyle {
    ProgressStyle::with_template(
        "{msg:<14} [{bar:40.cyan/blue}] {pos}/{len} cells{failed:.red} ({eta})",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .with_key("eta", |state: &ProgressState, w: &mut dyn Write| {
        let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
    })
    .with_key("failed", move |_: &ProgressState, w: &mut dyn Write| {
        write_failures(failures.load(Ordering::Relaxed), w)
    })
    .progress_chars("##-")
}
