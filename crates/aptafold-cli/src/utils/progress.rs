use aptafold::engine::progress::{Progress, ProgressCallback};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;
const CONSOLE_REFRESH_HZ: u8 = 12;

static CONSOLE: OnceLock<MultiProgress> = OnceLock::new();

/// The stderr console shared by progress bars and log lines.
pub fn console() -> &'static MultiProgress {
    CONSOLE.get_or_init(|| {
        MultiProgress::with_draw_target(ProgressDrawTarget::stderr_with_hz(CONSOLE_REFRESH_HZ))
    })
}

/// Writes through a [`MultiProgress`], clearing its bars for the duration of each write
/// so log lines land above the bars instead of through them.
pub struct ConsoleWriter<W> {
    console: MultiProgress,
    inner: W,
}

impl ConsoleWriter<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(console().clone(), io::stderr())
    }
}

impl<W: Write> ConsoleWriter<W> {
    pub fn new(console: MultiProgress, inner: W) -> Self {
        Self { console, inner }
    }
}

impl<W: Write> Write for ConsoleWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let inner = &mut self.inner;
        self.console.suspend(|| inner.write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let inner = &mut self.inner;
        self.console.suspend(|| inner.write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

struct BarState {
    pb: ProgressBar,
    phase: String,
    failed: usize,
    interrupted: bool,
}

impl BarState {
    fn refresh_message(&self) {
        if self.failed == 0 {
            self.pb.set_message(self.phase.clone());
        } else {
            self.pb
                .set_message(format!("{} ({} failed)", self.phase, self.failed));
        }
    }
}

/// Renders engine progress events as an indicatif spinner and per-record bar on stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<BarState>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::attached_to(console())
    }

    /// Builds a handler that never draws, for `--quiet` runs.
    pub fn hidden() -> Self {
        Self::from_bar(ProgressBar::hidden())
    }

    fn attached_to(console: &MultiProgress) -> Self {
        Self::from_bar(console.add(ProgressBar::new(0)))
    }

    fn from_bar(pb: ProgressBar) -> Self {
        pb.set_style(Self::spinner_style());
        pb.set_message("Initializing...");
        pb.finish_and_clear();

        Self {
            state: Arc::new(Mutex::new(BarState {
                pb,
                phase: String::new(),
                failed: 0,
                interrupted: false,
            })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = self.state.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut state) = state.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    state.phase = name.to_string();
                    state.failed = 0;
                    state.interrupted = false;
                    state.pb.reset();
                    state.pb.set_length(0);
                    state.pb.set_style(Self::spinner_style());
                    state
                        .pb
                        .enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    state.refresh_message();
                }
                Progress::PhaseFinish => {
                    state.pb.disable_steady_tick();
                    if state.interrupted {
                        return;
                    }
                    if state.failed == 0 {
                        state.pb.finish_with_message("✓ Done");
                    } else {
                        let message = format!("✓ Done ({} failed)", state.failed);
                        state.pb.finish_with_message(message);
                    }
                }
                Progress::BatchStart { total_records } => {
                    state.pb.disable_steady_tick();
                    state.pb.reset();
                    state.pb.set_length(total_records);
                    state.pb.set_position(0);
                    state.pb.set_style(Self::bar_style());
                    state.refresh_message();
                }
                Progress::RecordFinished { succeeded } => {
                    if !succeeded {
                        state.failed += 1;
                        state.refresh_message();
                    }
                    state.pb.inc(1);
                }
                Progress::BatchFinish => {
                    let length = state.pb.length().unwrap_or(0);
                    if state.pb.position() < length {
                        state.interrupted = true;
                        state.pb.abandon_with_message(format!(
                            "{} interrupted at {}/{}",
                            state.phase,
                            state.pb.position(),
                            length
                        ));
                    } else {
                        state.pb.finish();
                    }
                }
                Progress::Message(msg) => {
                    if !state.pb.is_finished() {
                        state.pb.println(format!("  {}", msg));
                    } else {
                        state.pb.set_message(msg);
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<20} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
