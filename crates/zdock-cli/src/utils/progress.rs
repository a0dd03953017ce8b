use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;
use zdockpp::engine::progress::{Progress, ProgressCallback};

const SPINNER_TICK_MS: u64 = 80;

/// Renders engine progress events as a spinner/bar on stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
    phase: Arc<Mutex<&'static str>>,
}

impl CliProgressHandler {
    /// A handler drawing to stderr, or drawing nothing when `hidden`.
    pub fn new(hidden: bool) -> Self {
        let pb = ProgressBar::new(0).with_style(Self::spinner_style());
        pb.set_draw_target(if hidden {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr()
        });
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
            phase: Arc::new(Mutex::new("")),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();
        let phase_clone = self.phase.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    if let Ok(mut phase) = phase_clone.lock() {
                        *phase = name;
                    }
                    pb_guard.reset();
                    pb_guard.set_length(0);
                    pb_guard.set_style(Self::spinner_style());
                    pb_guard.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb_guard.set_message(name);
                }
                Progress::PhaseFinish => {
                    let name = phase_clone.lock().map(|p| *p).unwrap_or("");
                    pb_guard.disable_steady_tick();
                    pb_guard.finish_with_message(format!("✓ {name}"));
                }
                Progress::TaskStart { total_steps } => {
                    pb_guard.disable_steady_tick();
                    pb_guard.reset();
                    pb_guard.set_length(total_steps);
                    pb_guard.set_position(0);
                    pb_guard.set_style(Self::bar_style());
                }
                Progress::TaskIncrement => {
                    pb_guard.inc(1);
                }
                Progress::TaskFinish => {
                    let length = pb_guard.length().unwrap_or(0);
                    if pb_guard.position() < length {
                        pb_guard.set_position(length);
                    }
                    pb_guard.finish();
                }
                Progress::Message(msg) => {
                    if pb_guard.is_finished() {
                        pb_guard.set_message(msg);
                    } else {
                        pb_guard.println(format!("  {msg}"));
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
        match ProgressStyle::with_template("{msg:<22} [{bar:40.cyan/blue}] {pos}/{len} ({eta})") {
            Ok(style) => style
                .with_key("eta", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                })
                .progress_chars("##-"),
            Err(_) => ProgressStyle::default_bar(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use zdockpp::engine::progress::ProgressReporter;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::new(true);
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn pruning_phases_render_in_sequence() {
        let handler = CliProgressHandler::new(true);
        let reporter = ProgressReporter::with_callback(handler.get_callback());

        reporter.start_phase("Pose pre-computation", 3);
        for _ in 0..3 {
            reporter.report(Progress::TaskIncrement);
        }
        reporter.finish_phase();
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
            assert_eq!(pb.position(), 3);
            assert_eq!(pb.message(), "✓ Pose pre-computation");
        }

        reporter.start_phase("Clustering", 5);
        reporter.report(Progress::TaskIncrement);
        {
            let pb = handler.pb.lock().unwrap();
            assert!(!pb.is_finished());
            assert_eq!(pb.length(), Some(5));
            assert_eq!(pb.position(), 1);
        }

        // Clusters can absorb later poses, so the scan may finish early.
        reporter.finish_phase();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.position(), 5);
        assert_eq!(pb.message(), "✓ Clustering");
    }

    #[test]
    fn message_after_phase_replaces_finished_label() {
        let handler = CliProgressHandler::new(true);
        let reporter = ProgressReporter::with_callback(handler.get_callback());

        reporter.start_phase("Constraint filtering", 1);
        reporter.finish_phase();
        reporter.report(Progress::Message("12 of 40 predictions kept".to_string()));

        assert_eq!(handler.pb.lock().unwrap().message(), "12 of 40 predictions kept");
    }

    #[test]
    fn increments_from_worker_threads_are_all_counted() {
        let handler = CliProgressHandler::new(true);
        let reporter = ProgressReporter::with_callback(handler.get_callback());

        reporter.start_phase("Constraint filtering", 40);
        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..10 {
                        reporter.report(Progress::TaskIncrement);
                    }
                });
            }
        });

        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.position(), 40);
        assert!(!pb.is_finished());
    }
}
