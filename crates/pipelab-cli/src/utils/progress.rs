use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use pipelab::engine::progress::{Progress, ProgressReporter};
use std::time::Duration;

const SPINNER_TICK_MS: u64 = 80;
const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg} ({elapsed})";

/// Stderr spinner shown while a composition phase (usually the reasoning call) runs.
#[derive(Clone)]
pub struct CliProgressHandler {
    spinner: ProgressBar,
}

impl CliProgressHandler {
    /// A hidden handler still tracks state but draws nothing, so `--json` output
    /// stays clean.
    pub fn new(visible: bool) -> Self {
        let target = if visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let spinner = ProgressBar::with_draw_target(None, target).with_style(spinner_style());
        spinner.finish_and_clear();
        Self { spinner }
    }

    pub fn reporter(&self) -> ProgressReporter<'static> {
        let spinner = self.spinner.clone();
        ProgressReporter::with_callback(Box::new(move |event| apply(&spinner, event)))
    }
}

fn apply(spinner: &ProgressBar, event: Progress) {
    match event {
        Progress::PhaseStart { name } => {
            spinner.reset();
            spinner.set_message(name);
            spinner.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        }
        Progress::PhaseFinish => {
            spinner.disable_steady_tick();
            spinner.finish_and_clear();
        }
        // Fallback notes surface above a running spinner; once idle they only
        // replace its message, since the draft repeats them as warnings.
        Progress::Message(note) if spinner.is_finished() => spinner.set_message(note),
        Progress::Message(note) => spinner.println(format!("  {note}")),
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template(SPINNER_TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_spinner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_handler_starts_idle() {
        let handler = CliProgressHandler::new(false);
        assert!(handler.spinner.is_hidden());
        assert!(handler.spinner.is_finished());
    }

    #[test]
    fn reasoning_phase_runs_then_clears() {
        let handler = CliProgressHandler::new(false);
        let reporter = handler.reporter();

        reporter.report(Progress::PhaseStart {
            name: "Consulting reasoning service",
        });
        assert_eq!(handler.spinner.message(), "Consulting reasoning service");
        assert!(!handler.spinner.is_finished());

        reporter.report(Progress::Message("Falling back: timed out".to_string()));
        assert_eq!(handler.spinner.message(), "Consulting reasoning service");

        reporter.report(Progress::PhaseFinish);
        assert!(handler.spinner.is_finished());
    }

    #[test]
    fn note_after_phase_becomes_the_message() {
        let handler = CliProgressHandler::new(false);
        let reporter = handler.reporter();
        reporter.report(Progress::PhaseStart {
            name: "Composing from keywords",
        });
        reporter.report(Progress::PhaseFinish);
        reporter.report(Progress::Message("Removed 1 GPU-dependent module(s).".to_string()));
        assert_eq!(handler.spinner.message(), "Removed 1 GPU-dependent module(s).");
        assert!(handler.spinner.is_finished());
    }

    #[test]
    fn second_phase_restarts_a_finished_spinner() {
        let handler = CliProgressHandler::new(false);
        let reporter = handler.reporter();
        for name in ["Consulting reasoning service", "Composing from keywords"] {
            reporter.report(Progress::PhaseStart { name });
            assert!(!handler.spinner.is_finished());
            reporter.report(Progress::PhaseFinish);
        }
        assert_eq!(handler.spinner.message(), "Composing from keywords");
    }
}
