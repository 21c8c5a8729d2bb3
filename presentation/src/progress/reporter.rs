//! Progress reporting for roundtable sessions

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use roundtable_application::ports::progress::ProgressNotifier;
use roundtable_domain::core::string::preview;
use roundtable_domain::{AgentRole, DiscussionEntry, SessionStatus};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a single turn bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
    round_label: Mutex<String>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            round_label: Mutex::new(String::new()),
        }
    }

    fn turn_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }

    fn round_label(&self) -> String {
        self.round_label
            .lock()
            .map(|label| label.clone())
            .unwrap_or_default()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_session_start(&self, meeting_id: &str, _rounds: usize, total_turns: usize) {
        let bar = ProgressBar::new(total_turns as u64);
        bar.set_style(Self::turn_style());
        bar.set_prefix(meeting_id.to_string());
        bar.set_message("Starting...");
        bar.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn on_round_start(&self, round: usize, rounds: usize) {
        if let Ok(mut label) = self.round_label.lock() {
            *label = format!("Round {}/{}", round + 1, rounds);
        }
    }

    fn on_turn_start(&self, speaker: &str, role: AgentRole, _round: usize) {
        let label = self.round_label();
        self.with_bar(|bar| {
            bar.set_message(format!("{}: {} ({}) is speaking", label, speaker, role.as_str()));
        });
    }

    fn on_turn_complete(&self, entry: &DiscussionEntry) {
        let status = if entry.is_fallback() {
            format!("{} {}", "x".red(), entry.role())
        } else {
            format!(
                "{} {}: {}",
                "v".green(),
                entry.role(),
                preview(entry.content(), 48)
            )
        };
        self.with_bar(|bar| {
            bar.set_message(status);
            bar.inc(1);
        });
    }

    fn on_summary_start(&self) {
        self.with_bar(|bar| bar.set_message("Summarizing the discussion..."));
    }

    fn on_session_finish(&self, status: SessionStatus) {
        if let Ok(mut slot) = self.bar.lock()
            && let Some(bar) = slot.take()
        {
            match status {
                SessionStatus::Completed => {
                    bar.finish_with_message(format!("{}", "Discussion complete!".green()))
                }
                SessionStatus::Aborted => {
                    bar.abandon_with_message(format!("{}", "Discussion aborted".red()))
                }
            }
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_session_start(&self, meeting_id: &str, rounds: usize, total_turns: usize) {
        eprintln!(
            "{} {} ({} rounds, {} turns)",
            "->".cyan(),
            meeting_id.bold(),
            rounds,
            total_turns
        );
    }

    fn on_round_start(&self, round: usize, rounds: usize) {
        eprintln!("{} Round {}/{}", "->".cyan(), round + 1, rounds);
    }

    fn on_turn_complete(&self, entry: &DiscussionEntry) {
        if entry.is_fallback() {
            eprintln!("  {} {} (fallback)", "x".red(), entry.role());
        }
    }

    fn on_summary_start(&self) {
        eprintln!("{} Summarizing", "->".cyan());
    }

    fn on_session_finish(&self, status: SessionStatus) {
        if status == SessionStatus::Aborted {
            eprintln!("{} Discussion aborted", "x".red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::EntryDraft;

    fn position(reporter: &ProgressReporter) -> Option<u64> {
        reporter
            .bar
            .lock()
            .unwrap()
            .as_ref()
            .map(|bar| bar.position())
    }

    #[test]
    fn test_bar_counts_completed_turns() {
        let reporter = ProgressReporter::new();
        reporter.on_session_start("m1", 2, 6);
        reporter.on_round_start(0, 2);
        reporter.on_turn_start("Host", AgentRole::Host, 0);
        reporter.on_turn_complete(&EntryDraft::contribution("Host", "hi").into_entry(1));
        reporter.on_turn_complete(&EntryDraft::fallback("Ana", "(none)").into_entry(3));

        assert_eq!(position(&reporter), Some(2));
        assert_eq!(reporter.round_label(), "Round 1/2");
    }

    #[test]
    fn test_finish_releases_bar() {
        let reporter = ProgressReporter::new();
        reporter.on_session_start("m1", 1, 2);
        reporter.on_session_finish(SessionStatus::Aborted);
        assert_eq!(position(&reporter), None);
    }

    #[test]
    fn test_callbacks_before_start_are_ignored() {
        let reporter = ProgressReporter::default();
        reporter.on_turn_start("Host", AgentRole::Host, 0);
        reporter.on_summary_start();
        reporter.on_session_finish(SessionStatus::Completed);
        assert_eq!(position(&reporter), None);
    }
}
