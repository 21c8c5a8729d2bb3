//! Console output formatter for roundtable results

use colored::Colorize;
use roundtable_domain::{DiscussionEntry, EntryKind, OutputFormat, SessionResult};

/// Formats roundtable results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render `result` in the requested format
    pub fn render(result: &SessionResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(result),
            OutputFormat::Summary => Self::format_summary_only(result),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Format the full transcript followed by the summary
    pub fn format(result: &SessionResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Roundtable Discussion"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Speakers:".cyan().bold(),
            Self::speakers(result).join(", ")
        ));

        output.push_str(&Self::section_header("Transcript"));
        for entry in &result.entries {
            // The summary gets its own section below
            if entry.kind() == EntryKind::Summary {
                continue;
            }
            output.push_str(&Self::format_entry(entry));
        }

        output.push_str(&Self::section_header("Summary"));
        output.push_str(&format!("\n{}\n", Self::summary_text(result)));

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(result: &SessionResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the summary only (concise output)
    pub fn format_summary_only(result: &SessionResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Roundtable Summary ===".cyan().bold()
        ));

        output.push_str(&format!(
            "{} {}\n\n",
            "Speakers:".dimmed(),
            Self::speakers(result).join(", ")
        ));

        output.push_str(&Self::summary_text(result));
        output.push('\n');

        output
    }

    /// Format one transcript entry as it should appear on the console
    pub fn format_entry(entry: &DiscussionEntry) -> String {
        match entry.kind() {
            EntryKind::Start | EntryKind::Handoff | EntryKind::Summary => {
                format!("\n{}\n", entry.content().dimmed())
            }
            EntryKind::Contribution => format!(
                "\n{}\n{}\n",
                format!("── {} ──", entry.role()).yellow().bold(),
                entry.content()
            ),
            EntryKind::Fallback => format!(
                "\n{}\n{}\n",
                format!("── {} ──", entry.role()).red().bold(),
                entry.content().italic()
            ),
        }
    }

    fn summary_text(result: &SessionResult) -> String {
        if result.is_aborted() {
            format!(
                "{} {} entries were recorded before the session stopped.",
                "Discussion aborted.".red().bold(),
                result.entries.len()
            )
        } else {
            result.summary.clone()
        }
    }

    /// Distinct speakers in order of first appearance
    fn speakers(result: &SessionResult) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in result.contributions() {
            if !names.contains(&entry.role()) {
                names.push(entry.role());
            }
        }
        names
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::EntryDraft;

    fn sample_result() -> SessionResult {
        let drafts = vec![
            EntryDraft::start(),
            EntryDraft::contribution("Host", "Let us begin."),
            EntryDraft::handoff("Ana"),
            EntryDraft::contribution("Ana", "Ship on Friday."),
            EntryDraft::handoff("Bo"),
            EntryDraft::fallback("Bo", "(No reply received from Bo due to a technical issue)"),
            EntryDraft::summary("Friday it is."),
        ];
        let entries = drafts
            .into_iter()
            .enumerate()
            .map(|(i, d)| d.into_entry(i as u64))
            .collect();
        SessionResult::completed(entries, "Friday it is.")
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_full_output_lists_every_entry_once() {
        plain();
        let output = ConsoleFormatter::render(&sample_result(), OutputFormat::Full);
        assert!(output.contains("── Host ──\nLet us begin."));
        assert!(output.contains("[Ana will speak next]"));
        assert!(output.contains("due to a technical issue"));
        assert!(output.contains("Speakers: Host, Ana, Bo"));
        assert_eq!(output.matches("Friday it is.").count(), 1);
    }

    #[test]
    fn test_summary_only_output() {
        plain();
        let output = ConsoleFormatter::render(&sample_result(), OutputFormat::Summary);
        assert!(output.contains("Friday it is."));
        assert!(!output.contains("Let us begin."));
    }

    #[test]
    fn test_aborted_result_is_flagged() {
        plain();
        let mut result = sample_result();
        result.entries.truncate(4);
        let result = SessionResult::aborted(result.entries);
        let output = ConsoleFormatter::format_summary_only(&result);
        assert!(output.contains("Discussion aborted."));
        assert!(output.contains("4 entries"));
    }

    #[test]
    fn test_json_output_round_trips() {
        let output = ConsoleFormatter::render(&sample_result(), OutputFormat::Json);
        let parsed: SessionResult = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, sample_result());
    }
}
