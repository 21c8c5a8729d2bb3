//! CLI command definitions

use clap::{Parser, ValueEnum};
use roundtable_domain::SessionRequest;
use std::path::PathBuf;

/// Output format for roundtable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full transcript followed by the summary
    Full,
    /// Only the closing summary
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for roundtable_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for meeting-roundtable
#[derive(Parser, Debug)]
#[command(name = "roundtable")]
#[command(author, version, about = "Host-led roundtable discussions about recorded meetings")]
#[command(long_about = r#"
Roundtable continues a recorded meeting as a moderated discussion.

Every round has the same shape:
1. The host opens the round (or recaps it and invites everyone back in)
2. Each specialist replies once, in the order given on the command line
3. After the last round a closing summary is generated

Configuration files are loaded from (in priority order):
1. ROUNDTABLE_* environment variables
2. --config <path>     Explicit config file
3. ./roundtable.toml   Project-level config
4. ~/.config/meeting-roundtable/config.toml   Global config

Example:
  roundtable --meeting weekly-sync --host Moderator -s Engineer -s Designer
  roundtable --meeting q3-review --host Chair -s Finance -s Sales --rounds 2 --topic "budget"
  roundtable --meeting weekly-sync --host Moderator -s Engineer --stream
"#)]
pub struct Cli {
    /// Id of the recorded meeting to discuss
    #[arg(long, value_name = "ID", required_unless_present = "show_config")]
    pub meeting: Option<String>,

    /// Name of the host who moderates the discussion
    #[arg(long, value_name = "NAME", required_unless_present = "show_config")]
    pub host: Option<String>,

    /// Specialist participants, in speaking order (can be specified multiple times)
    #[arg(short, long = "specialist", value_name = "NAME")]
    pub specialists: Vec<String>,

    /// Number of rounds (defaults to `discussion.default_rounds`; 0 or less runs 3)
    #[arg(short, long, allow_negative_numbers = true)]
    pub rounds: Option<i64>,

    /// Topic the host should steer the discussion towards
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Print each entry as soon as it is produced
    #[arg(long)]
    pub stream: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Abort the session after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Build the session request, falling back to `default_rounds` when
    /// `--rounds` was not given.
    pub fn session_request(&self, default_rounds: i64) -> SessionRequest {
        let mut request = SessionRequest::new(
            self.meeting.clone().unwrap_or_default(),
            self.host.clone().unwrap_or_default(),
            self.specialists.clone(),
        )
        .with_rounds(self.rounds.unwrap_or(default_rounds));
        if let Some(topic) = &self.topic {
            request = request.with_topic(topic.clone());
        }
        request
    }
}
