//! CLI entrypoint for meeting-roundtable
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use roundtable_application::{
    NoProgress, ProgressNotifier, RunRoundtableError, RunRoundtableUseCase, TurnSink,
};
use roundtable_domain::OutputFormat;
use roundtable_infrastructure::{
    ConfigLoader, FileConfig, FileMeetingRepository, JsonlConversationLogger, OpenAiCompatGateway,
};
use roundtable_presentation::{
    Cli, ConsoleFormatter, ConsoleTurnSink, ProgressReporter, SimpleProgress,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber.
///
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match &cli.log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            builder.with_writer(writer).with_ansi(false).init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Cancel `token` on the first Ctrl-C.
fn spawn_interrupt_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted; stopping after the current turn");
            token.cancel();
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = load_config(&cli)?;
    info!("Starting meeting-roundtable");

    if !config.output.color {
        colored::control::set_override(false);
    }

    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    let stream = cli.stream || config.output.stream;

    let mut params = config.discussion.to_params();
    if let Some(seconds) = cli.timeout {
        if seconds == 0 {
            bail!("--timeout must be greater than 0");
        }
        params = params.with_session_timeout(Some(Duration::from_secs(seconds)));
    }

    let request = cli.session_request(config.discussion.default_rounds);

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiCompatGateway::from_file_config(&config.provider)?);
    let meetings = Arc::new(FileMeetingRepository::new(
        config.storage.meetings_dir.clone(),
    ));

    let cancellation = CancellationToken::new();
    spawn_interrupt_handler(cancellation.clone());

    let mut use_case = RunRoundtableUseCase::new(gateway, meetings)
        .with_params(params)
        .with_cancellation(cancellation);

    if let Some(dir) = &config.logging.conversation_log_dir
        && let Some(logger) = JsonlConversationLogger::for_session(dir, &request.meeting_id)
    {
        info!("Conversation log: {}", logger.path().display());
        use_case = use_case.with_conversation_logger(Arc::new(logger));
    }

    if stream {
        let sink: Arc<dyn TurnSink> = Arc::new(ConsoleTurnSink::stdout());
        let progress: Box<dyn ProgressNotifier> = if cli.quiet {
            Box::new(NoProgress)
        } else {
            Box::new(SimpleProgress)
        };

        return match use_case
            .execute_streaming_with_progress(request, sink, progress.as_ref())
            .await
        {
            Ok(()) => Ok(()),
            Err(RunRoundtableError::Cancelled) => bail!("Discussion aborted"),
            Err(e) => Err(e.into()),
        };
    }

    let result = if cli.quiet {
        use_case.execute(request).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(request, &progress).await?
    };

    println!("{}", ConsoleFormatter::render(&result, format));

    if result.is_aborted() {
        bail!("Discussion aborted before the summary");
    }
    Ok(())
}
