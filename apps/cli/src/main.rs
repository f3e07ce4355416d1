use std::{fs, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client_core::AnalysisClient;
use report::{NormalizeOptions, OutputFormat};
use shared::protocol::{AnalysisForm, AnalysisResult};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod controller;

use controller::{
    results::{OutputTarget, ResultsRegion},
    AnalysisSession,
};

#[derive(Parser, Debug)]
#[command(name = "icp-matcher", about = "Match event attendees against a company's ICP")]
struct Cli {
    /// Config file; defaults to ./icp-matcher.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[arg(long, global = true)]
    timeout_seconds: Option<u64>,
    /// auto, 10 or 100.
    #[arg(long, global = true)]
    scale: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit an analysis and render the report.
    Analyze {
        #[arg(long)]
        event_url: String,
        #[arg(long)]
        company_url: String,
        #[arg(long)]
        company_name: Option<String>,
        #[command(flatten)]
        view: OutputArgs,
    },
    /// Render a previously saved analysis payload.
    Render {
        #[arg(long)]
        input: PathBuf,
        #[command(flatten)]
        view: OutputArgs,
    },
    /// Query the backend health endpoint.
    Health,
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,
    /// Write the view to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Html,
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Html => OutputFormat::Html,
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl OutputArgs {
    fn region(&self) -> ResultsRegion {
        ResultsRegion::new(match &self.output {
            Some(path) => OutputTarget::File(path.clone()),
            None => OutputTarget::Stdout,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = config::load_settings(cli.config.as_deref())?;
    if let Some(v) = cli.server_url {
        settings.server_url = v;
    }
    if let Some(v) = cli.timeout_seconds {
        if v == 0 {
            return Err(anyhow!("--timeout-seconds must be greater than zero"));
        }
        settings.timeout_seconds = v;
    }
    if let Some(v) = cli.scale.as_deref() {
        settings.score_scale = config::parse_scale(v)?;
    }
    let options = NormalizeOptions {
        scale: settings.score_scale,
    };
    let client = AnalysisClient::new(settings.server_url.clone(), settings.timeout());

    match cli.command {
        Command::Health => {
            let health = client
                .check_health()
                .await
                .map_err(|err| anyhow!(err.user_message()))?;
            println!("{}", serde_json::to_string_pretty(&health)?);
            if !health.is_fully_configured() {
                warn!("API not fully configured; check the backend .env file");
            }
        }
        Command::Analyze {
            event_url,
            company_url,
            company_name,
            view,
        } => {
            report_health(&client).await;
            let session = AnalysisSession::new(client, view.region(), options, view.format.into());

            let orchestrator = session.orchestrator();
            let interrupt = tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("interrupt received, cancelling analysis");
                    orchestrator.cancel();
                }
            });

            let form = AnalysisForm {
                event_url,
                company_url,
                company_name,
            };
            let outcome = session.run(&form).await;
            interrupt.abort();
            outcome.map_err(|err| anyhow!(err.user_message()))?;
        }
        Command::Render { input, view } => {
            let raw = fs::read_to_string(&input)
                .with_context(|| format!("failed to read payload '{}'", input.display()))?;
            let value: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("payload '{}' is not JSON", input.display()))?;
            let result = AnalysisResult::from_value(value)
                .ok_or_else(|| anyhow!("payload '{}' is not a JSON object", input.display()))?;
            let session = AnalysisSession::new(client, view.region(), options, view.format.into());
            session
                .show(&result)
                .map_err(|err| anyhow!(err.user_message()))?;
        }
    }

    Ok(())
}

/// Advisory only: logs readiness problems and never blocks submission.
async fn report_health(client: &AnalysisClient) {
    match client.check_health().await {
        Ok(health) if health.is_fully_configured() => {
            info!(server_url = client.server_url(), "backend ready")
        }
        Ok(health) => warn!(
            linkup_configured = health.linkup_configured,
            openai_configured = health.openai_configured,
            "API not fully configured; check the backend .env file"
        ),
        Err(err) => warn!(error = %err, "could not check API health"),
    }
}
