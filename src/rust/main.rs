use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{info, warn};
use pdfspam::upload::ANALYZING_CAPTION;
use pdfspam::{ClientConfig, PredictClient, Screen, SelectedFile, UploadForm, ViewState};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the prediction service (overrides PDFSPAM_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Give up on a request after this many seconds (overrides PDFSPAM_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a PDF of an email and show whether it is spam
    Classify {
        /// The PDF to classify
        file: Option<PathBuf>,
    },
    /// Check that the prediction service is up
    Health,
    /// Show the metrics saved when the model was trained
    Metrics,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let mut config = ClientConfig::from_env().context("Failed to load client configuration")?;
    if let Some(base) = args.api_base {
        config = config.with_api_base(base);
    }
    if let Some(secs) = args.timeout {
        config = config.with_timeout(Some(Duration::from_secs(secs)));
    }
    let client = PredictClient::new(config).context("Failed to build HTTP client")?;

    match args.command {
        Command::Classify { file } => classify(&client, file).await,
        Command::Health => {
            let health = client.health().await?;
            println!("Service status: {}", health.status);
            Ok(ExitCode::SUCCESS)
        }
        Command::Metrics => match client.metrics().await? {
            Some(metrics) => {
                println!("{}", serde_json::to_string_pretty(&metrics)?);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                println!("No metrics saved yet.");
                Ok(ExitCode::FAILURE)
            }
        },
    }
}

async fn classify(client: &PredictClient, path: Option<PathBuf>) -> anyhow::Result<ExitCode> {
    let mut form = UploadForm::new();
    if let Some(path) = path {
        let file = SelectedFile::from_path(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        form.select_file(file);
    }

    let mut updates = form.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let loading = updates.borrow_and_update().is_loading();
            if loading {
                eprintln!("{}", ANALYZING_CAPTION);
            }
        }
    });

    tokio::select! {
        state = form.submit(client) => {
            info!("Submission settled: {}", describe(&state));
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted; the in-flight prediction was cancelled");
        }
    }

    let color = std::io::stdout().is_terminal();
    print!("{}", Screen::of(&form).with_color(color));

    Ok(match form.state() {
        ViewState::Success(_) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn describe(state: &ViewState) -> &'static str {
    match state {
        ViewState::Idle => "idle",
        ViewState::Loading => "loading",
        ViewState::Success(_) => "success",
        ViewState::Failed(_) => "failed",
    }
}
