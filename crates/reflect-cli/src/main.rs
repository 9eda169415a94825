mod config;
mod input;
mod transcript;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use clap::Parser;
use colored::Colorize;
use tokio_util::sync::CancellationToken;

use reflect_core::{SignalPolicy, TokenBudget};
use reflect_llm::{GenerationParams, OpenAiCompatClient};
use reflect_loop::{Experiment, ExperimentConfig, RunOutcome};

use crate::config::Config;
use crate::input::StdinHumanInput;
use crate::transcript::FileTranscript;

#[derive(Parser)]
#[command(name = "reflect")]
#[command(about = "Run a dual-persona LLM self-reflection experiment")]
#[command(version)]
struct Cli {
    /// Path to the TOML config file (default: ~/.reflect/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// OpenAI-compatible endpoint base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Model identifier sent to the endpoint
    #[arg(long)]
    model: Option<String>,

    /// Maximum number of question/answer iterations
    #[arg(long)]
    iterations: Option<usize>,

    /// Max output tokens; also the per-conversation trimming budget
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Directory for the transcript file
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Match STOP/QUESTION as substrings instead of exact replies
    #[arg(long)]
    substring_signals: bool,

    /// Enable debug logging
    #[arg(long, short)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(iterations) = cli.iterations {
        config.iterations = iterations;
    }
    if let Some(max_tokens) = cli.max_tokens {
        config.max_tokens = max_tokens;
    }
    if let Some(log_dir) = cli.log_dir {
        config.log_dir = log_dir;
    }

    let params = GenerationParams {
        max_tokens: config.max_tokens,
        temperature: config.temperature,
        top_p: config.top_p,
        top_k: config.top_k,
        frequency_penalty: config.frequency_penalty,
        presence_penalty: config.presence_penalty,
    };
    let mut client = OpenAiCompatClient::new(&config.api_url, &config.model).with_params(params);
    if let Some(api_key) = &config.api_key {
        client = client.with_api_key(api_key);
    }

    std::fs::create_dir_all(&config.log_dir)?;
    let log_path = config
        .log_dir
        .join(FileTranscript::file_name(&Local::now()));
    let mut transcript = FileTranscript::create(&log_path)?;
    log::info!("transcript: {}", log_path.display());

    let mut human = StdinHumanInput::new();

    let signal_policy = if cli.substring_signals {
        SignalPolicy::Substring
    } else {
        SignalPolicy::ExactMatch
    };
    let experiment_config = ExperimentConfig {
        max_iterations: config.iterations,
        token_budget: TokenBudget::new(config.max_tokens as usize),
        signal_policy,
        ..ExperimentConfig::default()
    };
    let mut experiment = Experiment::new(experiment_config);

    let cancel_token = CancellationToken::new();
    let ctrl_c_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    let outcome = experiment
        .run(Arc::new(client), &mut transcript, &mut human, cancel_token)
        .await?;

    match outcome {
        RunOutcome::Completed => println!("Experiment completed successfully."),
        RunOutcome::Stopped => {
            println!("{}", "Model requested to stop. Ending experiment.".red())
        }
    }

    Ok(())
}
