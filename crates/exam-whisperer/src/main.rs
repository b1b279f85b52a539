//! Command-line entry point: serve the HTTP API or run one operation locally.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use exam_whisperer::config::{LayeredConfigOptions, WhispererConfig};
use exam_whisperer::history::{FileHistoryStore, HistoryStore};
use exam_whisperer::server::{AppState, serve};
use exam_whisperer::voice::{TtsEngine, synthesize, transcribe};
use log::{debug, info};
use std::path::PathBuf;

/// Command-line options for the Exam Whisperer binary.
#[derive(Parser)]
#[command(name = "exam-whisperer", version, about = "AI study assistant backend")]
struct Cli {
    /// Optional path to an exam-whisperer.json5 config file applied last
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the history file location
    #[arg(long, global = true)]
    history: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Address to bind
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },
    /// Inspect or clear the session history
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
    /// Ask one question and log the exchange
    Ask { prompt: String },
    /// Generate one quiz for a topic
    Quiz { topic: String },
    /// Simulated voice input and output
    Voice {
        #[command(subcommand)]
        action: VoiceCommand,
    },
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// Print every record as JSON
    List,
    /// Delete the history file
    Clear,
}

#[derive(Subcommand)]
enum VoiceCommand {
    /// Transcribe an audio file
    Transcribe { path: PathBuf },
    /// Speak text, optionally saving the audio
    Speak {
        text: String,
        #[arg(long, default_value_t = TtsEngine::Pyttsx3)]
        engine: TtsEngine,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// The requested command, serving when none was given.
    fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Serve {
            bind: None,
            port: None,
        })
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<WhispererConfig> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let mut options = LayeredConfigOptions::new(&cwd);
    if let Some(path) = cli.config.as_ref() {
        options = options.with_runtime_path(path);
    }
    let layered = WhispererConfig::load_layered_with_options(options)
        .context("failed to load layered config")?;
    debug!("layered config loaded (layers={})", layered.layers.len());
    let mut config = layered.config;
    if let Some(path) = cli.history.as_ref() {
        config.history.path = path.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    exam_whisperer::init_logging();

    let cli = Cli::parse();
    info!(
        "starting exam-whisperer (config_set={}, history_set={})",
        cli.config.is_some(),
        cli.history.is_some()
    );
    let mut config = load_config(&cli)?;

    match cli.into_command() {
        Command::Serve { bind, port } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = AppState::from_config(&config).context("failed to build server state")?;
            serve(state, &config.server.bind, config.server.port)
                .await
                .context("server failed")?;
        }
        Command::History { action } => {
            let store = FileHistoryStore::new(&config.history.path);
            match action {
                HistoryCommand::List => {
                    let records = store.read_all().await.context("failed to read history")?;
                    println!("{}", serde_json::to_string_pretty(&records)?);
                }
                HistoryCommand::Clear => {
                    if store.clear().await.context("failed to clear history")? {
                        println!("All sessions cleared from {}.", config.history.path.display());
                    } else {
                        println!("No history file found to clear.");
                    }
                }
            }
        }
        Command::Ask { prompt } => {
            let state = AppState::from_config(&config).context("failed to build client state")?;
            let answer = state.answer_question(&prompt).await;
            state
                .log_qa(&prompt, &answer)
                .await
                .context("failed to log session")?;
            println!("{answer}");
        }
        Command::Quiz { topic } => {
            let state = AppState::from_config(&config).context("failed to build client state")?;
            let outcome = state.generate_quiz(&topic).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Voice { action } => match action {
            VoiceCommand::Transcribe { path } => {
                println!("{}", transcribe(&path)?);
            }
            VoiceCommand::Speak {
                text,
                engine,
                output,
            } => {
                if text.trim().is_empty() {
                    bail!("nothing to speak");
                }
                if let Some(path) = synthesize(&text, engine, output.as_deref())? {
                    println!("Simulated audio saved to {}", path.display());
                }
            }
        },
    }
    Ok(())
}
