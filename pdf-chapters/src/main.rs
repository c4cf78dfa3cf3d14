//! pdf-chapters - Split PDF documents into chapters and read text aloud

mod audio;
mod chapters;
mod config;
#[cfg(test)]
mod fixtures;
mod response;
mod server;
mod source;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::ServerConfig;
use response::ChapterFormat;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "pdf-chapters")]
#[command(about = "Split PDF documents into chapters over HTTP, with a text-to-speech endpoint", long_about = None)]
#[command(version)]
struct Args {
    /// Configuration file (default: <config dir>/cli-programs/pdf-chapters.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding PDFs addressed by file ID
        #[arg(long)]
        uploads_dir: Option<PathBuf>,

        /// Directory where synthesized audio is written
        #[arg(long)]
        audio_dir: Option<PathBuf>,
    },
    /// Split a local PDF into chapters and print them as JSON
    Split {
        /// Path to the PDF file
        pdf: PathBuf,

        /// Output shape
        #[arg(long, value_enum, default_value_t = ChapterFormat::List)]
        format: ChapterFormat,
    },
    /// Synthesize text to an MP3 file
    Speak {
        /// Text to read
        text: String,

        /// Output file path
        #[arg(short, long, default_value = "speech.mp3")]
        output: PathBuf,

        /// Reading speed; below 1.0 reads slowly
        #[arg(long, default_value = "1.0")]
        speed: f32,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the default configuration file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let mut config =
        ServerConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    match args.command {
        Commands::Serve {
            host,
            port,
            uploads_dir,
            audio_dir,
        } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(dir) = uploads_dir {
                config.uploads_dir = dir;
            }
            if let Some(dir) = audio_dir {
                config.audio_dir = dir;
            }
            let state = server::AppState::new(config)?;
            server::serve(state).await
        }
        Commands::Split { pdf, format } => split_command(&config, &pdf, format).await,
        Commands::Speak {
            text,
            output,
            speed,
        } => speak_command(&config, text, &output, speed).await,
        Commands::Config { action } => handle_config_command(&action, &config, args.config),
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

async fn split_command(config: &ServerConfig, pdf: &Path, format: ChapterFormat) -> Result<()> {
    if !pdf.exists() {
        anyhow::bail!("PDF file not found: {}", pdf.display());
    }

    let bytes = tokio::fs::read(pdf)
        .await
        .with_context(|| format!("Failed to read {}", pdf.display()))?;
    let text = source::extract_text_blocking(bytes)
        .await
        .with_context(|| format!("Failed to extract text from {}", pdf.display()))?;

    log::debug!("Extracted {} characters", text.chars().count());

    match response::render(&text, format, config.preview_chars) {
        Ok(chapters) => {
            println!("{}", serde_json::to_string_pretty(&chapters)?);
            Ok(())
        }
        Err(no_chapters) => anyhow::bail!(
            "No chapters found in {}. Text starts with:\n{}",
            pdf.display(),
            no_chapters.preview
        ),
    }
}

async fn speak_command(config: &ServerConfig, text: String, output: &Path, speed: f32) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("Text must not be empty");
    }
    if !speed.is_finite() || speed <= 0.0 {
        anyhow::bail!("Speed must be a positive number, got {}", speed);
    }

    let provider =
        speech_client::get_provider(&config.speech).context("Failed to create speech provider")?;
    provider
        .is_available()
        .with_context(|| format!("Speech provider {} is not usable", provider.name()))?;
    let request = speech_client::SpeechRequest::new(text, config.speech.lang.clone())
        .slow(speed < 1.0);

    let audio = provider
        .synthesize(request)
        .await
        .with_context(|| format!("{} synthesis failed", provider.name()))?;

    std::fs::write(output, &audio.bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let size_kb = audio.bytes.len() as f64 / 1024.0;
    println!("Output: {} ({:.1} KB)", output.display(), size_kb);
    Ok(())
}

fn handle_config_command(
    action: &ConfigAction,
    config: &ServerConfig,
    config_path: Option<PathBuf>,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let path = config_path.unwrap_or_else(ServerConfig::config_path);
            println!("Configuration file: {}", path.display());
            if !path.exists() {
                println!("(file not found, showing defaults)");
            }
            println!();
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Path => {
            println!("{}", ServerConfig::config_path().display());
        }
    }
    Ok(())
}
