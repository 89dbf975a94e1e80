use clap::{Parser, Subcommand};
use courier_api::{BotClient, ParseMode, SendMessageOptions};
use courier_archive::Archiver;
use courier_core::chat_id::ChatId;
use courier_core::config::{self, shellexpand, Config};
use courier_core::logger::{FileLogger, LogSink, Logger};
use courier_webhook::LoggingHandler;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(
    name = "courier",
    version,
    about = "Bot API client, webhook receiver and log archiver"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, env = "COURIER_CONFIG", default_value = "config.toml")]
    config: String,

    /// Bot access token. Overrides `bot.access_token`.
    #[arg(long, env = "COURIER_BOT_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Receive webhook updates and log them. Also runs the log archiver.
    Serve,
    /// Run the log archiver on its own.
    Archive {
        /// Run a single pass and exit.
        #[arg(long)]
        once: bool,
    },
    /// Send a one-shot text message.
    Send {
        /// Numeric chat id or `@channel` alias.
        chat: String,
        /// Parse mode: html, markdownv2, markdown or plain.
        #[arg(long, default_value = "html")]
        parse_mode: String,
        /// The message to send.
        #[arg(trailing_var_arg = true, required = true)]
        text: Vec<String>,
    },
    /// Print the effective configuration without secrets.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load(&cli.config)?;
    if let Some(token) = cli.token {
        cfg.bot.access_token = token;
    }

    let log_dir = shellexpand(&cfg.log.dir);
    std::fs::create_dir_all(&log_dir)?;
    let (trace_writer, _trace_guard) = tracing_appender::non_blocking(
        tracing_appender::rolling::never(&log_dir, "courier.trace.log"),
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(trace_writer)
                .with_ansi(false),
        )
        .init();

    match cli.command {
        Commands::Serve => {
            let logger = Arc::new(FileLogger::from_config(&cfg.log));
            let archiver = Arc::new(build_archiver(&cfg, logger.as_ref()));
            let archive_task = tokio::spawn(archiver.run(cfg.archive.interval()));

            let handler = Arc::new(LoggingHandler::new(logger.clone()));
            courier_webhook::serve(&cfg.webhook, logger, handler, shutdown_signal()).await?;

            archive_task.abort();
            info!("courier stopped");
        }
        Commands::Archive { once } => {
            let logger = FileLogger::from_config(&cfg.log);
            let archiver = Arc::new(build_archiver(&cfg, &logger));
            if once {
                for path in archiver.pass() {
                    println!("{}", path.display());
                }
                return Ok(());
            }
            tokio::select! {
                _ = archiver.run(cfg.archive.interval()) => {}
                _ = shutdown_signal() => info!("archiver stopped"),
            }
        }
        Commands::Send {
            chat,
            parse_mode,
            text,
        } => {
            let logger = Arc::new(FileLogger::from_config(&cfg.log));
            let client = BotClient::new(&cfg.bot, logger)?;
            let options = SendMessageOptions {
                parse_mode: Some(parse_parse_mode(&parse_mode)?),
                ..Default::default()
            };
            let response = client
                .send_message(parse_chat(&chat), &text.join(" "), Some(&options))
                .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            if !response.ok {
                anyhow::bail!(
                    "rejected ({}): {}",
                    response.error_code,
                    response.description
                );
            }
        }
        Commands::Status => print_status(&cli.config, &cfg),
    }

    Ok(())
}

/// Archiver over the logger's own sinks plus any extra configured files.
fn build_archiver(cfg: &Config, logger: &FileLogger) -> Archiver {
    let mut sinks = logger.sinks();
    sinks.extend(
        cfg.archive
            .extra_files
            .iter()
            .map(|f| Arc::new(LogSink::new(shellexpand(f)))),
    );
    let archiver = Archiver::new(
        sinks,
        shellexpand(&cfg.archive.dir),
        cfg.archive.max_size_bytes,
    );
    if cfg.archive.log_file.is_empty() {
        archiver
    } else {
        archiver.with_journal(shellexpand(&cfg.archive.log_file))
    }
}

fn parse_chat(raw: &str) -> ChatId {
    match raw.parse::<i64>() {
        Ok(id) => ChatId::Numeric(id),
        Err(_) => ChatId::from(raw),
    }
}

fn parse_parse_mode(raw: &str) -> anyhow::Result<ParseMode> {
    Ok(match raw.to_ascii_lowercase().as_str() {
        "html" => ParseMode::Html,
        "markdownv2" => ParseMode::MarkdownV2,
        "markdown" => ParseMode::Markdown,
        "plain" | "" => ParseMode::Plain,
        other => anyhow::bail!("unknown parse mode: {other}"),
    })
}

fn print_status(path: &str, cfg: &Config) {
    println!("Courier status\n");
    println!("Config: {path}");
    println!("API access point: {}", cfg.bot.api_access_point);
    println!(
        "Access token: {}",
        if cfg.bot.access_token.is_empty() {
            "missing"
        } else {
            "configured"
        }
    );
    if !cfg.bot.channel_name.is_empty() {
        println!("Channel: {}", cfg.bot.channel_name);
    }
    println!();
    println!(
        "Webhook: {}:{}{} (secret {})",
        cfg.webhook.host,
        cfg.webhook.port,
        cfg.webhook.path,
        if cfg.webhook.secret_token.is_empty() {
            "off"
        } else {
            "on"
        }
    );
    println!(
        "Logs: {} / {} (mode {:?})",
        cfg.log.bot_log_file, cfg.log.error_log_file, cfg.log.mode
    );
    println!(
        "Archive: {} every {}s at {} bytes",
        cfg.archive.dir, cfg.archive.interval_secs, cfg.archive.max_size_bytes
    );
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
