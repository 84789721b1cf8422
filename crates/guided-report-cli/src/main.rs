mod form;
mod markdown;
mod tui;

use std::io::{self, Read};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use guided_report_sdk::{AnalysisClient, ClientConfig, ConcernScreen};

use crate::form::FormApp;
use crate::tui::{Action, EventHandler};

#[derive(Parser, Debug)]
#[command(name = "guided-report")]
#[command(about = "Turn workplace concerns into business cases")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Analysis service root (overrides GUIDED_REPORT_API_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Give up on a request after this many seconds (default: wait indefinitely)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit one concern and print the analysis as markdown
    Analyze {
        /// Concern text; read from stdin when omitted
        text: Option<String>,
    },
    /// Check that the analysis service is up
    Health,
    /// Open the interactive concern form
    Form,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(matches!(cli.command, Commands::Form));

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    let client = AnalysisClient::new(config).context("invalid client configuration")?;

    match cli.command {
        Commands::Analyze { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read concern from stdin")?;
                    buf
                }
            };
            Ok(analyze(client, text).await)
        }
        Commands::Health => match client.health().await {
            Ok(status) if status.is_ok() => {
                println!("{}", status.status);
                Ok(ExitCode::SUCCESS)
            }
            Ok(status) => {
                eprintln!("service unhealthy: {}", status.status);
                Ok(ExitCode::FAILURE)
            }
            Err(e) => {
                eprintln!("{}: {e}", client.config().base_url);
                Ok(ExitCode::FAILURE)
            }
        },
        Commands::Form => {
            run_form(FormApp::new(ConcernScreen::new(client))).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Logging goes to stderr. The form only logs when `RUST_LOG` asks for it,
/// so the alternate screen is not overwritten.
fn init_logging(interactive: bool) {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if interactive => return,
        Err(_) => tracing_subscriber::EnvFilter::new("warn"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn analyze(client: AnalysisClient, text: String) -> ExitCode {
    let screen = ConcernScreen::new(client);
    screen.edit(text);
    let _ = screen.submit().await;

    let phase = screen.phase();
    if let Some(analysis) = phase.analysis() {
        println!("{analysis}");
        return ExitCode::SUCCESS;
    }
    if let Some(message) = phase.error_message() {
        eprintln!("{message}");
    }
    ExitCode::FAILURE
}

async fn run_form(mut app: FormApp) -> anyhow::Result<()> {
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(120);

    // Redraw on every state transition
    let mut updates = app.screen().subscribe();
    let tx = events.sender();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            if tx.send(Action::StateChanged).is_err() {
                break;
            }
        }
    });

    let result = loop {
        if let Err(e) = terminal.draw(|f| app.render(f)) {
            break Err(e.into());
        }
        match events.next().await {
            Some(Action::Key(key)) => app.on_key(key),
            Some(Action::Tick) => app.tick(),
            Some(Action::Resize | Action::StateChanged) => {}
            None => break Ok(()),
        }
        if app.should_quit() {
            break Ok(());
        }
    };

    app.screen().close();
    tui::restore()?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_text_is_optional() {
        let cli = Cli::try_parse_from(["guided-report", "analyze"]).unwrap();
        assert!(matches!(cli.command, Commands::Analyze { text: None }));

        let cli = Cli::try_parse_from(["guided-report", "analyze", "lift is broken"]).unwrap();
        match cli.command {
            Commands::Analyze { text } => assert_eq!(text.as_deref(), Some("lift is broken")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "guided-report",
            "health",
            "--base-url",
            "http://10.0.0.2:8080",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Health));
        assert_eq!(cli.base_url.as_deref(), Some("http://10.0.0.2:8080"));
        assert_eq!(cli.timeout_secs, Some(5));
    }

    #[test]
    fn stdin_flag_is_not_accepted() {
        assert!(Cli::try_parse_from(["guided-report", "analyze", "--stdin"]).is_err());
    }
}
