//! RugCheck - token rug-pull risk check from the terminal
//!
//! Validates the address, asks the analysis service for a report and
//! renders it: animated score gauge, risk factors and detail panels.

use clap::Parser;
use colored::*;
use eyre::Result;
use std::io::{IsTerminal, Write};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, sleep, Instant, MissedTickBehavior};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rugcheck::core::view::ViewBody;
use rugcheck::display::{render_gauge, render_input_error, render_loading, render_view};
use rugcheck::{AnalysisClient, Chain, ClientConfig, LifecycleState, Presenter, ViewOptions};

#[derive(Parser)]
#[command(name = "rugcheck")]
#[command(version)]
#[command(about = "Check an EVM token for rug-pull risk", long_about = None)]
struct Cli {
    /// Token contract address (0x + 40 hex characters)
    address: String,

    /// Chain the token lives on (ethereum, base, arbitrum, polygon, bsc)
    #[arg(short, long, default_value = "ethereum")]
    chain: Chain,

    /// Analysis service base URL
    #[arg(long, env = "RUGCHECK_API_URL")]
    api_url: Option<String>,

    /// Print the raw analysis document as JSON
    #[arg(long)]
    json: bool,

    /// Open every detail panel
    #[arg(long)]
    expand: bool,

    /// Show every risk factor
    #[arg(long)]
    all_reasons: bool,

    /// Show the final score without animating the gauge
    #[arg(long)]
    no_animate: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::default();
    if let Some(url) = &cli.api_url {
        config = config.with_api_base_url(url);
    }
    let client = AnalysisClient::new(&config)?;
    info!("🚀 rugcheck → {}", client.endpoint());

    let options = ViewOptions {
        expand_all: cli.expand,
        show_all_reasons: cli.all_reasons,
    };
    let mut presenter = Presenter::new(&config, options);
    let interactive = std::io::stdout().is_terminal() && !cli.json;

    loop {
        fetch(&mut presenter, &client, &config, &cli, interactive).await?;

        match presenter.state() {
            LifecycleState::Success(result) => {
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(result)?);
                    return Ok(ExitCode::SUCCESS);
                }
                break;
            }
            LifecycleState::Error(_) => {
                println!("{}", render_view(&presenter.view(Instant::now())));
                if interactive && std::io::stdin().is_terminal() && ask_retry().await? {
                    presenter.reset();
                    continue;
                }
                return Ok(ExitCode::FAILURE);
            }
            LifecycleState::Idle => {
                // rejected before any request
                if let Some(err) = presenter.input_error() {
                    eprintln!("{}", render_input_error(err.message()));
                }
                return Ok(ExitCode::from(2));
            }
            LifecycleState::Loading => return Ok(ExitCode::FAILURE),
        }
    }

    if interactive && !cli.no_animate {
        animate_gauge(&mut presenter, &config).await?;
    } else {
        presenter.finish_animation();
    }

    println!("{}", render_view(&presenter.view(Instant::now())));
    Ok(ExitCode::SUCCESS)
}

/// Submit and wait for the response, rotating the loading line meanwhile
async fn fetch(
    presenter: &mut Presenter,
    client: &AnalysisClient,
    config: &ClientConfig,
    cli: &Cli,
    interactive: bool,
) -> Result<()> {
    let Ok(ticket) = presenter.submit(cli.chain, &cli.address, Instant::now()) else {
        return Ok(());
    };

    let request = client.analyze(ticket.request());
    tokio::pin!(request);

    let mut ticker = interval(config.loading_message_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let outcome = loop {
        tokio::select! {
            outcome = &mut request => break outcome,
            _ = ticker.tick(), if interactive => {
                if let ViewBody::Loading(loading) = presenter.view(Instant::now()).body {
                    print!("\r\x1b[2K{}", render_loading(&loading));
                    std::io::stdout().flush()?;
                }
            }
        }
    };

    if interactive {
        print!("\r\x1b[2K");
        std::io::stdout().flush()?;
    }
    presenter.complete(&ticket, outcome, Instant::now());
    Ok(())
}

/// Redraw the gauge line in place until the animation settles
async fn animate_gauge(presenter: &mut Presenter, config: &ClientConfig) -> Result<()> {
    let mut stdout = std::io::stdout();
    while let Some(frame) = presenter.tick(Instant::now()) {
        if let ViewBody::Report(report) = presenter.view(Instant::now()).body {
            write!(stdout, "\r\x1b[2K{}", render_gauge(&report.gauge))?;
            stdout.flush()?;
        }
        if frame.done {
            break;
        }
        sleep(config.frame_interval).await;
    }
    write!(stdout, "\r\x1b[2K")?;
    stdout.flush()?;
    Ok(())
}

/// "Try Again" prompt; Enter retries, anything else quits
async fn ask_retry() -> Result<bool> {
    print!("  {} ", "Press Enter to try again, q to quit:".bright_black());
    std::io::stdout().flush()?;

    let mut line = String::new();
    let read = BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(read > 0 && line.trim().is_empty())
}
