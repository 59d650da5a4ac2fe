use pokedex_lookup::{
    AppState, Config, CycleOutcome, HttpFetcher, LogFormat, Orchestrator, Screen, ScreenSettings,
    TerminalSink, random_query, serve,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

enum Mode {
    Interactive,
    Once(String),
    Serve,
}

fn parse_mode() -> Mode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None => Mode::Interactive,
        Some("serve") => Mode::Serve,
        Some(_) => Mode::Once(args.join(" ")),
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("{}=info,axum::rejection=trace", env!("CARGO_CRATE_NAME")).into()
    });

    // Logs go to stderr so stdout stays free for the rendered screen.
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[tokio::main]
async fn main() {
    let config = Config::load();
    init_tracing(
        config
            .as_ref()
            .map(|c| c.logging.format)
            .unwrap_or_default(),
    );

    // Loading runs before the subscriber exists, so its outcome is reported here.
    let config = match config {
        Ok(config) => {
            tracing::info!("Loaded configuration from {}", config.source);
            Arc::new(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    let fetcher = Arc::new(HttpFetcher::new());
    let settings = ScreenSettings::from(config.as_ref());

    match parse_mode() {
        Mode::Serve => {
            let bind = config.server.bind.clone();
            let state = Arc::new(AppState {
                orchestrator: Orchestrator::new(fetcher, config, Screen::new(settings)),
            });
            if let Err(e) = serve(state, &bind).await {
                tracing::error!("Server error: {}", e);
                std::process::exit(1);
            }
        }
        Mode::Once(query) => {
            let sink = TerminalSink::new(settings, std::io::stdout());
            let orchestrator = Orchestrator::new(fetcher, config, sink);
            if !matches!(orchestrator.submit(&query).await, CycleOutcome::Rendered(_)) {
                std::process::exit(1);
            }
        }
        Mode::Interactive => {
            let sink = TerminalSink::new(settings, std::io::stdout());
            let orchestrator = Orchestrator::new(fetcher, config, sink);
            run_interactive(&orchestrator).await;
        }
    }
}

async fn run_interactive(orchestrator: &Orchestrator<TerminalSink<std::io::Stdout>>) {
    eprintln!("Enter a Pokémon name or ID (\"random\" for a surprise, \"quit\" to exit).");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        };

        match line.trim() {
            "quit" | "exit" => break,
            "random" => {
                orchestrator.submit(&random_query()).await;
            }
            _ => {
                orchestrator.submit(&line).await;
            }
        }
    }
}
