use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use pokedex::api::HttpClient;
use pokedex::app::App;
use pokedex::config::{Config, LOG_FILTER_VAR};
use pokedex::prompt::{PromptError, TerminalPrompter};
use pokedex::sprite::SpriteMode;

/// Exit status for Ctrl-C, matching what a shell reports for SIGINT.
const INTERRUPTED_EXIT: u8 = 130;

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(version, about = "Browse the PokeAPI from an interactive menu")]
#[command(long_about = "Browse the PokeAPI from an interactive menu.\n\n\
    Set API_URL to point at another PokeAPI-compatible server and \
    POKEDEX_LOG (e.g. `debug`) to log requests to stderr.")]
struct Args {}

#[tokio::main]
async fn main() -> ExitCode {
    let _args = Args::parse();
    init_tracing();

    let config = Config::from_env();
    tracing::debug!(api_url = %config.api_url, "starting");
    let client = match HttpClient::new(config.api_url) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("failed to create HTTP client: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut prompter = TerminalPrompter::new();
    let mut stdout = io::stdout();
    let mut app = App::new(&client, &mut prompter, &mut stdout, SpriteMode::detect());

    match app.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(PromptError::Interrupted) => ExitCode::from(INTERRUPTED_EXIT),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = match EnvFilter::try_from_env(LOG_FILTER_VAR) {
        Ok(mut filter) => {
            for directive in ["reqwest=warn", "hyper=warn", "hyper_util=warn"] {
                if let Ok(directive) = directive.parse::<Directive>() {
                    filter = filter.add_directive(directive);
                }
            }
            filter
        }
        Err(_) => EnvFilter::new("off"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
