use clap::{ArgAction, Parser, Subcommand};
use dialoguer::Input;
use show_finder::{
    ClientConfig, Command, DEFAULT_BASE_URL, EpisodeTarget, PROMPT_HELP, PromptInput,
    ShowFinderError, ShowId, TerminalView, TvMazeClient, dispatch, parse_command,
};
use std::io;
use std::process;
use std::time::Duration;
use tracing::Level;

/// Search TVMaze for tv shows and list their episodes
#[derive(Debug, Parser)]
#[command(name = "show-finder", version, about)]
struct Cli {
    /// Base URL of the TVMaze API
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL, value_name = "URL")]
    base_url: String,

    /// Request timeout
    #[arg(long, global = true, default_value_t = 30, value_name = "SECONDS")]
    timeout: u64,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Search shows by name and print them as cards
    Search {
        /// Search term, may be empty
        #[arg(num_args = 0..)]
        term: Vec<String>,
    },

    /// Print the episode list of a show
    Episodes {
        /// TVMaze show id, as printed on each card
        show_id: u64,
    },

    /// Search and browse episodes from a prompt
    Interactive,
}

/// Installs the stderr log subscriber for the requested verbosity
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Reads commands from the prompt until the user quits
///
/// Failed commands are reported and the loop continues; only a broken
/// prompt ends the session with an error.
fn run_interactive(client: &TvMazeClient) -> Result<(), ShowFinderError> {
    let mut view = TerminalView::new(io::stdout());

    println!("ShowFinder reporting: connected to {}", client.base_url());
    println!("{}\n", PROMPT_HELP);

    loop {
        let line: String = Input::new()
            .with_prompt("show-finder")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ShowFinderError::Prompt(e.to_string()))?;

        match parse_command(&line) {
            Ok(PromptInput::Run(command)) => {
                if let Err(e) = dispatch(client, &mut view, &command) {
                    eprintln!("Error: {}", e);
                }
            }
            Ok(PromptInput::Help) => println!("{}\n", PROMPT_HELP),
            Ok(PromptInput::Quit) => return Ok(()),
            Ok(PromptInput::Nothing) => {}
            Err(e) => eprintln!("Error: {}", ShowFinderError::from(e)),
        }
    }
}

fn run(cli: Cli) -> Result<(), ShowFinderError> {
    let client = TvMazeClient::with_config(ClientConfig {
        base_url: cli.base_url,
        timeout: Duration::from_secs(cli.timeout),
    })?;

    let command = match cli.mode {
        Mode::Search { term } => Command::SubmitQuery(term.join(" ")),
        Mode::Episodes { show_id } => {
            Command::RequestEpisodes(EpisodeTarget::Show(ShowId(show_id)))
        }
        Mode::Interactive => return run_interactive(&client),
    };

    let mut view = TerminalView::new(io::stdout());
    dispatch(&client, &mut view, &command)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("\nError: {}", e);
        process::exit(1);
    }
}
