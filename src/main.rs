use clap::{Parser, Subcommand};
use std::io::Write;
use std::sync::Arc;
use tokio::sync::RwLock;

use simple_timer::app_state::AppState;
use simple_timer::commands::{self, SharedState};
use simple_timer::logging;
use simple_timer::registry::{Command, Query};
use simple_timer::repl::readline;

#[tokio::main]
async fn main() -> Result<(), String> {
    let app = AppState::new();
    logging::init(app.config.debug_logging);
    let state: SharedState = Arc::new(RwLock::new(app));

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, Arc::clone(&state)).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                tracing::warn!(command = line, error = %err, "command rejected");
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    state.write().await.registry.clear();
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "interval timers")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Attach a timer to an element
    Init {
        element: String,
        /// Tick length in milliseconds
        #[arg(short, long)]
        increment: Option<u64>,
        /// Total run time in milliseconds
        #[arg(short, long)]
        duration: Option<u64>,
        #[arg(short, long)]
        autostart: bool,
    },
    Start {
        element: String,
    },
    Stop {
        element: String,
    },
    Reset {
        element: String,
    },
    Destroy {
        element: String,
    },
    /// Change a live timer's settings without touching its progress
    Update {
        element: String,
        #[arg(short, long)]
        increment: Option<u64>,
        #[arg(short, long)]
        duration: Option<u64>,
        #[arg(short, long)]
        autostart: Option<bool>,
    },
    /// Call an operation or getter by name, e.g. `call clock getPercent`
    Call {
        element: String,
        method: String,
        arg: Option<String>,
    },
    Settings {
        element: String,
    },
    Setting {
        element: String,
        name: String,
    },
    Percent {
        element: String,
    },
    Timing {
        element: String,
    },
    Defaults {
        element: String,
    },
    /// Persist defaults for timers created from now on
    SetDefaults {
        #[arg(short, long)]
        increment: Option<u64>,
        #[arg(short, long)]
        duration: Option<u64>,
        #[arg(short, long)]
        autostart: Option<bool>,
    },
    List,
    Config,
    Exit,
}

async fn respond(line: &str, state: SharedState) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "simple-timer".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Init {
            element,
            increment,
            duration,
            autostart,
        }) => commands::init(state, &element, increment, duration, autostart).await?,
        Some(Commands::Start { element }) => commands::run(state, &element, Command::Start).await?,
        Some(Commands::Stop { element }) => commands::run(state, &element, Command::Stop).await?,
        Some(Commands::Reset { element }) => commands::run(state, &element, Command::Reset).await?,
        Some(Commands::Destroy { element }) => {
            commands::run(state, &element, Command::Destroy).await?
        }
        Some(Commands::Update {
            element,
            increment,
            duration,
            autostart,
        }) => commands::update(state, &element, increment, duration, autostart).await?,
        Some(Commands::Call {
            element,
            method,
            arg,
        }) => match method.parse::<Command>() {
            Ok(command) => commands::run(state, &element, command).await?,
            Err(_) => {
                let query = Query::parse(&method, arg.as_deref()).map_err(|e| e.to_string())?;
                commands::query(state, &element, query).await?
            }
        },
        Some(Commands::Settings { element }) => {
            commands::query(state, &element, Query::Settings).await?
        }
        Some(Commands::Setting { element, name }) => {
            commands::query(state, &element, Query::Setting(name)).await?
        }
        Some(Commands::Percent { element }) => {
            commands::query(state, &element, Query::Percent).await?
        }
        Some(Commands::Timing { element }) => {
            commands::query(state, &element, Query::Timing).await?
        }
        Some(Commands::Defaults { element }) => {
            commands::query(state, &element, Query::DefaultSettings).await?
        }
        Some(Commands::SetDefaults {
            increment,
            duration,
            autostart,
        }) => commands::set_defaults(state, increment, duration, autostart).await?,
        Some(Commands::List) => commands::list(state).await,
        Some(Commands::Config) => commands::show_config(state).await,
        Some(Commands::Exit) => {
            commands::exit()?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
