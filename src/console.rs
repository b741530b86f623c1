//! Line-oriented operator console over the wall worker.

use mediawall_core::{CommandOutcome, WallHandle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// One console line, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConsoleCommand {
    Show(String),
    List,
    Teardown,
    Help,
    Quit,
}

impl ConsoleCommand {
    pub(crate) fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = words.collect();

        let command = match (verb.to_lowercase().as_str(), rest.as_slice()) {
            ("show", [name]) => ConsoleCommand::Show(name.to_string()),
            ("show", []) => return Err("usage: show <preset>".to_string()),
            ("list" | "presets", []) => ConsoleCommand::List,
            ("teardown" | "close", []) => ConsoleCommand::Teardown,
            ("help" | "?", _) => ConsoleCommand::Help,
            ("quit" | "exit", []) => ConsoleCommand::Quit,
            _ => return Err(format!("unknown command: {}", line.trim())),
        };
        Ok(Some(command))
    }
}

const HELP: &str = "commands: show <preset> | list | teardown | quit";

fn print_outcome(outcome: &CommandOutcome) {
    let mark = if outcome.success { "ok" } else { "failed" };
    println!("{}: {}", mark, outcome.message);
}

/// Read commands from stdin until `quit`, EOF or Ctrl-C.
pub(crate) async fn run(handle: WallHandle) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", HELP);

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                None
            }
        };
        let Some(line) = line else { break };

        let command = match ConsoleCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            ConsoleCommand::Show(name) => print_outcome(&handle.show(&name).await?),
            ConsoleCommand::List => println!("{}", handle.list_presets().await?.join(", ")),
            ConsoleCommand::Teardown => print_outcome(&handle.teardown().await?),
            ConsoleCommand::Help => println!("{}", HELP),
            ConsoleCommand::Quit => break,
        }
    }

    match handle.shutdown().await {
        Ok(outcome) => info!("{}", outcome.message),
        Err(e) => warn!("Shutdown: {}", e),
    }
    Ok(())
}
