use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use dialoguer::Input;
use event_tracker_core::{EventId, FilterMode, Intent, Outcome, Tracker, TrackerError, ics};
use owo_colors::OwoColorize;

use crate::commands::{edit, new};
use crate::config::TrackerConfig;
use crate::render::Render;

/// One line typed at the shell prompt.
#[derive(Parser, Debug)]
#[command(name = "event-tracker", no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
enum ShellCommand {
    /// Create an event
    New,
    /// Edit an event's title and location
    Edit { id: u64 },
    /// Delete an event
    Delete { id: u64 },
    /// Show only matching events (all, past, upcoming, today, month)
    Filter { mode: String },
    /// Show the current view
    List,
    /// Write the visible events as .ics (to stdout without a path)
    Export { path: Option<PathBuf> },
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

struct Shell {
    tracker: Tracker,
    default_duration: Duration,
    color: bool,
}

pub fn run(config: &TrackerConfig) -> Result<()> {
    let mut shell = Shell {
        tracker: Tracker::new(config.default_filter),
        default_duration: config.event_duration()?,
        color: config.color,
    };

    println!("Event tracker. Type `help` for commands.\n");
    shell.print_view();

    loop {
        let line: String = Input::new()
            .with_prompt("event-tracker")
            .allow_empty(true)
            .interact_text()?;

        let command = match parse_line(&line) {
            Some(Ok(command)) => command,
            Some(Err(err)) => {
                // Also covers `help`, which clap reports as an "error"
                if err.print().is_err() {
                    eprintln!("{err}");
                }
                continue;
            }
            None => continue,
        };

        match shell.execute(command) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }

    Ok(())
}

fn parse_line(line: &str) -> Option<Result<ShellCommand, clap::Error>> {
    if line.trim().is_empty() {
        return None;
    }
    Some(ShellLine::try_parse_from(line.split_whitespace()).map(|l| l.command))
}

impl Shell {
    fn execute(&mut self, command: ShellCommand) -> Result<Flow> {
        match command {
            ShellCommand::New => {
                let intent = new::prompt(self.default_duration)?;
                self.apply(intent)?;
            }
            ShellCommand::Edit { id } => {
                let id = EventId(id);
                let event = self
                    .tracker
                    .store()
                    .get(id)
                    .cloned()
                    .ok_or(TrackerError::NotFound(id))?;
                let intent = edit::prompt(&event)?;
                self.apply(intent)?;
            }
            ShellCommand::Delete { id } => {
                self.apply(Intent::DeleteEvent { id: EventId(id) })?;
            }
            ShellCommand::Filter { mode } => {
                let mode: FilterMode = mode.parse()?;
                self.apply(Intent::SetFilter { mode })?;
            }
            ShellCommand::List => self.print_view(),
            ShellCommand::Export { path } => self.export(path)?,
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn apply(&mut self, intent: Intent) -> Result<()> {
        let outcome = self.tracker.apply(intent)?;

        let message = match &outcome {
            Outcome::Created { event } => format!("  Created: {}", event),
            Outcome::Updated { event } => format!("  Updated: {}", event),
            Outcome::Deleted { event } => format!("  Deleted: {}", event),
            Outcome::FilterChanged { mode } => format!("  Filter: {}", mode),
        };
        if self.color {
            println!("{}", message.green());
        } else {
            println!("{}", message);
        }

        self.print_view();
        Ok(())
    }

    fn print_view(&self) {
        let view = self.tracker.view(&Local::now());
        println!("{}\n", view.render(self.color));
    }

    fn export(&self, path: Option<PathBuf>) -> Result<()> {
        let view = self.tracker.view(&Local::now());
        let content = ics::to_ics(view.events.iter().map(|v| &v.event));

        match path {
            Some(path) => {
                std::fs::write(&path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("  Exported {} events to {}", view.events.len(), path.display());
            }
            None => print!("{}", content),
        }
        Ok(())
    }
}
