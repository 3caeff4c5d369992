//! Board commands and the side effects they request.
//!
//! Commands are plain data so the line-oriented front end (and tests) can
//! drive a [`Board`](crate::board::Board) without a UI.

use anyhow::{Result, anyhow, bail};

/// Follow-up work a command asks its caller to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Write the position map and order store to durable storage.
    Persist,
    /// Rebuild the board view from the lane layout.
    Render,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Look a callsign up in the feed and add its strip.
    AddOceanic { callsign: String },
    /// Add a free-text strip.
    AddCustom { text: String },
    DeleteFlight { callsign: String },
    /// Move a strip to position `index` of `lane`.
    Reorder {
        callsign: String,
        lane: String,
        index: usize,
    },
    /// Move a strip to the end of `lane`.
    ReassignLane { callsign: String, lane: String },
    /// Type into a fix column of an oceanic strip.
    EditFix {
        callsign: String,
        column: usize,
        value: String,
    },
    /// Type into the cruise level box of an oceanic strip.
    EditLevel { callsign: String, value: String },
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  add <CALLSIGN>                  add an oceanic strip from the feed
  note <TEXT>                     add a free-text strip
  del <CALLSIGN>                  delete a strip
  move <CALLSIGN> <LANE> [INDEX]  move a strip (default: end of lane)
  lane <CALLSIGN> <LANE>          move a strip to the end of a lane
  fix <CALLSIGN> <COLUMN> <VALUE> fill a fix column (0-based)
  level <CALLSIGN> <VALUE>        fill the cruise level box
  show                            print the board as JSON
  help                            this text
  quit                            leave";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Input>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map(|(v, r)| (v, r.trim()))
        .unwrap_or((line, ""));
    let args: Vec<&str> = rest.split_whitespace().collect();
    let input = match verb.to_lowercase().as_str() {
        "add" => Input::Command(Command::AddOceanic {
            callsign: single_arg(&args, "add <CALLSIGN>")?.to_string(),
        }),
        "note" => Input::Command(Command::AddCustom {
            text: rest.to_string(),
        }),
        "del" | "delete" => Input::Command(Command::DeleteFlight {
            callsign: single_arg(&args, "del <CALLSIGN>")?.to_uppercase(),
        }),
        "move" => {
            let (callsign, lane, index) = match args.as_slice() {
                [cs, lane] => (cs, lane, usize::MAX),
                [cs, lane, idx] => (
                    cs,
                    lane,
                    idx.parse::<usize>()
                        .map_err(|_| anyhow!("Invalid index: {}", idx))?,
                ),
                _ => bail!("Usage: move <CALLSIGN> <LANE> [INDEX]"),
            };
            Input::Command(Command::Reorder {
                callsign: callsign.to_uppercase(),
                lane: lane.to_lowercase(),
                index,
            })
        }
        "lane" => match args.as_slice() {
            [cs, lane] => Input::Command(Command::ReassignLane {
                callsign: cs.to_uppercase(),
                lane: lane.to_lowercase(),
            }),
            _ => bail!("Usage: lane <CALLSIGN> <LANE>"),
        },
        "fix" => match args.as_slice() {
            [cs, column, value] => Input::Command(Command::EditFix {
                callsign: cs.to_uppercase(),
                column: column
                    .parse::<usize>()
                    .map_err(|_| anyhow!("Invalid column: {}", column))?,
                value: value.to_uppercase(),
            }),
            _ => bail!("Usage: fix <CALLSIGN> <COLUMN> <VALUE>"),
        },
        "level" => match args.as_slice() {
            [cs, value] => Input::Command(Command::EditLevel {
                callsign: cs.to_uppercase(),
                value: value.to_uppercase(),
            }),
            _ => bail!("Usage: level <CALLSIGN> <VALUE>"),
        },
        "show" => Input::Show,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => bail!("Unknown command: {} (try `help`)", other),
    };
    Ok(Some(input))
}

fn single_arg<'a>(args: &[&'a str], usage: &str) -> Result<&'a str> {
    match args {
        [one] => Ok(*one),
        _ => bail!("Usage: {}", usage),
    }
}
