//! Terminal front end for a game session (for local play/demo).
//!
//! Reads one command per line from stdin, forwards it to the session and
//! prints the board whenever the round visibly changes.

use actix::prelude::*;
use log::{debug, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::game::display::GameSnapshot;
use crate::game::error::parse_point_count;
use crate::game::types::GameStatus;
use crate::session::messages::{ClientAction, GameStateUpdate, GetSnapshot, ProcessClientMessage};
use crate::session::server::GameSession;

const BOARD_ROWS: usize = 12;
const BOARD_COLS: usize = 40;

const HELP: &str = "\
Commands:
  points <n>   set the point count
  play         start (or restart) with the stored count
  start <n>    start (or restart) with n points
  <n>          click point number n (as shown on the board)
  auto         toggle auto-play
  show         print the board
  json         print the current state as JSON
  help         print this help
  quit         leave
Raw JSON actions are accepted too, e.g. {\"action\":\"Click\",\"data\":0}";

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Action(ClientAction),
    Show,
    Json,
    Help,
    Quit,
}

/// Parse a line typed by the player.
pub fn parse_command(line: &str) -> Result<ConsoleCommand, String> {
    let line = line.trim();
    if line.starts_with('{') {
        return serde_json::from_str::<ClientAction>(line)
            .map(ConsoleCommand::Action)
            .map_err(|e| format!("Invalid JSON action: {e}"));
    }

    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or("").to_lowercase();
    let argument = words.next();

    match (command.as_str(), argument) {
        ("points", Some(raw)) => Ok(ConsoleCommand::Action(ClientAction::SetPointCount(raw.to_string()))),
        ("points", None) => Ok(ConsoleCommand::Action(ClientAction::SetPointCount(String::new()))),
        ("play" | "restart", _) => Ok(ConsoleCommand::Action(ClientAction::Play)),
        ("start", Some(raw)) => parse_point_count(raw)
            .map(|n| ConsoleCommand::Action(ClientAction::Start(i64::from(n))))
            .map_err(|e| e.to_string()),
        ("auto", _) => Ok(ConsoleCommand::Action(ClientAction::ToggleAutoPlay)),
        ("show", _) => Ok(ConsoleCommand::Show),
        ("json", _) => Ok(ConsoleCommand::Json),
        ("help" | "?", _) => Ok(ConsoleCommand::Help),
        ("quit" | "exit", _) => Ok(ConsoleCommand::Quit),
        (label, None) => match label.parse::<u32>() {
            // Labels are 1-based, ids 0-based.
            Ok(n) if n >= 1 => Ok(ConsoleCommand::Action(ClientAction::Click(n - 1))),
            _ => Err(format!("Unknown command '{line}', type 'help'")),
        },
        _ => Err(format!("Unknown command '{line}', type 'help'")),
    }
}

/// Draw the board as text: clicked points in brackets, the rest bare.
pub fn render_board(snapshot: &GameSnapshot) -> String {
    let mut cells = vec![vec![' '; BOARD_COLS]; BOARD_ROWS];

    for point in &snapshot.points {
        let row = ((point.top / 100.0) * BOARD_ROWS as f64) as usize;
        let col = ((point.left / 100.0) * BOARD_COLS as f64) as usize;
        let row = row.min(BOARD_ROWS - 1);
        let text = if point.clicked {
            format!("[{}]", point.label)
        } else {
            point.label.to_string()
        };
        let start = col.min(BOARD_COLS.saturating_sub(text.len()));
        for (offset, ch) in text.chars().enumerate() {
            cells[row][start + offset] = ch;
        }
    }

    let border = format!("+{}+", "-".repeat(BOARD_COLS));
    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    for row in cells {
        out.push('|');
        out.extend(row);
        out.push_str("|\n");
    }
    out.push_str(&border);
    out
}

/// Header lines printed above the board.
pub fn render_header(snapshot: &GameSnapshot) -> String {
    let title = if snapshot.title.highlighted {
        format!("*** {} ***", snapshot.title.text)
    } else {
        snapshot.title.text.to_string()
    };
    let points = snapshot
        .state
        .point_count
        .map(|n| n.to_string())
        .unwrap_or_default();
    let auto = if snapshot.state.auto_play_enabled { "on" } else { "off" };
    format!(
        "{title}\nPoints: {points}\nTime:   {}\n[{}]  auto-play: {auto}  next: {}",
        snapshot.time_text,
        snapshot.button_label,
        snapshot.state.next_expected_id + 1,
    )
}

/// Prints snapshots, skipping updates that only move timers along.
pub struct ConsoleView {
    last_key: Option<(GameStatus, u32, usize, bool, Option<i64>)>,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self { last_key: None }
    }
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor for ConsoleView {
    type Context = Context<Self>;
}

impl Handler<GameStateUpdate> for ConsoleView {
    type Result = ();

    fn handle(&mut self, msg: GameStateUpdate, _: &mut Context<Self>) {
        let state = &msg.snapshot.state;
        let key = (
            state.status,
            state.next_expected_id,
            state.points.len(),
            state.auto_play_enabled,
            state.point_count,
        );
        if self.last_key == Some(key) {
            return;
        }
        self.last_key = Some(key);
        println!("{}\n{}", render_header(&msg.snapshot), render_board(&msg.snapshot));
    }
}

/// Read commands from stdin until `quit` or end of input.
pub async fn run(session: Addr<GameSession>) -> std::io::Result<()> {
    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        debug!("[Console] {:?}", command);

        match command {
            ConsoleCommand::Action(action) => {
                let result = session
                    .send(ProcessClientMessage { msg: action })
                    .await
                    .map_err(std::io::Error::other)?;
                if let Err(e) = result {
                    warn!("[Console] {}", e);
                    println!("{e}");
                }
            }
            ConsoleCommand::Show => {
                let snapshot = session.send(GetSnapshot).await.map_err(std::io::Error::other)?;
                println!("{}\n{}", render_header(&snapshot), render_board(&snapshot));
            }
            ConsoleCommand::Json => {
                let snapshot = session.send(GetSnapshot).await.map_err(std::io::Error::other)?;
                match serde_json::to_string_pretty(&snapshot) {
                    Ok(text) => println!("{text}"),
                    Err(e) => println!("Failed to serialize game state: {e}"),
                }
            }
            ConsoleCommand::Help => println!("{HELP}"),
            ConsoleCommand::Quit => break,
        }
    }
    Ok(())
}
