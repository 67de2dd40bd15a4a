//! Console renderer for interactive games

use engine_core::grid;
use engine_core::{Board, PlayerDecision, Renderer, SlideDirection};
use std::io::{self, Write};
use tracing::warn;

const BANNER: &str = r"
 ____     ___    _  _      ___
|___ \   / _ \  | || |    ( _ )
  __) | | | | | | || |_   / _ \
 / __/  | |_| | |__   _| | (_) |
|_____|  \___/     |_|    \___/
";

const RULES: &str = "\
1. Game board: The game is played on a 4x4 grid by default.
2. Tiles: Each tile on the game board is either empty or holds a number.
3. Starting tiles: A new game starts with a few 2s and 4s placed at random.
4. Sliding tiles: Slide every tile up, left, down or right with W, A, S, D.
5. Merging tiles: Two equal tiles colliding during a slide merge into their sum.
6. Spawning tiles: Every slide that changes the board spawns a new 2 or 4.
7. How to win: Build a tile with the number 2048.
8. Game over: The game ends when the board is full and nothing can merge.
";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Draw `rows` as a rounded box table. With `header`, the first row is
/// separated from the rest by a heavier rule.
fn table(rows: &[Vec<String>], align: Align, header: bool) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|row| row.get(c))
                .map(|text| text.chars().count())
                .max()
                .unwrap_or(0)
                .max(1)
        })
        .collect();

    let rule = |left: &str, fill: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| fill.repeat(w + 2)).collect();
        format!("{left}{}{right}\n", segments.join(mid))
    };

    let mut out = rule("╭", "─", "┬", "╮");
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.push_str(&if header && i == 1 {
                rule("╞", "═", "╪", "╡")
            } else {
                rule("├", "─", "┼", "┤")
            });
        }
        out.push('│');
        for (c, width) in widths.iter().enumerate() {
            let text = row.get(c).map(String::as_str).unwrap_or("");
            match align {
                Align::Left => out.push_str(&format!(" {text:<width$} │")),
                Align::Right => out.push_str(&format!(" {text:>width$} │")),
            }
        }
        out.push('\n');
    }
    out.push_str(&rule("╰", "─", "┴", "╯"));
    out
}

/// The board as a grid table, empty cells left blank.
pub fn board_table(board: &Board) -> String {
    let rows: Vec<Vec<String>> = board
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.map(|tile| tile.to_string()).unwrap_or_default())
                .collect()
        })
        .collect();
    table(&rows, Align::Right, false)
}

/// The keystroke reference shown before every move.
pub fn user_manual() -> String {
    let mut rows = vec![vec!["Keystroke".to_string(), "Description".to_string()]];
    for direction in SlideDirection::ALL {
        rows.push(vec![
            direction.key().to_string(),
            format!("Slide {}", direction.name().to_lowercase()),
        ]);
    }
    for (key, description) in [
        ("h", "Get a hint from the assistant"),
        ("p", "Save the game"),
        ("q", "Give up"),
    ] {
        rows.push(vec![key.to_string(), description.to_string()]);
    }
    table(&rows, Align::Left, true)
}

/// Renders every phase of the game as text on a writer (stdout by default).
#[derive(Debug)]
pub struct ConsoleRenderer<W: Write> {
    out: W,
}

impl ConsoleRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        let result = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            warn!(error = %e, "Failed to write to the console");
        }
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn on_init(&mut self) {
        let text = format!(
            "{BANNER}\n--------------- Welcome to the 2048 Game ----------------\n\n\
             {RULES}\n-------------------- Enjoy the Game ! --------------------\n\n"
        );
        self.emit(&text);
    }

    fn on_start(&mut self, board: &Board) {
        let text = format!("{}\nScore: {}\n\n", board_table(board), grid::score(board));
        self.emit(&text);
    }

    fn before_next_move(&mut self) {
        self.emit(&user_manual());
    }

    fn after_next_move(&mut self, decision: &PlayerDecision) {
        let mut text = format!("You selected: {}\n", decision.direction);
        if !decision.reason.is_empty() {
            text.push_str(&format!("Reason provided: {}\n", decision.reason));
        }
        text.push('\n');
        self.emit(&text);
    }

    fn on_win(&mut self) {
        self.emit("Congratulations, you win!\n");
    }

    fn on_lose(&mut self) {
        self.emit("Game over!\n");
    }
}
