use minesweeper_engine::{
    Game, GameConfig, GameEngine, GameHandle, StatusView, UserAction,
    model::view::{Outcome, board_view},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

const HELP: &str = "commands: start | reset | go | r <row> <col> | f <row> <col> | show | json | help | quit";

/// One line of terminal input. Cell coordinates stay raw until checked against the board.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Start,
    Reset,
    Primary,
    Reveal(&'a str, &'a str),
    Flag(&'a str, &'a str),
    Show,
    Json,
    Help,
    Quit,
    Unknown,
}

/// Blank lines carry no command, so a stray Enter never starts or resets a game.
fn parse_command(line: &str) -> Option<Command<'_>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let command = match words.as_slice() {
        [] => return None,
        ["start" | "s"] => Command::Start,
        ["reset" | "n"] => Command::Reset,
        ["go" | "g"] => Command::Primary,
        ["r" | "reveal", row, col] => Command::Reveal(*row, *col),
        ["f" | "flag", row, col] => Command::Flag(*row, *col),
        ["show"] => Command::Show,
        ["json"] => Command::Json,
        ["help" | "h" | "?"] => Command::Help,
        ["quit" | "q" | "exit"] => Command::Quit,
        _ => Command::Unknown,
    };
    Some(command)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    info!("💣 Starting minesweeper engine");

    let config = GameConfig::from_env();
    let engine = GameEngine::spawn(config);
    let game = engine.handle();

    let renderer = tokio::spawn(render_updates(game.clone()));
    display_board(&game.snapshot());
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_command(&line) else {
            continue;
        };
        match command {
            Command::Start => game.dispatch(UserAction::Start),
            Command::Reset => game.dispatch(UserAction::Reset),
            Command::Primary => game.dispatch(game.snapshot().primary_control()),
            Command::Reveal(row, col) => {
                if let Some(index) = parse_index(&game, row, col) {
                    game.dispatch(UserAction::reveal(index));
                }
            }
            Command::Flag(row, col) => {
                if let Some(index) = parse_index(&game, row, col) {
                    game.dispatch(UserAction::flag(index));
                }
            }
            Command::Show => display_board(&game.snapshot()),
            Command::Json => println!("{}", serde_json::to_string(&game.snapshot())?),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Unknown => warn!("Unknown command: {}", line.trim()),
        }
    }

    renderer.abort();
    let _ = renderer.await;
    engine.shutdown().await;
    Ok(())
}

fn parse_index(game: &GameHandle, row: &str, col: &str) -> Option<usize> {
    let (Ok(row), Ok(col)) = (row.parse::<u8>(), col.parse::<u8>()) else {
        warn!("Row and column must be numbers, got {} {}", row, col);
        return None;
    };

    let index = game.snapshot().board.index_of(row, col);
    if index.is_none() {
        warn!("Cell ({}, {}) is outside the board", row, col);
    }
    index
}

/// Redraws on every published change. Countdown-only changes print just the status line.
async fn render_updates(game: GameHandle) {
    let mut updates = game.subscribe();
    let mut last = updates.borrow_and_update().clone();

    while updates.changed().await.is_ok() {
        let current = updates.borrow_and_update().clone();
        if current.board != last.board || current.phase != last.phase || current.id != last.id {
            display_board(&current);
        } else {
            display_status(&current);
        }
        last = current;
    }
}

fn display_status(game: &Game) {
    let status = StatusView::from(game);
    let outcome = match status.outcome {
        Some(Outcome::Won) => "  You won!",
        Some(Outcome::Lost) => "  You lost!",
        None => "",
    };
    println!(
        "⏲️ {:>3}   {:>3} 💣   [{:?}]{}",
        status.seconds_left, status.flags_left, status.control, outcome
    );
}

fn display_board(game: &Game) {
    display_status(game);

    print!("    ");
    for col in 0..game.cols() {
        print!("{:>3}", col);
    }
    println!();

    for (row, cells) in board_view(game).iter().enumerate() {
        print!("{:>3} ", row);
        for cell in cells {
            print!("{:>3}", cell.glyph());
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_not_a_command() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   \t "), None);
    }

    #[test]
    fn go_maps_to_the_primary_control() {
        assert_eq!(parse_command("go"), Some(Command::Primary));
        assert_eq!(parse_command("  g "), Some(Command::Primary));
    }

    #[test]
    fn cell_commands_keep_their_coordinates() {
        assert_eq!(parse_command("r 3 4"), Some(Command::Reveal("3", "4")));
        assert_eq!(parse_command("flag 0 12"), Some(Command::Flag("0", "12")));
        assert_eq!(parse_command("r 3"), Some(Command::Unknown));
    }
}
