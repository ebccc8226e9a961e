use rand::Rng;
use tracing::{debug, info, instrument, warn};
use uuid::Builder;

use crate::{
    config::GameConfig,
    data::{Board, Game, Phase},
    model::{Action, CellInteraction},
};

pub mod flood;
pub mod neighbors;

pub use flood::flood_reveal;
pub use neighbors::neighbors;

/// Change requested of the timer driver by a reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    Arm,
    Disarm,
}

/// Result of applying one action: the replacement game plus any timer change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub game: Game,
    pub timer: Option<TimerSignal>,
}

impl Transition {
    fn unchanged(game: Game) -> Self {
        Self { game, timer: None }
    }

    fn with_timer(game: Game, signal: TimerSignal) -> Self {
        Self {
            game,
            timer: Some(signal),
        }
    }
}

/// Computes the game that follows `game` after `action`. The input is never
/// modified; the board is copied before any change.
pub fn reduce<R: Rng>(
    game: &Game,
    action: Action,
    config: &GameConfig,
    rng: &mut R,
) -> Transition {
    match action {
        Action::Start => start(game),
        Action::CellInteraction(interaction) => cell_interaction(game, interaction),
        Action::Reset => reset(config, rng),
        Action::TimerTick => timer_tick(game),
    }
}

pub fn start(game: &Game) -> Transition {
    if game.phase != Phase::Idle {
        debug!("Ignoring start in phase {:?}", game.phase);
        return Transition::unchanged(game.clone());
    }

    let mut next = game.clone();
    next.phase = Phase::Running;
    info!("Game {} started, {}s on the clock", next.id, next.seconds_left);
    Transition::with_timer(next, TimerSignal::Arm)
}

/// Builds a brand new Idle game with freshly placed mines.
#[instrument(level = "trace", skip(rng))]
pub fn reset<R: Rng>(config: &GameConfig, rng: &mut R) -> Transition {
    let mut board = Board::new(config.rows, config.cols);
    place_mines(&mut board, config.mines, rng);
    count_adjacent_mines(&mut board);

    let mut id_bytes = [0u8; 16];
    rng.fill(&mut id_bytes);

    let game = Game {
        id: Builder::from_random_bytes(id_bytes).into_uuid(),
        phase: Phase::Idle,
        num_mines: config.mines,
        seconds_left: config.seconds,
        board,
    };
    info!(
        "New game {}: {}x{} with {} mines",
        game.id, config.rows, config.cols, config.mines
    );
    Transition::with_timer(game, TimerSignal::Disarm)
}

/// Rejection sampling: draw uniform indices until `mines` distinct cells are mines.
fn place_mines<R: Rng>(board: &mut Board, mines: u16, rng: &mut R) {
    let total = board.len();
    if usize::from(mines) >= total {
        warn!(
            "Refusing to place {} mines on {} cells, board left without mines",
            mines, total
        );
        return;
    }

    let mut left = mines;
    while left != 0 {
        let index = rng.random_range(0..total);
        if board[index].mine {
            continue;
        }
        board[index].mine = true;
        left -= 1;
    }
}

fn count_adjacent_mines(board: &mut Board) {
    for index in 0..board.len() {
        if !board[index].mine {
            continue;
        }
        for neighbor in neighbors(board, index) {
            if !board[neighbor].mine {
                board[neighbor].adjacent_mines += 1;
            }
        }
    }
}

#[instrument(level = "trace", skip(game), fields(game_id = %game.id))]
pub fn cell_interaction(game: &Game, interaction: CellInteraction) -> Transition {
    if game.phase != Phase::Running {
        debug!("Ignoring cell interaction in phase {:?}", game.phase);
        return Transition::unchanged(game.clone());
    }

    let index = interaction.index;
    let Some(cell) = game.board.get(index).copied() else {
        warn!(
            "Invalid cell index {} on a board of {} cells",
            index,
            game.board.len()
        );
        return Transition::unchanged(game.clone());
    };

    let mut next = game.clone();

    if interaction.secondary {
        if cell.revealed {
            debug!("Ignoring flag on revealed cell {}", index);
            return Transition::unchanged(next);
        }
        if !cell.flagged && game.flags_left() == 0 {
            debug!("No flags left, ignoring flag on cell {}", index);
            return Transition::unchanged(next);
        }

        next.board[index].flagged = !cell.flagged;
        debug!(
            "Cell {} {}, {} flags left",
            index,
            if cell.flagged { "unflagged" } else { "flagged" },
            next.flags_left()
        );
    } else {
        if cell.flagged || cell.revealed {
            debug!("Ignoring reveal on flagged or revealed cell {}", index);
            return Transition::unchanged(next);
        }

        next.board[index].revealed = true;

        if cell.mine {
            warn!("Mine hit at cell {} - game over!", index);
            next.phase = Phase::Lost;
            return Transition::with_timer(next, TimerSignal::Disarm);
        }

        if cell.is_empty() {
            let count = flood_reveal(&mut next.board, index);
            debug!("Revealed cell {} and flooded {} more", index, count);
        } else {
            debug!(
                "Revealed cell {} with {} adjacent mines",
                index, cell.adjacent_mines
            );
        }
    }

    if next.is_won() {
        info!("Game {} won with {}s left", next.id, next.seconds_left);
        next.phase = Phase::Won;
        return Transition::with_timer(next, TimerSignal::Disarm);
    }

    Transition::unchanged(next)
}

pub fn timer_tick(game: &Game) -> Transition {
    if game.phase != Phase::Running {
        debug!("Ignoring timer tick in phase {:?}", game.phase);
        return Transition::unchanged(game.clone());
    }

    let mut next = game.clone();
    next.seconds_left = next.seconds_left.saturating_sub(1);

    if next.seconds_left == 0 {
        info!("Game {} ran out of time", next.id);
        next.phase = Phase::Lost;
        return Transition::with_timer(next, TimerSignal::Disarm);
    }

    Transition::unchanged(next)
}
