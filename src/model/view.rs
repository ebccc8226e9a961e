use serde::Serialize;

use crate::{
    data::{Cell, Game, Phase},
    model::UserAction,
};

/// What a renderer may show for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state")]
pub enum CellView {
    #[serde(rename = "hidden")]
    Hidden,
    #[serde(rename = "flagged")]
    Flagged,
    #[serde(rename = "revealed")]
    Revealed { adjacent: u8 },
    #[serde(rename = "mine")]
    Mine,
}

impl CellView {
    /// Mines stay hidden until revealed, except that a lost game shows all of them.
    pub fn of(cell: &Cell, phase: Phase) -> Self {
        match cell {
            Cell { mine: true, revealed, .. } if *revealed || phase == Phase::Lost => Self::Mine,
            Cell { revealed: true, adjacent_mines, .. } => Self::Revealed {
                adjacent: *adjacent_mines,
            },
            Cell { flagged: true, .. } => Self::Flagged,
            _ => Self::Hidden,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            CellView::Hidden => '·',
            CellView::Flagged => 'F',
            CellView::Revealed { adjacent: 0 } => ' ',
            CellView::Revealed { adjacent } => char::from_digit(u32::from(adjacent), 10).unwrap_or('?'),
            CellView::Mine => '*',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlLabel {
    Start,
    Reset,
}

impl From<UserAction> for ControlLabel {
    fn from(action: UserAction) -> Self {
        match action {
            UserAction::Start => Self::Start,
            UserAction::Reset | UserAction::CellInteraction(_) => Self::Reset,
        }
    }
}

/// Everything the status bar above the grid displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub seconds_left: u16,
    pub flags_left: u16,
    pub control: ControlLabel,
    pub outcome: Option<Outcome>,
}

impl From<&Game> for StatusView {
    fn from(game: &Game) -> Self {
        let outcome = match game.phase {
            Phase::Won => Some(Outcome::Won),
            Phase::Lost => Some(Outcome::Lost),
            Phase::Idle | Phase::Running => None,
        };
        let control = ControlLabel::from(game.primary_control());

        Self {
            seconds_left: game.seconds_left,
            flags_left: game.flags_left(),
            control,
            outcome,
        }
    }
}

/// Row-major cell projections for the whole board.
pub fn board_view(game: &Game) -> Vec<Vec<CellView>> {
    game.board
        .rows_iter()
        .map(|row| row.iter().map(|cell| CellView::of(cell, game.phase)).collect())
        .collect()
}
