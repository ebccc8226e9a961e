use serde::{Deserialize, Serialize};

pub mod view;

/// A click on one cell. The secondary button toggles a flag, the primary one reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellInteraction {
    pub index: usize,
    pub secondary: bool,
}

/// Everything that can change a game. Consumed once by the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    CellInteraction(CellInteraction),
    Reset,
    TimerTick,
}

/// The subset of actions a player can send; ticks only come from the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum UserAction {
    #[serde(rename = "start")]
    Start,
    #[serde(rename = "interact")]
    CellInteraction(CellInteraction),
    #[serde(rename = "reset")]
    Reset,
}

impl UserAction {
    pub fn reveal(index: usize) -> Self {
        Self::CellInteraction(CellInteraction {
            index,
            secondary: false,
        })
    }

    pub fn flag(index: usize) -> Self {
        Self::CellInteraction(CellInteraction {
            index,
            secondary: true,
        })
    }
}

impl From<UserAction> for Action {
    fn from(value: UserAction) -> Self {
        match value {
            UserAction::Start => Action::Start,
            UserAction::CellInteraction(interaction) => Action::CellInteraction(interaction),
            UserAction::Reset => Action::Reset,
        }
    }
}
