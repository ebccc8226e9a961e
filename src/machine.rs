use rand::{SeedableRng, rngs::StdRng};
use tracing::{instrument, trace};

use crate::{
    config::GameConfig,
    data::Game,
    logic::{self, Transition},
    model::Action,
    timer::TimerSwitch,
};

/// Sole owner of the authoritative game. `apply` takes `&mut self`, so
/// actions are applied one at a time and each one replaces the game whole.
#[derive(Debug)]
pub struct GameMachine {
    game: Game,
    config: GameConfig,
    timer: TimerSwitch,
    rng: StdRng,
}

impl GameMachine {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Starts from a freshly reset game, as if Reset had just been dispatched.
    /// The config is clamped first so every board it builds is playable.
    pub fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let config = config.validated();
        let timer = TimerSwitch::default();
        let Transition { game, timer: signal } = logic::reset(&config, &mut rng);
        if let Some(signal) = signal {
            timer.apply(signal);
        }

        Self {
            game,
            config,
            timer,
            rng,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn timer(&self) -> &TimerSwitch {
        &self.timer
    }

    /// Applies one action and reports whether the game changed.
    #[instrument(level = "trace", skip(self), fields(game_id = %self.game.id))]
    pub fn apply(&mut self, action: Action) -> bool {
        let Transition { game, timer } =
            logic::reduce(&self.game, action, &self.config, &mut self.rng);

        if let Some(signal) = timer {
            self.timer.apply(signal);
        }

        let changed = game != self.game;
        trace!("Applied {:?}, changed: {}", action, changed);
        self.game = game;
        changed
    }

    pub fn flags_left(&self) -> u16 {
        self.game.flags_left()
    }

    pub fn remaining_hidden_non_mine_cells(&self) -> u16 {
        self.game.remaining_hidden_non_mine_cells()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::Phase,
        model::{CellInteraction, UserAction},
    };

    fn machine(config: GameConfig) -> GameMachine {
        GameMachine::with_rng(config, StdRng::seed_from_u64(42))
    }

    #[test]
    fn starts_idle_with_timer_disarmed() {
        let machine = machine(GameConfig::default());
        assert_eq!(machine.game().phase, Phase::Idle);
        assert!(!machine.timer().is_armed());
        assert_eq!(machine.flags_left(), 20);
        assert_eq!(machine.remaining_hidden_non_mine_cells(), 280);
    }

    #[test]
    fn overfull_config_is_clamped_to_a_playable_board() {
        let mut machine = machine(GameConfig::new(2, 2, 4, 30));

        let game = machine.game();
        assert_eq!(usize::from(game.num_mines), game.board.mine_count());
        assert!(usize::from(game.num_mines) < game.board.len());
        assert_eq!(machine.config().mines, 3);

        machine.apply(Action::Reset);
        let game = machine.game();
        assert_eq!(game.num_mines, 3);
        assert_eq!(game.board.mine_count(), 3);
    }

    #[test]
    fn start_twice_keeps_clock() {
        let mut machine = machine(GameConfig::default());

        assert!(machine.apply(Action::Start));
        assert!(machine.timer().is_armed());
        let seconds = machine.game().seconds_left;

        assert!(!machine.apply(Action::Start));
        assert_eq!(machine.game().phase, Phase::Running);
        assert_eq!(machine.game().seconds_left, seconds);
    }

    #[test]
    fn reset_disarms_and_rebuilds() {
        let mut machine = machine(GameConfig::default());
        machine.apply(Action::Start);
        machine.apply(Action::TimerTick);
        let old_id = machine.game().id;

        machine.apply(UserAction::Reset.into());

        assert!(!machine.timer().is_armed());
        assert_eq!(machine.game().phase, Phase::Idle);
        assert_eq!(machine.game().seconds_left, 180);
        assert_ne!(machine.game().id, old_id);
        assert_eq!(machine.game().board.mine_count(), 20);
    }

    #[test]
    fn countdown_expiry_loses_and_disarms() {
        let mut machine = machine(GameConfig::new(3, 3, 1, 3));
        machine.apply(Action::Start);

        for expected in [2, 1] {
            machine.apply(Action::TimerTick);
            assert_eq!(machine.game().seconds_left, expected);
            assert!(machine.timer().is_armed());
        }

        machine.apply(Action::TimerTick);
        assert_eq!(machine.game().phase, Phase::Lost);
        assert_eq!(machine.game().seconds_left, 0);
        assert!(!machine.timer().is_armed());

        assert!(!machine.apply(Action::TimerTick));
    }

    #[test]
    fn mine_hit_disarms_timer() {
        let mut machine = machine(GameConfig::new(3, 3, 2, 30));
        machine.apply(Action::Start);
        let mine = machine
            .game()
            .board
            .cells()
            .iter()
            .position(|cell| cell.mine)
            .unwrap();

        machine.apply(Action::CellInteraction(CellInteraction {
            index: mine,
            secondary: false,
        }));

        assert_eq!(machine.game().phase, Phase::Lost);
        assert!(!machine.timer().is_armed());
    }

    #[test]
    fn clearing_the_board_wins() {
        let mut machine = machine(GameConfig::new(4, 4, 3, 30));
        machine.apply(Action::Start);

        let cells = machine.game().board.cells().to_vec();
        for (index, cell) in cells.iter().enumerate() {
            let action = if cell.mine {
                UserAction::flag(index)
            } else {
                UserAction::reveal(index)
            };
            machine.apply(action.into());
        }

        assert_eq!(machine.game().phase, Phase::Won);
        assert_eq!(machine.flags_left(), 0);
        assert_eq!(machine.remaining_hidden_non_mine_cells(), 0);
        assert!(!machine.timer().is_armed());
    }
}
