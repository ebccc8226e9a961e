use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    config::GameConfig,
    data::Game,
    machine::GameMachine,
    model::{Action, UserAction},
    timer::run_timer,
};

/// Cloneable handle a renderer uses to read snapshots and send player actions.
#[derive(Debug, Clone)]
pub struct GameHandle {
    actions: mpsc::UnboundedSender<Action>,
    snapshots: watch::Receiver<Game>,
}

impl GameHandle {
    /// Queues a player action. Fire-and-forget: the result shows up in the
    /// next snapshot.
    pub fn dispatch(&self, action: UserAction) {
        debug!("Dispatching {:?}", action);
        if self.actions.send(action.into()).is_err() {
            warn!("Game engine stopped, dropping {:?}", action);
        }
    }

    /// Consistent copy of the current game.
    pub fn snapshot(&self) -> Game {
        self.snapshots.borrow().clone()
    }

    pub fn flags_left(&self) -> u16 {
        self.snapshots.borrow().flags_left()
    }

    pub fn remaining_hidden_non_mine_cells(&self) -> u16 {
        self.snapshots.borrow().remaining_hidden_non_mine_cells()
    }

    /// Receiver that is notified whenever the published game changes.
    pub fn subscribe(&self) -> watch::Receiver<Game> {
        self.snapshots.clone()
    }
}

/// A running game: the event loop that owns the machine plus the timer driver.
pub struct GameEngine {
    handle: GameHandle,
    event_loop: JoinHandle<()>,
    timer: JoinHandle<()>,
}

impl GameEngine {
    /// Spawns the engine on the current tokio runtime.
    pub fn spawn(config: GameConfig) -> Self {
        Self::from_machine(GameMachine::new(config))
    }

    pub fn from_machine(machine: GameMachine) -> Self {
        let (actions, receiver) = mpsc::unbounded_channel();
        let (publisher, snapshots) = watch::channel(machine.game().clone());

        let timer = tokio::spawn(run_timer(
            machine.timer().clone(),
            machine.config().tick_period,
            actions.clone(),
        ));
        let event_loop = tokio::spawn(run_event_loop(machine, receiver, publisher));

        info!("Game engine started");
        Self {
            handle: GameHandle {
                actions,
                snapshots,
            },
            event_loop,
            timer,
        }
    }

    pub fn handle(&self) -> GameHandle {
        self.handle.clone()
    }

    /// Stops the timer driver and the event loop, waiting for both to finish.
    /// Actions still queued are dropped.
    pub async fn shutdown(self) {
        self.timer.abort();
        let _ = self.timer.await;
        self.event_loop.abort();
        let _ = self.event_loop.await;
        info!("Game engine stopped");
    }
}

async fn run_event_loop(
    mut machine: GameMachine,
    mut actions: mpsc::UnboundedReceiver<Action>,
    publisher: watch::Sender<Game>,
) {
    while let Some(action) = actions.recv().await {
        if machine.apply(action) {
            publisher.send_replace(machine.game().clone());
        }
    }
    debug!("Dispatch queue closed, event loop exiting");
}
