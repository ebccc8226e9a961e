use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::{
    sync::mpsc::UnboundedSender,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, info, trace};

use crate::{logic::TimerSignal, model::Action};

/// Shared "timer active" flag. Written by the game machine when a reducer
/// asks for it, polled by the timer driver before every tick.
#[derive(Debug, Clone, Default)]
pub struct TimerSwitch(Arc<AtomicBool>);

impl TimerSwitch {
    pub fn is_armed(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn apply(&self, signal: TimerSignal) {
        let armed = signal == TimerSignal::Arm;
        if self.0.swap(armed, Ordering::SeqCst) != armed {
            info!("Timer {}", if armed { "armed" } else { "disarmed" });
        }
    }
}

/// Feeds one `TimerTick` per `period` into the dispatch queue while armed.
///
/// The driver never touches the game itself. It stops once the queue is
/// closed, i.e. the engine's event loop is gone.
pub async fn run_timer(switch: TimerSwitch, period: Duration, actions: UnboundedSender<Action>) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Started timer driver: ticking every {:?}", period);

    loop {
        interval.tick().await;

        if !switch.is_armed() {
            continue;
        }

        trace!("Timer tick");
        if actions.send(Action::TimerTick).is_err() {
            debug!("Dispatch queue closed, stopping timer driver");
            break;
        }
    }
}
