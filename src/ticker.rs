use crate::fitness::TickOutcome;
use crate::state::Trackers;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

const TICK: Duration = Duration::from_secs(1);

/// Owns the task that ticks the exercise timer once per second.
/// At most one task exists at a time; scheduling replaces the previous one.
#[derive(Default)]
pub struct TimerTicker {
    task: StdMutex<Option<JoinHandle<()>>>,
}

impl TimerTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&self, trackers: Arc<Mutex<Trackers>>) {
        let task = tokio::spawn(run(trackers));
        if let Some(previous) = self.slot().replace(task) {
            previous.abort();
        }
    }

    pub fn cancel(&self) {
        if let Some(task) = self.slot().take() {
            task.abort();
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.slot().as_ref().is_some_and(|task| !task.is_finished())
    }

    fn slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.task.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for TimerTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run(trackers: Arc<Mutex<Trackers>>) {
    let mut interval = time::interval_at(Instant::now() + TICK, TICK);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        let outcome = trackers.lock().await.fitness.tick_timer();
        match outcome {
            TickOutcome::Running => continue,
            TickOutcome::Completed(done) => {
                debug!(exercise_id = %done.exercise_id, "timer finished");
                break;
            }
            TickOutcome::Stopped => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::timer::TimerState;

    async fn trackers_with_plank_running() -> Arc<Mutex<Trackers>> {
        let trackers = Arc::new(Mutex::new(Trackers::load(Arc::new(MemoryStore::new()))));
        trackers
            .lock()
            .await
            .fitness
            .start_timer("sample-routine", "ex3")
            .unwrap();
        trackers
    }

    async fn plank_completed(trackers: &Arc<Mutex<Trackers>>) -> bool {
        trackers.lock().await.fitness.routines()[0].exercises[2].completed
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_until_exercise_completes() {
        let trackers = trackers_with_plank_running().await;
        let ticker = TimerTicker::new();
        ticker.schedule(trackers.clone());

        time::sleep(Duration::from_millis(29_500)).await;
        assert_eq!(trackers.lock().await.fitness.timer().remaining, 1);
        assert!(!plank_completed(&trackers).await);

        time::sleep(Duration::from_secs(1)).await;
        assert!(plank_completed(&trackers).await);
        assert_eq!(trackers.lock().await.fitness.timer_state(), TimerState::Idle);
        assert!(!ticker.is_scheduled());
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_replaces_pending_ticks() {
        let trackers = trackers_with_plank_running().await;
        let ticker = TimerTicker::new();
        ticker.schedule(trackers.clone());
        ticker.schedule(trackers.clone());

        time::sleep(Duration::from_millis(10_500)).await;
        assert_eq!(trackers.lock().await.fitness.timer().remaining, 20);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticking() {
        let trackers = trackers_with_plank_running().await;
        let ticker = TimerTicker::new();
        ticker.schedule(trackers.clone());

        time::sleep(Duration::from_millis(3_500)).await;
        ticker.cancel();
        time::sleep(Duration::from_secs(10)).await;

        let snapshot = trackers.lock().await.fitness.timer();
        assert_eq!(snapshot.remaining, 27);
        assert_eq!(snapshot.state, TimerState::Running);
        assert!(!ticker.is_scheduled());
    }
}
