use crate::errors::WellnessError;
use crate::fitness::FitnessPlanner;
use crate::journal::JournalBook;
use crate::metrics;
use crate::models::SummaryResponse;
use crate::sleep::SleepTracker;
use crate::storage::{StoragePort, Store};
use crate::ticker::TimerTicker;
use crate::timer::{TimerSnapshot, TimerState};
use std::sync::Arc;
use tokio::sync::Mutex;

/// The three feature managers sharing one store.
pub struct Trackers {
    pub sleep: SleepTracker,
    pub fitness: FitnessPlanner,
    pub journal: JournalBook,
}

impl Trackers {
    pub fn load(port: Arc<dyn StoragePort>) -> Self {
        let store = Store::new(port);
        Self {
            sleep: SleepTracker::load(store.clone()),
            fitness: FitnessPlanner::load(store.clone()),
            journal: JournalBook::load(store),
        }
    }

    pub fn wellness_score(&self) -> u8 {
        metrics::wellness_score(
            self.sleep.entries(),
            self.journal.entries(),
            self.fitness.routines(),
        )
    }

    pub fn summary(&self) -> SummaryResponse {
        let score = self.wellness_score();
        SummaryResponse {
            score,
            label: metrics::score_label(score),
            streaks: metrics::streaks(
                self.sleep.entries(),
                self.journal.entries(),
                self.fitness.routines(),
            ),
            quote: metrics::daily_quote(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub trackers: Arc<Mutex<Trackers>>,
    pub ticker: Arc<TimerTicker>,
}

impl AppState {
    pub fn new(trackers: Trackers) -> Self {
        Self {
            trackers: Arc::new(Mutex::new(trackers)),
            ticker: Arc::new(TimerTicker::new()),
        }
    }
}

// Ticker changes happen while the trackers lock is held, so a tick task that
// is about to be replaced can never act on the newly started exercise.
impl AppState {
    pub async fn start_timer(
        &self,
        routine_id: &str,
        exercise_id: &str,
    ) -> Result<TimerSnapshot, WellnessError> {
        let mut trackers = self.trackers.lock().await;
        let snapshot = trackers.fitness.start_timer(routine_id, exercise_id)?;
        self.ticker.schedule(self.trackers.clone());
        Ok(snapshot)
    }

    pub async fn toggle_timer(&self) -> Result<TimerSnapshot, WellnessError> {
        let mut trackers = self.trackers.lock().await;
        let snapshot = trackers.fitness.toggle_timer()?;
        if snapshot.state == TimerState::Running {
            self.ticker.schedule(self.trackers.clone());
        } else {
            self.ticker.cancel();
        }
        Ok(snapshot)
    }

    pub async fn reset_timer(&self) -> Result<TimerSnapshot, WellnessError> {
        let mut trackers = self.trackers.lock().await;
        let snapshot = trackers.fitness.reset_timer()?;
        self.ticker.cancel();
        Ok(snapshot)
    }
}
