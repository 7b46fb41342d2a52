//! Countdown for a single exercise.
//!
//! `Idle -> Running -> {Paused <-> Running} -> Finished -> Idle`
//!
//! The machine only counts; scheduling the one-second ticks is the job of
//! [`crate::ticker::TimerTicker`], and marking the exercise complete is done
//! by the fitness planner when [`ExerciseTimer::tick`] reports completion.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveExercise {
    pub routine_id: String,
    pub exercise_id: String,
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub active: Option<ActiveExercise>,
    pub remaining: u32,
    pub display: String,
}

#[derive(Debug)]
pub struct ExerciseTimer {
    state: TimerState,
    active: Option<ActiveExercise>,
    remaining: u32,
}

impl Default for ExerciseTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            active: None,
            remaining: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn active(&self) -> Option<&ActiveExercise> {
        self.active.as_ref()
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Replaces any exercise in progress without completing it.
    pub fn start(&mut self, exercise: ActiveExercise) {
        self.remaining = exercise.duration;
        self.active = Some(exercise);
        self.state = TimerState::Running;
    }

    pub fn pause(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.state = TimerState::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != TimerState::Paused {
            return false;
        }
        self.state = TimerState::Running;
        true
    }

    /// Flips between running and paused. Returns the new state.
    pub fn toggle(&mut self) -> TimerState {
        if !self.pause() {
            self.resume();
        }
        self.state
    }

    /// Restores the full duration and leaves the timer paused.
    pub fn reset(&mut self) -> bool {
        let Some(active) = &self.active else {
            return false;
        };
        self.remaining = active.duration;
        self.state = TimerState::Paused;
        true
    }

    /// Advances one second. Returns the exercise exactly once, on the tick
    /// that reaches zero.
    pub fn tick(&mut self) -> Option<ActiveExercise> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return None;
        }
        self.state = TimerState::Finished;
        self.active.clone()
    }

    /// Leaves `Finished` (or any state) for `Idle` with nothing active.
    pub fn clear(&mut self) {
        self.state = TimerState::Idle;
        self.active = None;
        self.remaining = 0;
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state,
            active: self.active.clone(),
            remaining: self.remaining,
            display: format_time(self.remaining),
        }
    }
}

/// `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(id: &str, duration: u32) -> ActiveExercise {
        ActiveExercise {
            routine_id: "r".into(),
            exercise_id: id.into(),
            duration,
        }
    }

    #[test]
    fn counts_down_and_reports_completion_once() {
        let mut timer = ExerciseTimer::new();
        timer.start(exercise("ex1", 5));
        assert_eq!(timer.state(), TimerState::Running);

        let mut completions = Vec::new();
        for _ in 0..8 {
            if let Some(done) = timer.tick() {
                completions.push(done);
            }
        }
        assert_eq!(completions, vec![exercise("ex1", 5)]);
        assert_eq!(timer.state(), TimerState::Finished);
        assert_eq!(timer.remaining(), 0);

        timer.clear();
        assert_eq!(timer.state(), TimerState::Idle);
        assert!(timer.active().is_none());
        assert!(timer.tick().is_none());
    }

    #[test]
    fn pause_keeps_remaining_time() {
        let mut timer = ExerciseTimer::new();
        timer.start(exercise("ex1", 10));
        timer.tick();
        timer.tick();
        assert_eq!(timer.toggle(), TimerState::Paused);
        assert!(timer.tick().is_none());
        assert_eq!(timer.remaining(), 8);
        assert_eq!(timer.toggle(), TimerState::Running);
        timer.tick();
        assert_eq!(timer.remaining(), 7);
    }

    #[test]
    fn reset_restores_duration_and_pauses() {
        let mut timer = ExerciseTimer::new();
        assert!(!timer.reset());

        timer.start(exercise("ex1", 30));
        timer.tick();
        assert!(timer.reset());
        assert_eq!(timer.remaining(), 30);
        assert_eq!(timer.state(), TimerState::Paused);
    }

    #[test]
    fn starting_another_exercise_abandons_the_first() {
        let mut timer = ExerciseTimer::new();
        timer.start(exercise("ex1", 2));
        timer.tick();
        timer.start(exercise("ex2", 3));

        assert_eq!(timer.active().unwrap().exercise_id, "ex2");
        assert_eq!(timer.remaining(), 3);
        assert!(timer.tick().is_none());
        assert!(timer.tick().is_none());
        assert_eq!(timer.tick().unwrap().exercise_id, "ex2");
    }

    #[test]
    fn idle_ignores_pause_and_toggle() {
        let mut timer = ExerciseTimer::new();
        assert!(!timer.pause());
        assert_eq!(timer.toggle(), TimerState::Idle);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(45), "0:45");
        assert_eq!(format_time(125), "2:05");
    }
}
