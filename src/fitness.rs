use crate::errors::WellnessError;
use crate::models::{Exercise, Routine};
use crate::seed;
use crate::storage::{FITNESS_KEY, Store};
use crate::timer::{ActiveExercise, ExerciseTimer, TimerSnapshot, TimerState};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Result of advancing the exercise timer by one second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still counting down.
    Running,
    /// Reached zero; the exercise was marked completed.
    Completed(ActiveExercise),
    /// Nothing is running, so no further ticks are needed.
    Stopped,
}

/// Routines, their exercises and the countdown timer for the active exercise.
pub struct FitnessPlanner {
    store: Store,
    routines: Vec<Routine>,
    timer: ExerciseTimer,
}

impl FitnessPlanner {
    pub fn load(store: Store) -> Self {
        let routines = match store.load::<Routine>(FITNESS_KEY) {
            Some(routines) => routines,
            None => {
                let routines = seed::sample_routines();
                info!(count = routines.len(), "seeding sample routines");
                store.save(FITNESS_KEY, &routines);
                routines
            }
        };
        Self {
            store,
            routines,
            timer: ExerciseTimer::new(),
        }
    }

    pub fn routines(&self) -> &[Routine] {
        &self.routines
    }

    pub fn routine(&self, routine_id: &str) -> Option<&Routine> {
        self.routines.iter().find(|routine| routine.id == routine_id)
    }

    /// The first routine in the collection, the only one that feeds the wellness score.
    pub fn primary_routine(&self) -> Option<&Routine> {
        self.routines.first()
    }

    pub fn create_routine(&mut self, name: &str) -> Result<&Routine, WellnessError> {
        let name = required(name, "routine name")?;
        self.routines.push(Routine {
            id: new_id(),
            name,
            exercises: Vec::new(),
        });
        self.persist();
        let routine = &self.routines[self.routines.len() - 1];
        debug!(id = %routine.id, "routine created");
        Ok(routine)
    }

    pub fn add_exercise(
        &mut self,
        routine_id: &str,
        name: &str,
        duration: u32,
    ) -> Result<&Exercise, WellnessError> {
        let name = required(name, "exercise name")?;
        if duration == 0 {
            return Err(WellnessError::validation("duration must be at least one second"));
        }
        let index = self.routine_index(routine_id)?;
        self.routines[index].exercises.push(Exercise {
            id: new_id(),
            name,
            duration,
            completed: false,
        });
        self.persist();
        let exercises = &self.routines[index].exercises;
        Ok(&exercises[exercises.len() - 1])
    }

    pub fn toggle_exercise(
        &mut self,
        routine_id: &str,
        exercise_id: &str,
        completed: bool,
    ) -> Result<&Exercise, WellnessError> {
        let (routine, exercise) = self.exercise_index(routine_id, exercise_id)?;
        self.routines[routine].exercises[exercise].completed = completed;
        self.persist();
        Ok(&self.routines[routine].exercises[exercise])
    }

    pub fn delete_exercise(&mut self, routine_id: &str, exercise_id: &str) -> Result<(), WellnessError> {
        let (routine, exercise) = self.exercise_index(routine_id, exercise_id)?;
        self.routines[routine].exercises.remove(exercise);
        if self
            .timer
            .active()
            .is_some_and(|active| active.routine_id == routine_id && active.exercise_id == exercise_id)
        {
            self.timer.clear();
        }
        self.persist();
        Ok(())
    }

    /// Removes the routine and every exercise it owns.
    pub fn delete_routine(&mut self, routine_id: &str) -> Result<Routine, WellnessError> {
        let index = self.routine_index(routine_id)?;
        let removed = self.routines.remove(index);
        if self.timer.active().is_some_and(|active| active.routine_id == routine_id) {
            self.timer.clear();
        }
        self.persist();
        debug!(id = %removed.id, exercises = removed.exercises.len(), "routine deleted");
        Ok(removed)
    }

    pub fn reset_routine(&mut self, routine_id: &str) -> Result<&Routine, WellnessError> {
        let index = self.routine_index(routine_id)?;
        for exercise in &mut self.routines[index].exercises {
            exercise.completed = false;
        }
        self.persist();
        Ok(&self.routines[index])
    }

    pub fn timer(&self) -> TimerSnapshot {
        self.timer.snapshot()
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn start_timer(&mut self, routine_id: &str, exercise_id: &str) -> Result<TimerSnapshot, WellnessError> {
        let (routine, exercise) = self.exercise_index(routine_id, exercise_id)?;
        let exercise = &self.routines[routine].exercises[exercise];
        self.timer.start(ActiveExercise {
            routine_id: routine_id.to_string(),
            exercise_id: exercise.id.clone(),
            duration: exercise.duration,
        });
        debug!(routine_id, exercise_id, "exercise timer started");
        Ok(self.timer.snapshot())
    }

    pub fn toggle_timer(&mut self) -> Result<TimerSnapshot, WellnessError> {
        if self.timer.active().is_none() {
            return Err(WellnessError::NoActiveExercise);
        }
        self.timer.toggle();
        Ok(self.timer.snapshot())
    }

    pub fn reset_timer(&mut self) -> Result<TimerSnapshot, WellnessError> {
        if !self.timer.reset() {
            return Err(WellnessError::NoActiveExercise);
        }
        Ok(self.timer.snapshot())
    }

    /// One second elapsed. On reaching zero the exercise is marked completed
    /// and the timer returns to idle.
    pub fn tick_timer(&mut self) -> TickOutcome {
        if !self.timer.is_running() {
            return TickOutcome::Stopped;
        }
        let Some(done) = self.timer.tick() else {
            return TickOutcome::Running;
        };
        self.timer.clear();
        match self.toggle_exercise(&done.routine_id, &done.exercise_id, true) {
            Ok(exercise) => info!(exercise = %exercise.name, "exercise completed"),
            Err(err) => warn!("finished timer for a missing exercise: {err}"),
        }
        TickOutcome::Completed(done)
    }

    fn routine_index(&self, routine_id: &str) -> Result<usize, WellnessError> {
        self.routines
            .iter()
            .position(|routine| routine.id == routine_id)
            .ok_or_else(|| WellnessError::RoutineNotFound(routine_id.to_string()))
    }

    fn exercise_index(&self, routine_id: &str, exercise_id: &str) -> Result<(usize, usize), WellnessError> {
        let routine = self.routine_index(routine_id)?;
        let exercise = self.routines[routine]
            .exercises
            .iter()
            .position(|exercise| exercise.id == exercise_id)
            .ok_or_else(|| WellnessError::ExerciseNotFound(exercise_id.to_string()))?;
        Ok((routine, exercise))
    }

    fn persist(&self) {
        self.store.save(FITNESS_KEY, &self.routines);
    }
}

fn required(value: &str, field: &str) -> Result<String, WellnessError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(WellnessError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
