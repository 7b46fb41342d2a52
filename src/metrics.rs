//! Derived numbers for the dashboard. Everything here is recomputed from the
//! collections on each read and nothing is cached.

use crate::models::{JournalEntry, Quote, Routine, SleepEntry, Streaks};
use chrono::{Datelike, Local, NaiveDate};

const BASE_SCORE: i64 = 65;
const SLEEP_WINDOW: usize = 7;

pub fn wellness_score(sleep: &[SleepEntry], journal: &[JournalEntry], routines: &[Routine]) -> u8 {
    let mut total = BASE_SCORE;

    if let Some(avg) = recent_sleep_average(sleep) {
        if (7.0..=9.0).contains(&avg) {
            total += 15;
        } else if (6.0..7.0).contains(&avg) {
            total += 10;
        }
    }

    total += (journal.len() as i64 * 2).min(10);

    // Only the first routine counts, even when later ones have progress.
    if let Some(primary) = routines.first() {
        total += (primary.completed_count() as i64).min(10);
    }

    total.clamp(0, 100) as u8
}

/// Mean hours over the seven most recent entries.
pub fn recent_sleep_average(sleep: &[SleepEntry]) -> Option<f64> {
    if sleep.is_empty() {
        return None;
    }
    let mut recent: Vec<&SleepEntry> = sleep.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(SLEEP_WINDOW);
    let sum: f64 = recent.iter().map(|entry| entry.hours).sum();
    Some(sum / recent.len() as f64)
}

pub fn score_label(score: u8) -> &'static str {
    match score {
        80.. => "Excellent",
        60..=79 => "Good",
        40..=59 => "Fair",
        _ => "Needs Improvement",
    }
}

/// Bounded record counts shown as progress bars, not consecutive-day runs.
pub fn streaks(sleep: &[SleepEntry], journal: &[JournalEntry], routines: &[Routine]) -> Streaks {
    let any_completed = routines
        .iter()
        .any(|routine| routine.exercises.iter().any(|exercise| exercise.completed));

    Streaks {
        sleep: sleep.len().min(7),
        journal: journal.len().min(5),
        fitness: if any_completed { 3 } else { 0 },
    }
}

const QUOTES: [Quote; 7] = [
    Quote {
        text: "The only bad workout is the one that didn't happen.",
        author: "Unknown",
    },
    Quote {
        text: "Sleep is the golden chain that ties health and our bodies together.",
        author: "Thomas Dekker",
    },
    Quote {
        text: "Take care of your body. It's the only place you have to live.",
        author: "Jim Rohn",
    },
    Quote {
        text: "Mental health is not a destination, but a process.",
        author: "Noam Shpancer",
    },
    Quote {
        text: "Your body hears everything your mind says.",
        author: "Naomi Judd",
    },
    Quote {
        text: "The greatest wealth is health.",
        author: "Virgil",
    },
    Quote {
        text: "Wellness is the complete integration of body, mind, and spirit.",
        author: "Greg Anderson",
    },
];

pub fn daily_quote() -> Quote {
    daily_quote_at(Local::now().date_naive())
}

pub fn daily_quote_at(today: NaiveDate) -> Quote {
    QUOTES[today.ordinal0() as usize % QUOTES.len()]
}
