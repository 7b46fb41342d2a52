//! Sample collections written on first load, when nothing is stored yet.

use crate::models::{Exercise, JournalEntry, Mood, Routine, SleepEntry};
use chrono::{Duration, NaiveDate};

const SAMPLE_SLEEP_HOURS: [f64; 7] = [7.5, 6.8, 8.2, 7.1, 6.4, 8.6, 7.7];

/// One entry per day for the seven days ending on `today`, newest first.
pub fn sample_sleep(today: NaiveDate) -> Vec<SleepEntry> {
    SAMPLE_SLEEP_HOURS
        .iter()
        .enumerate()
        .map(|(offset, hours)| SleepEntry {
            date: today - Duration::days(offset as i64),
            hours: *hours,
        })
        .collect()
}

pub fn sample_routines() -> Vec<Routine> {
    let exercise = |id: &str, name: &str, duration: u32| Exercise {
        id: id.to_string(),
        name: name.to_string(),
        duration,
        completed: false,
    };

    vec![Routine {
        id: "sample-routine".to_string(),
        name: "Full Body Workout".to_string(),
        exercises: vec![
            exercise("ex1", "Push-ups", 60),
            exercise("ex2", "Squats", 45),
            exercise("ex3", "Plank", 30),
            exercise("ex4", "Jumping Jacks", 60),
        ],
    }]
}

pub fn sample_journal(today: NaiveDate) -> Vec<JournalEntry> {
    let entry = |id: &str, days_ago: i64, mood: Mood, content: &str, tags: &[&str]| JournalEntry {
        id: id.to_string(),
        date: today - Duration::days(days_ago),
        mood,
        content: content.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    };

    vec![
        entry(
            "1",
            6,
            Mood::Good,
            "Had a productive day at work. Feeling accomplished.",
            &["work", "productivity"],
        ),
        entry(
            "2",
            4,
            Mood::Great,
            "Went for a long walk and felt very refreshed afterward.",
            &["exercise", "outdoors"],
        ),
        entry(
            "3",
            2,
            Mood::Neutral,
            "Average day. Nothing special happened.",
            &["routine"],
        ),
    ]
}
