use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepEntry {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    /// Seconds.
    pub duration: u32,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    pub id: String,
    pub name: String,
    pub exercises: Vec<Exercise>,
}

impl Routine {
    pub fn completed_count(&self) -> usize {
        self.exercises.iter().filter(|exercise| exercise.completed).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    Neutral,
    Bad,
    Terrible,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Great,
        Mood::Good,
        Mood::Neutral,
        Mood::Bad,
        Mood::Terrible,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Great => "Great",
            Mood::Good => "Good",
            Mood::Neutral => "Neutral",
            Mood::Bad => "Bad",
            Mood::Terrible => "Terrible",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Great => "😄",
            Mood::Good => "🙂",
            Mood::Neutral => "😐",
            Mood::Bad => "😕",
            Mood::Terrible => "😢",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub mood: Mood,
    pub content: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SleepRequest {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub hours: f64,
}

#[derive(Debug, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ExerciseRequest {
    pub name: String,
    #[serde(default = "default_exercise_duration")]
    pub duration: u32,
}

fn default_exercise_duration() -> u32 {
    60
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct TimerStartRequest {
    pub routine_id: String,
    pub exercise_id: String,
}

#[derive(Debug, Deserialize)]
pub struct JournalRequest {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub mood: Mood,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Form posts from the dashboard page; tags arrive comma separated.
#[derive(Debug, Deserialize)]
pub struct JournalForm {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub mood: Mood,
    pub content: String,
    #[serde(default)]
    pub tags: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct JournalQuery {
    #[serde(default)]
    pub q: String,
    pub tag: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SleepChartPoint {
    pub date: String,
    pub hours: f64,
}

#[derive(Debug, Serialize)]
pub struct SleepOverview {
    pub history: Vec<SleepEntry>,
    pub chart: Vec<SleepChartPoint>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MoodCount {
    pub mood: Mood,
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    pub sleep: usize,
    pub journal: usize,
    pub fitness: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub score: u8,
    pub label: &'static str,
    pub streaks: Streaks,
    pub quote: Quote,
}

/// Dates are written as `YYYY-MM-DD`. Reading also accepts full RFC 3339
/// timestamps, keeping the calendar day in local time.
pub mod iso_date {
    use chrono::{DateTime, Local, NaiveDate, TimeZone};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date `{raw}`")))
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        parse_in(raw, &Local)
    }

    pub fn parse_in<Tz: TimeZone>(raw: &str, zone: &Tz) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, FORMAT).ok().or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|stamp| stamp.with_timezone(zone).date_naive())
        })
    }
}
