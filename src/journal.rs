use crate::errors::WellnessError;
use crate::models::{JournalEntry, Mood, MoodCount};
use crate::seed;
use crate::storage::{JOURNAL_KEY, Store};
use chrono::{Local, NaiveDate};
use std::collections::BTreeSet;
use tracing::{debug, info};
use uuid::Uuid;

/// Mood journal, one entry per calendar day.
pub struct JournalBook {
    store: Store,
    entries: Vec<JournalEntry>,
}

impl JournalBook {
    pub fn load(store: Store) -> Self {
        Self::load_at(store, Local::now().date_naive())
    }

    pub fn load_at(store: Store, today: NaiveDate) -> Self {
        let entries = match store.load::<JournalEntry>(JOURNAL_KEY) {
            Some(entries) => dedupe_by_date(entries),
            None => {
                let entries = seed::sample_journal(today);
                info!(count = entries.len(), "seeding sample journal entries");
                store.save(JOURNAL_KEY, &entries);
                entries
            }
        };
        Self { store, entries }
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Writes the entry for `date`. An existing entry for that day keeps its id.
    pub fn upsert_entry(
        &mut self,
        date: NaiveDate,
        mood: Mood,
        content: &str,
        tags: Vec<String>,
    ) -> Result<&JournalEntry, WellnessError> {
        if content.trim().is_empty() {
            return Err(WellnessError::validation("journal content is required"));
        }
        let tags = normalize_tags(tags);

        let index = match self.entries.iter().position(|entry| entry.date == date) {
            Some(index) => {
                let entry = &mut self.entries[index];
                entry.mood = mood;
                entry.content = content.to_string();
                entry.tags = tags;
                index
            }
            None => {
                self.entries.push(JournalEntry {
                    id: Uuid::new_v4().to_string(),
                    date,
                    mood,
                    content: content.to_string(),
                    tags,
                });
                self.entries.len() - 1
            }
        };
        debug!(%date, ?mood, "journal entry recorded");

        self.store.save(JOURNAL_KEY, &self.entries);
        Ok(&self.entries[index])
    }

    /// Entries whose content contains `term` or that carry a tag equal to
    /// `term` (both case-insensitive), restricted to entries tagged exactly
    /// `tag` when given. Newest first.
    pub fn search(&self, term: &str, tag: Option<&str>) -> Vec<JournalEntry> {
        let needle = term.to_lowercase();
        let mut found: Vec<JournalEntry> = self
            .entries
            .iter()
            .filter(|entry| {
                term.is_empty()
                    || entry.content.to_lowercase().contains(&needle)
                    || entry.tags.iter().any(|t| t.to_lowercase() == needle)
            })
            .filter(|entry| tag.is_none_or(|wanted| entry.tags.iter().any(|t| t == wanted)))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        found
    }

    pub fn distinct_tags(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .flat_map(|entry| entry.tags.iter().cloned())
            .collect()
    }

    /// Entry count per mood, from great to terrible.
    pub fn mood_stats(&self) -> Vec<MoodCount> {
        Mood::ALL
            .iter()
            .map(|mood| MoodCount {
                mood: *mood,
                name: mood.label().to_string(),
                value: self.entries.iter().filter(|entry| entry.mood == *mood).count(),
            })
            .collect()
    }
}

/// Keeps the last record seen for each date under the first-seen id.
fn dedupe_by_date(entries: Vec<JournalEntry>) -> Vec<JournalEntry> {
    let mut unique: Vec<JournalEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match unique.iter_mut().find(|kept| kept.date == entry.date) {
            Some(kept) => {
                kept.mood = entry.mood;
                kept.content = entry.content;
                kept.tags = entry.tags;
            }
            None => unique.push(entry),
        }
    }
    unique
}

/// Trims, drops blanks and repeats, keeps first-seen order.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !kept.iter().any(|existing| existing == tag) {
            kept.push(tag.to_string());
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 20).unwrap()
    }

    fn seeded() -> (Arc<MemoryStore>, JournalBook) {
        let port = Arc::new(MemoryStore::new());
        let book = JournalBook::load_at(Store::new(port.clone()), today());
        (port, book)
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn search_by_term_finds_work_entry() {
        let (_port, book) = seeded();
        let found = book.search("work", None);
        assert_eq!(found.len(), 1);
        assert!(found[0].content.starts_with("Had a productive day"));
        assert_eq!(found[0].tags, tags(&["work", "productivity"]));
    }

    #[test]
    fn empty_search_returns_all_newest_first() {
        let (_port, book) = seeded();
        let ids: Vec<_> = book.search("", None).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }

    #[test]
    fn term_matches_tags_only_by_equality() {
        let (_port, book) = seeded();
        assert_eq!(book.search("OUTDOORS", None).len(), 1);
        assert!(book.search("outdo", None).is_empty());
        assert_eq!(book.search("walk", None)[0].id, "2");
    }

    #[test]
    fn tag_filter_is_exact_and_combines_with_term() {
        let (_port, book) = seeded();
        assert_eq!(book.search("", Some("routine")).len(), 1);
        assert!(book.search("", Some("Routine")).is_empty());
        assert!(book.search("walk", Some("routine")).is_empty());
    }

    #[test]
    fn upsert_same_day_keeps_id() {
        let (port, mut book) = seeded();
        let date = today() - chrono::Duration::days(4);
        let entry = book
            .upsert_entry(date, Mood::Bad, "Rainy afternoon", tags(&["weather", " weather ", ""]))
            .unwrap()
            .clone();

        assert_eq!(entry.id, "2");
        assert_eq!(entry.mood, Mood::Bad);
        assert_eq!(entry.tags, tags(&["weather"]));
        assert_eq!(book.entries().len(), 3);

        let stored: Vec<JournalEntry> = serde_json::from_str(&port.raw(JOURNAL_KEY).unwrap()).unwrap();
        assert_eq!(stored, book.entries());
    }

    #[test]
    fn new_day_appends_entry() {
        let (_port, mut book) = seeded();
        let entry = book
            .upsert_entry(today(), Mood::Great, "Slept well", Vec::new())
            .unwrap()
            .clone();
        assert_eq!(book.entries().len(), 4);
        assert_eq!(book.search("", None)[0].id, entry.id);
    }

    #[test]
    fn blank_content_is_rejected() {
        let (_port, mut book) = seeded();
        assert!(book.upsert_entry(today(), Mood::Good, "  \n", Vec::new()).is_err());
        assert_eq!(book.entries().len(), 3);
    }

    #[test]
    fn distinct_tags_and_mood_stats() {
        let (_port, book) = seeded();
        let all: Vec<_> = book.distinct_tags().into_iter().collect();
        assert_eq!(all, tags(&["exercise", "outdoors", "productivity", "routine", "work"]));

        let counts: Vec<_> = book.mood_stats().iter().map(|m| (m.mood, m.value)).collect();
        assert_eq!(
            counts,
            vec![
                (Mood::Great, 1),
                (Mood::Good, 1),
                (Mood::Neutral, 1),
                (Mood::Bad, 0),
                (Mood::Terrible, 0),
            ]
        );
    }

    #[test]
    fn whitespace_term_is_a_real_search() {
        let (_port, book) = seeded();
        assert_eq!(book.search(" ", None).len(), 3);
        assert!(book.search("   ", None).is_empty());
    }

    #[test]
    fn reload_drops_duplicate_days() {
        let stamp = |hour| {
            Local
                .with_ymd_and_hms(2026, 2, 1, hour, 0, 0)
                .earliest()
                .unwrap()
                .to_rfc3339()
        };
        let raw = serde_json::json!([
            {"id": "a", "date": stamp(6), "mood": "bad", "content": "morning", "tags": ["early"]},
            {"id": "b", "date": stamp(20), "mood": "good", "content": "evening", "tags": ["late"]},
        ]);
        let port = Arc::new(MemoryStore::new());
        port.insert_raw(JOURNAL_KEY, &raw.to_string());

        let mut book = JournalBook::load_at(Store::new(port.clone()), today());
        let day = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        assert_eq!(book.entries().len(), 1);
        assert_eq!(book.entries()[0].id, "a");
        assert_eq!(book.entries()[0].content, "evening");
        assert_eq!(book.entries()[0].tags, tags(&["late"]));

        book.upsert_entry(day, Mood::Great, "rewrite", Vec::new()).unwrap();
        let contents: Vec<_> = book.search("", None).into_iter().map(|e| e.content).collect();
        assert_eq!(contents, vec!["rewrite"]);

        let stored: Vec<JournalEntry> = serde_json::from_str(&port.raw(JOURNAL_KEY).unwrap()).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "a");
    }

    #[test]
    fn malformed_snapshot_reseeds_and_writes_back() {
        let port = Arc::new(MemoryStore::new());
        port.insert_raw(JOURNAL_KEY, r#"[{"id":"x","date":"someday"}]"#);

        let book = JournalBook::load_at(Store::new(port.clone()), today());
        assert_eq!(book.entries().len(), 3);
        assert_eq!(book.search("work", None).len(), 1);

        let stored: Vec<JournalEntry> = serde_json::from_str(&port.raw(JOURNAL_KEY).unwrap()).unwrap();
        assert_eq!(stored, book.entries());
    }
}
