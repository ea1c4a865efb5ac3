use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Excited,
    Stressed,
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown mood '{0}'. Expected one of: happy, neutral, sad, excited, stressed")]
pub struct UnknownMood(pub String);

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Neutral,
        Mood::Sad,
        Mood::Excited,
        Mood::Stressed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Excited => "excited",
            Mood::Stressed => "stressed",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Neutral => "😐",
            Mood::Sad => "😢",
            Mood::Excited => "🎉",
            Mood::Stressed => "😓",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == normalized)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub content: String,
    #[serde(default, deserialize_with = "lenient_mood")]
    pub mood: Option<Mood>,
    #[serde(deserialize_with = "flexible_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// First line of the content, for one-line listings.
    pub fn headline(&self) -> &str {
        if !self.title.trim().is_empty() {
            return self.title.trim();
        }
        self.content.lines().next().unwrap_or("").trim()
    }
}

/// Request body for creating or updating an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryDraft {
    pub title: String,
    pub content: String,
    pub mood: Option<Mood>,
}

impl EntryDraft {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            content: content.into(),
            mood: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_mood(mut self, mood: Option<Mood>) -> Self {
        self.mood = mood;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntryPage {
    pub items: Vec<Entry>,
    pub total: u64,
    pub has_more: bool,
}

/// Entries grouped under their `yyyy-MM-dd` date key.
///
/// Dates without entries have no key at all; [`EntriesByDate::on`] returns an
/// empty slice for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntriesByDate(BTreeMap<String, Vec<Entry>>);

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

impl EntriesByDate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_key(date: NaiveDate) -> String {
        date.format(DATE_KEY_FORMAT).to_string()
    }

    /// Groups entries by the UTC date of `created_at`, the way the service does.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut grouped = Self::new();
        for entry in entries {
            let date = entry.created_at.date_naive();
            grouped.insert(date, entry);
        }
        grouped
    }

    pub fn insert(&mut self, date: NaiveDate, entry: Entry) {
        self.0.entry(Self::date_key(date)).or_default().push(entry);
    }

    pub fn on(&self, date: NaiveDate) -> &[Entry] {
        self.0
            .get(&Self::date_key(date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.on(date).len()
    }

    pub fn has_entries(&self, date: NaiveDate) -> bool {
        self.count_on(date) > 0
    }

    /// Number of dates that carry at least one entry.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_entries(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Entry])> {
        self.0.iter().map(|(key, entries)| (key.as_str(), entries.as_slice()))
    }

    /// Drops keys that are unparseable, empty, or outside `start..=end`.
    /// Returns how many keys were dropped.
    pub fn retain_within(&mut self, start: NaiveDate, end: NaiveDate) -> usize {
        let before = self.0.len();
        self.0.retain(|key, entries| {
            !entries.is_empty()
                && NaiveDate::parse_from_str(key, DATE_KEY_FORMAT)
                    .map(|date| date >= start && date <= end)
                    .unwrap_or(false)
        });
        before - self.0.len()
    }
}

fn lenient_mood<'de, D>(deserializer: D) -> Result<Option<Mood>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

fn flexible_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Accepts RFC 3339, or a naive ISO datetime taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("Invalid timestamp: {}", raw))
}
