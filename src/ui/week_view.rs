use chrono::NaiveDate;

use crate::journal::{Entry, Mood};
use crate::navigator::{CalendarNavigator, DateRange};

const EXCERPT_LINES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub range: DateRange,
    pub days: Vec<DayColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub is_selected: bool,
    pub is_cursor: bool,
    pub is_today: bool,
    pub entries: Vec<EntryCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryCard {
    pub entry_id: i64,
    pub headline: String,
    pub excerpt: Vec<String>,
    pub mood: Option<Mood>,
}

impl EntryCard {
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            entry_id: entry.id,
            headline: entry.headline().to_string(),
            excerpt: entry
                .content
                .lines()
                .filter(|line| !line.trim().is_empty())
                .take(EXCERPT_LINES)
                .map(|line| line.trim().to_string())
                .collect(),
            mood: entry.mood,
        }
    }
}

pub fn calculate_layout(navigator: &CalendarNavigator, cursor: NaiveDate, today: NaiveDate) -> WeekLayout {
    let range = navigator.range();
    let entries = navigator.entries();
    let selected = navigator.selected_date();

    let days = range
        .days()
        .map(|date| DayColumn {
            date,
            is_selected: selected == Some(date),
            is_cursor: date == cursor,
            is_today: date == today,
            entries: entries.on(date).iter().map(EntryCard::from_entry).collect(),
        })
        .collect();

    WeekLayout { range, days }
}
