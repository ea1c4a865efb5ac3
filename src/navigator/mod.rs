//! Calendar date-range and view-mode model.
//!
//! Every state change issues a [`FetchRequest`] tagged with a generation
//! number. Fetches may resolve in any order; only the outcome of the most
//! recently issued request is applied, earlier ones are dropped as stale.

pub mod range;
pub mod state;

use chrono::NaiveDate;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::journal::EntriesByDate;
use crate::store::{EntryStore, StoreError};

pub use range::DateRange;
pub use state::{compute_range, CalendarState, Direction, InvalidDirection, ViewMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub range: DateRange,
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub request: FetchRequest,
    pub result: Result<EntriesByDate, StoreError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Replaced { dates: usize },
    Stale,
    Failed,
}

/// Transient, non-fatal message for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub raised_at: Instant,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            raised_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.raised_at.elapsed() >= ttl
    }
}

pub struct CalendarNavigator {
    store: Arc<dyn EntryStore>,
    state: CalendarState,
    entries: EntriesByDate,
    entries_range: Option<DateRange>,
    issued: u64,
    settled: u64,
    notice: Option<Notice>,
}

impl CalendarNavigator {
    pub fn new(store: Arc<dyn EntryStore>, today: NaiveDate) -> Self {
        Self {
            store,
            state: CalendarState::new(today),
            entries: EntriesByDate::new(),
            entries_range: None,
            issued: 0,
            settled: 0,
            notice: None,
        }
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.view_mode()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.state.selected_date()
    }

    pub fn range(&self) -> DateRange {
        compute_range(&self.state)
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        self.range().days().collect()
    }

    pub fn entries(&self) -> &EntriesByDate {
        &self.entries
    }

    /// Range the currently held entries were fetched for. Differs from
    /// [`Self::range`] while a fetch is pending or after a failed one.
    pub fn entries_range(&self) -> Option<DateRange> {
        self.entries_range
    }

    pub fn is_loading(&self) -> bool {
        self.settled != self.issued
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Drops the notice once it has been shown for `ttl`.
    pub fn expire_notice(&mut self, ttl: Duration) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(ttl)) {
            self.notice = None;
        }
    }

    pub fn navigate(&mut self, direction: Direction) -> FetchRequest {
        self.state.navigate(direction);
        self.issue()
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> FetchRequest {
        self.state.set_view_mode(mode);
        self.issue()
    }

    pub fn select_date(&mut self, day: NaiveDate) -> FetchRequest {
        self.state.select_date(day);
        self.issue()
    }

    pub fn jump_to_today(&mut self, today: NaiveDate) -> FetchRequest {
        self.state.jump_to(today);
        self.issue()
    }

    /// Re-requests the current range without changing state.
    pub fn reload(&mut self) -> FetchRequest {
        self.issue()
    }

    fn issue(&mut self) -> FetchRequest {
        self.issued += 1;
        let request = FetchRequest {
            generation: self.issued,
            range: self.range(),
        };
        tracing::debug!(
            "Issued fetch #{} for {} view, {} to {}",
            request.generation,
            self.state.view_mode(),
            request.range.start,
            request.range.end
        );
        request
    }

    /// Future that performs `request` against the store. It owns everything
    /// it needs, so callers may spawn it.
    pub fn fetch(&self, request: FetchRequest) -> impl Future<Output = FetchOutcome> + Send + use<> {
        let store = Arc::clone(&self.store);
        async move {
            let result = store
                .list_entries_in_range(request.range.start, request.range.end)
                .await;
            FetchOutcome { request, result }
        }
    }

    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        let FetchOutcome { request, result } = outcome;

        if request.generation != self.issued {
            tracing::debug!(
                "Discarding stale fetch #{} (latest is #{})",
                request.generation,
                self.issued
            );
            return Applied::Stale;
        }

        self.settled = request.generation;

        match result {
            Ok(mut entries) => {
                let dropped = entries.retain_within(request.range.start, request.range.end);
                if dropped > 0 {
                    tracing::debug!("Dropped {} date keys outside the requested range", dropped);
                }
                let dates = entries.len();
                self.entries = entries;
                self.entries_range = Some(request.range);
                Applied::Replaced { dates }
            }
            Err(e) => {
                tracing::warn!("Failed to fetch entries: {}", e);
                self.notice = Some(Notice::new(format!("Could not load entries: {}", e)));
                Applied::Failed
            }
        }
    }

    /// Fetches the current range and applies the result in one step.
    pub async fn refresh(&mut self) -> Applied {
        let request = self.reload();
        let outcome = self.fetch(request).await;
        self.apply(outcome)
    }
}
