use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{EntryStore, StoreError};
use crate::journal::{Entry, EntryDraft, EntryPage, EntriesByDate};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Journal service client. The bearer token is fixed at construction.
pub struct HttpEntryStore {
    base_url: String,
    access_token: Option<String>,
    client: reqwest::Client,
}

impl HttpEntryStore {
    pub fn new(base_url: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, StoreError> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

async fn ensure_success(response: Response, subject: &str) -> Result<Response, StoreError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        tracing::error!("Authentication rejected for {}", subject);
        return Err(StoreError::Unauthorized);
    }

    if status == StatusCode::NOT_FOUND {
        tracing::error!("Not found: {}", subject);
        return Err(StoreError::NotFound(subject.to_string()));
    }

    if !status.is_success() {
        let body = response.text().await?;
        tracing::error!("Request for {} failed. Status: {}, Body: {}", subject, status, body);
        return Err(StoreError::RequestError(format!("Status {}: {}", status, body)));
    }

    Ok(response)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| StoreError::ParseError(e.to_string()))
}

#[async_trait]
impl EntryStore for HttpEntryStore {
    async fn list_entries_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<EntriesByDate, StoreError> {
        let start_date = EntriesByDate::date_key(start);
        let end_date = EntriesByDate::date_key(end);

        tracing::info!("Fetching entries from {} to {}", start_date, end_date);

        let response = self
            .authorized(self.client.get(self.url("entries/calendar/")))
            .query(&[("start_date", start_date.as_str()), ("end_date", end_date.as_str())])
            .send()
            .await?;

        tracing::debug!("Calendar entries response status: {}", response.status());

        let response = ensure_success(response, "calendar entries").await?;
        let entries: EntriesByDate = read_json(response).await?;

        tracing::info!(
            "Fetched {} entries across {} days",
            entries.total_entries(),
            entries.len()
        );
        Ok(entries)
    }

    async fn list_entries(&self, page: u32, page_size: u32) -> Result<EntryPage, StoreError> {
        let page = page.max(1).to_string();
        let page_size = page_size.max(1).to_string();

        let response = self
            .authorized(self.client.get(self.url("entries/")))
            .query(&[("page", page.as_str()), ("page_size", page_size.as_str())])
            .send()
            .await?;

        let response = ensure_success(response, "entry list").await?;
        let listing: EntryPage = read_json(response).await?;

        tracing::info!("Fetched page {} with {} of {} entries", page, listing.items.len(), listing.total);
        Ok(listing)
    }

    async fn create_entry(&self, draft: &EntryDraft) -> Result<Entry, StoreError> {
        tracing::info!("Creating entry ({} chars)", draft.content.len());

        let response = self
            .authorized(self.client.post(self.url("entries/")))
            .json(draft)
            .send()
            .await?;

        let response = ensure_success(response, "new entry").await?;
        let created: Entry = read_json(response).await?;

        tracing::info!("Entry created with ID: {}", created.id);
        Ok(created)
    }

    async fn update_entry(&self, id: i64, draft: &EntryDraft) -> Result<Entry, StoreError> {
        tracing::info!("Updating entry {}", id);

        let response = self
            .authorized(self.client.put(self.url(&format!("entries/{}", id))))
            .json(draft)
            .send()
            .await?;

        let response = ensure_success(response, &format!("entry {}", id)).await?;
        let updated: Entry = read_json(response).await?;

        tracing::info!("Entry {} updated successfully", id);
        Ok(updated)
    }

    async fn delete_entry(&self, id: i64) -> Result<(), StoreError> {
        let response = self
            .authorized(self.client.delete(self.url(&format!("entries/{}", id))))
            .send()
            .await?;

        ensure_success(response, &format!("entry {}", id)).await?;

        tracing::info!("Entry {} deleted", id);
        Ok(())
    }
}
