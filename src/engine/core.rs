use std::sync::Arc;

use thiserror::Error;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::{FetchError, HistoryCache, KeyValueStore, LabSeqClient, Transport};
use crate::domain::{DisplayMode, HistoryEntry, IndexInputError, SequenceResult, parse_index};
use crate::models::{ChartPoint, project};
use crate::ui::{ApiStatus, ViewState};

use super::generation::RequestGeneration;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Invalid(#[from] IndexInputError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// A newer lookup was started before this one finished
    #[error("Superseded by a newer request")]
    Stale,
}

/// A lookup that has passed validation and been issued a generation ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingLookup {
    pub index: u64,
    ticket: u64,
}

/// Ties the request adapter, the history cache and the view state together.
pub struct LabSeqEngine<T: Transport, S: KeyValueStore> {
    /// Shared so a lookup can run on a spawned task between begin and complete
    client: Arc<LabSeqClient<T>>,
    history: HistoryCache<S>,
    view: ViewState,
    generation: RequestGeneration,
}

impl<T: Transport, S: KeyValueStore> LabSeqEngine<T, S> {
    /// Build the engine and restore saved history. Never fails: unreadable
    /// history just starts empty.
    pub fn new(client: LabSeqClient<T>, history: HistoryCache<S>) -> Self {
        let mut engine = Self {
            client: Arc::new(client),
            history,
            view: ViewState::default(),
            generation: RequestGeneration::default(),
        };
        engine.history.restore();
        engine
    }

    // --- ACCESSORS ---

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.list()
    }

    pub fn history_entry(&self, index: u64) -> Option<&HistoryEntry> {
        self.history.get(index)
    }

    pub fn chart_points(&self) -> Vec<ChartPoint> {
        project(self.history.list())
    }

    pub fn client(&self) -> Arc<LabSeqClient<T>> {
        Arc::clone(&self.client)
    }

    // --- VIEW TRANSITIONS ---

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.view = std::mem::take(&mut self.view).with_display_mode(mode);
    }

    pub fn toggle_chart(&mut self) {
        self.view = std::mem::take(&mut self.view).with_chart_toggled();
    }

    pub fn reset(&mut self) {
        self.view = std::mem::take(&mut self.view).reset();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub async fn check_api_health(&mut self) -> ApiStatus {
        let status = match self.client.check_health().await {
            Ok(health) if health.is_up() => ApiStatus::Connected,
            Ok(health) => {
                log::warn!("{} reports status {}", health.service, health.status);
                ApiStatus::Disconnected
            }
            Err(e) => {
                log::warn!("Health check failed: {}", e.message.replace('\n', " "));
                ApiStatus::Disconnected
            }
        };
        self.view = std::mem::take(&mut self.view).with_api_status(status);
        status
    }

    // --- LOOKUPS ---

    /// Validate and look up `input`, record a success in history.
    pub async fn calculate(&mut self, input: &str) -> Result<SequenceResult, EngineError> {
        let pending = self.begin_lookup(input)?;
        let outcome = self.client.fetch_result(pending.index).await;
        self.complete_lookup(pending, outcome)
    }

    /// Re-run a lookup for an index picked from the history list.
    pub async fn load_from_history(&mut self, index: u64) -> Result<SequenceResult, EngineError> {
        self.calculate(&index.to_string()).await
    }

    /// First half of a lookup: validation happens here, before anything is
    /// sent. Starting a lookup makes every earlier pending one stale.
    pub fn begin_lookup(&mut self, input: &str) -> Result<PendingLookup, EngineError> {
        let index = match parse_index(input) {
            Ok(index) => index,
            Err(e) => {
                self.view = std::mem::take(&mut self.view).with_error(e.to_string());
                return Err(e.into());
            }
        };
        let ticket = self.generation.advance();
        self.view = std::mem::take(&mut self.view).loading();
        Ok(PendingLookup { index, ticket })
    }

    /// Second half: apply the outcome unless a newer lookup has begun.
    pub fn complete_lookup(
        &mut self,
        pending: PendingLookup,
        outcome: Result<SequenceResult, FetchError>,
    ) -> Result<SequenceResult, EngineError> {
        if !self.generation.is_current(pending.ticket) {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_generation_drops {
                log::info!(
                    "Dropping reply for LabSeq({}): ticket {} behind {}",
                    pending.index,
                    pending.ticket,
                    self.generation.current()
                );
            }
            return Err(EngineError::Stale);
        }

        match outcome {
            Ok(result) => {
                log::info!("{}", result);
                self.history.record(result.clone());
                self.view = std::mem::take(&mut self.view).with_result(result.clone());
                Ok(result)
            }
            Err(e) => {
                self.view = std::mem::take(&mut self.view).with_error(e.message.clone());
                Err(e.into())
            }
        }
    }
}
