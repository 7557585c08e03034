//! The query console: one instance per user session.
//!
//! `QueryConsole` wires the stages together: schema directory → selection
//! state → query synthesis → execution → rendering. Data flows strictly
//! forward; a user edit at any stage resets everything derived downstream.
//!
//! ## Reactive State
//!
//! Every mutation broadcasts an immutable [`ConsoleSnapshot`] over
//! `tokio::sync::watch`; downstream consumers subscribe instead of
//! recomputing implicitly. Mutation = notification.
//!
//! ## Supersession
//!
//! Remote responses apply in completion order. Each field load and each
//! execution captures a generation counter before awaiting; a response
//! whose counter no longer matches is discarded, notices included. There
//! is no cancellation API - "cancellation" is ignoring late results.

use crate::directory::SchemaDirectory;
use crate::render::{attach_links, derive_columns, sort_rows};
use crate::selection::SelectionState;
use crate::services::{with_deadline, BasePathLinker, LinkResolver, Notifier, RecordService};
use crate::synthesize::synthesize_query;
use parking_lot::RwLock;
use quarry_core::{
    ColumnSpec, ConsoleConfig, ConsoleError, EntityType, FieldName, Notice, ResultSet, RowLimit,
    ServiceError, SortDirection, SortKey,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Success toast after an execution with rows.
const EXECUTED_MESSAGE: &str = "Query executed successfully.";

/// Info toast after an execution with zero rows.
const NO_RECORDS_MESSAGE: &str = "No records found.";

/// Fallback when a remote failure carries no message.
const EXECUTION_FALLBACK_MESSAGE: &str = "Query failed.";

// =============================================================================
// Snapshot
// =============================================================================

/// Immutable view of the console, broadcast after every mutation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsoleSnapshot {
    /// Selected entity, if any.
    pub entity: Option<EntityType>,

    /// Selected fields, in pick order.
    pub selected_fields: Vec<FieldName>,

    /// Current result limit.
    pub limit: RowLimit,

    /// Entity-picker filter text.
    pub search_filter: String,

    /// Fields available on the selected entity.
    pub available_fields: Vec<FieldName>,

    /// Current query text (synthesized or manually edited).
    pub query: String,

    /// Rows and columns of the last execution.
    pub results: ResultSet,

    /// Display columns for the last execution.
    pub columns: Vec<ColumnSpec>,

    /// Message of the last execution failure, if any.
    pub error: Option<String>,

    /// The last applied sort, if any.
    pub sort: Option<SortKey>,
}

// =============================================================================
// Inner State
// =============================================================================

struct ConsoleState {
    selection: SelectionState,
    available_fields: Vec<FieldName>,
    query: String,
    results: ResultSet,
    columns: Vec<ColumnSpec>,
    error: Option<String>,
    sort: Option<SortKey>,
    /// Bumped on each entity selection; stale field listings are discarded.
    entity_epoch: u64,
    /// Bumped on each execution (and on resets); stale responses are
    /// discarded.
    query_epoch: u64,
}

impl ConsoleState {
    fn new(selection: SelectionState) -> Self {
        Self {
            selection,
            available_fields: Vec::new(),
            query: String::new(),
            results: ResultSet::default(),
            columns: Vec::new(),
            error: None,
            sort: None,
            entity_epoch: 0,
            query_epoch: 0,
        }
    }

    fn snapshot(&self) -> ConsoleSnapshot {
        ConsoleSnapshot {
            entity: self.selection.entity().cloned(),
            selected_fields: self.selection.fields().to_vec(),
            limit: self.selection.limit(),
            search_filter: self.selection.search_filter().to_string(),
            available_fields: self.available_fields.clone(),
            query: self.query.clone(),
            results: self.results.clone(),
            columns: self.columns.clone(),
            error: self.error.clone(),
            sort: self.sort.clone(),
        }
    }

    /// Re-derive the query from selection state, discarding manual edits.
    fn regenerate_query(&mut self) {
        self.query = synthesize_query(
            self.selection.entity(),
            self.selection.fields(),
            self.selection.limit(),
        );
    }

    /// Drop everything derived from a previous execution.
    fn clear_results(&mut self) {
        self.results = ResultSet::default();
        self.columns.clear();
        self.error = None;
        self.sort = None;
    }
}

// =============================================================================
// Query Console
// =============================================================================

/// The ad-hoc query console engine.
///
/// Owns its selection and result state exclusively; instances share
/// nothing. All methods take `&self` - state lives behind a
/// `parking_lot::RwLock` so in-flight responses can be checked against the
/// current generation when they complete.
pub struct QueryConsole {
    service: Arc<dyn RecordService>,
    notifier: Arc<dyn Notifier>,
    resolver: Arc<dyn LinkResolver>,
    directory: SchemaDirectory,
    timeout: Duration,
    inner: RwLock<ConsoleState>,
    tx: watch::Sender<ConsoleSnapshot>,
    rx: watch::Receiver<ConsoleSnapshot>,
}

impl QueryConsole {
    /// Create a console with default configuration.
    pub fn new(service: Arc<dyn RecordService>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_config(service, notifier, ConsoleConfig::default())
    }

    /// Create a console with explicit configuration.
    pub fn with_config(
        service: Arc<dyn RecordService>,
        notifier: Arc<dyn Notifier>,
        config: ConsoleConfig,
    ) -> Self {
        let timeout = config.service_timeout();
        let state = ConsoleState::new(SelectionState::new(config.default_limit));
        let (tx, rx) = watch::channel(state.snapshot());
        Self {
            directory: SchemaDirectory::new(service.clone(), timeout),
            service,
            notifier,
            resolver: Arc::new(BasePathLinker::new(config.link_base)),
            timeout,
            inner: RwLock::new(state),
            tx,
            rx,
        }
    }

    /// Replace the link resolver.
    pub fn with_link_resolver(mut self, resolver: Arc<dyn LinkResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Subscribe to state changes. Clone the receiver for each subscriber.
    pub fn subscribe(&self) -> watch::Receiver<ConsoleSnapshot> {
        self.rx.clone()
    }

    /// Take a snapshot of the current state.
    pub fn snapshot(&self) -> ConsoleSnapshot {
        self.inner.read().snapshot()
    }

    // =========================================================================
    // Schema Directory
    // =========================================================================

    /// Load (or return the cached) entity listing.
    ///
    /// On failure the listing degrades to empty and an error notice is
    /// raised; re-opening the picker retries.
    pub async fn load_entities(&self) -> Vec<EntityType> {
        match self.directory.load_entities().await {
            Ok(entities) => entities,
            Err(err) => {
                tracing::warn!(%err, "Entity listing failed");
                self.notifier.notify(Notice::error(err.to_string()));
                Vec::new()
            }
        }
    }

    /// Set the entity-picker filter text.
    pub fn set_search_filter(&self, term: impl Into<String>) {
        self.update(|state| state.selection.set_search_filter(term.into()));
    }

    /// The cached entity listing narrowed by the current filter text.
    pub fn filtered_entities(&self) -> Vec<EntityType> {
        let term = self.inner.read().selection.search_filter().to_string();
        self.directory.filter(&term)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select an entity and load its fields.
    ///
    /// Everything downstream - field selection, query, results, columns,
    /// error - resets *before* the field fetch resolves, so stale field
    /// names never outlive their entity. A field listing that completes
    /// after a newer selection is discarded.
    pub async fn select_entity(&self, entity: impl Into<EntityType>) {
        let entity = entity.into();
        let epoch = {
            let mut state = self.inner.write();
            state.entity_epoch += 1;
            state.query_epoch += 1; // in-flight executions are now stale
            state.selection.set_entity(Some(entity.clone()));
            state.available_fields.clear();
            state.query.clear();
            state.clear_results();
            state.entity_epoch
        };
        self.broadcast();
        tracing::debug!(entity = %entity, "Selected entity");

        match self.directory.load_fields(&entity).await {
            Ok(fields) => {
                let applied = {
                    let mut state = self.inner.write();
                    if state.entity_epoch == epoch {
                        state.available_fields = fields;
                        true
                    } else {
                        false
                    }
                };
                if applied {
                    self.broadcast();
                } else {
                    tracing::debug!(entity = %entity, "Discarded stale field listing");
                }
            }
            Err(err) => {
                let stale = self.inner.read().entity_epoch != epoch;
                if stale {
                    tracing::debug!(entity = %entity, "Discarded stale field-listing failure");
                } else {
                    tracing::warn!(entity = %entity, %err, "Field listing failed");
                    self.notifier.notify(Notice::error(err.to_string()));
                }
            }
        }
    }

    /// Replace the field selection wholesale and regenerate the query.
    pub fn set_fields(&self, fields: Vec<FieldName>) {
        self.update(|state| {
            state.selection.set_fields(fields);
            state.regenerate_query();
        });
    }

    /// Toggle one field and regenerate the query.
    pub fn toggle_field(&self, field: impl Into<FieldName>) {
        let field = field.into();
        self.update(|state| {
            state.selection.toggle_field(field);
            state.regenerate_query();
        });
    }

    /// Set the result limit from a raw row count and regenerate the query.
    ///
    /// Out-of-set magnitudes are rejected silently: no state change, no
    /// notice.
    pub fn set_limit_rows(&self, rows: u32) {
        let changed = {
            let mut state = self.inner.write();
            if state.selection.set_limit_rows(rows) {
                state.regenerate_query();
                true
            } else {
                tracing::debug!(rows, "Ignored out-of-set row limit");
                false
            }
        };
        if changed {
            self.broadcast();
        }
    }

    // =========================================================================
    // Query
    // =========================================================================

    /// Overwrite the query text manually.
    ///
    /// The edit survives until the next entity/field/limit change, which
    /// regenerates the query and silently discards it (last writer wins).
    pub fn edit_query(&self, text: impl Into<String>) {
        self.update(|state| state.query = text.into());
    }

    /// Execute the current query.
    ///
    /// A blank query is rejected locally with an error notice; no remote
    /// call is made. Otherwise previous results clear before submission,
    /// and the response - rows, zero rows, or failure - is applied only if
    /// no newer execution (or reset) has started since.
    pub async fn execute(&self) {
        let (query, epoch) = {
            let mut state = self.inner.write();
            state.query_epoch += 1;
            (state.query.trim().to_string(), state.query_epoch)
        };

        if query.is_empty() {
            self.notifier
                .notify(Notice::error(ConsoleError::EmptyQuery.to_string()));
            return;
        }

        self.update(|state| state.clear_results());
        tracing::debug!(%query, "Executing query");

        let outcome = with_deadline(self.timeout, self.service.execute_query(query.clone())).await;

        let notice = {
            let mut state = self.inner.write();
            if state.query_epoch != epoch {
                tracing::debug!(%query, "Discarded superseded query response");
                return;
            }
            match outcome {
                Ok(set) if !set.is_empty() => {
                    tracing::debug!(rows = set.len(), "Query returned rows");
                    let rows = attach_links(set.rows, self.resolver.as_ref());
                    state.columns = derive_columns(&set.columns, state.selection.fields());
                    state.results = ResultSet::new(rows, set.columns);
                    Notice::success(EXECUTED_MESSAGE)
                }
                Ok(_) => {
                    tracing::debug!("Query returned no rows");
                    Notice::info(NO_RECORDS_MESSAGE)
                }
                Err(err) => {
                    let message = execution_failure_message(err);
                    tracing::warn!(%query, error = %message, "Query execution failed");
                    state.error = Some(message.clone());
                    Notice::error(message)
                }
            }
        };

        self.broadcast();
        self.notifier.notify(notice);
    }

    // =========================================================================
    // Results
    // =========================================================================

    /// Stable-sort the current rows by one field.
    ///
    /// Reorders rows only; columns and unrelated row fields are untouched.
    pub fn sort_by(&self, field: impl Into<String>, direction: SortDirection) {
        let field = field.into();
        self.update(|state| {
            state.results.rows = sort_rows(&state.results.rows, &field, direction);
            tracing::debug!(field = %field, ?direction, "Sorted rows");
            state.sort = Some(SortKey { field, direction });
        });
    }

    /// Reset every selection and result. The session entity cache stays.
    pub fn clear(&self) {
        self.update(|state| {
            state.entity_epoch += 1;
            state.query_epoch += 1;
            state.selection.set_entity(None);
            state.selection.set_search_filter(String::new());
            state.available_fields.clear();
            state.query.clear();
            state.clear_results();
        });
        tracing::debug!("Cleared console state");
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Mutate state under the lock, then broadcast the new snapshot.
    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut ConsoleState),
    {
        let snapshot = {
            let mut state = self.inner.write();
            f(&mut state);
            state.snapshot()
        };
        let _ = self.tx.send(snapshot);
    }

    fn broadcast(&self) {
        let snapshot = self.inner.read().snapshot();
        let _ = self.tx.send(snapshot);
    }
}

/// The user-facing message for an execution failure: the remote message
/// verbatim, or a generic fallback when it carries none.
fn execution_failure_message(err: ServiceError) -> String {
    match err {
        ServiceError::Execution { message } if message.trim().is_empty() => {
            EXECUTION_FALLBACK_MESSAGE.to_string()
        }
        ServiceError::Execution { message } => message,
        other => other.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================
