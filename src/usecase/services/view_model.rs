use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::entities::query::{QueryController, QueryState};
use crate::usecase::ports::source::{RowSource, SourceError};

/// How long search input must stay unchanged before the projection reruns.
pub const SEARCH_SETTLE: Duration = Duration::from_millis(250);

/// Immutable snapshot of a screen's result set. Only ever replaced whole.
#[derive(Debug, Clone)]
pub struct RowStore<R> {
    rows: Arc<[R]>,
}

impl<R> Default for RowStore<R> {
    fn default() -> Self {
        Self {
            rows: Arc::from(Vec::new()),
        }
    }
}

impl<R> RowStore<R> {
    pub fn rows(&self) -> &Arc<[R]> {
        &self.rows
    }

    fn replace(&mut self, rows: Vec<R>) {
        self.rows = Arc::from(rows);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Issued per fetch. Only the newest ticket of a live view may write state.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    seq: u64,
    token: CancellationToken,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Issued per search keystroke. Only the newest one may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied(usize),
    Stale,
    Unmounted,
    Failed(String),
}

/// Everything one management view owns: its rows, its query and its fetch guard.
#[derive(Debug)]
pub struct ViewModel<R> {
    store: RowStore<R>,
    query: QueryController,
    load: LoadState,
    latest_seq: u64,
    token: CancellationToken,
    search_draft: String,
    search_seq: u64,
}

impl<R> Default for ViewModel<R> {
    fn default() -> Self {
        Self::new(QueryState::default())
    }
}

impl<R> ViewModel<R> {
    pub fn new(query: QueryState) -> Self {
        let search_draft = query.search_text.clone();
        Self {
            store: RowStore::default(),
            query: QueryController::new(query),
            load: LoadState::Idle,
            latest_seq: 0,
            token: CancellationToken::new(),
            search_draft,
            search_seq: 0,
        }
    }

    pub fn store(&self) -> &RowStore<R> {
        &self.store
    }

    pub fn query(&self) -> &QueryState {
        self.query.state()
    }

    pub fn query_mut(&mut self) -> &mut QueryController {
        &mut self.query
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// Text in the search box, which may be ahead of the committed query.
    pub fn search_draft(&self) -> &str {
        &self.search_draft
    }

    /// Records typed search text without touching the query.
    pub fn stage_search(&mut self, text: impl Into<String>) -> SearchTicket {
        self.search_draft = text.into();
        self.search_seq += 1;
        SearchTicket(self.search_seq)
    }

    /// Applies the staged text if nothing was typed since `ticket` was issued.
    pub fn commit_search(&mut self, ticket: SearchTicket) -> bool {
        if ticket.0 != self.search_seq || self.is_unmounted() {
            return false;
        }
        let text = self.search_draft.clone();
        self.query.set_search_text(text)
    }

    pub fn is_unmounted(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Starts a fetch, superseding any fetch still in flight.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        if !self.is_unmounted() {
            self.load = LoadState::Loading;
        }
        debug!(seq = self.latest_seq, "fetch started");
        FetchTicket {
            seq: self.latest_seq,
            token: self.token.child_token(),
        }
    }

    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<R>, SourceError>,
    ) -> FetchOutcome {
        if ticket.is_cancelled() || self.is_unmounted() {
            debug!(seq = ticket.seq, "dropping fetch result for torn-down view");
            return FetchOutcome::Unmounted;
        }
        if ticket.seq != self.latest_seq {
            warn!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale fetch result"
            );
            return FetchOutcome::Stale;
        }
        match result {
            Ok(rows) => {
                let count = rows.len();
                self.store.replace(rows);
                self.load = LoadState::Loaded;
                debug!(seq = ticket.seq, rows = count, "row store replaced");
                FetchOutcome::Applied(count)
            }
            Err(SourceError::Cancelled) => {
                self.load = LoadState::Idle;
                FetchOutcome::Unmounted
            }
            Err(err) => {
                warn!(seq = ticket.seq, error = %err, "fetch failed");
                let message = err.to_string();
                self.load = LoadState::Failed(message.clone());
                FetchOutcome::Failed(message)
            }
        }
    }

    /// Tears the view down; in-flight fetches can no longer write.
    pub fn unmount(&mut self) {
        self.token.cancel();
    }
}

/// Runs the fetch unless the ticket's view is torn down first.
pub async fn load_rows<R>(
    source: &dyn RowSource<R>,
    ticket: &FetchTicket,
) -> Result<Vec<R>, SourceError> {
    tokio::select! {
        _ = ticket.token.cancelled() => Err(SourceError::Cancelled),
        result = source.fetch_all() => result,
    }
}
