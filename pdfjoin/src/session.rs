//! Session controller: owns the current selection and its merge lifecycle.
//!
//! ```text
//!            select(n > 0)             merge()
//!   Empty ───────────────▶ Ready ───────────────▶ Merging
//!     ▲                    ▲   ▲                 │     │
//!     │       edit/reset   │   │   edit/reset    │ ok  │ err
//!     └──────── (n = 0) ───┘   └── Done ◀────────┘     │
//!                              └── Failed ◀────────────┘
//! ```
//!
//! All reads (`state`, `len`, `snapshot`) are available at any time. Edits
//! and new selections are rejected with [`PdfJoinError::MergeInProgress`]
//! while a merge runs. A merge only starts from `Ready`; in any other state
//! [`SessionController::merge`] returns [`MergeOutcome::Rejected`] without
//! doing anything.
//!
//! After `Done` or `Failed`, the next edit (or [`SessionController::reset`])
//! returns the session to `Ready`, or `Empty` if nothing is selected.

use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::collection::{OrderedCollection, Permutation};
use crate::document::{MergedOutput, SourceDocument};
use crate::error::{PdfJoinError, Result};
use crate::io::SelectionSource;
use crate::merge::{MergeEngine, Merger};
use crate::sort::{SortDirection, SortPolicy};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeState {
    /// Nothing selected.
    Empty,
    /// At least one document selected; a merge may start.
    Ready,
    /// A merge is running.
    Merging,
    /// The last merge produced an output.
    Done,
    /// The last merge failed.
    Failed,
}

impl MergeState {
    /// State of an idle session holding `len` documents.
    pub fn settled(len: usize) -> Self {
        if len == 0 { Self::Empty } else { Self::Ready }
    }

    /// Whether a merge is running.
    pub fn is_busy(self) -> bool {
        self == Self::Merging
    }

    /// Whether a merge may start from this state.
    pub fn can_merge(self) -> bool {
        self == Self::Ready
    }
}

impl fmt::Display for MergeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Empty => "empty",
            Self::Ready => "ready",
            Self::Merging => "merging",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Result of a call to [`SessionController::merge`].
#[derive(Debug)]
pub enum MergeOutcome {
    /// The merge ran and produced an output.
    Completed(MergedOutput),
    /// The merge was not started; `state` is the state that prevented it.
    Rejected {
        /// Session state at the time of the call.
        state: MergeState,
    },
}

impl MergeOutcome {
    /// The output, if the merge ran.
    pub fn into_output(self) -> Option<MergedOutput> {
        match self {
            Self::Completed(output) => Some(output),
            Self::Rejected { .. } => None,
        }
    }
}

struct Inner {
    state: MergeState,
    documents: OrderedCollection<SourceDocument>,
}

/// Shared handle to a merge session.
///
/// Clones refer to the same session.
pub struct SessionController<E = Merger> {
    inner: Arc<Mutex<Inner>>,
    engine: Arc<E>,
    state_tx: Arc<watch::Sender<MergeState>>,
}

impl<E> Clone for SessionController<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            engine: Arc::clone(&self.engine),
            state_tx: Arc::clone(&self.state_tx),
        }
    }
}

impl SessionController<Merger> {
    /// Create an empty session using the default [`Merger`].
    pub fn new() -> Self {
        Self::with_engine(Merger::new())
    }
}

impl Default for SessionController<Merger> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: MergeEngine> SessionController<E> {
    /// Create an empty session driven by `engine`.
    pub fn with_engine(engine: E) -> Self {
        let (state_tx, _) = watch::channel(MergeState::Empty);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: MergeState::Empty,
                documents: OrderedCollection::default(),
            })),
            engine: Arc::new(engine),
            state_tx: Arc::new(state_tx),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, inner: &mut Inner, state: MergeState) {
        publish(&self.state_tx, inner, state);
    }

    /// Replace the collection through `change`, unless a merge is running.
    ///
    /// If `change` fails, the collection and state are left untouched.
    fn update<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&OrderedCollection<SourceDocument>) -> Result<OrderedCollection<SourceDocument>>,
    {
        let mut inner = self.lock();
        if inner.state.is_busy() {
            return Err(PdfJoinError::MergeInProgress);
        }
        let documents = change(&inner.documents)?;
        let state = MergeState::settled(documents.len());
        inner.documents = documents;
        self.transition(&mut inner, state);
        Ok(())
    }

    /// Current state.
    pub fn state(&self) -> MergeState {
        self.lock().state
    }

    /// Whether a merge is running.
    pub fn is_busy(&self) -> bool {
        self.state().is_busy()
    }

    /// Number of selected documents.
    pub fn len(&self) -> usize {
        self.lock().documents.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The current order. The returned snapshot never changes.
    pub fn snapshot(&self) -> OrderedCollection<SourceDocument> {
        self.lock().documents.clone()
    }

    /// Names of the selected documents, in order.
    pub fn names(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|document| document.name().to_string())
            .collect()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<MergeState> {
        self.state_tx.subscribe()
    }

    /// Replace the selection with `documents`, in the given order.
    ///
    /// # Errors
    ///
    /// `MergeInProgress` while merging.
    pub fn select(&self, documents: Vec<SourceDocument>) -> Result<()> {
        let count = documents.len();
        self.update(move |_| Ok(OrderedCollection::from(documents)))?;
        info!(documents = count, "selection replaced");
        Ok(())
    }

    /// Read a new selection from `source` and install it.
    ///
    /// Nothing changes if reading fails.
    pub async fn select_from<S>(&self, source: &S) -> Result<usize>
    where
        S: SelectionSource,
    {
        if self.is_busy() {
            return Err(PdfJoinError::MergeInProgress);
        }
        let documents = source.select().await?;
        let count = documents.len();
        self.select(documents)?;
        Ok(count)
    }

    /// Move the document at `old_index` to `new_index`.
    ///
    /// # Errors
    ///
    /// `InvalidPermutation` for an out-of-range index, `MergeInProgress`
    /// while merging.
    pub fn move_document(&self, old_index: usize, new_index: usize) -> Result<()> {
        self.update(|documents| documents.move_item(old_index, new_index))?;
        debug!(from = old_index, to = new_index, "document moved");
        Ok(())
    }

    /// Reorder the selection so position `i` holds the document previously
    /// at `order[i]`.
    pub fn reorder(&self, order: &[usize]) -> Result<()> {
        self.update(|documents| documents.replace_order(order))
    }

    /// Apply `permutation` to the selection.
    pub fn apply(&self, permutation: &Permutation) -> Result<()> {
        self.update(|documents| documents.apply(permutation))
    }

    /// Sort the selection by name.
    pub fn sort(&self, direction: SortDirection) -> Result<()> {
        let policy = SortPolicy::new(direction);
        self.update(|documents| Ok(documents.sorted_by(|a, b| policy.compare(a.name(), b.name()))))?;
        debug!(%direction, "selection sorted");
        Ok(())
    }

    /// Remove the document at `index`.
    pub fn remove(&self, index: usize) -> Result<()> {
        self.update(|documents| documents.without(index))
    }

    /// Clear a finished merge's `Done` or `Failed` state.
    ///
    /// Has no effect in other states.
    pub fn reset(&self) {
        let mut inner = self.lock();
        if matches!(inner.state, MergeState::Done | MergeState::Failed) {
            let state = MergeState::settled(inner.documents.len());
            self.transition(&mut inner, state);
        }
    }

    /// Merge the current order.
    ///
    /// The order is captured when the merge starts; edits are rejected
    /// until it finishes. On success the session moves to `Done`, on
    /// failure to `Failed` and the error is returned.
    ///
    /// # Errors
    ///
    /// Whatever the engine reports. Calling this in any state but `Ready`
    /// is not an error; it returns [`MergeOutcome::Rejected`].
    pub async fn merge(&self) -> Result<MergeOutcome> {
        let snapshot = {
            let mut inner = self.lock();
            if !inner.state.can_merge() {
                warn!(state = %inner.state, "merge request ignored");
                return Ok(MergeOutcome::Rejected { state: inner.state });
            }
            self.transition(&mut inner, MergeState::Merging);
            inner.documents.clone()
        };

        info!(documents = snapshot.len(), "merge started");
        let engine = Arc::clone(&self.engine);
        let mut settle = Settle {
            inner: Arc::clone(&self.inner),
            state_tx: Arc::clone(&self.state_tx),
            state: MergeState::Failed,
        };

        // The worker settles the state itself, so a caller that stops
        // polling cannot leave the session in `Merging`.
        let result = tokio::task::spawn_blocking(move || {
            let documents: Vec<SourceDocument> = snapshot.iter().cloned().collect();
            let result = engine.merge(&documents);
            match &result {
                Ok(_) => settle.state = MergeState::Done,
                Err(e) => warn!(error = %e, "merge failed"),
            }
            drop(settle);
            result
        })
        .await
        .map_err(|e| PdfJoinError::other(format!("Merge task failed: {e}")))
        .and_then(|result| result);

        result.map(MergeOutcome::Completed)
    }
}

fn publish(state_tx: &watch::Sender<MergeState>, inner: &mut Inner, state: MergeState) {
    if inner.state != state {
        debug!(from = %inner.state, to = %state, "session state change");
    }
    inner.state = state;
    state_tx.send_replace(state);
}

/// Ends a running merge when dropped, including when the engine panics.
struct Settle {
    inner: Arc<Mutex<Inner>>,
    state_tx: Arc<watch::Sender<MergeState>>,
    state: MergeState,
}

impl Drop for Settle {
    fn drop(&mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        publish(&self.state_tx, &mut inner, self.state);
    }
}
