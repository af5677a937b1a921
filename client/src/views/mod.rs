//! Page view controllers
//!
//! A view fetches everything it needs concurrently on load, holds the
//! result in memory and refetches after every mutation. Nothing is
//! mutated optimistically.
//!
//! # Design Principles
//!
//! 1. **All-or-nothing loads**: fetches are joined as a fixed set
//! 2. **Scoped responses**: a load that finishes after unmount or after a
//!    newer load started is dropped
//! 3. **Confirmed destruction**: deletes and status changes ask first and
//!    always refetch afterwards

pub mod activities;
pub mod dashboard;
pub mod diet;
pub mod fitness;
pub mod profile;
pub mod water;
pub mod workouts;

use crate::error::ClientError;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error};

pub use activities::{ActivityListView, AddActivityView, CategoryOptions};
pub use dashboard::{SkillupDashboard, SkillupDashboardView};
pub use diet::{DietPage, DietView};
pub use fitness::{FitnessDashboard, FitnessDashboardView};
pub use profile::{ProfileSummary, ProfileView};
pub use water::{WaterPage, WaterView};
pub use workouts::{PlanSummary, WorkoutsPage, WorkoutsView};

// ============================================================================
// Page state
// ============================================================================

/// Render state of a page
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Loading,
    Ready(T),
    /// Page-level banner text
    Failed(String),
}

impl<T> PageState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            PageState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn banner(&self) -> Option<&str> {
        match self {
            PageState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }
}

/// Result of a user-triggered mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The user declined the confirmation prompt
    Cancelled,
    Done,
    /// The call failed; the message is shown as a banner
    Failed(String),
}

impl ActionOutcome {
    fn from_result<T>(result: Result<T, ClientError>, action: &str) -> Self {
        match result {
            Ok(_) => ActionOutcome::Done,
            Err(e) => {
                error!(action, "Action failed: {}", e);
                ActionOutcome::Failed(e.banner())
            }
        }
    }
}

// ============================================================================
// Confirmation
// ============================================================================

/// Asks the user before a destructive action
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirms everything (non-interactive use)
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Declines everything
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeNo;

impl Confirm for AssumeNo {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

// ============================================================================
// View scope
// ============================================================================

/// Lifetime of a mounted view
///
/// Dropping the scope unmounts the view. Loads take a ticket when they
/// start and may only apply their result while the ticket is current.
#[derive(Debug)]
pub struct ViewScope {
    handle: ScopeHandle,
}

/// Shareable handle onto a `ViewScope`
#[derive(Debug, Clone)]
pub struct ScopeHandle {
    alive: Arc<AtomicBool>,
    generation: Arc<AtomicU64>,
}

/// Identifies one load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl ViewScope {
    pub fn new() -> Self {
        Self {
            handle: ScopeHandle {
                alive: Arc::new(AtomicBool::new(true)),
                generation: Arc::new(AtomicU64::new(0)),
            },
        }
    }

    pub fn handle(&self) -> ScopeHandle {
        self.handle.clone()
    }

    /// Start a load, superseding any earlier one
    pub fn begin(&self) -> LoadTicket {
        self.handle.begin()
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.handle.is_current(ticket)
    }

    /// Run a load and return its output only if it is still wanted
    pub async fn run<F, T>(&self, load: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let ticket = self.begin();
        let output = load.await;
        if self.is_current(ticket) {
            Some(output)
        } else {
            debug!("Discarding stale load result");
            None
        }
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.handle.unmount();
    }
}

impl ScopeHandle {
    pub fn begin(&self) -> LoadTicket {
        LoadTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.alive.load(Ordering::SeqCst) && self.generation.load(Ordering::SeqCst) == ticket.0
    }

    pub fn is_mounted(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    pub fn unmount(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

/// Turn a load result into page state, logging failures
pub(crate) fn settle<T>(result: Result<T, ClientError>, page: &str) -> PageState<T> {
    match result {
        Ok(data) => PageState::Ready(data),
        Err(e) => {
            error!(page, "Failed to load page: {}", e);
            PageState::Failed(e.banner())
        }
    }
}
