//! Authentication state and route guards

pub mod guard;
pub mod state;

pub use guard::{enforce, guard, GuardDecision};
pub use state::{merge_user, AuthFailure, AuthSession, AuthState};
