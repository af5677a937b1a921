//! Profile page with body metrics

use super::PageState;
use crate::auth::AuthSession;
use crate::error::ClientResult;
use tracker_shared::health_metrics::{body_metrics, BodyMetrics};
use tracker_shared::models::User;
use tracker_shared::types::ProfileUpdate;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary {
    pub user: User,
    pub metrics: BodyMetrics,
}

impl ProfileSummary {
    pub fn of(user: &User) -> Self {
        Self {
            user: user.clone(),
            metrics: body_metrics(user),
        }
    }
}

/// The profile page reads and writes through the auth session
#[derive(Debug, Default)]
pub struct ProfileView {
    state: Option<PageState<ProfileSummary>>,
}

impl ProfileView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&PageState<ProfileSummary>> {
        self.state.as_ref()
    }

    /// Re-fetch the profile
    pub async fn load(&mut self, session: &mut AuthSession) -> &PageState<ProfileSummary> {
        let state = super::settle(
            session.refresh_profile().await.map(ProfileSummary::of),
            "profile",
        );
        self.state.insert(state)
    }

    /// Save changed fields; the merged user replaces the session's
    pub async fn save(
        &mut self,
        session: &mut AuthSession,
        update: &ProfileUpdate,
    ) -> ClientResult<ProfileSummary> {
        let summary = ProfileSummary::of(session.update_profile(update).await?);
        self.state = Some(PageState::Ready(summary.clone()));
        Ok(summary)
    }
}
