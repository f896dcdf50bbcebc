//! Application state shared between the fetch completion handler, the key
//! handler and the renderer.
//!
//! [`Store`] is the long-lived, shared part: the fetched profile, the loading
//! flag and the active theme. [`ProfileView`] is owned by the view and only
//! remembers how the last profile fetch failed.

use crate::feeds::{FetchFailure, Profile, ProfileError, RateLimit};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Store {
    profile: Option<Profile>,
    loading: bool,
    theme: String,
}

impl Store {
    /// Starts in the loading state with no profile.
    pub fn new(theme: String) -> Self {
        Self {
            profile: None,
            loading: true,
            theme,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_theme(&mut self, theme: String) {
        debug!(%theme, "theme changed");
        self.theme = theme;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileView {
    pub error: Option<ProfileError>,
    pub rate_limit: Option<RateLimit>,
}

impl ProfileView {
    pub fn reset(&mut self) {
        self.error = None;
        self.rate_limit = None;
    }
}

/// The one place a profile fetch result lands. Loading is cleared on every
/// path.
pub fn complete_profile_fetch(
    store: &mut Store,
    view: &mut ProfileView,
    outcome: Result<Profile, FetchFailure>,
) {
    view.reset();
    match outcome {
        Ok(profile) => store.set_profile(profile),
        Err(failure) => {
            view.error = Some(failure.error);
            view.rate_limit = failure.rate_limit;
        }
    }
    store.set_loading(false);
}
