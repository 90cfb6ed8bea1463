//! Like/save state for the article being viewed.
//!
//! Flags are loaded from the backend when the view opens and afterwards only
//! change from the toggle endpoint's authoritative `{interaction_type, active}`
//! answer. A click never flips the icon on its own, so a failed request or a
//! change made from another tab cannot leave the icon out of step.

use crate::api::Backend;
use crate::error::ClientError;
use crate::models::{InteractionKind, InteractionStatus, ToggleRequest, ToggleResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionFlags {
    pub liked: bool,
    pub saved: bool,
}

impl InteractionFlags {
    pub fn get(&self, kind: InteractionKind) -> bool {
        match kind {
            InteractionKind::Like => self.liked,
            InteractionKind::Save => self.saved,
        }
    }

    /// Take the backend's answer for one interaction.
    pub fn apply(&mut self, result: &ToggleResult) {
        match result.interaction_type {
            InteractionKind::Like => self.liked = result.active,
            InteractionKind::Save => self.saved = result.active,
        }
    }
}

impl From<InteractionStatus> for InteractionFlags {
    fn from(status: InteractionStatus) -> Self {
        Self {
            liked: status.liked,
            saved: status.saved,
        }
    }
}

/// Interaction state for one article.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionToggle {
    pub article_id: i64,
    pub flags: InteractionFlags,
    pending_like: bool,
    pending_save: bool,
    /// A toggle was started, so the opening status answer is stale.
    touched: bool,
}

impl InteractionToggle {
    pub fn new(article_id: i64) -> Self {
        Self {
            article_id,
            flags: InteractionFlags::default(),
            pending_like: false,
            pending_save: false,
            touched: false,
        }
    }

    fn pending_mut(&mut self, kind: InteractionKind) -> &mut bool {
        match kind {
            InteractionKind::Like => &mut self.pending_like,
            InteractionKind::Save => &mut self.pending_save,
        }
    }

    pub fn is_pending(&self, kind: InteractionKind) -> bool {
        match kind {
            InteractionKind::Like => self.pending_like,
            InteractionKind::Save => self.pending_save,
        }
    }

    /// Take the status loaded when the view opened. Ignored once a toggle has
    /// been started. Returns whether it was applied.
    pub fn load(&mut self, flags: InteractionFlags) -> bool {
        if self.touched {
            tracing::debug!("Dropping stale interaction status for {}", self.article_id);
            return false;
        }
        self.flags = flags;
        true
    }

    /// Mark a toggle as in flight. `None` when one of the same kind already is.
    pub fn begin(&mut self, kind: InteractionKind) -> Option<ToggleRequest> {
        let pending = self.pending_mut(kind);
        if *pending {
            return None;
        }
        *pending = true;
        self.touched = true;
        Some(ToggleRequest {
            article_id: self.article_id,
            interaction_type: kind,
        })
    }

    /// Settle the in-flight toggle of `kind`. Errors leave the flags untouched.
    pub fn finish(
        &mut self,
        kind: InteractionKind,
        outcome: &Result<ToggleResult, ClientError>,
    ) -> InteractionFlags {
        *self.pending_mut(kind) = false;
        match outcome {
            Ok(result) => self.flags.apply(result),
            Err(e) => tracing::error!("Toggle interaction failed: {}", e),
        }
        self.flags
    }
}

/// Fetch current flags for `(user, article)`.
pub async fn load_flags<B: Backend>(
    backend: &B,
    user_id: &str,
    article_id: i64,
) -> Result<InteractionFlags, ClientError> {
    let status = backend.interaction_status(user_id, article_id).await?;
    Ok(status.into())
}

/// One full toggle round trip on an owned state.
pub async fn toggle<B: Backend>(
    backend: &B,
    token: &str,
    state: &mut InteractionToggle,
    kind: InteractionKind,
) -> InteractionFlags {
    let Some(request) = state.begin(kind) else {
        return state.flags;
    };
    let outcome = backend.toggle_interaction(token, &request).await;
    state.finish(kind, &outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBackend, Reply};

    fn result(kind: InteractionKind, active: bool) -> ToggleResult {
        ToggleResult {
            interaction_type: kind,
            active,
            new_count: None,
        }
    }

    #[tokio::test]
    async fn confirmed_like_is_filled_regardless_of_prior_state() {
        for prior in [false, true] {
            let backend = FakeBackend::new();
            backend.set_toggle(Reply::Ok(result(InteractionKind::Like, true)));
            let mut state = InteractionToggle::new(7);
            state.flags.liked = prior;

            let flags = toggle(&backend, "tok", &mut state, InteractionKind::Like).await;

            assert!(flags.liked);
            assert!(!state.is_pending(InteractionKind::Like));
        }
    }

    #[tokio::test]
    async fn failed_toggle_keeps_flags() {
        let backend = FakeBackend::new();
        backend.set_toggle(Reply::Status(500));
        let mut state = InteractionToggle::new(7);
        state.flags = InteractionFlags {
            liked: false,
            saved: true,
        };

        let flags = toggle(&backend, "tok", &mut state, InteractionKind::Save).await;

        assert_eq!(
            flags,
            InteractionFlags {
                liked: false,
                saved: true
            }
        );
    }

    #[tokio::test]
    async fn answer_for_other_kind_only_touches_that_kind() {
        let backend = FakeBackend::new();
        backend.set_toggle(Reply::Ok(result(InteractionKind::Save, false)));
        let mut state = InteractionToggle::new(1);
        state.flags = InteractionFlags {
            liked: true,
            saved: true,
        };

        let flags = toggle(&backend, "tok", &mut state, InteractionKind::Save).await;

        assert!(flags.liked);
        assert!(!flags.saved);
    }

    #[test]
    fn second_click_while_pending_is_ignored() {
        let mut state = InteractionToggle::new(3);
        assert!(state.begin(InteractionKind::Like).is_some());
        assert!(state.begin(InteractionKind::Like).is_none());
        state.finish(InteractionKind::Like, &Ok(result(InteractionKind::Like, true)));
        assert!(state.begin(InteractionKind::Like).is_some());
    }

    #[test]
    fn pending_is_tracked_per_kind() {
        let mut state = InteractionToggle::new(1);
        assert!(state.begin(InteractionKind::Like).is_some());
        assert!(state.begin(InteractionKind::Save).is_some());
        assert!(state.is_pending(InteractionKind::Like));
        assert!(state.begin(InteractionKind::Like).is_none());

        state.finish(InteractionKind::Save, &Ok(result(InteractionKind::Save, true)));
        assert!(state.is_pending(InteractionKind::Like));
        assert!(!state.is_pending(InteractionKind::Save));
        assert!(state.begin(InteractionKind::Like).is_none());

        state.finish(InteractionKind::Like, &Ok(result(InteractionKind::Like, true)));
        assert_eq!(
            state.flags,
            InteractionFlags {
                liked: true,
                saved: true
            }
        );
    }

    #[test]
    fn late_status_does_not_override_a_toggle() {
        let mut state = InteractionToggle::new(2);
        assert!(state.begin(InteractionKind::Save).is_some());
        state.finish(InteractionKind::Save, &Ok(result(InteractionKind::Save, true)));

        assert!(!state.load(InteractionFlags {
            liked: true,
            saved: false
        }));
        assert!(state.flags.saved);
        assert!(!state.flags.liked);
    }

    #[test]
    fn status_before_any_toggle_is_applied() {
        let mut state = InteractionToggle::new(2);
        assert!(state.load(InteractionFlags {
            liked: true,
            saved: false
        }));
        assert!(state.flags.liked);
    }

    #[tokio::test]
    async fn load_reads_status() {
        let backend = FakeBackend::new();
        backend.set_status(InteractionStatus {
            liked: true,
            saved: false,
        });
        let flags = load_flags(&backend, "5", 9).await.unwrap();
        assert!(flags.liked);
        assert!(!flags.saved);
        assert_eq!(backend.calls(), vec!["interaction_status".to_string()]);
    }
}
