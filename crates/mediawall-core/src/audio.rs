//! Audio policy: exactly one audible window.
//!
//! Slot 0 keeps its sound. Every other window gets a one-shot mute of its
//! current media elements plus a `MutationObserver` that mutes players the
//! page inserts later (the streaming app adds them lazily after search).

use serde_json::json;
use tracing::debug;

use crate::driver::script;
use crate::error::StepError;
use crate::session::WallSession;

/// The slot whose window is allowed to play sound.
pub const AUDIBLE_SLOT: usize = 0;

const MUTE_BODY: &str = r#"
    const mute = (el) => { el.muted = true; el.volume = 0; };
    const sweep = (node) => {
        if (!node || node.nodeType !== 1) return;
        if (node.matches('audio, video')) mute(node);
        node.querySelectorAll('audio, video').forEach(mute);
    };
    document.querySelectorAll('audio, video').forEach(mute);
    if (!window.__mediawallMuteObserver) {
        const observer = new MutationObserver((records) => {
            for (const record of records) record.addedNodes.forEach(sweep);
        });
        observer.observe(document.documentElement, { childList: true, subtree: true });
        document.addEventListener('volumechange', (e) => {
            const el = e.target;
            if (el && (el.muted === false || el.volume > 0)) mute(el);
        }, true);
        window.__mediawallMuteObserver = observer;
    }
    return document.querySelectorAll('audio, video').length;
"#;

/// Mute enforcement across the wall.
pub struct AudioPolicy;

impl AudioPolicy {
    /// Whether `slot` may play sound.
    pub fn is_audible(slot: usize) -> bool {
        slot == AUDIBLE_SLOT
    }

    /// Mute every audio/video element in the session, now and in future.
    ///
    /// Safe to repeat: the observer is installed once per document.
    /// Returns how many media elements were present.
    pub async fn mute_all_media(session: &dyn WallSession) -> Result<u64, StepError> {
        let source = script("mediawallMute", MUTE_BODY, json!({}));
        let count = session.evaluate(&source).await?.as_u64().unwrap_or(0);
        debug!(slot = session.slot(), media = count, "Muted media elements");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePage;

    #[test]
    fn test_only_slot_zero_is_audible() {
        assert!(AudioPolicy::is_audible(0));
        for slot in 1..4 {
            assert!(!AudioPolicy::is_audible(slot));
        }
    }

    #[tokio::test]
    async fn test_mute_existing_and_future_media() {
        let (session, page) = FakePage::default().into_session(1);
        page.lock().add_media();
        page.lock().add_media();

        let count = AudioPolicy::mute_all_media(&session).await.unwrap();
        assert_eq!(count, 2);
        assert!(page.lock().media.iter().all(|m| m.muted && m.volume == 0.0));

        page.lock().add_media();
        assert!(page.lock().media.iter().all(|m| m.muted && m.volume == 0.0));
    }

    #[tokio::test]
    async fn test_mute_is_idempotent() {
        let (session, page) = FakePage::default().into_session(2);
        page.lock().add_media();

        AudioPolicy::mute_all_media(&session).await.unwrap();
        AudioPolicy::mute_all_media(&session).await.unwrap();

        let page = page.lock();
        assert_eq!(page.observers_installed, 1);
        assert!(page.media.iter().all(|m| m.muted));
    }

    #[tokio::test]
    async fn test_media_added_before_mute_stays_audible_without_policy() {
        let (_session, page) = FakePage::default().into_session(0);
        page.lock().add_media();
        assert!(!page.lock().media[0].muted);
    }

    #[tokio::test]
    async fn test_mute_on_dead_session() {
        let (session, page) = FakePage::default().into_session(3);
        page.lock().alive = false;
        let err = AudioPolicy::mute_all_media(&session).await.unwrap_err();
        assert!(matches!(err, StepError::DriverDead(_)));
    }
}
