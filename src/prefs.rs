//! Persisted preferences and high score
//!
//! Three string keys in the platform store: a one-time consent flag,
//! the mute preference (stored as a JSON bool) and the best score so
//! far. Read once at startup; written on the triggering event.

use crate::platform::KeyValueStore;

/// Preferences loaded at startup and kept in sync with the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Prefs {
    pub consent_accepted: bool,
    pub muted: bool,
    pub high_score: u64,
}

impl Prefs {
    const CONSENT_KEY: &'static str = "soarscape_policy_accepted";
    const HIGH_SCORE_KEY: &'static str = "soarscape_highscore";
    const MUTE_KEY: &'static str = "soarscape_muted";

    /// Load all three flags; anything missing or unparseable falls
    /// back to the default
    pub fn load(store: &impl KeyValueStore) -> Self {
        let consent_accepted = store.get(Self::CONSENT_KEY).is_some();
        let high_score = store
            .get(Self::HIGH_SCORE_KEY)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0);
        let muted = store
            .get(Self::MUTE_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or(false);
        Self {
            consent_accepted,
            muted,
            high_score,
        }
    }

    /// Persist the one-time consent acknowledgment
    pub fn accept_consent(&mut self, store: &mut impl KeyValueStore) {
        self.consent_accepted = true;
        store.set(Self::CONSENT_KEY, "true");
    }

    /// Persist a mute change
    pub fn set_muted(&mut self, muted: bool, store: &mut impl KeyValueStore) {
        self.muted = muted;
        if let Ok(raw) = serde_json::to_string(&muted) {
            store.set(Self::MUTE_KEY, &raw);
        }
    }

    /// Record a session score. The stored high score is overwritten
    /// only when strictly exceeded; returns true in that case.
    pub fn record_score(&mut self, score: u64, store: &mut impl KeyValueStore) -> bool {
        if score > self.high_score {
            self.high_score = score;
            store.set(Self::HIGH_SCORE_KEY, &score.to_string());
            log::info!("new high score: {score}");
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_defaults_when_empty() {
        let store = MemoryStore::new();
        let prefs = Prefs::load(&store);
        assert_eq!(prefs, Prefs::default());
    }

    #[test]
    fn test_consent_persists() {
        let mut store = MemoryStore::new();
        let mut prefs = Prefs::load(&store);
        prefs.accept_consent(&mut store);
        assert!(Prefs::load(&store).consent_accepted);
    }

    #[test]
    fn test_mute_roundtrip() {
        let mut store = MemoryStore::new();
        let mut prefs = Prefs::load(&store);
        prefs.set_muted(true, &mut store);
        assert!(Prefs::load(&store).muted);
        prefs.set_muted(false, &mut store);
        assert!(!Prefs::load(&store).muted);
    }

    #[test]
    fn test_high_score_only_overwritten_when_exceeded() {
        let mut store = MemoryStore::new();
        let mut prefs = Prefs::load(&store);
        assert!(prefs.record_score(300, &mut store));
        // A later, lower score leaves the stored value alone
        let mut prefs = Prefs::load(&store);
        assert_eq!(prefs.high_score, 300);
        assert!(!prefs.record_score(150, &mut store));
        assert_eq!(Prefs::load(&store).high_score, 300);
        // An equal score does not rewrite either
        assert!(!prefs.record_score(300, &mut store));
    }

    #[test]
    fn test_garbage_values_fall_back() {
        let mut store = MemoryStore::new();
        store.set("soarscape_highscore", "not-a-number");
        store.set("soarscape_muted", "{broken");
        let prefs = Prefs::load(&store);
        assert_eq!(prefs.high_score, 0);
        assert!(!prefs.muted);
    }
}
