use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpoilerLevel {
    /// Hints at the lineup without naming bottles.
    Semi,
    /// Gives the whole lineup away.
    Major,
}

impl SpoilerLevel {
    pub const fn key(self) -> &'static str {
        use SpoilerLevel::*;
        match self {
            Semi => "semiSpoiler",
            Major => "majorSpoiler",
        }
    }
}

/// Whether an accepted spoiler warning is remembered across visits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpoilerPolicy {
    Remember,
    #[default]
    AlwaysConfirm,
}

#[derive(Clone, Debug)]
pub struct SpoilerGate<K> {
    policy: SpoilerPolicy,
    store: K,
}

impl<K: KeyValueStore> SpoilerGate<K> {
    pub fn new(policy: SpoilerPolicy, store: K) -> Self {
        Self { policy, store }
    }

    pub fn needs_confirmation(&self, level: SpoilerLevel) -> bool {
        match self.policy {
            SpoilerPolicy::AlwaysConfirm => true,
            SpoilerPolicy::Remember => match load_json::<bool, _>(&self.store, level.key()) {
                Ok(acknowledged) => !acknowledged.unwrap_or(false),
                Err(err) => {
                    log::warn!("could not read spoiler acknowledgement: {}", err);
                    true
                }
            },
        }
    }

    pub fn acknowledge(&self, level: SpoilerLevel) {
        if self.policy != SpoilerPolicy::Remember {
            return;
        }
        if let Err(err) = save_json(&self.store, level.key(), &true) {
            log::warn!("could not save spoiler acknowledgement: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_confirm_never_touches_storage() {
        let store = MemoryStore::new();
        let gate = SpoilerGate::new(SpoilerPolicy::AlwaysConfirm, store.clone());

        gate.acknowledge(SpoilerLevel::Major);

        assert!(gate.needs_confirmation(SpoilerLevel::Major));
        assert!(store.is_empty());
    }

    #[test]
    fn remember_skips_dialog_after_acknowledgement() {
        let store = MemoryStore::new();
        let gate = SpoilerGate::new(SpoilerPolicy::Remember, store.clone());
        assert!(gate.needs_confirmation(SpoilerLevel::Semi));

        gate.acknowledge(SpoilerLevel::Semi);

        assert!(!gate.needs_confirmation(SpoilerLevel::Semi));
        assert!(gate.needs_confirmation(SpoilerLevel::Major));
        assert_eq!(store.raw(SpoilerLevel::Semi.key()).as_deref(), Some("true"));
    }

    #[test]
    fn reset_forgets_acknowledgements() {
        let store = MemoryStore::new();
        let gate = SpoilerGate::new(SpoilerPolicy::Remember, store.clone());
        gate.acknowledge(SpoilerLevel::Major);

        reset_progress(&store).unwrap();

        assert!(gate.needs_confirmation(SpoilerLevel::Major));
    }

    #[test]
    fn acknowledgement_from_the_old_site_is_honored() {
        let store = MemoryStore::new();
        store.set("majorSpoiler", "true").unwrap();
        let gate = SpoilerGate::new(SpoilerPolicy::Remember, store);

        assert!(!gate.needs_confirmation(SpoilerLevel::Major));
        assert!(gate.needs_confirmation(SpoilerLevel::Semi));
    }

    #[test]
    fn unreadable_storage_asks_again() {
        let store = MemoryStore::new();
        let gate = SpoilerGate::new(SpoilerPolicy::Remember, store.clone());
        gate.acknowledge(SpoilerLevel::Semi);
        store.set_failing(true);

        assert!(gate.needs_confirmation(SpoilerLevel::Semi));
    }
}
