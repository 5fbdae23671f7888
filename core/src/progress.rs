use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::*;

/// Namespaces for the two independent "done" sets that share the store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressKind {
    /// Cards revealed by scratching.
    Scratched,
    /// Bottles identified in the matching game.
    Matched,
}

impl ProgressKind {
    pub const fn key(self) -> &'static str {
        use ProgressKind::*;
        match self {
            Scratched => "scratchedDays",
            Matched => "matchedDays",
        }
    }
}

/// Stored as a JSON object mapping card id to `true`, e.g. `{"3":true}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevealProgress(BTreeMap<CardId, bool>);

impl RevealProgress {
    pub fn contains(&self, id: &CardId) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    /// Returns whether `id` was newly added.
    pub fn insert(&mut self, id: CardId) -> bool {
        self.0.insert(id, true) != Some(true)
    }

    pub fn extend(&mut self, other: &Self) {
        for id in other.ids() {
            self.insert(id.clone());
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &CardId> {
        self.0
            .iter()
            .filter_map(|(id, &revealed)| revealed.then_some(id))
    }

    pub fn len(&self) -> usize {
        self.ids().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<CardId> for RevealProgress {
    fn from_iter<I: IntoIterator<Item = CardId>>(iter: I) -> Self {
        Self(iter.into_iter().map(|id| (id, true)).collect())
    }
}

/// One progress set, loaded once and kept in sync with the store.
///
/// Storage failures degrade to the in-memory copy for the rest of the session.
#[derive(Clone, Debug)]
pub struct ProgressBook<K> {
    store: K,
    kind: ProgressKind,
    progress: RevealProgress,
}

impl<K: KeyValueStore> ProgressBook<K> {
    pub fn load(store: K, kind: ProgressKind) -> Self {
        let progress = match load_json(&store, kind.key()) {
            Ok(progress) => progress.unwrap_or_default(),
            Err(err) => {
                log::error!("could not load {:?} progress: {}", kind, err);
                RevealProgress::default()
            }
        };
        log::debug!("{:?} progress loaded: {} entries", kind, progress.len());
        Self {
            store,
            kind,
            progress,
        }
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn progress(&self) -> &RevealProgress {
        &self.progress
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.progress.contains(id)
    }

    /// Records `id`, re-reading the stored set first so nothing written since load is lost.
    ///
    /// Returns whether `id` was new to this session. The store is only written when the stored
    /// set is missing something.
    pub fn mark(&mut self, id: &CardId) -> bool {
        let added = self.progress.insert(id.clone());
        let key = self.kind.key();

        let mut stored = match load_json::<RevealProgress, _>(&self.store, key) {
            Ok(stored) => stored.unwrap_or_default(),
            Err(err) => {
                log::warn!("could not re-read {:?} progress: {}", self.kind, err);
                RevealProgress::default()
            }
        };
        let before = stored.len();
        stored.extend(&self.progress);

        if stored.len() != before {
            if let Err(err) = save_json(&self.store, key, &stored) {
                log::error!("could not save {:?} progress: {}", self.kind, err);
            }
        }
        self.progress = stored;
        added
    }

    /// Drops the in-memory progress; the stored copy is left to the caller.
    pub fn forget(&mut self) {
        self.progress = RevealProgress::default();
    }
}
