use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::*;

/// Origin-scoped string key-value storage, the shape of the browser's `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub fn load_json<T, K>(store: &K, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    K: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| ScratchError::MalformedValue(format!("{key}: {err}")))
}

pub fn save_json<T, K>(store: &K, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    K: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)
        .map_err(|err| ScratchError::StorageWrite(format!("{key}: {err}")))?;
    store.set(key, &raw)
}

/// Every key this site ever writes.
pub const PERSISTED_KEYS: [&str; 4] = [
    ProgressKind::Scratched.key(),
    ProgressKind::Matched.key(),
    SpoilerLevel::Semi.key(),
    SpoilerLevel::Major.key(),
];

/// Forgets all scratch, match and spoiler state. Every key is attempted even if one fails.
pub fn reset_progress<K: KeyValueStore + ?Sized>(store: &K) -> Result<()> {
    let mut first_error = None;
    for key in PERSISTED_KEYS {
        if let Err(err) = store.remove(key) {
            log::error!("failed to clear {}: {}", key, err);
            first_error.get_or_insert(err);
        }
    }
    match first_error {
        None => {
            log::debug!("all progress cleared");
            Ok(())
        }
        Some(err) => Err(err),
    }
}

/// Shared in-memory store. Clones see the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
    failing: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every operation fails as if storage were disabled.
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn check(&self) -> Result<()> {
        if self.failing.get() {
            Err(ScratchError::StorageUnavailable)
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
