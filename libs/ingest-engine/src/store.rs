use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Insertion-ordered list of strings shared by the REST, function and event paths.
///
/// A single lock guards the list: every append is atomic and every read
/// hands out an owned copy, never a reference into the list.
#[derive(Debug, Default)]
pub struct ValueStore {
    values: RwLock<Vec<String>>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: impl IntoIterator<Item = String>) -> Self {
        Self {
            values: RwLock::new(values.into_iter().collect()),
        }
    }

    pub fn append(&self, value: impl Into<String>) {
        self.write().push(value.into());
    }

    /// Independent copy of the current contents.
    pub fn snapshot(&self) -> Vec<String> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Value at `index` together with the size seen under the same lock.
    pub fn get(&self, index: usize) -> (Option<String>, usize) {
        let guard = self.read();
        (guard.get(index).cloned(), guard.len())
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<String>> {
        match self.values.read() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("value store read lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<String>> {
        match self.values.write() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("value store write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}
