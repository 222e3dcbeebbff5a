use std::sync::Arc;

use ingest_api::error::NotFound;

use crate::store::ValueStore;

/// Request-side accessors over the value store.
#[derive(Debug, Clone)]
pub struct QueryFacade {
    store: Arc<ValueStore>,
}

impl QueryFacade {
    pub fn new(store: Arc<ValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<ValueStore> {
        &self.store
    }

    pub fn get_all(&self) -> Vec<String> {
        self.store.snapshot()
    }

    /// Value at `index`, optionally suffixed (`"<value> <suffix>"`) and uppercased.
    pub fn get_by_index(
        &self,
        index: i64,
        suffix: Option<&str>,
        uppercase: bool,
    ) -> Result<String, NotFound> {
        let (value, size) = match usize::try_from(index) {
            Ok(i) => self.store.get(i),
            Err(_) => (None, self.store.len()),
        };
        let value = value.ok_or(NotFound { index, size })?;

        let output = match suffix {
            Some(suffix) => format!("{value} {suffix}"),
            None => value,
        };
        Ok(if uppercase {
            output.to_uppercase()
        } else {
            output
        })
    }

    pub fn add(&self, value: impl Into<String>) {
        self.store.append(value);
    }
}
