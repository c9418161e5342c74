use std::{collections::BTreeMap, sync::Arc};

use tokio::sync::RwLock;

use super::{StoreError, TodoStore};
use crate::model::{TodoId, TodoItem};

/// Process-local store. Contents are lost when the last handle is dropped.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Arc<RwLock<BTreeMap<TodoId, TodoItem>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TodoStore for MemoryStore {
    async fn migrate(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<TodoItem>, StoreError> {
        let items = self.items.read().await;
        Ok(items.values().cloned().collect())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<TodoItem, StoreError> {
        let items = self.items.read().await;
        items.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, item: &TodoItem) -> Result<(), StoreError> {
        use std::collections::btree_map::Entry;

        match self.items.write().await.entry(item.id) {
            Entry::Occupied(_) => Err(StoreError::Conflict(item.id)),
            Entry::Vacant(slot) => {
                slot.insert(item.clone());
                Ok(())
            }
        }
    }

    async fn save(&self, item: &TodoItem) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        let stored = items.get_mut(&item.id).ok_or(StoreError::NotFound(item.id))?;
        stored.title.clone_from(&item.title);
        stored.completed = item.completed;
        Ok(())
    }

    async fn delete(&self, item: &TodoItem) -> Result<(), StoreError> {
        self.items
            .write()
            .await
            .remove(&item.id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(item.id))
    }
}
