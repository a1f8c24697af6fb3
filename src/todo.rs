use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u32,
    pub title: String,
    pub completed: bool,
}

/// Which subset of the list is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    /// Parse the `filter` query parameter. Unknown values fall back to `All`.
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("active") => Filter::Active,
            Some("completed") => Filter::Completed,
            _ => Filter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    pub fn href(&self) -> String {
        format!("?filter={}", self.as_str())
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }
}

/// Ordered to-do items. Ids are handed out from `next_id` and never reused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    items: Vec<Todo>,
    #[serde(default)]
    next_id: u32,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a new active item. Returns its id.
    pub fn add(&mut self, title: &str) -> Result<u32, AppError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::EmptyTitle);
        }
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(AppError::IdsExhausted)?;
        self.items.push(Todo {
            id,
            title: title.to_string(),
            completed: false,
        });
        Ok(id)
    }

    pub fn toggle(&mut self, id: u32) -> Result<bool, AppError> {
        let todo = self.get_mut(id)?;
        todo.completed = !todo.completed;
        Ok(todo.completed)
    }

    /// Replace the title. A blank title deletes the item instead.
    pub fn rename(&mut self, id: u32, title: &str) -> Result<(), AppError> {
        let title = title.trim();
        if title.is_empty() {
            self.remove(id)?;
            return Ok(());
        }
        self.get_mut(id)?.title = title.to_string();
        Ok(())
    }

    pub fn remove(&mut self, id: u32) -> Result<Todo, AppError> {
        let idx = self
            .items
            .iter()
            .position(|t| t.id == id)
            .ok_or(AppError::TodoNotFound(id))?;
        Ok(self.items.remove(idx))
    }

    pub fn set_all(&mut self, completed: bool) {
        for todo in &mut self.items {
            todo.completed = completed;
        }
    }

    /// Drop completed items, returning how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|t| !t.completed);
        before - self.items.len()
    }

    pub fn visible(&self, filter: Filter) -> Vec<Todo> {
        self.items
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|t| !t.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.items.len() - self.remaining()
    }

    /// True when the list is non-empty and every item is done.
    pub fn all_completed(&self) -> bool {
        !self.items.is_empty() && self.remaining() == 0
    }

    /// Read the list stored under `key`. A missing key yields an empty list.
    pub fn load(store: &dyn KeyValueStore, key: &str) -> Result<Self, AppError> {
        let Some(raw) = store.get(key)? else {
            return Ok(Self::new());
        };
        let mut list: TodoList = serde_json::from_str(&raw)?;
        list.repair_ids()?;
        Ok(list)
    }

    pub fn save(&self, store: &dyn KeyValueStore, key: &str) -> Result<(), AppError> {
        let json = serde_json::to_string(self)?;
        store.set(key, &json)
    }

    // Payloads written by hand or by older builds may carry a stale counter.
    // Duplicate ids cannot be told apart, so the payload is rejected.
    fn repair_ids(&mut self) -> Result<(), AppError> {
        let mut seen = HashSet::with_capacity(self.items.len());
        let mut floor = 0u32;
        for todo in &self.items {
            if !seen.insert(todo.id) {
                return Err(AppError::DuplicateTodoId(todo.id));
            }
            let after = todo.id.checked_add(1).ok_or(AppError::IdsExhausted)?;
            floor = floor.max(after);
        }
        if self.next_id < floor {
            self.next_id = floor;
        }
        Ok(())
    }

    fn get_mut(&mut self, id: u32) -> Result<&mut Todo, AppError> {
        self.items
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(AppError::TodoNotFound(id))
    }
}

/// "1 item left" / "3 items left".
pub fn items_left_label(count: usize) -> String {
    if count == 1 {
        "1 item left".to_string()
    } else {
        format!("{} items left", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests::MemoryStore;

    fn sample_list() -> TodoList {
        let mut list = TodoList::new();
        list.add("Buy milk").unwrap();
        list.add("Walk the dog").unwrap();
        list.add("Write report").unwrap();
        list
    }

    #[test]
    fn test_add_assigns_increasing_ids_and_trims() {
        let mut list = TodoList::new();
        let a = list.add("  first  ").unwrap();
        let b = list.add("second").unwrap();

        assert!(b > a);
        assert_eq!(list.items()[0].title, "first");
        assert!(!list.items()[0].completed);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_add_rejects_blank_title() {
        let mut list = TodoList::new();
        assert!(matches!(list.add("   "), Err(AppError::EmptyTitle)));
        assert!(matches!(list.add(""), Err(AppError::EmptyTitle)));
        assert!(list.is_empty());
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut list = sample_list();
        let last = list.items()[2].id;
        list.remove(last).unwrap();

        let new_id = list.add("Another").unwrap();
        assert!(new_id > last, "id {} reused after removing {}", new_id, last);
    }

    #[test]
    fn test_toggle_flips_and_reports_state() {
        let mut list = sample_list();
        let id = list.items()[1].id;

        assert!(list.toggle(id).unwrap());
        assert_eq!(list.remaining(), 2);
        assert!(!list.toggle(id).unwrap());
        assert_eq!(list.remaining(), 3);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut list = sample_list();
        assert!(matches!(list.toggle(99), Err(AppError::TodoNotFound(99))));
        assert!(matches!(list.remove(99), Err(AppError::TodoNotFound(99))));
        assert!(matches!(list.rename(99, "x"), Err(AppError::TodoNotFound(99))));
    }

    #[test]
    fn test_rename_trims_and_blank_removes() {
        let mut list = sample_list();
        let id = list.items()[0].id;

        list.rename(id, "  Buy oat milk ").unwrap();
        assert_eq!(list.items()[0].title, "Buy oat milk");

        list.rename(id, "   ").unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.items().iter().all(|t| t.id != id));
    }

    #[test]
    fn test_filters_and_counts() {
        let mut list = sample_list();
        let done = list.items()[0].id;
        list.toggle(done).unwrap();

        assert_eq!(list.visible(Filter::All).len(), 3);
        let active: Vec<u32> = list.visible(Filter::Active).iter().map(|t| t.id).collect();
        assert_eq!(active, vec![list.items()[1].id, list.items()[2].id]);
        let completed = list.visible(Filter::Completed);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, done);

        assert_eq!(list.remaining(), 2);
        assert_eq!(list.completed_count(), 1);
        assert!(!list.all_completed());
    }

    #[test]
    fn test_set_all_and_clear_completed() {
        let mut list = sample_list();
        list.set_all(true);
        assert!(list.all_completed());

        list.set_all(false);
        assert_eq!(list.remaining(), 3);

        let first = list.items()[0].id;
        list.toggle(first).unwrap();
        assert_eq!(list.clear_completed(), 1);
        assert_eq!(list.len(), 2);
        assert_eq!(list.clear_completed(), 0);
    }

    #[test]
    fn test_empty_list_is_not_all_completed() {
        assert!(!TodoList::new().all_completed());
    }

    #[test]
    fn test_filter_from_query() {
        assert_eq!(Filter::from_query(None), Filter::All);
        assert_eq!(Filter::from_query(Some("active")), Filter::Active);
        assert_eq!(Filter::from_query(Some("Completed")), Filter::Completed);
        assert_eq!(Filter::from_query(Some("bogus")), Filter::All);
        for filter in Filter::ALL {
            assert_eq!(Filter::from_query(Some(filter.as_str())), filter);
        }
    }

    #[test]
    fn test_items_left_label() {
        assert_eq!(items_left_label(0), "0 items left");
        assert_eq!(items_left_label(1), "1 item left");
        assert_eq!(items_left_label(5), "5 items left");
    }

    #[test]
    fn test_save_and_load_preserves_list() {
        let store = MemoryStore::default();
        let mut list = sample_list();
        let id = list.items()[1].id;
        list.toggle(id).unwrap();

        list.save(&store, "todos").unwrap();
        let loaded = TodoList::load(&store, "todos").unwrap();
        assert_eq!(loaded, list);
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let store = MemoryStore::default();
        let list = TodoList::load(&store, "todos").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_load_repairs_stale_next_id() {
        let store = MemoryStore::default();
        store
            .set(
                "todos",
                r#"{"items":[{"id":4,"title":"a","completed":false},{"id":7,"title":"b","completed":true}]}"#,
            )
            .unwrap();

        let mut list = TodoList::load(&store, "todos").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.add("c").unwrap(), 8);
    }

    #[test]
    fn test_load_rejects_id_at_counter_limit() {
        let store = MemoryStore::default();
        store
            .set(
                "todos",
                r#"{"items":[{"id":4294967295,"title":"last","completed":false}]}"#,
            )
            .unwrap();

        assert!(matches!(
            TodoList::load(&store, "todos"),
            Err(AppError::IdsExhausted)
        ));
    }

    #[test]
    fn test_add_fails_when_counter_exhausted() {
        let store = MemoryStore::default();
        store
            .set(
                "todos",
                r#"{"items":[{"id":4294967294,"title":"almost","completed":false}]}"#,
            )
            .unwrap();

        let mut list = TodoList::load(&store, "todos").unwrap();
        assert!(matches!(list.add("one more"), Err(AppError::IdsExhausted)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let store = MemoryStore::default();
        store
            .set(
                "todos",
                r#"{"items":[{"id":1,"title":"a","completed":false},{"id":1,"title":"b","completed":false}],"next_id":2}"#,
            )
            .unwrap();

        assert!(matches!(
            TodoList::load(&store, "todos"),
            Err(AppError::DuplicateTodoId(1))
        ));
    }

    #[test]
    fn test_load_corrupt_payload_is_error() {
        let store = MemoryStore::default();
        store.set("todos", "not json").unwrap();
        assert!(matches!(
            TodoList::load(&store, "todos"),
            Err(AppError::Serialization(_))
        ));
    }

    #[test]
    fn test_save_propagates_storage_failure() {
        let store = MemoryStore::failing();
        assert!(matches!(
            sample_list().save(&store, "todos"),
            Err(AppError::Storage(_))
        ));
    }
}
