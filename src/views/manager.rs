use std::sync::Arc;

use reelview_common::{Error, NewView, Result, View, ViewId};
use tracing::{error, info};

use super::store::ViewStore;
use crate::query::QueryState;

/// Shown when saving without a name
pub const EMPTY_NAME_MESSAGE: &str = "Please enter a name for the view.";

/// Saved-view presets for the movie table.
///
/// Owns the canonical list fetched from the [`ViewStore`] and tracks which
/// view is selected. Saving and loading read or overwrite a [`QueryState`]
/// as a unit.
///
/// Every store call sets [`is_busy`](Self::is_busy) until it returns or its
/// future is dropped; a front-end should disable its save/delete actions
/// while it is set. A call made while busy is rejected with [`Error::Busy`].
pub struct ViewsManager {
    store: Arc<dyn ViewStore>,
    views: Vec<View>,
    selected: Option<ViewId>,
    view_name: String,
    busy: bool,
    error: Option<String>,
}

impl ViewsManager {
    /// Create a manager with an empty list. Call [`refresh`](Self::refresh)
    /// or use [`mount`](Self::mount) to populate it.
    pub fn new(store: Arc<dyn ViewStore>) -> Self {
        Self {
            store,
            views: Vec::new(),
            selected: None,
            view_name: String::new(),
            busy: false,
            error: None,
        }
    }

    /// Create a manager and fetch the view list once.
    ///
    /// A failed fetch leaves the list empty and the message in
    /// [`error`](Self::error).
    pub async fn mount(store: Arc<dyn ViewStore>) -> Self {
        let mut manager = Self::new(store);
        let _ = manager.refresh().await;
        manager
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn selected_id(&self) -> Option<ViewId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&View> {
        self.selected.and_then(|id| self.find(id))
    }

    pub fn find(&self, id: ViewId) -> Option<&View> {
        self.views.iter().find(|v| v.id == id)
    }

    /// Case-insensitive lookup by name.
    pub fn find_by_name(&self, name: &str) -> Option<&View> {
        let name = name.trim().to_lowercase();
        self.views
            .iter()
            .find(|v| v.name.trim().to_lowercase() == name)
    }

    /// Like [`find_by_name`](Self::find_by_name) but a miss is an error.
    pub fn require_by_name(&self, name: &str) -> Result<&View> {
        self.find_by_name(name)
            .ok_or_else(|| Error::not_found(format!("No view named {:?}", name)))
    }

    /// Text of the name input used by [`save`](Self::save).
    pub fn view_name(&self) -> &str {
        &self.view_name
    }

    pub fn set_view_name(&mut self, name: impl Into<String>) {
        self.view_name = name.into();
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Message from the last failed operation, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Re-fetch the canonical list from the store.
    pub async fn refresh(&mut self) -> Result<()> {
        let guard = BusyGuard::acquire(&mut self.busy)?;
        let result = self.store.list().await;
        drop(guard);

        match result {
            Ok(views) => {
                self.views = views;
                if let Some(id) = self.selected {
                    if self.find(id).is_none() {
                        self.selected = None;
                    }
                }
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to fetch views", e)),
        }
    }

    /// Save `query` under the current name input.
    ///
    /// The new view is appended, selected, and the name input cleared.
    /// An empty or already-used name is rejected without calling the store.
    pub async fn save(&mut self, query: &QueryState) -> Result<&View> {
        let name = self.view_name.trim().to_string();
        if name.is_empty() {
            self.error = Some(EMPTY_NAME_MESSAGE.to_string());
            return Err(Error::validation(EMPTY_NAME_MESSAGE));
        }
        if self.find_by_name(&name).is_some() {
            let msg = format!("A view named \"{}\" already exists.", name);
            self.error = Some(msg.clone());
            return Err(Error::conflict(msg));
        }

        let guard = BusyGuard::acquire(&mut self.busy)?;
        let new_view = NewView {
            name,
            filters: query.criteria.clone(),
            sorting: query.sort,
        };
        let result = self.store.create(&new_view).await;
        drop(guard);

        match result {
            Ok(view) => {
                info!(id = %view.id, name = %view.name, "Saved view");
                let id = view.id;
                self.views.push(view);
                self.selected = Some(id);
                self.view_name.clear();
                self.error = None;
                self.selected()
                    .ok_or_else(|| Error::internal("saved view missing from list"))
            }
            Err(e) => Err(self.fail("Failed to save view", e)),
        }
    }

    /// Apply a saved view to `query`, or reset `query` when `view_id` is
    /// `None`.
    ///
    /// Returns `false`, leaving everything untouched, when the id is not in
    /// the list.
    pub fn load(&mut self, view_id: Option<ViewId>, query: &mut QueryState) -> bool {
        let Some(id) = view_id else {
            query.reset();
            self.selected = None;
            return true;
        };

        let Some(view) = self.find(id) else {
            return false;
        };

        query.criteria = view.filters.clone();
        query.sort = view.sorting;
        self.selected = Some(id);
        true
    }

    /// Delete the selected view from the store and the list.
    ///
    /// On failure the list is left as it was.
    pub async fn delete_selected(&mut self) -> Result<()> {
        let Some(id) = self.selected else {
            return Err(Error::invalid_input("No view selected"));
        };

        let guard = BusyGuard::acquire(&mut self.busy)?;
        let result = self.store.delete(id).await;
        drop(guard);

        match result {
            Ok(()) => {
                info!(id = %id, "Deleted view");
                self.views.retain(|v| v.id != id);
                self.selected = None;
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to delete view", e)),
        }
    }

    /// Overwrite the selected view's filters and sorting with `query`,
    /// keeping its name.
    pub async fn update_selected(&mut self, query: &QueryState) -> Result<&View> {
        let Some(current) = self.selected().cloned() else {
            return Err(Error::invalid_input("No view selected"));
        };

        let guard = BusyGuard::acquire(&mut self.busy)?;
        let changes = NewView {
            name: current.name,
            filters: query.criteria.clone(),
            sorting: query.sort,
        };
        let result = self.store.update(current.id, &changes).await;
        drop(guard);

        match result {
            Ok(updated) => {
                info!(id = %updated.id, "Updated view");
                let id = current.id;
                if let Some(slot) = self.views.iter_mut().find(|v| v.id == id) {
                    *slot = updated;
                }
                self.error = None;
                self.find(id)
                    .ok_or_else(|| Error::internal("updated view missing from list"))
            }
            Err(e) => Err(self.fail("Failed to update view", e)),
        }
    }

    fn fail(&mut self, message: &str, cause: anyhow::Error) -> Error {
        error!("{}: {:#}", message, cause);
        self.error = Some(message.to_string());
        Error::remote(message)
    }
}

/// Holds the busy flag for one store call and clears it when dropped, so a
/// call cancelled mid-flight does not leave the manager stuck.
#[derive(Debug)]
struct BusyGuard<'a> {
    busy: &'a mut bool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(busy: &'a mut bool) -> Result<Self> {
        if *busy {
            return Err(Error::Busy);
        }
        *busy = true;
        Ok(Self { busy })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.busy = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::InMemoryViewStore;
    use assert_matches::assert_matches;
    use reelview_common::{FilterCriteria, SortConfig, SortKey};

    fn manager() -> ViewsManager {
        ViewsManager::new(Arc::new(InMemoryViewStore::new()))
    }

    #[tokio::test]
    async fn test_save_rejects_empty_name() {
        let mut views = manager();
        views.set_view_name("   ");
        let result = views.save(&QueryState::default()).await;
        assert_matches!(result, Err(Error::InvalidInput(_)));
        assert_eq!(views.error(), Some(EMPTY_NAME_MESSAGE));
        assert!(views.views().is_empty());
    }

    #[tokio::test]
    async fn test_save_selects_and_clears_name() {
        let mut views = manager();
        views.set_view_name("Nineties");
        let mut query = QueryState::default();
        query.criteria.min_year = Some(1990);

        let saved = views.save(&query).await.unwrap().clone();
        assert_eq!(saved.name, "Nineties");
        assert_eq!(saved.filters.min_year, Some(1990));
        assert_eq!(views.selected_id(), Some(saved.id));
        assert_eq!(views.view_name(), "");
        assert!(!views.is_busy());
    }

    #[tokio::test]
    async fn test_save_rejects_duplicate_name_case_insensitively() {
        let mut views = manager();
        views.set_view_name("Noir");
        views.save(&QueryState::default()).await.unwrap();

        views.set_view_name("  noir ");
        let result = views.save(&QueryState::default()).await;
        assert_matches!(result, Err(Error::Conflict(_)));
        assert_eq!(views.views().len(), 1);
    }

    #[tokio::test]
    async fn test_load_unknown_id_is_noop() {
        let mut views = manager();
        let mut query = QueryState::default();
        query.criteria.search_term = "alien".into();
        let before = query.clone();

        assert!(!views.load(Some(ViewId::new(42)), &mut query));
        assert_eq!(query, before);
    }

    #[tokio::test]
    async fn test_load_none_resets_state() {
        let mut views = manager();
        views.set_view_name("Recent");
        let mut query = QueryState::default();
        query.criteria.min_year = Some(2010);
        views.save(&query).await.unwrap();

        assert!(views.load(None, &mut query));
        assert!(query.criteria.is_empty());
        assert_eq!(query.sort, SortConfig::ascending(SortKey::Id));
        assert_eq!(views.selected_id(), None);
    }

    #[tokio::test]
    async fn test_require_by_name_reports_missing_view() {
        let mut views = manager();
        views.set_view_name("Recent");
        let id = views.save(&QueryState::default()).await.unwrap().id;

        assert_eq!(views.require_by_name(" RECENT ").unwrap().id, id);
        assert_matches!(views.require_by_name("Noir"), Err(Error::NotFound(msg)) if msg.contains("Noir"));
    }

    #[tokio::test]
    async fn test_delete_requires_selection() {
        let mut views = manager();
        assert_matches!(views.delete_selected().await, Err(Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_update_selected_keeps_name() {
        let mut views = manager();
        views.set_view_name("Westerns");
        views.save(&QueryState::default()).await.unwrap();

        let query = QueryState::new(
            FilterCriteria {
                max_year: Some(1970),
                ..Default::default()
            },
            SortConfig::descending(SortKey::ReleaseYear),
        );
        let updated = views.update_selected(&query).await.unwrap().clone();
        assert_eq!(updated.name, "Westerns");
        assert_eq!(updated.filters.max_year, Some(1970));
        assert_eq!(views.views()[0].sorting, SortConfig::descending(SortKey::ReleaseYear));
    }

    #[test]
    fn test_busy_guard_rejects_second_acquire_and_clears_on_drop() {
        let mut busy = true;
        assert_matches!(BusyGuard::acquire(&mut busy), Err(Error::Busy));

        let mut busy = false;
        let guard = BusyGuard::acquire(&mut busy).unwrap();
        drop(guard);
        assert!(!busy);
    }
}
