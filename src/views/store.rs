//! Persistence collaborator for saved views.

use async_trait::async_trait;
use parking_lot::Mutex;
use reelview_common::{NewView, View, ViewId};

/// Where saved views live.
///
/// The manager makes no assumption about the medium: the HTTP backend
/// ([`ApiClient`](crate::api::ApiClient)) and [`InMemoryViewStore`] are
/// interchangeable.
#[async_trait]
pub trait ViewStore: Send + Sync {
    /// Every stored view.
    async fn list(&self) -> anyhow::Result<Vec<View>>;

    /// Persist a new view and return it with its assigned id.
    async fn create(&self, view: &NewView) -> anyhow::Result<View>;

    /// Replace the name, filters and sorting of an existing view.
    async fn update(&self, id: ViewId, view: &NewView) -> anyhow::Result<View>;

    async fn delete(&self, id: ViewId) -> anyhow::Result<()>;
}

/// A [`ViewStore`] held in process memory.
///
/// Enforces the same unique-name rule as the backend table.
#[derive(Default)]
pub struct InMemoryViewStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    views: Vec<View>,
    next_id: i64,
}

impl InMemoryViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing views; new ids continue after the largest.
    pub fn with_views(views: Vec<View>) -> Self {
        let next_id = views.iter().map(|v| v.id.get()).max().unwrap_or(0);
        Self {
            inner: Mutex::new(Inner { views, next_id }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ViewStore for InMemoryViewStore {
    async fn list(&self) -> anyhow::Result<Vec<View>> {
        Ok(self.inner.lock().views.clone())
    }

    async fn create(&self, view: &NewView) -> anyhow::Result<View> {
        let mut inner = self.inner.lock();
        if inner.views.iter().any(|v| v.name == view.name) {
            anyhow::bail!("name must be unique: {}", view.name);
        }
        inner.next_id += 1;
        let stored = view.clone().into_view(ViewId::new(inner.next_id));
        inner.views.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: ViewId, view: &NewView) -> anyhow::Result<View> {
        let mut inner = self.inner.lock();
        if inner.views.iter().any(|v| v.id != id && v.name == view.name) {
            anyhow::bail!("name must be unique: {}", view.name);
        }
        let Some(existing) = inner.views.iter_mut().find(|v| v.id == id) else {
            anyhow::bail!("View not found: {}", id);
        };
        *existing = view.clone().into_view(id);
        Ok(existing.clone())
    }

    async fn delete(&self, id: ViewId) -> anyhow::Result<()> {
        let mut inner = self.inner.lock();
        let before = inner.views.len();
        inner.views.retain(|v| v.id != id);
        if inner.views.len() == before {
            anyhow::bail!("View not found: {}", id);
        }
        Ok(())
    }
}
