//! In-memory snapshot of the movie catalog.
//!
//! [`Catalog`] holds the movie list and the [`ReferenceData`] lists fetched
//! from a [`CatalogSource`]. A refresh fetches everything again and swaps
//! each part in whole; a failed fetch is logged and the previous data stays
//! in place.
//!
//! Each refresh is stamped with a generation number. Results from a refresh
//! that has since been superseded, or that finishes after [`Catalog::close`],
//! are dropped instead of overwriting newer state.

pub mod reference;
pub mod source;

pub use reference::{ReferenceData, SelectOption};
pub use source::CatalogSource;

use parking_lot::{Mutex, RwLock};
use reelview_common::Movie;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Called with the raw movie list after every successful movie fetch.
pub type MoviesLoadedHook = Box<dyn Fn(&[Movie]) + Send + Sync>;

/// What a single refresh managed to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub movies_loaded: bool,
    pub reference_loaded: bool,
    /// The results arrived after a newer refresh or [`Catalog::close`].
    pub discarded: bool,
}

struct Snapshot {
    movies: Arc<Vec<Movie>>,
    reference: Arc<ReferenceData>,
    loading: bool,
}

pub struct Catalog {
    source: Arc<dyn CatalogSource>,
    snapshot: RwLock<Snapshot>,
    generation: AtomicU64,
    closed: AtomicBool,
    last_token: Mutex<Option<u64>>,
    on_movies_loaded: Option<MoviesLoadedHook>,
}

impl Catalog {
    /// Create an empty catalog. It reports `loading` until the first
    /// refresh completes.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            snapshot: RwLock::new(Snapshot {
                movies: Arc::new(Vec::new()),
                reference: Arc::new(ReferenceData::default()),
                loading: true,
            }),
            generation: AtomicU64::new(0),
            closed: AtomicBool::new(false),
            last_token: Mutex::new(None),
            on_movies_loaded: None,
        }
    }

    /// Create a catalog and run the initial refresh.
    pub async fn load(source: Arc<dyn CatalogSource>) -> Self {
        let catalog = Self::new(source);
        catalog.refresh().await;
        catalog
    }

    /// Register the hook invoked with each freshly fetched movie list.
    pub fn with_movies_hook(mut self, hook: MoviesLoadedHook) -> Self {
        self.on_movies_loaded = Some(hook);
        self
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot.read().loading
    }

    pub fn movies(&self) -> Arc<Vec<Movie>> {
        Arc::clone(&self.snapshot.read().movies)
    }

    pub fn reference(&self) -> Arc<ReferenceData> {
        Arc::clone(&self.snapshot.read().reference)
    }

    /// Stop accepting results; in-flight refreshes will be discarded.
    pub fn close(&self) {
        let _snapshot = self.snapshot.write();
        self.closed.store(true, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Refresh only when `token` differs from the last token seen.
    ///
    /// Returns `None` when nothing was fetched.
    pub async fn refresh_if_changed(&self, token: u64) -> Option<RefreshOutcome> {
        {
            let mut last = self.last_token.lock();
            if *last == Some(token) {
                return None;
            }
            *last = Some(token);
        }
        Some(self.refresh().await)
    }

    /// Fetch movies and all four reference lists concurrently and apply
    /// whatever succeeded.
    pub async fn refresh(&self) -> RefreshOutcome {
        // Generation bumps and the close flag change only under the snapshot
        // lock, so the check before applying cannot race a newer start.
        let generation = {
            let mut snapshot = self.snapshot.write();
            if self.is_closed() {
                return RefreshOutcome {
                    discarded: true,
                    ..Default::default()
                };
            }
            snapshot.loading = true;
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        debug!(generation, "Refreshing catalog");

        let (movies, reference) = tokio::join!(self.source.fetch_movies(), self.fetch_reference());

        let mut outcome = RefreshOutcome::default();
        let loaded_movies = {
            let mut snapshot = self.snapshot.write();
            if self.generation.load(Ordering::SeqCst) != generation {
                debug!(generation, "Discarding superseded catalog refresh");
                return RefreshOutcome {
                    discarded: true,
                    ..Default::default()
                };
            }

            let loaded_movies = match movies {
                Ok(movies) => {
                    debug!(count = movies.len(), "Loaded movies");
                    snapshot.movies = Arc::new(movies);
                    outcome.movies_loaded = true;
                    Some(Arc::clone(&snapshot.movies))
                }
                Err(e) => {
                    warn!("Error fetching movies: {:#}", e);
                    None
                }
            };

            match reference {
                Ok(reference) => {
                    snapshot.reference = Arc::new(reference);
                    outcome.reference_loaded = true;
                }
                Err(e) => warn!("Error fetching reference data: {:#}", e),
            }

            snapshot.loading = false;
            loaded_movies
        };

        // Outside the lock so the hook may read the catalog.
        if let (Some(movies), Some(hook)) = (loaded_movies, &self.on_movies_loaded) {
            hook(&movies);
        }

        outcome
    }

    /// All four lists succeed together or none are applied.
    async fn fetch_reference(&self) -> anyhow::Result<ReferenceData> {
        let (genres, countries, directors, actors) = tokio::try_join!(
            self.source.fetch_genres(),
            self.source.fetch_countries(),
            self.source.fetch_directors(),
            self.source.fetch_actors(),
        )?;

        Ok(ReferenceData {
            genres,
            countries,
            directors,
            actors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reelview_common::{Actor, Country, Director, Genre, GenreId};
    use std::sync::atomic::AtomicUsize;

    /// A source whose responses can be switched between success and failure.
    struct StubSource {
        movies: Mutex<Vec<Movie>>,
        fail_movies: AtomicBool,
        fail_actors: AtomicBool,
        movie_calls: AtomicUsize,
    }

    impl StubSource {
        fn new(movies: Vec<Movie>) -> Self {
            Self {
                movies: Mutex::new(movies),
                fail_movies: AtomicBool::new(false),
                fail_actors: AtomicBool::new(false),
                movie_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CatalogSource for StubSource {
        async fn fetch_movies(&self) -> anyhow::Result<Vec<Movie>> {
            self.movie_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_movies.load(Ordering::SeqCst) {
                anyhow::bail!("connection refused");
            }
            Ok(self.movies.lock().clone())
        }

        async fn fetch_genres(&self) -> anyhow::Result<Vec<Genre>> {
            Ok(vec![Genre { id: GenreId::new(1), name: "Drama".into() }])
        }

        async fn fetch_countries(&self) -> anyhow::Result<Vec<Country>> {
            Ok(Vec::new())
        }

        async fn fetch_directors(&self) -> anyhow::Result<Vec<Director>> {
            Ok(Vec::new())
        }

        async fn fetch_actors(&self) -> anyhow::Result<Vec<Actor>> {
            if self.fail_actors.load(Ordering::SeqCst) {
                anyhow::bail!("HTTP 500");
            }
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_new_catalog_is_loading() {
        let catalog = Catalog::new(Arc::new(StubSource::new(Vec::new())));
        assert!(catalog.is_loading());
        assert!(catalog.movies().is_empty());
    }

    #[tokio::test]
    async fn test_load_populates_snapshot() {
        let source = Arc::new(StubSource::new(vec![Movie::new(1, "Heat", 1995)]));
        let catalog = Catalog::load(source).await;
        assert!(!catalog.is_loading());
        assert_eq!(catalog.movies().len(), 1);
        assert_eq!(catalog.reference().genres.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_movie_fetch_keeps_stale_data() {
        let source = Arc::new(StubSource::new(vec![Movie::new(1, "Heat", 1995)]));
        let catalog = Catalog::load(source.clone()).await;

        source.fail_movies.store(true, Ordering::SeqCst);
        let outcome = catalog.refresh().await;

        assert!(!outcome.movies_loaded);
        assert!(outcome.reference_loaded);
        assert_eq!(catalog.movies()[0].title, "Heat");
        assert!(!catalog.is_loading());
    }

    #[tokio::test]
    async fn test_reference_lists_apply_all_or_nothing() {
        let source = Arc::new(StubSource::new(Vec::new()));
        source.fail_actors.store(true, Ordering::SeqCst);
        let catalog = Catalog::new(source.clone());

        let outcome = catalog.refresh().await;
        assert!(outcome.movies_loaded);
        assert!(!outcome.reference_loaded);
        assert!(catalog.reference().genres.is_empty());
    }

    #[tokio::test]
    async fn test_hook_receives_movies() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_hook = Arc::clone(&seen);
        let source = Arc::new(StubSource::new(vec![
            Movie::new(1, "Heat", 1995),
            Movie::new(2, "Ronin", 1998),
        ]));

        let catalog = Catalog::new(source).with_movies_hook(Box::new(move |movies| {
            seen_hook.store(movies.len(), Ordering::SeqCst);
        }));
        catalog.refresh().await;

        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refresh_if_changed_skips_same_token() {
        let source = Arc::new(StubSource::new(Vec::new()));
        let catalog = Catalog::new(source.clone());

        assert!(catalog.refresh_if_changed(1).await.is_some());
        assert!(catalog.refresh_if_changed(1).await.is_none());
        assert!(catalog.refresh_if_changed(2).await.is_some());
        assert_eq!(source.movie_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_closed_catalog_ignores_refresh() {
        let source = Arc::new(StubSource::new(vec![Movie::new(1, "Heat", 1995)]));
        let catalog = Catalog::new(source.clone());
        catalog.close();

        let outcome = catalog.refresh().await;
        assert!(outcome.discarded);
        assert!(catalog.movies().is_empty());
        assert_eq!(source.movie_calls.load(Ordering::SeqCst), 0);
    }

    /// Closes the catalog while its movie fetch is in flight.
    struct ClosingSource {
        catalog: std::sync::OnceLock<std::sync::Weak<Catalog>>,
    }

    #[async_trait]
    impl CatalogSource for ClosingSource {
        async fn fetch_movies(&self) -> anyhow::Result<Vec<Movie>> {
            if let Some(catalog) = self.catalog.get().and_then(|c| c.upgrade()) {
                catalog.close();
            }
            Ok(vec![Movie::new(1, "Heat", 1995)])
        }

        async fn fetch_genres(&self) -> anyhow::Result<Vec<Genre>> {
            Ok(Vec::new())
        }

        async fn fetch_countries(&self) -> anyhow::Result<Vec<Country>> {
            Ok(Vec::new())
        }

        async fn fetch_directors(&self) -> anyhow::Result<Vec<Director>> {
            Ok(Vec::new())
        }

        async fn fetch_actors(&self) -> anyhow::Result<Vec<Actor>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_close_during_fetch_discards_result() {
        let source = Arc::new(ClosingSource {
            catalog: std::sync::OnceLock::new(),
        });
        let catalog = Arc::new(Catalog::new(source.clone()));
        let _ = source.catalog.set(Arc::downgrade(&catalog));

        let outcome = catalog.refresh().await;

        assert!(outcome.discarded);
        assert!(!outcome.movies_loaded);
        assert!(catalog.movies().is_empty());
        assert!(catalog.refresh().await.discarded);
    }
}
