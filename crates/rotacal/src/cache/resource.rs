//! Client-side resource cache with force refresh, prewarm and in-flight
//! de-duplication.
//!
//! Entries never expire on their own. The only way to replace one is to
//! [`invalidate`](ResourceCache::invalidate) it and load again, which is
//! what [`refresh`](ResourceCache::refresh) does. A failed reload therefore
//! leaves the key missing instead of serving the old payload.
//!
//! Concurrent loads of the same key share a single fetch. Each fetch runs in
//! its own task and carries a token; it only stores its result if it is still
//! the registered fetch for that key when it settles. Invalidating a key
//! detaches its in-flight fetch without cancelling it, so a fetch started
//! before a refresh can never overwrite the refreshed value.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::{JoinHandle, JoinSet};

use rotacal_core::cache::{FetchError, Fetcher};

type FetchResult<T> = Result<Arc<T>, FetchError>;
type SharedFetch<T> = Shared<BoxFuture<'static, FetchResult<T>>>;

struct InFlight<T> {
    token: u64,
    future: SharedFetch<T>,
}

struct State<T> {
    entries: HashMap<String, Arc<T>>,
    in_flight: HashMap<String, InFlight<T>>,
    next_token: u64,
}

impl<T> Default for State<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            in_flight: HashMap::new(),
            next_token: 0,
        }
    }
}

/// Outcome of a prewarm pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrewarmReport {
    /// Keys fetched and stored by this pass.
    pub warmed: Vec<String>,
    /// Keys already cached, not fetched.
    pub skipped: Vec<String>,
    pub failed: Vec<PrewarmFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrewarmFailure {
    pub key: String,
    pub error: String,
}

/// Keyed cache of fetched payloads.
///
/// Cloning is cheap and every clone shares the same entries.
pub struct ResourceCache<F: Fetcher> {
    fetcher: Arc<F>,
    state: Arc<Mutex<State<F::Output>>>,
}

impl<F: Fetcher> Clone for ResourceCache<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            state: Arc::clone(&self.state),
        }
    }
}

impl<F> ResourceCache<F>
where
    F: Fetcher + 'static,
{
    pub fn new(fetcher: F) -> Self {
        Self::with_shared_fetcher(Arc::new(fetcher))
    }

    pub fn with_shared_fetcher(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Returns the cached payload for `key` without fetching.
    pub async fn get(&self, key: &str) -> Option<Arc<F::Output>> {
        let state = self.state.lock().await;
        state.entries.get(key).cloned()
    }

    /// Stores `value` under `key`, replacing any entry and detaching any
    /// in-flight fetch for the key.
    pub async fn put(&self, key: &str, value: F::Output) {
        let mut state = self.state.lock().await;
        state.in_flight.remove(key);
        state.entries.insert(key.to_string(), Arc::new(value));
    }

    /// Removes `key` and detaches its in-flight fetch, if any.
    ///
    /// Returns true when there was something to remove.
    pub async fn invalidate(&self, key: &str) -> bool {
        let mut state = self.state.lock().await;
        let had_entry = state.entries.remove(key).is_some();
        let had_fetch = state.in_flight.remove(key).is_some();
        if had_entry || had_fetch {
            tracing::debug!(key, had_entry, had_fetch, "Invalidated resource");
        }
        had_entry || had_fetch
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.state.lock().await.entries.contains_key(key)
    }

    pub async fn is_in_flight(&self, key: &str) -> bool {
        self.state.lock().await.in_flight.contains_key(key)
    }

    /// Number of cached entries.
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.entries.is_empty()
    }

    /// Returns the cached payload for `key`, fetching it on a miss.
    ///
    /// A miss joins the in-flight fetch for `key` when there is one.
    pub async fn load(&self, key: &str) -> FetchResult<F::Output> {
        let future = {
            let mut state = self.state.lock().await;
            if let Some(value) = state.entries.get(key) {
                tracing::trace!(key, "Resource cache hit");
                return Ok(Arc::clone(value));
            }
            let joined = state.in_flight.get(key).map(|f| f.future.clone());
            match joined {
                Some(future) => {
                    tracing::trace!(key, "Joining in-flight fetch");
                    future
                }
                None => {
                    tracing::trace!(key, "Resource cache miss");
                    let token = state.next_token;
                    state.next_token += 1;
                    let future = self.spawn_fetch(key, token);
                    state.in_flight.insert(
                        key.to_string(),
                        InFlight {
                            token,
                            future: future.clone(),
                        },
                    );
                    future
                }
            }
        };

        future.await
    }

    /// Drops the cached payload for `key` and fetches it again.
    ///
    /// The old entry is removed before the fetch starts, so on failure the
    /// key is left missing.
    pub async fn refresh(&self, key: &str) -> FetchResult<F::Output> {
        self.invalidate(key).await;
        self.load(key).await
    }

    /// Fetches every key not already cached, concurrently, and waits for
    /// all of them. Failures are logged and reported, never raised.
    pub async fn prewarm<I, S>(&self, keys: I) -> PrewarmReport
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut report = PrewarmReport::default();
        let mut tasks = JoinSet::new();

        for key in keys.into_iter().map(Into::into) {
            if self.contains(&key).await {
                report.skipped.push(key);
                continue;
            }
            let cache = self.clone();
            tasks.spawn(async move {
                let result = cache.load(&key).await;
                (key, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((key, Ok(_))) => report.warmed.push(key),
                Ok((key, Err(err))) => {
                    tracing::warn!(key, error = %err, "Prewarm fetch failed");
                    report.failed.push(PrewarmFailure {
                        key,
                        error: err.to_string(),
                    });
                }
                Err(err) => tracing::warn!(error = %err, "Prewarm task failed"),
            }
        }

        report.warmed.sort();
        tracing::debug!(
            warmed = report.warmed.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Prewarm finished"
        );
        report
    }

    /// Runs [`prewarm`](Self::prewarm) in the background.
    pub fn spawn_prewarm(&self, keys: Vec<String>) -> JoinHandle<PrewarmReport> {
        let cache = self.clone();
        tokio::spawn(async move { cache.prewarm(keys).await })
    }

    fn spawn_fetch(&self, key: &str, token: u64) -> SharedFetch<F::Output> {
        let fetcher = Arc::clone(&self.fetcher);
        let task_state = Arc::clone(&self.state);
        let task_key = key.to_string();

        let handle = tokio::spawn(async move {
            tracing::debug!(key = task_key.as_str(), token, "Fetching resource");
            let result = match AssertUnwindSafe(fetcher.fetch(&task_key)).catch_unwind().await {
                Ok(result) => result.map(Arc::new),
                Err(_) => Err(FetchError::Request("fetch panicked".to_string())),
            };
            settle(&task_state, &task_key, token, &result).await;
            result
        });

        // A task that never settled (cancelled at shutdown) must not leave its
        // key stuck in flight.
        let state = Arc::clone(&self.state);
        let key = key.to_string();
        async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => {
                    let result = Err(FetchError::Request(format!("fetch task failed: {e}")));
                    settle(&state, &key, token, &result).await;
                    result
                }
            }
        }
        .boxed()
        .shared()
    }
}

/// Stores the result of fetch `token` if it is still the registered fetch
/// for `key`. Failures store nothing.
async fn settle<T>(state: &Mutex<State<T>>, key: &str, token: u64, result: &FetchResult<T>) {
    let mut state = state.lock().await;
    let current = state
        .in_flight
        .get(key)
        .is_some_and(|in_flight| in_flight.token == token);
    if !current {
        tracing::debug!(key, token, "Discarding detached fetch result");
        return;
    }

    state.in_flight.remove(key);
    match result {
        Ok(value) => {
            state.entries.insert(key.to_string(), Arc::clone(value));
            tracing::debug!(key, "Stored fetched resource");
        }
        Err(err) => tracing::debug!(key, error = %err, "Fetch failed, nothing stored"),
    }
}
