//! In-memory [`Fetcher`] used by unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::utils::Fetcher;

/// Serves canned documents keyed by `path?k=v&...` and counts requests.
#[derive(Default)]
pub struct MockFetcher {
    responses: Mutex<HashMap<String, Value>>,
    failing: Mutex<HashSet<String>>,
    panicking: Mutex<HashSet<String>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` for the given request key.
    pub fn respond(&self, key: &str, document: Value) -> &Self {
        self.failing.lock().unwrap().remove(key);
        self.responses
            .lock()
            .unwrap()
            .insert(key.to_string(), document);
        self
    }

    /// Fail the given request with a transport error.
    pub fn fail(&self, key: &str) -> &Self {
        self.failing.lock().unwrap().insert(key.to_string());
        self
    }

    /// Panic inside the given request.
    pub fn panic_on(&self, key: &str) -> &Self {
        self.panicking.lock().unwrap().insert(key.to_string());
        self
    }

    /// Number of requests made for `key`.
    pub fn calls(&self, key: &str) -> usize {
        self.calls.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    /// Number of requests made for any key.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn request_key(path: &str, query: &[(&str, String)]) -> String {
        if query.is_empty() {
            return path.to_string();
        }
        let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("{path}?{}", pairs.join("&"))
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let key = Self::request_key(path, query);
        *self.calls.lock().unwrap().entry(key.clone()).or_default() += 1;

        if self.panicking.lock().unwrap().contains(&key) {
            panic!("mock fetcher told to panic on {key}");
        }
        if self.failing.lock().unwrap().contains(&key) {
            // A body that is not JSON stands in for any transport failure.
            let err = serde_json::from_str::<Value>("<html>502</html>").unwrap_err();
            return Err(AppError::from(err));
        }
        self.responses
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| AppError::config(format!("no canned response for {key}")))
    }
}

/// Leaderboard page request key.
pub fn page_key(leaderboard_id: &str, offset: u32) -> String {
    format!("leaderboard/{leaderboard_id}?offset={offset}&length=100")
}

/// Leaderboard page document with the given `(player_id, position, points)` rows.
pub fn page_doc(rows: &[(&str, u32, u32)]) -> Value {
    let tops: Vec<Value> = rows
        .iter()
        .map(|(id, position, points)| {
            serde_json::json!({
                "player": { "id": id, "name": format!("name-{id}") },
                "position": position,
                "points": points,
                "time": 0
            })
        })
        .collect();
    serde_json::json!({ "tops": tops })
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
