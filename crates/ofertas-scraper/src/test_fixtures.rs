//! Shared test doubles for the collector, harvester, and coordinator tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::traits::PageFetcher;

/// Serves canned HTML bodies by URL and records every request.
/// URLs with no fixture behave like fetch failures (`None`).
pub struct FixtureFetcher {
    pages: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl FixtureFetcher {
    pub fn new<I, K, V>(pages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pages: pages
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new::<_, String, String>([])
    }

    /// Every URL requested so far, in request order.
    pub fn requested(&self) -> Vec<String> {
        self.calls.lock().expect("fetch log lock").clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requested().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl PageFetcher for FixtureFetcher {
    async fn fetch_text(&self, url: &str) -> Option<String> {
        self.calls
            .lock()
            .expect("fetch log lock")
            .push(url.to_owned());
        self.pages.get(url).cloned()
    }
}
