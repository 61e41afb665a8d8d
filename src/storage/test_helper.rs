use std::collections::BTreeSet;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{ObjectStore, Page};
use crate::error::{PurgeError, PurgeResult};

/// Store that keeps keys in lexical order, like S3, and records every call.
#[derive(Default)]
pub struct InMemoryStore {
    objects: Mutex<BTreeSet<String>>,
    list_calls: Mutex<Vec<Option<String>>>,
    deleted: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    fail_listing: bool,
    fail_delete_of: Option<String>,
    always_truncated: bool,
}
impl InMemoryStore {
    pub fn with_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        InMemoryStore {
            objects: Mutex::new(keys.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// `count` keys which sort in the order they were generated.
    pub fn numbered(count: usize) -> Self {
        Self::with_keys((1..=count).map(numbered_key))
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn failing_delete_of(mut self, key: &str) -> Self {
        self.fail_delete_of = Some(key.to_string());
        self
    }

    /// Claims more pages follow, even when none do.
    pub fn always_truncated(mut self) -> Self {
        self.always_truncated = true;
        self
    }

    pub fn remaining(&self) -> BTreeSet<String> {
        self.objects.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> Vec<Option<String>> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    /// Most deletes that were started and not yet finished at any one time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

pub fn numbered_key(i: usize) -> String {
    format!("key-{:05}", i)
}

impl ObjectStore for InMemoryStore {
    async fn list_page(&self, max_keys: i32, start_after: Option<&str>) -> PurgeResult<Page> {
        self.list_calls
            .lock()
            .unwrap()
            .push(start_after.map(str::to_string));

        if self.fail_listing {
            return Err(PurgeError::ListingFailure("InvalidAccessKeyId".into()));
        }

        let objects = self.objects.lock().unwrap();
        let lower = match start_after {
            Some(cursor) => Bound::Excluded(cursor.to_string()),
            None => Bound::Unbounded,
        };
        let mut after_cursor = objects.range((lower, Bound::Unbounded));

        let keys: Vec<String> = after_cursor
            .by_ref()
            .take(max_keys as usize)
            .cloned()
            .collect();
        let more_follow = after_cursor.next().is_some();

        Ok(Page {
            keys,
            is_truncated: more_follow || self.always_truncated,
        })
    }

    async fn delete(&self, key: &str) -> PurgeResult<()> {
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

        // Give the other deletes in the batch a chance to start first.
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_delete_of.as_deref() == Some(key) {
            return Err(PurgeError::DeletionFailure(
                key.to_string(),
                "AccessDenied".into(),
            ));
        }

        self.objects.lock().unwrap().remove(key);
        self.deleted.lock().unwrap().push(key.to_string());
        Ok(())
    }
}
