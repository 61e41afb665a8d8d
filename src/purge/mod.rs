
use std::io::{Stdout, Write};

use futures::future::try_join_all;

use crate::error::PurgeResult;
use crate::storage::{ObjectStore, PAGE_SIZE};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PurgeSummary {
    pub deleted: usize,
    pub pages: usize,
}

/// Empties a bucket one page at a time.
///
/// Each page is listed, then every key on it is deleted concurrently. The
/// next page is only requested once the whole batch has succeeded, starting
/// after the last key of the batch. The first failure from either the list or
/// a delete ends the run; nothing already deleted is put back.
///
/// Progress lines (`Deleting: <key>` and the final count) go to `out`,
/// stdout unless built with [`BucketPurger::with_output`].
pub struct BucketPurger<S, W = Stdout> {
    store: S,
    bucket: String,
    out: W,
}
impl<S: ObjectStore> BucketPurger<S> {
    pub fn new(store: S, bucket: impl Into<String>) -> Self {
        Self::with_output(store, bucket, std::io::stdout())
    }
}
impl<S: ObjectStore, W: Write> BucketPurger<S, W> {
    pub fn with_output(store: S, bucket: impl Into<String>, out: W) -> Self {
        BucketPurger {
            store,
            bucket: bucket.into(),
            out,
        }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &W {
        &self.out
    }

    pub async fn purge_bucket(&mut self) -> PurgeResult<PurgeSummary> {
        writeln!(self.out, "Starting purge for bucket: {}...", self.bucket)?;
        log::info!("Purging {} in pages of {}", &self.bucket, PAGE_SIZE);

        let mut summary = PurgeSummary::default();
        let mut start_after: Option<String> = None;

        loop {
            let page = self
                .store
                .list_page(PAGE_SIZE, start_after.as_deref())
                .await?;

            // Stop on an empty page even if the store says more follow,
            // otherwise a bad continuation flag would spin forever.
            if page.is_empty() {
                if page.is_truncated {
                    log::warn!("Empty page claimed to be truncated, stopping anyway");
                }
                break;
            }

            // Nothing is polled until the join, so every key is announced
            // before any delete is sent.
            for key in &page.keys {
                writeln!(self.out, "Deleting: {}", key)?;
            }
            let store = &self.store;
            try_join_all(page.keys.iter().map(|key| store.delete(key))).await?;

            summary.deleted += page.len();
            summary.pages += 1;
            log::info!(
                "Page {} done: {} objects, {} so far",
                summary.pages,
                page.len(),
                summary.deleted
            );

            if !page.is_truncated {
                break;
            }
            start_after = page.last_key().map(str::to_string);
        }

        writeln!(self.out, "\nSuccessfully purged {} objects.", summary.deleted)?;
        self.out.flush()?;
        log::info!("Purge of {} complete", &self.bucket);

        Ok(summary)
    }
}
