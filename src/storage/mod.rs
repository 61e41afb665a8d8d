pub mod s3;

#[cfg(test)]
pub(crate) mod test_helper;

use std::future::Future;

use crate::error::PurgeResult;

/// Most keys a single list call asks for.
pub const PAGE_SIZE: i32 = 1000;

/// One batch of keys from a single list call, in store order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub keys: Vec<String>,
    pub is_truncated: bool,
}
impl Page {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Cursor for the page that follows this one.
    pub fn last_key(&self) -> Option<&str> {
        self.keys.last().map(String::as_str)
    }
}

pub trait ObjectStore {
    /// Lists up to `max_keys` keys ordered strictly after `start_after`.
    fn list_page(
        &self,
        max_keys: i32,
        start_after: Option<&str>,
    ) -> impl Future<Output = PurgeResult<Page>>;

    /// Deletes a single object. The returned future is independent of other
    /// deletes so a caller may drive many at once.
    fn delete(&self, key: &str) -> impl Future<Output = PurgeResult<()>>;
}

impl<S: ObjectStore> ObjectStore for &S {
    fn list_page(
        &self,
        max_keys: i32,
        start_after: Option<&str>,
    ) -> impl Future<Output = PurgeResult<Page>> {
        (**self).list_page(max_keys, start_after)
    }

    fn delete(&self, key: &str) -> impl Future<Output = PurgeResult<()>> {
        (**self).delete(key)
    }
}
