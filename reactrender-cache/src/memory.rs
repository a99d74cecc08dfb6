//! In-memory render cache.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use reactrender_core::{RenderCache, RenderError, RenderResult};

use crate::error::CacheError;

/// Thread-safe map from cache key to render result.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, RenderResult>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, RenderResult>>, CacheError> {
        self.entries.lock().map_err(|_| CacheError::Poisoned)
    }

    pub fn len(&self) -> Result<usize, CacheError> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CacheError> {
        Ok(self.len()? == 0)
    }

    /// Drop every entry.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.entries()?.clear();
        Ok(())
    }
}

impl RenderCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<RenderResult>, RenderError> {
        let entries = self.entries().map_err(|e| e.into_render(key))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &RenderResult) -> Result<(), RenderError> {
        let mut entries = self.entries().map_err(|e| e.into_render(key))?;
        entries.insert(key.to_owned(), value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_then_hit() {
        let cache = MemoryCache::new();
        assert!(cache.get("GreeterGreeter.rendered").unwrap().is_none());

        let result = RenderResult::markup("<p>hi</p>");
        cache.set("GreeterGreeter.rendered", &result).unwrap();

        assert_eq!(cache.get("GreeterGreeter.rendered").unwrap(), Some(result));
        assert_eq!(cache.len().unwrap(), 1);
    }

    #[test]
    fn set_overwrites_and_clear_empties() {
        let cache = MemoryCache::new();
        cache.set("k", &RenderResult::markup("a")).unwrap();
        cache.set("k", &RenderResult::markup("b")).unwrap();
        assert_eq!(cache.get("k").unwrap(), Some(RenderResult::markup("b")));

        cache.clear().unwrap();
        assert!(cache.is_empty().unwrap());
    }

    #[test]
    fn poisoned_lock_is_reported_everywhere() {
        let cache = std::sync::Arc::new(MemoryCache::new());
        let poisoner = std::sync::Arc::clone(&cache);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.entries.lock().unwrap();
            panic!("writer panicked");
        })
        .join();

        assert!(matches!(cache.len(), Err(CacheError::Poisoned)));
        assert!(matches!(cache.clear(), Err(CacheError::Poisoned)));
        assert!(matches!(
            cache.get("k"),
            Err(RenderError::Cache { .. })
        ));
        assert!(cache.set("k", &RenderResult::markup("a")).is_err());
    }
}
