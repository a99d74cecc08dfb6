//! # reactrender-cache
//!
//! [`RenderCache`](reactrender_core::RenderCache) backends for memoized
//! server-side renders.
//!
//! - [`MemoryCache`] — process-local map, lost on restart.
//! - [`FileCache`] — one JSON document per key on disk, written atomically.

pub mod error;
pub mod file;
pub mod memory;

pub use error::CacheError;
pub use file::{CacheEntry, FileCache};
pub use memory::MemoryCache;
