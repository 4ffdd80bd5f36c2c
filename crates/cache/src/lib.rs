//! Profile cache service.
//!
//! Keeps an in-memory snapshot of the profile collection consistent
//! with the backend: reads are served from the snapshot, writes (done
//! elsewhere) invalidate it, and a background task re-fetches with
//! coalescing so rapid successive edits cost at most one extra request.

pub mod service;

pub use service::{CacheEntry, FetchStatus, ProfileCache, PROFILES_KEY};
