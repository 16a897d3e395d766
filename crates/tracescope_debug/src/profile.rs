//! # Memory Profile
//!
//! Allocation counters and a one-shot dump to disk.
//!
//! ## Safety Note
//!
//! [`TrackingAllocator`] implements `GlobalAlloc`, which is an unsafe
//! trait. Every method forwards to the system allocator with the caller's
//! arguments unchanged and only adds atomic counter updates.

#![allow(unsafe_code)]

use std::alloc::{GlobalAlloc, Layout, System};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{DebugError, DebugResult};

static ALLOCATIONS: AtomicU64 = AtomicU64::new(0);
static DEALLOCATIONS: AtomicU64 = AtomicU64::new(0);
static ALLOCATED_BYTES: AtomicU64 = AtomicU64::new(0);
static FREED_BYTES: AtomicU64 = AtomicU64::new(0);
static LIVE_BYTES: AtomicU64 = AtomicU64::new(0);
static PEAK_LIVE_BYTES: AtomicU64 = AtomicU64::new(0);

/// A system allocator that counts what passes through it.
///
/// Counting only happens when installed as the global allocator:
///
/// ```rust,ignore
/// #[global_allocator]
/// static ALLOC: tracescope_debug::TrackingAllocator = tracescope_debug::TrackingAllocator;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackingAllocator;

fn record_alloc(size: usize) {
    let size = size as u64;
    ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
    ALLOCATED_BYTES.fetch_add(size, Ordering::Relaxed);
    let live = LIVE_BYTES.fetch_add(size, Ordering::Relaxed) + size;
    PEAK_LIVE_BYTES.fetch_max(live, Ordering::Relaxed);
}

fn record_free(size: usize) {
    let size = size as u64;
    DEALLOCATIONS.fetch_add(1, Ordering::Relaxed);
    FREED_BYTES.fetch_add(size, Ordering::Relaxed);
    LIVE_BYTES.fetch_sub(size, Ordering::Relaxed);
}

// SAFETY: all allocation work is delegated to `System` with the caller's
// layout and pointers; the counters never touch the allocated memory.
unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: same contract as the caller's.
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        // SAFETY: same contract as the caller's.
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: `ptr` was returned by this allocator, which is `System`.
        unsafe { System.dealloc(ptr, layout) };
        record_free(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: `ptr` was returned by this allocator, which is `System`.
        let new = unsafe { System.realloc(ptr, layout, new_size) };
        if !new.is_null() {
            record_free(layout.size());
            record_alloc(new_size);
        }
        new
    }
}

/// Snapshot of the allocation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemProfile {
    /// Successful allocations.
    pub allocations: u64,
    /// Deallocations.
    pub deallocations: u64,
    /// Bytes ever allocated.
    pub allocated_bytes: u64,
    /// Bytes ever freed.
    pub freed_bytes: u64,
    /// Bytes currently allocated.
    pub live_bytes: u64,
    /// Highest value `live_bytes` has reached.
    pub peak_live_bytes: u64,
}

impl MemProfile {
    /// Reads the counters. All zero unless [`TrackingAllocator`] is the
    /// global allocator.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            allocations: ALLOCATIONS.load(Ordering::Relaxed),
            deallocations: DEALLOCATIONS.load(Ordering::Relaxed),
            allocated_bytes: ALLOCATED_BYTES.load(Ordering::Relaxed),
            freed_bytes: FREED_BYTES.load(Ordering::Relaxed),
            live_bytes: LIVE_BYTES.load(Ordering::Relaxed),
            peak_live_bytes: PEAK_LIVE_BYTES.load(Ordering::Relaxed),
        }
    }

    /// Writes the profile as TOML to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`DebugError::Serialize`] or [`DebugError::Io`].
    pub fn write_to(&self, path: &Path) -> DebugResult<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|source| DebugError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Captures the allocation counters and writes them to `path`.
///
/// Failures are logged and otherwise ignored.
pub fn write_memprofile(path: impl AsRef<Path>) {
    let path = path.as_ref();
    let profile = MemProfile::capture();
    match profile.write_to(path) {
        Ok(()) => tracing::info!(
            path = %path.display(),
            live_bytes = profile.live_bytes,
            "wrote memory profile"
        ),
        Err(err) => tracing::error!(error = %err, "couldn't write memory profile"),
    }
}
