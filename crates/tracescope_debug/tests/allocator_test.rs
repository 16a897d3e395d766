//! # Allocator Tests
//!
//! Runs with the tracking allocator installed for the whole test binary.

use tracescope_debug::{write_memprofile, MemProfile, TrackingAllocator};

#[global_allocator]
static ALLOC: TrackingAllocator = TrackingAllocator;

/// Test: Allocations show up in the counters.
#[test]
fn test_counters_follow_allocations() {
    let before = MemProfile::capture();
    let buffer: Vec<u8> = std::hint::black_box(Vec::with_capacity(64 * 1024));
    let during = MemProfile::capture();

    assert!(during.allocations > before.allocations);
    assert!(during.allocated_bytes >= before.allocated_bytes + 64 * 1024);
    assert!(during.peak_live_bytes >= 64 * 1024);
    drop(buffer);

    let after = MemProfile::capture();
    assert!(after.deallocations > during.deallocations);
    assert!(after.freed_bytes >= during.freed_bytes + 64 * 1024);
}

/// Test: The dump is readable TOML with live counters.
#[test]
fn test_memprofile_dump() {
    let name = format!("tracescope-alloc-{}.toml", std::process::id());
    let path = std::env::temp_dir().join(name);
    write_memprofile(&path);

    let text = std::fs::read_to_string(&path).expect("profile written");
    let profile: MemProfile = toml::from_str(&text).expect("valid profile");
    assert!(profile.allocations > 0);
    assert!(profile.allocated_bytes >= profile.freed_bytes);
    let _ = std::fs::remove_file(&path);
}
