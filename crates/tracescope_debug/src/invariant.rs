//! Internal consistency checks.

/// Panics with `failed assertion: {msg}` unless `cond` holds.
///
/// Release builds abort on panic, so a violated invariant ends the process.
///
/// # Panics
///
/// Panics if `cond` is false.
#[track_caller]
pub fn assert_invariant(cond: bool, msg: &str) {
    if !cond {
        panic!("failed assertion: {msg}");
    }
}
