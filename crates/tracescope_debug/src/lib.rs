//! # Tracescope Debug
//!
//! Live telemetry for the renderer and a few process diagnostics.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  append   ┌─────────────────────────┐  snapshot  ┌─────────────┐
//! │  Producers   │ ────────► │ DebugGraph (1 lock each)│ ─────────► │ Render pass │
//! │ (any thread) │           │  VecDeque<Sample>       │  + prune   │  (plots)    │
//! └──────────────┘           └─────────────────────────┘            └─────────────┘
//! ```
//!
//! [`DebugWindow::global`] is the process-wide channel set. Channels are
//! independent; a producer never waits on a lock held by a different
//! channel, and the render pass never draws while holding one.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod graph;
pub mod invariant;
pub mod profile;
pub mod window;

pub use error::{DebugError, DebugResult};
pub use graph::{DebugGraph, DebugGraphConfig, Sample};
pub use invariant::assert_invariant;
pub use profile::{write_memprofile, MemProfile, TrackingAllocator};
pub use window::{DebugWindow, DebugWindowConfig};
