//! # Tracescope UI
//!
//! Styled composers for an immediate-mode diagnostic interface.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                         ONE FRAME                           │
//! ├────────────────────────────────────────────────────────────┤
//! │  InputState + HitMap → Composers → Ops → flatten → Host     │
//! │        ↓                   ↓         ↓         ↓            │
//! │  Click/press state   Constraints  Record/   DisplayList     │
//! │  (caller-owned)      → Dimensions  replay   (+ next HitMap) │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every composer takes a [`Context`] and returns the [`Dimensions`] it
//! consumed. The [`Theme`] is read-only while a frame is laid out and can
//! be shared between threads.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod color;
pub mod error;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod render;
pub mod text;
pub mod theme;
pub mod unit;
pub mod widget;

pub use color::Color;
pub use error::{UiError, UiResult};
pub use geometry::{FRect, Path, PathBuilder, Point, PointF, Rect};
pub use input::{HitMap, InputState, MouseButton};
pub use layout::{Constraints, Context, Dimensions, Flex, Spacer, Stack, StackChild};
pub use render::{CallOp, DisplayList, Ops};
pub use text::{Font, MonoShaper, Shaper};
pub use theme::{Palette, Theme, ThemeConfig, DEFAULT_PALETTE};
pub use unit::{Dp, Metric, Sp};
pub use widget::{
    ButtonStyle, CheckBoxStyle, Foldable, Label, ProgressBarStyle, Tooltip, WidgetId,
};
