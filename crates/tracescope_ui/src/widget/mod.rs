//! Styled composers and the state handles they operate on.
//!
//! Style values (`*Style`) are cheap and built fresh every frame from a
//! caller-owned state handle ([`Bool`], [`Clickable`]) plus colors. The
//! state handles persist across frames.

mod border;
mod button;
mod checkbox;
mod foldable;
mod label;
mod progress;
mod state;
mod tooltip;

pub use border::{paint_outline, Border, Bordered};
pub use button::ButtonStyle;
pub use checkbox::CheckBoxStyle;
pub use foldable::Foldable;
pub use label::{Label, TextAlignment};
pub use progress::{clamp1, ProgressBarStyle};
pub use state::{Bool, Clickable, WidgetId};
pub use tooltip::{bordered_text, Tooltip};
