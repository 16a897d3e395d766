//! Pointer input for widget interaction.
//!
//! The host delivers pointer events into an [`InputState`] before each
//! frame. Pointer areas are not known until a frame has been laid out, so
//! handlers hit-test against the areas recorded in the previous frame's
//! display list, kept in a [`HitMap`].

use std::collections::HashMap;

use crate::geometry::{Point, PointF, Rect};
use crate::render::DisplayList;
use crate::widget::WidgetId;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button; the only one handlers react to.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
}

impl MouseButton {
    const fn bit(self) -> u8 {
        match self {
            Self::Left => 0b001,
            Self::Right => 0b010,
            Self::Middle => 0b100,
        }
    }
}

/// A set of mouse buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Buttons(u8);

impl Buttons {
    const NONE: Self = Self(0);

    fn insert(&mut self, button: MouseButton) {
        self.0 |= button.bit();
    }

    fn remove(&mut self, button: MouseButton) {
        self.0 &= !button.bit();
    }

    const fn has(self, button: MouseButton) -> bool {
        self.0 & button.bit() != 0
    }
}

/// Pointer state as delivered by the host.
///
/// Edges (`went_down`, `went_up`) describe the current frame only and are
/// cleared by [`InputState::begin_frame`]; `held` carries over.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pointer: PointF,
    held: Buttons,
    went_down: Buttons,
    went_up: Buttons,
    frame: u64,
}

impl InputState {
    /// Creates a state with the pointer at the origin and no buttons held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the next frame.
    pub fn begin_frame(&mut self) {
        self.went_down = Buttons::NONE;
        self.went_up = Buttons::NONE;
        self.frame += 1;
    }

    /// Frames started so far. Handlers use it to process input once.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Moves the pointer.
    pub fn set_mouse_pos(&mut self, x: f32, y: f32) {
        self.pointer = PointF::new(x, y);
    }

    /// The device pixel under the pointer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn mouse_point(&self) -> Point {
        Point::new(self.pointer.x.floor() as i32, self.pointer.y.floor() as i32)
    }

    /// The host saw `button` go down.
    pub fn mouse_button_down(&mut self, button: MouseButton) {
        self.went_down.insert(button);
        self.held.insert(button);
    }

    /// The host saw `button` go up.
    pub fn mouse_button_up(&mut self, button: MouseButton) {
        self.went_up.insert(button);
        self.held.remove(button);
    }

    /// True if `button` went down during this frame.
    #[must_use]
    pub fn mouse_clicked(&self, button: MouseButton) -> bool {
        self.went_down.has(button)
    }

    /// True if `button` went up during this frame.
    #[must_use]
    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.went_up.has(button)
    }

    /// True while `button` is held.
    #[must_use]
    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.held.has(button)
    }
}

/// Absolute pointer areas of input handlers, by identity.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    areas: HashMap<WidgetId, Rect>,
}

impl HitMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the map with the areas registered in a finished frame.
    ///
    /// A handler registered more than once keeps its last area.
    pub fn update(&mut self, list: &DisplayList) {
        self.areas.clear();
        self.areas.extend(list.hit_areas());
    }

    /// Returns the area registered for `id`.
    #[must_use]
    pub fn area(&self, id: WidgetId) -> Option<Rect> {
        self.areas.get(&id).copied()
    }

    /// Returns true if `p` falls inside the area registered for `id`.
    #[must_use]
    pub fn hit(&self, id: WidgetId, p: Point) -> bool {
        self.area(id).is_some_and(|r| r.contains(p))
    }
}
