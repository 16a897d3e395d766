//! Persistent input state handles.
//!
//! The caller owns these across frames and lends them to composers by
//! `&mut` on every frame. A composer never creates or stores them.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::Rect;
use crate::input::{HitMap, InputState, MouseButton};
use crate::layout::{Context, Dimensions};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for an input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Allocates a process-unique ID.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A click-capable area.
///
/// A click is a left-button press inside the area followed by a release
/// inside the area. The area is the one registered by the previous frame.
#[derive(Debug, Clone)]
pub struct Clickable {
    id: WidgetId,
    pressed: bool,
    clicks: u32,
    last_frame: Option<u64>,
}

impl Default for Clickable {
    fn default() -> Self {
        Self::new()
    }
}

impl Clickable {
    /// Creates a handler with a fresh identity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: WidgetId::next(),
            pressed: false,
            clicks: 0,
            last_frame: None,
        }
    }

    /// Returns the handler identity.
    #[must_use]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Processes this frame's pointer input. Runs at most once per frame.
    pub fn update(&mut self, input: &InputState, hits: &HitMap) {
        if self.last_frame == Some(input.frame()) {
            return;
        }
        self.last_frame = Some(input.frame());

        let over = hits.hit(self.id, input.mouse_point());
        if input.mouse_clicked(MouseButton::Left) && over {
            self.pressed = true;
        }
        if input.mouse_released(MouseButton::Left) {
            if self.pressed && over {
                self.clicks += 1;
            }
            self.pressed = false;
        }
        if !input.mouse_down(MouseButton::Left) {
            self.pressed = false;
        }
    }

    /// Consumes one pending click.
    pub fn clicked(&mut self) -> bool {
        if self.clicks == 0 {
            return false;
        }
        self.clicks -= 1;
        true
    }

    /// Returns true while the pointer holds the button down on this area.
    #[must_use]
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// Lays out `w` and registers its extent as the pointer area.
    pub fn layout(
        &mut self,
        mut gtx: Context<'_>,
        w: impl FnOnce(Context<'_>) -> Dimensions,
    ) -> Dimensions {
        self.update(gtx.input, gtx.hits);
        let dims = w(gtx.reborrow());
        gtx.ops.hit_area(self.id, Rect::from_size(dims.size));
        dims
    }
}

/// A boolean toggled by clicks.
#[derive(Debug, Clone, Default)]
pub struct Bool {
    /// Current value.
    pub value: bool,
    click: Clickable,
}

impl Bool {
    /// Creates a toggle with an initial value.
    #[must_use]
    pub fn new(value: bool) -> Self {
        Self {
            value,
            click: Clickable::new(),
        }
    }

    /// Processes this frame's input. Returns true if the value changed.
    pub fn update(&mut self, input: &InputState, hits: &HitMap) -> bool {
        self.click.update(input, hits);
        let mut changed = false;
        while self.click.clicked() {
            self.toggle();
            changed = !changed;
        }
        changed
    }

    /// Flips the value as if the user had clicked.
    pub fn toggle(&mut self) {
        self.value = !self.value;
    }

    /// Returns the identity of the underlying click area.
    #[must_use]
    pub fn id(&self) -> WidgetId {
        self.click.id()
    }

    /// Lays out `w` as the clickable region of the toggle.
    pub fn layout(
        &mut self,
        gtx: Context<'_>,
        w: impl FnOnce(Context<'_>) -> Dimensions,
    ) -> Dimensions {
        self.update(gtx.input, gtx.hits);
        self.click.layout(gtx, w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::render::Ops;
    use crate::unit::Metric;

    fn frame(click: &mut Clickable, input: &InputState, hits: &mut HitMap) {
        let mut ops = Ops::new();
        let gtx = Context::new(&mut ops, input, hits, Metric::default(), Point::new(100, 100));
        click.layout(gtx, |gtx| Dimensions::from_size(gtx.constraints.constrain(Point::new(20, 10))));
        hits.update(&ops.flatten());
    }

    #[test]
    fn test_press_and_release_inside_is_a_click() {
        let mut click = Clickable::new();
        let mut hits = HitMap::new();
        let mut input = InputState::new();
        frame(&mut click, &input, &mut hits);

        input.begin_frame();
        input.set_mouse_pos(5.0, 5.0);
        input.mouse_button_down(MouseButton::Left);
        frame(&mut click, &input, &mut hits);
        assert!(click.pressed());
        assert!(!click.clicked());

        input.begin_frame();
        input.mouse_button_up(MouseButton::Left);
        frame(&mut click, &input, &mut hits);
        assert!(!click.pressed());
        assert!(click.clicked());
        assert!(!click.clicked());
    }

    #[test]
    fn test_release_outside_cancels() {
        let mut click = Clickable::new();
        let mut hits = HitMap::new();
        let mut input = InputState::new();
        frame(&mut click, &input, &mut hits);

        input.begin_frame();
        input.set_mouse_pos(5.0, 5.0);
        input.mouse_button_down(MouseButton::Left);
        frame(&mut click, &input, &mut hits);

        input.begin_frame();
        input.set_mouse_pos(80.0, 80.0);
        input.mouse_button_up(MouseButton::Left);
        frame(&mut click, &input, &mut hits);
        assert!(!click.clicked());
    }

    #[test]
    fn test_update_runs_once_per_frame() {
        let mut b = Bool::new(false);
        let mut hits = HitMap::new();
        let mut input = InputState::new();
        let mut ops = Ops::new();
        {
            let gtx = Context::new(&mut ops, &input, &hits, Metric::default(), Point::new(50, 50));
            b.layout(gtx, |gtx| Dimensions::from_size(gtx.constraints.max));
        }
        hits.update(&ops.flatten());

        input.begin_frame();
        input.set_mouse_pos(1.0, 1.0);
        input.mouse_button_down(MouseButton::Left);
        input.mouse_button_up(MouseButton::Left);

        assert!(b.update(&input, &hits));
        assert!(!b.update(&input, &hits));
        assert!(b.value);
    }
}
