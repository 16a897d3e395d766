//! Tooltips and other boxed single-line text.
//!
//! The background has to be exactly as large as the text plus padding, but
//! the text is only measured by laying it out. The label is therefore
//! recorded first, the background painted from the measured size, and the
//! recording replayed on top of it.

use crate::geometry::{Point, Rect};
use crate::layout::{clipped, Context, Dimensions};
use crate::text::Font;
use crate::theme::Theme;
use crate::widget::{Border, Label};

/// Lays out `text` on the window background inside the window border.
///
/// The incoming minimum constraint is ignored and output is clipped to the
/// maximum constraint. The reported size is the text plus the window
/// padding on every side.
pub fn bordered_text(gtx: Context<'_>, theme: &Theme, text: &str) -> Dimensions {
    let border = Border {
        color: theme.palette.window_border,
        width: theme.window_border,
    };
    border.layout(gtx, |gtx: Context<'_>| {
        let bounds = Rect::from_size(gtx.constraints.max);
        clipped(gtx, bounds, |gtx| padded_label(gtx, theme, text))
    })
}

fn padded_label(mut gtx: Context<'_>, theme: &Theme, text: &str) -> Dimensions {
    gtx.constraints.min = Point::ZERO;
    let padding = gtx.dp(theme.window_padding);

    let rec = gtx.ops.record();
    let dims = Label::default().layout(
        gtx.reborrow(),
        theme.shaper.as_ref(),
        Font::default(),
        theme.text_size,
        text,
        theme.palette.foreground,
    );
    let call = rec.stop(gtx.ops);

    let total = dims.size + Point::new(2 * padding, 2 * padding);
    gtx.ops.fill_rect(Rect::from_size(total), theme.palette.window_background);

    let off = gtx.ops.push_offset(Point::new(padding, padding));
    call.add(gtx.ops);
    off.pop(gtx.ops);

    Dimensions {
        size: gtx.constraints.constrain(total),
        baseline: dims.baseline + padding,
    }
}

/// A hover tooltip.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tooltip;

impl Tooltip {
    /// Lays out the tooltip text.
    pub fn layout(self, gtx: Context<'_>, theme: &Theme, text: &str) -> Dimensions {
        let _span = tracing::trace_span!("Tooltip::layout").entered();
        bordered_text(gtx, theme, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{HitMap, InputState};
    use crate::layout::Constraints;
    use crate::render::{Ops, Shape};
    use crate::unit::Metric;

    #[test]
    fn test_background_hugs_text() {
        let theme = Theme::default();
        let mut ops = Ops::new();
        let input = InputState::new();
        let hits = HitMap::new();
        let mut gtx = Context::new(&mut ops, &input, &hits, Metric::default(), Point::new(400, 400));
        gtx.constraints = Constraints {
            min: Point::new(300, 100),
            max: Point::new(400, 400),
        };

        let dims = Tooltip.layout(gtx, &theme, "hello");
        let m = theme.shaper.shape_line(Font::default(), 12.0, "hello");
        assert_eq!(dims.size, Point::new(m.width + 4, m.height() + 4));

        let list = ops.flatten();
        let (bg, color) = list.fills().next().expect("background");
        assert_eq!(color, theme.palette.window_background);
        assert_eq!(*bg, Shape::Rect(Rect::from_size(dims.size)));

        let run = list.texts().next().expect("label");
        assert_eq!(run.origin, Point::new(2, 2));
        assert_eq!(run.color, theme.palette.foreground);
    }

    #[test]
    fn test_clipped_to_max() {
        let theme = Theme::default();
        let mut ops = Ops::new();
        let input = InputState::new();
        let hits = HitMap::new();
        let gtx = Context::new(&mut ops, &input, &hits, Metric::default(), Point::new(10, 10));

        let dims = bordered_text(gtx, &theme, "a rather long tooltip");
        assert_eq!(dims.size.x, 10);

        let list = ops.flatten();
        for p in list.primitives() {
            if let crate::render::Primitive::Text { clip, .. } = p {
                let clip = clip.expect("clipped");
                assert!(clip.max.x <= 10 && clip.max.y <= 10);
            }
        }
    }

    #[test]
    fn test_inside_outer_recording() {
        let theme = Theme::default();
        let mut ops = Ops::new();
        let input = InputState::new();
        let hits = HitMap::new();

        let outer = ops.record();
        let dims = {
            let gtx = Context::new(&mut ops, &input, &hits, Metric::default(), Point::new(400, 400));
            bordered_text(gtx, &theme, "nested")
        };
        let call = outer.stop(&mut ops);
        assert!(ops.is_empty());

        let off = ops.push_offset(Point::new(50, 60));
        call.add(&mut ops);
        off.pop(&mut ops);

        let list = ops.flatten();
        let (bg, _) = list.fills().next().expect("background");
        assert_eq!(*bg, Shape::Rect(Rect::from_size(dims.size).translate(Point::new(50, 60))));
    }
}
