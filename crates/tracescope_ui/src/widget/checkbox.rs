//! Labelled check boxes.

use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::layout::{rigid, Constraints, Context, Dimensions, Flex, Spacer};
use crate::text::Font;
use crate::theme::Theme;
use crate::unit::{Dp, Sp};
use crate::widget::{Bool, Border, Label};

/// A square indicator followed by a label; clicking anywhere toggles it.
#[derive(Debug)]
pub struct CheckBoxStyle<'a> {
    /// Persistent state, owned by the caller.
    pub checkbox: &'a mut Bool,
    /// Text to the right of the indicator. Empty means none.
    pub label: &'a str,
    /// Label size; also sets the indicator size.
    pub text_size: Sp,
    /// Indicator outline and check mark.
    pub foreground_color: Color,
    /// Indicator fill.
    pub background_color: Color,
    /// Label color.
    pub text_color: Color,
}

impl<'a> CheckBoxStyle<'a> {
    /// Creates a check box for `checkbox`.
    #[must_use]
    pub fn new(checkbox: &'a mut Bool, label: &'a str) -> Self {
        Self {
            checkbox,
            label,
            text_size: Sp(12.0),
            foreground_color: Color::BLACK,
            background_color: Color::TRANSPARENT,
            text_color: Color::BLACK,
        }
    }

    /// Processes clicks, then paints the indicator and label.
    pub fn layout(self, gtx: Context<'_>, theme: &Theme) -> Dimensions {
        let _span = tracing::trace_span!("CheckBoxStyle::layout").entered();

        let Self {
            checkbox,
            label,
            text_size,
            foreground_color,
            background_color,
            text_color,
        } = self;
        checkbox.update(gtx.input, gtx.hits);
        let checked = checkbox.value;

        checkbox.layout(gtx, |gtx| {
            let mut children = vec![
                rigid(move |mut gtx: Context<'_>| {
                    let size = gtx.dp(gtx.metric.sp_to_dp(text_size));
                    let exact = Constraints::exact(Point::new(size, size));
                    let border = Border {
                        color: foreground_color,
                        width: Dp(1.0),
                    };
                    border.layout(gtx.with_constraints(exact), |gtx: Context<'_>| {
                        let min = gtx.constraints.min;
                        gtx.ops.fill_rect(Rect::from_size(min), background_color);
                        if checked {
                            let mut inset = min.x / 4;
                            if inset == 0 {
                                inset = gtx.dp(Dp(1.0));
                            }
                            let mark = Rect::new(
                                Point::new(inset, inset),
                                Point::new(min.x - inset, min.x - inset),
                            );
                            gtx.ops.fill_rect(mark, foreground_color);
                        }
                        Dimensions::from_size(min)
                    })
                }),
                rigid(|gtx: Context<'_>| {
                    Spacer {
                        width: Dp(3.0),
                        ..Spacer::default()
                    }
                    .layout(gtx)
                }),
            ];
            if !label.is_empty() {
                children.push(rigid(move |gtx: Context<'_>| {
                    Label::SINGLE_LINE.layout(
                        gtx,
                        theme.shaper.as_ref(),
                        Font::default(),
                        text_size,
                        label,
                        text_color,
                    )
                }));
            }
            Flex::horizontal().layout(gtx, children)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{HitMap, InputState};
    use crate::render::{Ops, Shape};
    use crate::unit::Metric;

    fn layout(checkbox: &mut Bool, label: &str) -> (Dimensions, Ops) {
        let theme = Theme::default();
        let mut ops = Ops::new();
        let input = InputState::new();
        let hits = HitMap::new();
        let gtx = Context::new(&mut ops, &input, &hits, Metric::default(), Point::new(400, 400));
        let dims = CheckBoxStyle::new(checkbox, label).layout(gtx, &theme);
        (dims, ops)
    }

    #[test]
    fn test_checked_paints_inset_mark() {
        let mut b = Bool::new(true);
        let (_, ops) = layout(&mut b, "x");
        let list = ops.flatten();
        let mark = Shape::Rect(Rect::new(Point::new(3, 3), Point::new(9, 9)));
        assert!(list.fills().any(|(s, c)| *s == mark && c == Color::BLACK));
    }

    #[test]
    fn test_unchecked_has_no_mark() {
        let mut b = Bool::new(false);
        let (_, ops) = layout(&mut b, "x");
        let list = ops.flatten();
        let mark = Shape::Rect(Rect::new(Point::new(3, 3), Point::new(9, 9)));
        assert!(!list.fills().any(|(s, _)| *s == mark));
    }

    #[test]
    fn test_empty_label_paints_no_text() {
        let mut b = Bool::new(false);
        let (dims, ops) = layout(&mut b, "");
        assert_eq!(ops.flatten().texts().count(), 0);
        assert_eq!(dims.size, Point::new(12 + 3, 12));
    }

    #[test]
    fn test_tiny_indicator_uses_one_pixel_inset() {
        let mut b = Bool::new(true);
        let mut style = CheckBoxStyle::new(&mut b, "");
        style.text_size = Sp(3.0);

        let theme = Theme::default();
        let mut ops = Ops::new();
        let input = InputState::new();
        let hits = HitMap::new();
        let gtx = Context::new(&mut ops, &input, &hits, Metric::default(), Point::new(400, 400));
        style.layout(gtx, &theme);

        let list = ops.flatten();
        let mark = Shape::Rect(Rect::new(Point::new(1, 1), Point::new(2, 2)));
        assert!(list.fills().any(|(s, _)| *s == mark));
    }
}
