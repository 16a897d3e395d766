//! Push buttons.

use crate::color::Color;
use crate::geometry::Rect;
use crate::layout::{Alignment, Context, Dimensions, Stack, StackChild};
use crate::text::Font;
use crate::theme::Theme;
use crate::unit::{Dp, Sp};
use crate::widget::{Bordered, Clickable, Label, TextAlignment};

/// A bordered box with a centered label.
#[derive(Debug)]
pub struct ButtonStyle<'a> {
    /// Label text.
    pub text: &'a str,
    /// Persistent state, owned by the caller.
    pub button: &'a mut Clickable,
}

impl<'a> ButtonStyle<'a> {
    /// Fill while the pointer holds the button.
    pub const PRESSED: Color = Color::rgb(0xFF, 0xFF, 0x00);
    /// Fill otherwise.
    pub const IDLE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    /// Label and outline color.
    pub const TEXT: Color = Color::rgb(0x00, 0x00, 0x00);
    /// Label size.
    pub const TEXT_SIZE: Sp = Sp(12.0);

    /// Creates a button for `button`.
    #[must_use]
    pub fn new(button: &'a mut Clickable, text: &'a str) -> Self {
        Self { text, button }
    }

    /// Processes clicks, then paints the button.
    pub fn layout(self, gtx: Context<'_>, theme: &Theme) -> Dimensions {
        let _span = tracing::trace_span!("ButtonStyle::layout").entered();

        let Self { text, button } = self;
        button.update(gtx.input, gtx.hits);
        let fill = if button.pressed() {
            Self::PRESSED
        } else {
            Self::IDLE
        };

        button.layout(gtx, |gtx| {
            let bordered = Bordered {
                color: Self::TEXT,
                width: Dp(1.0),
            };
            bordered.layout(gtx, |gtx| {
                let stack = Stack {
                    alignment: Alignment::Center,
                };
                stack.layout(
                    gtx,
                    vec![
                        StackChild::expanded(move |gtx: Context<'_>| {
                            let min = gtx.constraints.min;
                            gtx.ops.fill_rect(Rect::from_size(min), fill);
                            Dimensions::from_size(min)
                        }),
                        StackChild::stacked(move |gtx: Context<'_>| {
                            let label = Label {
                                alignment: TextAlignment::Middle,
                                ..Label::default()
                            };
                            label.layout(
                                gtx,
                                theme.shaper.as_ref(),
                                Font::default(),
                                Self::TEXT_SIZE,
                                text,
                                Self::TEXT,
                            )
                        }),
                    ],
                )
            })
        })
    }
}
