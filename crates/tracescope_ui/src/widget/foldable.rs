//! Collapsible sections.

use crate::geometry::Point;
use crate::layout::{Context, Dimensions};
use crate::text::Font;
use crate::theme::Theme;
use crate::widget::{Bool, Label};

/// A titled section whose content can be hidden by clicking the title.
#[derive(Debug, Clone, Default)]
pub struct Foldable {
    /// Section title.
    pub title: String,
    /// True while the content is hidden.
    pub closed: Bool,
}

impl Foldable {
    /// Creates an open section.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            closed: Bool::new(false),
        }
    }

    /// Sets the initial state.
    #[must_use]
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed.value = closed;
        self
    }

    /// Returns true while the content is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.closed.value
    }

    /// Lays out the title row and, when open, `contents` below it.
    ///
    /// A click on the title row is applied before anything is painted, so
    /// the title and content always agree within a frame.
    pub fn layout(
        &mut self,
        mut gtx: Context<'_>,
        theme: &Theme,
        contents: impl FnOnce(Context<'_>) -> Dimensions,
    ) -> Dimensions {
        let _span = tracing::trace_span!("Foldable::layout").entered();

        self.closed.update(gtx.input, gtx.hits);
        let marker = if self.closed.value { "[C] " } else { "[O] " };
        let title = format!("{marker}{}", self.title);

        let dims = self.closed.layout(gtx.reborrow(), |mut gtx: Context<'_>| {
            gtx.constraints.min.y = 0;
            Label::SINGLE_LINE.layout(
                gtx,
                theme.shaper.as_ref(),
                Font::BOLD,
                theme.text_size,
                &title,
                theme.palette.foreground,
            )
        });
        let mut size = dims.size;

        if !self.closed.value {
            let cs = gtx.constraints.sub_max(Point::new(0, size.y));
            let off = gtx.ops.push_offset(Point::new(0, size.y));
            let dims = contents(gtx.with_constraints(cs));
            off.pop(gtx.ops);

            size.x = size.x.max(dims.size.x);
            size.y += dims.size.y;
        }

        Dimensions::from_size(gtx.constraints.constrain(size))
    }
}
