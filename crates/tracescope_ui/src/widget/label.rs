//! Text labels.

use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::layout::{Context, Dimensions};
use crate::render::TextRun;
use crate::text::{Font, Shaper};
use crate::unit::Sp;

/// Horizontal placement of text inside a label wider than the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlignment {
    /// Left aligned.
    #[default]
    Start,
    /// Centered.
    Middle,
    /// Right aligned.
    End,
}

/// Lays out text, one line per `\n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Label {
    /// Maximum number of lines; zero means unlimited.
    pub max_lines: usize,
    /// Horizontal placement of each line.
    pub alignment: TextAlignment,
}

impl Label {
    /// A single-line label.
    pub const SINGLE_LINE: Self = Self {
        max_lines: 1,
        alignment: TextAlignment::Start,
    };

    /// Measures and paints `text`. Output is clipped to the reported size.
    pub fn layout(
        self,
        gtx: Context<'_>,
        shaper: &dyn Shaper,
        font: Font,
        size: Sp,
        text: &str,
        color: Color,
    ) -> Dimensions {
        let size_px = gtx.metric.sp_px(size);
        let limit = if self.max_lines == 0 {
            usize::MAX
        } else {
            self.max_lines
        };
        let lines: Vec<_> = text
            .split('\n')
            .take(limit)
            .map(|line| (line, shaper.shape_line(font, size_px, line)))
            .collect();

        let width = lines.iter().map(|(_, m)| m.width).max().unwrap_or(0);
        let height: i32 = lines.iter().map(|(_, m)| m.height()).sum();
        let size = gtx.constraints.constrain(Point::new(width, height));

        let clip = gtx.ops.push_clip(Rect::from_size(size));
        let mut y = 0;
        for (line, metrics) in &lines {
            let x = match self.alignment {
                TextAlignment::Start => 0,
                TextAlignment::Middle => (size.x - metrics.width) / 2,
                TextAlignment::End => size.x - metrics.width,
            };
            if !line.is_empty() {
                gtx.ops.text(TextRun {
                    origin: Point::new(x, y),
                    text: (*line).to_owned(),
                    color,
                    size_px,
                    font,
                });
            }
            y += metrics.height();
        }
        clip.pop(gtx.ops);

        let first_ascent = lines.first().map_or(0, |(_, m)| m.ascent);
        Dimensions {
            size,
            baseline: (size.y - first_ascent).max(0),
        }
    }
}
