//! # Scenario Tests
//!
//! Whole-frame checks of the styled composers against a default theme,
//! driven through the same input and hit-testing path a host would use.

use tracescope_ui::render::Shape;
use tracescope_ui::widget::{Bool, Clickable};
use tracescope_ui::{
    ButtonStyle, CheckBoxStyle, Color, Context, Dimensions, DisplayList, Font, Foldable, HitMap,
    InputState, Metric, MouseButton, Ops, Point, ProgressBarStyle, Rect, Theme, Tooltip,
};

/// One host frame: lay out, flatten, refresh the hit map.
fn frame(
    input: &InputState,
    hits: &mut HitMap,
    f: impl FnOnce(Context<'_>) -> Dimensions,
) -> (Dimensions, DisplayList) {
    let mut ops = Ops::new();
    let dims = {
        let gtx = Context::new(&mut ops, input, hits, Metric::default(), Point::new(800, 600));
        f(gtx)
    };
    let list = ops.flatten();
    hits.update(&list);
    (dims, list)
}

/// A press frame followed by a release frame at `p`.
fn click_at(
    input: &mut InputState,
    hits: &mut HitMap,
    p: Point,
    f: &mut dyn FnMut(Context<'_>) -> Dimensions,
) {
    #[allow(clippy::cast_precision_loss)]
    let (x, y) = (p.x as f32, p.y as f32);
    input.begin_frame();
    input.set_mouse_pos(x, y);
    input.mouse_button_down(MouseButton::Left);
    frame(input, hits, |gtx| f(gtx));
    input.begin_frame();
    input.mouse_button_up(MouseButton::Left);
    frame(input, hits, |gtx| f(gtx));
}

/// Test: Unchecked box labelled "Enabled" with the default theme.
#[test]
fn test_unchecked_enabled_checkbox() {
    let theme = Theme::default();
    let mut enabled = Bool::new(false);
    let input = InputState::new();
    let mut hits = HitMap::new();

    let (dims, list) = frame(&input, &mut hits, |gtx| {
        CheckBoxStyle::new(&mut enabled, "Enabled").layout(gtx, &theme)
    });

    let label = theme.shaper.shape_line(Font::default(), 12.0, "Enabled");
    let indicator = 12;
    assert_eq!(
        dims.size,
        Point::new(indicator + 3 + label.width, indicator.max(label.height()))
    );

    // Only the transparent fill and the four outline edges; no check mark.
    let inner: Vec<_> = list
        .fills()
        .filter(|(s, c)| {
            *c == Color::BLACK
                && matches!(s, Shape::Rect(r)
                    if r.min.x > 0 && r.min.y > 0 && r.max.x < indicator && r.max.y < indicator)
        })
        .collect();
    assert!(inner.is_empty());
    assert_eq!(list.texts().next().map(|t| t.text.as_str()), Some("Enabled"));
}

/// Test: Clicking the label toggles the box.
#[test]
fn test_click_on_label_toggles_checkbox() {
    let theme = Theme::default();
    let mut enabled = Bool::new(false);
    let mut input = InputState::new();
    let mut hits = HitMap::new();

    let mut layout =
        |gtx: Context<'_>| CheckBoxStyle::new(&mut enabled, "Enabled").layout(gtx, &theme);
    frame(&input, &mut hits, &mut layout);
    click_at(&mut input, &mut hits, Point::new(30, 5), &mut layout);

    assert!(enabled.value);
}

/// Test: Button fill follows the pressed state, label color does not.
#[test]
fn test_button_colors() {
    let theme = Theme::default();
    let mut button = Clickable::new();
    let mut input = InputState::new();
    let mut hits = HitMap::new();

    let (_, idle) = frame(&input, &mut hits, |gtx| {
        ButtonStyle::new(&mut button, "Go").layout(gtx, &theme)
    });
    assert_eq!(idle.fills().next().map(|(_, c)| c), Some(Color::rgb(255, 255, 255)));
    assert!(idle.texts().all(|t| t.color == Color::rgb(0, 0, 0)));

    input.begin_frame();
    input.set_mouse_pos(4.0, 4.0);
    input.mouse_button_down(MouseButton::Left);
    let (_, pressed) = frame(&input, &mut hits, |gtx| {
        ButtonStyle::new(&mut button, "Go").layout(gtx, &theme)
    });
    assert_eq!(pressed.fills().next().map(|(_, c)| c), Some(Color::rgb(255, 255, 0)));
    assert!(pressed.texts().all(|t| t.color == Color::rgb(0, 0, 0)));
}

/// Test: Foldable shows its content only once opened.
#[test]
fn test_foldable_open_close_cycle() {
    let theme = Theme::default();
    let mut section = Foldable::new("Stats").with_closed(true);
    let mut input = InputState::new();
    let mut hits = HitMap::new();
    let mut calls = 0;

    let mut layout = |gtx: Context<'_>| {
        section.layout(gtx, &theme, |_| {
            calls += 1;
            Dimensions::from_size(Point::new(50, 50))
        })
    };
    frame(&input, &mut hits, &mut layout);
    click_at(&mut input, &mut hits, Point::new(1, 1), &mut layout);
    frame(&input, &mut hits, &mut layout);
    click_at(&mut input, &mut hits, Point::new(1, 1), &mut layout);

    // Opened on the release frame and the frame after; closed again by the
    // second release, whose frame lays out the title only.
    assert_eq!(calls, 3);
    assert!(!section.is_open());
}

/// Test: Progress bar foreground tracks the fraction.
#[test]
fn test_progress_bar_widths() {
    let theme = Theme::default();
    let input = InputState::new();

    for (p, expected) in [(0.0_f32, 0.0_f32), (0.25, 50.0), (1.0, 200.0)] {
        let mut hits = HitMap::new();
        let (dims, list) = frame(&input, &mut hits, |mut gtx| {
            gtx.constraints.min = Point::new(200, 16);
            ProgressBarStyle::new(&theme, p).layout(gtx)
        });
        assert_eq!(dims.size, Point::new(200, 16));
        let width = list
            .fills()
            .find_map(|(s, _)| match s {
                Shape::Path(path) => path.bounds(),
                Shape::Rect(_) => None,
            })
            .map_or(0.0, |b| b.max.x - b.min.x);
        assert!((width - expected).abs() < 1e-3, "progress {p}: width {width}");
    }
}

/// Test: Tooltip background is the text plus padding, nothing more.
#[test]
fn test_tooltip_size_is_text_plus_padding() {
    let theme = Theme::default();
    let input = InputState::new();
    let mut hits = HitMap::new();

    let (dims, list) = frame(&input, &mut hits, |gtx| Tooltip.layout(gtx, &theme, "12.5 ms"));
    let text = theme.shaper.shape_line(Font::default(), 12.0, "12.5 ms");
    assert_eq!(dims.size, Point::new(text.width + 4, text.height() + 4));

    let bg = list.fills().next().map(|(s, _)| s.clone());
    assert_eq!(bg, Some(Shape::Rect(Rect::from_size(dims.size))));
}
