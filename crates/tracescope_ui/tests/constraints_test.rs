//! # Constraint Tests
//!
//! Every composer must report a size inside the constraints it was given.
//! Constraints are drawn from a seeded generator so failures reproduce.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracescope_ui::widget::{Bool, Clickable};
use tracescope_ui::{
    ButtonStyle, CheckBoxStyle, Constraints, Context, Dimensions, Foldable, HitMap, InputState,
    Metric, Ops, Point, ProgressBarStyle, Theme, Tooltip,
};

const ROUNDS: usize = 500;

fn random_constraints(rng: &mut StdRng) -> Constraints {
    let max = Point::new(rng.gen_range(0..300), rng.gen_range(0..120));
    let min = Point::new(rng.gen_range(0..=max.x), rng.gen_range(0..=max.y));
    Constraints { min, max }
}

fn within(cs: Constraints, dims: Dimensions) -> bool {
    let s = dims.size;
    s.x >= cs.min.x && s.y >= cs.min.y && s.x <= cs.max.x && s.y <= cs.max.y
}

fn run(cs: Constraints, f: impl FnOnce(Context<'_>) -> Dimensions) -> Dimensions {
    let mut ops = Ops::new();
    let input = InputState::new();
    let hits = HitMap::new();
    let mut gtx = Context::new(&mut ops, &input, &hits, Metric::new(1.5), cs.max);
    gtx.constraints = cs;
    f(gtx)
}

/// Test: Styled composers honour both bounds.
#[test]
fn test_composers_stay_within_constraints() {
    let theme = Theme::default();
    let mut rng = StdRng::seed_from_u64(0x7ace);
    let mut checkbox = Bool::new(true);
    let mut button = Clickable::new();
    let mut foldable = Foldable::new("Details");

    for _ in 0..ROUNDS {
        let cs = random_constraints(&mut rng);
        let progress: f32 = rng.gen_range(-0.5..1.5);

        let dims = run(cs, |gtx| ProgressBarStyle::new(&theme, progress).layout(gtx));
        assert!(within(cs, dims), "progress bar {dims:?} outside {cs:?}");

        let dims = run(cs, |gtx| CheckBoxStyle::new(&mut checkbox, "Enabled").layout(gtx, &theme));
        assert!(within(cs, dims), "check box {dims:?} outside {cs:?}");

        let dims = run(cs, |gtx| ButtonStyle::new(&mut button, "Apply").layout(gtx, &theme));
        assert!(within(cs, dims), "button {dims:?} outside {cs:?}");

        let dims = run(cs, |gtx| {
            foldable.layout(gtx, &theme, |gtx: Context<'_>| {
                Dimensions::from_size(gtx.constraints.constrain(Point::new(400, 400)))
            })
        });
        assert!(within(cs, dims), "foldable {dims:?} outside {cs:?}");
    }
}

/// Test: Boxed text ignores the minimum but never exceeds the maximum.
#[test]
fn test_tooltip_respects_max_only() {
    let theme = Theme::default();
    let mut rng = StdRng::seed_from_u64(0x7001);

    for _ in 0..ROUNDS {
        let cs = random_constraints(&mut rng);
        let dims = run(cs, |gtx| Tooltip.layout(gtx, &theme, "hover text"));
        assert!(dims.size.x <= cs.max.x && dims.size.y <= cs.max.y);
        assert!(dims.size.x >= 0 && dims.size.y >= 0);
    }
}
