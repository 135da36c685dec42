//! Property-based invariant tests for carousel navigation.
//!
//! These tests verify invariants that must hold for any list geometry:
//!
//! 1. The effective offset always stays within `[0, max_scroll]`.
//! 2. A run of Next moves is monotonically non-decreasing.
//! 3. A run of Previous moves is monotonically non-increasing.
//! 4. Prev is enabled iff the offset is more than epsilon from the start.
//! 5. Next is enabled iff the offset is more than epsilon from the end.
//! 6. When the content fits, neither control is enabled.
//! 7. Publishing is idempotent: re-measuring the same geometry emits nothing.
//! 8. Enough Next moves always reach the end and disable Next.
//! 9. Scroll and resize never emit `scroll_to`.
//! 10. With moves left in flight and interleaved scroll/resize reports
//!     (including content that shrinks), the offset stays in bounds, the
//!     affordances follow it, and the last published command per control
//!     matches the live affordance.

use folio_core::{
    Affordance, CarouselConfig, CarouselController, Command, Control, Direction, Section,
    SectionAttach, SectionMetrics,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Viewport, content width and slide width.
fn geometry() -> impl Strategy<Value = (f64, f64, f64)> {
    (100.0f64..2000.0, 0.0f64..10_000.0, 50.0f64..800.0)
}

fn directions(max_len: usize) -> impl Strategy<Value = Vec<Direction>> {
    proptest::collection::vec(
        prop_oneof![Just(Direction::Previous), Just(Direction::Next)],
        0..=max_len,
    )
}

fn attached(viewport: f64, content: f64, slide: f64) -> CarouselController {
    let mut c = CarouselController::new(Section::Projects, CarouselConfig::projects());
    let mut out = Vec::new();
    c.attach(
        SectionAttach::present(SectionMetrics::new(0.0, viewport, content).with_slide_width(slide)),
        &mut out,
    );
    c
}

/// Move and settle immediately, as if the host never reported scrolling.
fn step(c: &mut CarouselController, direction: Direction) {
    let mut out = Vec::new();
    if let Some(generation) = c.navigate(direction, &mut out) {
        c.settle(generation, &mut out);
    }
}

fn max_scroll(viewport: f64, content: f64) -> f64 {
    (content - viewport).max(0.0)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Offset bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn offset_stays_in_bounds((viewport, content, slide) in geometry(), moves in directions(40)) {
        let mut c = attached(viewport, content, slide);
        let max = max_scroll(viewport, content);
        for direction in moves {
            step(&mut c, direction);
            let offset = c.scroll_offset();
            prop_assert!(
                (0.0..=max).contains(&offset),
                "offset {} outside [0, {}]", offset, max
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-3. Monotone runs
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn next_is_monotone((viewport, content, slide) in geometry(), n in 1usize..30) {
        let mut c = attached(viewport, content, slide);
        let mut last = c.scroll_offset();
        for _ in 0..n {
            step(&mut c, Direction::Next);
            let offset = c.scroll_offset();
            prop_assert!(offset >= last, "next moved backwards: {} -> {}", last, offset);
            last = offset;
        }
    }

    #[test]
    fn previous_is_monotone((viewport, content, slide) in geometry(), n in 1usize..30) {
        let mut c = attached(viewport, content, slide);
        for _ in 0..30 {
            step(&mut c, Direction::Next);
        }
        let mut last = c.scroll_offset();
        for _ in 0..n {
            step(&mut c, Direction::Previous);
            let offset = c.scroll_offset();
            prop_assert!(offset <= last, "previous moved forwards: {} -> {}", last, offset);
            last = offset;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-6. Affordances follow the offset
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn affordance_matches_boundaries(
        (viewport, content, slide) in geometry(),
        moves in directions(20),
    ) {
        let mut c = attached(viewport, content, slide);
        for direction in moves {
            step(&mut c, direction);
        }
        let state = *c.state().expect("attached");
        let offset = state.scroll_offset();
        let eps = state.epsilon();
        let max = state.max_scroll();
        let prev = c.affordance(Control::Prev).contains(Affordance::ENABLED);
        let next = c.affordance(Control::Next).contains(Affordance::ENABLED);
        if state.fits() {
            prop_assert!(!prev && !next);
        } else {
            prop_assert_eq!(prev, offset > eps);
            prop_assert_eq!(next, offset < max - eps);
        }
    }

    #[test]
    fn fitting_content_disables_both(viewport in 100.0f64..2000.0, ratio in 0.0f64..=1.0) {
        let c = attached(viewport, viewport * ratio, 200.0);
        for control in Control::BOTH {
            prop_assert_eq!(c.affordance(control), Affordance::INERT);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Idempotent publishing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn remeasure_same_geometry_is_silent(
        (viewport, content, slide) in geometry(),
        scroll in 0.0f64..10_000.0,
    ) {
        let mut c = attached(viewport, content, slide);
        let metrics = SectionMetrics::new(scroll, viewport, content).with_slide_width(slide);
        let mut out = Vec::new();
        c.on_scroll(metrics, &mut out);
        out.clear();
        c.on_scroll(metrics, &mut out);
        prop_assert!(out.is_empty(), "duplicate commands: {:?}", out);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Reaching the end
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn repeated_next_reaches_end((viewport, content, slide) in geometry()) {
        let mut c = attached(viewport, content, slide);
        let max = max_scroll(viewport, content);
        let needed = (max / (slide + 24.0)).ceil() as usize + 1;
        for _ in 0..needed {
            step(&mut c, Direction::Next);
        }
        prop_assert!(!c.affordance(Control::Next).contains(Affordance::ENABLED));
        let mut out = Vec::new();
        prop_assert_eq!(c.navigate(Direction::Next, &mut out), None);
        prop_assert!(out.is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9. Passive events never scroll
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn passive_events_never_scroll(
        (viewport, content, slide) in geometry(),
        samples in proptest::collection::vec((0.0f64..10_000.0, 100.0f64..2000.0), 1..20),
    ) {
        let mut c = attached(viewport, content, slide);
        let mut out = Vec::new();
        for (scroll, width) in samples {
            let metrics = SectionMetrics::new(scroll, width, content).with_slide_width(slide);
            c.on_scroll(metrics, &mut out);
            c.on_resize(metrics, &mut out);
        }
        prop_assert!(
            !out.iter().any(|cmd| matches!(cmd, Command::ScrollTo { .. })),
            "passive event emitted scroll_to"
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 10. Mid-animation reports
// ═════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
enum Op {
    Move(Direction),
    SettleLatest,
    SettleStale,
    Scroll(f64),
    Resize { viewport: f64, content: f64 },
}

fn ops(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(
        prop_oneof![
            3 => prop_oneof![Just(Direction::Previous), Just(Direction::Next)].prop_map(Op::Move),
            1 => Just(Op::SettleLatest),
            1 => Just(Op::SettleStale),
            2 => (0.0f64..10_000.0).prop_map(Op::Scroll),
            1 => (100.0f64..2000.0, 0.0f64..10_000.0)
                .prop_map(|(viewport, content)| Op::Resize { viewport, content }),
        ],
        0..=max_len,
    )
}

fn last_published(out: &[Command], control: Control) -> Option<&Command> {
    out.iter()
        .rev()
        .find(|cmd| matches!(cmd, Command::Control { control: c, .. } if *c == control))
}

proptest! {
    #[test]
    fn interleaved_reports_keep_invariants(
        (viewport, content, slide) in geometry(),
        ops in ops(60),
    ) {
        let mut c = CarouselController::new(Section::Projects, CarouselConfig::projects());
        let mut out = Vec::new();
        let (mut viewport, mut content) = (viewport, content);
        c.attach(
            SectionAttach::present(
                SectionMetrics::new(0.0, viewport, content).with_slide_width(slide),
            ),
            &mut out,
        );
        let mut latest = None;
        for op in ops {
            match op.clone() {
                Op::Move(direction) => {
                    if let Some(generation) = c.navigate(direction, &mut out) {
                        latest = Some(generation);
                    }
                }
                Op::SettleLatest => {
                    if let Some(generation) = latest {
                        c.settle(generation, &mut out);
                    }
                }
                Op::SettleStale => {
                    if let Some(generation) = latest.filter(|g| *g > 1) {
                        c.settle(generation - 1, &mut out);
                    }
                }
                Op::Scroll(left) => {
                    let metrics = SectionMetrics::new(left, viewport, content).with_slide_width(slide);
                    c.on_scroll(metrics, &mut out);
                }
                Op::Resize { viewport: v, content: w } => {
                    viewport = v;
                    content = w;
                    let metrics = SectionMetrics::new(0.0, viewport, content).with_slide_width(slide);
                    c.on_resize(metrics, &mut out);
                }
            }

            let state = *c.state().expect("attached");
            let offset = state.scroll_offset();
            let max = max_scroll(viewport, content);
            prop_assert_eq!(state.max_scroll(), max);
            prop_assert!(
                (0.0..=max).contains(&offset),
                "offset {} outside [0, {}] after {:?}", offset, max, op
            );

            let eps = state.epsilon();
            let prev = c.affordance(Control::Prev).contains(Affordance::ENABLED);
            let next = c.affordance(Control::Next).contains(Affordance::ENABLED);
            if state.fits() {
                prop_assert!(!prev && !next);
            } else {
                prop_assert_eq!(prev, offset > eps);
                prop_assert_eq!(next, offset < max - eps);
            }

            for control in Control::BOTH {
                let expected = Command::control(Section::Projects, control, c.affordance(control));
                prop_assert_eq!(last_published(&out, control), Some(&expected));
            }
        }
    }
}
