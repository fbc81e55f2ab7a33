use super::*;

fn states(count: usize, seed: u64) -> DotStates {
    let mut s = DotStates::new();
    s.reset(count, &mut Rng64::new(seed));
    s
}

#[test]
fn reset_zeroes_progress_and_draws_delays() {
    let s = states(64, 1);
    assert_eq!(s.len(), 64);
    for st in s.as_slice() {
        assert_eq!((st.halftone, st.color, st.refinement), (0.0, 0.0, 0.0));
        for d in [st.halftone_delay, st.color_delay, st.refinement_delay] {
            assert!((0.0..1.0).contains(&d));
        }
    }
    let distinct = s
        .as_slice()
        .windows(2)
        .filter(|w| w[0].halftone_delay != w[1].halftone_delay)
        .count();
    assert!(distinct > 0);
}

#[test]
fn advance_keeps_delays_fixed() {
    let mut s = states(16, 2);
    let before: Vec<(f64, f64, f64)> = s
        .as_slice()
        .iter()
        .map(|st| (st.halftone_delay, st.color_delay, st.refinement_delay))
        .collect();
    for t in [0.0, 500.0, 3000.0, 7000.0, 9000.0] {
        s.advance(t);
    }
    let after: Vec<(f64, f64, f64)> = s
        .as_slice()
        .iter()
        .map(|st| (st.halftone_delay, st.color_delay, st.refinement_delay))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn halftone_is_saturated_for_every_dot_at_color_boundary() {
    let mut s = states(500, 3);
    s.advance(COLOR_WINDOW.start_ms);
    assert!(s.as_slice().iter().all(|st| st.halftone == 1.0));
}

#[test]
fn everything_saturates_by_the_end_of_the_run() {
    let mut s = states(500, 4);
    s.advance(REFINEMENT_WINDOW.end_ms());
    for st in s.as_slice() {
        assert_eq!((st.halftone, st.color, st.refinement), (1.0, 1.0, 1.0));
    }
}

#[test]
fn nothing_colors_during_the_halftone_window() {
    let mut s = states(200, 5);
    s.advance(HALFTONE_WINDOW.end_ms() - 1.0);
    assert!(s.as_slice().iter().all(|st| st.color == 0.0 && st.refinement == 0.0));
}

#[test]
fn lookahead_feeds_refinement_before_its_window() {
    let mut s = states(200, 6);
    let late_color = COLOR_WINDOW.start_ms + COLOR_WINDOW.duration_ms * 0.9;
    s.advance(late_color);
    assert!(s.as_slice().iter().any(|st| st.refinement > 0.0));
}

#[test]
fn refinement_window_never_lowers_precomputed_values() {
    let mut s = states(300, 7);
    s.advance(COLOR_WINDOW.end_ms() - 1.0);
    let precomputed: Vec<f64> = s.as_slice().iter().map(|st| st.refinement).collect();

    // Fresh refinement-window values are near zero right after the window opens.
    s.advance(REFINEMENT_WINDOW.start_ms + 1.0);
    for (st, before) in s.as_slice().iter().zip(&precomputed) {
        assert!(st.refinement >= *before);
    }
}

#[test]
fn progress_is_monotonic_across_frames() {
    let mut s = states(100, 8);
    let mut prev = s.as_slice().to_vec();
    let mut t = 0.0;
    while t <= 9000.0 {
        s.advance(t);
        for (cur, old) in s.as_slice().iter().zip(&prev) {
            assert!(cur.halftone >= old.halftone);
            assert!(cur.color >= old.color);
            assert!(cur.refinement >= old.refinement);
        }
        prev = s.as_slice().to_vec();
        t += 16.7;
    }
}

#[test]
fn state_depends_only_on_time_not_frame_count() {
    let mut stepped = states(100, 9);
    let mut t = 0.0;
    while t < 7200.0 {
        stepped.advance(t);
        t += 33.3;
    }
    stepped.advance(7200.0);

    let mut jumped = states(100, 9);
    jumped.advance(7200.0);
    assert_eq!(stepped.as_slice(), jumped.as_slice());
}

#[test]
fn reset_reuses_the_buffer() {
    let mut s = states(128, 10);
    let cap = s.capacity();
    s.advance(3000.0);
    s.reset(128, &mut Rng64::new(11));
    assert_eq!(s.capacity(), cap);
    assert!(s.as_slice().iter().all(|st| st.halftone == 0.0));
}
