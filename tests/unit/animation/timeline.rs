use super::*;

#[test]
fn windows_are_contiguous_and_end_at_complete() {
    assert_eq!(HALFTONE_WINDOW.end_ms(), COLOR_WINDOW.start_ms);
    assert_eq!(COLOR_WINDOW.end_ms(), REFINEMENT_WINDOW.start_ms);
    assert_eq!(REFINEMENT_WINDOW.end_ms(), COMPLETE_AT_MS);
    assert_eq!(run_length_ms(STARTUP_DELAY_MS), 9500.0);
}

#[test]
fn phase_at_boundaries() {
    assert_eq!(phase_at(-1.0), Phase::Blank);
    assert_eq!(phase_at(0.0), Phase::Halftone);
    assert_eq!(phase_at(1999.9), Phase::Halftone);
    assert_eq!(phase_at(2000.0), Phase::Color);
    assert_eq!(phase_at(6499.9), Phase::Color);
    assert_eq!(phase_at(6500.0), Phase::Refinement);
    assert_eq!(phase_at(8499.9), Phase::Refinement);
    assert_eq!(phase_at(8500.0), Phase::Complete);
    assert_eq!(phase_at(1.0e9), Phase::Complete);
}

#[test]
fn dot_progress_starts_at_delay_and_saturates_by_window_end() {
    let delays = [0.0, 0.1, 0.25, 0.5, 0.75, 0.999_999];
    for w in WINDOWS {
        for d in delays {
            let start = w.start_ms + d * w.spread * w.duration_ms;
            assert!(w.dot_progress(w.progress_at(start), d) < 1e-9, "{w:?} d={d}");
            if start > w.start_ms {
                assert_eq!(w.dot_progress(w.progress_at(start - 1.0), d), 0.0);
            }
            assert_eq!(w.dot_progress(w.progress_at(w.end_ms()), d), 1.0, "{w:?} d={d}");
        }
    }
}

#[test]
fn dot_progress_is_monotonic_in_elapsed_time() {
    for w in WINDOWS {
        for d in [0.0, 0.3, 0.9] {
            let mut prev = 0.0;
            let steps = 400;
            for i in 0..=steps {
                let t = w.start_ms + w.duration_ms * (i as f64) / (steps as f64);
                let v = w.dot_progress(w.progress_at(t), d);
                assert!(v >= prev, "{w:?} d={d} t={t}");
                assert!((0.0..=1.0).contains(&v));
                prev = v;
            }
        }
    }
}

#[test]
fn zero_delay_dot_finishes_early() {
    let t = HALFTONE_WINDOW.start_ms + HALFTONE_WINDOW.duration_ms * 0.5;
    let p = HALFTONE_WINDOW.progress_at(t);
    assert_eq!(HALFTONE_WINDOW.dot_progress(p, 0.0), 1.0);
    assert!(HALFTONE_WINDOW.dot_progress(p, 0.9) < 1.0);
}

#[test]
fn lookahead_only_after_sixty_percent() {
    assert_eq!(refinement_lookahead(0.0, 0.0), None);
    assert_eq!(refinement_lookahead(0.6, 0.0), None);
    let early = refinement_lookahead(0.61, 0.0).unwrap();
    assert!(early > 0.0 && early < 1.0);
    assert_eq!(refinement_lookahead(1.0, 0.999), Some(1.0));
}

#[test]
fn lookahead_grows_with_color_progress() {
    let mut prev = 0.0;
    for i in 61..=100 {
        let v = refinement_lookahead(f64::from(i) / 100.0, 0.5).unwrap();
        assert!(v >= prev);
        prev = v;
    }
}
