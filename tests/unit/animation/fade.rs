use super::*;
use crate::timing::mapping::{LinearPlaybackDefinedDuration, LogarithmicPlaybackDefinedDuration};

fn snap(stime: f64, indextime: f64) -> TimingSnapshot {
    TimingSnapshot {
        stime,
        indextime,
        playback_rate: 1.0,
    }
}

fn assert_fader_shape(f: &dyn Fader, samples: &[TimingSnapshot], before: usize, after: usize) {
    for s in &samples[..before] {
        assert_eq!(f.value(s), 0.0, "expected 0 at {s:?}");
    }
    for s in &samples[samples.len() - after..] {
        assert_eq!(f.value(s), 1.0, "expected 1 at {s:?}");
    }
    let mut prev = 0.0;
    for s in samples {
        let v = f.value(s);
        assert!((0.0..=1.0).contains(&v));
        assert!(v >= prev, "not monotonic at {s:?}");
        prev = v;
    }
}

#[test]
fn index_window_linear_ramp() {
    let f = IndexWindowFade::new(10.0, 20.0).unwrap();
    assert_eq!(f.value(&snap(0.0, 9.999)), 0.0);
    assert_eq!(f.value(&snap(0.0, 10.0)), 0.0);
    assert_eq!(f.value(&snap(0.0, 15.0)), 0.5);
    assert_eq!(f.value(&snap(0.0, 20.0)), 1.0);
    assert_eq!(f.value(&snap(0.0, 99.0)), 1.0);

    let samples = (0..=30)
        .map(|i| snap(0.0, f64::from(i)))
        .collect::<Vec<_>>();
    assert_fader_shape(&f, &samples, 10, 11);
}

#[test]
fn index_window_log_ramp_is_rising() {
    let f = IndexWindowFade::with_scale(1.0, 100.0, FadeScale::Log).unwrap();
    assert_eq!(f.value(&snap(0.0, 0.5)), 0.0);
    assert!((f.value(&snap(0.0, 10.0)) - 0.5).abs() < 1e-12);
    assert_eq!(f.value(&snap(0.0, 100.0)), 1.0);
    let samples = [0.5, 1.0, 2.0, 5.0, 10.0, 50.0, 99.0, 100.0, 200.0]
        .iter()
        .map(|&ix| snap(0.0, ix))
        .collect::<Vec<_>>();
    assert_fader_shape(&f, &samples, 1, 2);
}

#[test]
fn index_window_rejects_bad_bounds() {
    assert!(IndexWindowFade::new(5.0, 5.0).is_err());
    assert!(IndexWindowFade::new(5.0, 1.0).is_err());
    assert!(IndexWindowFade::with_scale(0.0, 1.0, FadeScale::Log).is_err());
}

#[test]
fn start_index_fade_binds_through_inverse_timing() {
    // Index time 0..100 over 10 s, so index 40 is shown at 4 s.
    let timing = Timing::new(LinearPlaybackDefinedDuration::new(0.0, 100.0, 10.0).unwrap());
    let bound = StartIndexFade::new(40.0, 2.0).unwrap().bind(&timing).unwrap();
    assert!((bound.start_scenetime() - 4.0).abs() < 1e-9);
    assert!((bound.end_scenetime() - 6.0).abs() < 1e-9);

    assert_eq!(bound.value(&snap(3.9, 39.0)), 0.0);
    assert!((bound.value(&snap(5.0, 50.0)) - 0.5).abs() < 1e-6);
    assert_eq!(bound.value(&snap(6.0, 60.0)), 1.0);
    assert_eq!(bound.value(&snap(9.0, 90.0)), 1.0);
}

#[test]
fn end_index_fade_is_anchored_to_its_end() {
    let timing =
        Timing::new(LogarithmicPlaybackDefinedDuration::new(1.0, 1e4, 8.0).unwrap());
    // Index 100 is shown half way through the scene.
    let bound = EndIndexFade::new(1.5, 100.0).unwrap().bind(&timing).unwrap();
    assert!((bound.end_scenetime() - 4.0).abs() < 1e-7);
    assert!((bound.start_scenetime() - 2.5).abs() < 1e-7);

    let samples = (0..=16)
        .map(|i| snap(f64::from(i) * 0.5, 0.0))
        .collect::<Vec<_>>();
    // 0.0..=2.0 are before the window, 4.0.. are at/after its end.
    assert_fader_shape(&bound, &samples, 5, 9);
}

#[test]
fn end_index_fade_is_one_on_the_anchor_frame() {
    let mut timing = Timing::new(LinearPlaybackDefinedDuration::new(0.0, 100.0, 10.0).unwrap());
    let bound = EndIndexFade::new(2.0, 60.0).unwrap().bind(&timing).unwrap();
    assert!(bound.end_scenetime() <= 6.0);

    let shown = timing.update_with_stime(6.0);
    assert_eq!(shown.indextime, 60.0);
    assert_eq!(bound.value_for(&timing), 1.0);
}

#[test]
fn binding_fails_for_unreachable_anchor() {
    let timing = Timing::new(LinearPlaybackDefinedDuration::new(0.0, 10.0, 10.0).unwrap());
    let err = StartIndexFade::new(50.0, 1.0).unwrap().bind(&timing).unwrap_err();
    assert!(matches!(err, PlotvidError::Inversion(_)));
    assert!(StartIndexFade::new(1.0, 0.0).is_err());
    assert!(EndIndexFade::new(-1.0, 1.0).is_err());
}

#[test]
fn value_for_uses_current_timing_state() {
    let mut timing = Timing::new(LinearPlaybackDefinedDuration::new(0.0, 10.0, 10.0).unwrap());
    let f = IndexWindowFade::new(2.0, 4.0).unwrap();
    assert_eq!(f.value_for(&timing), 0.0);
    timing.update_with_stime(3.0);
    assert!((f.value_for(&timing) - 0.5).abs() < 1e-12);
}
