use super::*;
use crate::timing::mapping::{
    LinearPlaybackDefinedDuration, LinearPlaybackDefinedSpeed, LinearPlaybackDefinedSpeedAndDuration,
    LogarithmicPlaybackDefinedDuration,
};

/// Index time rises, falls, then rises again over `[0, 3]`.
#[derive(Debug)]
struct Zigzag;

impl TimeMapping for Zigzag {
    fn sduration(&self) -> f64 {
        3.0
    }

    fn stime_to_time(&self, stime: f64) -> f64 {
        if stime < 1.0 {
            stime
        } else if stime < 2.0 {
            2.0 - stime
        } else {
            stime - 2.0
        }
    }
}

#[test]
fn state_is_undefined_before_first_update() {
    let timing = Timing::new(LinearPlaybackDefinedDuration::new(0.0, 1.0, 1.0).unwrap());
    assert!(timing.current().is_none());
    assert!(timing.current_stime().is_nan());
    assert!(timing.current_indextime().is_nan());
    assert!(timing.current_playback_rate().is_nan());
}

#[test]
fn update_with_stime_records_index_time_and_rate() {
    let mut timing = Timing::new(LinearPlaybackDefinedSpeed::new(0.0, 100.0, 10.0).unwrap());
    assert_eq!(timing.sduration(), 10.0);

    let snap = timing.update_with_stime(5.0);
    assert_eq!(snap.stime, 5.0);
    assert_eq!(snap.indextime, 50.0);
    assert!((snap.playback_rate - 10.0).abs() < 1e-6);
    assert_eq!(timing.current(), Some(snap));
    assert_eq!(timing.current_indextime(), 50.0);
}

#[test]
fn playback_rate_tracks_log_derivative() {
    let timing = Timing::new(LogarithmicPlaybackDefinedDuration::new(1.0, 100.0, 2.0).unwrap());
    // d/ds 10^(s) = ln(10) * 10^s at s = 1 (one decade per second).
    let expected = std::f64::consts::LN_10 * 10.0;
    let rate = timing.playback_rate_at(1.0);
    assert!((rate - expected).abs() / expected < 1e-2);
}

#[test]
fn rate_step_must_be_positive() {
    let mk = || Timing::new(LinearPlaybackDefinedDuration::new(0.0, 1.0, 1.0).unwrap());
    assert!(mk().with_rate_step(0.0).is_err());
    assert!(mk().with_rate_step(f64::NAN).is_err());
    let timing = mk().with_rate_step(0.5).unwrap();
    assert!((timing.playback_rate_at(0.0) - 1.0).abs() < 1e-12);
}

#[test]
fn inverse_round_trips_for_monotonic_policies() {
    let timings = [
        Timing::new(LinearPlaybackDefinedSpeed::new(-5.0, 95.0, 7.0).unwrap()),
        Timing::new(LinearPlaybackDefinedDuration::new(100.0, 0.0, 4.0).unwrap()),
        Timing::new(LinearPlaybackDefinedSpeedAndDuration::new(3.0, 0.25, 8.0).unwrap()),
        Timing::new(LogarithmicPlaybackDefinedDuration::new(1e-3, 1e3, 6.0).unwrap()),
    ];
    for timing in &timings {
        let sd = timing.sduration();
        for k in 0..=10 {
            let x = sd * f64::from(k) / 10.0;
            let back = timing.time_to_stime(timing.stime_to_time(x)).unwrap();
            assert!(
                (back - x).abs() < 1e-6,
                "{:?}: stime {x} came back as {back}",
                timing.mapping()
            );
        }
    }
}

#[test]
fn inverse_rejects_unreachable_index_time() {
    let timing = Timing::new(LinearPlaybackDefinedDuration::new(0.0, 10.0, 5.0).unwrap());
    let err = timing.time_to_stime(42.0).unwrap_err();
    assert!(matches!(err, PlotvidError::Inversion(_)));
    assert!(timing.time_to_stime(f64::NAN).is_err());
}

#[test]
fn inverse_on_non_monotonic_mapping_may_fail_to_converge() {
    let timing = Timing::new(Zigzag);
    // 0.5 is reached three times, so any of them is a valid root.
    let s = timing.time_to_stime(0.5).unwrap();
    assert!((timing.stime_to_time(s) - 0.5).abs() < 1e-6);
    // Values above the zigzag's peak are never shown.
    assert!(matches!(
        timing.time_to_stime(1.5),
        Err(PlotvidError::Inversion(_))
    ));
}

#[test]
fn into_mapping_keeps_policy() {
    let timing = Timing::new(LinearPlaybackDefinedDuration::new(0.0, 8.0, 4.0).unwrap());
    let mapping = timing.into_mapping();
    assert_eq!(mapping.stime_to_time(2.0), 4.0);
}

#[test]
fn inverse_hits_exact_index_times() {
    let timing = Timing::new(LinearPlaybackDefinedDuration::new(0.0, 100.0, 10.0).unwrap());
    for ix in [25.0, 40.0, 60.0] {
        let stime = timing.time_to_stime(ix).unwrap();
        assert_eq!(timing.stime_to_time(stime), ix);
    }
}
