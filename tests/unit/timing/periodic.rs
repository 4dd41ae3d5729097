use super::*;

#[test]
fn spin_covers_one_turn_per_period() {
    let spin = PeriodicPlayback::spin(4.0, 30.0).unwrap();
    assert_eq!(spin.sduration(), 4.0);
    assert_eq!(spin.stime_to_time(0.0), 30.0);
    assert_eq!(spin.stime_to_time(1.0), 120.0);
    assert_eq!(spin.stime_to_time(2.0), 210.0);
}

#[test]
fn wraps_every_period() {
    let p = PeriodicPlayback::new(0.0, 1.0, 2.0, 3).unwrap();
    assert_eq!(p.sduration(), 6.0);
    assert_eq!(p.stime_to_time(2.0), 0.0);
    assert_eq!(p.stime_to_time(5.0), 0.5);
    assert_eq!(p.stime_to_time(-0.5), 0.75);
    assert_eq!(p.phase(4.5), 0.25);
}

#[test]
fn rejects_degenerate_configurations() {
    assert!(PeriodicPlayback::new(0.0, 1.0, 0.0, 1).is_err());
    assert!(PeriodicPlayback::new(0.0, 1.0, 1.0, 0).is_err());
    assert!(PeriodicPlayback::new(f64::NAN, 1.0, 1.0, 1).is_err());
}
