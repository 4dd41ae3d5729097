use super::*;

#[test]
fn finds_interior_minimum_of_parabola() {
    let m = minimize_bounded(|x| (x - 2.5).powi(2), 0.0, 10.0);
    assert!((m.x - 2.5).abs() < 1e-7);
    assert!(m.fx < 1e-14);
    assert!(m.iterations > 0);
}

#[test]
fn minimum_on_bound_is_exact() {
    let m = minimize_bounded(|x| x * x, 0.0, 3.0);
    assert_eq!(m.x, 0.0);
    assert_eq!(m.fx, 0.0);

    let m = minimize_bounded(|x| (x - 3.0).powi(2), 0.0, 3.0);
    assert_eq!(m.x, 3.0);
}

#[test]
fn out_of_range_target_clamps_to_nearest_bound() {
    let m = minimize_bounded(|x| (x - 20.0).powi(2), 0.0, 10.0);
    assert_eq!(m.x, 10.0);
    assert_eq!(m.fx, 100.0);
}

#[test]
fn swapped_bounds_are_accepted() {
    let m = minimize_bounded(|x| (x - 1.0).powi(2), 4.0, 0.0);
    assert!((m.x - 1.0).abs() < 1e-7);
}

#[test]
fn polish_lands_on_earliest_exact_root() {
    let residual = |s: f64| s / 10.0 * 100.0 - 60.0;
    let x = polish_root(residual, 6.0_f64.next_up().next_up(), 0.0, 10.0);
    assert_eq!(residual(x), 0.0);
    assert_ne!(residual(x.next_down()), 0.0);
}

#[test]
fn polish_walks_down_a_run_of_zeros() {
    let residual = |s: f64| if s < 1.0 { s - 1.0 } else if s <= 2.0 { 0.0 } else { s - 2.0 };
    let x = polish_root(residual, 1.0_f64.next_up().next_up().next_up(), 0.0, 3.0);
    assert_eq!(x, 1.0);
}

#[test]
fn polish_stays_within_bounds() {
    assert_eq!(polish_root(|s| s - 5.0, 3.0, 0.0, 3.0), 3.0);
    assert_eq!(polish_root(|s| s + 1.0, 0.0, 0.0, 3.0), 0.0);
}
