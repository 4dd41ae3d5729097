/// Result of a bounded scalar minimization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Minimum {
    /// Argument of the best value found.
    pub x: f64,
    /// Objective value at `x`.
    pub fx: f64,
    /// Golden-section iterations performed.
    pub iterations: u32,
}

const INV_PHI: f64 = 0.618_033_988_749_894_9;
const MAX_ITERATIONS: u32 = 200;
const MAX_POLISH_STEPS: u32 = 64;

/// Golden-section search for a minimum of `f` on `[lo, hi]`.
///
/// Only unimodal objectives are guaranteed to reach their global minimum. The interval ends
/// are always considered as candidates so minima sitting on a bound are found exactly.
pub(crate) fn minimize_bounded(f: impl Fn(f64) -> f64, lo: f64, hi: f64) -> Minimum {
    let (mut a, mut b) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let x_tol = f64::EPSILON * 4.0 * a.abs().max(b.abs()).max(1.0);

    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut fc = f(c);
    let mut fd = f(d);
    let mut iterations = 0;

    while iterations < MAX_ITERATIONS && (b - a) > x_tol {
        if fc <= fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_PHI * (b - a);
            fc = f(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_PHI * (b - a);
            fd = f(d);
        }
        iterations += 1;
    }

    let mut best = Minimum {
        x: c,
        fx: fc,
        iterations,
    };
    for (x, fx) in [(d, fd), (lo, f(lo)), (hi, f(hi))] {
        if fx < best.fx || best.fx.is_nan() {
            best = Minimum { x, fx, iterations };
        }
    }
    best
}

/// Move an approximate root `x` of `residual` ulp by ulp within `[lo, hi]` while `|residual|`
/// shrinks. From an exact zero it keeps walking down, so the smallest argument of a run of zeros
/// is returned.
pub(crate) fn polish_root(residual: impl Fn(f64) -> f64, x: f64, lo: f64, hi: f64) -> f64 {
    let mut x = x.clamp(lo, hi);
    let mut r = residual(x).abs();
    for step in [f64::next_down, f64::next_up] {
        for _ in 0..MAX_POLISH_STEPS {
            let next = step(x);
            if next < lo || next > hi {
                break;
            }
            let rn = residual(next).abs();
            let down_through_zeros = rn == 0.0 && r == 0.0 && next < x;
            if rn < r || down_through_zeros {
                x = next;
                r = rn;
            } else {
                break;
            }
        }
    }
    x
}

#[cfg(test)]
#[path = "../../tests/unit/timing/invert.rs"]
mod tests;
