//! Periodic countdown shared by the strategies.

/// Count `timer` down by `dt`. Once it runs out, wind it forward by whole
/// `interval`s into `(0, interval]` and return true.
///
/// Any number of missed periods collapses into one firing, in constant time.
pub(crate) fn countdown(timer: &mut f64, dt: f64, interval: f64) -> bool {
    *timer -= dt;
    if *timer > 0.0 {
        return false;
    }
    let rest = timer.rem_euclid(interval);
    *timer = if rest > 0.0 { rest } else { interval };
    true
}
