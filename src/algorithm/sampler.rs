use rand::Rng;

/// Anything that can be drawn by roulette-wheel selection
pub trait Weighted {
    /// Non-negative relative weight
    fn weight(&self) -> f64;
}

impl<T: Weighted + ?Sized> Weighted for &T {
    fn weight(&self) -> f64 {
        (**self).weight()
    }
}

impl Weighted for f64 {
    fn weight(&self) -> f64 {
        *self
    }
}

/// Roulette-wheel selection over weighted items
///
/// Draws `u` uniformly from `[0, total)` and returns the first item whose
/// cumulative weight reaches `u`. Floating-point shortfall falls back to the
/// first item. Consumes exactly one draw; returns `None` only for an empty slice.
pub fn pick<'a, T: Weighted, R: Rng>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    let total: f64 = items.iter().map(Weighted::weight).sum();
    let target = rng.random::<f64>() * total;

    let mut cumulative = 0.0;
    for item in items {
        cumulative += item.weight();
        if cumulative >= target {
            return Some(item);
        }
    }
    items.first()
}
