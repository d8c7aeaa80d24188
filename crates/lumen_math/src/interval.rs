/// Closed range of ray parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Window of ray parameters accepted as hits: `(EPSILON, 1 / EPSILON)`.
    pub const HIT_RANGE: Interval = Interval {
        min: crate::EPSILON,
        max: 1.0 / crate::EPSILON,
    };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The same window cut off at `max`, for closest-hit searches.
    #[inline]
    pub const fn with_max(self, max: f64) -> Self {
        Self { min: self.min, max }
    }

    /// `min <= x <= max`
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// `min < x < max`
    #[inline]
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }
}
