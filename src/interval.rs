//! Interval arithmetic for ray parameter ranges.

/// Open interval (min, max) used to bound accepted ray parameters.
///
/// Both ends are excluded: a hit exactly at `min` or `max` is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Minimum value of the interval
    pub min: f64,
    /// Maximum value of the interval
    pub max: f64,
}

impl Interval {
    /// Everything strictly in front of the ray origin.
    pub const FORWARD: Interval = Interval {
        min: 0.0,
        max: f64::INFINITY,
    };

    /// Create a new interval with given min and max values
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Check if the value lies strictly between the bounds
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Same interval with the upper bound pulled in to `max`.
    pub fn with_max(self, max: f64) -> Self {
        Self { max, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surrounds_excludes_both_bounds() {
        let i = Interval::new(0.0, 2.0);
        assert!(i.surrounds(1.0));
        assert!(!i.surrounds(0.0));
        assert!(!i.surrounds(2.0));
        assert!(!i.surrounds(-1.0));
    }

    #[test]
    fn forward_rejects_origin_and_nan() {
        assert!(!Interval::FORWARD.surrounds(0.0));
        assert!(!Interval::FORWARD.surrounds(f64::NAN));
        assert!(Interval::FORWARD.surrounds(1e300));
        assert!(!Interval::FORWARD.with_max(3.0).surrounds(3.0));
    }
}
