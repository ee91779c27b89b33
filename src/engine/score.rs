/// Scores a candidate alignment from its error count and its distance to the expected location.
///
/// `errors / pattern_len + |expected - current| / distance`, lower is better. With a
/// distance of zero any displacement scores 1, with an infinite distance the position is
/// ignored.
#[derive(Debug, Clone, Copy)]
pub struct LocationScore {
    pattern_len: f64,
    expected: usize,
    distance: f64,
}

impl LocationScore {
    pub fn new(pattern_len: usize, expected: usize, distance: f64) -> Self {
        Self {
            pattern_len: pattern_len as f64,
            expected,
            distance,
        }
    }

    #[inline]
    pub fn score(&self, errors: usize, current: usize) -> f64 {
        let accuracy = errors as f64 / self.pattern_len;
        let proximity = self.expected.abs_diff(current);

        if self.distance == 0.0 {
            if proximity == 0 { accuracy } else { 1.0 }
        } else {
            accuracy + proximity as f64 / self.distance
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_at_location() {
        assert_eq!(LocationScore::new(4, 0, 100.0).score(0, 0), 0.0);
    }

    #[test]
    fn test_errors_and_proximity() {
        let model = LocationScore::new(4, 10, 100.0);
        assert_eq!(model.score(1, 10), 0.25);
        assert!((model.score(1, 30) - 0.45).abs() < 1e-12);
        assert!((model.score(0, 0) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_zero_distance() {
        let model = LocationScore::new(4, 3, 0.0);
        assert_eq!(model.score(2, 3), 0.5);
        assert_eq!(model.score(0, 4), 1.0);
    }

    #[test]
    fn test_unbounded_distance() {
        let model = LocationScore::new(5, 0, f64::INFINITY);
        assert_eq!(model.score(1, 10_000), 0.2);
    }

    #[test]
    fn test_larger_distance_never_scores_worse() {
        let mut previous = f64::INFINITY;
        for distance in [1.0, 10.0, 100.0, 1000.0, f64::INFINITY] {
            let score = LocationScore::new(6, 2, distance).score(1, 40);
            assert!(score <= previous, "distance={distance} score={score} previous={previous}");
            previous = score;
        }
    }
}
