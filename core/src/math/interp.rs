/// Piecewise-linear interpolation over strictly increasing knots.
///
/// Queries outside the knot span take the value of the nearest end knot.
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterpolator {
    /// Returns `None` unless there are at least two knots, the lengths agree
    /// and `xs` is strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Option<Self> {
        if xs.len() < 2 || xs.len() != ys.len() {
            return None;
        }
        if xs.windows(2).any(|w| !(w[0] < w[1])) {
            return None;
        }
        Some(Self { xs, ys })
    }

    pub fn eval(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        let last = self.xs.len() - 1;
        if x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[last] {
            return self.ys[last];
        }
        // First knot strictly above x; bounded to 1..=last by the checks above.
        let upper = self.xs.partition_point(|&knot| knot <= x);
        let lower = upper - 1;
        let t = (x - self.xs[lower]) / (self.xs[upper] - self.xs[lower]);
        self.ys[lower] + t * (self.ys[upper] - self.ys[lower])
    }

    pub fn span(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_between_knots() {
        let interp =
            LinearInterpolator::new(vec![0.0, 1000.0, 3000.0], vec![25.0, 20.0, 4.0]).unwrap();
        assert_eq!(interp.eval(500.0), 22.5);
        assert_eq!(interp.eval(1000.0), 20.0);
        assert_eq!(interp.eval(2000.0), 12.0);
    }

    #[test]
    fn clamps_outside_the_span() {
        let interp = LinearInterpolator::new(vec![100.0, 200.0], vec![1.0, 3.0]).unwrap();
        assert_eq!(interp.eval(-50.0), 1.0);
        assert_eq!(interp.eval(1e6), 3.0);
        assert!(interp.eval(f64::NAN).is_nan());
    }

    #[test]
    fn rejects_non_increasing_knots() {
        assert!(LinearInterpolator::new(vec![0.0, 0.0], vec![1.0, 2.0]).is_none());
        assert!(LinearInterpolator::new(vec![0.0], vec![1.0]).is_none());
        assert!(LinearInterpolator::new(vec![0.0, 1.0], vec![1.0]).is_none());
    }
}
