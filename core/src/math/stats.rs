pub struct StatsHelper;

impl StatsHelper {
    /// Minimum and maximum over the finite values, `None` when there are none.
    pub fn finite_range<'a, I>(values: I) -> Option<(f64, f64)>
    where
        I: IntoIterator<Item = &'a f64>,
    {
        values
            .into_iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    pub fn finite_mean<'a, I>(values: I) -> Option<f64>
    where
        I: IntoIterator<Item = &'a f64>,
    {
        let (sum, count) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((0.0, 0usize), |(sum, count), v| (sum + *v, count + 1));
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }
}
