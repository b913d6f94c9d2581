/// How a [`TimeSeriesValue`](super::TimeSeriesValue) is read between recorded points.
///
/// Outside the recorded range both modes hold the nearest boundary value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Step function: the value recorded at the greatest time not after the query.
    #[default]
    ZeroOrderHold,
    /// Straight line between the two bracketing recorded points.
    Linear,
}

impl Interpolation {
    /// Evaluates a non-empty, strictly increasing history at `time`.
    ///
    /// `times` and `values` must have equal, non-zero length and `time` must
    /// not be `NaN`; callers check both.
    pub(super) fn evaluate(self, times: &[f64], values: &[f64], time: f64) -> f64 {
        debug_assert!(!times.is_empty() && times.len() == values.len());
        debug_assert!(!time.is_nan());

        let last = times.len() - 1;
        if time <= times[0] {
            return values[0];
        }
        if time >= times[last] {
            return values[last];
        }

        // First index recorded strictly after `time`, in 1..=last.
        let upper = times.partition_point(|&t| t <= time);
        let lower = upper - 1;

        match self {
            Self::ZeroOrderHold => values[lower],
            Self::Linear => {
                let (t0, v0) = (times[lower], values[lower]);
                let (t1, v1) = (times[upper], values[upper]);
                v0 + (v1 - v0) * (time - t0) / (t1 - t0)
            }
        }
    }
}
