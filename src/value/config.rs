use super::{Bounds, BoundsPolicy, Interpolation};

/// Construction-time configuration of a [`TimeSeriesValue`](super::TimeSeriesValue).
///
/// `name` and `unit` are metadata only and never enter a computation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueConfig {
    /// Unique identifier used for lookups.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Physical unit, for display.
    pub unit: String,

    /// Interval every recorded value must lie in.
    pub bounds: Bounds,

    /// What happens to writes outside `bounds`.
    pub bounds_policy: BoundsPolicy,

    /// How reads between recorded points are answered.
    pub interpolation: Interpolation,
}

impl ValueConfig {
    /// Creates a configuration with the given id and defaults for everything else.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_bounds_policy(mut self, bounds_policy: BoundsPolicy) -> Self {
        self.bounds_policy = bounds_policy;
        self
    }

    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }
}

impl Default for ValueConfig {
    fn default() -> Self {
        Self {
            id: "unnamed_value".to_owned(),
            name: "unnamed value".to_owned(),
            unit: "1".to_owned(),
            bounds: Bounds::unbounded(),
            bounds_policy: BoundsPolicy::Clamp,
            interpolation: Interpolation::ZeroOrderHold,
        }
    }
}
