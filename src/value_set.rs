//! Keyed collections of time series values.
//!
//! A [`ValueSet`] owns the [`TimeSeriesValue`]s of one [`Role`]. Equations never
//! own values; they name them by id and read them through [`ModelValues`],
//! which groups the three role sets of a model.

mod model_values;

pub use model_values::ModelValues;

use std::fmt;

use indexmap::IndexMap;

use crate::{
    error::{Error, Result},
    value::TimeSeriesValue,
};

/// The part a value plays in a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Integrated forward by a scheme, or computed by a diagnostic equation.
    StateVariable,
    /// Externally supplied, constant unless explicitly updated.
    Parameter,
    /// Externally supplied, typically time-varying.
    Forcing,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StateVariable => "state variable",
            Self::Parameter => "parameter",
            Self::Forcing => "forcing",
        })
    }
}

/// Values of a single role, keyed by id in insertion order.
#[derive(Debug, Clone)]
pub struct ValueSet {
    role: Role,
    values: IndexMap<String, TimeSeriesValue>,
}

impl ValueSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self {
            role,
            values: IndexMap::new(),
        }
    }

    /// Creates a set from a list of values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateIdentifier`] if two values share an id.
    pub fn with_values(
        role: Role,
        values: impl IntoIterator<Item = TimeSeriesValue>,
    ) -> Result<Self> {
        let mut set = Self::new(role);
        for value in values {
            set.insert(value)?;
        }
        Ok(set)
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Adds a value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateIdentifier`] if the id is already present.
    pub fn insert(&mut self, value: TimeSeriesValue) -> Result<()> {
        if self.values.contains_key(value.id()) {
            return Err(Error::DuplicateIdentifier(value.id().to_owned()));
        }
        self.values.insert(value.id().to_owned(), value);
        Ok(())
    }

    /// Removes and returns a value, keeping the order of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownIdentifier`] if no value has this id.
    pub fn remove(&mut self, id: &str) -> Result<TimeSeriesValue> {
        self.values
            .shift_remove(id)
            .ok_or_else(|| Error::UnknownIdentifier(id.to_owned()))
    }

    /// Looks up a value by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownIdentifier`] if no value has this id.
    pub fn get(&self, id: &str) -> Result<&TimeSeriesValue> {
        self.values
            .get(id)
            .ok_or_else(|| Error::UnknownIdentifier(id.to_owned()))
    }

    /// Looks up a value by id for writing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownIdentifier`] if no value has this id.
    pub fn get_mut(&mut self, id: &str) -> Result<&mut TimeSeriesValue> {
        self.values
            .get_mut(id)
            .ok_or_else(|| Error::UnknownIdentifier(id.to_owned()))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    /// Evaluates one value at `time`.
    ///
    /// # Errors
    ///
    /// Fails if the id is unknown or the value cannot be evaluated.
    pub fn value_at(&self, id: &str, time: f64) -> Result<f64> {
        self.get(id)?.at(time)
    }

    /// Evaluates every value at `time`, in insertion order.
    ///
    /// # Errors
    ///
    /// Fails on the first value that cannot be evaluated.
    pub fn values_at(&self, time: f64) -> Result<IndexMap<String, f64>> {
        self.values
            .iter()
            .map(|(id, value)| Ok((id.clone(), value.at(time)?)))
            .collect()
    }

    /// Latest recorded time over all values, if any value has data.
    #[must_use]
    pub fn latest_time(&self) -> Option<f64> {
        self.values
            .values()
            .filter_map(TimeSeriesValue::last_time)
            .reduce(f64::max)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeSeriesValue> {
        self.values.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::value::ValueConfig;

    fn value(id: &str, points: &[(f64, f64)]) -> TimeSeriesValue {
        let (times, values): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();
        TimeSeriesValue::with_history(ValueConfig::new(id), &times, &values).unwrap()
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = ValueSet::with_values(
            Role::Parameter,
            [value("a", &[(0.0, 1.0)]), value("a", &[(0.0, 2.0)])],
        )
        .unwrap_err();
        assert_eq!(err, Error::DuplicateIdentifier("a".to_owned()));
    }

    #[test]
    fn lookup_miss_is_unknown_identifier() {
        let set = ValueSet::new(Role::Forcing);
        assert_eq!(
            set.get("F").unwrap_err(),
            Error::UnknownIdentifier("F".to_owned())
        );
        assert!(set.value_at("F", 0.0).is_err());
    }

    #[test]
    fn preserves_insertion_order() {
        let set = ValueSet::with_values(
            Role::Parameter,
            [
                value("c", &[(0.0, 3.0)]),
                value("a", &[(0.0, 1.0)]),
                value("b", &[(0.0, 2.0)]),
            ],
        )
        .unwrap();
        assert_eq!(set.ids().collect::<Vec<_>>(), ["c", "a", "b"]);
    }

    #[test]
    fn bulk_query_at_time() {
        let set = ValueSet::with_values(
            Role::Forcing,
            [
                value("F", &[(0.0, 1.0), (10.0, 2.0)]),
                value("G", &[(5.0, 7.0)]),
            ],
        )
        .unwrap();

        let at_six = set.values_at(6.0).unwrap();
        assert_eq!(at_six["F"], 1.0);
        assert_eq!(at_six["G"], 7.0);
        assert_eq!(set.latest_time(), Some(10.0));
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut set = ValueSet::with_values(
            Role::StateVariable,
            [
                value("x", &[(0.0, 1.0)]),
                value("y", &[(0.0, 2.0)]),
                value("z", &[(0.0, 3.0)]),
            ],
        )
        .unwrap();

        let removed = set.remove("y").unwrap();
        assert_eq!(removed.id(), "y");
        assert_eq!(set.ids().collect::<Vec<_>>(), ["x", "z"]);
        assert!(set.remove("y").is_err());
    }

    #[test]
    fn empty_set_has_no_latest_time() {
        let mut set = ValueSet::new(Role::StateVariable);
        assert_eq!(set.latest_time(), None);
        set.insert(TimeSeriesValue::new(ValueConfig::new("x"))).unwrap();
        assert_eq!(set.latest_time(), None);
    }

    #[test]
    fn roles_display() {
        assert_eq!(Role::StateVariable.to_string(), "state variable");
        assert_eq!(Role::Forcing.to_string(), "forcing");
    }
}
