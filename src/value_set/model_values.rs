use indexmap::IndexMap;

use crate::{
    error::{Error, Result},
    value::TimeSeriesValue,
};

use super::{Role, ValueSet};

/// The state variables, parameters, and forcing of one model.
///
/// Ids are unique across all three sets, so any id resolves to exactly one
/// value. Equations read through [`get`](Self::get) and
/// [`value_at`](Self::value_at). State variables are written through
/// [`variable_mut`](Self::variable_mut) by schemes and the simulation; inputs
/// are updated through [`input_mut`](Self::input_mut).
#[derive(Debug, Clone)]
pub struct ModelValues {
    variables: ValueSet,
    parameters: ValueSet,
    forcing: ValueSet,
}

impl Default for ModelValues {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelValues {
    #[must_use]
    pub fn new() -> Self {
        Self {
            variables: ValueSet::new(Role::StateVariable),
            parameters: ValueSet::new(Role::Parameter),
            forcing: ValueSet::new(Role::Forcing),
        }
    }

    /// Adds a value in the given role.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateIdentifier`] if the id is used in any role.
    pub fn insert(&mut self, role: Role, value: TimeSeriesValue) -> Result<()> {
        if self.contains(value.id()) {
            return Err(Error::DuplicateIdentifier(value.id().to_owned()));
        }
        let set = match role {
            Role::StateVariable => &mut self.variables,
            Role::Parameter => &mut self.parameters,
            Role::Forcing => &mut self.forcing,
        };
        set.insert(value)
    }

    /// Adds a state variable. See [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateIdentifier`] if the id is already used.
    pub fn add_variable(&mut self, value: TimeSeriesValue) -> Result<()> {
        self.insert(Role::StateVariable, value)
    }

    /// Adds a parameter. See [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateIdentifier`] if the id is already used.
    pub fn add_parameter(&mut self, value: TimeSeriesValue) -> Result<()> {
        self.insert(Role::Parameter, value)
    }

    /// Adds a forcing input. See [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateIdentifier`] if the id is already used.
    pub fn add_forcing(&mut self, value: TimeSeriesValue) -> Result<()> {
        self.insert(Role::Forcing, value)
    }

    #[must_use]
    pub fn variables(&self) -> &ValueSet {
        &self.variables
    }

    #[must_use]
    pub fn parameters(&self) -> &ValueSet {
        &self.parameters
    }

    #[must_use]
    pub fn forcing(&self) -> &ValueSet {
        &self.forcing
    }

    /// Mutable access to one parameter or forcing input, for updating it
    /// between integrations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownIdentifier`] if no parameter or forcing input
    /// has this id. State variables are never resolved here.
    pub fn input_mut(&mut self, id: &str) -> Result<&mut TimeSeriesValue> {
        if self.parameters.contains(id) {
            self.parameters.get_mut(id)
        } else {
            self.forcing.get_mut(id)
        }
    }

    /// Mutable access to one state variable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownIdentifier`] if no state variable has this id.
    pub fn variable_mut(&mut self, id: &str) -> Result<&mut TimeSeriesValue> {
        self.variables.get_mut(id)
    }

    /// Returns the role of the value with this id.
    #[must_use]
    pub fn role_of(&self, id: &str) -> Option<Role> {
        self.sets()
            .into_iter()
            .find(|set| set.contains(id))
            .map(ValueSet::role)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.role_of(id).is_some()
    }

    /// Resolves an id in any role.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownIdentifier`] if no value has this id.
    pub fn get(&self, id: &str) -> Result<&TimeSeriesValue> {
        self.sets()
            .into_iter()
            .find(|set| set.contains(id))
            .ok_or_else(|| Error::UnknownIdentifier(id.to_owned()))?
            .get(id)
    }

    /// Evaluates the value with this id at `time`.
    ///
    /// # Errors
    ///
    /// Fails if the id is unknown or the value cannot be evaluated.
    pub fn value_at(&self, id: &str, time: f64) -> Result<f64> {
        self.get(id)?.at(time)
    }

    /// Latest recorded time among the named values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownIdentifier`] for an unknown id, or
    /// [`Error::NoDataAvailable`] if none of the values has data.
    pub fn latest_time<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> Result<f64> {
        let mut latest: Option<f64> = None;
        let mut first_id = None;
        for id in ids {
            first_id.get_or_insert(id);
            if let Some(time) = self.get(id)?.last_time() {
                latest = Some(latest.map_or(time, |t| t.max(time)));
            }
        }
        latest.ok_or_else(|| Error::NoDataAvailable {
            id: first_id.unwrap_or_default().to_owned(),
        })
    }

    /// Current values of every state variable, in insertion order.
    ///
    /// Variables without data are skipped.
    #[must_use]
    pub fn state(&self) -> IndexMap<String, f64> {
        self.variables
            .iter()
            .filter_map(|value| {
                value
                    .current()
                    .ok()
                    .map(|point| (value.id().to_owned(), point.value))
            })
            .collect()
    }

    fn sets(&self) -> [&ValueSet; 3] {
        [&self.variables, &self.parameters, &self.forcing]
    }
}
