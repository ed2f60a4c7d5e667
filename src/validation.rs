//! Per-unit validation state of the request form
//!
//! Each unit starts untouched and becomes validated on an explicit trigger
//! (blur or submit). Once validated, a unit is re-evaluated on edits; it
//! never returns to untouched.

use crate::body;
use crate::error::ValidationError;
use crate::keyvalue::{KeyValueSet, RowFault, RowId};
use crate::models::RequestForm;

/// Independently validated parts of the form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    Url,
    Params,
    Headers,
    Body,
}

impl Unit {
    pub const ALL: [Unit; 4] = [Unit::Url, Unit::Params, Unit::Headers, Unit::Body];

    fn index(self) -> usize {
        match self {
            Unit::Url => 0,
            Unit::Params => 1,
            Unit::Headers => 2,
            Unit::Body => 3,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum UnitState {
    #[default]
    Untouched,
    Validated(Vec<ValidationError>),
}

impl UnitState {
    pub fn has_errors(&self) -> bool {
        matches!(self, UnitState::Validated(errors) if !errors.is_empty())
    }
}

/// Empty is allowed; anything else must parse as an absolute URL
pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        return Ok(());
    }
    url::Url::parse(url)
        .map(|_| ())
        .map_err(|e| ValidationError::UrlFormat(e.to_string()))
}

pub fn validate_key_value_set(set: &KeyValueSet) -> Vec<ValidationError> {
    set.violations()
        .into_iter()
        .map(|v| ValidationError::RowPairing {
            row: v.id,
            fault: v.fault,
        })
        .collect()
}

fn evaluate(unit: Unit, form: &RequestForm) -> Vec<ValidationError> {
    match unit {
        Unit::Url => validate_url(&form.url).err().into_iter().collect(),
        Unit::Params => validate_key_value_set(&form.params),
        Unit::Headers => validate_key_value_set(&form.headers),
        Unit::Body => body::validate(&form.body).error().into_iter().collect(),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValidationState {
    units: [UnitState; 4],
}

impl FormValidationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `unit` against the current form
    pub fn trigger(&mut self, unit: Unit, form: &RequestForm) {
        self.units[unit.index()] = UnitState::Validated(evaluate(unit, form));
    }

    /// Re-validate `unit` only if it has been triggered before
    pub fn refresh(&mut self, unit: Unit, form: &RequestForm) {
        if self.is_touched(unit) {
            self.trigger(unit, form);
        }
    }

    /// Validate every unit; returns true when the form is submittable
    pub fn trigger_all(&mut self, form: &RequestForm) -> bool {
        for unit in Unit::ALL {
            self.trigger(unit, form);
        }
        !self.has_errors()
    }

    pub fn state(&self, unit: Unit) -> &UnitState {
        &self.units[unit.index()]
    }

    pub fn is_touched(&self, unit: Unit) -> bool {
        !matches!(self.state(unit), UnitState::Untouched)
    }

    pub fn current_errors(&self, unit: Unit) -> &[ValidationError] {
        match self.state(unit) {
            UnitState::Untouched => &[],
            UnitState::Validated(errors) => errors,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.units.iter().any(UnitState::has_errors)
    }

    /// Decoration for a single row of a key/value unit
    pub fn row_fault(&self, unit: Unit, id: RowId) -> Option<RowFault> {
        self.current_errors(unit).iter().find_map(|err| match err {
            ValidationError::RowPairing { row, fault } if *row == id => Some(*fault),
            _ => None,
        })
    }

    /// Parser message for the body, once the body has been validated
    pub fn body_error(&self) -> Option<&str> {
        self.current_errors(Unit::Body).iter().find_map(|err| match err {
            ValidationError::BodyParse(message) => Some(message.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_rules() {
        assert!(validate_url("").is_ok());
        assert!(validate_url("   ").is_ok());
        assert!(validate_url("https://api.example.com/users?x=1").is_ok());
        assert!(matches!(
            validate_url("api.example.com"),
            Err(ValidationError::UrlFormat(_))
        ));
    }

    #[test]
    fn test_untouched_until_triggered() {
        let mut form = RequestForm::default();
        form.params.push("page", "");
        let state = FormValidationState::new();

        assert!(!state.is_touched(Unit::Params));
        assert!(state.current_errors(Unit::Params).is_empty());
        assert!(!state.has_errors());
    }

    #[test]
    fn test_refresh_ignores_untouched_units() {
        let mut form = RequestForm::default();
        form.url = "nope".into();
        let mut state = FormValidationState::new();

        state.refresh(Unit::Url, &form);
        assert_eq!(state.state(Unit::Url), &UnitState::Untouched);

        state.trigger(Unit::Url, &form);
        assert!(state.state(Unit::Url).has_errors());

        form.url = "https://example.com".into();
        state.refresh(Unit::Url, &form);
        assert_eq!(state.state(Unit::Url), &UnitState::Validated(vec![]));
    }

    #[test]
    fn test_row_fault_decorates_the_right_field() {
        let mut form = RequestForm::default();
        let key_only = form.headers.push("X-Trace", "");
        let value_only = form.headers.push("", "abc");
        let fine = form.headers.push("Accept", "*/*");

        let mut state = FormValidationState::new();
        state.trigger(Unit::Headers, &form);

        assert_eq!(state.row_fault(Unit::Headers, key_only), Some(RowFault::MissingValue));
        assert_eq!(state.row_fault(Unit::Headers, value_only), Some(RowFault::MissingKey));
        assert_eq!(state.row_fault(Unit::Headers, fine), None);
        assert_eq!(state.row_fault(Unit::Params, key_only), None);
    }

    #[test]
    fn test_trigger_all_blocks_on_any_error() {
        let mut form = RequestForm {
            url: "https://example.com".into(),
            body: "{bad json".into(),
            ..Default::default()
        };
        let mut state = FormValidationState::new();

        assert!(!state.trigger_all(&form));
        assert!(state.body_error().is_some());
        assert!(Unit::ALL.iter().all(|u| state.is_touched(*u)));

        form.body = r#"{"ok":true}"#.into();
        assert!(state.trigger_all(&form));
        assert!(state.body_error().is_none());
    }

    #[test]
    fn test_errors_are_recomputed_from_scratch() {
        let mut form = RequestForm::default();
        let id = form.params.push("a", "");
        let mut state = FormValidationState::new();
        state.trigger(Unit::Params, &form);
        assert_eq!(state.current_errors(Unit::Params).len(), 1);

        form.params.remove(id);
        state.trigger(Unit::Params, &form);
        assert!(state.current_errors(Unit::Params).is_empty());
    }
}
