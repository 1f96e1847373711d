//! The add/edit form buffer.
//!
//! A draft is a plain [`User`]; this module adds field addressing so the form
//! (and tests) can set one field at a time by its wire name.
use crate::error::UserListError;
use crate::model::{MaritalStatus, User, parse_age};

/// Fields of the add/edit form, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DraftField {
    FirstName,
    LastName,
    Username,
    Age,
    MaritalStatus,
    IsEmployed,
    IsFounder,
}

impl DraftField {
    pub const ALL: [DraftField; 7] = [
        DraftField::FirstName,
        DraftField::LastName,
        DraftField::Username,
        DraftField::Age,
        DraftField::MaritalStatus,
        DraftField::IsEmployed,
        DraftField::IsFounder,
    ];

    pub fn from_name(name: &str) -> Result<Self, UserListError> {
        match name {
            "first_name" => Ok(DraftField::FirstName),
            "last_name" => Ok(DraftField::LastName),
            "username" => Ok(DraftField::Username),
            "age" => Ok(DraftField::Age),
            "marital_status" => Ok(DraftField::MaritalStatus),
            "is_employed" => Ok(DraftField::IsEmployed),
            "is_founder" => Ok(DraftField::IsFounder),
            other => Err(UserListError::UnknownField(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DraftField::FirstName => "first_name",
            DraftField::LastName => "last_name",
            DraftField::Username => "username",
            DraftField::Age => "age",
            DraftField::MaritalStatus => "marital_status",
            DraftField::IsEmployed => "is_employed",
            DraftField::IsFounder => "is_founder",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DraftField::FirstName => "First name",
            DraftField::LastName => "Last name",
            DraftField::Username => "Username",
            DraftField::Age => "Age",
            DraftField::MaritalStatus => "Marital status",
            DraftField::IsEmployed => "Employed",
            DraftField::IsFounder => "Founder",
        }
    }

    /// Free-text fields take typed characters; the others are selectors.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            DraftField::FirstName | DraftField::LastName | DraftField::Username | DraftField::Age
        )
    }
}

/// Current value of `field` as the form shows it.
pub fn field_text(draft: &User, field: DraftField) -> String {
    match field {
        DraftField::FirstName => draft.first_name.clone(),
        DraftField::LastName => draft.last_name.clone(),
        DraftField::Username => draft.username.clone(),
        DraftField::Age => draft.age.map(|a| a.to_string()).unwrap_or_default(),
        DraftField::MaritalStatus => draft.marital_status.as_str().to_string(),
        DraftField::IsEmployed => crate::model::yes_no(draft.is_employed).to_string(),
        DraftField::IsFounder => crate::model::yes_no(draft.is_founder).to_string(),
    }
}

/// Merge one raw value into the draft. On error the draft is unchanged.
pub fn set_field(draft: &mut User, field: DraftField, raw: &str) -> Result<(), UserListError> {
    match field {
        DraftField::FirstName => draft.first_name = raw.to_string(),
        DraftField::LastName => draft.last_name = raw.to_string(),
        DraftField::Username => draft.username = raw.to_string(),
        DraftField::Age => draft.age = parse_age(raw)?,
        DraftField::MaritalStatus => draft.marital_status = raw.parse::<MaritalStatus>()?,
        DraftField::IsEmployed => draft.is_employed = parse_flag(field, raw)?,
        DraftField::IsFounder => draft.is_founder = parse_flag(field, raw)?,
    }
    Ok(())
}

/// Flip a selector field (marital status or one of the flags).
pub fn toggle_field(draft: &mut User, field: DraftField) {
    match field {
        DraftField::MaritalStatus => draft.marital_status = draft.marital_status.toggled(),
        DraftField::IsEmployed => draft.is_employed = !draft.is_employed,
        DraftField::IsFounder => draft.is_founder = !draft.is_founder,
        _ => {}
    }
}

/// Commit-time checks: the three name fields must not be blank.
pub fn validate(draft: &User) -> Result<(), UserListError> {
    if draft.first_name.trim().is_empty() {
        return Err(UserListError::MissingField("first name"));
    }
    if draft.last_name.trim().is_empty() {
        return Err(UserListError::MissingField("last name"));
    }
    if draft.username.trim().is_empty() {
        return Err(UserListError::MissingField("username"));
    }
    Ok(())
}

fn parse_flag(field: DraftField, raw: &str) -> Result<bool, UserListError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(UserListError::InvalidFlag {
            field: field.name(),
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_blank_number_and_garbage() {
        let mut d = User::default();
        set_field(&mut d, DraftField::Age, "42").unwrap();
        assert_eq!(d.age, Some(42));
        assert!(set_field(&mut d, DraftField::Age, "4x").is_err());
        assert_eq!(d.age, Some(42));
        set_field(&mut d, DraftField::Age, "").unwrap();
        assert_eq!(d.age, None);
    }

    #[test]
    fn field_names_round_trip_through_lookup() {
        for f in DraftField::ALL {
            assert_eq!(DraftField::from_name(f.name()), Ok(f));
        }
        assert!(matches!(
            DraftField::from_name("email"),
            Err(UserListError::UnknownField(_))
        ));
    }

    #[test]
    fn flags_and_status_parse_loosely() {
        let mut d = User::default();
        set_field(&mut d, DraftField::IsFounder, "Yes").unwrap();
        set_field(&mut d, DraftField::MaritalStatus, "MARRIED").unwrap();
        assert!(d.is_founder);
        assert_eq!(d.marital_status, MaritalStatus::Married);
        assert!(set_field(&mut d, DraftField::IsEmployed, "maybe").is_err());
        assert!(set_field(&mut d, DraftField::MaritalStatus, "single").is_err());
    }

    #[test]
    fn validate_requires_names() {
        let mut d = User::default();
        assert_eq!(validate(&d), Err(UserListError::MissingField("first name")));
        d.first_name = "Ann".into();
        d.last_name = "Lee".into();
        d.username = "   ".into();
        assert_eq!(validate(&d), Err(UserListError::MissingField("username")));
        d.username = "alee".into();
        assert!(validate(&d).is_ok());
    }
}
