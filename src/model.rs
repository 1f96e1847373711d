//! User record type as exchanged with the remote source.
//!
//! The JSON shape is an array of objects with `first_name`, `last_name`,
//! `username`, `age`, `marital_status`, `is_employed` and `is_founder`.
//! Decoding is lenient about `age` (number, numeric string, empty or null)
//! and strict about everything else.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::UserListError;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum MaritalStatus {
    #[default]
    Unmarried,
    Married,
}

impl MaritalStatus {
    /// Wire and display spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            MaritalStatus::Unmarried => "unmarried",
            MaritalStatus::Married => "married",
        }
    }

    /// Flip between the two values; used by the form selector.
    pub fn toggled(self) -> Self {
        match self {
            MaritalStatus::Unmarried => MaritalStatus::Married,
            MaritalStatus::Married => MaritalStatus::Unmarried,
        }
    }
}

impl Display for MaritalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaritalStatus {
    type Err = UserListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unmarried" => Ok(MaritalStatus::Unmarried),
            "married" => Ok(MaritalStatus::Married),
            _ => Err(UserListError::InvalidMaritalStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for MaritalStatus {
    type Error = UserListError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One user as shown on a card and edited in the form.
///
/// `age` is `None` when the source left it blank. The flags default to
/// `false` when absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    #[serde(default, deserialize_with = "deserialize_age")]
    pub age: Option<u32>,
    #[serde(default)]
    pub marital_status: MaritalStatus,
    #[serde(default)]
    pub is_employed: bool,
    #[serde(default)]
    pub is_founder: bool,
}

impl User {
    /// First and last name joined by a space, as used for the card title.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Render a flag the way cards show it.
pub fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Parse age text: blank means unknown, otherwise a non-negative integer.
pub fn parse_age(raw: &str) -> Result<Option<u32>, UserListError> {
    let t = raw.trim();
    if t.is_empty() {
        return Ok(None);
    }
    t.parse::<u32>()
        .map(Some)
        .map_err(|_| UserListError::InvalidAge(raw.to_string()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAge {
    Number(u32),
    Text(String),
}

fn deserialize_age<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawAge>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawAge::Number(n)) => Ok(Some(n)),
        Some(RawAge::Text(s)) => parse_age(&s).map_err(serde::de::Error::custom),
    }
}

/// Decode a JSON array of users.
///
/// # Arguments
///
/// * `json` - The full payload. Anything other than a top-level array of
///   user objects is an error.
///
/// # Returns
///
/// The users in payload order.
pub fn parse_users(json: &str) -> serde_json::Result<Vec<User>> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_record() {
        let users = parse_users(
            r#"[{"first_name":"Ann","last_name":"Lee","username":"alee","age":30,
                "marital_status":"married","is_employed":true,"is_founder":false}]"#,
        )
        .unwrap();
        assert_eq!(users.len(), 1);
        let u = &users[0];
        assert_eq!(u.full_name(), "Ann Lee");
        assert_eq!(u.age, Some(30));
        assert_eq!(u.marital_status, MaritalStatus::Married);
        assert!(u.is_employed);
        assert!(!u.is_founder);
    }

    #[test]
    fn age_accepts_text_blank_and_null() {
        let users = parse_users(
            r#"[
                {"first_name":"a","last_name":"b","username":"c","age":"41","marital_status":"unmarried"},
                {"first_name":"a","last_name":"b","username":"c","age":"","marital_status":"Married"},
                {"first_name":"a","last_name":"b","username":"c","age":null,"marital_status":"unmarried"},
                {"first_name":"a","last_name":"b","username":"c"}
            ]"#,
        )
        .unwrap();
        let ages: Vec<_> = users.iter().map(|u| u.age).collect();
        assert_eq!(ages, vec![Some(41), None, None, None]);
        assert_eq!(users[1].marital_status, MaritalStatus::Married);
        assert!(!users[3].is_employed);
    }

    #[test]
    fn rejects_unknown_marital_status_and_bad_age() {
        assert!(parse_users(r#"[{"first_name":"a","last_name":"b","username":"c","marital_status":"divorced"}]"#).is_err());
        assert!(parse_users(r#"[{"first_name":"a","last_name":"b","username":"c","age":"old"}]"#).is_err());
        assert!(parse_users(r#"{"first_name":"a"}"#).is_err());
    }

    #[test]
    fn parse_age_boundaries() {
        assert_eq!(parse_age("  "), Ok(None));
        assert_eq!(parse_age("0"), Ok(Some(0)));
        assert!(matches!(parse_age("-1"), Err(UserListError::InvalidAge(_))));
        assert!(matches!(parse_age("12.5"), Err(UserListError::InvalidAge(_))));
    }
}
