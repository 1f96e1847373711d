//! Canonical in-memory list of user records.
//!
//! Every record gets a generated [`UserId`] when it enters the list. Edits and
//! deletes are keyed by that id, never by position.
use std::fmt::{Display, Formatter};

use uuid::Uuid;

use crate::error::UserListError;
use crate::model::User;

/// Stable identity of a record for the lifetime of the process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user together with the id it was given on entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub user: User,
}

/// Ordered list of records. Order is insertion order.
#[derive(Clone, Debug, Default)]
pub struct UserStore {
    records: Vec<UserRecord>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `users`, keeping their order.
    pub fn from_users(users: Vec<User>) -> Self {
        let mut store = Self::new();
        store.replace_all(users);
        store
    }

    /// Drop every record and load `users`, assigning fresh ids.
    pub fn replace_all(&mut self, users: Vec<User>) {
        self.records = users
            .into_iter()
            .map(|user| UserRecord { id: UserId::new(), user })
            .collect();
    }

    /// All records in canonical order.
    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id.
    ///
    /// # Returns
    ///
    /// `None` when `id` was never issued or its record has been removed.
    pub fn get(&self, id: UserId) -> Option<&UserRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Index of `id` in canonical order.
    pub fn position(&self, id: UserId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Append `user` at the end of the list.
    ///
    /// # Arguments
    ///
    /// * `user` - The record to store. It is not validated here.
    ///
    /// # Returns
    ///
    /// The id generated for the new record.
    pub fn add(&mut self, user: User) -> UserId {
        let id = UserId::new();
        self.records.push(UserRecord { id, user });
        id
    }

    /// Replace the record `id` in place, keeping its position.
    ///
    /// # Arguments
    ///
    /// * `id` - Identity of the record to replace.
    /// * `user` - The new value.
    ///
    /// # Returns
    ///
    /// The previous value, or [`UserListError::UnknownUser`] if `id` is not
    /// in the list. The list is unchanged on error.
    pub fn update(&mut self, id: UserId, user: User) -> Result<User, UserListError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(UserListError::UnknownUser(id))?;
        Ok(std::mem::replace(&mut record.user, user))
    }

    /// Remove the record `id`. Relative order of the others is kept.
    ///
    /// # Returns
    ///
    /// The removed user, or [`UserListError::UnknownUser`] for a stale id.
    pub fn remove(&mut self, id: UserId) -> Result<User, UserListError> {
        let idx = self.position(id).ok_or(UserListError::UnknownUser(id))?;
        Ok(self.records.remove(idx).user)
    }
}
