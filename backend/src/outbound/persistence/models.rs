//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use crate::domain::NewUser;

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Insertable struct for creating new user records.
///
/// Owns its values so a pipelined insert does not borrow the candidate.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow {
    pub name: String,
    pub email: String,
}

impl From<&NewUser> for NewUserRow {
    fn from(new_user: &NewUser) -> Self {
        Self {
            name: new_user.name().as_ref().to_owned(),
            email: new_user.email().as_ref().to_owned(),
        }
    }
}
