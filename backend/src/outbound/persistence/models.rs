//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use super::schema::{recipes, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub surname: String,
    pub name: String,
    pub age: i32,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub surname: &'a str,
    pub name: &'a str,
    pub age: i32,
}

/// Row struct for reading from the recipes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: i32,
    pub title: String,
    pub ingredients: String,
    pub steps: String,
    pub photo: Option<String>,
    pub about: Option<String>,
    pub user_id: i32,
}

/// Insertable struct for creating new recipe records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub title: &'a str,
    pub ingredients: String,
    pub steps: String,
    pub photo: &'a str,
    pub about: Option<&'a str>,
    pub user_id: i32,
}

/// Changeset for replacing a recipe's editable fields.
///
/// `photo: None` leaves the column untouched; `about: Some(None)` clears it.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeUpdate<'a> {
    pub title: &'a str,
    pub ingredients: String,
    pub steps: String,
    pub photo: Option<&'a str>,
    pub about: Option<Option<&'a str>>,
}
