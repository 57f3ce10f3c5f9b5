use diesel::prelude::*;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use super::schema::{animals, lost_animals};


#[derive(Debug, Clone, PartialEq, Queryable, Serialize)]
pub struct Animal {
    pub id: i32,
    pub name: String,
    pub photo: Option<String>,
    pub species: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub caretaker: String,
    pub caretaker_contact: Option<String>,
    pub vaccinated: bool,
    pub vaccine_details: Option<String>,
    pub neutered: bool,
    pub description: Option<String>,
    pub date_added: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = animals)]
pub struct NewAnimal {
    pub name: String,
    pub photo: Option<String>,
    pub species: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub caretaker: String,
    pub caretaker_contact: Option<String>,
    pub vaccinated: bool,
    pub vaccine_details: Option<String>,
    pub neutered: bool,
    pub description: Option<String>,
    pub date_added: DateTime<Utc>,
}

/// Sparse update of an animal row.
///
/// `None` leaves a column untouched. For nullable columns `Some(None)`
/// writes NULL.
#[derive(Debug, Default, PartialEq, AsChangeset)]
#[diesel(table_name = animals)]
pub struct AnimalChanges {
    pub name: Option<String>,
    pub photo: Option<Option<String>>,
    pub location: Option<String>,
    pub caretaker: Option<String>,
    pub caretaker_contact: Option<Option<String>>,
    pub vaccinated: Option<bool>,
    pub vaccine_details: Option<Option<String>>,
    pub neutered: Option<bool>,
    pub description: Option<Option<String>>,
}

impl AnimalChanges {
    /// Diesel refuses to build an UPDATE without columns.
    pub fn is_empty(&self) -> bool {
        *self == AnimalChanges::default()
    }
}


#[derive(Debug, Clone, PartialEq, Queryable, Serialize)]
pub struct LostAnimal {
    pub id: i32,
    pub name: String,
    pub photo: Option<String>,
    pub species: String,
    pub last_seen_location: String,
    pub last_seen_date: NaiveDateTime,
    pub description: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub found: bool,
    pub date_reported: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = lost_animals)]
pub struct NewLostAnimal {
    pub name: String,
    pub photo: Option<String>,
    pub species: String,
    pub last_seen_location: String,
    pub last_seen_date: NaiveDateTime,
    pub description: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub found: bool,
    pub date_reported: DateTime<Utc>,
}
