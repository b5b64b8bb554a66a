//! Customer Module
//!
//! This module provides the Customer model and related functionality.

use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::customers;

/// A persisted customer row. The id is assigned by the database on insert and
/// never changes afterwards.
#[derive(Queryable, Identifiable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = customers)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: String,
}

/// Inbound representation shared by the create and update requests.
///
/// The id is optional: the create path ignores it (the store generates one),
/// the update path requires it. Missing string fields deserialize as empty so
/// the validator can report them with its own messages.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerDTO {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = customers)]
pub struct NewCustomer {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: String,
}

impl From<&CustomerDTO> for NewCustomer {
    fn from(dto: &CustomerDTO) -> Self {
        Self {
            first_name: dto.first_name.clone(),
            middle_name: dto.middle_name.clone(),
            last_name: dto.last_name.clone(),
            email_address: dto.email_address.clone(),
            phone_number: dto.phone_number.clone(),
        }
    }
}

/// Wholesale overwrite of the five mutable fields. `treat_none_as_null` makes
/// an absent middle name clear the column instead of keeping the old value.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = customers)]
#[diesel(treat_none_as_null = true)]
pub struct CustomerChangeset {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: String,
}

impl From<&CustomerDTO> for CustomerChangeset {
    fn from(dto: &CustomerDTO) -> Self {
        Self {
            first_name: dto.first_name.clone(),
            middle_name: dto.middle_name.clone(),
            last_name: dto.last_name.clone(),
            email_address: dto.email_address.clone(),
            phone_number: dto.phone_number.clone(),
        }
    }
}

pub mod operations;
pub mod validators;
