//! Typed records produced by the registry's schemas.
//!
//! Each struct mirrors exactly the field set of one [`SchemaName`]. Fields a
//! schema leaves optional are `Option`; absent and `null` both map to `None`
//! (use [`ValidatedRecord`](super::ValidatedRecord) when the difference
//! matters).

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::registry::SchemaName;
use crate::types::{DbId, Timestamp};

/// A type that can be parsed from raw input through one registry schema.
pub trait SchemaInput: serde::de::DeserializeOwned {
    const SCHEMA: SchemaName;
}

macro_rules! schema_input {
    ($($ty:ty => $name:ident),* $(,)?) => {
        $(
            impl SchemaInput for $ty {
                const SCHEMA: SchemaName = SchemaName::$name;
            }
        )*
    };
}

schema_input! {
    LoginInput => Login,
    RegisterInput => Register,
    ForgotPasswordInput => ForgotPassword,
    ResetPasswordInput => ResetPassword,
    UpdateProfileInput => UpdateProfile,
    GetOnePetInput => GetOnePet,
    GetByIdPetInput => GetByIdPet,
    GetByTypePetInput => GetByTypePet,
    CreatePetInput => CreatePet,
    UpdatePetInput => UpdatePet,
    GetOneVetInput => GetOneVet,
    UpdateVetInput => UpdateVet,
    CreateServiceInput => CreateService,
    UpdateServiceInput => UpdateService,
    GetOneServiceInput => GetOneService,
    CreateAppointmentInput => CreateAppointment,
    UpdateAppointmentInput => UpdateAppointment,
    GetOneAppointmentInput => GetOneAppointment,
}

// ---------------------------------------------------------------------------
// Column enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetType {
    Dog,
    Cat,
    Bird,
    Rabbit,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

/// Serde adapters for time columns, which accept `HH:MM` as well as
/// `HH:MM:SS`.
mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer};

    use crate::schema::field::parse_time_of_day;

    fn parse<E: serde::de::Error>(s: &str) -> Result<NaiveTime, E> {
        parse_time_of_day(s).ok_or_else(|| E::custom(format!("invalid time of day: {s}")))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(d)?;
        parse(&s)
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordInput {
    #[serde(default)]
    pub id: Option<DbId>,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordInput {
    #[serde(default)]
    pub id: Option<DbId>,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

// ---------------------------------------------------------------------------
// Pet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOnePetInput {
    pub id: DbId,
    pub owner_id: DbId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetByIdPetInput {
    #[serde(default)]
    pub id: Option<DbId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetByTypePetInput {
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub owner_id: DbId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetInput {
    #[serde(default)]
    pub id: Option<DbId>,
    pub owner_id: DbId,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: PetType,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetInput {
    #[serde(default)]
    pub id: Option<DbId>,
    pub owner_id: DbId,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: PetType,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
}

// ---------------------------------------------------------------------------
// Vet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetOneVetInput {
    #[serde(default)]
    pub id: Option<DbId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVetInput {
    #[serde(default)]
    pub id: Option<DbId>,
    pub user_id: DbId,
    #[serde(deserialize_with = "time_of_day::deserialize")]
    pub start_hour: NaiveTime,
    #[serde(deserialize_with = "time_of_day::deserialize")]
    pub end_hour: NaiveTime,
    pub days: Vec<Weekday>,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceInput {
    #[serde(default)]
    pub id: Option<DbId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub applicable_pet_type: PetType,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceInput {
    #[serde(default)]
    pub id: Option<DbId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub applicable_pet_type: PetType,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetOneServiceInput {
    #[serde(default)]
    pub id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Appointment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentInput {
    #[serde(default)]
    pub id: Option<DbId>,
    pub pet_id: DbId,
    pub service_id: DbId,
    #[serde(default)]
    pub vet_id: Option<DbId>,
    pub date: NaiveDate,
    #[serde(deserialize_with = "time_of_day::deserialize")]
    pub time: NaiveTime,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentInput {
    #[serde(default)]
    pub id: Option<DbId>,
    pub pet_id: DbId,
    pub service_id: DbId,
    pub date: NaiveDate,
    #[serde(deserialize_with = "time_of_day::deserialize")]
    pub time: NaiveTime,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetOneAppointmentInput {
    #[serde(default)]
    pub id: Option<DbId>,
}
