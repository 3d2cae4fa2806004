//! The fixed catalog of request schemas.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use serde_json::Value;

use super::canonical::Entity;
use super::derived::{CompiledSchema, DerivedSchema};
use super::field::Constraint;
use super::records::SchemaInput;
use super::violation::{FieldViolation, ValidatedRecord, ValidationError, ViolationCode};
use crate::error::CoreError;

/// Maximum length of a user's full name on profile update.
pub const MAX_FULL_NAME_LENGTH: usize = 255;

/// Phone numbers are exactly ten digits.
pub const PHONE_NUMBER_PATTERN: &str = r"^\d{10}$";

static GLOBAL: LazyLock<SchemaRegistry> = LazyLock::new(|| {
    SchemaRegistry::build().expect("built-in schema catalog only picks canonical fields")
});

/// Every request schema the API validates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaName {
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    UpdateProfile,
    GetOnePet,
    GetByIdPet,
    GetByTypePet,
    CreatePet,
    UpdatePet,
    GetOneVet,
    UpdateVet,
    CreateService,
    UpdateService,
    GetOneService,
    CreateAppointment,
    UpdateAppointment,
    GetOneAppointment,
}

impl SchemaName {
    pub const ALL: [SchemaName; 18] = [
        SchemaName::Login,
        SchemaName::Register,
        SchemaName::ForgotPassword,
        SchemaName::ResetPassword,
        SchemaName::UpdateProfile,
        SchemaName::GetOnePet,
        SchemaName::GetByIdPet,
        SchemaName::GetByTypePet,
        SchemaName::CreatePet,
        SchemaName::UpdatePet,
        SchemaName::GetOneVet,
        SchemaName::UpdateVet,
        SchemaName::CreateService,
        SchemaName::UpdateService,
        SchemaName::GetOneService,
        SchemaName::CreateAppointment,
        SchemaName::UpdateAppointment,
        SchemaName::GetOneAppointment,
    ];

    /// External name used by API handlers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::ForgotPassword => "forgotPassword",
            Self::ResetPassword => "resetPassword",
            Self::UpdateProfile => "update",
            Self::GetOnePet => "getOnePet",
            Self::GetByIdPet => "getByIdPet",
            Self::GetByTypePet => "getByTypePet",
            Self::CreatePet => "createPet",
            Self::UpdatePet => "updatePet",
            Self::GetOneVet => "getOneVet",
            Self::UpdateVet => "updateVet",
            Self::CreateService => "createService",
            Self::UpdateService => "updateService",
            Self::GetOneService => "getOneService",
            Self::CreateAppointment => "createAppointment",
            Self::UpdateAppointment => "updateAppointment",
            Self::GetOneAppointment => "getOneAppointment",
        }
    }

    /// How this schema is derived from its canonical entity schema.
    fn definition(self) -> Result<DerivedSchema, CoreError> {
        let schema = match self {
            // Auth
            Self::Login => DerivedSchema::of(Entity::User).pick(["email", "password"]),
            Self::Register => DerivedSchema::of(Entity::User)
                .pick(["email", "password", "fullName", "phoneNumber"])
                .required(),
            Self::ForgotPassword => DerivedSchema::of(Entity::User).pick(["id", "email"]),
            Self::ResetPassword => DerivedSchema::of(Entity::User).pick(["id", "password"]),

            // Profile
            Self::UpdateProfile => {
                let phone_number = Constraint::pattern(PHONE_NUMBER_PATTERN).map_err(|e| {
                    CoreError::SchemaDefinition {
                        entity: Entity::User.name(),
                        message: e.to_string(),
                    }
                })?;
                DerivedSchema::of(Entity::User)
                    .refine("id", Constraint::Positive)
                    .refine("fullName", Constraint::MaxLength(MAX_FULL_NAME_LENGTH))
                    .refine("phoneNumber", phone_number)
                    .pick(["id", "fullName", "phoneNumber"])
            }

            // Pet
            Self::GetOnePet => DerivedSchema::of(Entity::Pet)
                .pick(["id", "ownerId"])
                .required(),
            Self::GetByIdPet => DerivedSchema::of(Entity::Pet).pick(["id"]),
            Self::GetByTypePet => DerivedSchema::of(Entity::Pet)
                .pick(["type", "ownerId"])
                .required(),
            Self::CreatePet => DerivedSchema::of(Entity::Pet),
            Self::UpdatePet => DerivedSchema::of(Entity::Pet)
                .pick(["id", "ownerId", "name", "type", "breed", "age"]),

            // Vet
            Self::GetOneVet => DerivedSchema::of(Entity::Vet).pick(["id"]),
            Self::UpdateVet => DerivedSchema::of(Entity::Vet)
                .pick(["id", "userId", "startHour", "endHour", "days"]),

            // Service
            Self::CreateService => DerivedSchema::of(Entity::Service),
            Self::UpdateService => DerivedSchema::of(Entity::Service)
                .pick(["id", "name", "description", "applicablePetType", "price"]),
            Self::GetOneService => DerivedSchema::of(Entity::Service).pick(["id"]),

            // Appointment
            Self::CreateAppointment => DerivedSchema::of(Entity::Appointment),
            Self::UpdateAppointment => DerivedSchema::of(Entity::Appointment)
                .pick(["id", "petId", "serviceId", "date", "time", "status"]),
            Self::GetOneAppointment => DerivedSchema::of(Entity::Appointment).pick(["id"]),
        };
        Ok(schema)
    }
}

impl std::fmt::Display for SchemaName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| CoreError::UnknownSchema(s.to_string()))
    }
}

/// All request schemas, compiled once.
#[derive(Debug)]
pub struct SchemaRegistry {
    schemas: HashMap<SchemaName, CompiledSchema>,
}

impl SchemaRegistry {
    /// Compile every schema in [`SchemaName::ALL`].
    pub fn build() -> Result<Self, CoreError> {
        let schemas = SchemaName::ALL
            .into_iter()
            .map(|name| -> Result<_, CoreError> { Ok((name, name.definition()?.compile()?)) })
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Self { schemas })
    }

    /// Process-wide registry, built on first use.
    pub fn global() -> &'static SchemaRegistry {
        &GLOBAL
    }

    pub fn schema(&self, name: SchemaName) -> &CompiledSchema {
        // build() compiles every SchemaName.
        &self.schemas[&name]
    }

    pub fn validate(&self, name: SchemaName, raw: &Value) -> Result<ValidatedRecord, ValidationError> {
        self.schema(name).validate(raw)
    }

    /// Validate by external schema name (e.g. `"updatePet"`).
    pub fn validate_named(&self, name: &str, raw: &Value) -> Result<ValidatedRecord, CoreError> {
        let name: SchemaName = name.parse()?;
        Ok(self.validate(name, raw)?)
    }

    /// Validate `raw` against `T`'s schema and deserialize the result.
    ///
    /// Field kinds are bounded to the record types, so every constraint
    /// failure is reported on its field by validation. A deserialization
    /// error after that means `T` disagrees with its schema and is reported
    /// against the whole input.
    pub fn parse<T: SchemaInput>(&self, raw: &Value) -> Result<T, ValidationError> {
        self.validate(T::SCHEMA, raw)?.into_typed().map_err(|e| {
            ValidationError::single(FieldViolation::new(
                "",
                ViolationCode::InvalidType,
                e.to_string(),
            ))
        })
    }
}
