//! Canonical insert schemas, one per entity.
//!
//! Each table lists the columns of the entity's storage table with the
//! presence an insert implies: NOT NULL without a default is required,
//! defaulted columns are optional, nullable columns accept `null`.

use super::field::{FieldDef, FieldKind};

/// Roles a user account can hold.
pub const USER_ROLES: &[&str] = &["user", "vet", "admin"];

/// Pet species accepted for pets and for service applicability.
pub const PET_TYPES: &[&str] = &["dog", "cat", "bird", "rabbit", "other"];

/// Days a vet can be available on.
pub const WEEKDAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

pub const APPOINTMENT_STATUSES: &[&str] = &["scheduled", "completed", "cancelled"];

const USER_FIELDS: &[FieldDef] = &[
    FieldDef::defaulted("id", FieldKind::Integer),
    FieldDef::required("email", FieldKind::Text),
    FieldDef::required("password", FieldKind::Text),
    FieldDef::nullable("fullName", FieldKind::Text),
    FieldDef::nullable("phoneNumber", FieldKind::Text),
    FieldDef::defaulted("role", FieldKind::Enum(USER_ROLES)),
    FieldDef::defaulted("createdAt", FieldKind::Timestamp),
];

const PET_FIELDS: &[FieldDef] = &[
    FieldDef::defaulted("id", FieldKind::Integer),
    FieldDef::required("ownerId", FieldKind::Integer),
    FieldDef::required("name", FieldKind::Text),
    FieldDef::required("type", FieldKind::Enum(PET_TYPES)),
    FieldDef::nullable("breed", FieldKind::Text),
    FieldDef::nullable("age", FieldKind::Int32),
    FieldDef::defaulted("createdAt", FieldKind::Timestamp),
];

const VET_FIELDS: &[FieldDef] = &[
    FieldDef::defaulted("id", FieldKind::Integer),
    FieldDef::required("userId", FieldKind::Integer),
    FieldDef::required("startHour", FieldKind::Time),
    FieldDef::required("endHour", FieldKind::Time),
    FieldDef::required("days", FieldKind::Array(&FieldKind::Enum(WEEKDAYS))),
];

const SERVICE_FIELDS: &[FieldDef] = &[
    FieldDef::defaulted("id", FieldKind::Integer),
    FieldDef::required("name", FieldKind::Text),
    FieldDef::nullable("description", FieldKind::Text),
    FieldDef::required("applicablePetType", FieldKind::Enum(PET_TYPES)),
    FieldDef::required("price", FieldKind::Number),
];

const APPOINTMENT_FIELDS: &[FieldDef] = &[
    FieldDef::defaulted("id", FieldKind::Integer),
    FieldDef::required("petId", FieldKind::Integer),
    FieldDef::required("serviceId", FieldKind::Integer),
    FieldDef::nullable("vetId", FieldKind::Integer),
    FieldDef::required("date", FieldKind::Date),
    FieldDef::required("time", FieldKind::Time),
    FieldDef::defaulted("status", FieldKind::Enum(APPOINTMENT_STATUSES)),
    FieldDef::defaulted("createdAt", FieldKind::Timestamp),
];

/// Entity kinds with a canonical schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    User,
    Pet,
    Vet,
    Service,
    Appointment,
}

impl Entity {
    pub const ALL: [Entity; 5] = [
        Entity::User,
        Entity::Pet,
        Entity::Vet,
        Entity::Service,
        Entity::Appointment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Pet => "pet",
            Self::Vet => "vet",
            Self::Service => "service",
            Self::Appointment => "appointment",
        }
    }

    /// Every column of the entity's insert schema, in table order.
    pub fn fields(self) -> &'static [FieldDef] {
        match self {
            Self::User => USER_FIELDS,
            Self::Pet => PET_FIELDS,
            Self::Vet => VET_FIELDS,
            Self::Service => SERVICE_FIELDS,
            Self::Appointment => APPOINTMENT_FIELDS,
        }
    }

    pub fn field(self, name: &str) -> Option<&'static FieldDef> {
        self.fields().iter().find(|f| f.name == name)
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
