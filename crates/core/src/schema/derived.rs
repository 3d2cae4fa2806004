//! Derived schemas: pick / required / refine over a canonical schema.

use serde_json::{Map, Value};

use super::canonical::Entity;
use super::field::{Constraint, FieldDef, FieldKind, Presence};
use super::violation::{FieldViolation, ValidatedRecord, ValidationError, ViolationCode};
use crate::error::CoreError;

/// Declarative description of a derived schema.
///
/// Built with [`DerivedSchema::of`] and narrowed with [`pick`](Self::pick).
/// Nothing is checked until [`compile`](Self::compile), which rejects any
/// field the canonical schema does not define.
#[derive(Debug, Clone)]
pub struct DerivedSchema {
    entity: Entity,
    picked: Option<Vec<&'static str>>,
    all_required: bool,
    refinements: Vec<(&'static str, Constraint)>,
}

impl DerivedSchema {
    /// Start from the full canonical schema of `entity`.
    pub fn of(entity: Entity) -> Self {
        Self {
            entity,
            picked: None,
            all_required: false,
            refinements: Vec::new(),
        }
    }

    /// Keep only the named fields. Order and duplicates are irrelevant;
    /// repeated picks intersect.
    pub fn pick<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        let mut next: Vec<&'static str> = fields.into_iter().collect();
        if let Some(previous) = &self.picked {
            next.retain(|f| previous.contains(f));
        }
        next.sort_unstable();
        next.dedup();
        self.picked = Some(next);
        self
    }

    /// Make every kept field mandatory. Nullable columns still accept `null`
    /// but the key must be present.
    pub fn required(mut self) -> Self {
        self.all_required = true;
        self
    }

    /// Attach an extra constraint to one field.
    pub fn refine(mut self, field: &'static str, constraint: Constraint) -> Self {
        self.refinements.push((field, constraint));
        self
    }

    pub fn compile(self) -> Result<CompiledSchema, CoreError> {
        let entity = self.entity;
        let definition_error = |message: String| CoreError::SchemaDefinition {
            entity: entity.name(),
            message,
        };

        if let Some(picked) = &self.picked {
            if let Some(unknown) = picked.iter().find(|f| entity.field(f).is_none()) {
                return Err(definition_error(format!(
                    "picked field '{unknown}' is not defined"
                )));
            }
        }

        let mut fields: Vec<CompiledField> = entity
            .fields()
            .iter()
            .filter(|def| match &self.picked {
                Some(picked) => picked.contains(&def.name),
                None => true,
            })
            .map(|def| CompiledField {
                def,
                presence: match (self.all_required, def.presence) {
                    (false, presence) => presence,
                    (true, Presence::Nullable) => Presence::RequiredNullable,
                    (true, _) => Presence::Required,
                },
                constraints: Vec::new(),
            })
            .collect();

        for (name, constraint) in self.refinements {
            let field = fields
                .iter_mut()
                .find(|f| f.def.name == name)
                .ok_or_else(|| {
                    definition_error(format!("refined field '{name}' is not part of the schema"))
                })?;
            field.constraints.push(constraint);
        }

        Ok(CompiledSchema { entity, fields })
    }
}

#[derive(Debug, Clone)]
struct CompiledField {
    def: &'static FieldDef,
    presence: Presence,
    constraints: Vec<Constraint>,
}

impl CompiledField {
    fn check(&self, input: &Map<String, Value>) -> Result<Option<Value>, FieldViolation> {
        let name = self.def.name;
        match (input.get(name), self.presence) {
            (None, Presence::Required | Presence::RequiredNullable)
            | (Some(Value::Null), Presence::Required) => Err(FieldViolation::new(
                name,
                ViolationCode::Required,
                "Required",
            )),
            (None, _) => Ok(None),
            (Some(Value::Null), Presence::Nullable | Presence::RequiredNullable) => {
                Ok(Some(Value::Null))
            }
            (Some(value), _) => {
                if let Some(violation) = self.def.kind.check(name, value) {
                    return Err(violation);
                }
                if let Some(violation) = self.constraints.iter().find_map(|c| c.check(name, value))
                {
                    return Err(violation);
                }
                Ok(Some(value.clone()))
            }
        }
    }
}

/// A derived schema ready to validate input.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    entity: Entity,
    fields: Vec<CompiledField>,
}

impl CompiledSchema {
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Declared field names, in canonical order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.def.name).collect()
    }

    pub fn presence(&self, field: &str) -> Option<Presence> {
        self.fields
            .iter()
            .find(|f| f.def.name == field)
            .map(|f| f.presence)
    }

    pub fn kind(&self, field: &str) -> Option<FieldKind> {
        self.fields
            .iter()
            .find(|f| f.def.name == field)
            .map(|f| f.def.kind)
    }

    /// Validate raw input. Succeeds only if every declared field passes;
    /// otherwise reports one violation per offending field. Undeclared
    /// input fields are dropped.
    pub fn validate(&self, raw: &Value) -> Result<ValidatedRecord, ValidationError> {
        let input = raw.as_object().ok_or_else(|| {
            ValidationError::single(FieldViolation::new(
                "",
                ViolationCode::InvalidType,
                "Expected object",
            ))
        })?;

        let mut output = Map::new();
        let mut violations = Vec::new();

        for field in &self.fields {
            match field.check(input) {
                Ok(Some(value)) => {
                    output.insert(field.def.name.to_string(), value);
                }
                Ok(None) => {}
                Err(violation) => violations.push(violation),
            }
        }

        if violations.is_empty() {
            Ok(ValidatedRecord::new(output))
        } else {
            Err(ValidationError { violations })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn pick_is_order_independent() {
        let a = DerivedSchema::of(Entity::User)
            .pick(["password", "email"])
            .compile()
            .unwrap();
        let b = DerivedSchema::of(Entity::User)
            .pick(["email", "password", "email"])
            .compile()
            .unwrap();
        assert_eq!(a.field_names(), vec!["email", "password"]);
        assert_eq!(a.field_names(), b.field_names());
    }

    #[test]
    fn unpicked_schema_keeps_every_column() {
        let schema = DerivedSchema::of(Entity::Service).compile().unwrap();
        assert_eq!(schema.field_names().len(), Entity::Service.fields().len());
    }

    #[test]
    fn repeated_pick_intersects() {
        let schema = DerivedSchema::of(Entity::Pet)
            .pick(["id", "name", "type"])
            .pick(["name", "breed"])
            .compile()
            .unwrap();
        assert_eq!(schema.field_names(), vec!["name"]);
    }

    #[test]
    fn picking_unknown_field_fails() {
        let err = DerivedSchema::of(Entity::Pet)
            .pick(["id", "price"])
            .compile()
            .unwrap_err();
        assert_matches!(err, CoreError::SchemaDefinition { entity: "pet", .. });
    }

    #[test]
    fn refining_unpicked_field_fails() {
        let err = DerivedSchema::of(Entity::User)
            .pick(["email"])
            .refine("id", Constraint::Positive)
            .compile()
            .unwrap_err();
        assert!(err.to_string().contains("refined field 'id'"));
    }

    #[test]
    fn required_overrides_presence() {
        let schema = DerivedSchema::of(Entity::User)
            .pick(["id", "phoneNumber"])
            .required()
            .compile()
            .unwrap();
        assert_eq!(schema.presence("id"), Some(Presence::Required));
        assert_eq!(schema.presence("phoneNumber"), Some(Presence::RequiredNullable));

        let err = schema.validate(&json!({ "id": null })).unwrap_err();
        assert!(err.has("id", ViolationCode::Required));
        assert!(err.has("phoneNumber", ViolationCode::Required));
    }

    #[test]
    fn required_nullable_field_accepts_null_but_not_absence() {
        let schema = DerivedSchema::of(Entity::Pet)
            .pick(["breed"])
            .required()
            .compile()
            .unwrap();
        let record = schema.validate(&json!({ "breed": null })).unwrap();
        assert_eq!(record.get("breed"), Some(&Value::Null));

        let err = schema.validate(&json!({})).unwrap_err();
        assert!(err.has("breed", ViolationCode::Required));
        let err = schema.validate(&json!({ "breed": 7 })).unwrap_err();
        assert!(err.has("breed", ViolationCode::InvalidType));
    }

    #[test]
    fn nullable_field_passes_null_through() {
        let schema = DerivedSchema::of(Entity::Pet)
            .pick(["breed"])
            .compile()
            .unwrap();
        let record = schema.validate(&json!({ "breed": null })).unwrap();
        assert_eq!(record.get("breed"), Some(&Value::Null));
    }

    #[test]
    fn optional_field_rejects_null() {
        let schema = DerivedSchema::of(Entity::Pet).pick(["id"]).compile().unwrap();
        let err = schema.validate(&json!({ "id": null })).unwrap_err();
        assert!(err.has("id", ViolationCode::InvalidType));
        assert!(schema.validate(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn kind_check_runs_before_refinements() {
        let schema = DerivedSchema::of(Entity::User)
            .pick(["id"])
            .refine("id", Constraint::Positive)
            .compile()
            .unwrap();
        let err = schema.validate(&json!({ "id": "one" })).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.has("id", ViolationCode::InvalidType));
    }

    #[test]
    fn non_object_input_is_rejected() {
        let schema = DerivedSchema::of(Entity::Vet).pick(["id"]).compile().unwrap();
        let err = schema.validate(&json!([1, 2])).unwrap_err();
        assert_eq!(err.fields(), vec![""]);
        assert!(err.has("", ViolationCode::InvalidType));
    }

    #[test]
    fn collects_all_violations() {
        let schema = DerivedSchema::of(Entity::Appointment).compile().unwrap();
        let err = schema
            .validate(&json!({ "date": "tomorrow", "status": "lost" }))
            .unwrap_err();
        assert!(err.has("petId", ViolationCode::Required));
        assert!(err.has("serviceId", ViolationCode::Required));
        assert!(err.has("date", ViolationCode::InvalidFormat));
        assert!(err.has("time", ViolationCode::Required));
        assert!(err.has("status", ViolationCode::InvalidEnum));
        assert_eq!(err.violations.len(), 5);
    }
}
