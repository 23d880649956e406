//! Domain DTOs for the reqres API.
//!
//! # Design
//! These types mirror the remote service's JSON but are defined independently
//! of the mock server; the scenario tests catch schema drift between the two.
//! `Employee` keeps its fields private so `id` and `created_at` can only be
//! filled by a decoded response or an explicit `EmployeeField`. Response
//! merges go through `EmployeeField`, which knows the closed set of employee
//! keys and rejects anything else.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// An employee record managed through the `/users` endpoints.
///
/// Starts life as a local template (`Employee::new`) or as the decoded body of
/// a creation response. `id` and `created_at` stay `None` until the server
/// assigns them. Serializes to the full current field set under the wire
/// names, which is the body of a replace request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, deserialize_with = "nullable_text")]
    name: String,
    #[serde(default, deserialize_with = "nullable_text")]
    job: String,
    #[serde(default, deserialize_with = "optional_id")]
    id: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    updated_at: String,
}

impl Employee {
    pub fn new(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: job.into(),
            id: None,
            created_at: None,
            updated_at: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn job(&self) -> &str {
        &self.job
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    /// Empty until an update or patch response carries `updatedAt`.
    pub fn updated_at(&self) -> &str {
        &self.updated_at
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_job(mut self, job: impl Into<String>) -> Self {
        self.job = job.into();
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_job(&mut self, job: impl Into<String>) {
        self.job = job.into();
    }

    pub fn apply(&mut self, field: EmployeeField) {
        match field {
            EmployeeField::Name(name) => self.name = name,
            EmployeeField::Job(job) => self.job = job,
            EmployeeField::Id(id) => self.id = id,
            EmployeeField::CreatedAt(created_at) => self.created_at = created_at,
            EmployeeField::UpdatedAt(updated_at) => self.updated_at = updated_at,
        }
    }

    /// Merge a decoded response object into this employee.
    ///
    /// Every key must name a known field. The merge is all-or-nothing: on
    /// error the employee is left exactly as it was.
    pub fn merge(&mut self, object: Map<String, Value>) -> Result<(), ApiError> {
        let fields = object
            .into_iter()
            .map(|(key, value)| EmployeeField::from_entry(&key, value))
            .collect::<Result<Vec<_>, _>>()?;
        for field in fields {
            self.apply(field);
        }
        Ok(())
    }

}

/// One known employee field together with its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeField {
    Name(String),
    Job(String),
    Id(Option<String>),
    CreatedAt(Option<String>),
    UpdatedAt(String),
}

impl EmployeeField {
    /// Wire name of the field.
    pub fn key(&self) -> &'static str {
        match self {
            EmployeeField::Name(_) => "name",
            EmployeeField::Job(_) => "job",
            EmployeeField::Id(_) => "id",
            EmployeeField::CreatedAt(_) => "createdAt",
            EmployeeField::UpdatedAt(_) => "updatedAt",
        }
    }

    /// Interpret one `key: value` pair of a JSON object as an employee field.
    ///
    /// A numeric `id` is kept in its decimal string form; `null` text fields
    /// become empty strings.
    pub fn from_entry(key: &str, value: Value) -> Result<Self, ApiError> {
        let invalid = |value: Value| ApiError::InvalidField {
            field: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "name" => text_from_value(value).map(EmployeeField::Name).map_err(invalid),
            "job" => text_from_value(value).map(EmployeeField::Job).map_err(invalid),
            "id" => id_from_value(value).map(EmployeeField::Id).map_err(invalid),
            "createdAt" => match value {
                Value::Null => Ok(EmployeeField::CreatedAt(None)),
                Value::String(s) => Ok(EmployeeField::CreatedAt(Some(s))),
                other => Err(invalid(other)),
            },
            "updatedAt" => text_from_value(value).map(EmployeeField::UpdatedAt).map_err(invalid),
            other => Err(ApiError::UnknownField(other.to_string())),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            EmployeeField::Name(s) | EmployeeField::Job(s) | EmployeeField::UpdatedAt(s) => {
                Value::String(s.clone())
            }
            EmployeeField::Id(opt) | EmployeeField::CreatedAt(opt) => {
                opt.clone().map(Value::String).unwrap_or(Value::Null)
            }
        }
    }
}

/// Render a partial update as a JSON object holding only the given fields.
/// A later field with the same key wins.
pub fn fields_to_json(fields: &[EmployeeField]) -> Value {
    let object: Map<String, Value> = fields
        .iter()
        .map(|field| (field.key().to_string(), field.to_value()))
        .collect();
    Value::Object(object)
}

/// Request payload for creating an employee.
///
/// Each builder step consumes the value and returns the next one. Nothing is
/// validated: an unset field goes out as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmployeeObject {
    name: Option<String>,
    job: Option<String>,
}

impl EmployeeObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    pub fn with_job(self, job: impl Into<String>) -> Self {
        Self {
            job: Some(job.into()),
            ..self
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn job(&self) -> Option<&str> {
        self.job.as_deref()
    }
}

/// A user record from the paginated `/users` listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        match self.id {
            Some(id) => write!(f, "User(id={id}")?,
            None => write!(f, "User(id=None")?,
        }
        write!(
            f,
            ", email='{}', first_name='{}', last_name='{}', avatar='{}')",
            text(&self.email),
            text(&self.first_name),
            text(&self.last_name),
            text(&self.avatar)
        )
    }
}

/// One page of the `/users` listing, envelope included.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub total_pages: u32,
    pub data: Vec<User>,
}

/// A color resource served under `/unknown/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resource {
    pub id: u64,
    pub name: String,
    pub year: u32,
    pub color: String,
    pub pantone_value: String,
}

/// `{"data": ...}` wrapper used by the read endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

fn text_from_value(value: Value) -> Result<String, Value> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        other => Err(other),
    }
}

fn id_from_value(value: Value) -> Result<Option<String>, Value> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(other),
    }
}

fn nullable_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    text_from_value(value)
        .map_err(|v| serde::de::Error::custom(format!("expected a string or null, got {v}")))
}

fn optional_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    id_from_value(value)
        .map_err(|v| serde::de::Error::custom(format!("expected a string or numeric id, got {v}")))
}
