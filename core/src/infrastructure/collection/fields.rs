use chrono::{DateTime, NaiveDate, NaiveDateTime};
use sea_orm::{EntityTrait, IdenStatic};
use uuid::Uuid;

use crate::domain::common::entities::app_errors::CoreError;

/// Storage type of an exposed field, drives how raw query values are coerced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    I32,
    F64,
    Bool,
    Uuid,
    DateTime,
    /// JSONB array of strings; equality means "contains".
    JsonArray,
    /// JSONB GeoJSON point; only radius queries apply.
    GeoPoint,
}

#[derive(Clone, Debug)]
pub struct Field<E: EntityTrait> {
    pub name: String,
    pub col: E::Column,
    pub kind: FieldKind,
}

impl<E: EntityTrait> Field<E> {
    pub fn column_name(&self) -> &str {
        self.col.as_str()
    }

    /// Convert a raw query value into a bound SQL value for this field.
    pub fn coerce(&self, raw: &str) -> Result<sea_orm::Value, CoreError> {
        let invalid = || CoreError::validation(self.name.as_str(), raw);
        let raw = raw.trim();

        Ok(match self.kind {
            FieldKind::String | FieldKind::JsonArray => sea_orm::Value::from(raw.to_string()),
            FieldKind::I32 => sea_orm::Value::from(raw.parse::<i32>().map_err(|_| invalid())?),
            FieldKind::F64 => sea_orm::Value::from(raw.parse::<f64>().map_err(|_| invalid())?),
            FieldKind::Bool => sea_orm::Value::from(raw.parse::<bool>().map_err(|_| invalid())?),
            FieldKind::Uuid => sea_orm::Value::from(Uuid::parse_str(raw).map_err(|_| invalid())?),
            FieldKind::DateTime => sea_orm::Value::from(parse_datetime(raw).ok_or_else(invalid)?),
            FieldKind::GeoPoint => return Err(invalid()),
        })
    }
}

/// RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` or a bare date.
fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Whitelist of the fields a collection exposes, keyed by their camelCase API name.
#[derive(Clone, Debug)]
pub struct FieldMap<E: EntityTrait> {
    fields: Vec<Field<E>>,
}

impl<E: EntityTrait> Default for FieldMap<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityTrait> FieldMap<E> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn insert(mut self, name: impl Into<String>, col: E::Column, kind: FieldKind) -> Self {
        let name = name.into();
        self.fields.retain(|field| field.name != name);
        self.fields.push(Field { name, col, kind });
        self
    }

    pub fn get(&self, name: &str) -> Option<&Field<E>> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Like [`FieldMap::get`], but an unknown name is a validation error.
    pub fn resolve(&self, name: &str, value: &str) -> Result<&Field<E>, CoreError> {
        self.get(name)
            .ok_or_else(|| CoreError::validation(name, value))
    }

    pub fn by_column(&self, column: &str) -> Option<&Field<E>> {
        self.fields
            .iter()
            .find(|field| field.column_name() == column)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field<E>> {
        self.fields.iter()
    }
}
