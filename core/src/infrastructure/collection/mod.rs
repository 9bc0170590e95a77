mod conditions;
mod fields;
mod sea_orm_collection;

pub use fields::{Field, FieldKind, FieldMap};
pub use sea_orm_collection::{RelationLink, SeaOrmCollection};
