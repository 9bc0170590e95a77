//! Filter expression -> `sea_orm::Condition` (Postgres flavoured SQL).

use sea_orm::{
    ColumnTrait, Condition, EntityTrait,
    sea_query::{Expr, SimpleExpr},
};

use crate::domain::{
    common::entities::app_errors::CoreError,
    geo::entities::SphericalCap,
    query::entities::{FieldFilter, FilterExpression, FilterOperator, split_list},
};

use super::fields::{Field, FieldKind, FieldMap};

/// Reported as the value when a radius filter targets an unusable field.
const CENTER_SPHERE: &str = "$centerSphere";

pub fn filter_condition<E: EntityTrait>(
    filter: &FilterExpression,
    fields: &FieldMap<E>,
) -> Result<Condition, CoreError> {
    let mut condition = Condition::all();

    for (name, field_filter) in filter {
        condition = condition.add(match field_filter {
            FieldFilter::Equals(raw) => equals(fields.resolve(name, raw)?, raw)?,
            FieldFilter::Compare(operators) => {
                let mut all = Condition::all();
                for (operator, raw) in operators {
                    all = all.add(compare(fields.resolve(name, raw)?, *operator, raw)?);
                }
                all
            }
            FieldFilter::WithinSphere(cap) => {
                within_sphere(fields.resolve(name, CENTER_SPHERE)?, cap)?
            }
        });
    }

    Ok(condition)
}

fn equals<E: EntityTrait>(field: &Field<E>, raw: &str) -> Result<Condition, CoreError> {
    let expr = match field.kind {
        FieldKind::JsonArray => json_contains(field, raw),
        _ => field.col.eq(field.coerce(raw)?),
    };
    Ok(Condition::all().add(expr))
}

fn compare<E: EntityTrait>(
    field: &Field<E>,
    operator: FilterOperator,
    raw: &str,
) -> Result<Condition, CoreError> {
    let expr = match operator {
        FilterOperator::In => return in_list(field, raw),
        FilterOperator::Gt => field.col.gt(scalar(field, operator, raw)?),
        FilterOperator::Gte => field.col.gte(scalar(field, operator, raw)?),
        FilterOperator::Lt => field.col.lt(scalar(field, operator, raw)?),
        FilterOperator::Lte => field.col.lte(scalar(field, operator, raw)?),
    };
    Ok(Condition::all().add(expr))
}

/// Ordering comparisons only make sense on scalar columns.
fn scalar<E: EntityTrait>(
    field: &Field<E>,
    operator: FilterOperator,
    raw: &str,
) -> Result<sea_orm::Value, CoreError> {
    if field.kind == FieldKind::JsonArray {
        return Err(CoreError::validation(
            format!("{}[{}]", field.name, operator.as_str()),
            raw,
        ));
    }
    field.coerce(raw)
}

fn in_list<E: EntityTrait>(field: &Field<E>, raw: &str) -> Result<Condition, CoreError> {
    let members = split_list(raw);
    if members.is_empty() {
        return Ok(Condition::all().add(Expr::cust("FALSE")));
    }

    if field.kind == FieldKind::JsonArray {
        return Ok(members.into_iter().fold(Condition::any(), |any, member| {
            any.add(json_contains(field, member))
        }));
    }

    let values = members
        .into_iter()
        .map(|member| field.coerce(member))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Condition::all().add(field.col.is_in(values)))
}

/// `"careers" @> '["Business"]'` without splicing the value into the SQL.
fn json_contains<E: EntityTrait>(field: &Field<E>, member: &str) -> SimpleExpr {
    Expr::cust_with_values(
        format!(
            "\"{}\" @> jsonb_build_array(CAST($1 AS TEXT))",
            field.column_name()
        ),
        [member.trim().to_string()],
    )
}

/// Haversine central angle between the stored GeoJSON point and the cap center.
fn within_sphere<E: EntityTrait>(
    field: &Field<E>,
    cap: &SphericalCap,
) -> Result<Condition, CoreError> {
    if field.kind != FieldKind::GeoPoint {
        return Err(CoreError::validation(field.name.as_str(), CENTER_SPHERE));
    }

    let column = field.column_name();
    let lng = format!("CAST(\"{column}\"->'coordinates'->>0 AS DOUBLE PRECISION)");
    let lat = format!("CAST(\"{column}\"->'coordinates'->>1 AS DOUBLE PRECISION)");

    let sql = format!(
        "2 * ASIN(LEAST(1, SQRT(\
         POWER(SIN(RADIANS({lat} - $1) / 2), 2) + \
         COS(RADIANS($1)) * COS(RADIANS({lat})) * POWER(SIN(RADIANS({lng} - $2) / 2), 2)\
         ))) <= $3"
    );

    Ok(Condition::all().add(Expr::cust_with_values(
        sql,
        [cap.latitude, cap.longitude, cap.radius],
    )))
}
