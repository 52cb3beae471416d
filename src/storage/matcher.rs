//! Filter and projection evaluation over JSON documents
//!
//! A small subset of MongoDB query semantics, enough for the in-memory
//! collection to behave like a real ordered store:
//!
//! - `{"field": value}` equality; an array field matches if it contains `value`
//! - dotted paths (`"address.city"`) into nested objects
//! - `$eq $ne $gt $gte $lt $lte $in $nin $exists` operator documents
//! - top-level `$and $or $nor`
//!
//! Comparisons never coerce types: numbers compare with numbers, strings
//! with strings, booleans with booleans. Anything else does not match.

use anyhow::{Result, anyhow, bail};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Returns true if `document` satisfies every condition in `filter`
pub(crate) fn matches(document: &Value, filter: &Map<String, Value>) -> Result<bool> {
    for (key, condition) in filter {
        let ok = match key.as_str() {
            "$and" => {
                let mut all = true;
                for c in clauses(key, condition)? {
                    if !matches(document, c)? {
                        all = false;
                        break;
                    }
                }
                all
            }
            "$or" => {
                let mut any = false;
                for c in clauses(key, condition)? {
                    if matches(document, c)? {
                        any = true;
                        break;
                    }
                }
                any
            }
            "$nor" => {
                let mut none = true;
                for c in clauses(key, condition)? {
                    if matches(document, c)? {
                        none = false;
                        break;
                    }
                }
                none
            }
            op if op.starts_with('$') => bail!("unknown top level operator: {}", op),
            path => field_matches(lookup(document, path), condition)?,
        };

        if !ok {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Operands of a logical operator: a non-empty array of objects
fn clauses<'a>(op: &str, condition: &'a Value) -> Result<Vec<&'a Map<String, Value>>> {
    let items = condition
        .as_array()
        .filter(|a| !a.is_empty())
        .ok_or_else(|| anyhow!("{} must be a nonempty array", op))?;

    items
        .iter()
        .map(|item| {
            item.as_object()
                .ok_or_else(|| anyhow!("{} argument's entries must be objects", op))
        })
        .collect()
}

/// Resolve a dotted path inside a document
fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |current, segment| current.as_object()?.get(segment))
}

fn is_operator_document(condition: &Value) -> bool {
    condition
        .as_object()
        .is_some_and(|m| !m.is_empty() && m.keys().all(|k| k.starts_with('$')))
}

fn field_matches(actual: Option<&Value>, condition: &Value) -> Result<bool> {
    if !is_operator_document(condition) {
        return Ok(equals(actual, condition));
    }

    let Some(ops) = condition.as_object() else {
        return Ok(false);
    };

    for (op, operand) in ops {
        let ok = match op.as_str() {
            "$eq" => equals(actual, operand),
            "$ne" => !equals(actual, operand),
            "$gt" => compares(actual, operand, |o| o == Ordering::Greater),
            "$gte" => compares(actual, operand, |o| o != Ordering::Less),
            "$lt" => compares(actual, operand, |o| o == Ordering::Less),
            "$lte" => compares(actual, operand, |o| o != Ordering::Greater),
            "$in" => candidates(op, operand)?.iter().any(|c| equals(actual, c)),
            "$nin" => !candidates(op, operand)?.iter().any(|c| equals(actual, c)),
            "$exists" => {
                let wanted = operand
                    .as_bool()
                    .ok_or_else(|| anyhow!("$exists needs a boolean"))?;
                actual.is_some() == wanted
            }
            other => bail!("unknown operator: {}", other),
        };

        if !ok {
            return Ok(false);
        }
    }

    Ok(true)
}

fn candidates<'a>(op: &str, operand: &'a Value) -> Result<&'a Vec<Value>> {
    operand
        .as_array()
        .ok_or_else(|| anyhow!("{} needs an array", op))
}

/// Equality with array containment; a missing field equals `null`
fn equals(actual: Option<&Value>, expected: &Value) -> bool {
    match actual {
        None => expected.is_null(),
        Some(Value::Array(items)) if !expected.is_array() => {
            items.iter().any(|item| same(item, expected))
        }
        Some(value) => same(value, expected),
    }
}

/// Structural equality where 1 and 1.0 are the same number
fn same(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => compare(a, b) == Some(Ordering::Equal),
        _ => a == b,
    }
}

fn compares(actual: Option<&Value>, bound: &Value, accept: impl Fn(Ordering) -> bool) -> bool {
    match actual {
        None => false,
        Some(Value::Array(items)) if !bound.is_array() => items
            .iter()
            .any(|item| compare(item, bound).is_some_and(&accept)),
        Some(value) => compare(value, bound).is_some_and(accept),
    }
}

/// Order two values of the same JSON type, `None` across types
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(xi), Some(yi)) = (x.as_i64(), y.as_i64()) {
                return Some(xi.cmp(&yi));
            }
            x.as_f64()?.partial_cmp(&y.as_f64()?)
        }
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Null => false,
        _ => true,
    }
}

/// Apply an inclusion or exclusion projection to a top-level document
///
/// The identifier field is kept unless explicitly excluded. Mixing included
/// and excluded fields (other than the identifier) is an error.
pub(crate) fn project(
    document: Value,
    projection: &Map<String, Value>,
    identifier_field: &str,
) -> Result<Value> {
    if projection.is_empty() {
        return Ok(document);
    }

    let Value::Object(mut fields) = document else {
        bail!("cannot project a non-object document");
    };

    let keep_id = projection.get(identifier_field).is_none_or(truthy);
    let (included, excluded): (Vec<_>, Vec<_>) = projection
        .iter()
        .filter(|(k, _)| k.as_str() != identifier_field)
        .partition(|(_, v)| truthy(v));

    if !included.is_empty() && !excluded.is_empty() {
        bail!(
            "Cannot do exclusion on field {} in inclusion projection",
            excluded[0].0
        );
    }

    // `{<id>: 1}` alone is an inclusion projection of the identifier only
    let inclusion = !included.is_empty()
        || (excluded.is_empty() && projection.get(identifier_field).is_some_and(truthy));

    if !inclusion {
        for (field, _) in excluded {
            fields.remove(field);
        }
    } else {
        let mut kept = Map::new();
        for (field, _) in included {
            if let Some(value) = fields.remove(field) {
                kept.insert(field.clone(), value);
            }
        }
        if let Some(id) = fields.remove(identifier_field) {
            kept.insert(identifier_field.to_string(), id);
        }
        fields = kept;
    }

    if !keep_id {
        fields.remove(identifier_field);
    }

    Ok(Value::Object(fields))
}
