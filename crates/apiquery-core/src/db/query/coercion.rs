use crate::{
    model::{EnumModel, FieldKind, FieldType},
    value::{Value, ValueEnum},
};
use chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;
use thiserror::Error as ThisError;
use ulid::Ulid;

///
/// CoercionError
///
/// A literal that cannot represent a value of the target attribute type.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("could not convert '{literal}' to {target}")]
pub struct CoercionError {
    pub literal: String,
    pub target: FieldType,
}

impl CoercionError {
    fn new(literal: &str, target: &FieldType) -> Self {
        Self {
            literal: literal.to_string(),
            target: *target,
        }
    }
}

/// Coerce one string literal to the runtime value of `target`.
///
/// Nullable non-text types read the empty literal and `null` as
/// `Value::Null`; text always keeps the literal as written.
pub fn coerce_scalar(literal: &str, target: &FieldType) -> Result<Value, CoercionError> {
    if target.nullable
        && !target.kind.is_text()
        && (literal.is_empty() || literal.eq_ignore_ascii_case("null"))
    {
        return Ok(Value::Null);
    }

    let fail = || CoercionError::new(literal, target);

    let value = match target.kind {
        FieldKind::Bool => Value::Bool(parse_bool(literal).ok_or_else(fail)?),
        FieldKind::Date => Value::Date(
            NaiveDate::parse_from_str(literal, "%Y-%m-%d").map_err(|_| fail())?,
        ),
        FieldKind::Enum(model) => Value::Enum(parse_enum(model, literal).ok_or_else(fail)?),
        FieldKind::Float32 => Value::Float(f64::from(parse::<f32>(literal).ok_or_else(fail)?)),
        FieldKind::Float64 => Value::Float(parse::<f64>(literal).ok_or_else(fail)?),
        FieldKind::Int8 => Value::Int(i64::from(parse::<i8>(literal).ok_or_else(fail)?)),
        FieldKind::Int16 => Value::Int(i64::from(parse::<i16>(literal).ok_or_else(fail)?)),
        FieldKind::Int32 => Value::Int(i64::from(parse::<i32>(literal).ok_or_else(fail)?)),
        FieldKind::Int64 => Value::Int(parse::<i64>(literal).ok_or_else(fail)?),
        FieldKind::Text => Value::Text(literal.to_string()),
        FieldKind::Timestamp => Value::Timestamp(
            DateTime::parse_from_rfc3339(literal)
                .map_err(|_| fail())?
                .with_timezone(&Utc),
        ),
        FieldKind::Uint8 => Value::Uint(u64::from(parse::<u8>(literal).ok_or_else(fail)?)),
        FieldKind::Uint16 => Value::Uint(u64::from(parse::<u16>(literal).ok_or_else(fail)?)),
        FieldKind::Uint32 => Value::Uint(u64::from(parse::<u32>(literal).ok_or_else(fail)?)),
        FieldKind::Uint64 => Value::Uint(parse::<u64>(literal).ok_or_else(fail)?),
        FieldKind::Ulid => Value::Ulid(Ulid::from_string(literal).map_err(|_| fail())?),
    };

    Ok(value)
}

/// Split `literal` on `separator` and coerce every segment.
///
/// Empty segments are kept and coerced as empty literals, so the empty
/// literal is the one-element list `[""]`.
pub fn coerce_list(
    literal: &str,
    separator: char,
    target: &FieldType,
) -> Result<Vec<Value>, CoercionError> {
    literal
        .split(separator)
        .map(|segment| coerce_scalar(segment, target))
        .collect()
}

fn parse<T: FromStr>(literal: &str) -> Option<T> {
    literal.parse().ok()
}

fn parse_bool(literal: &str) -> Option<bool> {
    if literal.eq_ignore_ascii_case("true") || literal == "1" {
        Some(true)
    } else if literal.eq_ignore_ascii_case("false") || literal == "0" {
        Some(false)
    } else {
        None
    }
}

// Variant name (ASCII case-insensitive) or declaration ordinal.
fn parse_enum(model: &EnumModel, literal: &str) -> Option<ValueEnum> {
    let by_name = model
        .variants
        .iter()
        .position(|variant| variant.eq_ignore_ascii_case(literal));

    let index = match by_name {
        Some(index) => index,
        None => usize::try_from(parse::<u32>(literal)?).ok()?,
    };

    let variant = model.variants.get(index)?;
    let ordinal = u32::try_from(index).ok()?;

    Some(ValueEnum::new(*variant, ordinal))
}
