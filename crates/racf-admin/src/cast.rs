//! Value caster — one free-text report token to one typed scalar.
//!
//! Report values are free text. A token is matched, case-insensitively and
//! in this order, against:
//!
//! 1. the null phrases (`N/A`, `NONE`, `NONE SPECIFIED`, `NO`)
//! 2. the true phrases (`IN EFFECT`, `ACTIVE`, `BEING DONE.`, ...)
//! 3. the false phrases (`NOT IN EFFECT`, `INACTIVE`, ...)
//! 4. a duration (`45 DAYS`): every digit in the token, concatenated
//! 5. `IN EFFECT FOR THE <X> FUNCTION.`: the `<x>` part
//! 6. a number: float when a `.` is present, else an integer with `,`
//!    thousands separators removed
//!
//! Anything else comes back as the lower-cased token. Casting never fails.

use crate::profile::Value;

const NULL_PHRASES: &[&str] = &["n/a", "none", "none specified", "no"];

const TRUE_PHRASES: &[&str] = &[
    "in effect",
    "active",
    "active.",
    "being done.",
    "in effect.",
    "allowed.",
    "being done",
];

const FALSE_PHRASES: &[&str] = &["not in effect", "inactive", "not allowed.", "not being done"];

const FUNCTION_PREFIX: &str = "in effect for the ";
const FUNCTION_SUFFIX: &str = " function.";

/// Cast one report token to a typed scalar.
///
/// ```
/// use racf_admin::cast::cast;
/// use racf_admin::Value;
///
/// assert_eq!(cast("NONE SPECIFIED"), Value::Null);
/// assert_eq!(cast("In Effect"), Value::Bool(true));
/// assert_eq!(cast("45 Days"), Value::Int(45));
/// assert_eq!(cast("1,024"), Value::Int(1024));
/// assert_eq!(cast("ESWIFT"), Value::Str("eswift".into()));
/// ```
pub fn cast(token: &str) -> Value {
    let value = token.trim().to_lowercase();

    if NULL_PHRASES.contains(&value.as_str()) {
        return Value::Null;
    }
    if TRUE_PHRASES.contains(&value.as_str()) {
        return Value::Bool(true);
    }
    if FALSE_PHRASES.contains(&value.as_str()) {
        return Value::Bool(false);
    }
    if let Some(days) = duration_days(&value) {
        return days;
    }
    if let Some(function) = effective_function(&value) {
        return Value::Str(function.to_string());
    }
    cast_number(value)
}

/// `N DAYS` → N. Digit groups are concatenated without a separator, so
/// `1 TO 30 DAYS` yields 130.
fn duration_days(value: &str) -> Option<Value> {
    if !value.contains("days") {
        return None;
    }
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    // A digit run too long for i64 keeps its text.
    Some(
        digits
            .parse::<i64>()
            .map(Value::Int)
            .unwrap_or_else(|_| Value::Str(value.to_string())),
    )
}

/// `in effect for the <x> function.` → `<x>`.
fn effective_function(value: &str) -> Option<&str> {
    if !value.contains(FUNCTION_PREFIX) || !value.contains(FUNCTION_SUFFIX) {
        return None;
    }
    let after = value.split(FUNCTION_PREFIX).nth(1)?;
    after.split(FUNCTION_SUFFIX).next()
}

fn cast_number(value: String) -> Value {
    if value.contains('.') {
        return match value.parse::<f64>() {
            Ok(n) => Value::Float(n),
            Err(_) => Value::Str(value),
        };
    }
    match value.replace(',', "").parse::<i64>() {
        Ok(n) => Value::Int(n),
        Err(_) => Value::Str(value),
    }
}
