//! List splitter — delimited report values to lists of typed scalars.

use crate::cast::cast;
use crate::profile::Value;

/// Split a delimited report value and cast each element.
///
/// The value is trimmed and lower-cased, then split on `,` when it has one,
/// otherwise on single spaces. A value with neither is cast as one scalar.
///
/// Two quirks are part of the contract:
///
/// - if any element casts to null the whole list is null
///   (`READ,NONE,WRITE` → null);
/// - parenthesised groups broken up by the split are joined back together
///   (`(GROUP ONE) (GROUP TWO)` → `["(group one)", "(group two)"]`).
pub fn split_and_cast(value: &str) -> Value {
    let cleaned = value.trim().to_lowercase();

    let items: Vec<Value> = if cleaned.contains(',') {
        cleaned.split(',').map(|v| cast(v.trim())).collect()
    } else if cleaned.contains(' ') {
        cleaned.split(' ').map(|v| cast(v.trim())).collect()
    } else {
        return cast(&cleaned);
    };

    if items.iter().any(Value::is_null) {
        return Value::Null;
    }
    Value::List(rejoin_parenthesized(items))
}

/// Join the spans between an element that opens a parenthesis without
/// closing it and the matching element that closes one without opening it.
///
/// Opens and closes are paired in order of appearance. Unpaired opens are
/// left alone.
fn rejoin_parenthesized(mut items: Vec<Value>) -> Vec<Value> {
    let mut opens = Vec::new();
    let mut closes = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let Value::Str(text) = item else { continue };
        let has_open = text.contains('(');
        let has_close = text.contains(')');
        if has_open && !has_close {
            opens.push(i);
        }
        if has_close && !has_open {
            closes.push(i);
        }
    }
    if opens.is_empty() && closes.is_empty() {
        return items;
    }

    let mut consumed = Vec::new();
    for (&open, &close) in opens.iter().zip(closes.iter()) {
        if close <= open {
            continue;
        }
        let joined = items[open..=close]
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        items[open] = Value::Str(joined);
        consumed.extend(open + 1..=close);
    }

    consumed.sort_unstable();
    consumed.dedup();
    for i in consumed.into_iter().rev() {
        items.remove(i);
    }
    items
}
