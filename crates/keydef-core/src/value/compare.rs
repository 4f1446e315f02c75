use crate::value::Value;
use std::cmp::Ordering;

// 2^64 and -2^63 as doubles; beyond these an integer cannot tie a double.
const U64_BOUND_F64: f64 = 18_446_744_073_709_551_616.0;
const I64_BOUND_F64: f64 = -9_223_372_036_854_775_808.0;

/// Total canonical comparator over every value kind.
///
/// Ordering rules:
/// 1. Value tag (nil < boolean < number < string < varbinary < array < map)
/// 2. Kind-specific comparison for same-tagged values
///
/// NaN sorts before every other number and equals itself, which keeps the
/// order total and antisymmetric.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let tag = left.tag().cmp(&right.tag());
    if tag != Ordering::Equal {
        return tag;
    }

    canonical_cmp_same_tag(left, right)
}

/// Numeric comparison across integer and double representations.
///
/// Returns `None` when either side is not a number.
#[must_use]
pub fn numeric_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    let ordering = match (left, right) {
        (Value::Double(a), Value::Double(b)) => double_cmp(*a, *b),
        (Value::Double(a), b) => int_double_cmp(integer(b)?, *a).reverse(),
        (a, Value::Double(b)) => int_double_cmp(integer(a)?, *b),
        (a, b) => integer(a)?.cmp(&integer(b)?),
    };

    Some(ordering)
}

fn canonical_cmp_same_tag(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Str(a), Value::Str(b)) => a.cmp(b),
        (Value::Bin(a), Value::Bin(b)) => a.cmp(b),
        (Value::Array(a), Value::Array(b)) => canonical_cmp_array(a, b),
        (Value::Map(a), Value::Map(b)) => canonical_cmp_map(a, b),
        (a, b) => numeric_cmp(a, b).unwrap_or(Ordering::Equal),
    }
}

fn canonical_cmp_array(left: &[Value], right: &[Value]) -> Ordering {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = canonical_cmp(left, right);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}

fn canonical_cmp_map(left: &[(Value, Value)], right: &[(Value, Value)]) -> Ordering {
    for ((left_key, left_value), (right_key, right_value)) in left.iter().zip(right.iter()) {
        let key_cmp = canonical_cmp(left_key, right_key);
        if key_cmp != Ordering::Equal {
            return key_cmp;
        }

        let value_cmp = canonical_cmp(left_value, right_value);
        if value_cmp != Ordering::Equal {
            return value_cmp;
        }
    }

    left.len().cmp(&right.len())
}

fn integer(value: &Value) -> Option<i128> {
    match value {
        Value::Uint(v) => Some(i128::from(*v)),
        Value::Int(v) => Some(i128::from(*v)),
        _ => None,
    }
}

fn double_cmp(left: f64, right: f64) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
    }
}

// Exact comparison of an integer against a double, without rounding the
// integer through f64.
#[expect(clippy::cast_possible_truncation)]
fn int_double_cmp(int: i128, double: f64) -> Ordering {
    if double.is_nan() {
        return Ordering::Greater;
    }
    if double >= U64_BOUND_F64 {
        return Ordering::Less;
    }
    if double < I64_BOUND_F64 {
        return Ordering::Greater;
    }

    let whole = double.trunc();
    match int.cmp(&(whole as i128)) {
        Ordering::Equal if double > whole => Ordering::Less,
        Ordering::Equal if double < whole => Ordering::Greater,
        ordering => ordering,
    }
}
