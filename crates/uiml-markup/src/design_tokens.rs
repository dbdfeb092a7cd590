//! Design-token checks on attribute values.
//!
//! Each rule looks at one attribute and only fires when the value is a
//! number; strings and other values are left alone.

use serde_json::Number;
use serde_json::Value;

use crate::error::ParseErrorKind;

/// Allowed values for `spacing` and `gap`.
pub const SPACING_SCALE: [u32; 13] = [0, 1, 2, 3, 4, 5, 6, 8, 10, 12, 16, 20, 24];

/// Column count every `Grid` must declare.
pub const GRID_COLUMNS: i64 = 12;

/// Component type the column rule applies to.
pub const GRID_ROOT: &str = "Grid";

pub(crate) fn check_attribute(
    component: &str,
    attribute: &str,
    value: &Value,
) -> Result<(), ParseErrorKind> {
    let Value::Number(number) = value else {
        return Ok(());
    };

    match attribute {
        "spacing" | "gap" if !on_spacing_scale(number) => Err(ParseErrorKind::InvalidSpacing {
            attribute: attribute.to_string(),
            value: number.to_string(),
            allowed: SPACING_SCALE.to_vec(),
        }),
        "gridColumnSpan" if !as_integer(number).is_some_and(|n| (1..=12).contains(&n)) => {
            Err(ParseErrorKind::InvalidGridColumnSpan {
                value: number.to_string(),
            })
        }
        "gridRowSpan" if !as_integer(number).is_some_and(|n| n >= 1) => {
            Err(ParseErrorKind::InvalidGridRowSpan {
                value: number.to_string(),
            })
        }
        "columns" if component == GRID_ROOT && as_integer(number) != Some(GRID_COLUMNS) => {
            Err(ParseErrorKind::InvalidGridColumns {
                value: number.to_string(),
            })
        }
        _ => Ok(()),
    }
}

/// Integral numbers, whether written `12` or `12.0`.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn as_integer(number: &Number) -> Option<i64> {
    if let Some(n) = number.as_i64() {
        return Some(n);
    }
    let value = number.as_f64()?;
    let in_range = value.is_finite() && value.abs() < 9.0e15;
    (in_range && value.fract() == 0.0).then_some(value as i64)
}

fn on_spacing_scale(number: &Number) -> bool {
    let Some(value) = number.as_f64() else {
        return false;
    };
    SPACING_SCALE
        .iter()
        .any(|step| (f64::from(*step) - value).abs() < f64::EPSILON)
}
