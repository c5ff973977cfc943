//! Parsing, validation and summation of submitted category values.

use std::borrow::Cow;
use std::collections::HashMap;
use std::hash::BuildHasher;

use tracing::{debug, warn};

use crate::domain::error::{DomainError, QuantityError};
use crate::domain::model::{Category, FootprintInput, FootprintResult, ValidationOutcome};

/// Result-view parameter carrying a previously computed total.
pub const TOTAL_FIELD: &str = "total";

/// Validate submitted form fields and sum them.
///
/// Absent fields count as `0`. A present field must be a finite,
/// non-negative number; otherwise the whole submission fails and no partial
/// sum is produced.
///
/// # Errors
/// Returns [`DomainError::InvalidInput`] if any field fails to parse or the
/// sum overflows.
pub fn aggregate<S: BuildHasher>(fields: &HashMap<String, String, S>) -> ValidationOutcome {
    let outcome = parse_input(fields).and_then(checked_sum);
    if let Err(ref e) = outcome {
        warn!(error = %e, "Error in calculating footprint");
    }
    outcome
}

/// Rebuild a result from result-view query parameters.
///
/// Categories follow the [`aggregate`] rules. The returned total is always
/// recomputed; a supplied `total` must parse but is otherwise ignored.
///
/// # Errors
/// Returns [`DomainError::InvalidInput`] for the same reasons as
/// [`aggregate`], or if the supplied `total` does not parse.
pub fn restore<S: BuildHasher>(params: &HashMap<String, String, S>) -> ValidationOutcome {
    let outcome = parse_input(params).and_then(|input| {
        let supplied = parse_field(params, TOTAL_FIELD)?;
        let result = checked_sum(input)?;
        if let Some(supplied) = supplied
            && supplied.to_bits() != result.total.to_bits()
        {
            debug!(
                supplied,
                computed = result.total,
                "Supplied total differs from recomputed sum; using recomputed"
            );
        }
        Ok(result)
    });
    if let Err(ref e) = outcome {
        warn!(error = %e, "Error in restoring footprint result");
    }
    outcome
}

/// Parse one raw quantity.
///
/// Surrounding whitespace is ignored, and so is a single `_` between two
/// digits (`1_000`). `-0` is normalized to `0`.
///
/// # Errors
/// Returns a [`QuantityError`] if `raw` is not a number, is infinite or NaN,
/// or is negative.
pub fn parse_quantity(raw: &str) -> Result<f64, QuantityError> {
    let value: f64 = strip_digit_separators(raw.trim())
        .ok_or(QuantityError::Separator)?
        .parse()?;
    if !value.is_finite() {
        return Err(QuantityError::NotFinite);
    }
    if value < 0.0 {
        return Err(QuantityError::Negative);
    }
    // -0.0 + 0.0 == +0.0
    Ok(value + 0.0)
}

/// `None` if an underscore is not flanked by digits on both sides.
fn strip_digit_separators(text: &str) -> Option<Cow<'_, str>> {
    if !text.contains('_') {
        return Some(Cow::Borrowed(text));
    }
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    for (i, ch) in text.char_indices() {
        if ch == '_' {
            let before = i.checked_sub(1).and_then(|p| bytes.get(p));
            let after = bytes.get(i + 1);
            match (before, after) {
                (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => continue,
                _ => return None,
            }
        }
        out.push(ch);
    }
    Some(Cow::Owned(out))
}

fn parse_input<S: BuildHasher>(
    fields: &HashMap<String, String, S>,
) -> Result<FootprintInput, DomainError> {
    Ok(FootprintInput::new(
        category_value(fields, Category::Transport)?,
        category_value(fields, Category::Electricity)?,
        category_value(fields, Category::Waste)?,
    ))
}

fn category_value<S: BuildHasher>(
    fields: &HashMap<String, String, S>,
    category: Category,
) -> Result<f64, DomainError> {
    Ok(parse_field(fields, category.field_name())?.unwrap_or(0.0))
}

fn parse_field<S: BuildHasher>(
    fields: &HashMap<String, String, S>,
    name: &'static str,
) -> Result<Option<f64>, DomainError> {
    fields
        .get(name)
        .map(|raw| parse_quantity(raw).map_err(|reason| DomainError::invalid_input(name, reason)))
        .transpose()
}

fn checked_sum(input: FootprintInput) -> ValidationOutcome {
    let result = FootprintResult::from_input(input);
    if result.total.is_finite() {
        Ok(result)
    } else {
        Err(DomainError::invalid_input(
            TOTAL_FIELD,
            QuantityError::Overflow,
        ))
    }
}
