//! Float formatting shared by redirect URLs and the result page.

/// Shortest round-trip text for `value`, with a trailing `.0` on integral
/// values and exponent notation outside `1e-4..1e16` (`17.0`, `0.1`, `1e+16`,
/// `1e-05`).
#[must_use]
pub fn format_quantity(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return exponent_form(value);
    }
    let text = value.to_string();
    if text.contains(['.', 'e', 'i', 'N']) {
        text
    } else {
        format!("{text}.0")
    }
}

fn exponent_form(value: f64) -> String {
    let text = format!("{value:e}");
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_values_keep_point_zero() {
        assert_eq!(format_quantity(17.0), "17.0");
        assert_eq!(format_quantity(0.0), "0.0");
        assert_eq!(format_quantity(1000.0), "1000.0");
    }

    #[test]
    fn test_fractions_are_shortest_round_trip() {
        assert_eq!(format_quantity(0.1), "0.1");
        assert_eq!(format_quantity(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(0.0001), "0.0001");
    }

    #[test]
    fn test_extreme_magnitudes_use_exponent() {
        assert_eq!(format_quantity(1e16), "1e+16");
        assert_eq!(format_quantity(2.5e300), "2.5e+300");
        assert_eq!(format_quantity(1e-5), "1e-05");
        assert_eq!(format_quantity(1.5e-10), "1.5e-10");
    }

    #[test]
    fn test_output_parses_back_exactly() {
        for value in [17.0, 0.1, 1e16, 1e-5, 123_456.789, f64::MAX] {
            let text = format_quantity(value);
            assert_eq!(text.parse::<f64>().ok(), Some(value), "{text}");
        }
    }
}
