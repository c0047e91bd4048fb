//! Fixed-precision rendering of real numbers.
use super::utils::round;


/// Rounds `value` half away from zero to `decimals` places
/// and renders it without trailing fractional zeros.
///
/// Returns `"NaN"` when `value * 10^decimals`
/// is not representable as an `i64` (this includes `NaN` itself).
///
/// ```
/// use minivote::common::format::format_fixed;
/// assert_eq!(format_fixed(3.14159, 2), "3.14");
/// assert_eq!(format_fixed(2.5, 0), "3");
/// assert_eq!(format_fixed(-0.05, 2), "-0.05");
/// assert_eq!(format_fixed(1.5, 3), "1.5");
/// ```
pub fn format_fixed(value: f64, decimals: u32) -> String {
    let scaled = value * 10f64.powi(decimals as i32);
    if !(scaled.abs() < i64::MAX as f64) {
        return "NaN".to_string();
    }

    let precise = round(scaled);
    if decimals == 0 {
        return precise.to_string();
    }

    let decimals = decimals as usize;
    let mut digits = precise.unsigned_abs().to_string();
    if digits.len() <= decimals {
        let pad = "0".repeat(decimals + 1 - digits.len());
        digits.insert_str(0, &pad);
    }

    let (int_part, frac_part) = digits.split_at(digits.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(digits.len() + 2);
    if precise < 0 { out.push('-'); }
    out.push_str(int_part);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}


/// Renders `value` as [`format_fixed`] does,
/// right-justified in `width` columns with the decimal point
/// at column `width - decimals - 1`.
/// If the number does not fit, it is returned unpadded.
///
/// ```
/// use minivote::common::format::format_fixed_width;
/// assert_eq!(format_fixed_width(3.5, 8, 2),   "    3.5 ");
/// assert_eq!(format_fixed_width(-12.25, 8, 2), "  -12.25");
/// ```
pub fn format_fixed_width(value: f64, width: usize, decimals: u32) -> String {
    let text = format_fixed(value, decimals);
    let chars = text.chars().collect::<Vec<char>>();
    let decimals = decimals as usize;

    if chars.len() >= width {
        return text;
    }

    let dot = if decimals > 0 {
        chars.iter().position(|&c| c == '.').unwrap_or(chars.len())
    } else {
        chars.len()
    };

    // The integer part must fit left of the decimal column.
    if dot + decimals + 1 > width {
        return text;
    }

    let mut result = vec![' '; width];
    let point = width - decimals - 1;
    if dot < chars.len() {
        result[point] = '.';
    }

    let start = point - dot;
    result[start..point].copy_from_slice(&chars[..dot]);
    for (offset, &c) in chars.iter().skip(dot + 1).enumerate() {
        result[point + 1 + offset] = c;
    }

    result.into_iter().collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_zeros() {
        assert_eq!(format_fixed(1.0, 3), "1");
        assert_eq!(format_fixed(1.10, 2), "1.1");
        assert_eq!(format_fixed(0.0, 4), "0");
        assert_eq!(format_fixed(-0.001, 2), "0");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_fixed(0.125, 2), "0.13");
        assert_eq!(format_fixed(-0.125, 2), "-0.13");
        assert_eq!(format_fixed(-2.5, 0), "-3");
    }

    #[test]
    fn small_magnitudes_get_leading_zero() {
        assert_eq!(format_fixed(0.05, 2), "0.05");
        assert_eq!(format_fixed(-0.005, 3), "-0.005");
    }

    #[test]
    fn overflow_is_nan() {
        assert_eq!(format_fixed(f64::NAN, 2), "NaN");
        assert_eq!(format_fixed(f64::INFINITY, 2), "NaN");
        assert_eq!(format_fixed(1e300, 2), "NaN");
    }

    #[test]
    fn aligns_on_the_decimal_point() {
        assert_eq!(format_fixed_width(1.0, 6, 2), "  1   ");
        assert_eq!(format_fixed_width(0.25, 6, 2), "  0.25");
        assert_eq!(format_fixed_width(7.0, 4, 0), "  7 ");
    }

    #[test]
    fn too_wide_is_returned_as_is() {
        assert_eq!(format_fixed_width(123456.75, 4, 2), "123456.75");
        assert_eq!(format_fixed_width(1234.0, 5, 2), "1234");
    }
}
