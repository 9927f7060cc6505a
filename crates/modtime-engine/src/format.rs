/// Significant digits used by `%g`-style formatting unless told otherwise.
pub const DEFAULT_PRECISION: usize = 6;

/// Formats a number like C's `%.<precision>g`.
///
/// Fixed notation is used when the decimal exponent is in `[-4, precision)`,
/// scientific notation (`1.5e+07`) otherwise; trailing zeros are dropped in
/// both cases.
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Formats a number like C's `%<width>.<decimals>f`.
pub fn format_fixed(value: f64, width: usize, decimals: usize) -> String {
    format!("{:>width$.decimals$}", value, width = width, decimals = decimals)
}

fn strip_trailing_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
