//! Human readable SI formatting for metadata values.

const SI_PREFIXES: [&str; 7] = ["", "k", "M", "G", "T", "P", "E"];

/// Format `value` with the largest SI prefix that keeps the integer part
/// below 1000, e.g. `1_500` Hz becomes `"1.5 kHz"`.
///
/// Fractional digits are exact; trailing zeros are dropped.
pub fn si_string_u64(value: u64, unit: &str) -> String {
    let mut exponent = 0;
    let mut divisor: u64 = 1;
    while value / divisor >= 1000 && exponent + 1 < SI_PREFIXES.len() {
        divisor *= 1000;
        exponent += 1;
    }

    let quot = value / divisor;
    let mut fract = String::new();
    if exponent > 0 {
        let digits = format!("{:0width$}", value % divisor, width = exponent * 3);
        let digits = digits.trim_end_matches('0');
        if !digits.is_empty() {
            fract = format!(".{}", digits);
        }
    }

    format!("{}{} {}{}", quot, fract, SI_PREFIXES[exponent], unit)
}

/// Format a sample rate in Hz the way the metadata `samplerate` key expects.
pub fn samplerate_string(samplerate: u64) -> String {
    si_string_u64(samplerate, "Hz")
}
