//! Python literal formatting.
//!
//! Strings are wrapped in single quotes verbatim. Embedded quotes, backslashes
//! and newlines are NOT escaped; callers must keep label text free of them.
//! [`is_unsafe_text`] lets the compiler warn about such text without changing it.

/// Largest magnitude below which every whole f64 is exactly representable.
const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Format a number the way Python reads it back (`nan`/`inf` come from pylab).
///
/// Whole values below 2^53 print as integers (`[0, 1, 2]`); anything else
/// stays a float literal (`1e20`, `1e-7`) so numpy keeps a float dtype.
pub fn py_num(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "inf".to_string() } else { "-inf".to_string() }
    } else if v.fract() == 0.0 && v.abs() < EXACT_INT_LIMIT {
        format!("{}", v)
    } else {
        format!("{:?}", v)
    }
}

/// Python boolean literal.
pub fn py_bool(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}

/// Single-quoted string literal, no escaping.
pub fn py_str(s: &str) -> String {
    format!("'{}'", s)
}

/// Comma-separated numbers, without brackets.
pub fn py_values(values: &[f64]) -> String {
    values.iter().map(|v| py_num(*v)).collect::<Vec<_>>().join(", ")
}

/// List literal, e.g. `[0, 1, 2.5]`.
pub fn py_list(values: &[f64]) -> String {
    format!("[{}]", py_values(values))
}

/// List of string literals, e.g. `['a', 'b']`.
pub fn py_str_list(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|s| py_str(s)).collect();
    format!("[{}]", items.join(", "))
}

/// Nested list literal for a 2-D grid, e.g. `[[1, 2], [3, 4]]`.
pub fn py_matrix(rows: &[Vec<f64>]) -> String {
    let rows: Vec<String> = rows.iter().map(|r| py_list(r)).collect();
    format!("[{}]", rows.join(", "))
}

/// Ordinal positions `0..n` as floats.
pub fn ordinal(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

/// True when `s` would break out of a single-quoted literal.
pub fn is_unsafe_text(s: &str) -> bool {
    s.contains(['\'', '\n', '\r'])
}
