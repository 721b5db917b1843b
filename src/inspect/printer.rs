//! Plain text rendering of matrices and vectors.
//!
//! Arrays are printed in the bracketed layout familiar from interactive
//! numeric sessions:
//!
//! ```text
//! [[0.55 0.72]
//!  [0.6  0.54]]
//! ```
//!
//! Entries are shown with at most eight decimals and trailing zeros
//! removed.  Columns are aligned on the decimal point.  Arrays whose
//! magnitudes span too wide a range switch to scientific notation.  Lines
//! are wrapped at [`LINE_WIDTH`] characters.

use crate::algebra::Matrix;

/// maximum printed line length before wrapping
pub const LINE_WIDTH: usize = 75;

const PRECISION: i32 = 8;

/// Renders a dense matrix.
pub fn format_matrix(m: &Matrix<f64>) -> String {
    let words = format_words(m.data());
    let (nrows, ncols) = (m.nrows(), m.ncols());

    let mut out = String::from("[");
    for i in 0..nrows {
        if i > 0 {
            out.push_str("\n ");
        }
        // entry (i, j) is at j * nrows + i in column major storage
        let row: Vec<&str> = (0..ncols).map(|j| words[j * nrows + i].as_str()).collect();
        let closing = if i + 1 == nrows { 2 } else { 1 };
        out.push_str(&wrap_row(&row, "[", "  ", closing));
        out.push(']');
    }
    out.push(']');
    out
}

/// Renders a one dimensional array.
pub fn format_vector(v: &[f64]) -> String {
    let words = format_words(v);
    let row: Vec<&str> = words.iter().map(String::as_str).collect();
    let mut out = wrap_row(&row, "[", " ", 1);
    out.push(']');
    out
}

/// Prefixes every line of `text` with `level` tab characters.
pub fn indent_lines(text: &str, level: usize) -> String {
    let tabs = "\t".repeat(level);
    text.lines()
        .map(|line| format!("{}{}", tabs, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Scalar in the shortest form that reads back to the same value, with a
/// `.0` suffix for integral values and scientific notation outside
/// `[1e-4, 1e16)`.
pub fn format_scalar(v: f64) -> String {
    if !v.is_finite() {
        return non_finite(v).to_string();
    }
    let a = v.abs();
    if a == 0.0 || (1e-4..1e16).contains(&a) {
        let s = format!("{}", v);
        if s.contains('.') {
            s
        } else {
            s + ".0"
        }
    } else {
        scientific(&format!("{:e}", v))
    }
}

fn non_finite(v: f64) -> &'static str {
    if v.is_nan() {
        "nan"
    } else if v > 0.0 {
        "inf"
    } else {
        "-inf"
    }
}

// rewrites rust exponent notation `1.5e-7` as `1.5e-07`
fn scientific(s: &str) -> String {
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            let mantissa = if mantissa.contains('.') {
                mantissa.to_string()
            } else {
                format!("{}.", mantissa)
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => s.to_string(),
    }
}

fn use_scientific(values: &[f64]) -> bool {
    let finite: Vec<f64> = values
        .iter()
        .map(|v| v.abs())
        .filter(|v| v.is_finite() && *v != 0.0)
        .collect();
    let max = finite.iter().copied().fold(0.0, f64::max);
    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    !finite.is_empty() && (max >= 1e8 || min < 1e-4 || max / min > 1e3)
}

fn round_decimals(v: f64) -> f64 {
    let scale = 10f64.powi(PRECISION);
    let r = (v * scale).round() / scale;
    if r.is_finite() {
        r
    } else {
        v
    }
}

// each entry as a string, padded so that all entries have equal width
fn format_words(values: &[f64]) -> Vec<String> {
    if use_scientific(values) {
        let raw: Vec<String> = values
            .iter()
            .map(|&v| {
                if v.is_finite() {
                    scientific(&format!("{:.*e}", (PRECISION - 1) as usize, v))
                } else {
                    non_finite(v).to_string()
                }
            })
            .map(|s| trim_mantissa(&s))
            .collect();
        return pad_decimal(raw);
    }

    let raw = values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                return non_finite(v).to_string();
            }
            let s = format!("{}", round_decimals(v));
            if s.contains('.') {
                s
            } else {
                s + "."
            }
        })
        .collect();
    pad_decimal(raw)
}

// drops trailing zeros of the mantissa in `1.50000000e-07`
fn trim_mantissa(s: &str) -> String {
    match s.split_once('e') {
        Some((mantissa, exp)) if mantissa.contains('.') => {
            format!("{}e{}", mantissa.trim_end_matches('0'), exp)
        }
        _ => s.to_string(),
    }
}

// aligns strings on the decimal point, padding the integer part on the
// left and the fractional part on the right
fn pad_decimal(words: Vec<String>) -> Vec<String> {
    let split: Vec<(String, String)> = words
        .iter()
        .map(|w| match w.split_once('.') {
            Some((int, frac)) => (int.to_string(), format!(".{}", frac)),
            None => (w.clone(), String::new()),
        })
        .collect();
    let pad_left = split.iter().map(|(i, _)| i.len()).max().unwrap_or(0);
    let pad_right = split.iter().map(|(_, f)| f.len()).max().unwrap_or(0);
    split
        .into_iter()
        .map(|(int, frac)| format!("{:>l$}{:<r$}", int, frac, l = pad_left, r = pad_right))
        .collect()
}

// joins words with single spaces after `open`, wrapping before a word that
// would push the line past LINE_WIDTH.  `closing` is the number of closing
// brackets that will follow the last word.
fn wrap_row(words: &[&str], open: &str, continuation: &str, closing: usize) -> String {
    let mut out = String::new();
    let mut line = String::from(open);
    for (k, word) in words.iter().enumerate() {
        let last = k + 1 == words.len();
        let needed = word.len() + if last { closing } else { 0 };
        if line.len() + needed > LINE_WIDTH && line.trim().len() > open.trim().len() {
            out.push_str(line.trim_end());
            out.push('\n');
            line = continuation.to_string();
        }
        line.push_str(word);
        if !last {
            line.push(' ');
        }
    }
    out.push_str(&line);
    out
}
