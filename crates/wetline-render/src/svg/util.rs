// Number and text formatting for SVG output.

use std::fmt::Write as _;

pub(crate) fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, v);
    out
}

/// Shortest round-trippable form, without `-0` or sub-micro float noise.
pub(crate) fn fmt_into(out: &mut String, v: f64) {
    if !v.is_finite() {
        out.push('0');
        return;
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    if v == -0.0 {
        v = 0.0;
    }

    let _ = write!(out, "{v}");
}

/// Path coordinates: at most 3 fractional digits, ties rounded half-up.
pub(crate) fn fmt_path_into(out: &mut String, v: f64) {
    if !v.is_finite() || v.abs() < 0.0005 {
        out.push('0');
        return;
    }

    let k = (v * 1000.0 + 0.5).floor() as i64;
    append_fixed_3dp_trimmed(out, k);
}

fn append_fixed_3dp_trimmed(out: &mut String, k: i64) {
    if k == 0 {
        out.push('0');
        return;
    }

    if k < 0 {
        out.push('-');
    }
    let abs = k.unsigned_abs();
    let _ = write!(out, "{}", abs / 1000);

    let frac = abs % 1000;
    if frac == 0 {
        return;
    }
    let digits = format!("{frac:03}");
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_num(v: f64) -> String {
        let mut out = String::new();
        fmt_path_into(&mut out, v);
        out
    }

    #[test]
    fn path_numbers_keep_three_decimals() {
        assert_eq!(path_num(110.0), "110");
        assert_eq!(path_num(29.62962962962963), "29.63");
        assert_eq!(path_num(-2.5), "-2.5");
        assert_eq!(path_num(0.0004), "0");
        assert_eq!(path_num(-0.3), "-0.3");
        assert_eq!(path_num(f64::NAN), "0");
    }

    #[test]
    fn attribute_numbers_drop_noise() {
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(240.0000000001), "240");
        assert_eq!(fmt(0.15), "0.15");
    }

    #[test]
    fn ids_are_escaped() {
        assert_eq!(escape_xml(r#"a<b>&"c""#), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
