use std::fmt::Write as _;

pub(crate) fn fmt_number(v: f64) -> String {
    if !v.is_finite() || v.abs() < 0.0005 {
        return "0".to_string();
    }
    let r = (v * 1000.0).round() / 1000.0;
    let mut s = format!("{r:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

pub(crate) fn escape_xml_into(out: &mut String, text: &str) {
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
}

pub(crate) fn push_attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, r#" {name}=""#);
    escape_xml_into(out, value);
    out.push('"');
}

pub(crate) fn push_num_attr(out: &mut String, name: &str, value: f64) {
    let _ = write!(out, r#" {name}="{}""#, fmt_number(value));
}
