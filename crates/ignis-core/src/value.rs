// Lenient accessors over the prediction payload.
//
// Every accessor returns `None` for absent fields *and* for fields of the wrong JSON type, so
// callers can apply a single default per field.

use serde_json::Value;

pub(crate) fn lookup<'a>(v: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = v;
    for key in path {
        cur = cur.as_object()?.get(*key)?;
    }
    Some(cur)
}

pub(crate) fn json_f64(v: &Value) -> Option<f64> {
    v.as_f64()
        .or_else(|| v.as_i64().map(|n| n as f64))
        .or_else(|| v.as_u64().map(|n| n as f64))
        .filter(|n| n.is_finite())
}

pub(crate) fn str_at<'a>(v: &'a Value, path: &[&str]) -> Option<&'a str> {
    lookup(v, path)?.as_str()
}

/// Non-empty string at `path`. Empty strings count as missing (the dashboard shows `-`).
pub(crate) fn text_at<'a>(v: &'a Value, path: &[&str]) -> Option<&'a str> {
    str_at(v, path).filter(|s| !s.is_empty())
}

pub(crate) fn f64_at(v: &Value, path: &[&str]) -> Option<f64> {
    json_f64(lookup(v, path)?)
}

pub(crate) fn array_at<'a>(v: &'a Value, path: &[&str]) -> Option<&'a Vec<Value>> {
    lookup(v, path)?.as_array()
}
