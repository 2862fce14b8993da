//! Dashboard configuration.
//!
//! The config is a JSON object addressed by dotted paths (`network.width`). Site defaults are
//! built in; user files (JSON or YAML) are deep-merged on top, so partial overrides are fine.

use crate::error::{Error, Result};
use serde_json::{Value, json};

pub const DEFAULT_PREDICTION_URL: &str = "http://localhost:8000/predict";
pub const DEFAULT_GEO_URL: &str = "https://raw.githubusercontent.com/codeforamerica/click_that_hood/master/public/data/brazil-states.geojson";

#[derive(Debug, Clone, PartialEq)]
pub struct IgnisConfig(Value);

impl Default for IgnisConfig {
    fn default() -> Self {
        Self(json!({
            "prediction": {
                "url": DEFAULT_PREDICTION_URL,
                "timeoutSecs": 30,
                "validateIdentifier": true,
            },
            "geo": {
                "url": DEFAULT_GEO_URL,
                "regionProperty": "sigla",
            },
            "map": { "width": 400, "height": 250 },
            "network": {
                "width": 360,
                "height": 260,
                "maxIterations": 300,
                "centralLabel": "EMPRESA",
            },
        }))
    }
}

impl IgnisConfig {
    /// Site defaults with `overrides` merged on top.
    pub fn with_overrides(overrides: &Value) -> Self {
        let mut cfg = Self::default();
        cfg.deep_merge(overrides);
        cfg
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let overrides: Value = serde_json::from_str(text)?;
        Ok(Self::with_overrides(&overrides))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let overrides: Value = serde_yaml::from_str(text)?;
        Ok(Self::with_overrides(&overrides))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path)?.as_bool()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        crate::value::json_f64(self.get(dotted_path)?)
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    pub fn prediction_url(&self) -> Result<url::Url> {
        self.url_at("prediction.url")
    }

    pub fn geo_url(&self) -> Result<url::Url> {
        self.url_at("geo.url")
    }

    /// Request timeout; non-positive or unrepresentable values fall back to 30s.
    pub fn prediction_timeout(&self) -> std::time::Duration {
        self.get_f64("prediction.timeoutSecs")
            .filter(|s| *s > 0.0)
            .and_then(|s| std::time::Duration::try_from_secs_f64(s).ok())
            .unwrap_or(std::time::Duration::from_secs(30))
    }

    pub fn validate_identifier(&self) -> bool {
        self.get_bool("prediction.validateIdentifier")
            .unwrap_or(true)
    }

    pub fn region_property(&self) -> &str {
        self.get_str("geo.regionProperty").unwrap_or("sigla")
    }

    pub fn map_viewport(&self) -> (f64, f64) {
        self.viewport("map", (400.0, 250.0))
    }

    pub fn network_viewport(&self) -> (f64, f64) {
        self.viewport("network", (360.0, 260.0))
    }

    pub fn network_max_iterations(&self) -> usize {
        self.get_f64("network.maxIterations")
            .filter(|n| *n >= 1.0)
            .map(|n| n as usize)
            .unwrap_or(300)
    }

    pub fn central_label(&self) -> &str {
        self.get_str("network.centralLabel").unwrap_or("EMPRESA")
    }

    fn viewport(&self, section: &str, fallback: (f64, f64)) -> (f64, f64) {
        let dim = |key: &str, default: f64| {
            self.get_f64(&format!("{section}.{key}"))
                .filter(|v| *v > 0.0)
                .unwrap_or(default)
        };
        (dim("width", fallback.0), dim("height", fallback.1))
    }

    fn url_at(&self, path: &str) -> Result<url::Url> {
        let raw = self.get_str(path).ok_or_else(|| Error::InvalidConfig {
            path: path.to_string(),
            message: "expected a URL string".to_string(),
        })?;
        url::Url::parse(raw).map_err(|e| Error::InvalidConfig {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_merge_into_defaults() {
        let cfg = IgnisConfig::with_overrides(&json!({"network": {"width": 500}}));
        assert_eq!(cfg.network_viewport(), (500.0, 260.0));
        assert_eq!(cfg.central_label(), "EMPRESA");
        assert_eq!(cfg.map_viewport(), (400.0, 250.0));
    }

    #[test]
    fn oversized_timeout_falls_back_to_default() {
        let cfg = IgnisConfig::with_overrides(&json!({"prediction": {"timeoutSecs": 1e30}}));
        assert_eq!(cfg.prediction_timeout(), std::time::Duration::from_secs(30));
        let cfg = IgnisConfig::with_overrides(&json!({"prediction": {"timeoutSecs": 2.5}}));
        assert_eq!(cfg.prediction_timeout(), std::time::Duration::from_millis(2500));
    }

    #[test]
    fn yaml_overrides_are_accepted() {
        let cfg = IgnisConfig::from_yaml_str("prediction:\n  validateIdentifier: false\n")
            .expect("yaml");
        assert!(!cfg.validate_identifier());
        assert_eq!(
            cfg.prediction_url().expect("url").as_str(),
            DEFAULT_PREDICTION_URL
        );
    }

    #[test]
    fn bad_url_is_reported_with_its_path() {
        let cfg = IgnisConfig::with_overrides(&json!({"geo": {"url": "not a url"}}));
        let err = cfg.geo_url().expect_err("invalid");
        assert!(err.to_string().contains("geo.url"));
    }
}
