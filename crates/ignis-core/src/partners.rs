//! Business-partner network normalization (the `ML2` group of the prediction payload).

use crate::value::{array_at, f64_at, json_f64};
use serde::Serialize;
use serde_json::Value;

/// Group holding the partner network in the service response.
pub const NETWORK_GROUP: &str = "ML2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Classification {
    Critical,
    Important,
    Secondary,
}

impl Classification {
    /// Fixed display order used by every chart.
    pub const ALL: [Classification; 3] = [Self::Critical, Self::Important, Self::Secondary];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Crítico" | "Critical" => Some(Self::Critical),
            "Importante" | "Important" => Some(Self::Important),
            "Secundário" | "Secondary" => Some(Self::Secondary),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Crítico",
            Self::Important => "Importante",
            Self::Secondary => "Secundário",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerRecord {
    /// Counterparty identifier.
    pub id: String,
    pub weight: f64,
    pub percent_of_total: f64,
    /// `None` when the upstream label is missing or unrecognized.
    pub classification: Option<Classification>,
}

impl PartnerRecord {
    pub fn new(id: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            weight: weight.max(0.0),
            percent_of_total: 0.0,
            classification: None,
        }
    }

    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    pub fn with_percent(mut self, percent_of_total: f64) -> Self {
        self.percent_of_total = percent_of_total;
        self
    }

    fn from_value(v: &Value) -> Option<Self> {
        let obj = v.as_object()?;
        let id = match obj.get("cnpj") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        let weight = obj
            .get("peso")
            .and_then(json_f64)
            .filter(|w| *w > 0.0)
            .unwrap_or(0.0);
        let percent_of_total = obj.get("percentual").and_then(json_f64).unwrap_or(0.0);
        let classification = obj
            .get("classificacao")
            .and_then(Value::as_str)
            .and_then(Classification::from_label);
        Some(Self {
            id,
            weight,
            percent_of_total,
            classification,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerNetwork {
    /// Principal partners; this is the list the network and chart widgets draw.
    pub partners: Vec<PartnerRecord>,
    pub payable: Vec<PartnerRecord>,
    pub receivable: Vec<PartnerRecord>,
    pub total_volume: f64,
    pub total_payable: f64,
    pub total_receivable: f64,
}

impl PartnerNetwork {
    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}

/// Normalizes the partner group of a raw prediction response. Total, like [`crate::normalize`].
pub fn normalize_partners(response: &Value) -> PartnerNetwork {
    let list = |key: &str| -> Vec<PartnerRecord> {
        array_at(response, &[NETWORK_GROUP, key])
            .map(|items| items.iter().filter_map(PartnerRecord::from_value).collect())
            .unwrap_or_default()
    };
    let total = |key: &str| f64_at(response, &[NETWORK_GROUP, key]).unwrap_or(0.0);

    PartnerNetwork {
        partners: list("principais_parceiros"),
        payable: list("parceiros_pagar"),
        receivable: list("parceiros_receber"),
        total_volume: total("volume_total"),
        total_payable: total("total_pagar"),
        total_receivable: total("total_receber"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_entries_are_skipped() {
        let v = json!({"ML2": {"principais_parceiros": [
            1,
            "x",
            {"cnpj": "CNPJ_00017", "peso": 120.0, "classificacao": "Crítico"}
        ]}});
        let n = normalize_partners(&v);
        assert_eq!(n.partners.len(), 1);
        assert_eq!(n.partners[0].classification, Some(Classification::Critical));
    }

    #[test]
    fn unknown_classification_is_none() {
        let v = json!({"ML2": {"principais_parceiros": [{"cnpj": 42, "classificacao": "Outro"}]}});
        let n = normalize_partners(&v);
        assert_eq!(n.partners[0].id, "42");
        assert_eq!(n.partners[0].weight, 0.0);
        assert_eq!(n.partners[0].classification, None);
    }
}
