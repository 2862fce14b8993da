//! Normalized company snapshot.
//!
//! The prediction service returns a loosely-shaped record where any field may be absent, `null`,
//! of an unexpected type, or encoded as the string `"nan"`. [`normalize`] is a total function
//! that maps every field through one entry of an explicit default table, so renderers never
//! deal with partial data.

use crate::value::{f64_at, lookup, str_at, text_at};
use serde::Serialize;
use serde_json::Value;

/// Group holding the primary risk fields in the service response.
pub const PRIMARY_GROUP: &str = "ML1";

/// Placeholder shown for missing text fields.
pub const MISSING_TEXT: &str = "-";

/// Upstream encodes missing values as this literal.
pub const NAN_SENTINEL: &str = "nan";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum RiskBand {
    Low,
    Medium,
    High,
    #[default]
    Unknown,
}

impl RiskBand {
    /// Maps a free-text risk label (case-sensitive). Unrecognized labels map to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Baixo" | "Low" => Self::Low,
            "Médio" | "Medium" => Self::Medium,
            "Alto" | "High" => Self::High,
            _ => Self::Unknown,
        }
    }

    /// Display label as used by the dashboard (Portuguese).
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Baixo",
            Self::Medium => "Médio",
            Self::High => "Alto",
            Self::Unknown => MISSING_TEXT,
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySnapshot {
    /// Canonical identifier; empty when no company is loaded.
    pub id: String,
    pub legal_name: String,
    pub sector: String,
    pub profile: String,
    pub outstanding_value: f64,
    pub provision_value: f64,
    pub balance_value: f64,
    pub revenue_value: f64,
    pub risk_band: RiskBand,
    pub credit_score: Option<f64>,
    pub provision_percent: String,
    pub state_code: String,
    pub fraud_alert: String,
}

impl Default for CompanySnapshot {
    fn default() -> Self {
        Self {
            id: String::new(),
            legal_name: MISSING_TEXT.to_string(),
            sector: MISSING_TEXT.to_string(),
            profile: MISSING_TEXT.to_string(),
            outstanding_value: 0.0,
            provision_value: 0.0,
            balance_value: 0.0,
            revenue_value: 0.0,
            risk_band: RiskBand::Unknown,
            credit_score: None,
            provision_percent: "0%".to_string(),
            state_code: String::new(),
            fraud_alert: String::new(),
        }
    }
}

impl CompanySnapshot {
    pub fn is_loaded(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn has_fraud_alert(&self) -> bool {
        !self.fraud_alert.is_empty()
    }
}

/// Normalizes a raw prediction response into a [`CompanySnapshot`].
pub fn normalize(response: &Value) -> CompanySnapshot {
    let d = CompanySnapshot::default();
    let ml1 = |key: &'static str| [PRIMARY_GROUP, key];

    CompanySnapshot {
        id: text_at(response, &["ID"]).map(str::to_string).unwrap_or(d.id),
        legal_name: text_or(response, &ml1("razaoSocial"), d.legal_name),
        sector: text_or(response, &ml1("setor"), d.sector),
        profile: text_or(response, &ml1("perfil_predito"), d.profile),
        outstanding_value: non_negative(f64_at(response, &ml1("VL_CAR"))),
        provision_value: non_negative(f64_at(response, &ml1("VL_PDD"))),
        balance_value: f64_at(response, &ml1("VL_SLDO")).unwrap_or(d.balance_value),
        revenue_value: non_negative(f64_at(response, &ml1("VL_FATU"))),
        risk_band: str_at(response, &ml1("Faixa_risco"))
            .map(RiskBand::from_label)
            .unwrap_or(d.risk_band),
        credit_score: f64_at(response, &ml1("Score_cliente")),
        provision_percent: lookup(response, &ml1("Percentual_PDD"))
            .and_then(format_percent)
            .unwrap_or(d.provision_percent),
        state_code: text_or(response, &ml1("Estado"), d.state_code),
        fraud_alert: text_at(response, &ml1("alertas"))
            .filter(|s| *s != NAN_SENTINEL)
            .map(str::to_string)
            .unwrap_or(d.fraud_alert),
    }
}

fn text_or(v: &Value, path: &[&str], default: String) -> String {
    text_at(v, path).map(str::to_string).unwrap_or(default)
}

fn non_negative(v: Option<f64>) -> f64 {
    v.filter(|n| *n > 0.0).unwrap_or(0.0)
}

/// Formats a provision percentage as `"N%"`.
///
/// Accepts numbers (`12.5` → `"12.5%"`), numeric strings (`"12"` → `"12%"`) and strings already
/// carrying a trailing `%`. Anything else is treated as missing.
fn format_percent(v: &Value) -> Option<String> {
    if let Some(n) = crate::value::json_f64(v) {
        return Some(format!("{}%", fmt_number(n)));
    }
    let s = v.as_str()?.trim();
    let number = s.strip_suffix('%').unwrap_or(s).trim();
    let n: f64 = number.replace(',', ".").parse().ok()?;
    if !n.is_finite() {
        return None;
    }
    Some(format!("{}%", fmt_number(n)))
}

fn fmt_number(v: f64) -> String {
    let r = (v * 100.0).round() / 100.0;
    let mut s = format!("{r:.2}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" { "0".to_string() } else { s }
}
