//! Commercial product recommendation and insight text.

use crate::snapshot::{CompanySnapshot, RiskBand};
use serde::Serialize;

/// Revenue above which an expanding company qualifies for investment financing.
pub const EXPANSION_REVENUE_THRESHOLD: f64 = 500_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Product {
    WorkingCapital,
    SpecialReview,
    InvestmentFinancing,
    CorporateInvestment,
    CorporateAccount,
}

impl Product {
    pub fn label(self) -> &'static str {
        match self {
            Self::WorkingCapital => "Capital de Giro",
            Self::SpecialReview => "Análise Especial",
            Self::InvestmentFinancing => "Financiamento Investimentos",
            Self::CorporateInvestment => "Investimento PJ",
            Self::CorporateAccount => "Conta PJ",
        }
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// First matching rule wins.
pub fn recommend_product(snapshot: &CompanySnapshot) -> Product {
    if snapshot.balance_value < 0.0 {
        return Product::WorkingCapital;
    }
    if snapshot.risk_band == RiskBand::High {
        return Product::SpecialReview;
    }
    match snapshot.profile.as_str() {
        "Expansao" if snapshot.revenue_value > EXPANSION_REVENUE_THRESHOLD => {
            Product::InvestmentFinancing
        }
        "Madura" if snapshot.risk_band == RiskBand::Low => Product::CorporateInvestment,
        _ => Product::CorporateAccount,
    }
}

/// One-line commercial summary; empty when no company is loaded.
pub fn commercial_insight(snapshot: &CompanySnapshot) -> String {
    if !snapshot.is_loaded() {
        return String::new();
    }
    format!(
        "Empresa com risco {} e valor em aberto de R$ {}.",
        snapshot.risk_band,
        format_brl(snapshot.outstanding_value)
    )
}

/// Formats an amount with `pt-BR` grouping (`1234567.5` → `1.234.567,5`).
pub fn format_brl(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value.abs() * 100.0).round() / 100.0;
    let int_part = rounded.trunc() as u64;
    let cents = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let digits = int_part.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if value < 0.0 && (int_part > 0 || cents > 0) {
        out.push('-');
    }
    out.push_str(&grouped);
    if cents > 0 {
        let frac = format!("{cents:02}");
        out.push(',');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}
