//! Chart-ready series derived from the snapshot and the partner list.
//!
//! Everything here is a pure function; drawing lives in `ignis-render`.

use crate::partners::{Classification, PartnerRecord};
use crate::snapshot::{CompanySnapshot, RiskBand};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationCount {
    pub classification: Classification,
    pub count: usize,
}

/// Partners per classification, in the fixed order `[Critical, Important, Secondary]`.
/// Partners without a recognized classification are not counted.
pub fn classification_counts(partners: &[PartnerRecord]) -> [ClassificationCount; 3] {
    Classification::ALL.map(|classification| ClassificationCount {
        classification,
        count: partners
            .iter()
            .filter(|p| p.classification == Some(classification))
            .count(),
    })
}

/// The `n` heaviest partners, heaviest first. Ties keep their input order.
pub fn top_by_weight(partners: &[PartnerRecord], n: usize) -> Vec<&PartnerRecord> {
    let mut ranked: Vec<&PartnerRecord> = partners.iter().collect();
    // `sort_by` is stable; `total_cmp` keeps NaN from poisoning the order.
    ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    ranked.truncate(n);
    ranked
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RadarAxis {
    Revenue,
    Score,
    Provision,
    Risk,
}

impl RadarAxis {
    pub fn label(self) -> &'static str {
        match self {
            Self::Revenue => "Faturamento",
            Self::Score => "Score",
            Self::Provision => "PDD",
            Self::Risk => "Risco",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadarMetric {
    pub axis: RadarAxis,
    pub value: f64,
}

pub const RADAR_MAX: f64 = 100.0;

/// Four fixed radar axes on a 0..=100 scale (credit score is passed through unscaled).
pub fn radar_metrics(snapshot: &CompanySnapshot) -> [RadarMetric; 4] {
    let risk = match snapshot.risk_band {
        RiskBand::High => 80.0,
        RiskBand::Medium => 50.0,
        RiskBand::Low | RiskBand::Unknown => 20.0,
    };
    [
        RadarMetric {
            axis: RadarAxis::Revenue,
            value: (snapshot.outstanding_value / 1000.0).min(RADAR_MAX),
        },
        RadarMetric {
            axis: RadarAxis::Score,
            value: snapshot.credit_score.unwrap_or(0.0),
        },
        RadarMetric {
            axis: RadarAxis::Provision,
            value: (snapshot.provision_value / 1000.0).min(RADAR_MAX),
        },
        RadarMetric {
            axis: RadarAxis::Risk,
            value: risk,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionBars {
    pub bars: [Bar; 2],
    /// Upper bound of the value axis: 20% headroom over the tallest bar.
    pub domain_max: f64,
}

/// Outstanding value next to its loan-loss provision.
pub fn provision_bars(snapshot: &CompanySnapshot) -> ProvisionBars {
    let bars = [
        Bar {
            label: "VL_CAR",
            value: snapshot.outstanding_value,
        },
        Bar {
            label: "VL_PDD",
            value: snapshot.provision_value,
        },
    ];
    let max = bars.iter().map(|b| b.value).fold(0.0, f64::max);
    ProvisionBars {
        bars,
        domain_max: max * 1.2,
    }
}
