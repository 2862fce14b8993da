#![forbid(unsafe_code)]

//! Data model for the Ignis risk/commercial dashboard (headless).
//!
//! This crate owns everything that does not draw:
//! - CNPJ checksum validation ([`cnpj`])
//! - total normalization of the prediction payload ([`snapshot`], [`partners`])
//! - the transient partner graph consumed by the network renderer ([`network`])
//! - chart series derivations and product recommendation ([`charts`], [`recommend`])
//! - dashboard configuration ([`config`])

pub mod charts;
pub mod cnpj;
pub mod config;
pub mod error;
pub mod network;
pub mod partners;
pub mod recommend;
pub mod snapshot;
mod value;

pub use cnpj::Cnpj;
pub use config::IgnisConfig;
pub use error::{Error, Result};
pub use network::{GraphLink, GraphModel, GraphNode};
pub use partners::{Classification, PartnerNetwork, PartnerRecord, normalize_partners};
pub use snapshot::{CompanySnapshot, RiskBand, normalize};

/// Both halves of a successful prediction fetch, normalized together.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub snapshot: CompanySnapshot,
    pub network: PartnerNetwork,
}

impl Prediction {
    pub fn from_response(response: &serde_json::Value) -> Self {
        Self {
            snapshot: normalize(response),
            network: normalize_partners(response),
        }
    }
}
