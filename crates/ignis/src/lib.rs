#![forbid(unsafe_code)]

//! `ignis` is the headless engine behind the Ignis risk/commercial dashboard.
//!
//! Given a CNPJ it fetches a prediction payload from the scoring service, normalizes it, and
//! renders the dashboard widgets onto [`render::DrawSurface`]s:
//! - a choropleth map highlighting the company's state,
//! - the force-directed partner network (drag to pin, hover for details),
//! - summary charts and, for the commercial role, a product recommendation.
//!
//! The library is runtime-agnostic (`futures`); the HTTP sources use `reqwest`, which needs a
//! Tokio runtime when actually polled.

pub mod animate;
pub mod auth;
pub mod client;
pub mod error;
pub mod geo_source;
pub mod session;
pub mod views;

pub use ignis_core::{
    Classification, Cnpj, CompanySnapshot, GraphLink, GraphModel, GraphNode, IgnisConfig,
    PartnerNetwork, PartnerRecord, Prediction, RiskBand, charts, cnpj, config, normalize,
    normalize_partners, recommend,
};

pub use animate::animate;
pub use auth::{AuthContext, Role};
pub use client::{PredictionClient, PredictionSource};
pub use error::{Error, Result};
pub use geo_source::{FilePolygonSource, HttpPolygonSource, PolygonSource, load_regions};
pub use session::{Applied, Session, Submission};
pub use views::{CommercialView, MapView, RenderCounts, RiskView};

pub mod render {
    pub use ignis_render::charts;
    pub use ignis_render::geo::{FittedMercator, Region};
    pub use ignis_render::geom;
    pub use ignis_render::style;
    pub use ignis_render::{
        DrawSurface, Element, MapOptions, NetworkOptions, NetworkView, PointerEvent, PointerKind,
        RegionPolygonSet, Shape, Style, SvgSurface, Text, TextAnchor, render_map, render_network,
    };
}
