//! Role-gated dashboard views.
//!
//! A view owns one surface per widget and re-runs a renderer only when that renderer's input
//! changed: the state code for the map, the company id plus partner list for the network, the
//! snapshot plus partners for the charts.

use crate::auth::{AuthContext, Role};
use crate::error::Result;
use crate::geo_source::{PolygonSource, load_regions};
use ignis_core::recommend::{self, Product};
use ignis_core::{CompanySnapshot, IgnisConfig, PartnerRecord, Prediction};
use ignis_render::charts::{
    render_classification_donut, render_provision_bars, render_radar, render_top_partners,
};
use ignis_render::{
    DrawSurface, MapOptions, NetworkOptions, NetworkView, SvgSurface, render_map, render_network,
};

const CHART_WIDTH: f64 = 320.0;
const CHART_HEIGHT: f64 = 220.0;

/// How many times each renderer actually ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderCounts {
    pub map: usize,
    pub network: usize,
    pub charts: usize,
}

/// Choropleth map widget; the polygon dataset is loaded on every re-render, never cached.
#[derive(Debug)]
pub struct MapView {
    surface: SvgSurface,
    options: MapOptions,
    region_property: String,
    shown: Option<String>,
}

impl MapView {
    pub fn new(config: &IgnisConfig) -> Self {
        let options = MapOptions::from_config(config);
        Self {
            surface: SvgSurface::new(options.width, options.height),
            options,
            region_property: config.region_property().to_string(),
            shown: None,
        }
    }

    pub fn surface(&self) -> &SvgSurface {
        &self.surface
    }

    /// Shows `state_code`; returns `true` if the map was redrawn.
    ///
    /// A dataset that fails to load is logged and leaves the map blank; the next call retries.
    pub async fn show<P: PolygonSource>(&mut self, source: &P, state_code: &str) -> bool {
        if self.shown.as_deref() == Some(state_code) {
            return false;
        }
        if state_code.is_empty() {
            self.surface.clear();
            self.shown = Some(String::new());
            return true;
        }
        match load_regions(source, &self.region_property).await {
            Ok(regions) => {
                render_map(&mut self.surface, state_code, &regions, &self.options);
                self.shown = Some(state_code.to_string());
            }
            Err(err) => {
                tracing::error!(%err, state_code, "region polygons unavailable, map left blank");
                self.surface.clear();
                self.shown = None;
            }
        }
        true
    }
}

#[derive(Debug)]
struct ChartSurfaces {
    classification: SvgSurface,
    top_partners: SvgSurface,
    radar: SvgSurface,
    provision: SvgSurface,
}

impl ChartSurfaces {
    fn new() -> Self {
        let blank = || SvgSurface::new(CHART_WIDTH, CHART_HEIGHT);
        Self {
            classification: blank(),
            top_partners: blank(),
            radar: blank(),
            provision: blank(),
        }
    }
}

/// Risk dashboard: map, partner network, charts and the fraud notice.
#[derive(Debug)]
pub struct RiskView {
    map: MapView,
    network: NetworkView<SvgSurface>,
    network_options: NetworkOptions,
    network_input: Option<(String, Vec<PartnerRecord>)>,
    charts: ChartSurfaces,
    chart_input: Option<(CompanySnapshot, Vec<PartnerRecord>)>,
    fraud_notice: Option<String>,
    counts: RenderCounts,
}

impl RiskView {
    pub fn new(auth: &AuthContext, config: &IgnisConfig) -> Result<Self> {
        auth.require(Role::Risk, "risk")?;
        let network_options = NetworkOptions::from_config(config);
        Ok(Self {
            map: MapView::new(config),
            network: idle_network(&network_options),
            network_options,
            network_input: None,
            charts: ChartSurfaces::new(),
            chart_input: None,
            fraud_notice: None,
            counts: RenderCounts::default(),
        })
    }

    pub async fn update<P: PolygonSource>(&mut self, prediction: &Prediction, polygons: &P) {
        let snapshot = &prediction.snapshot;
        let partners: &[PartnerRecord] = if snapshot.is_loaded() {
            &prediction.network.partners
        } else {
            &[]
        };

        if self.map.show(polygons, &snapshot.state_code).await {
            self.counts.map += 1;
        }

        let network_input = (snapshot.id.clone(), partners.to_vec());
        if self.network_input.as_ref() != Some(&network_input) {
            // Replacing the view drops, and so disposes, the previous simulation.
            self.network = render_network(
                SvgSurface::new(self.network_options.width, self.network_options.height),
                &snapshot.id,
                partners,
                &self.network_options,
            );
            self.network_input = Some(network_input);
            self.counts.network += 1;
        }

        let chart_input = (snapshot.clone(), partners.to_vec());
        if self.chart_input.as_ref() != Some(&chart_input) {
            let c = &mut self.charts;
            if snapshot.is_loaded() {
                render_classification_donut(&mut c.classification, partners);
                render_top_partners(&mut c.top_partners, partners);
                render_radar(&mut c.radar, snapshot);
                render_provision_bars(&mut c.provision, snapshot);
            } else {
                c.classification.clear();
                c.top_partners.clear();
                c.radar.clear();
                c.provision.clear();
            }
            self.chart_input = Some(chart_input);
            self.counts.charts += 1;
        }

        self.fraud_notice = snapshot
            .has_fraud_alert()
            .then(|| snapshot.fraud_alert.clone());
    }

    pub fn map(&self) -> &SvgSurface {
        self.map.surface()
    }

    pub fn network(&self) -> &NetworkView<SvgSurface> {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut NetworkView<SvgSurface> {
        &mut self.network
    }

    pub fn classification_chart(&self) -> &SvgSurface {
        &self.charts.classification
    }

    pub fn top_partners_chart(&self) -> &SvgSurface {
        &self.charts.top_partners
    }

    pub fn radar_chart(&self) -> &SvgSurface {
        &self.charts.radar
    }

    pub fn provision_chart(&self) -> &SvgSurface {
        &self.charts.provision
    }

    /// Text of the fraud alert modal, when the company carries one.
    pub fn fraud_notice(&self) -> Option<&str> {
        self.fraud_notice.as_deref()
    }

    pub fn render_counts(&self) -> RenderCounts {
        self.counts
    }

    /// Every widget serialized as a standalone SVG document, by widget name.
    pub fn svg_documents(&self) -> Vec<(&'static str, String)> {
        vec![
            ("map", self.map().to_svg_string()),
            ("network", self.network.surface().to_svg_string()),
            ("classification", self.charts.classification.to_svg_string()),
            ("top-partners", self.charts.top_partners.to_svg_string()),
            ("radar", self.charts.radar.to_svg_string()),
            ("provision", self.charts.provision.to_svg_string()),
        ]
    }
}

fn idle_network(options: &NetworkOptions) -> NetworkView<SvgSurface> {
    render_network(SvgSurface::new(options.width, options.height), "", &[], options)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

/// Commercial dashboard: map, headline metrics, insight line and product recommendation.
#[derive(Debug)]
pub struct CommercialView {
    map: MapView,
    snapshot: Option<CompanySnapshot>,
    metrics: Vec<Metric>,
    insight: String,
    recommendation: Option<Product>,
    counts: RenderCounts,
}

impl CommercialView {
    pub fn new(auth: &AuthContext, config: &IgnisConfig) -> Result<Self> {
        auth.require(Role::Commercial, "commercial")?;
        Ok(Self {
            map: MapView::new(config),
            snapshot: None,
            metrics: Vec::new(),
            insight: String::new(),
            recommendation: None,
            counts: RenderCounts::default(),
        })
    }

    pub async fn update<P: PolygonSource>(&mut self, snapshot: &CompanySnapshot, polygons: &P) {
        if self.map.show(polygons, &snapshot.state_code).await {
            self.counts.map += 1;
        }
        if self.snapshot.as_ref() == Some(snapshot) {
            return;
        }
        self.snapshot = Some(snapshot.clone());
        self.counts.charts += 1;

        if !snapshot.is_loaded() {
            self.metrics.clear();
            self.insight.clear();
            self.recommendation = None;
            return;
        }
        self.metrics = commercial_metrics(snapshot);
        self.insight = recommend::commercial_insight(snapshot);
        self.recommendation = Some(recommend::recommend_product(snapshot));
    }

    pub fn map(&self) -> &SvgSurface {
        self.map.surface()
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn insight(&self) -> &str {
        &self.insight
    }

    pub fn recommendation(&self) -> Option<Product> {
        self.recommendation
    }

    pub fn render_counts(&self) -> RenderCounts {
        self.counts
    }
}

fn commercial_metrics(s: &CompanySnapshot) -> Vec<Metric> {
    let brl = |v: f64| format!("R$ {}", recommend::format_brl(v));
    vec![
        Metric {
            label: "Saldo",
            value: brl(s.balance_value),
        },
        Metric {
            label: "Faturamento",
            value: brl(s.revenue_value),
        },
        Metric {
            label: "Valor em aberto",
            value: brl(s.outstanding_value),
        },
        Metric {
            label: "Faixa de risco",
            value: s.risk_band.to_string(),
        },
        Metric {
            label: "Score",
            value: s
                .credit_score
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string()),
        },
        Metric {
            label: "PDD",
            value: s.provision_percent.clone(),
        },
    ]
}
