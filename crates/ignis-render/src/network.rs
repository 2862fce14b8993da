//! Force-directed partner network with drag-to-pin and hover tooltip.

use crate::geom::{ScreenPoint, point, size};
use crate::style::{CENTRAL_NODE, LABEL, LINK, TOOLTIP_BACKGROUND, classification_color, short_label};
use crate::surface::{DrawSurface, PointerEvent, PointerKind, Shape, Style, Text, TextAnchor};
use crate::svg::fmt_number;
use ignis_core::{GraphModel, GraphNode, IgnisConfig, PartnerRecord};
use ignis_layout::{ForceOptions, Graph, Link, Node, Point, PositionTable, Simulation};

pub const CENTRAL_RADIUS: f64 = 14.0;
pub const CENTRAL_COLLIDE_RADIUS: f64 = 26.0;
pub const PARTNER_COLLIDE_RADIUS: f64 = 18.0;
/// Alpha target while a node is being dragged.
pub const DRAG_ALPHA_TARGET: f64 = 0.3;

const LINK_OPACITY: f64 = 0.7;
const LABEL_FONT_SIZE: f64 = 15.0;
const LABEL_DY: f64 = -16.0;
const TOOLTIP_FONT_SIZE: f64 = 11.0;
const TOOLTIP_LINE_HEIGHT: f64 = 14.0;
const TOOLTIP_PADDING: f64 = 6.0;

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkOptions {
    pub width: f64,
    pub height: f64,
    pub max_iterations: usize,
    pub central_label: String,
    pub link_distance: f64,
    pub charge_strength: f64,
    pub random_seed: u64,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        let forces = ForceOptions::default();
        Self {
            width: 360.0,
            height: 260.0,
            max_iterations: forces.max_iterations,
            central_label: "EMPRESA".to_string(),
            link_distance: forces.link_distance,
            charge_strength: forces.charge_strength,
            random_seed: forces.random_seed,
        }
    }
}

impl NetworkOptions {
    pub fn from_config(config: &IgnisConfig) -> Self {
        let (width, height) = config.network_viewport();
        Self {
            width,
            height,
            max_iterations: config.network_max_iterations(),
            central_label: config.central_label().to_string(),
            ..Self::default()
        }
    }

    fn force_options(&self) -> ForceOptions {
        ForceOptions {
            link_distance: self.link_distance,
            charge_strength: self.charge_strength,
            center: Point {
                x: self.width / 2.0,
                y: self.height / 2.0,
            },
            max_iterations: self.max_iterations,
            random_seed: self.random_seed,
            ..ForceOptions::default()
        }
    }
}

/// Drawn radius: central nodes are fixed, partners grow with weight up to a cap.
pub fn node_radius(node: &GraphNode) -> f64 {
    if node.is_central {
        return CENTRAL_RADIUS;
    }
    (10.0 + node.weight.unwrap_or(0.0) / 20.0).min(18.0)
}

pub fn link_width(weight: f64) -> f64 {
    (weight / 1000.0).max(0.5)
}

fn collide_radius(node: &GraphNode) -> f64 {
    if node.is_central {
        CENTRAL_COLLIDE_RADIUS
    } else {
        PARTNER_COLLIDE_RADIUS.max(node_radius(node) + 4.0)
    }
}

/// Lays out and draws the star graph of `central_id` and `partners`.
///
/// The surface is cleared first. With no partners the returned view is idle and the surface
/// stays blank. Each [`NetworkView::tick`] advances the layout one step and redraws.
pub fn render_network<S: DrawSurface>(
    mut surface: S,
    central_id: &str,
    partners: &[PartnerRecord],
    options: &NetworkOptions,
) -> NetworkView<S> {
    surface.clear();
    let model = GraphModel::build(central_id, partners);
    let sim = if model.is_empty() {
        None
    } else {
        let graph = Graph {
            nodes: model
                .nodes
                .iter()
                .map(|n| Node::new(n.id.clone(), collide_radius(n)))
                .collect(),
            links: model
                .links
                .iter()
                .map(|l| Link::new(l.source_id.clone(), l.target_id.clone()))
                .collect(),
        };
        match Simulation::new(&graph, options.force_options()) {
            Ok(sim) => Some(sim),
            Err(err) => {
                tracing::error!(%err, "partner graph rejected by the layout engine");
                None
            }
        }
    };
    tracing::debug!(
        central_id,
        nodes = model.nodes.len(),
        "network view created"
    );

    let mut view = NetworkView {
        surface,
        model,
        sim,
        options: options.clone(),
        dragging: None,
        hovered: None,
        disposed: false,
    };
    view.redraw();
    view
}

/// Live network rendering. Dropping the view disposes it.
pub struct NetworkView<S: DrawSurface> {
    surface: S,
    model: GraphModel,
    sim: Option<Simulation>,
    options: NetworkOptions,
    dragging: Option<usize>,
    hovered: Option<usize>,
    disposed: bool,
}

impl<S: DrawSurface> NetworkView<S> {
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn options(&self) -> &NetworkOptions {
        &self.options
    }

    pub fn positions(&self) -> Option<&PositionTable> {
        self.sim.as_ref().map(Simulation::positions)
    }

    pub fn position(&self, id: &str) -> Option<ScreenPoint> {
        let p = self.positions()?.position(id)?;
        Some(point(p.x, p.y))
    }

    pub fn is_idle(&self) -> bool {
        self.sim.is_none()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// `true` once the layout has stopped moving (idle and disposed views are settled).
    pub fn is_settled(&self) -> bool {
        self.disposed || self.sim.as_ref().is_none_or(|s| !s.is_running())
    }

    pub fn dragging(&self) -> Option<&GraphNode> {
        self.model.nodes.get(self.dragging?)
    }

    pub fn hovered(&self) -> Option<&GraphNode> {
        self.model.nodes.get(self.hovered?)
    }

    /// Applies pending pointer input, advances the layout one step and redraws.
    /// Returns `false` when the view is disposed, idle, or settled.
    pub fn tick(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        for event in self.surface.take_pointer_events() {
            self.handle_pointer(event);
        }
        if let Some(sim) = self.sim.as_mut() {
            sim.step();
        }
        self.redraw();
        !self.is_settled()
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if self.disposed || self.sim.is_none() {
            return;
        }
        let (x, y) = (event.position.x, event.position.y);
        match event.kind {
            PointerKind::Down => {
                let Some(idx) = self.hit_test(event.position) else {
                    return;
                };
                let id = self.model.nodes[idx].id.clone();
                if let Some(sim) = self.sim.as_mut() {
                    let current = sim.positions().position(&id).unwrap_or(Point { x, y });
                    sim.set_alpha_target(DRAG_ALPHA_TARGET);
                    sim.restart();
                    sim.pin(&id, current.x, current.y);
                }
                self.dragging = Some(idx);
                self.hovered = Some(idx);
            }
            PointerKind::Move => match self.dragging {
                Some(idx) => {
                    let id = &self.model.nodes[idx].id;
                    if let Some(sim) = self.sim.as_mut() {
                        sim.pin(id, x, y);
                    }
                }
                None => self.hovered = self.hit_test(event.position),
            },
            PointerKind::Up => self.release_drag(),
            PointerKind::Leave => {
                // Losing the pointer ends a drag so no node stays pinned for good.
                self.release_drag();
                self.hovered = None;
            }
        }
    }

    /// Stops ticking and clears the surface. Further ticks change nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if let Some(sim) = self.sim.as_mut() {
            sim.stop();
        }
        self.dragging = None;
        self.hovered = None;
        self.surface.clear();
        tracing::debug!("network view disposed");
    }

    fn release_drag(&mut self) {
        let Some(idx) = self.dragging.take() else {
            return;
        };
        let id = &self.model.nodes[idx].id;
        if let Some(sim) = self.sim.as_mut() {
            sim.set_alpha_target(0.0);
            sim.unpin(id);
        }
    }

    /// Topmost node under `p`; later nodes are drawn above earlier ones.
    fn hit_test(&self, p: ScreenPoint) -> Option<usize> {
        let positions = self.positions()?;
        self.model.nodes.iter().enumerate().rev().find_map(|(i, n)| {
            let s = positions.state(i)?;
            let r = node_radius(n);
            let (dx, dy) = (s.x - p.x, s.y - p.y);
            (dx * dx + dy * dy <= r * r).then_some(i)
        })
    }

    fn redraw(&mut self) {
        self.surface.clear();
        let Some(sim) = self.sim.as_ref() else {
            return;
        };
        let positions = sim.positions();
        let at = |id: &str| positions.position(id).map(|p| point(p.x, p.y));

        for l in &self.model.links {
            let (Some(from), Some(to)) = (at(&l.source_id), at(&l.target_id)) else {
                continue;
            };
            let style = Style::stroked(LINK, link_width(l.weight)).with_stroke_opacity(LINK_OPACITY);
            self.surface.draw_shape(Shape::Line { from, to }, &style);
        }

        for n in &self.model.nodes {
            let Some(center) = at(&n.id) else {
                continue;
            };
            let fill = if n.is_central {
                CENTRAL_NODE
            } else {
                classification_color(n.classification)
            };
            let style = Style::filled(fill)
                .with_cursor("grab")
                .with_title(tooltip_lines(n).join("\n"))
                .with_key(n.id.clone());
            self.surface.draw_shape(
                Shape::Circle {
                    center,
                    radius: node_radius(n),
                },
                &style,
            );
        }

        for n in &self.model.nodes {
            let Some(anchor) = at(&n.id) else {
                continue;
            };
            let label = if n.is_central {
                self.options.central_label.clone()
            } else {
                short_label(&n.id)
            };
            self.surface.draw_text(
                Text::new(label, anchor)
                    .with_dy(LABEL_DY)
                    .with_font_size(LABEL_FONT_SIZE)
                    .with_fill(LABEL),
            );
        }

        if let Some(n) = self.hovered.and_then(|i| self.model.nodes.get(i)) {
            if let Some(anchor) = at(&n.id) {
                draw_tooltip(&mut self.surface, n, anchor);
            }
        }
    }
}

impl<S: DrawSurface> Drop for NetworkView<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<S: DrawSurface> std::fmt::Debug for NetworkView<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkView")
            .field("nodes", &self.model.nodes.len())
            .field("settled", &self.is_settled())
            .field("disposed", &self.disposed)
            .finish()
    }
}

fn tooltip_lines(n: &GraphNode) -> Vec<String> {
    if n.is_central {
        return vec![n.id.clone()];
    }
    vec![
        n.id.clone(),
        format!("Peso: {}", fmt_number(n.weight.unwrap_or(0.0))),
        format!(
            "Classificação: {}",
            n.classification.map(|c| c.label()).unwrap_or("-")
        ),
    ]
}

fn draw_tooltip<S: DrawSurface + ?Sized>(surface: &mut S, n: &GraphNode, anchor: ScreenPoint) {
    let lines = tooltip_lines(n);
    let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f64;
    let width = widest * TOOLTIP_FONT_SIZE * 0.6 + 2.0 * TOOLTIP_PADDING;
    let height = lines.len() as f64 * TOOLTIP_LINE_HEIGHT + 2.0 * TOOLTIP_PADDING;
    let origin = point(anchor.x + node_radius(n) + 4.0, anchor.y - height / 2.0);

    surface.draw_shape(
        Shape::Rect {
            origin,
            size: size(width, height),
        },
        &Style::filled(TOOLTIP_BACKGROUND).with_key("tooltip"),
    );
    for (i, line) in lines.into_iter().enumerate() {
        let baseline = origin.y + TOOLTIP_PADDING + (i as f64 + 1.0) * TOOLTIP_LINE_HEIGHT - 3.0;
        surface.draw_text(
            Text::new(line, point(origin.x + TOOLTIP_PADDING, baseline))
                .with_font_size(TOOLTIP_FONT_SIZE)
                .with_fill(LABEL)
                .with_anchor(TextAnchor::Start),
        );
    }
}
