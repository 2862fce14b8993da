//! Summary chart widgets. Each one clears the surface and fills its full size.

use crate::geom::{ScreenPoint, point, size};
use crate::style::{
    ACCENT, GRID, LABEL, OUTSTANDING_BAR, classification_color, short_label,
};
use crate::surface::{DrawSurface, Shape, Style, Text, TextAnchor};
use crate::svg::fmt_number;
use ignis_core::charts::{
    ClassificationCount, ProvisionBars, RADAR_MAX, RadarMetric, classification_counts,
    provision_bars, radar_metrics, top_by_weight,
};
use ignis_core::{CompanySnapshot, PartnerRecord};
use std::f64::consts::TAU;

const PADDING: f64 = 10.0;
const TOP_N: usize = 5;
const FONT_SIZE: f64 = 12.0;

/// Angle 0 points up; y grows downward.
fn polar(center: ScreenPoint, radius: f64, angle: f64) -> ScreenPoint {
    point(
        center.x + radius * angle.sin(),
        center.y - radius * angle.cos(),
    )
}

fn xy(p: ScreenPoint) -> String {
    format!("{},{}", fmt_number(p.x), fmt_number(p.y))
}

fn annular_sector(c: ScreenPoint, outer: f64, inner: f64, start: f64, end: f64) -> String {
    let large = if end - start > std::f64::consts::PI { 1 } else { 0 };
    let (o0, o1) = (polar(c, outer, start), polar(c, outer, end));
    let (i0, i1) = (polar(c, inner, start), polar(c, inner, end));
    let (ro, ri) = (fmt_number(outer), fmt_number(inner));
    format!(
        "M{}A{ro},{ro},0,{large},1,{}L{}A{ri},{ri},0,{large},0,{}Z",
        xy(o0),
        xy(o1),
        xy(i1),
        xy(i0)
    )
}

/// Donut of partners per classification. Draws nothing when no partner is classified.
pub fn render_classification_donut(surface: &mut dyn DrawSurface, partners: &[PartnerRecord]) {
    surface.clear();
    let counts = classification_counts(partners);
    let total: usize = counts.iter().map(|c| c.count).sum();
    if total == 0 {
        return;
    }

    let area = surface.size();
    let center = point(area.width / 2.0, area.height / 2.0);
    let outer = (area.width.min(area.height) / 2.0 - PADDING).max(1.0);
    let inner = outer * 0.6;

    let mut start = 0.0;
    for ClassificationCount {
        classification,
        count,
    } in counts.into_iter().filter(|c| c.count > 0)
    {
        let delta = count as f64 / total as f64 * TAU;
        let end = start + delta;
        let style = Style::filled(classification_color(Some(classification)))
            .with_title(format!("{classification}: {count}"))
            .with_key(classification.label());
        if count == total {
            // A single full ring: two halves, since one arc cannot close on itself.
            for (a, b) in [(0.0, TAU / 2.0), (TAU / 2.0, TAU)] {
                surface.draw_shape(Shape::Path(annular_sector(center, outer, inner, a, b)), &style);
            }
        } else {
            surface.draw_shape(
                Shape::Path(annular_sector(center, outer, inner, start, end)),
                &style,
            );
        }
        surface.draw_text(
            Text::new(
                count.to_string(),
                polar(center, (outer + inner) / 2.0, (start + end) / 2.0),
            )
            .with_font_size(FONT_SIZE)
            .with_fill(LABEL)
            .bold(),
        );
        start = end;
    }
}

/// Horizontal bars for the heaviest partners, heaviest on top.
pub fn render_top_partners(surface: &mut dyn DrawSurface, partners: &[PartnerRecord]) {
    surface.clear();
    let top = top_by_weight(partners, TOP_N);
    if top.is_empty() {
        return;
    }

    let area = surface.size();
    let label_width = 40.0;
    let plot_width = (area.width - label_width - 2.0 * PADDING).max(0.0);
    let slot = (area.height - 2.0 * PADDING) / TOP_N as f64;
    let bar_height = slot * 0.7;
    let max = top.iter().map(|p| p.weight).fold(0.0, f64::max);

    for (i, p) in top.iter().enumerate() {
        let y = PADDING + i as f64 * slot;
        let width = if max > 0.0 {
            p.weight / max * plot_width
        } else {
            0.0
        };
        surface.draw_shape(
            Shape::Rect {
                origin: point(PADDING + label_width, y),
                size: size(width, bar_height),
            },
            &Style::filled(classification_color(p.classification))
                .with_title(format!("{}: {}", p.id, fmt_number(p.weight)))
                .with_key(p.id.clone()),
        );
        surface.draw_text(
            Text::new(
                short_label(&p.id),
                point(PADDING + label_width - 4.0, y + bar_height / 2.0 + FONT_SIZE / 3.0),
            )
            .with_font_size(FONT_SIZE)
            .with_fill(LABEL)
            .with_anchor(TextAnchor::End),
        );
    }
}

/// Radar polygon over the four fixed axes on a 0..=100 grid.
pub fn render_radar(surface: &mut dyn DrawSurface, snapshot: &CompanySnapshot) {
    surface.clear();
    let metrics = radar_metrics(snapshot);
    let area = surface.size();
    let center = point(area.width / 2.0, area.height / 2.0);
    let radius = (area.width.min(area.height) / 2.0 - 3.0 * PADDING).max(1.0);
    let step = TAU / metrics.len() as f64;

    let ring = |fraction: f64| -> String {
        let mut d = String::new();
        for i in 0..metrics.len() {
            d.push(if i == 0 { 'M' } else { 'L' });
            d.push_str(&xy(polar(center, radius * fraction, i as f64 * step)));
        }
        d.push('Z');
        d
    };

    let grid = Style::stroked(GRID, 1.0);
    for level in 1..=4 {
        surface.draw_shape(Shape::Path(ring(level as f64 / 4.0)), &grid);
    }
    for (i, RadarMetric { axis, .. }) in metrics.iter().enumerate() {
        let angle = i as f64 * step;
        surface.draw_shape(
            Shape::Line {
                from: center,
                to: polar(center, radius, angle),
            },
            &grid,
        );
        surface.draw_text(
            Text::new(axis.label(), polar(center, radius + 14.0, angle))
                .with_font_size(FONT_SIZE)
                .with_fill(LABEL),
        );
    }

    let mut d = String::new();
    for (i, m) in metrics.iter().enumerate() {
        let r = m.value.clamp(0.0, RADAR_MAX) / RADAR_MAX * radius;
        d.push(if i == 0 { 'M' } else { 'L' });
        d.push_str(&xy(polar(center, r, i as f64 * step)));
    }
    d.push('Z');
    surface.draw_shape(
        Shape::Path(d),
        &Style::stroked(OUTSTANDING_BAR, 2.0).with_key("radar"),
    );
}

/// Outstanding value next to its provision, on a value axis with 20% headroom.
pub fn render_provision_bars(surface: &mut dyn DrawSurface, snapshot: &CompanySnapshot) {
    surface.clear();
    let ProvisionBars { bars, domain_max } = provision_bars(snapshot);
    let area = surface.size();
    let baseline = area.height - 2.0 * PADDING - FONT_SIZE;
    let plot_height = (baseline - PADDING).max(0.0);
    let slot = (area.width - 2.0 * PADDING) / bars.len() as f64;
    let bar_width = slot * 0.6;

    for (i, (bar, color)) in bars.iter().zip([OUTSTANDING_BAR, ACCENT]).enumerate() {
        let h = if domain_max > 0.0 {
            bar.value / domain_max * plot_height
        } else {
            0.0
        };
        let x = PADDING + i as f64 * slot + (slot - bar_width) / 2.0;
        surface.draw_shape(
            Shape::Rect {
                origin: point(x, baseline - h),
                size: size(bar_width, h),
            },
            &Style::filled(color)
                .with_title(format!("{}: {}", bar.label, fmt_number(bar.value)))
                .with_key(bar.label),
        );
        surface.draw_text(
            Text::new(bar.label, point(x + bar_width / 2.0, baseline + FONT_SIZE + 4.0))
                .with_font_size(FONT_SIZE)
                .with_fill(LABEL),
        );
    }
}
