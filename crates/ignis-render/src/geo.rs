//! Choropleth map: GeoJSON regions fitted into the viewport with a Mercator projection, one
//! region highlighted by its code.

use crate::Result;
use crate::geom::{LonLat, ScreenPoint, lon_lat, point};
use crate::style::{ACCENT, LABEL};
use crate::surface::{DrawSurface, Shape, Style, Text};
use crate::svg::fmt_number;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Beyond this latitude Mercator diverges; inputs are clamped.
const MERCATOR_MAX_LAT_DEG: f64 = 85.051_128_779_806_59;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
    #[serde(other)]
    Unsupported,
}

/// A closed ring of lon/lat vertices. The first ring of a polygon is its outline; the rest are
/// holes.
pub type Ring = Vec<LonLat>;

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Value of the region-code property, if the feature had one.
    pub code: Option<String>,
    pub polygons: Vec<Vec<Ring>>,
}

/// Immutable set of region outlines, loaded once per render call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionPolygonSet {
    pub regions: Vec<Region>,
}

impl RegionPolygonSet {
    pub fn from_geojson_str(text: &str, region_property: &str) -> Result<Self> {
        let fc: FeatureCollection = serde_json::from_str(text)?;
        Ok(Self::from_features(fc, region_property))
    }

    pub fn from_value(value: &Value, region_property: &str) -> Result<Self> {
        let fc = FeatureCollection::deserialize(value)?;
        Ok(Self::from_features(fc, region_property))
    }

    fn from_features(fc: FeatureCollection, region_property: &str) -> Self {
        let regions = fc
            .features
            .into_iter()
            .filter_map(|f| {
                let polygons = match f.geometry? {
                    Geometry::Polygon { coordinates } => vec![rings(&coordinates)],
                    Geometry::MultiPolygon { coordinates } => {
                        coordinates.iter().map(|p| rings(p)).collect()
                    }
                    Geometry::Unsupported => return None,
                };
                let code = f
                    .properties
                    .as_ref()
                    .and_then(|p| p.get(region_property))
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Some(Region { code, polygons })
            })
            .collect();
        Self { regions }
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn find(&self, code: &str) -> Option<&Region> {
        self.regions
            .iter()
            .find(|r| r.code.as_deref() == Some(code))
    }

    fn vertices(&self) -> impl Iterator<Item = &LonLat> {
        self.regions
            .iter()
            .flat_map(|r| r.polygons.iter())
            .flat_map(|p| p.iter())
            .flat_map(|ring| ring.iter())
    }
}

fn rings(polygon: &[Vec<Vec<f64>>]) -> Vec<Ring> {
    polygon
        .iter()
        .map(|ring| {
            ring.iter()
                .filter_map(|pos| match pos.as_slice() {
                    [lon, lat, ..] if lon.is_finite() && lat.is_finite() => {
                        Some(lon_lat(*lon, *lat))
                    }
                    _ => None,
                })
                .collect()
        })
        .collect()
}

/// Spherical Mercator in radians, y growing downward.
fn mercator(p: LonLat) -> (f64, f64) {
    let lat = p
        .y
        .clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG)
        .to_radians();
    let y = (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln();
    (p.x.to_radians(), -y)
}

/// Mercator projection scaled and translated so a bounding box fits a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedMercator {
    scale: f64,
    translate: (f64, f64),
}

impl FittedMercator {
    /// Fits every vertex of `set` into `width × height`, centered, aspect preserved.
    /// Returns `None` when the set has no vertices.
    pub fn fit_size(set: &RegionPolygonSet, width: f64, height: f64) -> Option<Self> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for v in set.vertices() {
            let (x, y) = mercator(*v);
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
        let (x0, y0, x1, y1) = bounds?;
        let (dx, dy) = (x1 - x0, y1 - y0);
        let scale = match (dx > 0.0, dy > 0.0) {
            (true, true) => (width / dx).min(height / dy),
            (true, false) => width / dx,
            (false, true) => height / dy,
            (false, false) => 1.0,
        };
        Some(Self {
            scale,
            translate: (
                (width - scale * (x0 + x1)) / 2.0,
                (height - scale * (y0 + y1)) / 2.0,
            ),
        })
    }

    pub fn project(&self, p: LonLat) -> ScreenPoint {
        let (x, y) = mercator(p);
        point(
            self.scale * x + self.translate.0,
            self.scale * y + self.translate.1,
        )
    }

    /// SVG path data for all polygons of a region.
    pub fn path(&self, region: &Region) -> String {
        let mut d = String::new();
        for ring in region.polygons.iter().flatten() {
            for (i, v) in ring.iter().enumerate() {
                let p = self.project(*v);
                d.push(if i == 0 { 'M' } else { 'L' });
                d.push_str(&fmt_number(p.x));
                d.push(',');
                d.push_str(&fmt_number(p.y));
            }
            if !ring.is_empty() {
                d.push('Z');
            }
        }
        d
    }

    /// Planar area-weighted centroid of the projected region; holes subtract.
    pub fn centroid(&self, region: &Region) -> Option<ScreenPoint> {
        let (mut area, mut cx, mut cy) = (0.0, 0.0, 0.0);
        let (mut n, mut sx, mut sy) = (0usize, 0.0, 0.0);
        for polygon in &region.polygons {
            for (ring_idx, ring) in polygon.iter().enumerate() {
                let pts: Vec<ScreenPoint> = ring.iter().map(|v| self.project(*v)).collect();
                let (a, rx, ry) = ring_moments(&pts);
                // Outline counts positive, holes negative, whatever the winding.
                let sign = (if ring_idx == 0 { 1.0 } else { -1.0 }) * a.signum();
                area += sign * a;
                cx += sign * rx;
                cy += sign * ry;
                for p in &pts {
                    n += 1;
                    sx += p.x;
                    sy += p.y;
                }
            }
        }
        if area.abs() > f64::EPSILON {
            return Some(point(cx / (3.0 * area), cy / (3.0 * area)));
        }
        (n > 0).then(|| point(sx / n as f64, sy / n as f64))
    }
}

/// Shoelace sums: twice the signed area and the centroid numerators.
fn ring_moments(pts: &[ScreenPoint]) -> (f64, f64, f64) {
    let (mut a, mut cx, mut cy) = (0.0, 0.0, 0.0);
    if pts.len() < 3 {
        return (a, cx, cy);
    }
    for (i, p) in pts.iter().enumerate() {
        let q = pts[(i + 1) % pts.len()];
        let cross = p.x * q.y - q.x * p.y;
        a += cross;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    (a, cx, cy)
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub width: f64,
    pub height: f64,
    pub outline_width: f64,
    pub highlight_outline_width: f64,
    pub label_font_size: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 250.0,
            outline_width: 1.5,
            highlight_outline_width: 2.0,
            label_font_size: 14.0,
        }
    }
}

impl MapOptions {
    pub fn from_config(config: &ignis_core::IgnisConfig) -> Self {
        let (width, height) = config.map_viewport();
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

/// Draws every region outline and highlights the one whose code equals `state_code`.
///
/// The surface is always cleared first. An empty `state_code` leaves it blank; a code that
/// matches no region draws the outlines without a highlight.
pub fn render_map(
    surface: &mut dyn DrawSurface,
    state_code: &str,
    polygons: &RegionPolygonSet,
    options: &MapOptions,
) {
    surface.clear();
    if state_code.is_empty() {
        return;
    }
    let Some(projection) = FittedMercator::fit_size(polygons, options.width, options.height)
    else {
        tracing::debug!("map has no drawable regions");
        return;
    };

    let outline = Style::stroked(ACCENT, options.outline_width);
    for region in &polygons.regions {
        let mut style = outline.clone();
        if let Some(code) = &region.code {
            style = style.with_key(code.clone());
        }
        surface.draw_shape(Shape::Path(projection.path(region)), &style);
    }

    let Some(region) = polygons.find(state_code) else {
        tracing::debug!(state_code, "no region matches the state code");
        return;
    };
    let highlight = Style::filled(ACCENT)
        .with_stroke(ACCENT, options.highlight_outline_width)
        .with_key(state_code);
    surface.draw_shape(Shape::Path(projection.path(region)), &highlight);
    if let Some(c) = projection.centroid(region) {
        surface.draw_text(
            Text::new(state_code, c)
                .with_font_size(options.label_font_size)
                .with_fill(LABEL)
                .bold(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(lon0: f64, lat0: f64, side: f64) -> Region {
        Region {
            code: Some("SQ".to_string()),
            polygons: vec![vec![vec![
                lon_lat(lon0, lat0),
                lon_lat(lon0 + side, lat0),
                lon_lat(lon0 + side, lat0 + side),
                lon_lat(lon0, lat0 + side),
            ]]],
        }
    }

    #[test]
    fn fit_centers_the_bounds() {
        let set = RegionPolygonSet {
            regions: vec![square(-50.0, -10.0, 10.0)],
        };
        let proj = FittedMercator::fit_size(&set, 400.0, 250.0).expect("fit");
        let c = proj.centroid(&set.regions[0]).expect("centroid");
        assert!((c.x - 200.0).abs() < 1e-6);
        assert!((c.y - 125.0).abs() < 1.0);
    }

    #[test]
    fn hole_pulls_the_centroid_away() {
        let mut region = square(0.0, 0.0, 10.0);
        region.polygons[0].push(vec![
            lon_lat(0.0, 0.0),
            lon_lat(5.0, 0.0),
            lon_lat(5.0, 10.0),
            lon_lat(0.0, 10.0),
        ]);
        let set = RegionPolygonSet {
            regions: vec![square(0.0, 0.0, 10.0)],
        };
        let proj = FittedMercator::fit_size(&set, 100.0, 100.0).expect("fit");
        let full = proj.centroid(&set.regions[0]).expect("centroid");
        let holed = proj.centroid(&region).expect("centroid");
        assert!(holed.x > full.x);
    }

    #[test]
    fn empty_set_has_no_projection() {
        assert!(FittedMercator::fit_size(&RegionPolygonSet::default(), 10.0, 10.0).is_none());
    }
}
