/// Surface pixel space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSpace;

/// Longitude/latitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoSpace;

pub type ScreenPoint = euclid::Point2D<f64, ScreenSpace>;
pub type ScreenSize = euclid::Size2D<f64, ScreenSpace>;
pub type LonLat = euclid::Point2D<f64, GeoSpace>;

pub fn point(x: f64, y: f64) -> ScreenPoint {
    euclid::point2(x, y)
}

pub fn size(width: f64, height: f64) -> ScreenSize {
    euclid::size2(width, height)
}

pub fn lon_lat(lon: f64, lat: f64) -> LonLat {
    euclid::point2(lon, lat)
}
