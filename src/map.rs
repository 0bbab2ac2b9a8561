//! Map viewport projection and tile source metadata.
//!
//! The terminal map is an equirectangular projection of the viewport bounds onto the
//! character grid. A terminal cell is roughly twice as tall as it is wide, which the
//! latitude span accounts for.

use ratatui::layout::Rect;

pub const DEFAULT_CENTER: (f64, f64) = (20.932185, 77.757218);
pub const DEFAULT_ZOOM: u8 = 12;

/// XYZ raster tile provider.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSource {
    pub template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl Default for TileSource {
    fn default() -> Self {
        Self {
            template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
            max_zoom: 19,
        }
    }
}

impl TileSource {
    /// URL of the tile containing a coordinate (Web Mercator slippy-map numbering).
    pub fn tile_url(&self, lat: f64, lng: f64, zoom: u8) -> String {
        let zoom = zoom.min(self.max_zoom);
        let n = f64::from(1u32 << zoom);
        let max_index = n - 1.0;
        let x = ((lng + 180.0) / 360.0 * n).floor().clamp(0.0, max_index);
        let lat_rad = lat.clamp(-85.0511, 85.0511).to_radians();
        let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * n)
            .floor()
            .clamp(0.0, max_index);

        self.template
            .replace("{s}", "a")
            .replace("{z}", &zoom.to_string())
            .replace("{x}", &(x as u32).to_string())
            .replace("{y}", &(y as u32).to_string())
    }
}

/// Visible region of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
    max_zoom: u8,
}

impl MapViewport {
    pub fn new(max_zoom: u8) -> Self {
        Self {
            center_lat: DEFAULT_CENTER.0,
            center_lng: DEFAULT_CENTER.1,
            zoom: DEFAULT_ZOOM.min(max_zoom),
            max_zoom,
        }
    }

    /// Longitude span visible at the current zoom.
    pub fn lng_span(&self) -> f64 {
        360.0 / f64::from(1u32 << self.zoom)
    }

    /// `(lng_bounds, lat_bounds)` for a drawing area of the given size.
    pub fn bounds(&self, area: Rect) -> ([f64; 2], [f64; 2]) {
        let lng_span = self.lng_span();
        let lat_span = lng_span * aspect(area);
        (
            [self.center_lng - lng_span / 2.0, self.center_lng + lng_span / 2.0],
            [self.center_lat - lat_span / 2.0, self.center_lat + lat_span / 2.0],
        )
    }

    /// Coordinate under a terminal cell, if the cell lies inside `area`.
    pub fn cell_to_coord(&self, area: Rect, column: u16, row: u16) -> Option<(f64, f64)> {
        if area.width == 0
            || area.height == 0
            || column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return None;
        }

        let ([lng_min, lng_max], [lat_min, lat_max]) = self.bounds(area);
        let fx = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
        let fy = (f64::from(row - area.y) + 0.5) / f64::from(area.height);
        let lng = lng_min + fx * (lng_max - lng_min);
        let lat = lat_max - fy * (lat_max - lat_min);
        Some((lat.clamp(-90.0, 90.0), wrap_lng(lng)))
    }

    /// Terminal cell showing a coordinate, if it is in view.
    pub fn coord_to_cell(&self, area: Rect, lat: f64, lng: f64) -> Option<(u16, u16)> {
        let ([lng_min, lng_max], [lat_min, lat_max]) = self.bounds(area);
        if lng < lng_min || lng > lng_max || lat < lat_min || lat > lat_max {
            return None;
        }
        let fx = (lng - lng_min) / (lng_max - lng_min);
        let fy = (lat_max - lat) / (lat_max - lat_min);
        let column = (fx * f64::from(area.width)).floor().min(f64::from(area.width) - 1.0);
        let row = (fy * f64::from(area.height)).floor().min(f64::from(area.height) - 1.0);
        Some((area.x + column as u16, area.y + row as u16))
    }

    /// Move the centre by a fraction of the visible span.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let span = self.lng_span();
        self.center_lng = wrap_lng(self.center_lng + dx * span);
        self.center_lat = (self.center_lat + dy * span / 2.0).clamp(-85.0, 85.0);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(self.max_zoom);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1);
    }

    pub fn center_on(&mut self, lat: f64, lng: f64) {
        self.center_lat = lat;
        self.center_lng = lng;
    }
}

fn aspect(area: Rect) -> f64 {
    if area.width == 0 {
        return 1.0;
    }
    f64::from(area.height) * 2.0 / f64::from(area.width)
}

fn wrap_lng(lng: f64) -> f64 {
    (lng + 180.0).rem_euclid(360.0) - 180.0
}
