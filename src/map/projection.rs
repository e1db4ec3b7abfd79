use std::f64::consts::PI;

/// Normalized Web Mercator coordinates in [0, 1] for (lon, lat).
#[inline(always)]
fn mercator_norm(lon: f64, lat: f64) -> (f64, f64) {
    let x = (lon + 180.0) / 360.0;
    let lat_rad = lat * PI / 180.0;
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0;
    (x, y)
}

/// Viewport representing the visible map area and zoom level
#[derive(Clone)]
pub struct Viewport {
    /// Center longitude (-180 to 180)
    pub center_lon: f64,
    /// Center latitude (-90 to 90)
    pub center_lat: f64,
    /// Zoom level (higher = more zoomed in)
    pub zoom: f64,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

impl Viewport {
    pub fn new(center_lon: f64, center_lat: f64, zoom: f64, width: usize, height: usize) -> Self {
        Self {
            center_lon,
            center_lat,
            zoom,
            width,
            height,
        }
    }

    /// Frame a geographic bounding box (the hazard layer extent) with a
    /// little margin around it. Falls back to a whole-world view for a
    /// degenerate box.
    pub fn fit(
        (min_lon, min_lat, max_lon, max_lat): (f64, f64, f64, f64),
        width: usize,
        height: usize,
    ) -> Self {
        let center_lon = (min_lon + max_lon) / 2.0;
        let center_lat = (min_lat + max_lat) / 2.0;

        let (x0, y0) = mercator_norm(min_lon, max_lat);
        let (x1, y1) = mercator_norm(max_lon, min_lat);
        let span = (x1 - x0).abs().max((y1 - y0).abs());
        if !span.is_finite() || span <= 0.0 {
            return Self::new(0.0, 20.0, 1.0, width, height);
        }

        // zoom * width pixels cover the full mercator unit square, so
        // the span fills the canvas at zoom = 1/span; back off 20%.
        let zoom = (0.8 / span).clamp(0.5, 100.0);
        Self::new(center_lon, center_lat, zoom, width, height)
    }

    /// Pan the viewport by pixel delta
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let scale = 360.0 / (self.zoom * self.width as f64);
        self.center_lon += dx as f64 * scale;
        self.center_lat -= dy as f64 * scale * 0.5; // Mercator distortion

        // Wrap longitude
        if self.center_lon > 180.0 {
            self.center_lon -= 360.0;
        } else if self.center_lon < -180.0 {
            self.center_lon += 360.0;
        }

        // Clamp latitude
        self.center_lat = self.center_lat.clamp(-85.0, 85.0);
    }

    /// Zoom in by a factor
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 1.5).min(100.0);
    }

    /// Zoom out by a factor
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 1.5).max(0.5);
    }

    /// Zoom in towards a specific pixel location
    pub fn zoom_in_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.5);
    }

    /// Zoom out from a specific pixel location
    pub fn zoom_out_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.0 / 1.5);
    }

    /// Zoom by factor towards a specific pixel location
    fn zoom_at(&mut self, px: i32, py: i32, factor: f64) {
        // Keep the geographic point under the cursor fixed: zoom, then
        // pan by however far that point moved.
        let (lon, lat) = self.unproject(px, py);
        self.zoom = (self.zoom * factor).clamp(0.5, 100.0);

        let (new_px, new_py) = self.project(lon, lat);
        self.pan(new_px - px, new_py - py);
    }

    /// Unproject pixel coordinates back to geographic coordinates (lon, lat)
    pub fn unproject(&self, px: i32, py: i32) -> (f64, f64) {
        let scale = self.zoom * self.width as f64;
        let (center_x, center_y) = mercator_norm(self.center_lon, self.center_lat);

        let x = (px as f64 - self.width as f64 / 2.0) / scale + center_x;
        let y = (py as f64 - self.height as f64 / 2.0) / scale + center_y;

        let lon = x * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * y)).sinh().atan() * 180.0 / PI;

        (lon, lat)
    }

    /// Project a geographic coordinate (lon, lat) to pixel coordinates
    pub fn project(&self, lon: f64, lat: f64) -> (i32, i32) {
        let (x, y) = mercator_norm(lon, lat);
        let (center_x, center_y) = mercator_norm(self.center_lon, self.center_lat);
        let scale = self.zoom * self.width as f64;

        let px = ((x - center_x) * scale + self.width as f64 / 2.0) as i32;
        let py = ((y - center_y) * scale + self.height as f64 / 2.0) as i32;

        (px, py)
    }

    /// Check if a projected point is visible in the viewport
    pub fn is_visible(&self, px: i32, py: i32) -> bool {
        px >= -10
            && px < self.width as i32 + 10
            && py >= -10
            && py < self.height as i32 + 10
    }

    /// Check if a line segment might be visible (rough bounding box check)
    pub fn line_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        let min_x = p1.0.min(p2.0);
        let max_x = p1.0.max(p2.0);
        let min_y = p1.1.min(p2.1);
        let max_y = p1.1.max(p2.1);

        max_x >= 0
            && min_x < self.width as i32
            && max_y >= 0
            && min_y < self.height as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_center() {
        let vp = Viewport::new(0.0, 0.0, 1.0, 100, 100);
        let (x, y) = vp.project(0.0, 0.0);
        assert_eq!(x, 50);
        assert_eq!(y, 50);
    }

    #[test]
    fn test_pan() {
        let mut vp = Viewport::new(0.0, 0.0, 1.0, 100, 100);
        vp.pan(10, 0);
        assert!(vp.center_lon > 0.0);
    }

    #[test]
    fn unproject_inverts_project() {
        let vp = Viewport::new(-124.0, 40.5, 12.0, 200, 160);
        let (px, py) = vp.project(-124.2, 40.8);
        let (lon, lat) = vp.unproject(px, py);
        assert!((lon - -124.2).abs() < 0.1);
        assert!((lat - 40.8).abs() < 0.1);
    }

    #[test]
    fn fit_centers_on_the_bounds() {
        let vp = Viewport::fit((-125.0, 39.0, -123.0, 42.0), 200, 160);
        assert!((vp.center_lon - -124.0).abs() < 1e-9);
        assert!((vp.center_lat - 40.5).abs() < 1e-9);
        // The box corners should land within the canvas.
        let (px, py) = vp.project(-125.0, 42.0);
        assert!(vp.is_visible(px, py));
        let (px, py) = vp.project(-123.0, 39.0);
        assert!(vp.is_visible(px, py));
    }

    #[test]
    fn fit_degenerate_bounds_falls_back_to_world() {
        let vp = Viewport::fit((-124.0, 40.0, -124.0, 40.0), 200, 160);
        assert_eq!(vp.zoom, 1.0);
    }
}
