use crate::assets::{gallery, popup_title, GalleryImage};
use crate::classify::{
    compute_breaks, legend_rows, Breaks, LegendRow, Selection, DEFAULT_BUCKETS, DEFAULT_ROUND_TO,
};
use crate::coast::{CoastalPoints, Coordinate, NearestMatch};
use crate::map::{fast_distance_km, HazardLayer, ProximityIndex, Viewport};

/// Buffer distance for the click containment check, in meters.
pub const COAST_BUFFER_M: f64 = 10_000.0;

/// Open popup showing the result-image gallery of one coastal point.
pub struct Popup {
    pub title: String,
    pub point: NearestMatch,
    /// Ground distance from the click to the matched point, for display.
    pub distance_km: f64,
    pub images: Vec<GalleryImage>,
    pub page: usize,
}

impl Popup {
    pub fn next_page(&mut self) {
        if self.page + 1 < self.images.len() {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn current(&self) -> &GalleryImage {
        &self.images[self.page]
    }
}

/// Application state
pub struct App {
    pub viewport: Viewport,
    pub layer: HazardLayer,
    pub coastal_points: CoastalPoints,
    pub selection: Selection,
    /// Breaks for the currently selected field.
    pub breaks: Breaks,
    /// Legend view-model derived from the breaks.
    pub legend: Vec<LegendRow>,
    pub legend_label: String,
    pub popup: Option<Popup>,
    /// Click site of the open inspection, in (lon, lat).
    pub click_marker: Option<(f64, f64)>,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Current mouse position for cursor marker
    pub mouse_pos: Option<(u16, u16)>,
    proximity: ProximityIndex,
}

impl App {
    pub fn new(width: usize, height: usize, layer: HazardLayer, coastal_points: CoastalPoints) -> Self {
        // Braille gives 2x4 resolution per character.
        // Account for border and status bar, and the legend sidebar.
        let (pixel_width, pixel_height) = map_pixels(width, height);

        let viewport = match layer.bounds() {
            Some(bounds) => Viewport::fit(bounds, pixel_width, pixel_height),
            None => Viewport::new(0.0, 20.0, 1.0, pixel_width, pixel_height),
        };

        let proximity = ProximityIndex::build(
            layer.lines.iter().map(|l| l.path.as_slice()),
            ProximityIndex::DEFAULT_CELL_SIZE,
        );

        let mut app = Self {
            viewport,
            layer,
            coastal_points,
            selection: Selection::default(),
            breaks: Breaks { breaks: Vec::new(), rounded_max: 0.0 },
            legend: Vec::new(),
            legend_label: String::new(),
            popup: None,
            click_marker: None,
            should_quit: false,
            last_mouse: None,
            mouse_pos: None,
            proximity,
        };
        app.update_symbology();
        app
    }

    /// Recompute the ramp for the current selection: field statistics,
    /// class breaks, legend rows. Runs synchronously on every selector
    /// change, so stale results can never overwrite a newer selection.
    pub fn update_symbology(&mut self) {
        let field = self.selection.field_name();
        let range = self.layer.field_range(&field);
        self.breaks = compute_breaks(range.max.max(0.0), DEFAULT_BUCKETS, DEFAULT_ROUND_TO);
        self.legend = legend_rows(&self.breaks);
        self.legend_label = self.selection.legend_label();
    }

    pub fn cycle_condition(&mut self) {
        self.selection.cycle_condition();
        self.update_symbology();
    }

    pub fn cycle_threshold(&mut self) {
        self.selection.cycle_threshold();
        self.update_symbology();
    }

    pub fn cycle_year(&mut self) {
        self.selection.cycle_year();
        self.update_symbology();
    }

    /// Inspect the map at a terminal cell: containment check against
    /// the hazard lines, then nearest coastal point, then popup.
    ///
    /// Not within the coastal buffer (or proximity unanswerable because
    /// the layer is empty) clears any marker and opens nothing. An
    /// empty point set leaves the popup feature disabled but still
    /// shows the click marker.
    pub fn inspect(&mut self, col: u16, row: u16) {
        let (px, py) = cell_to_pixel(col, row);
        let (lon, lat) = self.viewport.unproject(px, py);

        if !self.proximity.is_within(lon, lat, COAST_BUFFER_M) {
            self.click_marker = None;
            self.popup = None;
            return;
        }

        self.click_marker = Some((lon, lat));

        let clicked = Coordinate { lat, lon };
        self.popup = self.coastal_points.find_nearest(clicked).map(|point| {
            let distance_km = self
                .coastal_points
                .get(point.index)
                .map(|p| fast_distance_km(lon, lat, p.lon, p.lat))
                .unwrap_or(0.0);
            Popup {
                title: popup_title(self.selection.year(), clicked),
                point,
                distance_km,
                images: gallery(point.index, self.selection.year()),
                page: 0,
            }
        });
    }

    pub fn close_popup(&mut self) {
        self.popup = None;
        self.click_marker = None;
    }

    /// Update viewport size when terminal resizes
    pub fn resize(&mut self, width: usize, height: usize) {
        let (pixel_width, pixel_height) = map_pixels(width, height);
        self.viewport.width = pixel_width;
        self.viewport.height = pixel_height;
    }

    /// Pan the map
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    /// Zoom in
    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    /// Zoom out
    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Zoom in towards a screen position (terminal column/row)
    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        let (px, py) = cell_to_pixel(col, row);
        self.viewport.zoom_in_at(px, py);
    }

    /// Zoom out from a screen position (terminal column/row)
    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        let (px, py) = cell_to_pixel(col, row);
        self.viewport.zoom_out_at(px, py);
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Get current zoom level as a string
    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }

    /// Get current center coordinates as a string
    pub fn center_coords(&self) -> String {
        format!(
            "{:.1}°{}, {:.1}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }

    /// Handle mouse drag - pans the map
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = last_x as i32 - x as i32;
            let dy = last_y as i32 - y as i32;
            // Scale based on zoom: less sensitive when zoomed out
            let scale = if self.viewport.zoom < 2.0 {
                2
            } else if self.viewport.zoom < 4.0 {
                3
            } else {
                4
            };
            self.pan(dx * scale, dy * scale);
        }
        self.last_mouse = Some((x, y));
    }

    /// Reset drag state when mouse button released
    pub fn end_drag(&mut self) {
        self.last_mouse = None;
    }

    /// Update mouse cursor position
    pub fn set_mouse_pos(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
    }

    /// Get mouse position in braille pixel coordinates (for rendering marker)
    pub fn mouse_pixel_pos(&self) -> Option<(i32, i32)> {
        self.mouse_pos.map(|(col, row)| cell_to_pixel(col, row))
    }
}

/// Convert terminal cell coordinates to braille pixel coordinates.
/// Each terminal cell is 2 braille pixels wide and 4 tall; the map
/// block border eats one cell on each edge.
#[inline(always)]
fn cell_to_pixel(col: u16, row: u16) -> (i32, i32) {
    let px = ((col.saturating_sub(1)) as i32) * 2;
    let py = ((row.saturating_sub(1)) as i32) * 4;
    (px, py)
}

/// Braille pixel size of the map pane for a terminal size: border (2),
/// status bar (1) and the legend sidebar are outside the map.
fn map_pixels(width: usize, height: usize) -> (usize, usize) {
    let inner_width = width.saturating_sub(2 + crate::ui::LEGEND_WIDTH as usize);
    let inner_height = height.saturating_sub(3);
    (inner_width * 2, inner_height * 4)
}
