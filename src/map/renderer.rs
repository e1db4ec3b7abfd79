use std::collections::HashMap;

use rayon::prelude::*;

use crate::braille::{BrailleCanvas, CLASS_NO_DATA};
use crate::classify::{Breaks, FieldRange};
use crate::map::geometry::draw_line;
use crate::map::projection::Viewport;

/// A geographic line (sequence of lon/lat coordinates)
pub type LineString = Vec<(f64, f64)>;

/// One hazard-line feature: a coastline segment with a probability
/// value per `{condition}_{cm}_{year}` field.
pub struct HazardLine {
    pub path: LineString,
    pub attrs: HashMap<String, f64>,
    /// (min_lon, min_lat, max_lon, max_lat)
    pub bbox: (f64, f64, f64, f64),
}

impl HazardLine {
    pub fn new(path: LineString, attrs: HashMap<String, f64>) -> Self {
        let mut bbox = (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &(lon, lat) in &path {
            bbox.0 = bbox.0.min(lon);
            bbox.1 = bbox.1.min(lat);
            bbox.2 = bbox.2.max(lon);
            bbox.3 = bbox.3.max(lat);
        }
        Self { path, attrs, bbox }
    }
}

/// The subsidence-hazard line layer.
#[derive(Default)]
pub struct HazardLayer {
    pub lines: Vec<HazardLine>,
}

impl HazardLayer {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn add_line(&mut self, path: LineString, attrs: HashMap<String, f64>) {
        self.lines.push(HazardLine::new(path, attrs));
    }

    /// Check if any data is loaded
    pub fn has_data(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Layer extent, or None when empty.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.lines.iter().fold(None, |acc, line| {
            let b = line.bbox;
            Some(match acc {
                None => b,
                Some(a) => (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3)),
            })
        })
    }

    /// Observed {min, max} of a field across all features. Features
    /// missing the field are ignored; a field nobody carries yields
    /// `{0, 0}`, which callers render as a degenerate ramp.
    pub fn field_range(&self, field: &str) -> FieldRange {
        let minmax = self
            .lines
            .par_iter()
            .filter_map(|line| line.attrs.get(field).copied())
            .map(|v| (v, v))
            .reduce_with(|(amin, amax), (bmin, bmax)| (amin.min(bmin), amax.max(bmax)));

        match minmax {
            Some((min, max)) => FieldRange { min, max },
            None => FieldRange::ZERO,
        }
    }

    /// Render the layer as a choropleth of `field` under `breaks`.
    /// Features without the field draw in the no-data class.
    pub fn render(
        &self,
        canvas: &mut BrailleCanvas,
        viewport: &Viewport,
        field: &str,
        breaks: &Breaks,
    ) {
        for line in &self.lines {
            let class = match line.attrs.get(field) {
                Some(&value) => breaks
                    .class_for(value)
                    .map(|c| c as u8)
                    .unwrap_or(CLASS_NO_DATA),
                None => CLASS_NO_DATA,
            };
            self.draw_linestring(canvas, &line.path, viewport, class);
        }
    }

    /// Draw a linestring with viewport culling
    fn draw_linestring(
        &self,
        canvas: &mut BrailleCanvas,
        line: &[(f64, f64)],
        viewport: &Viewport,
        class: u8,
    ) {
        if line.len() < 2 {
            return;
        }

        let mut prev: Option<(i32, i32)> = None;

        for &(lon, lat) in line {
            let (px, py) = viewport.project(lon, lat);

            if let Some((prev_x, prev_y)) = prev {
                let dist = ((px - prev_x).abs() + (py - prev_y).abs()) as usize;
                if dist < viewport.width && viewport.line_might_be_visible((prev_x, prev_y), (px, py)) {
                    draw_line(canvas, prev_x, prev_y, px, py, class);
                }
            }

            prev = Some((px, py));
        }
    }
}
