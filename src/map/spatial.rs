use std::collections::HashMap;

/// Fast equirectangular distance approximation in kilometers.
/// Good for small distances (<1000km), avoids expensive trig.
#[inline(always)]
pub fn fast_distance_km(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    const R: f64 = 6371.0; // Earth radius in km
    const DEG_TO_RAD: f64 = 0.017453292519943295; // π/180

    let dlat = (lat2 - lat1) * DEG_TO_RAD;
    let dlon = (lon2 - lon1) * DEG_TO_RAD;

    let lat_avg = (lat1 + lat2) * 0.5 * DEG_TO_RAD;
    let cos_lat = lat_avg.cos();

    let dx = dlon * cos_lat;
    let dy = dlat;

    R * (dx * dx + dy * dy).sqrt()
}

/// Distance in km from a point to a line segment, using a local
/// equirectangular frame anchored at the query point.
fn point_segment_distance_km(
    lon: f64,
    lat: f64,
    (ax, ay): (f64, f64),
    (bx, by): (f64, f64),
) -> f64 {
    const KM_PER_DEG: f64 = 111.19492664455873; // 6371 km * π/180
    let cos_lat = lat.to_radians().cos();

    // Segment endpoints in km offsets from the query point.
    let ax = (ax - lon) * KM_PER_DEG * cos_lat;
    let ay = (ay - lat) * KM_PER_DEG;
    let bx = (bx - lon) * KM_PER_DEG * cos_lat;
    let by = (by - lat) * KM_PER_DEG;

    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq > 0.0 {
        (-(ax * dx + ay * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let cx = ax + t * dx;
    let cy = ay + t * dy;
    (cx * cx + cy * cy).sqrt()
}

/// Spatial hash grid over hazard-line segments, used to answer the
/// click containment question: is this point within a buffer distance
/// of any hazard line? Segments are inserted into every cell their
/// bounding box overlaps (conservative, no false negatives); the exact
/// point-to-segment distance eliminates false positives.
pub struct ProximityIndex {
    cells: HashMap<(i32, i32), Vec<u32>>,
    segments: Vec<((f64, f64), (f64, f64))>,
    cell_size: f64,
}

impl ProximityIndex {
    /// Default cell size in degrees, sized so a 10 km query touches at
    /// most a 3x3 cell neighborhood at mid latitudes.
    pub const DEFAULT_CELL_SIZE: f64 = 0.25;

    pub fn build<'a>(lines: impl Iterator<Item = &'a [(f64, f64)]>, cell_size: f64) -> Self {
        let mut index = Self {
            cells: HashMap::new(),
            segments: Vec::new(),
            cell_size,
        };
        for path in lines {
            for seg in path.windows(2) {
                index.insert_segment(seg[0], seg[1]);
            }
        }
        index
    }

    #[inline(always)]
    fn to_cell(&self, lon: f64, lat: f64) -> (i32, i32) {
        let x = (lon / self.cell_size).floor() as i32;
        let y = (lat / self.cell_size).floor() as i32;
        (x, y)
    }

    fn insert_segment(&mut self, a: (f64, f64), b: (f64, f64)) {
        let id = self.segments.len() as u32;
        self.segments.push((a, b));

        let min_cell = self.to_cell(a.0.min(b.0), a.1.min(b.1));
        let max_cell = self.to_cell(a.0.max(b.0), a.1.max(b.1));
        for y in min_cell.1..=max_cell.1 {
            for x in min_cell.0..=max_cell.0 {
                self.cells.entry((x, y)).or_default().push(id);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True if any hazard-line segment lies within `radius_m` meters of
    /// (lon, lat). An empty index always answers false (fail-closed:
    /// no data means no popup).
    pub fn is_within(&self, lon: f64, lat: f64, radius_m: f64) -> bool {
        if self.segments.is_empty() {
            return false;
        }
        let radius_km = radius_m / 1000.0;

        // Degree extent of the radius; longitude widens toward the poles.
        let lat_pad = radius_km / 111.0;
        let lon_pad = lat_pad / lat.to_radians().cos().abs().max(0.1);

        let min_cell = self.to_cell(lon - lon_pad, lat - lat_pad);
        let max_cell = self.to_cell(lon + lon_pad, lat + lat_pad);

        for y in min_cell.1..=max_cell.1 {
            for x in min_cell.0..=max_cell.0 {
                let Some(ids) = self.cells.get(&(x, y)) else {
                    continue;
                };
                for &id in ids {
                    let (a, b) = self.segments[id as usize];
                    if point_segment_distance_km(lon, lat, a, b) <= radius_km {
                        return true;
                    }
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coastline() -> Vec<(f64, f64)> {
        // Rough north-south line off a coast near 40°N.
        vec![(-124.2, 40.0), (-124.1, 40.5), (-124.2, 41.0)]
    }

    #[test]
    fn empty_index_is_never_near() {
        let index = ProximityIndex::build(std::iter::empty(), ProximityIndex::DEFAULT_CELL_SIZE);
        assert!(!index.is_within(-124.2, 40.0, 10_000.0));
    }

    #[test]
    fn point_on_the_line_is_near() {
        let line = coastline();
        let index = ProximityIndex::build(
            std::iter::once(line.as_slice()),
            ProximityIndex::DEFAULT_CELL_SIZE,
        );
        assert!(index.is_within(-124.2, 40.0, 10_000.0));
        // Midway along a segment, not on a vertex.
        assert!(index.is_within(-124.15, 40.25, 10_000.0));
    }

    #[test]
    fn far_point_is_not_near() {
        let line = coastline();
        let index = ProximityIndex::build(
            std::iter::once(line.as_slice()),
            ProximityIndex::DEFAULT_CELL_SIZE,
        );
        // ~100 km inland.
        assert!(!index.is_within(-123.0, 40.5, 10_000.0));
    }

    #[test]
    fn radius_controls_the_verdict() {
        let line = coastline();
        let index = ProximityIndex::build(
            std::iter::once(line.as_slice()),
            ProximityIndex::DEFAULT_CELL_SIZE,
        );
        // ~9.4 km west of the line at 40.5°N (0.112° of longitude).
        let lon = -124.1 - 0.112;
        assert!(index.is_within(lon, 40.5, 10_000.0));
        assert!(!index.is_within(lon, 40.5, 5_000.0));
    }

    #[test]
    fn segment_distance_handles_degenerate_segments() {
        let d = point_segment_distance_km(-124.0, 40.0, (-124.0, 40.1), (-124.0, 40.1));
        assert!((d - fast_distance_km(-124.0, 40.0, -124.0, 40.1)).abs() < 0.05);
    }

    #[test]
    fn fast_distance_matches_known_scale() {
        // One degree of latitude is ~111 km.
        let d = fast_distance_km(-124.0, 40.0, -124.0, 41.0);
        assert!((d - 111.2).abs() < 1.0);
    }
}
