/// A geographic coordinate in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Result of a nearest-point lookup: position in the reference set and
/// the Euclidean degree-space distance to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearestMatch {
    pub index: usize,
    pub distance: f64,
}

/// Ordered, immutable set of coastal sample points. The index position
/// is the stable identity the result-image filenames are keyed by, so
/// order must match the source file exactly.
#[derive(Clone, Debug, Default)]
pub struct CoastalPoints {
    points: Vec<Coordinate>,
}

impl CoastalPoints {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Parse the `<lon> <lat>` per-line storage format (longitude
    /// first). Blank lines are ignored; malformed lines are skipped
    /// with a warning so that well-formed points keep the indices
    /// their images were generated under.
    pub fn from_text(text: &str) -> Self {
        let mut points = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut tokens = line.split_whitespace();
            let parsed = match (tokens.next(), tokens.next()) {
                (Some(lon), Some(lat)) => {
                    lon.parse::<f64>().ok().zip(lat.parse::<f64>().ok())
                }
                _ => None,
            };
            match parsed {
                Some((lon, lat)) => points.push(Coordinate { lat, lon }),
                None => {
                    eprintln!(
                        "Warning: skipping malformed coastal point on line {}: {:?}",
                        lineno + 1,
                        line
                    );
                }
            }
        }
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Coordinate> {
        self.points.get(index).copied()
    }

    /// Find the closest point to `query`, or `None` when the set is
    /// empty (no reference data; callers skip the dependent UI).
    ///
    /// Distance is squared-Euclidean in raw degree space, not geodesic:
    /// valid only because the set spans a small coastal region. Ties go
    /// to the first point in iteration order, so results are stable.
    /// Linear scan; the set is small and queries are interactive clicks.
    pub fn find_nearest(&self, query: Coordinate) -> Option<NearestMatch> {
        let mut best: Option<(usize, f64)> = None;
        for (i, p) in self.points.iter().enumerate() {
            let dlat = query.lat - p.lat;
            let dlon = query.lon - p.lon;
            let dist_sq = dlat * dlat + dlon * dlon;
            match best {
                Some((_, best_sq)) if dist_sq >= best_sq => {}
                _ => best = Some((i, dist_sq)),
            }
        }
        best.map(|(index, dist_sq)| NearestMatch {
            index,
            distance: dist_sq.sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{hash2, rand_simple};

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate { lat, lon }
    }

    #[test]
    fn empty_set_has_no_match() {
        let points = CoastalPoints::default();
        assert_eq!(points.find_nearest(coord(10.0, 10.0)), None);
    }

    #[test]
    fn exact_hit_returns_zero_distance() {
        let points = CoastalPoints::new(vec![
            coord(0.0, 0.0),
            coord(10.0, 10.0),
            coord(20.0, 20.0),
        ]);
        let m = points.find_nearest(coord(10.0, 10.0)).unwrap();
        assert_eq!(m.index, 1);
        assert_eq!(m.distance, 0.0);
    }

    #[test]
    fn nearest_beats_every_other_point() {
        // Brute-force cross-check over pseudo-random sets and queries.
        for set_seed in 0..50u64 {
            let points: Vec<Coordinate> = (0..40)
                .map(|i| {
                    coord(
                        30.0 + rand_simple(hash2(set_seed, i)) * 5.0,
                        -125.0 + rand_simple(hash2(set_seed, i + 1000)) * 5.0,
                    )
                })
                .collect();
            let set = CoastalPoints::new(points.clone());

            let query = coord(
                30.0 + rand_simple(hash2(set_seed, 9001)) * 5.0,
                -125.0 + rand_simple(hash2(set_seed, 9002)) * 5.0,
            );
            let m = set.find_nearest(query).unwrap();

            for p in &points {
                let dlat = query.lat - p.lat;
                let dlon = query.lon - p.lon;
                let d = (dlat * dlat + dlon * dlon).sqrt();
                assert!(m.distance <= d + 1e-12);
            }
        }
    }

    #[test]
    fn tie_break_prefers_lower_index() {
        // Two points equidistant from the query on either side.
        let points = CoastalPoints::new(vec![coord(0.0, -1.0), coord(0.0, 1.0)]);
        for _ in 0..10 {
            let m = points.find_nearest(coord(0.0, 0.0)).unwrap();
            assert_eq!(m.index, 0);
        }
    }

    #[test]
    fn parses_lon_before_lat() {
        let set = CoastalPoints::from_text("-124.5 40.1\n-124.2 40.8\n");
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0), Some(coord(40.1, -124.5)));
        assert_eq!(set.get(1), Some(coord(40.8, -124.2)));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let set = CoastalPoints::from_text("\n-124.5 40.1\n\n   \n-124.2 40.8\n\n");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let set = CoastalPoints::from_text("-124.5 40.1\nlon lat\n-124.2\n-124.2 40.8\n");
        assert_eq!(set.len(), 2);
        // Indices of surviving points stay contiguous.
        assert_eq!(set.get(1), Some(coord(40.8, -124.2)));
    }
}
