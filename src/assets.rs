use crate::coast::Coordinate;

/// One page of the click popup: a precomputed result image on disk.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryImage {
    pub path: String,
    pub title: &'static str,
}

// Filename stem shared by every precomputed result image. The date tag
// identifies the model run the images came from; renaming breaks the
// on-disk assets, so this stays byte-exact.
const STEM: &str = "new_result_smoothed_10272025";

/// Assemble the image gallery for a coastal point and forecast horizon.
///
/// `point_index` is the 0-based position in the coastal point set as
/// loaded; the assets were generated under the same indexing.
pub fn gallery(point_index: usize, year: u16) -> Vec<GalleryImage> {
    let base = format!("images/{}_{}_{}", STEM, point_index, year);
    vec![
        GalleryImage {
            path: format!("{}_bo.png", base),
            title: "Overall Probability",
        },
        GalleryImage {
            path: format!("{}_y.png", base),
            title: "At least 1 Earthquake Affects the Area",
        },
        GalleryImage {
            path: format!("{}_n.png", base),
            title: "No Earthquake Affects the Area",
        },
        GalleryImage {
            path: format!("images/Hazard_curve{}_{}_{}.png", STEM, point_index, year),
            title: "Overall Exceedance Hazard Curve",
        },
    ]
}

/// Popup title echoing the clicked location. West-coast data, hence the
/// negated longitude shown as °W.
pub fn popup_title(year: u16, click: Coordinate) -> String {
    format!(
        "Probability of vertical land motion in the next {} years at the closest coastal point ({:.1}\u{00B0} N,{:.1}\u{00B0} W)",
        year, click.lat, -click.lon
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_paths_match_the_naming_convention() {
        let g = gallery(17, 50);
        assert_eq!(g.len(), 4);
        assert_eq!(g[0].path, "images/new_result_smoothed_10272025_17_50_bo.png");
        assert_eq!(g[1].path, "images/new_result_smoothed_10272025_17_50_y.png");
        assert_eq!(g[2].path, "images/new_result_smoothed_10272025_17_50_n.png");
        assert_eq!(
            g[3].path,
            "images/Hazard_curvenew_result_smoothed_10272025_17_50.png"
        );
    }

    #[test]
    fn gallery_titles_follow_suffix_order() {
        let g = gallery(0, 10);
        assert_eq!(g[0].title, "Overall Probability");
        assert_eq!(g[3].title, "Overall Exceedance Hazard Curve");
    }

    #[test]
    fn popup_title_formats_coordinates_to_one_decimal() {
        let t = popup_title(25, Coordinate { lat: 40.84, lon: -124.16 });
        assert_eq!(
            t,
            "Probability of vertical land motion in the next 25 years at the closest coastal point (40.8\u{00B0} N,124.2\u{00B0} W)"
        );
    }
}
