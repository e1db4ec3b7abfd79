/// Observed value range of a hazard field. `{0, 0}` is a legitimate
/// result when the layer is empty or the field is absent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    pub const ZERO: FieldRange = FieldRange { min: 0.0, max: 0.0 };
}

/// One classification interval, mapped to a ramp color and a legend label.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassBreak {
    pub min: f64,
    pub max: f64,
    pub color_index: usize,
    pub label: String,
}

/// Result of `compute_breaks`: contiguous intervals covering [0, rounded_max].
#[derive(Clone, Debug, PartialEq)]
pub struct Breaks {
    pub breaks: Vec<ClassBreak>,
    pub rounded_max: f64,
}

/// Green-to-red ramp for the 7 default classes, low hazard first.
pub const RAMP: [(u8, u8, u8); 7] = [
    (0x00, 0xFF, 0x00), // #00FF00
    (0x7F, 0xFF, 0x00), // #7FFF00
    (0xFF, 0xFF, 0x00), // #FFFF00
    (0xFF, 0xD7, 0x00), // #FFD700
    (0xFF, 0xA5, 0x00), // #FFA500
    (0xFF, 0x45, 0x00), // #FF4500
    (0xFF, 0x00, 0x00), // #FF0000
];

/// Color for features with no value in the selected field.
pub const NO_DATA_COLOR: (u8, u8, u8) = (0xC8, 0xC8, 0xC8);

pub const DEFAULT_BUCKETS: usize = 7;
pub const DEFAULT_ROUND_TO: f64 = 5.0;

/// Build `bucket_count` equal-width breaks from 0 to `max` rounded up to
/// the next multiple of `round_to`.
///
/// `max == 0` yields all-degenerate `[0, 0]` breaks; a zero step is a
/// valid value, not an error. Pure and deterministic.
pub fn compute_breaks(max: f64, bucket_count: usize, round_to: f64) -> Breaks {
    let rounded_max = (max / round_to).ceil() * round_to;
    let step = rounded_max / bucket_count as f64;

    let breaks = (0..bucket_count)
        .map(|i| {
            let min = i as f64 * step;
            // Pin the top interval to rounded_max so the cover invariant
            // holds exactly despite step rounding.
            let max = if i + 1 == bucket_count {
                rounded_max
            } else {
                (i + 1) as f64 * step
            };
            ClassBreak {
                min,
                max,
                color_index: i,
                label: format!("{:.1} – {:.1}", min, max),
            }
        })
        .collect();

    Breaks { breaks, rounded_max }
}

impl Breaks {
    /// Class index a value falls into, or `None` when outside every
    /// interval (rendered with the no-data symbol).
    pub fn class_for(&self, value: f64) -> Option<usize> {
        self.breaks
            .iter()
            .position(|b| value >= b.min && value <= b.max)
    }
}

/// One legend entry: a ramp color and its interval label.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendRow {
    pub color: (u8, u8, u8),
    pub label: String,
}

/// Declarative legend view-model, low class first. The UI layer decides
/// how to draw it.
pub fn legend_rows(breaks: &Breaks) -> Vec<LegendRow> {
    breaks
        .breaks
        .iter()
        .map(|b| LegendRow {
            color: RAMP[b.color_index % RAMP.len()],
            label: b.label.clone(),
        })
        .collect()
}

/// Hazard condition selector: which earthquake scenario the probability
/// field describes. The code doubles as the result-image suffix.
pub const CONDITIONS: [(&str, &str); 3] = [
    ("bo", "Overall Probability"),
    ("y", "At least 1 Earthquake Affects the Area"),
    ("n", "No Earthquake Affects the Area"),
];

/// Subsidence thresholds in centimeters.
pub const THRESHOLDS_CM: [u16; 4] = [5, 10, 20, 30];

/// Forecast horizons in years.
pub const YEARS: [u16; 3] = [10, 25, 50];

/// The three categorical selectors driving symbology and the popup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub condition: usize,
    pub threshold: usize,
    pub year: usize,
}

impl Selection {
    pub fn condition_code(&self) -> &'static str {
        CONDITIONS[self.condition].0
    }

    pub fn condition_label(&self) -> &'static str {
        CONDITIONS[self.condition].1
    }

    pub fn threshold_cm(&self) -> u16 {
        THRESHOLDS_CM[self.threshold]
    }

    pub fn year(&self) -> u16 {
        YEARS[self.year]
    }

    /// Composite attribute field name, `{condition}_{cm}_{year}`.
    pub fn field_name(&self) -> String {
        format!(
            "{}_{}_{}",
            self.condition_code(),
            self.threshold_cm(),
            self.year()
        )
    }

    /// Human-readable legend caption for the current selection.
    pub fn legend_label(&self) -> String {
        format!(
            "Probability of exceeding {}cm subsidence in the next {} years",
            self.threshold_cm(),
            self.year()
        )
    }

    pub fn cycle_condition(&mut self) {
        self.condition = (self.condition + 1) % CONDITIONS.len();
    }

    pub fn cycle_threshold(&mut self) {
        self.threshold = (self.threshold + 1) % THRESHOLDS_CM.len();
    }

    pub fn cycle_year(&mut self) {
        self.year = (self.year + 1) % YEARS.len();
    }
}
