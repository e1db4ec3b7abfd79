/// Braille Unicode canvas for high-resolution terminal graphics.
/// Each character cell represents a 2x4 pixel grid (8 dots) and carries
/// a hazard-class index so the choropleth renders in a single pass.
/// Unicode Braille patterns: U+2800 to U+28FF
pub struct BrailleCanvas {
    width: usize,  // Characters
    height: usize, // Characters
    dots: Vec<u8>,  // Bit pattern per char, row-major
    class: Vec<u8>, // Class per char, CLASS_NONE when untouched
}

/// Cell has no pixels set.
pub const CLASS_NONE: u8 = u8::MAX;
/// Cell drawn by a feature with no value in the selected field.
pub const CLASS_NO_DATA: u8 = u8::MAX - 1;

/// Resolve two classes landing in the same character cell: any real
/// hazard class beats the no-data class, and the higher hazard class
/// beats the lower one.
#[inline(always)]
fn dominant(a: u8, b: u8) -> u8 {
    match (a, b) {
        (CLASS_NONE, other) | (other, CLASS_NONE) => other,
        (CLASS_NO_DATA, other) | (other, CLASS_NO_DATA) => other,
        (a, b) => a.max(b),
    }
}

impl BrailleCanvas {
    /// Create a new canvas with the given character dimensions.
    /// Effective pixel resolution: width*2 x height*4
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            dots: vec![0u8; width * height],
            class: vec![CLASS_NONE; width * height],
        }
    }

    /// Set a pixel in the given class.
    /// Braille dot layout per character:
    /// ```text
    /// (0,0) (1,0)   bits: 0x01 0x08
    /// (0,1) (1,1)   bits: 0x02 0x10
    /// (0,2) (1,2)   bits: 0x04 0x20
    /// (0,3) (1,3)   bits: 0x40 0x80
    /// ```
    pub fn set_pixel(&mut self, x: usize, y: usize, class: u8) {
        let cx = x / 2;
        let cy = y / 4;

        if cx >= self.width || cy >= self.height {
            return;
        }

        let bit = match (x % 2, y % 4) {
            (0, 0) => 0x01,
            (1, 0) => 0x08,
            (0, 1) => 0x02,
            (1, 1) => 0x10,
            (0, 2) => 0x04,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => 0,
        };

        let idx = cy * self.width + cx;
        self.dots[idx] |= bit;
        self.class[idx] = dominant(self.class[idx], class);
    }

    /// Set a pixel using signed coordinates (ignores negative values)
    pub fn set_pixel_signed(&mut self, x: i32, y: i32, class: u8) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize, class);
        }
    }

    /// Iterate one character row as (char, class) pairs. Untouched cells
    /// yield the blank braille char U+2800 with CLASS_NONE.
    pub fn row_cells(&self, row: usize) -> impl Iterator<Item = (char, u8)> + '_ {
        let start = (row * self.width).min(self.dots.len());
        let end = (start + self.width).min(self.dots.len());
        self.dots[start..end]
            .iter()
            .zip(&self.class[start..end])
            .map(|(&bits, &class)| {
                (char::from_u32(0x2800 + bits as u32).unwrap_or(' '), class)
            })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Render to a plain string, one line per character row.
    #[cfg(test)]
    pub fn to_plain_string(&self) -> String {
        (0..self.height)
            .map(|row| self.row_cells(row).map(|(ch, _)| ch).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pixel() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(0, 0, 3);
        assert_eq!(canvas.to_plain_string(), "⠁"); // U+2801
        assert_eq!(canvas.row_cells(0).next().unwrap().1, 3);
    }

    #[test]
    fn test_all_dots() {
        let mut canvas = BrailleCanvas::new(1, 1);
        // Set all 8 dots
        for x in 0..2 {
            for y in 0..4 {
                canvas.set_pixel(x, y, 0);
            }
        }
        assert_eq!(canvas.to_plain_string(), "⣿"); // U+28FF (all dots)
    }

    #[test]
    fn test_diagonal() {
        let mut canvas = BrailleCanvas::new(2, 1);
        canvas.set_pixel(0, 0, 0);
        canvas.set_pixel(1, 1, 0);
        canvas.set_pixel(2, 2, 0);
        canvas.set_pixel(3, 3, 0);
        // First char: (0,0) and (1,1) = 0x01 | 0x10 = 0x11
        // Second char: (0,2) and (1,3) = 0x04 | 0x80 = 0x84
        assert_eq!(canvas.to_plain_string(), "⠑⢄");
    }

    #[test]
    fn higher_class_wins_a_contested_cell() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(0, 0, 2);
        canvas.set_pixel(1, 0, 5);
        canvas.set_pixel(0, 1, 1);
        assert_eq!(canvas.row_cells(0).next().unwrap().1, 5);
    }

    #[test]
    fn real_class_wins_over_no_data() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(0, 0, CLASS_NO_DATA);
        canvas.set_pixel(1, 0, 0);
        assert_eq!(canvas.row_cells(0).next().unwrap().1, 0);

        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(0, 0, CLASS_NO_DATA);
        assert_eq!(canvas.row_cells(0).next().unwrap().1, CLASS_NO_DATA);
    }

    #[test]
    fn untouched_cells_are_blank() {
        let canvas = BrailleCanvas::new(2, 1);
        let cells: Vec<_> = canvas.row_cells(0).collect();
        assert_eq!(cells, vec![('\u{2800}', CLASS_NONE), ('\u{2800}', CLASS_NONE)]);
    }
}
