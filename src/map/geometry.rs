use crate::braille::BrailleCanvas;

/// Draw a line in the given hazard class using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32, class: u8) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y, class);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a point marker (small cross), used for the click site
pub fn draw_marker(canvas: &mut BrailleCanvas, x: i32, y: i32, size: i32, class: u8) {
    for i in -size..=size {
        canvas.set_pixel_signed(x + i, y, class);
        canvas.set_pixel_signed(x, y + i, class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::braille::CLASS_NONE;

    #[test]
    fn horizontal_line_fills_the_top_row() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0, 2);
        for (ch, class) in canvas.row_cells(0) {
            assert_ne!(ch, '\u{2800}');
            assert_eq!(class, 2);
        }
    }

    #[test]
    fn vertical_line_spans_both_cells() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7, 0);
        assert_ne!(canvas.row_cells(0).next().unwrap().0, '\u{2800}');
        assert_ne!(canvas.row_cells(1).next().unwrap().0, '\u{2800}');
    }

    #[test]
    fn marker_stays_inside_the_canvas() {
        let mut canvas = BrailleCanvas::new(2, 1);
        draw_marker(&mut canvas, 0, 0, 3, 1);
        // Negative arms are dropped, the rest lands in class 1.
        let (_, class) = canvas.row_cells(0).next().unwrap();
        assert_ne!(class, CLASS_NONE);
    }
}
