/// Scan conversion from viewport coordinates to surface pixels
use crate::error::{Error, Result};
use crate::surface::Surface;
use crate::vector::{Real, Vec2};

/// Projected points further than this many canvas extents from the centre are
/// not rasterized; without clipping they would produce unbounded scanlines.
pub const GUARD_BAND: Real = 8.0;

/// The projection-plane window, in world-scaled units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: Real,
    pub height: Real,
}

impl Viewport {
    pub fn new(width: Real, height: Real) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(2.0, 2.0)
    }
}

/// Integer surface coordinates, y pointing down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

impl Pixel {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One horizontal run of a filled triangle, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub y: i32,
    pub x_start: i32,
    pub x_end: i32,
}

/// Maps viewport coordinates through the canvas onto the surface and draws there
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rasterizer {
    viewport: Viewport,
    canvas_width: u32,
    canvas_height: u32,
    offset_x: i32,
    offset_y: i32,
}

impl Rasterizer {
    pub fn new(viewport: Viewport, canvas_width: u32, canvas_height: u32) -> Result<Self> {
        if !(viewport.width > 0.0 && viewport.height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "viewport must have positive extents, got {} x {}",
                viewport.width, viewport.height
            )));
        }
        if canvas_width == 0 || canvas_height == 0 {
            return Err(Error::InvalidConfig(format!(
                "canvas must have positive extents, got {} x {}",
                canvas_width, canvas_height
            )));
        }
        Ok(Self {
            viewport,
            canvas_width,
            canvas_height,
            offset_x: 0,
            offset_y: 0,
        })
    }

    /// Shift the canvas so it sits in the middle of a surface of the given size
    pub fn center_on(&mut self, surface_width: u32, surface_height: u32) {
        self.offset_x = ((surface_width as Real - self.canvas_width as Real) / 2.0).round() as i32;
        self.offset_y = ((surface_height as Real - self.canvas_height as Real) / 2.0).round() as i32;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    pub fn viewport_to_canvas(&self, p: &Vec2) -> Vec2 {
        Vec2::xy(
            p[0] * self.canvas_width as Real / self.viewport.width,
            p[1] * self.canvas_height as Real / self.viewport.height,
        )
    }

    /// Re-centres the canvas origin and flips y, then applies the surface offset
    pub fn canvas_to_screen(&self, p: &Vec2) -> Pixel {
        let x = (self.canvas_width as Real / 2.0 + p[0]).round() as i32;
        let y = (self.canvas_height as Real / 2.0 - p[1]).round() as i32;
        Pixel::new(x + self.offset_x, y + self.offset_y)
    }

    pub fn to_screen(&self, p: &Vec2) -> Pixel {
        self.canvas_to_screen(&self.viewport_to_canvas(p))
    }

    /// Whether a viewport point is finite and within `GUARD_BAND` canvas extents of the centre
    pub fn in_guard_band(&self, p: &Vec2) -> bool {
        if p.is_nan() {
            return false;
        }
        let c = self.viewport_to_canvas(p);
        c[0].abs() <= GUARD_BAND * self.canvas_width as Real
            && c[1].abs() <= GUARD_BAND * self.canvas_height as Real
    }

    /// Draws nothing when either end lies outside the guard band
    pub fn draw_line<S: Surface + ?Sized>(&self, surface: &mut S, a: &Vec2, b: &Vec2) {
        if !(self.in_guard_band(a) && self.in_guard_band(b)) {
            return;
        }
        draw_pixel_line(surface, self.to_screen(a), self.to_screen(b));
    }

    pub fn draw_wireframe_triangle<S: Surface + ?Sized>(&self, surface: &mut S, points: &[Vec2; 3]) {
        if !points.iter().all(|p| self.in_guard_band(p)) {
            return;
        }
        let [p0, p1, p2] = points.map(|p| self.to_screen(&p));
        draw_pixel_line(surface, p0, p1);
        draw_pixel_line(surface, p1, p2);
        draw_pixel_line(surface, p2, p0);
    }

    pub fn draw_filled_triangle<S: Surface + ?Sized>(&self, surface: &mut S, points: &[Vec2; 3]) {
        if !points.iter().all(|p| self.in_guard_band(p)) {
            return;
        }
        let [p0, p1, p2] = points.map(|p| self.to_screen(&p));
        for span in triangle_spans(p0, p1, p2) {
            for x in span.x_start..=span.x_end {
                surface.put_pixel(x, span.y);
            }
        }
    }
}

fn draw_pixel_line<S: Surface + ?Sized>(surface: &mut S, a: Pixel, b: Pixel) {
    for p in line_pixels(a, b) {
        surface.put_pixel(p.x, p.y);
    }
}

/// Bresenham line covering every octant, both endpoints included.
///
/// Any `i32` endpoints are accepted, but the result holds one pixel per step
/// along the longer axis; `Rasterizer` keeps its lines inside the guard band.
pub fn line_pixels(from: Pixel, to: Pixel) -> Vec<Pixel> {
    let (mut x, mut y) = (from.x as i64, from.y as i64);
    let (to_x, to_y) = (to.x as i64, to.y as i64);
    let dx = (to_x - x).abs();
    let dy = -(to_y - y).abs();
    let sx = if x < to_x { 1 } else { -1 };
    let sy = if y < to_y { 1 } else { -1 };
    let mut error = dx + dy;

    let mut pixels = Vec::with_capacity(dx.max(-dy) as usize + 1);
    loop {
        // x and y never leave the span between the endpoints
        pixels.push(Pixel::new(x as i32, y as i32));
        if x == to_x && y == to_y {
            break;
        }
        let e2 = 2 * error;
        if e2 >= dy {
            error += dy;
            x += sx;
        }
        if e2 <= dx {
            error += dx;
            y += sy;
        }
    }
    pixels
}

/// Dependent values along the integer steps `i0..=i1` of a linear function.
///
/// A zero-length range yields the single value `d0`.
pub fn interpolate(i0: i32, d0: Real, i1: i32, d1: Real) -> Vec<Real> {
    if i0 == i1 {
        return vec![d0];
    }
    let a = (d0 - d1) / (i0 as i64 - i1 as i64) as Real;
    let mut d = d0;
    let mut values = Vec::with_capacity((i1 as i64 - i0 as i64).max(0) as usize + 1);
    for _ in i0..=i1 {
        values.push(d);
        d += a;
    }
    values
}

/// Horizontal spans covering the triangle, top row first.
///
/// When all three points share one row the single span runs between the first
/// two points as given; the third is left to the outline.
pub fn triangle_spans(p0: Pixel, p1: Pixel, p2: Pixel) -> Vec<Span> {
    let (mut p0, mut p1, mut p2) = (p0, p1, p2);
    if p1.y < p0.y {
        std::mem::swap(&mut p1, &mut p0);
    }
    if p2.y < p0.y {
        std::mem::swap(&mut p2, &mut p0);
    }
    if p2.y < p1.y {
        std::mem::swap(&mut p2, &mut p1);
    }

    let x02 = interpolate(p0.y, p0.x as Real, p2.y, p2.x as Real);
    let mut x012 = interpolate(p0.y, p0.x as Real, p1.y, p1.x as Real);
    x012.pop();
    x012.extend(interpolate(p1.y, p1.x as Real, p2.y, p2.x as Real));

    let m = x012.len() / 2;
    let (left, right) = if x02[m] < x012[m] {
        (&x02, &x012)
    } else {
        (&x012, &x02)
    };

    (p0.y..=p2.y)
        .zip(left.iter().zip(right.iter()))
        .map(|(y, (l, r))| Span {
            y,
            x_start: l.round() as i32,
            x_end: r.round() as i32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::FrameBuffer;
    use std::collections::BTreeSet;

    fn px(x: i32, y: i32) -> Pixel {
        Pixel::new(x, y)
    }

    #[test]
    fn test_horizontal_line() {
        assert_eq!(
            line_pixels(px(0, 0), px(4, 0)),
            vec![px(0, 0), px(1, 0), px(2, 0), px(3, 0), px(4, 0)]
        );
    }

    #[test]
    fn test_steep_line_is_monotonic() {
        let pixels = line_pixels(px(0, 0), px(2, 4));
        assert_eq!(pixels.first(), Some(&px(0, 0)));
        assert_eq!(pixels.last(), Some(&px(2, 4)));
        assert_eq!(pixels.len(), 5);
        assert!(pixels.windows(2).all(|w| w[1].y >= w[0].y && w[1].x >= w[0].x));
    }

    #[test]
    fn test_all_octants_reach_endpoint() {
        let targets = [
            (5, 2), (2, 5), (-2, 5), (-5, 2),
            (-5, -2), (-2, -5), (2, -5), (5, -2),
            (0, 3), (0, -3), (3, 3), (-3, -3),
        ];
        for (x, y) in targets {
            let pixels = line_pixels(px(1, 1), px(1 + x, 1 + y));
            assert_eq!(pixels[0], px(1, 1));
            assert_eq!(*pixels.last().unwrap(), px(1 + x, 1 + y));
            assert_eq!(pixels.len() as i32, x.abs().max(y.abs()) + 1, "({}, {})", x, y);
            // 8-connected, no gaps
            assert!(pixels
                .windows(2)
                .all(|w| (w[1].x - w[0].x).abs() <= 1 && (w[1].y - w[0].y).abs() <= 1));
        }
    }

    #[test]
    fn test_single_point_line() {
        assert_eq!(line_pixels(px(3, 3), px(3, 3)), vec![px(3, 3)]);
    }

    #[test]
    fn test_interpolate() {
        assert_eq!(interpolate(0, 0.0, 4, 8.0), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        assert_eq!(interpolate(2, 7.0, 2, 100.0), vec![7.0]);
        assert_eq!(interpolate(0, 4.0, 4, 0.0), vec![4.0, 3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_right_triangle_fill() {
        let filled: BTreeSet<(i32, i32)> = triangle_spans(px(0, 0), px(4, 0), px(0, 4))
            .iter()
            .flat_map(|s| (s.x_start..=s.x_end).map(move |x| (x, s.y)))
            .collect();
        let expected: BTreeSet<(i32, i32)> = (0..=4)
            .flat_map(|y| (0..=4).map(move |x| (x, y)))
            .filter(|(x, y)| x + y <= 4)
            .collect();
        assert_eq!(filled, expected);
    }

    #[test]
    fn test_fill_is_order_independent() {
        let a = triangle_spans(px(0, 0), px(4, 0), px(0, 4));
        let b = triangle_spans(px(0, 4), px(0, 0), px(4, 0));
        let c = triangle_spans(px(4, 0), px(0, 4), px(0, 0));
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_flat_triangle_is_single_span() {
        let spans = triangle_spans(px(5, 2), px(1, 2), px(3, 2));
        assert_eq!(spans, vec![Span { y: 2, x_start: 1, x_end: 5 }]);

        // the third point does not widen the span
        let spans = triangle_spans(px(2, 7), px(4, 7), px(9, 7));
        assert_eq!(spans, vec![Span { y: 7, x_start: 2, x_end: 4 }]);
    }

    #[test]
    fn test_line_at_coordinate_extremes() {
        let line = line_pixels(px(i32::MAX - 2, i32::MIN), px(i32::MAX, i32::MIN + 2));
        assert_eq!(
            line,
            vec![
                px(i32::MAX - 2, i32::MIN),
                px(i32::MAX - 1, i32::MIN + 1),
                px(i32::MAX, i32::MIN + 2),
            ]
        );
        assert_eq!(line_pixels(px(i32::MIN, 0), px(i32::MIN, 0)), vec![px(i32::MIN, 0)]);
    }

    #[test]
    fn test_interpolate_at_coordinate_extremes() {
        assert_eq!(interpolate(i32::MAX - 1, 0.0, i32::MAX, 1.0), vec![0.0, 1.0]);
        assert_eq!(interpolate(i32::MIN, 4.0, i32::MIN + 2, 0.0), vec![4.0, 2.0, 0.0]);
        assert!(interpolate(i32::MAX, 0.0, i32::MIN, 1.0).is_empty());
    }

    #[test]
    fn test_points_outside_guard_band_are_not_drawn() {
        let r = Rasterizer::new(Viewport::new(2.0, 2.0), 20, 20).unwrap();
        assert!(r.in_guard_band(&Vec2::xy(15.0, -15.0)));
        assert!(!r.in_guard_band(&Vec2::xy(17.0, 0.0)));
        assert!(!r.in_guard_band(&Vec2::xy(Real::NAN, 0.0)));

        let mut fb = FrameBuffer::new(20, 20);
        r.draw_line(&mut fb, &Vec2::zeros(), &Vec2::xy(1e12, 0.0));
        let far = [Vec2::zeros(), Vec2::xy(0.5, 0.0), Vec2::xy(0.0, -1e15)];
        r.draw_wireframe_triangle(&mut fb, &far);
        r.draw_filled_triangle(&mut fb, &far);
        let nan = [Vec2::zeros(), Vec2::xy(0.5, 0.0), Vec2::xy(Real::NAN, 0.5)];
        r.draw_filled_triangle(&mut fb, &nan);
        assert!(fb.lit_pixels().is_empty());

        // inside the band the surface clips what falls off its edge
        r.draw_line(&mut fb, &Vec2::zeros(), &Vec2::xy(15.0, 0.0));
        assert_eq!(fb.lit_pixels().len(), 10);
    }

    #[test]
    fn test_viewport_to_screen() {
        let r = Rasterizer::new(Viewport::new(2.0, 2.0), 100, 100).unwrap();
        assert_eq!(r.viewport_to_canvas(&Vec2::xy(1.0, -0.5)), Vec2::xy(50.0, -25.0));
        assert_eq!(r.to_screen(&Vec2::zeros()), px(50, 50));
        // canvas up is screen down
        assert_eq!(r.to_screen(&Vec2::xy(0.5, 0.5)), px(75, 25));
    }

    #[test]
    fn test_canvas_centered_on_surface() {
        let mut r = Rasterizer::new(Viewport::default(), 100, 100).unwrap();
        r.center_on(300, 120);
        assert_eq!(r.to_screen(&Vec2::zeros()), px(150, 60));
    }

    #[test]
    fn test_invalid_extents_rejected() {
        assert!(matches!(
            Rasterizer::new(Viewport::new(0.0, 1.0), 10, 10),
            Err(Error::InvalidConfig(_))
        ));
        assert!(Rasterizer::new(Viewport::default(), 0, 10).is_err());
    }

    #[test]
    fn test_draw_wireframe_and_filled() {
        let r = Rasterizer::new(Viewport::new(2.0, 2.0), 20, 20).unwrap();
        let tri = [Vec2::xy(-0.5, -0.5), Vec2::xy(0.5, -0.5), Vec2::xy(0.0, 0.5)];

        let mut outline = FrameBuffer::new(20, 20);
        r.draw_wireframe_triangle(&mut outline, &tri);
        let mut filled = FrameBuffer::new(20, 20);
        r.draw_filled_triangle(&mut filled, &tri);

        let outline = outline.lit_pixels();
        let filled = filled.lit_pixels();
        assert_eq!(outline.len(), 30);
        assert_eq!(filled.len(), 66);
        for corner in [(5, 15), (15, 15), (10, 5)] {
            assert!(outline.contains(&corner));
            assert!(filled.contains(&corner));
        }
        assert!(filled.contains(&(10, 10)));
        assert!(!outline.contains(&(10, 10)));
    }
}
