/// Output surface abstraction and an in-memory implementation
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(220, 40, 40);
    pub const GREEN: Color = Color::rgb(40, 200, 70);
    pub const BLUE: Color = Color::rgb(50, 90, 230);
    pub const YELLOW: Color = Color::rgb(240, 220, 50);
    pub const CYAN: Color = Color::rgb(40, 210, 220);
    pub const MAGENTA: Color = Color::rgb(210, 50, 200);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Pixel sink the rasterizer draws into.
///
/// Pixels outside `0..width` x `0..height` must be ignored.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn set_draw_color(&mut self, color: Color);
    fn put_pixel(&mut self, x: i32, y: i32);
    fn clear(&mut self);
    fn present(&mut self) -> Result<()>;
}

/// Row-major pixel grid; `None` is background
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Option<Color>>,
    color: Color,
    frames: u64,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width as usize * height as usize],
            color: Color::WHITE,
            frames: 0,
        }
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.offset(x, y).and_then(|i| self.pixels[i])
    }

    /// Coordinates of every drawn pixel in row-major order
    pub fn lit_pixels(&self) -> Vec<(i32, i32)> {
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_some())
            .map(|(i, _)| {
                let w = self.width as usize;
                ((i % w) as i32, (i / w) as i32)
            })
            .collect()
    }

    /// Number of completed `present` calls
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![None; width as usize * height as usize];
    }
}

impl Surface for FrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_draw_color(&mut self, color: Color) {
        self.color = color;
    }

    fn put_pixel(&mut self, x: i32, y: i32) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = Some(self.color);
        }
    }

    fn clear(&mut self) {
        self.pixels.fill(None);
    }

    fn present(&mut self) -> Result<()> {
        self.frames += 1;
        Ok(())
    }
}
