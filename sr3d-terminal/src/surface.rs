/// Half-block terminal surface: each cell shows two stacked pixels
use crossterm::{
    cursor,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use sr3d_core::{Color, FrameBuffer, Surface};
use std::io::{self, Write};

/// Upper half block; foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '\u{2580}';

/// Rows reserved above the image for the status line
const STATUS_ROWS: u16 = 1;

pub struct TerminalSurface<W: Write> {
    out: W,
    buffer: FrameBuffer,
    background: Color,
    status: String,
    /// Wipe the whole screen on the next present; set after a resize
    stale: bool,
}

impl<W: Write> TerminalSurface<W> {
    /// Surface filling a terminal of `columns` x `rows` cells
    pub fn new(out: W, columns: u16, rows: u16, background: Color) -> Self {
        Self {
            out,
            buffer: FrameBuffer::new(columns as u32, pixel_rows(rows)),
            background,
            status: String::new(),
            stale: false,
        }
    }

    /// Follow a terminal resize; the drawing is discarded
    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.buffer.resize(columns as u32, pixel_rows(rows));
        self.stale = true;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn color_at(&self, x: u32, y: u32) -> style::Color {
        to_terminal_color(self.buffer.pixel(x as i32, y as i32).unwrap_or(self.background))
    }

    fn draw(&mut self) -> io::Result<()> {
        let rows = self.buffer.height() / 2;
        let mut last: Option<(style::Color, style::Color)> = None;
        if self.stale {
            self.out.queue(ResetColor)?.queue(Clear(ClearType::All))?;
            self.stale = false;
        }

        for row in 0..rows {
            self.out
                .queue(cursor::MoveTo(0, row as u16 + STATUS_ROWS))?;
            for x in 0..self.buffer.width() {
                let colors = (self.color_at(x, row * 2), self.color_at(x, row * 2 + 1));
                if last != Some(colors) {
                    self.out
                        .queue(SetForegroundColor(colors.0))?
                        .queue(SetBackgroundColor(colors.1))?;
                    last = Some(colors);
                }
                self.out.queue(Print(HALF_BLOCK))?;
            }
        }

        self.out
            .queue(ResetColor)?
            .queue(cursor::MoveTo(0, 0))?
            .queue(Clear(ClearType::CurrentLine))?
            .queue(SetForegroundColor(style::Color::Yellow))?
            .queue(Print(&self.status))?
            .queue(ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn width(&self) -> u32 {
        self.buffer.width()
    }

    fn height(&self) -> u32 {
        self.buffer.height()
    }

    fn set_draw_color(&mut self, color: Color) {
        self.buffer.set_draw_color(color);
    }

    fn put_pixel(&mut self, x: i32, y: i32) {
        self.buffer.put_pixel(x, y);
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn present(&mut self) -> sr3d_core::Result<()> {
        self.draw()?;
        self.buffer.present()
    }
}

fn pixel_rows(rows: u16) -> u32 {
    rows.saturating_sub(STATUS_ROWS) as u32 * 2
}

fn to_terminal_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_leaves_room_for_status() {
        let surface = TerminalSurface::new(Vec::new(), 80, 24, Color::BLACK);
        assert_eq!((surface.width(), surface.height()), (80, 46));
    }

    #[test]
    fn test_present_writes_every_cell() {
        let mut surface = TerminalSurface::new(Vec::new(), 4, 3, Color::BLACK);
        surface.set_draw_color(Color::RED);
        surface.put_pixel(0, 0);
        surface.set_status("frame 1");
        surface.present().unwrap();
        assert_eq!(surface.buffer().frames(), 1);

        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(out.matches(HALF_BLOCK).count(), 8);
        assert!(out.contains("38;2;220;40;40"));
        assert!(out.contains("frame 1"));
    }

    #[test]
    fn test_resize_follows_terminal() {
        let mut surface = TerminalSurface::new(Vec::new(), 4, 3, Color::BLACK);
        surface.resize(6, 5);
        assert_eq!((surface.width(), surface.height()), (6, 8));

        surface.set_draw_color(Color::RED);
        surface.put_pixel(5, 7);
        surface.present().unwrap();
        surface.present().unwrap();
        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(out.matches(HALF_BLOCK).count(), 48);
        assert_eq!(out.matches("\x1b[2J").count(), 1);
    }

    #[test]
    fn test_tiny_terminal_has_no_pixels() {
        let mut surface = TerminalSurface::new(Vec::new(), 10, 1, Color::BLACK);
        assert_eq!(surface.height(), 0);
        surface.put_pixel(0, 0);
        surface.present().unwrap();
        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(out.matches(HALF_BLOCK).count(), 0);
    }
}
