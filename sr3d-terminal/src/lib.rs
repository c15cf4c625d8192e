/// Terminal front end for the SR3D software renderer
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{self},
};
use sr3d_core::{load_obj, RenderConfig, Scene, Session, Shape, Surface, Transform, Vec3};
use std::io::{self, stdout, Stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub mod cli;
pub mod input;
pub mod surface;

pub use input::TerminalInput;
pub use surface::TerminalSurface;

/// Horizontal gap between neighbouring shapes
const SHAPE_SPACING: f64 = 3.0;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    session: Session,
    surface: TerminalSurface<Stdout>,
    frame_time: Duration,
    last_report: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Scene, config: RenderConfig, fps: u32) -> sr3d_core::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let surface = TerminalSurface::new(stdout(), columns, rows, config.background_color);
        if surface.width() == 0 || surface.height() == 0 {
            return Err(sr3d_core::Error::Surface(format!(
                "terminal of {}x{} cells is too small to draw in",
                columns, rows
            )));
        }
        let config = config.with_canvas(surface.width(), surface.height());
        let mut session = Session::new(scene, &config)?;
        session
            .renderer_mut()
            .fit_surface(surface.width(), surface.height());

        Ok(Self {
            session,
            surface,
            frame_time: Duration::from_secs(1) / fps.max(1),
            last_report: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> sr3d_core::Result<()> {
        let reports_releases = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if !reports_releases {
            log::warn!("Terminal does not report key releases; releases are synthesized on the next frame");
        }

        terminal::enable_raw_mode()?;
        let result = enter_screen(&mut stdout(), reports_releases).and_then(|()| {
            let mut input = TerminalInput::new(reports_releases);
            self.main_loop(&mut input)
        });
        let restored = restore_terminal(&mut stdout(), reports_releases, terminal::disable_raw_mode);

        result?;
        restored?;
        Ok(())
    }

    /// Resize the surface to the terminal and keep the canvas centred on it
    fn resize(&mut self, columns: u16, rows: u16) {
        self.surface.resize(columns, rows);
        let (width, height) = (self.surface.width(), self.surface.height());
        self.session.renderer_mut().fit_surface(width, height);
        log::debug!("Resized to {}x{} cells ({}x{} pixels)", columns, rows, width, height);
    }

    fn main_loop(&mut self, input: &mut TerminalInput) -> sr3d_core::Result<()> {
        use sr3d_core::InputSource;

        while self.session.is_running() {
            let frame_start = Instant::now();

            for event in input.poll()? {
                self.session.handle(&event);
            }
            if let Some((columns, rows)) = input.take_resize() {
                self.resize(columns, rows);
            }
            if !self.session.is_running() {
                break;
            }

            let status = self.status_line();
            self.surface.set_status(status);
            self.session.step(&mut self.surface)?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_report).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_report).as_secs_f32();
                self.frame_count = 0;
                self.last_report = now;
            }
        }

        log::info!("Stopped after {} frames", self.session.frames());
        Ok(())
    }

    fn status_line(&self) -> String {
        format!(
            "SR3D | {:?} | FPS: {:.1} | Arrows/PgUp/PgDn=Move WASD/E/R=Rotate +/-=Scale Space=Mode Q=Quit",
            self.session.draw_mode(),
            self.fps
        )
    }
}

fn enter_screen<W: Write>(out: &mut W, push_flags: bool) -> sr3d_core::Result<()> {
    execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
    if push_flags {
        execute!(
            out,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    Ok(())
}

/// Every step runs even when an earlier one fails; the first failure is returned
fn restore_terminal<W, F>(out: &mut W, pop_flags: bool, disable_raw_mode: F) -> io::Result<()>
where
    W: Write,
    F: FnOnce() -> io::Result<()>,
{
    let popped = if pop_flags {
        execute!(out, PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    let raw = disable_raw_mode();
    let screen = execute!(out, terminal::LeaveAlternateScreen, cursor::Show);
    popped.and(raw).and(screen)
}

/// Load each OBJ file into the scene, side by side at `depth`.
///
/// Without files the scene holds the demo cube and hexagon.
pub fn build_scene(files: &[PathBuf], depth: f64) -> sr3d_core::Result<Scene> {
    let mut shapes = Vec::with_capacity(files.len().max(2));
    if files.is_empty() {
        shapes.push(Shape::cube(1.0));
        shapes.push(Shape::hexagon());
    }
    for path in files {
        shapes.push(load_obj(path)?);
    }

    let mut scene = Scene::new();
    let middle = (shapes.len() as f64 - 1.0) / 2.0;
    for (i, shape) in shapes.into_iter().enumerate() {
        let x = (i as f64 - middle) * SHAPE_SPACING;
        let id = scene.add_shape(shape);
        scene.place(id, Transform::at(Vec3::xyz(x, 0.0, depth)))?;
    }
    log::info!("Scene has {} objects", scene.objects().len());
    Ok(scene)
}
