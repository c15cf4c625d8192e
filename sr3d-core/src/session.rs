/// Single-threaded frame loop tying input, camera, and renderer together
use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::input::{Action, InputEvent, InputSource, KeyBindings};
use crate::render::{RenderStats, Renderer};
use crate::scene::{DrawMode, Scene};
use crate::surface::Surface;

pub struct Session {
    scene: Scene,
    camera: Camera,
    renderer: Renderer,
    bindings: KeyBindings,
    running: bool,
    frames: u64,
}

impl Session {
    pub fn new(scene: Scene, config: &RenderConfig) -> Result<Self> {
        let renderer = Renderer::new(config)?;
        let camera = Camera::with_speeds(config.move_speed, config.rotate_speed)
            .with_focal_distance(config.focal_distance);
        Ok(Self {
            scene,
            camera,
            renderer,
            bindings: KeyBindings::default(),
            running: true,
            frames: 0,
        })
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.renderer.draw_mode()
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn apply(&mut self, action: Action) {
        log::trace!("Action: {:?}", action);
        match action {
            Action::Quit => self.quit(),
            Action::ToggleDrawMode => self.renderer.toggle_draw_mode(),
            Action::StartMove(axis, direction) => self.camera.start_move(axis, direction),
            Action::StopMove(axis) => self.camera.stop_move(axis),
            Action::StartRotate(axis, direction) => self.camera.start_rotate(axis, direction),
            Action::StopRotate(axis) => self.camera.stop_rotate(axis),
            Action::ScaleUp => self.scene.scale_all_up(),
            Action::ScaleDown => self.scene.scale_all_down(),
        }
    }

    pub fn handle(&mut self, event: &InputEvent) {
        if let Some(action) = self.bindings.action_for(event) {
            self.apply(action);
        }
    }

    /// Integrate camera motion and draw one frame
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<RenderStats> {
        self.camera.update();
        surface.clear();
        let stats = self.renderer.render(&self.scene, &self.camera, surface)?;
        surface.present()?;
        self.frames += 1;
        Ok(stats)
    }

    /// Poll, update, draw, present until a quit action arrives
    pub fn run<S, I>(&mut self, surface: &mut S, input: &mut I) -> Result<()>
    where
        S: Surface + ?Sized,
        I: InputSource + ?Sized,
    {
        self.renderer.fit_surface(surface.width(), surface.height());
        log::info!(
            "Rendering {} objects on a {}x{} surface",
            self.scene.objects().len(),
            surface.width(),
            surface.height()
        );

        while self.running {
            for event in input.poll()? {
                self.handle(&event);
            }
            if !self.running {
                break;
            }
            self.step(surface)?;
        }

        log::info!("Session ended after {} frames", self.frames);
        Ok(())
    }
}
