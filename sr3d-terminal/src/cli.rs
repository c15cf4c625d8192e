/// Command-line options for the terminal renderer
use clap::{Parser, ValueEnum};
use sr3d_core::camera::{DEFAULT_FOCAL_DISTANCE, DEFAULT_MOVE_SPEED, DEFAULT_ROTATE_SPEED};
use sr3d_core::config::DEFAULT_OBJECT_DEPTH;
use sr3d_core::{DrawMode, ProjectionMode, RenderConfig};
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Wireframe,
    Solid,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionArg {
    /// Divide x and y by depth
    Divide,
    /// Intersect with the plane z = distance
    Plane,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "sr3d-terminal")]
#[command(about = "Software 3D renderer for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// OBJ files to display; a demo cube and hexagon are shown when omitted
    pub files: Vec<PathBuf>,

    /// Initial draw mode
    #[arg(long, value_enum, default_value_t = ModeArg::Wireframe)]
    pub mode: ModeArg,

    #[arg(long, value_enum, default_value_t = ProjectionArg::Divide)]
    pub projection: ProjectionArg,

    /// Projection plane distance
    #[arg(long, default_value_t = DEFAULT_FOCAL_DISTANCE)]
    pub distance: f64,

    /// Camera units per frame
    #[arg(long, default_value_t = DEFAULT_MOVE_SPEED)]
    pub move_speed: f64,

    /// Camera degrees per frame
    #[arg(long, default_value_t = DEFAULT_ROTATE_SPEED)]
    pub rotate_speed: f64,

    /// Distance in front of the camera where shapes are placed
    #[arg(long, default_value_t = DEFAULT_OBJECT_DEPTH)]
    pub depth: f64,

    /// Target frames per second
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Render settings before the canvas is fitted to the terminal
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            projection: match self.projection {
                ProjectionArg::Divide => ProjectionMode::PerspectiveDivide,
                ProjectionArg::Plane => ProjectionMode::PlaneDistance,
            },
            draw_mode: match self.mode {
                ModeArg::Wireframe => DrawMode::Wireframe,
                ModeArg::Solid => DrawMode::Solid,
            },
            focal_distance: self.distance,
            move_speed: self.move_speed,
            rotate_speed: self.rotate_speed,
            object_depth: self.depth,
            ..RenderConfig::default()
        }
    }
}
