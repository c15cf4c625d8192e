/// SR3D Core Library - Software 3D rendering pipeline
///
/// Fixed-size linear algebra, camera and object transforms, perspective
/// projection, and scanline rasterization onto an abstract pixel surface.
/// Front ends supply a `Surface` and an `InputSource` and drive a `Session`.

pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod matrix;
pub mod obj;
pub mod projection;
pub mod raster;
pub mod render;
pub mod scene;
pub mod session;
pub mod surface;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use camera::{Axis, Camera, Direction};
pub use config::RenderConfig;
pub use error::{Error, Result};
pub use geometry::{Face, Shape, Vertex};
pub use input::{Action, InputEvent, InputSource, Key, KeyBindings, KeyPhase};
pub use matrix::{Mat33, Mat44, Matrix};
pub use obj::{load_obj, parse_obj};
pub use projection::{Frustum, ProjectionMode, Projector};
pub use raster::{Rasterizer, Viewport};
pub use render::{RenderStats, Renderer};
pub use scene::{DrawMode, Object, Scene, ShapeId};
pub use session::Session;
pub use surface::{Color, FrameBuffer, Surface};
pub use transform::Transform;
pub use vector::{Real, Vec2, Vec3, Vec4, Vector};
