/// Shape arena and placed objects
use crate::error::{Error, Result};
use crate::geometry::Shape;
use crate::transform::Transform;

/// Handle into a `ShapeRegistry`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(usize);

impl ShapeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Owns every shape; objects refer to them by `ShapeId`.
///
/// Shapes are never removed, so a handle stays valid for the registry's lifetime.
#[derive(Debug, Default, Clone)]
pub struct ShapeRegistry {
    shapes: Vec<Shape>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, shape: Shape) -> ShapeId {
        self.shapes.push(shape);
        ShapeId(self.shapes.len() - 1)
    }

    pub fn get(&self, id: ShapeId) -> Result<&Shape> {
        self.shapes.get(id.0).ok_or(Error::UnknownShape(id.0))
    }

    pub fn find(&self, name: &str) -> Option<ShapeId> {
        self.shapes.iter().position(|s| s.name() == name).map(ShapeId)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// A shape placed in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Object {
    pub shape: ShapeId,
    pub transform: Transform,
}

impl Object {
    pub fn new(shape: ShapeId, transform: Transform) -> Self {
        Self { shape, transform }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Wireframe,
    Solid,
}

impl DrawMode {
    pub fn toggle(self) -> Self {
        match self {
            DrawMode::Wireframe => DrawMode::Solid,
            DrawMode::Solid => DrawMode::Wireframe,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Scene {
    shapes: ShapeRegistry,
    objects: Vec<Object>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        log::debug!(
            "Registering shape '{}' ({} faces)",
            shape.name(),
            shape.faces().len()
        );
        self.shapes.add(shape)
    }

    /// Place a registered shape; returns the object's index
    pub fn place(&mut self, shape: ShapeId, transform: Transform) -> Result<usize> {
        self.shapes.get(shape)?;
        self.objects.push(Object::new(shape, transform));
        Ok(self.objects.len() - 1)
    }

    pub fn remove(&mut self, index: usize) -> Result<Object> {
        if index >= self.objects.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.objects.len(),
            });
        }
        Ok(self.objects.remove(index))
    }

    pub fn shape(&self, id: ShapeId) -> Result<&Shape> {
        self.shapes.get(id)
    }

    pub fn shapes(&self) -> &ShapeRegistry {
        &self.shapes
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [Object] {
        &mut self.objects
    }

    pub fn scale_all_up(&mut self) {
        for object in &mut self.objects {
            object.transform.scale_up();
        }
    }

    pub fn scale_all_down(&mut self) {
        for object in &mut self.objects {
            object.transform.scale_down();
        }
    }
}
