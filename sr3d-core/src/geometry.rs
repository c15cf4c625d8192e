/// Geometry primitives for 3D rendering
use crate::error::{Error, Result};
use crate::surface::Color;
use crate::vector::{Real, Vec3, Vec4};

/// Colours handed out to faces that do not declare one
pub const FACE_PALETTE: [Color; 6] = [
    Color::RED,
    Color::BLUE,
    Color::GREEN,
    Color::MAGENTA,
    Color::YELLOW,
    Color::CYAN,
];

/// A 3D vertex with its homogeneous weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub h: Real,
}

impl Vertex {
    pub fn new(x: Real, y: Real, z: Real) -> Self {
        Self {
            position: Vec3::xyz(x, y, z),
            h: 1.0,
        }
    }

    pub fn with_weight(position: Vec3, h: Real) -> Self {
        Self { position, h }
    }

    pub fn homogeneous(&self) -> Vec4 {
        self.position.extend(self.h)
    }
}

/// A triangle referencing three vertices of its shape by index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub indices: [usize; 3],
    pub color: Color,
}

impl Face {
    pub fn new(v0: usize, v1: usize, v2: usize, color: Color) -> Self {
        Self {
            indices: [v0, v1, v2],
            color,
        }
    }
}

/// Named vertex and face lists
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    name: String,
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl Shape {
    /// Face indices are not checked here; see `validate`.
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self {
            name: name.into(),
            vertices,
            faces,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// The three corners of face `face`
    pub fn face_vertices(&self, face: usize) -> Result<[Vertex; 3]> {
        let f = self.faces.get(face).ok_or(Error::IndexOutOfRange {
            index: face,
            len: self.faces.len(),
        })?;
        let corner = |index: usize| {
            self.vertices
                .get(index)
                .copied()
                .ok_or_else(|| Error::InvalidFaceIndex {
                    shape: self.name.clone(),
                    face,
                    index,
                    vertex_count: self.vertices.len(),
                })
        };
        Ok([
            corner(f.indices[0])?,
            corner(f.indices[1])?,
            corner(f.indices[2])?,
        ])
    }

    /// Check that every face index refers to an existing vertex
    pub fn validate(&self) -> Result<()> {
        for (face, f) in self.faces.iter().enumerate() {
            if let Some(&index) = f.indices.iter().find(|&&i| i >= self.vertices.len()) {
                return Err(Error::InvalidFaceIndex {
                    shape: self.name.clone(),
                    face,
                    index,
                    vertex_count: self.vertices.len(),
                });
            }
        }
        Ok(())
    }

    /// Axis-aligned cube centred on the origin, two triangles per side
    pub fn cube(size: Real) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Vertex::new(-half, -half, -half),
            Vertex::new(half, -half, -half),
            Vertex::new(half, half, -half),
            Vertex::new(-half, half, -half),
            Vertex::new(-half, -half, half),
            Vertex::new(half, -half, half),
            Vertex::new(half, half, half),
            Vertex::new(-half, half, half),
        ];

        let sides = [
            // Front face
            [0, 3, 2, 1],
            // Back face
            [4, 5, 6, 7],
            // Top face
            [3, 7, 6, 2],
            // Bottom face
            [0, 1, 5, 4],
            // Right face
            [1, 2, 6, 5],
            // Left face
            [0, 4, 7, 3],
        ];

        let mut faces = Vec::with_capacity(12);
        for (i, [a, b, c, d]) in sides.into_iter().enumerate() {
            let color = FACE_PALETTE[i % FACE_PALETTE.len()];
            faces.push(Face::new(a, b, c, color));
            faces.push(Face::new(a, c, d, color));
        }

        Self::new("cube", vertices, faces)
    }

    /// Flat hexagon in the z = 0 plane, split into four triangles
    pub fn hexagon() -> Self {
        let vertices = vec![
            Vertex::new(-1.0, 0.0, 0.0),
            Vertex::new(-0.5, -0.75, 0.0),
            Vertex::new(0.5, -0.75, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.5, 0.75, 0.0),
            Vertex::new(-0.5, 0.75, 0.0),
        ];
        let faces = vec![
            Face::new(0, 1, 5, Color::RED),
            Face::new(1, 2, 4, Color::BLUE),
            Face::new(1, 4, 5, Color::GREEN),
            Face::new(2, 3, 4, Color::MAGENTA),
        ];
        Self::new("hexagon", vertices, faces)
    }
}
