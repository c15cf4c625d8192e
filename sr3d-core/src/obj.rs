/// Wavefront OBJ subset parser: `v` vertices and triangular `f` faces
use std::fs;
use std::path::Path;

use nom::{
    bytes::complete::{tag, take_while},
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map_res, opt},
    multi::many1,
    number::complete::double,
    sequence::preceded,
    IResult,
};

use crate::error::{Error, Result};
use crate::geometry::{Face, Shape, Vertex, FACE_PALETTE};
use crate::vector::Vec3;

/// Read and parse an OBJ file; the shape is named after the file stem
pub fn load_obj(path: &Path) -> Result<Shape> {
    let source = fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "shape".to_string());
    let shape = parse_obj(&name, &source)?;
    log::info!(
        "Loaded '{}' from {}: {} vertices, {} faces",
        shape.name(),
        path.display(),
        shape.vertices().len(),
        shape.faces().len()
    );
    Ok(shape)
}

/// Parse OBJ text. Polygons with more than three corners are fan-triangulated;
/// each source face takes the next palette colour.
pub fn parse_obj(name: &str, source: &str) -> Result<Shape> {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    let mut polygon_count = 0usize;

    for (number, raw) in source.lines().enumerate() {
        let line_no = number + 1;
        let line = match raw.find('#') {
            Some(i) => &raw[..i],
            None => raw,
        }
        .trim();

        let keyword = match line.split_whitespace().next() {
            Some(keyword) => keyword,
            None => continue,
        };

        match keyword {
            "v" => {
                let (_, vertex) = all_consuming(vertex_statement)(line).map_err(|e| Error::ObjParse {
                    line: line_no,
                    message: format!("malformed vertex '{}': {:?}", line, e),
                })?;
                vertices.push(vertex);
            }
            "f" => {
                let (_, indices) = all_consuming(face_statement)(line).map_err(|e| Error::ObjParse {
                    line: line_no,
                    message: format!("malformed face '{}': {:?}", line, e),
                })?;
                if indices.len() < 3 {
                    return Err(Error::ObjParse {
                        line: line_no,
                        message: format!("face has {} vertices, need at least 3", indices.len()),
                    });
                }

                let mut corners = Vec::with_capacity(indices.len());
                for index in indices {
                    if index == 0 || index > vertices.len() {
                        return Err(Error::ObjParse {
                            line: line_no,
                            message: format!(
                                "vertex index {} out of range (1..={})",
                                index,
                                vertices.len()
                            ),
                        });
                    }
                    corners.push(index - 1);
                }

                let color = FACE_PALETTE[polygon_count % FACE_PALETTE.len()];
                polygon_count += 1;
                for pair in corners[1..].windows(2) {
                    faces.push(Face::new(corners[0], pair[0], pair[1], color));
                }
            }
            other => log::debug!("line {}: skipping '{}' statement", line_no, other),
        }
    }

    let shape = Shape::new(name, vertices, faces);
    shape.validate()?;
    Ok(shape)
}

fn vertex_statement(input: &str) -> IResult<&str, Vertex> {
    let (input, _) = tag("v")(input)?;
    let (input, x) = preceded(space1, double)(input)?;
    let (input, y) = preceded(space1, double)(input)?;
    let (input, z) = preceded(space1, double)(input)?;
    let (input, w) = opt(preceded(space1, double))(input)?;
    let (input, _) = space0(input)?;
    Ok((input, Vertex::with_weight(Vec3::xyz(x, y, z), w.unwrap_or(1.0))))
}

/// `i`, `i/t`, `i//n` or `i/t/n`; only the position index is kept
fn face_index(input: &str) -> IResult<&str, usize> {
    let (input, index) = map_res(digit1, str::parse::<usize>)(input)?;
    let (input, _) = opt(preceded(char('/'), take_while(|c: char| !c.is_whitespace())))(input)?;
    Ok((input, index))
}

fn face_statement(input: &str) -> IResult<&str, Vec<usize>> {
    let (input, _) = tag("f")(input)?;
    let (input, indices) = many1(preceded(space1, face_index))(input)?;
    let (input, _) = space0(input)?;
    Ok((input, indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TRIANGLE: &str = "\
# a single triangle
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.5

f 1 2 3
";

    #[test]
    fn test_parse_triangle() {
        let shape = parse_obj("tri", TRIANGLE).unwrap();
        assert_eq!(shape.name(), "tri");
        assert_eq!(shape.vertices().len(), 3);
        assert_eq!(shape.vertices()[2].position, Vec3::xyz(0.0, 1.0, 0.5));
        assert_eq!(shape.vertices()[2].h, 1.0);
        assert_eq!(shape.faces(), &[Face::new(0, 1, 2, FACE_PALETTE[0])]);
    }

    #[test]
    fn test_weights_slashes_and_unknown_statements() {
        let source = "\
o thing
v 1 2 3 0.5
v -1e1 2.5 3
v 4 5 6
vn 0 0 1
vt 0.5 0.5
s off
f 1/1/1 2//1 3/2 # trailing comment
";
        let shape = parse_obj("thing", source).unwrap();
        assert_eq!(shape.vertices()[0].h, 0.5);
        assert_eq!(shape.vertices()[1].position, Vec3::xyz(-10.0, 2.5, 3.0));
        assert_eq!(shape.faces()[0].indices, [0, 1, 2]);
    }

    #[test]
    fn test_quads_are_fan_triangulated() {
        let source = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\nf 1 3 4\n";
        let shape = parse_obj("quad", source).unwrap();
        assert_eq!(shape.faces().len(), 3);
        assert_eq!(shape.faces()[0].indices, [0, 1, 2]);
        assert_eq!(shape.faces()[1].indices, [0, 2, 3]);
        assert_eq!(shape.faces()[0].color, shape.faces()[1].color);
        assert_ne!(shape.faces()[1].color, shape.faces()[2].color);
    }

    #[test]
    fn test_malformed_vertex_is_fatal() {
        let err = parse_obj("bad", "v 1.0 2.0\n").unwrap_err();
        assert!(matches!(err, Error::ObjParse { line: 1, .. }));

        let err = parse_obj("bad", "v 0 0 0\nv 1 x 2\n").unwrap_err();
        assert!(matches!(err, Error::ObjParse { line: 2, .. }));
    }

    #[test]
    fn test_bad_faces_are_fatal() {
        let base = "v 0 0 0\nv 1 0 0\nv 0 1 0\n";
        for face in ["f 1 2 4", "f 0 1 2", "f 1 2", "f 1 2 three"] {
            let source = format!("{}{}\n", base, face);
            let err = parse_obj("bad", &source).unwrap_err();
            assert!(matches!(err, Error::ObjParse { line: 4, .. }), "{}", face);
        }
    }

    #[test]
    fn test_load_obj_names_shape_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pyramid.obj");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nf 1 2 3\nf 1 2 4\nf 1 3 4\nf 2 3 4\n"
        )
        .unwrap();

        let shape = load_obj(&path).unwrap();
        assert_eq!(shape.name(), "pyramid");
        assert_eq!(shape.faces().len(), 4);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_obj(Path::new("/nonexistent/shape.obj")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
