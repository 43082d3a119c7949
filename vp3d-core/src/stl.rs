/// STL import (binary and ASCII) into indexed meshes
use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{multispace0, multispace1},
    multi::many0,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::error::StlError;
use crate::mesh::Mesh;
use crate::vector::Vector3;

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

type Facet = [Vector3; 3];

/// Build a mesh with three fresh vertices and one face per facet.
///
/// STL facets wind counter-clockwise around their outward normal. The
/// renderer keeps faces whose computed normal points along +Z, so each face
/// is stored with reversed winding.
fn mesh_from_facets(facets: &[Facet]) -> Mesh {
    let mut mesh = Mesh::with_capacity(facets.len() * 3, facets.len());
    for [a, b, c] in facets {
        let ia = mesh.add_vertex(a.x, a.y, a.z);
        let ib = mesh.add_vertex(b.x, b.y, b.z);
        let ic = mesh.add_vertex(c.x, c.y, c.z);
        mesh.add_face([ia, ic, ib]);
    }
    mesh
}

fn read_vector(chunk: &[u8]) -> Vector3 {
    let component = |i: usize| {
        f32::from_le_bytes([chunk[i], chunk[i + 1], chunk[i + 2], chunk[i + 3]])
    };
    Vector3::new(component(0), component(4), component(8))
}

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8]) -> Result<Mesh, StlError> {
    if data.len() < HEADER_LEN + 4 {
        return Err(StlError::TooShort(data.len()));
    }

    let data = &data[HEADER_LEN..];
    let facet_count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
    let body = &data[4..];

    let mut facets = Vec::with_capacity(facet_count.min(body.len() / FACET_LEN));
    for (facet, chunk) in body.chunks(FACET_LEN).take(facet_count).enumerate() {
        if chunk.len() < FACET_LEN {
            return Err(StlError::Truncated {
                facet,
                expected: facet_count,
            });
        }
        // The stored normal (bytes 0..12) is ignored; normals are recomputed
        // every frame. Bytes 48..50 are the attribute count.
        facets.push([
            read_vector(&chunk[12..24]),
            read_vector(&chunk[24..36]),
            read_vector(&chunk[36..48]),
        ]);
    }

    if facets.len() < facet_count {
        return Err(StlError::Truncated {
            facet: facets.len(),
            expected: facet_count,
        });
    }

    Ok(mesh_from_facets(&facets))
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> Result<Mesh, StlError> {
    match parse_solid(input) {
        Ok((_, facets)) => Ok(mesh_from_facets(&facets)),
        Err(e) => Err(StlError::Ascii(format!("{:?}", e))),
    }
}

fn parse_solid(input: &str) -> IResult<&str, Vec<Facet>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    // Optional name, up to the end of the line
    let (input, _) = take_till(|c| c == '\n')(input)?;
    let (input, facets) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    Ok((input, facets))
}

fn parse_facet(input: &str) -> IResult<&str, Facet> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = parse_vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, v1) = parse_vertex(input)?;
    let (input, v2) = parse_vertex(input)?;
    let (input, v3) = parse_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;

    Ok((input, [v1, v2, v3]))
}

fn parse_vertex(input: &str) -> IResult<&str, Vector3> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    parse_vector3(input)
}

fn parse_vector3(input: &str) -> IResult<&str, Vector3> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, Vector3::new(x, y, z)))
}

/// Detect and parse STL file (binary or ASCII)
pub fn parse_stl(data: &[u8]) -> Result<Mesh, StlError> {
    // Binary files may also start with "solid", so fall back on failure
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(mesh) = parse_ascii_stl(text) {
                return Ok(mesh);
            }
        }
    }

    parse_binary_stl(data)
}
