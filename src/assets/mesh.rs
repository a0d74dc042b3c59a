use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Aabb, Vec2, Vec3};
use crate::foundation::error::{ThumbnailError, ThumbnailResult};

/// One corner of a triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub v: [Vertex; 3],
}

/// Triangle soup loaded from an OBJ file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(
            self.triangles
                .iter()
                .flat_map(|t| t.v.iter().map(|v| v.position)),
        )
    }
}

/// Read and parse an OBJ file. Empty meshes are rejected.
pub fn load_obj(path: &Path) -> ThumbnailResult<Mesh> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("read mesh '{}'", path.display()))
        .map_err(|e| ThumbnailError::asset_load(format!("{e:#}")))?;
    parse_obj(&src).map_err(|e| match e {
        ThumbnailError::AssetLoad(msg) => {
            ThumbnailError::asset_load(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}

/// Parse the `v`/`vt`/`vn`/`f` subset of Wavefront OBJ.
///
/// Polygons are fan-triangulated. Faces without normals get their flat face normal.
pub fn parse_obj(src: &str) -> ThumbnailResult<Mesh> {
    let mut positions = Vec::<Vec3>::new();
    let mut uvs = Vec::<Vec2>::new();
    let mut normals = Vec::<Vec3>::new();
    let mut mesh = Mesh::default();

    for (line_no, raw) in src.lines().enumerate() {
        let line_no = line_no + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();

        match keyword {
            "v" => positions.push(parse_vec3(&args, line_no)?),
            "vn" => normals.push(parse_vec3(&args, line_no)?),
            "vt" => {
                let u = parse_f32(args.first().copied(), line_no)?;
                let v = match args.get(1).copied() {
                    Some(s) => parse_f32(Some(s), line_no)?,
                    None => 0.0,
                };
                uvs.push(Vec2::new(u, v));
            }
            "f" => {
                if args.len() < 3 {
                    return Err(obj_error(line_no, "face needs at least 3 vertices"));
                }
                let corners = args
                    .iter()
                    .map(|r| resolve_corner(r, &positions, &uvs, &normals, line_no))
                    .collect::<ThumbnailResult<Vec<_>>>()?;
                for i in 1..corners.len() - 1 {
                    mesh.triangles
                        .push(make_triangle([corners[0], corners[i], corners[i + 1]]));
                }
            }
            // o, g, s, usemtl, mtllib, l, p ...
            _ => {}
        }
    }

    if mesh.is_empty() {
        return Err(ThumbnailError::asset_load("mesh contains no triangles"));
    }
    Ok(mesh)
}

#[derive(Clone, Copy)]
struct Corner {
    position: Vec3,
    uv: Option<Vec2>,
    normal: Option<Vec3>,
}

fn make_triangle(c: [Corner; 3]) -> Triangle {
    let face_normal = (c[1].position - c[0].position)
        .cross(c[2].position - c[0].position)
        .normalize_or_zero();
    let vertex = |k: Corner| Vertex {
        position: k.position,
        normal: k.normal.map(Vec3::normalize_or_zero).unwrap_or(face_normal),
        uv: k.uv.unwrap_or(Vec2::ZERO),
    };
    Triangle {
        v: [vertex(c[0]), vertex(c[1]), vertex(c[2])],
    }
}

fn resolve_corner(
    r: &str,
    positions: &[Vec3],
    uvs: &[Vec2],
    normals: &[Vec3],
    line_no: usize,
) -> ThumbnailResult<Corner> {
    let mut fields = r.split('/');
    let position = match fields.next() {
        Some(s) if !s.is_empty() => positions[resolve_index(s, positions.len(), line_no)?],
        _ => return Err(obj_error(line_no, format!("face vertex '{r}' has no position"))),
    };
    let uv = match fields.next() {
        Some(s) if !s.is_empty() => Some(uvs[resolve_index(s, uvs.len(), line_no)?]),
        _ => None,
    };
    let normal = match fields.next() {
        Some(s) if !s.is_empty() => Some(normals[resolve_index(s, normals.len(), line_no)?]),
        _ => None,
    };
    Ok(Corner {
        position,
        uv,
        normal,
    })
}

/// Map a 1-based (or negative, relative) OBJ index into `0..len`.
fn resolve_index(s: &str, len: usize, line_no: usize) -> ThumbnailResult<usize> {
    let i: i64 = s
        .parse()
        .map_err(|_| obj_error(line_no, format!("invalid index '{s}'")))?;
    let resolved = match i {
        0 => None,
        i if i > 0 => Some(i - 1),
        i => Some(len as i64 + i),
    };
    resolved
        .filter(|&k| k >= 0 && (k as usize) < len)
        .map(|k| k as usize)
        .ok_or_else(|| obj_error(line_no, format!("index {i} out of range (have {len})")))
}

fn parse_vec3(args: &[&str], line_no: usize) -> ThumbnailResult<Vec3> {
    Ok(Vec3::new(
        parse_f32(args.first().copied(), line_no)?,
        parse_f32(args.get(1).copied(), line_no)?,
        parse_f32(args.get(2).copied(), line_no)?,
    ))
}

fn parse_f32(s: Option<&str>, line_no: usize) -> ThumbnailResult<f32> {
    let s = s.ok_or_else(|| obj_error(line_no, "missing coordinate"))?;
    s.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| obj_error(line_no, format!("invalid number '{s}'")))
}

fn obj_error(line_no: usize, msg: impl std::fmt::Display) -> ThumbnailError {
    ThumbnailError::asset_load(format!("obj line {line_no}: {msg}"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/mesh.rs"]
mod tests;
