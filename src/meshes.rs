//! Geometry model: vertices, triangles, indexed meshes and renderable
//! objects, plus the OBJ/MTL import path and a couple of procedural
//! primitives.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use log::warn;
use obj::{Obj, ObjMaterial};

use crate::{
    error::RenderError,
    math::{Mat4, Vec2, Vec3},
    texture::Image,
};

/// The minimal vertex contract the clipper and rasterizer are generic over.
/// Anything carrying a position and texture coordinates that knows how to
/// interpolate and transform itself can flow through the pipeline.
pub trait MeshVertex: Copy {
    fn position(&self) -> Vec3;
    fn uv(&self) -> Vec2;
    /// Interpolate toward `other` at parameter `t`.
    fn lerp(&self, other: &Self, t: f32) -> Self;
    /// Transform the position, leaving every other attribute untouched.
    fn transformed(&self, mat: &Mat4) -> Self;
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vertex {
    pub position: Vec3,
    pub normals: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub const fn new(position: Vec3, normals: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            normals,
            uv,
        }
    }
}

impl MeshVertex for Vertex {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn uv(&self) -> Vec2 {
        self.uv
    }

    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            // Interpolated normals drift off unit length; bring them back.
            normals: self.normals.lerp(other.normals, t).normalized(),
            uv: self.uv.lerp(other.uv, t),
        }
    }

    fn transformed(&self, mat: &Mat4) -> Self {
        Self {
            position: *mat * self.position,
            ..*self
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Triangle<V: MeshVertex = Vertex> {
    pub a: V,
    pub b: V,
    pub c: V,
}

impl<V: MeshVertex> Triangle<V> {
    pub const fn new(a: V, b: V, c: V) -> Self {
        Self { a, b, c }
    }

    /// Geometric surface normal from the winding of a, b, c.
    pub fn normal(&self) -> Vec3 {
        let a = self.a.position();
        (self.b.position() - a)
            .cross(self.c.position() - a)
            .normalized()
    }

    pub fn transformed(&self, mat: &Mat4) -> Self {
        Self {
            a: self.a.transformed(mat),
            b: self.b.transformed(mat),
            c: self.c.transformed(mat),
        }
    }
}

/// Indexed triangle list. Every consecutive index triple forms one triangle;
/// a trailing incomplete triple is ignored by consumers.
#[derive(Clone, Debug, Default)]
pub struct Mesh<V: MeshVertex = Vertex> {
    pub vertices: Vec<V>,
    pub indices: Vec<u32>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        let mut any = false;

        for p in points {
            any = true;
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        if any { Self { min, max } } else { Self::default() }
    }
}

/// A renderable object: meshes with one diffuse texture and one bounding box
/// apiece (the three sequences stay parallel), plus a world placement.
#[derive(Clone, Debug)]
pub struct Object3D<V: MeshVertex = Vertex> {
    pub meshes: Vec<Mesh<V>>,
    pub diffuse_textures: Vec<Image>,
    pub bounding_boxes: Vec<Aabb>,

    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl<V: MeshVertex> Default for Object3D<V> {
    fn default() -> Self {
        Self {
            meshes: Vec::new(),
            diffuse_textures: Vec::new(),
            bounding_boxes: Vec::new(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::splat(1.0),
        }
    }
}

impl<V: MeshVertex> Object3D<V> {
    /// Single-mesh constructor; the AABB is derived from the mesh.
    pub fn from_mesh(mesh: Mesh<V>, texture: Image) -> Self {
        let aabb = Aabb::from_points(mesh.vertices.iter().map(|v| v.position()));

        Self {
            meshes: vec![mesh],
            diffuse_textures: vec![texture],
            bounding_boxes: vec![aabb],
            ..Self::default()
        }
    }
}

impl Object3D<Vertex> {
    /// Load a Wavefront OBJ (plus its MTL libraries) from disk. One mesh per
    /// OBJ group; faces that are not triangles are dropped; missing vertex
    /// attributes default to zero. A diffuse texture that cannot be found is
    /// a warning, not an error.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() || !path.exists() {
            return Err(RenderError::MissingFilePath(path.to_path_buf()));
        }

        let mut loaded = Obj::load(path)?;
        if let Err(e) = loaded.load_mtls() {
            warn!(
                "material libraries for {} failed to load: {e}",
                path.display()
            );
        }

        let data = &loaded.data;
        let parent = path.parent().unwrap_or_else(|| Path::new("."));

        let mut out = Self::default();

        for object in &data.objects {
            for group in &object.groups {
                let mut vertices: Vec<Vertex> = Vec::new();
                let mut indices: Vec<u32> = Vec::new();
                let mut remap: HashMap<(usize, Option<usize>, Option<usize>), u32> = HashMap::new();

                for poly in &group.polys {
                    if poly.0.len() != 3 {
                        continue;
                    }

                    for corner in &poly.0 {
                        let key = (corner.0, corner.1, corner.2);
                        let index = *remap.entry(key).or_insert_with(|| {
                            let p = data.position[corner.0];
                            let uv = corner
                                .1
                                // OBJ texture coordinates grow bottom-up.
                                .map(|i| Vec2::new(data.texture[i][0], 1.0 - data.texture[i][1]))
                                .unwrap_or_default();
                            let n = corner
                                .2
                                .map(|i| {
                                    Vec3::new(
                                        data.normal[i][0],
                                        data.normal[i][1],
                                        data.normal[i][2],
                                    )
                                })
                                .unwrap_or_default();

                            vertices.push(Vertex::new(Vec3::new(p[0], p[1], p[2]), n, uv));
                            (vertices.len() - 1) as u32
                        });

                        indices.push(index);
                    }
                }

                let aabb = Aabb::from_points(vertices.iter().map(|v| v.position));
                let texture = load_group_texture(group, parent);

                out.meshes.push(Mesh { vertices, indices });
                out.diffuse_textures.push(texture);
                out.bounding_boxes.push(aabb);
            }
        }

        Ok(out)
    }
}

fn load_group_texture(group: &obj::Group, parent: &Path) -> Image {
    let map_kd = match &group.material {
        Some(ObjMaterial::Mtl(material)) => material.map_kd.clone(),
        Some(ObjMaterial::Ref(name)) => {
            warn!("material '{name}' was referenced but never resolved");
            None
        }
        None => None,
    };

    let Some(map_kd) = map_kd else {
        warn!("no diffuse texture for group '{}'", group.name);
        return Image::default();
    };

    let resolved = resolve_texture_path(Path::new(&map_kd), parent);
    match Image::load_from_file(&resolved) {
        Ok(img) => img,
        Err(e) => {
            warn!(
                "diffuse texture {} could not be loaded: {e}",
                resolved.display()
            );
            Image::default()
        }
    }
}

/// Texture paths in material files are frequently relative to somewhere other
/// than the material file itself; try the usual suspects before giving up.
fn resolve_texture_path(path: &Path, directory: &Path) -> PathBuf {
    if path.exists() {
        return path.to_path_buf();
    }

    let candidate = directory.join(path);
    if candidate.exists() {
        return candidate;
    }

    if let Some(name) = path.file_name() {
        for base in [
            directory.join(name),
            directory.join("textures").join(name),
            directory
                .parent()
                .unwrap_or(directory)
                .join("textures")
                .join(name),
        ] {
            if base.exists() {
                return base;
            }
        }
    }

    path.to_path_buf()
}

impl Mesh<Vertex> {
    /// A quad in the XY plane facing -Z, centered at the origin, with UVs
    /// covering the full texture. Two triangles wound so the geometric
    /// normal points at a camera on the -Z side.
    pub fn new_quad(side_len: f32) -> Self {
        let h = side_len * 0.5;
        let n = Vec3::new(0.0, 0.0, -1.0);

        let vertices = vec![
            Vertex::new(Vec3::new(-h, -h, 0.0), n, Vec2::new(0.0, 1.0)),
            Vertex::new(Vec3::new(-h, h, 0.0), n, Vec2::new(0.0, 0.0)),
            Vertex::new(Vec3::new(h, h, 0.0), n, Vec2::new(1.0, 0.0)),
            Vertex::new(Vec3::new(h, -h, 0.0), n, Vec2::new(1.0, 1.0)),
        ];

        let indices = vec![0, 1, 2, 0, 2, 3];

        Mesh { vertices, indices }
    }

    /// An axis-aligned cube with hard per-face normals. Vertices can't be
    /// shared across faces since each face carries its own normal and UVs.
    pub fn new_cube(side_len: f32) -> Self {
        let h = side_len * 0.5;

        // Each face: four corners as seen from outside the cube, in
        // bottom-left, top-left, top-right, bottom-right order.
        #[rustfmt::skip]
        let faces: [([Vec3; 4], Vec3); 6] = [
            // Front (-Z)
            ([Vec3::new(-h, -h, -h), Vec3::new(-h, h, -h), Vec3::new(h, h, -h), Vec3::new(h, -h, -h)],
             Vec3::new(0.0, 0.0, -1.0)),
            // Back (+Z)
            ([Vec3::new(h, -h, h), Vec3::new(h, h, h), Vec3::new(-h, h, h), Vec3::new(-h, -h, h)],
             Vec3::new(0.0, 0.0, 1.0)),
            // Left (-X)
            ([Vec3::new(-h, -h, h), Vec3::new(-h, h, h), Vec3::new(-h, h, -h), Vec3::new(-h, -h, -h)],
             Vec3::new(-1.0, 0.0, 0.0)),
            // Right (+X)
            ([Vec3::new(h, -h, -h), Vec3::new(h, h, -h), Vec3::new(h, h, h), Vec3::new(h, -h, h)],
             Vec3::new(1.0, 0.0, 0.0)),
            // Top (+Y)
            ([Vec3::new(-h, h, -h), Vec3::new(-h, h, h), Vec3::new(h, h, h), Vec3::new(h, h, -h)],
             Vec3::new(0.0, 1.0, 0.0)),
            // Bottom (-Y)
            ([Vec3::new(-h, -h, h), Vec3::new(-h, -h, -h), Vec3::new(h, -h, -h), Vec3::new(h, -h, h)],
             Vec3::new(0.0, -1.0, 0.0)),
        ];

        let uvs = [
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (corners, normal) in faces {
            let base = vertices.len() as u32;
            for (corner, uv) in corners.into_iter().zip(uvs) {
                vertices.push(Vertex::new(corner, normal, uv));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Mesh { vertices, indices }
    }
}
