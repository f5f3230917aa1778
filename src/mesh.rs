/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::error::{Result, ViewSphereError};
use crate::Float;
use geometry3d::{Point3D, Vector3D};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A face of a [`PatchMesh`], as indices into its vertices.
///
/// Vertices are listed counterclockwise when seen from outside
/// the sphere.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Face {
    /// A triangle... used for polar caps
    Triangle([usize; 3]),
    /// A quadrilateral... used for regular patches
    Quad([usize; 4]),
}

impl Face {
    /// The vertex indices of this face
    pub fn indices(&self) -> &[usize] {
        match self {
            Self::Triangle(v) => v,
            Self::Quad(v) => v,
        }
    }

    /// The same face, with the opposite winding
    pub fn reversed(&self) -> Self {
        match *self {
            Self::Triangle([a, b, c]) => Self::Triangle([c, b, a]),
            Self::Quad([a, b, c, d]) => Self::Quad([d, c, b, a]),
        }
    }

    /// The same face, with all indices shifted by `n`
    pub fn offset(&self, n: usize) -> Self {
        match *self {
            Self::Triangle([a, b, c]) => Self::Triangle([a + n, b + n, c + n]),
            Self::Quad([a, b, c, d]) => Self::Quad([a + n, b + n, c + n, d + n]),
        }
    }
}

/// A mesh whose faces represent patches of the sky (or of the whole sphere)
#[derive(Clone)]
pub struct PatchMesh {
    vertices: Vec<Point3D>,
    faces: Vec<Face>,
}

impl PatchMesh {
    /// Creates a new mesh, checking that every face references an existing vertex
    pub fn new(vertices: Vec<Point3D>, faces: Vec<Face>) -> Result<Self> {
        let n = vertices.len();
        if let Some(face) = faces.iter().find(|f| f.indices().iter().any(|i| *i >= n)) {
            return Err(ViewSphereError::InvalidParameter(format!(
                "Face {:?} references a vertex that does not exist (the mesh has {} vertices)",
                face, n
            )));
        }
        Ok(Self { vertices, faces })
    }

    /// Creates a mesh from vertices and faces that are known to be consistent
    pub(crate) fn from_parts(vertices: Vec<Point3D>, faces: Vec<Face>) -> Self {
        debug_assert!(faces
            .iter()
            .all(|f| f.indices().iter().all(|i| *i < vertices.len())));
        Self { vertices, faces }
    }

    /// The vertices of the mesh
    pub fn vertices(&self) -> &[Point3D] {
        &self.vertices
    }

    /// The faces of the mesh
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Calculates the unit normal of a face using Newell's method, which
    /// also behaves for quads that are not perfectly planar.
    pub fn face_normal(&self, face: &Face) -> Vector3D {
        let indices = face.indices();
        let (mut x, mut y, mut z): (Float, Float, Float) = (0., 0., 0.);
        for (i, current) in indices.iter().enumerate() {
            let next = indices[(i + 1) % indices.len()];
            let a = self.vertices[*current];
            let b = self.vertices[next];
            x += (a.y - b.y) * (a.z + b.z);
            y += (a.z - b.z) * (a.x + b.x);
            z += (a.x - b.x) * (a.y + b.y);
        }
        let normal = Vector3D::new(x, y, z);
        let length = normal.length();
        if length > 0.0 {
            normal * (1. / length)
        } else {
            normal
        }
    }

    /// The unit normal of each face, in the same order as the faces
    pub fn face_normals(&self) -> Vec<Vector3D> {
        #[cfg(not(feature = "parallel"))]
        let iter = self.faces.iter();
        #[cfg(feature = "parallel")]
        let iter = self.faces.par_iter();

        iter.map(|f| self.face_normal(f)).collect()
    }

    /// Mirrors the mesh across the horizontal plane. Faces are
    /// reversed so that they keep facing outwards.
    pub fn mirrored(&self) -> Self {
        let vertices = self
            .vertices
            .iter()
            .map(|p| Point3D::new(p.x, p.y, -p.z))
            .collect();
        let faces = self.faces.iter().map(|f| f.reversed()).collect();
        Self { vertices, faces }
    }

    /// Appends the vertices and faces of `other` to this mesh
    pub fn join(&mut self, other: &PatchMesh) {
        let n = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(other.faces.iter().map(|f| f.offset(n)));
    }

    /// Keeps the first `count` faces, dropping the trailing vertices
    /// that are no longer used.
    pub fn truncate_faces(&mut self, count: usize) {
        self.faces.truncate(count);
        let used = self
            .faces
            .iter()
            .flat_map(|f| f.indices().iter())
            .max()
            .map_or(0, |i| i + 1);
        self.vertices.truncate(used);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validate::assert_close;

    fn unit_square() -> PatchMesh {
        let vertices = vec![
            Point3D::new(0., 0., 1.),
            Point3D::new(1., 0., 1.),
            Point3D::new(1., 1., 1.),
            Point3D::new(0., 1., 1.),
        ];
        PatchMesh::new(vertices, vec![Face::Quad([0, 1, 2, 3])]).unwrap()
    }

    #[test]
    fn test_new_checks_indices() {
        let vertices = vec![Point3D::new(0., 0., 0.)];
        assert!(PatchMesh::new(vertices, vec![Face::Triangle([0, 1, 2])]).is_err());
    }

    #[test]
    fn test_face_normal() {
        let mesh = unit_square();
        let n = mesh.face_normal(&mesh.faces()[0]);
        assert!(n.x.abs() < 1e-12);
        assert!(n.y.abs() < 1e-12);
        assert_close!(n.z, 1.0, 1e-12);
    }

    #[test]
    fn test_reversed_and_offset() {
        let f = Face::Quad([0, 1, 2, 3]);
        assert_eq!(f.reversed(), Face::Quad([3, 2, 1, 0]));
        assert_eq!(f.offset(4), Face::Quad([4, 5, 6, 7]));
        let t = Face::Triangle([0, 1, 2]);
        assert_eq!(t.reversed(), Face::Triangle([2, 1, 0]));
    }

    #[test]
    fn test_mirrored() {
        let mesh = unit_square();
        let mirror = mesh.mirrored();
        assert_close!(mirror.vertices()[2].z, -1.0, 1e-12);
        // still pointing away from the horizontal plane
        let n = mirror.face_normal(&mirror.faces()[0]);
        assert_close!(n.z, -1.0, 1e-12);
    }

    #[test]
    fn test_join_and_truncate() {
        let mut mesh = unit_square();
        let other = mesh.mirrored();
        mesh.join(&other);
        assert_eq!(mesh.vertices().len(), 8);
        assert_eq!(mesh.faces()[1], Face::Quad([7, 6, 5, 4]));

        mesh.truncate_faces(1);
        assert_eq!(mesh.faces().len(), 1);
        assert_eq!(mesh.vertices().len(), 4);
    }
}
