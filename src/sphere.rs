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

use crate::dome::build_dome;
use crate::error::Result;
use crate::mesh::PatchMesh;
use crate::rows::{PatchRows, Subdivision};
use geometry3d::Vector3D;

/// Joins some patches of the upper hemisphere with their mirror image
/// below the horizon.
///
/// The mirrored faces are reversed, so they keep facing outwards. Vectors
/// are returned top first, then bottom.
pub(crate) fn join_with_bottom(
    top_mesh: PatchMesh,
    top_vectors: Vec<Vector3D>,
) -> (PatchMesh, Vec<Vector3D>) {
    let bottom_mesh = top_mesh.mirrored();
    let mut mesh = top_mesh;
    mesh.join(&bottom_mesh);

    let mut vectors = Vec::with_capacity(2 * top_vectors.len());
    vectors.extend_from_slice(&top_vectors);
    vectors.extend(top_vectors.iter().map(|v| Vector3D::new(v.x, v.y, -v.z)));

    (mesh, vectors)
}

/// Gets the [`PatchMesh`] and direction vectors of a whole sphere, made
/// of a dome (see [`crate::dome_patches`]) and its mirror image.
///
/// There are exactly twice as many faces and vectors as in the dome. The
/// first half of the vectors are the dome's; the second half are the same
/// vectors with their Z component negated.
pub fn sphere_patches(
    division_count: usize,
    subdivision: Subdivision,
) -> Result<(PatchMesh, Vec<Vector3D>)> {
    let rows = PatchRows::new(division_count, subdivision)?;
    let (top_mesh, top_vectors) = build_dome(&rows);
    Ok(join_with_bottom(top_mesh, top_vectors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dome::dome_patches;
    use crate::mesh::Face;

    #[test]
    fn test_sphere_counts() {
        let (mesh, vectors) = sphere_patches(1, Subdivision::Extended).unwrap();
        assert_eq!(vectors.len(), 290);
        assert_eq!(mesh.faces().len(), 300);

        let (mesh, vectors) = sphere_patches(2, Subdivision::Extended).unwrap();
        assert_eq!(vectors.len(), 1154);
        assert_eq!(mesh.faces().len(), 1176);
    }

    #[test]
    fn test_sphere_mirrors_dome() {
        let (dome_mesh, dome_vectors) = dome_patches(2, Subdivision::Extended).unwrap();
        let (mesh, vectors) = sphere_patches(2, Subdivision::Extended).unwrap();
        let n = dome_vectors.len();

        for (i, v) in dome_vectors.iter().enumerate() {
            assert_eq!(vectors[i].x, v.x);
            assert_eq!(vectors[i].y, v.y);
            assert_eq!(vectors[i].z, v.z);

            assert_eq!(vectors[n + i].x, v.x);
            assert_eq!(vectors[n + i].y, v.y);
            assert_eq!(vectors[n + i].z, -v.z);
        }

        // Bottom faces are the top ones, reversed and offset.
        let n_vertices = dome_mesh.vertices().len();
        let n_faces = dome_mesh.faces().len();
        assert_eq!(mesh.vertices().len(), 2 * n_vertices);
        assert_eq!(
            mesh.faces()[n_faces],
            dome_mesh.faces()[0].reversed().offset(n_vertices)
        );
        assert!(matches!(mesh.faces()[2 * n_faces - 1], Face::Triangle(_)));
    }

    #[test]
    fn test_bottom_faces_point_down() {
        let (mesh, vectors) = sphere_patches(1, Subdivision::Extended).unwrap();
        let normals = mesh.face_normals();
        // First face of the bottom half
        let normal = normals[150];
        let vector = vectors[145];
        assert!(normal.z < 0.0);
        assert!((normal.x - vector.x).abs() < 1e-9);
        assert!((normal.y - vector.y).abs() < 1e-9);
        assert!((normal.z - vector.z).abs() < 1e-9);
    }
}
