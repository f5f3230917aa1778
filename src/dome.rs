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

use crate::error::{check_count, Result};
use crate::mesh::{Face, PatchMesh};
use crate::rows::{PatchRows, Subdivision};
use crate::{Float, PI};
use geometry3d::{Point3D, Vector3D};

/// The point of the unit sphere at altitude `altitude` and azimuth
/// `azimuth` (both in radians). The azimuth is measured counterclockwise
/// from the Y axis.
fn sphere_point(altitude: Float, azimuth: Float) -> Point3D {
    let (sin_alt, cos_alt) = altitude.sin_cos();
    let (sin_az, cos_az) = azimuth.sin_cos();
    Point3D::new(-cos_alt * sin_az, cos_alt * cos_az, sin_alt)
}

/// Adds a row of `patches` quads between two altitudes, sweeping clockwise
/// from `start_azimuth`.
///
/// Vertices are pushed in (lower, upper) pairs, one pair more than
/// the number of patches, so the first and last pairs coincide.
fn push_row(
    vertices: &mut Vec<Point3D>,
    faces: &mut Vec<Face>,
    altitudes: (Float, Float),
    patches: usize,
    start_azimuth: Float,
) {
    let (lower, upper) = altitudes;
    let step = -2. * PI / patches as Float;
    let first = vertices.len();
    for i in 0..=patches {
        let azimuth = start_azimuth + step * i as Float;
        vertices.push(sphere_point(lower, azimuth));
        vertices.push(sphere_point(upper, azimuth));
    }
    for i in 0..patches {
        let v = first + 2 * i;
        faces.push(Face::Quad([v, v + 1, v + 3, v + 2]));
    }
}

/// Closes the dome with a fan of triangles joining the upper vertices of
/// the last row (which has `patches` patches) with the zenith.
fn push_cap(vertices: &mut Vec<Point3D>, faces: &mut Vec<Face>, patches: usize) {
    let apex = vertices.len();
    // upper vertex of the first pair of the last row
    let start = apex - 2 * patches - 1;
    vertices.push(Point3D::new(0., 0., 1.));
    for i in 0..patches {
        let v = start + 2 * i;
        faces.push(Face::Triangle([v, apex, v + 2]));
    }
}

/// Builds the mesh and vectors of a dome from its rows
pub(crate) fn build_dome(rows: &PatchRows) -> (PatchMesh, Vec<Vector3D>) {
    let patches_per_row = rows.patches_per_row();
    let vertical_angle = rows.vertical_angle();
    let subdivision = rows.subdivision();
    let division_count = rows.division_count();

    let n_vertices: usize = patches_per_row.iter().map(|n| 2 * n + 2).sum::<usize>() + 1;
    let mut vertices = Vec::with_capacity(n_vertices);
    let mut faces = Vec::with_capacity(rows.row_patch_count() + rows.cap_triangle_count());

    for (row_i, patches) in patches_per_row.iter().enumerate() {
        let lower = vertical_angle * row_i as Float;
        let upper = lower + vertical_angle;
        let start = subdivision.correction_angle(*patches, division_count);
        push_row(&mut vertices, &mut faces, (lower, upper), *patches, start);
    }

    // The last row always has 6 * division_count patches
    let last_row = patches_per_row[patches_per_row.len() - 1];
    debug_assert_eq!(last_row, rows.cap_triangle_count());
    push_cap(&mut vertices, &mut faces, last_row);

    let mesh = PatchMesh::from_parts(vertices, faces);

    // One vector per quad, plus a single one for the whole cap
    let mut vectors = mesh.face_normals();
    vectors.truncate(rows.row_patch_count());
    vectors.push(Vector3D::new(0., 0., 1.));

    log::debug!(
        "Built a dome with {} patches ({} faces) for division_count {} ({:?})",
        vectors.len(),
        mesh.faces().len(),
        division_count,
        subdivision
    );
    (mesh, vectors)
}

/// Gets the [`PatchMesh`] and direction vectors of a dome.
///
/// `division_count` 1 gives the 145 Tregenza patches and 2 gives the 577 Reinhart
/// patches; higher numbers keep refining the same scheme.
///
/// There is one quad face per patch except for the last circular patch, which is
/// represented by `6 * division_count` triangles. There is one vector per quad
/// (in the same order as the faces) plus a single vector (the zenith) representing
/// all the triangles of the cap. All vectors are unit vectors.
pub fn dome_patches(
    division_count: usize,
    subdivision: Subdivision,
) -> Result<(PatchMesh, Vec<Vector3D>)> {
    let rows = PatchRows::new(division_count, subdivision)?;
    Ok(build_dome(&rows))
}

/// Gets the [`PatchMesh`] and direction vectors of a plain
/// altitude/azimuth dome.
///
/// The horizon is split in `azimuth_count` equal columns and the quarter circle
/// between the horizon and the zenith in `altitude_count` equal rows. The top
/// row is a fan of triangles. There is one vector per face, so
/// `azimuth_count * altitude_count` of each. The reference system uses 72 x 18.
pub fn dome_radial_patches(
    azimuth_count: usize,
    altitude_count: usize,
) -> Result<(PatchMesh, Vec<Vector3D>)> {
    check_count("azimuth_count", azimuth_count, 3)?;
    check_count("altitude_count", altitude_count, 2)?;

    let vertical_angle = PI / (2 * altitude_count) as Float;
    let mut vertices = Vec::with_capacity((altitude_count - 1) * (2 * azimuth_count + 2) + 1);
    let mut faces = Vec::with_capacity(altitude_count * azimuth_count);

    for row_i in 0..altitude_count - 1 {
        let lower = vertical_angle * row_i as Float;
        let upper = lower + vertical_angle;
        push_row(&mut vertices, &mut faces, (lower, upper), azimuth_count, 0.);
    }
    push_cap(&mut vertices, &mut faces, azimuth_count);

    let mesh = PatchMesh::from_parts(vertices, faces);
    let vectors = mesh.face_normals();
    Ok((mesh, vectors))
}
