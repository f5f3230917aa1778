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
use crate::error::{check_angle, check_count, Result};
use crate::mesh::PatchMesh;
use crate::rows::{PatchRows, Subdivision};
use crate::sphere::join_with_bottom;
use crate::{Float, PI};
use geometry3d::Vector3D;

/// Gets perfectly horizontal unit vectors radiating outward in a circle.
///
/// The first one points to the Y axis and the rest follow clockwise (seen
/// from above), every `360 / vector_count` degrees. Setting `vector_count`
/// to `30 * division_count` aligns them with the patches of the first row
/// of a dome.
pub fn horizontal_radial_vectors(vector_count: usize) -> Result<Vec<Vector3D>> {
    check_count("vector_count", vector_count, 1)?;
    let step = 2. * PI / vector_count as Float;
    let ret = (0..vector_count)
        .map(|i| {
            let (sin, cos) = (step * i as Float).sin_cos();
            Vector3D::new(sin, cos, 0.)
        })
        .collect();
    Ok(ret)
}

/// Gets the patches within `offset_angle` degrees of the horizontal plane,
/// both above and below it (30 degrees is the rough vertical limit of human
/// peripheral vision).
///
/// These are the rows of [`crate::dome_patches`] that fit within the offset, plus
/// their mirror image. The polar cap is never part of the band. There is one
/// quad face per patch and one vector per face, top first.
pub fn horizontal_radial_patches(
    offset_angle: Float,
    division_count: usize,
    subdivision: Subdivision,
) -> Result<(PatchMesh, Vec<Vector3D>)> {
    check_angle("offset_angle", offset_angle)?;
    let rows = PatchRows::new(division_count, subdivision)?;
    let n_rows = rows.rows_within_offset(offset_angle)?;
    let n_patches = rows.patches_in_first_rows(n_rows);

    let (mut top_mesh, mut top_vectors) = build_dome(&rows);
    top_mesh.truncate_faces(n_patches);
    top_vectors.truncate(n_patches);

    log::debug!(
        "Kept {} rows ({} patches) within {} degrees of the horizon",
        n_rows,
        n_patches,
        offset_angle
    );
    Ok(join_with_bottom(top_mesh, top_vectors))
}
