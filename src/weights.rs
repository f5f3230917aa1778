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

use crate::error::{check_angle, check_count, Result};
use crate::rows::{PatchRows, Subdivision};
use crate::{Float, PI};

/// Area of the spherical cap of the unit sphere above `altitude` (radians)
fn cap_area(altitude: Float) -> Float {
    2. * PI * (1. - altitude.sin())
}

/// Solid angle of each patch in rows of `patches_per_row` patches, each
/// `vertical_angle` tall, starting at the horizon. The area left above the
/// last row is appended as a single patch if `with_cap`.
fn patch_areas(patches_per_row: &[usize], vertical_angle: Float, with_cap: bool) -> Vec<Float> {
    let n: usize = patches_per_row.iter().sum();
    let mut ret = Vec::with_capacity(n + 1);
    let mut below = cap_area(0.);
    for (i, patches) in patches_per_row.iter().enumerate() {
        let above = cap_area(vertical_angle * (i + 1) as Float);
        let patch_area = (below - above) / *patches as Float;
        ret.extend(std::iter::repeat(patch_area).take(*patches));
        below = above;
    }
    if with_cap {
        ret.push(below);
    }
    ret
}

/// Divides all values by their mean, so that they average 1
fn normalize(areas: &[Float]) -> Vec<Float> {
    let mean = areas.iter().sum::<Float>() / areas.len() as Float;
    areas.iter().map(|a| a / mean).collect()
}

/// Solid angle of each patch of the dome built from `rows`, cap included
pub(crate) fn solid_angles_of(rows: &PatchRows) -> Vec<Float> {
    patch_areas(rows.patches_per_row(), rows.vertical_angle(), true)
}

/// Weights of the dome built from `rows`
pub(crate) fn dome_weights_of(rows: &PatchRows) -> Vec<Float> {
    normalize(&solid_angles_of(rows))
}

/// Weights of the band of `rows` within `offset_angle` degrees of the
/// horizontal plane, upper half first.
pub(crate) fn band_weights_of(rows: &PatchRows, offset_angle: Float) -> Result<Vec<Float>> {
    let n_rows = rows.rows_within_offset(offset_angle)?;
    let areas = patch_areas(
        &rows.patches_per_row()[..n_rows],
        rows.vertical_angle(),
        false,
    );
    Ok(normalize(&areas).repeat(2))
}

/// The solid angle (steradians) of each patch of a dome, aligned with the
/// vectors of [`crate::dome_patches`] in `Extended` mode. For division
/// counts 1 and 2 these match the Tregenza and Reinhart coefficients.
pub fn dome_patch_solid_angles(division_count: usize) -> Result<Vec<Float>> {
    let rows = PatchRows::new(division_count, Subdivision::Extended)?;
    Ok(solid_angles_of(&rows))
}

/// Gets the area weight of each dome patch (`Extended` mode). The weights average 1.
pub fn dome_patch_weights(division_count: usize) -> Result<Vec<Float>> {
    let rows = PatchRows::new(division_count, Subdivision::Extended)?;
    Ok(dome_weights_of(&rows))
}

/// Gets the area weight of each sphere patch, aligned with the vectors of
/// [`crate::sphere_patches`] in `Extended` mode. The weights average 1.
pub fn sphere_patch_weights(division_count: usize) -> Result<Vec<Float>> {
    let weights = dome_patch_weights(division_count)?;
    Ok(weights.repeat(2))
}

/// Gets the area weight of each patch within `offset_angle` degrees of the
/// horizontal plane (above and below), aligned with the vectors of
/// [`crate::horizontal_radial_patches`] in `Extended` mode. The weights average 1.
pub fn horizontal_radial_patch_weights(
    offset_angle: Float,
    division_count: usize,
) -> Result<Vec<Float>> {
    check_angle("offset_angle", offset_angle)?;
    let rows = PatchRows::new(division_count, Subdivision::Extended)?;
    band_weights_of(&rows, offset_angle)
}

/// Gets the area weight of each patch of [`crate::dome_radial_patches`].
/// The weights average 1.
pub fn dome_radial_patch_weights(azimuth_count: usize, altitude_count: usize) -> Result<Vec<Float>> {
    check_count("azimuth_count", azimuth_count, 3)?;
    check_count("altitude_count", altitude_count, 2)?;

    // The last row reaches the zenith, so it is the cap.
    let vertical_angle = PI / (2 * altitude_count) as Float;
    let rows = vec![azimuth_count; altitude_count];
    let areas = patch_areas(&rows, vertical_angle, false);
    Ok(normalize(&areas))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewSphereError;
    use crate::scheme_table::canonical_solid_angles;
    use validate::assert_close;

    fn mean(v: &[Float]) -> Float {
        v.iter().sum::<Float>() / v.len() as Float
    }

    #[test]
    fn test_solid_angles_match_tables() {
        for division_count in [1, 2] {
            let found = dome_patch_solid_angles(division_count).unwrap();
            let expected = canonical_solid_angles(division_count).unwrap();
            assert_eq!(found.len(), expected.len());
            for (f, e) in found.iter().zip(expected.iter()) {
                assert_close!(*f, *e, 1e-8);
            }
        }
    }

    #[test]
    fn test_dome_weights() {
        for division_count in 1..6 {
            let weights = dome_patch_weights(division_count).unwrap();
            assert_eq!(weights.len(), 144 * division_count * division_count + 1);
            assert_close!(mean(&weights), 1.0, 1e-9);
        }
        let weights = dome_patch_weights(1).unwrap();
        // Patches near the horizon are larger than those in row 1
        assert!(weights[0] > weights[30]);
    }

    #[test]
    fn test_sphere_weights() {
        let weights = sphere_patch_weights(1).unwrap();
        assert_eq!(weights.len(), 290);
        assert_close!(mean(&weights), 1.0, 1e-9);
        assert_eq!(weights[0], weights[145]);
    }

    #[test]
    fn test_horizontal_radial_weights() {
        let weights = horizontal_radial_patch_weights(30., 2).unwrap();
        assert_eq!(weights.len(), 576);
        assert_close!(mean(&weights), 1.0, 1e-9);

        assert!(matches!(
            horizontal_radial_patch_weights(120., 2),
            Err(ViewSphereError::InvalidParameter(_))
        ));
        assert!(matches!(
            horizontal_radial_patch_weights(0., 2),
            Err(ViewSphereError::DegenerateBand { .. })
        ));
        assert!(matches!(
            horizontal_radial_patch_weights(30., 0),
            Err(ViewSphereError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_weights_follow_subdivision() {
        // Either way, the patches cover the whole dome
        for subdivision in [Subdivision::Extended, Subdivision::InPlace] {
            for division_count in 1..5 {
                let rows = PatchRows::new(division_count, subdivision).unwrap();
                let areas = solid_angles_of(&rows);
                assert_eq!(areas.len(), rows.patch_count());
                assert_close!(areas.iter().sum::<Float>(), 2. * PI, 1e-9);
            }
        }

        // In place keeps Tregenza's cap, so its cap is larger
        let extended = dome_weights_of(&PatchRows::new(2, Subdivision::Extended).unwrap());
        let in_place = dome_weights_of(&PatchRows::new(2, Subdivision::InPlace).unwrap());
        assert_eq!(extended.len(), in_place.len());
        assert!(in_place[576] > extended[576]);

        // Rows are 6 degrees tall when in place: 40 degrees is 7 rows
        let rows = PatchRows::new(2, Subdivision::InPlace).unwrap();
        let weights = band_weights_of(&rows, 40.).unwrap();
        assert_eq!(weights.len(), 2 * rows.patches_in_first_rows(7));
        assert_eq!(weights.len(), 768);
        assert_close!(mean(&weights), 1.0, 1e-9);
        assert_eq!(horizontal_radial_patch_weights(40., 2).unwrap().len(), 672);
    }

    #[test]
    fn test_dome_radial_weights() {
        let weights = dome_radial_patch_weights(72, 18).unwrap();
        assert_eq!(weights.len(), 1296);
        assert_close!(mean(&weights), 1.0, 1e-9);
        // The triangles at the top are the smallest patches
        assert!(weights[1295] < weights[0]);
    }
}
