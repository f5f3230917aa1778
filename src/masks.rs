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

//! Patterns telling which view vectors are blocked by the geometry around
//! a window: the wall it sits on, an overhang above it, and fins at its sides.
//!
//! All patterns are aligned with the input vectors (`true` means blocked), so
//! they can be applied to the vectors and weights of any patch scheme.

use crate::error::{check_angle, Result, ViewSphereError};
use crate::{Float, PI};
use geometry3d::Vector3D;

/// Angle (radians) between two vectors
fn angle_between(a: Vector3D, b: Vector3D) -> Float {
    let cos = (a * b) / (a.length() * b.length());
    cos.clamp(-1., 1.).acos()
}

/// Rotates `v` by `angle` radians around `axis`, counterclockwise when
/// looking from the tip of the axis (Rodrigues' formula).
fn rotate(v: Vector3D, axis: Vector3D, angle: Float) -> Vector3D {
    let k = axis * (1. / axis.length());
    let (sin, cos) = angle.sin_cos();
    let k_dot_v = k * v;
    v * cos + k.cross(v) * sin + k * (k_dot_v * (1. - cos))
}

/// Angle (degrees, in `[0, 360)`) of the horizontal projection of a vector,
/// measured counterclockwise from the Y axis.
fn horizontal_angle(x: Float, y: Float) -> Float {
    (-x).atan2(y).to_degrees().rem_euclid(360.)
}

/// Fails if the horizontal projection of `normal` is null
fn check_not_vertical(normal: Vector3D) -> Result<()> {
    if normal.x.abs() < 1e-9 && normal.y.abs() < 1e-9 {
        return Err(ViewSphereError::InvalidParameter(
            "plane_normal must not be vertical for overhangs and fins".into(),
        ));
    }
    Ok(())
}

/// Checks which view vectors are blocked by a plane (i.e., those that
/// point behind it).
///
/// Returns the pattern and the angle (radians) between the plane's normal and
/// each vector.
pub fn orientation_pattern(
    plane_normal: Vector3D,
    view_vectors: &[Vector3D],
) -> (Vec<bool>, Vec<Float>) {
    let max_angle = PI / 2.;
    let angles: Vec<Float> = view_vectors
        .iter()
        .map(|v| angle_between(*v, plane_normal))
        .collect();
    let pattern = angles.iter().map(|a| *a > max_angle).collect();
    (pattern, angles)
}

/// Checks which view vectors are blocked by an overhang with a projection
/// angle of `overhang_angle` degrees (between 0 and 90), above a plane
/// facing `plane_normal`.
pub fn overhang_pattern(
    plane_normal: Vector3D,
    overhang_angle: Float,
    view_vectors: &[Vector3D],
) -> Result<Vec<bool>> {
    check_angle("overhang_angle", overhang_angle)?;
    check_not_vertical(plane_normal)?;

    let inwards = plane_normal * -1.;
    // Horizontal axis parallel to the plane
    let axis = Vector3D::new(inwards.y, -inwards.x, 0.);
    let overhang_normal = rotate(inwards, axis, overhang_angle.to_radians());

    let max_angle = PI / 2.;
    Ok(view_vectors
        .iter()
        .map(|v| angle_between(*v, overhang_normal) < max_angle)
        .collect())
}

/// Checks which view vectors are blocked by fins on the left and right of
/// a plane facing `plane_normal`. Fin angles are projection angles in degrees
/// (between 0 and 90); 0 means there is no fin.
pub fn fin_pattern(
    plane_normal: Vector3D,
    left_fin_angle: Float,
    right_fin_angle: Float,
    view_vectors: &[Vector3D],
) -> Result<Vec<bool>> {
    check_angle("left_fin_angle", left_fin_angle)?;
    check_angle("right_fin_angle", right_fin_angle)?;
    check_not_vertical(plane_normal)?;

    // The range of horizontal angles that the fins leave unblocked
    let surface_angle = horizontal_angle(plane_normal.x, plane_normal.y);
    let mut angle_min = surface_angle - 90. + right_fin_angle;
    let mut angle_max = surface_angle + 90. - left_fin_angle;
    if angle_max > 360. {
        angle_max -= 360.;
        angle_min -= 360.;
    }
    if angle_max < 0. {
        angle_max += 360.;
        angle_min += 360.;
    }

    let pattern = view_vectors
        .iter()
        .map(|v| {
            // Fins are vertical, so they never block the zenith or nadir
            if v.x.abs() < 1e-9 && v.y.abs() < 1e-9 {
                return false;
            }
            let angle = horizontal_angle(v.x, v.y);
            let is_visible = if angle_min > 0. {
                angle < angle_max && angle > angle_min
            } else {
                angle < angle_max || angle > angle_min + 360.
            };
            !is_visible
        })
        .collect();
    Ok(pattern)
}
