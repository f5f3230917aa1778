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

use crate::Float;

/// The errors that can come out of building or weighting patches.
///
/// All of them are deterministic: calling again with the same inputs
/// reproduces the same error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewSphereError {
    /// A division count, angle or count outside of its valid range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A band around the horizon that contains no rows of patches
    #[error("An offset angle of {offset_angle} degrees contains no rows of patches when division_count is {division_count}")]
    DegenerateBand {
        /// The requested offset angle, in degrees
        offset_angle: Float,
        /// The requested division count
        division_count: usize,
    },

    /// Something this crate does not do (e.g., drawing legends)
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

/// A `Result` whose error is [`ViewSphereError`]
pub type Result<T> = std::result::Result<T, ViewSphereError>;

/// Checks that a division count is at least 1
pub(crate) fn check_division_count(division_count: usize) -> Result<()> {
    if division_count < 1 {
        return Err(ViewSphereError::InvalidParameter(format!(
            "division_count must be a positive integer... found {}",
            division_count
        )));
    }
    Ok(())
}

/// Checks that an angle (in degrees) lies within `[0, 90]`
pub(crate) fn check_angle(name: &str, angle: Float) -> Result<()> {
    if !(0.0..=90.0).contains(&angle) {
        return Err(ViewSphereError::InvalidParameter(format!(
            "{} must be a number between 0 and 90 degrees... found {}",
            name, angle
        )));
    }
    Ok(())
}

/// Checks that a count is at least `min`
pub(crate) fn check_count(name: &str, count: usize, min: usize) -> Result<()> {
    if count < min {
        return Err(ViewSphereError::InvalidParameter(format!(
            "{} must be at least {}... found {}",
            name, min, count
        )));
    }
    Ok(())
}
