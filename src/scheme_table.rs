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

//! The two patch schemes that are used all over daylighting: Tregenza's
//! (145 patches in the dome) and Reinhart's (577 patches). Every other
//! division count is derived in [`crate::rows`].
//!
//! Tregenza, Peter. (1987). Subdivision of the sky hemisphere for luminance
//! measurements. Lighting Research & Technology. 19. 13-14.

use crate::Float;

/// Number of patches in each row of the Tregenza dome, from the horizon up.
pub const TREGENZA_PATCHES_PER_ROW: [usize; 7] = [30, 30, 24, 24, 18, 12, 6];

/// Number of patches in each row of the Reinhart dome, from the horizon up.
pub const REINHART_PATCHES_PER_ROW: [usize; 14] =
    [60, 60, 60, 60, 48, 48, 48, 48, 36, 36, 24, 24, 12, 12];

/// Steradians of each patch of each Tregenza row. The last
/// element is the polar cap.
pub const TREGENZA_COEFFICIENTS: [Float; 8] = [
    0.0435449227,
    0.0416418006,
    0.0473984151,
    0.0406730411,
    0.0428934136,
    0.0445221864,
    0.0455168385,
    0.0344199465,
];

/// Steradians of each patch of each Reinhart row. The last
/// element is the polar cap.
pub const REINHART_COEFFICIENTS: [Float; 15] = [
    0.0113221971,
    0.0111894547,
    0.0109255262,
    0.0105335058,
    0.0125224872,
    0.0117312774,
    0.0108025291,
    0.00974713106,
    0.011436609,
    0.00974295956,
    0.0119026242,
    0.00905126163,
    0.0121875626,
    0.00612971396,
    0.00921483254,
];

/// Returns the tabulated patches per row, if `division_count` is 1 or 2.
pub fn patches_per_row(division_count: usize) -> Option<&'static [usize]> {
    match division_count {
        1 => Some(&TREGENZA_PATCHES_PER_ROW),
        2 => Some(&REINHART_PATCHES_PER_ROW),
        _ => None,
    }
}

/// Returns the tabulated steradians per row (plus cap), if `division_count` is 1 or 2.
pub fn coefficients(division_count: usize) -> Option<&'static [Float]> {
    match division_count {
        1 => Some(&TREGENZA_COEFFICIENTS),
        2 => Some(&REINHART_COEFFICIENTS),
        _ => None,
    }
}

/// Expands the tabulated coefficients into one solid angle per dome patch,
/// aligned with the vectors of [`crate::dome_patches`]. Only division
/// counts 1 and 2 are tabulated.
pub fn canonical_solid_angles(division_count: usize) -> Option<Vec<Float>> {
    let rows = patches_per_row(division_count)?;
    let coefficients = coefficients(division_count)?;

    let n: usize = rows.iter().sum();
    let mut ret = Vec::with_capacity(n + 1);
    // The cap is a row with a single patch
    let counts = rows.iter().copied().chain(std::iter::once(1));
    for (count, coef) in counts.zip(coefficients.iter()) {
        ret.extend(std::iter::repeat(*coef).take(count));
    }
    Some(ret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PI;
    use validate::assert_close;

    #[test]
    fn test_table_sizes() {
        assert_eq!(TREGENZA_PATCHES_PER_ROW.iter().sum::<usize>(), 144);
        assert_eq!(REINHART_PATCHES_PER_ROW.iter().sum::<usize>(), 576);
        assert!(patches_per_row(3).is_none());
        assert!(coefficients(0).is_none());
    }

    #[test]
    fn test_canonical_solid_angles() {
        let tregenza = canonical_solid_angles(1).unwrap();
        assert_eq!(tregenza.len(), 145);
        assert_close!(tregenza[0], 0.0435449227, 1e-9);
        assert_close!(tregenza[144], 0.0344199465, 1e-9);

        let reinhart = canonical_solid_angles(2).unwrap();
        assert_eq!(reinhart.len(), 577);

        // They cover the hemisphere
        let total: Float = tregenza.iter().sum();
        assert_close!(total, 2. * PI, 1e-3);
        let total: Float = reinhart.iter().sum();
        assert_close!(total, 2. * PI, 1e-3);
    }
}
