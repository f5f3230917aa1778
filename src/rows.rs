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

use crate::error::{check_angle, check_division_count, Result, ViewSphereError};
use crate::scheme_table::TREGENZA_PATCHES_PER_ROW;
use crate::{Float, PI};
use serde::{Deserialize, Serialize};

/// The two ways of going beyond Tregenza's 145 patches.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subdivision {
    /// Extends Tregenza's logic the way Reinhart does: every one of
    /// the 7 rows is replaced by `division_count` rows, each with
    /// `division_count` times the original number of patches. The
    /// rows are spread evenly over the dome, leaving half a row for the cap.
    #[default]
    Extended,

    /// Keeps the 7 Tregenza rows (and cap) exactly where they are and
    /// splits each Tregenza patch into `division_count x division_count`
    /// smaller quads. Useful for drawing a low-resolution sky with a
    /// smoother mesh.
    InPlace,
}

impl Subdivision {
    /// The number of extra half-rows added to the denominator of the
    /// vertical angle.
    fn vertical_correction(&self, division_count: usize) -> usize {
        match self {
            Self::Extended => 1,
            Self::InPlace => division_count,
        }
    }

    /// The azimuth (in radians) at which the first patch of a row
    /// with `row_patches` patches starts.
    ///
    /// In `Extended` mode this is half a patch, so the first patch is
    /// centred on the reference direction. In `InPlace` mode it is half
    /// of the original Tregenza patch, so the smaller quads tile their
    /// parent patch exactly.
    pub fn correction_angle(&self, row_patches: usize, division_count: usize) -> Float {
        let half_patch = PI / row_patches as Float;
        match self {
            Self::Extended => half_patch,
            Self::InPlace => half_patch * division_count as Float,
        }
    }
}

/// The rows of patches of a dome, from the horizon up to (but
/// not including) the polar cap.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchRows {
    division_count: usize,
    subdivision: Subdivision,
    patches_per_row: Vec<usize>,
    vertical_angle: Float,
}

impl PatchRows {
    /// Number of rows in the original Tregenza subdivision
    pub const BASE_ROW_COUNT: usize = TREGENZA_PATCHES_PER_ROW.len();

    /// Derives the rows for a certain `division_count`.
    ///
    /// Every Tregenza row becomes `division_count` rows, each with `division_count`
    /// times as many patches. For `division_count == 2` this gives the 14
    /// Reinhart rows.
    pub fn new(division_count: usize, subdivision: Subdivision) -> Result<Self> {
        check_division_count(division_count)?;

        let patches_per_row: Vec<usize> = TREGENZA_PATCHES_PER_ROW
            .iter()
            .flat_map(|n| std::iter::repeat(n * division_count).take(division_count))
            .collect();

        let correction = subdivision.vertical_correction(division_count);
        let vertical_angle = PI / (2 * patches_per_row.len() + correction) as Float;

        Ok(Self {
            division_count,
            subdivision,
            patches_per_row,
            vertical_angle,
        })
    }

    /// The division count used to build these rows
    pub fn division_count(&self) -> usize {
        self.division_count
    }

    /// The subdivision mode used to build these rows
    pub fn subdivision(&self) -> Subdivision {
        self.subdivision
    }

    /// Number of patches in each row, from the horizon up
    pub fn patches_per_row(&self) -> &[usize] {
        &self.patches_per_row
    }

    /// The vertical angle (in radians) covered by each row
    pub fn vertical_angle(&self) -> Float {
        self.vertical_angle
    }

    /// Number of rows, not counting the cap
    pub fn row_count(&self) -> usize {
        self.patches_per_row.len()
    }

    /// Number of patches in all rows, not counting the cap
    pub fn row_patch_count(&self) -> usize {
        self.patches_per_row.iter().sum()
    }

    /// Number of patches in the dome, cap included
    pub fn patch_count(&self) -> usize {
        self.row_patch_count() + 1
    }

    /// Number of triangles that make up the polar cap in a mesh
    pub fn cap_triangle_count(&self) -> usize {
        TREGENZA_PATCHES_PER_ROW[Self::BASE_ROW_COUNT - 1] * self.division_count
    }

    /// Number of patches in the first `rows` rows
    pub fn patches_in_first_rows(&self, rows: usize) -> usize {
        self.patches_per_row.iter().take(rows).sum()
    }

    /// Number of rows that lie within `offset_angle` degrees of the
    /// horizontal plane.
    ///
    /// Fails with `InvalidParameter` if the angle is not within `[0, 90]` and
    /// with `DegenerateBand` if no row fits.
    pub fn rows_within_offset(&self, offset_angle: Float) -> Result<usize> {
        check_angle("offset_angle", offset_angle)?;
        let rows = (offset_angle.to_radians() / self.vertical_angle).round_ties_even() as usize;
        let rows = rows.min(self.row_count());
        if rows == 0 {
            return Err(ViewSphereError::DegenerateBand {
                offset_angle,
                division_count: self.division_count,
            });
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme_table::REINHART_PATCHES_PER_ROW;
    use validate::assert_close;

    #[test]
    fn test_tregenza_rows() {
        for subdivision in [Subdivision::Extended, Subdivision::InPlace] {
            let rows = PatchRows::new(1, subdivision).unwrap();
            assert_eq!(rows.patches_per_row(), &TREGENZA_PATCHES_PER_ROW);
            assert_eq!(rows.patch_count(), 145);
            assert_eq!(rows.cap_triangle_count(), 6);
            assert_close!(rows.vertical_angle(), PI / 15., 1e-12);
        }
    }

    #[test]
    fn test_reinhart_rows() {
        let rows = PatchRows::new(2, Subdivision::Extended).unwrap();
        assert_eq!(rows.patches_per_row(), &REINHART_PATCHES_PER_ROW);
        assert_eq!(rows.patch_count(), 577);
        assert_eq!(rows.cap_triangle_count(), 12);
        assert_close!(rows.vertical_angle(), PI / 29., 1e-12);

        // In place keeps Tregenza's row boundaries
        let rows = PatchRows::new(2, Subdivision::InPlace).unwrap();
        assert_eq!(rows.patches_per_row(), &REINHART_PATCHES_PER_ROW);
        assert_close!(rows.vertical_angle(), PI / 30., 1e-12);
    }

    #[test]
    fn test_higher_division_counts() {
        let rows = PatchRows::new(3, Subdivision::Extended).unwrap();
        assert_eq!(rows.row_count(), 21);
        assert_eq!(rows.patches_per_row()[0], 90);
        assert_eq!(rows.patches_per_row()[20], 18);
        assert_eq!(rows.row_patch_count(), 144 * 9);
        assert_eq!(rows.cap_triangle_count(), 18);

        let rows = PatchRows::new(3, Subdivision::InPlace).unwrap();
        // 7 Tregenza rows of 12 degrees, each split in three.
        assert_close!(rows.vertical_angle() * 3., (12.0 as Float).to_radians(), 1e-9);
    }

    #[test]
    fn test_invalid_division_count() {
        assert!(matches!(
            PatchRows::new(0, Subdivision::Extended),
            Err(ViewSphereError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_correction_angle() {
        let extended = Subdivision::Extended.correction_angle(60, 2);
        assert_close!(extended, PI / 60., 1e-12);
        // Sub-patches start at the edge of the Tregenza patch
        let in_place = Subdivision::InPlace.correction_angle(60, 2);
        assert_close!(in_place, PI / 30., 1e-12);
    }

    #[test]
    fn test_rows_within_offset() {
        let rows = PatchRows::new(2, Subdivision::Extended).unwrap();
        assert_eq!(rows.rows_within_offset(30.).unwrap(), 5);
        assert_eq!(rows.patches_in_first_rows(5), 288);
        // Never more rows than there are
        assert_eq!(rows.rows_within_offset(90.).unwrap(), 14);

        assert!(matches!(
            rows.rows_within_offset(1.),
            Err(ViewSphereError::DegenerateBand { .. })
        ));
        assert!(matches!(
            rows.rows_within_offset(120.),
            Err(ViewSphereError::InvalidParameter(_))
        ));
    }
}
