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
use crate::rows::Subdivision;
use crate::Float;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Whether a scheme covers the upper hemisphere or the whole sphere
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hemisphere {
    /// Only the sky
    #[default]
    Dome,
    /// The sky and its mirror image below the horizon
    Sphere,
}

/// The options describing which patch scheme to build.
///
/// ```json
/// {
///     "division_count": 2,
///     "subdivision": "in_place",
///     "hemisphere": "sphere",
///     "offset_angle": 30
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemeOptions {
    /// How many times Tregenza's patches are subdivided (1 is Tregenza,
    /// 2 is Reinhart)
    pub division_count: usize,

    /// How to go beyond Tregenza's patches
    pub subdivision: Subdivision,

    /// Dome or sphere. Ignored when an `offset_angle` is given, as
    /// bands around the horizon always include both halves.
    pub hemisphere: Hemisphere,

    /// If given, only the patches within this angle (degrees) of the
    /// horizontal plane are included.
    pub offset_angle: Option<Float>,
}

impl Default for SchemeOptions {
    fn default() -> Self {
        Self {
            division_count: 1,
            subdivision: Subdivision::Extended,
            hemisphere: Hemisphere::Dome,
            offset_angle: None,
        }
    }
}

impl SchemeOptions {
    /// Reads the options from a JSON (or JSON5) file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ViewSphereError::InvalidParameter(format!(
                "Could not read options file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Parses the options from a JSON string and validates them. JSON5 is
    /// accepted too, so hand-written files may have comments and trailing commas.
    pub fn from_json(content: &str) -> Result<Self> {
        let options: Self = json5::from_str(content).map_err(|e| {
            ViewSphereError::InvalidParameter(format!("Could not parse options: {}", e))
        })?;
        options.validate()?;
        Ok(options)
    }

    /// Checks that the division count and offset angle are valid
    pub fn validate(&self) -> Result<()> {
        check_division_count(self.division_count)?;
        if let Some(angle) = self.offset_angle {
            check_angle("offset_angle", angle)?;
        }
        Ok(())
    }
}
