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
use crate::view_sphere::PatchSet;
use crate::Float;
use serde::{Deserialize, Serialize};

/// The formats a patch scheme can be written to
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// A [`PatchSchemeRecord`] as JSON
    Json,
    /// An image of the scheme... not supported.
    Svg,
}

/// A patch scheme in plain numbers, ready to be serialized and
/// consumed by something that knows nothing about `geometry3d`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchSchemeRecord {
    /// The vertices of the mesh
    pub vertices: Vec<[Float; 3]>,
    /// The faces of the mesh (3 or 4 indices each)
    pub faces: Vec<Vec<usize>>,
    /// One unit vector per patch
    pub vectors: Vec<[Float; 3]>,
    /// One weight per patch, if requested
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub weights: Option<Vec<Float>>,
}

impl PatchSchemeRecord {
    /// Flattens a [`PatchSet`] (and, optionally, its weights)
    pub fn new(patches: &PatchSet, weights: Option<&[Float]>) -> Result<Self> {
        if let Some(w) = weights {
            if w.len() != patches.vectors.len() {
                return Err(ViewSphereError::InvalidParameter(format!(
                    "Expecting one weight per vector ({})... found {}",
                    patches.vectors.len(),
                    w.len()
                )));
            }
        }
        Ok(Self {
            vertices: patches
                .mesh
                .vertices()
                .iter()
                .map(|p| [p.x, p.y, p.z])
                .collect(),
            faces: patches
                .mesh
                .faces()
                .iter()
                .map(|f| f.indices().to_vec())
                .collect(),
            vectors: patches.vectors.iter().map(|v| [v.x, v.y, v.z]).collect(),
            weights: weights.map(|w| w.to_vec()),
        })
    }

    /// Writes this record in a certain format
    pub fn export(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => serde_json::to_string(self).map_err(|e| {
                ViewSphereError::InvalidParameter(format!("Could not serialize patches: {}", e))
            }),
            ExportFormat::Svg => Err(ViewSphereError::Unsupported(
                "drawing patch schemes and their legends is left to visualization tools".into(),
            )),
        }
    }
}
