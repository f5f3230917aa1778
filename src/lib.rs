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

#![deny(missing_docs)]

//! This is [SIMPLE's](https://www.simplesim.tools) sky and view subdivision module. It is responsible for:
//!
//! * **Subdividing the sky dome**: The hemisphere is split into the patches described by Tregenza (145 patches)
//! and its Reinhart-style refinements (577 patches, and so on). Each patch gets a direction vector and a face
//! in a mesh, so that values calculated per patch (e.g., the radiance of a sky) can be mapped onto geometry.
//! * **Subdividing the whole sphere**: By mirroring the dome below the horizon.
//! * **Weighting the patches**: The patches do not have the same size, so hemispherical integrals need to be
//! weighted by the solid angle of each patch. All weight sets returned by this crate have a mean of 1.
//! * **Horizontal views**: Bands of patches close to the horizon, useful for peripheral vision and vertical
//! view studies, as well as masks for windows with overhangs and fins.
//!
//! ```
//! use view_sphere::{ViewSphere, Subdivision};
//!
//! let view_sphere = ViewSphere::new();
//! let dome = view_sphere.dome(2, Subdivision::Extended).unwrap();
//! assert_eq!(dome.vectors.len(), 577);
//! ```

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
pub type Float = f32;
/// Well, Pi.
#[cfg(feature = "float")]
pub const PI: Float = std::f32::consts::PI;

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(not(feature = "float"))]
pub type Float = f64;

/// Well, Pi.
#[cfg(not(feature = "float"))]
pub const PI: Float = std::f64::consts::PI;

/// The errors returned by this crate
pub mod error;
pub use error::{Result, ViewSphereError};

/// The Tregenza and Reinhart tables
pub mod scheme_table;

/// Rows of patches for any division count
pub mod rows;
pub use rows::{PatchRows, Subdivision};

/// A mesh made of quads and triangles
pub mod mesh;
pub use mesh::{Face, PatchMesh};

/// Patches in the upper hemisphere
pub mod dome;
pub use dome::{dome_patches, dome_radial_patches};

/// Patches in the whole sphere
pub mod sphere;
pub use sphere::sphere_patches;

/// Solid-angle weights
pub mod weights;
pub use weights::{
    dome_patch_weights, dome_radial_patch_weights, horizontal_radial_patch_weights,
    sphere_patch_weights,
};

/// Patches close to the horizontal plane
pub mod radial;
pub use radial::{horizontal_radial_patches, horizontal_radial_vectors};

/// Patterns of blocked view vectors
pub mod masks;

/// Options for requesting a patch scheme
pub mod options;
pub use options::{Hemisphere, SchemeOptions};

/// Serializing patch schemes
pub mod export;

/// The main export of this module: a context that builds and
/// remembers patch schemes.
pub mod view_sphere;
pub use crate::view_sphere::{PatchSet, ViewSphere};
