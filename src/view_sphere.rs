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

use crate::error::{check_angle, check_division_count, Result};
use crate::mesh::PatchMesh;
use crate::options::{Hemisphere, SchemeOptions};
use crate::rows::{PatchRows, Subdivision};
use crate::scheme_table::canonical_solid_angles;
use crate::Float;
use crate::{dome_patches, horizontal_radial_patches, sphere_patches};
use crate::weights::{band_weights_of, dome_weights_of};
use geometry3d::Vector3D;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A mesh and its direction vectors. Vector `i` corresponds to face `i`,
/// except for polar caps (see [`crate::dome_patches`]).
#[derive(Clone)]
pub struct PatchSet {
    /// The faces representing the patches
    pub mesh: PatchMesh,
    /// One unit vector per patch
    pub vectors: Vec<Vector3D>,
}

impl From<(PatchMesh, Vec<Vector3D>)> for PatchSet {
    fn from((mesh, vectors): (PatchMesh, Vec<Vector3D>)) -> Self {
        Self { mesh, vectors }
    }
}

/// Cache key for patches. Offset angles are stored as their bits
/// because `Float` is not `Hash`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct PatchKey {
    division_count: usize,
    subdivision: Subdivision,
    hemisphere: Hemisphere,
    offset_angle: Option<u64>,
}

/// Cache key for weights
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct WeightKey {
    division_count: usize,
    subdivision: Subdivision,
    hemisphere: Hemisphere,
    offset_angle: Option<u64>,
}

fn angle_bits(angle: Option<Float>) -> Option<u64> {
    angle.map(|a| u64::from(a.to_bits()))
}

/// Returns the cached value for `key`, building it if needed.
///
/// The lock is not held while building, so two threads asking for the
/// same new key may both build it. Only the first one is stored, and both
/// get that one.
fn get_or_build<K, V, F>(map: &RwLock<HashMap<K, Arc<V>>>, key: K, build: F) -> Result<Arc<V>>
where
    K: Eq + Hash + std::fmt::Debug,
    F: FnOnce() -> Result<V>,
{
    if let Some(v) = map.read().get(&key) {
        log::trace!("Cache hit for {:?}", key);
        return Ok(Arc::clone(v));
    }
    let value = Arc::new(build()?);
    let mut map = map.write();
    Ok(Arc::clone(map.entry(key).or_insert(value)))
}

/// Builds and remembers patch schemes, their vectors and weights.
///
/// This is meant to be created once and shared (e.g., behind an `Arc`) by
/// whoever needs sky patches. Everything it returns is immutable; asking
/// twice for the same scheme returns the same `Arc`.
///
/// ```
/// use view_sphere::{ViewSphere, Subdivision};
///
/// let view_sphere = ViewSphere::new();
/// let a = view_sphere.sphere(1, Subdivision::Extended).unwrap();
/// let b = view_sphere.tregenza_sphere().unwrap();
/// assert_eq!(a.vectors.len(), 290);
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// ```
#[derive(Default)]
pub struct ViewSphere {
    patches: RwLock<HashMap<PatchKey, Arc<PatchSet>>>,
    weights: RwLock<HashMap<WeightKey, Arc<Vec<Float>>>>,
}

impl ViewSphere {
    /// Creates an empty `ViewSphere`. Schemes are built as they are requested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `ViewSphere` with the domes and spheres (both subdivision
    /// modes) and weights of division counts `1..=max_division_count` already built.
    pub fn with_precomputed(max_division_count: usize) -> Result<Self> {
        check_division_count(max_division_count)?;
        let ret = Self::new();

        let mut keys = Vec::with_capacity(4 * max_division_count);
        for division_count in 1..=max_division_count {
            for subdivision in [Subdivision::Extended, Subdivision::InPlace] {
                for hemisphere in [Hemisphere::Dome, Hemisphere::Sphere] {
                    keys.push(SchemeOptions {
                        division_count,
                        subdivision,
                        hemisphere,
                        offset_angle: None,
                    });
                }
            }
        }

        #[cfg(not(feature = "parallel"))]
        let iter = keys.iter();
        #[cfg(feature = "parallel")]
        let iter = keys.par_iter();

        iter.map(|options| {
            ret.patches(options)?;
            ret.weights(options)?;
            Ok(())
        })
        .collect::<Result<Vec<()>>>()?;

        log::debug!(
            "Precomputed {} patch schemes up to division_count {}",
            ret.cached_schemes(),
            max_division_count
        );
        Ok(ret)
    }

    /// Number of patch schemes currently cached
    pub fn cached_schemes(&self) -> usize {
        self.patches.read().len()
    }

    /// Gets the patches described by some [`SchemeOptions`]
    pub fn patches(&self, options: &SchemeOptions) -> Result<Arc<PatchSet>> {
        options.validate()?;
        let key = PatchKey {
            division_count: options.division_count,
            subdivision: options.subdivision,
            // bands always include both halves
            hemisphere: if options.offset_angle.is_some() {
                Hemisphere::Sphere
            } else {
                options.hemisphere
            },
            offset_angle: angle_bits(options.offset_angle),
        };
        get_or_build(&self.patches, key, || {
            let (d, s) = (options.division_count, options.subdivision);
            let patches = match (options.offset_angle, options.hemisphere) {
                (Some(angle), _) => horizontal_radial_patches(angle, d, s)?,
                (None, Hemisphere::Dome) => dome_patches(d, s)?,
                (None, Hemisphere::Sphere) => sphere_patches(d, s)?,
            };
            Ok(patches.into())
        })
    }

    /// Gets the weights aligned with the vectors of [`Self::patches`]. The
    /// rows are those of `options.subdivision`, so weight `i` is the
    /// (normalized) solid angle of patch `i` in either mode.
    pub fn weights(&self, options: &SchemeOptions) -> Result<Arc<Vec<Float>>> {
        options.validate()?;
        let key = WeightKey {
            division_count: options.division_count,
            subdivision: options.subdivision,
            hemisphere: if options.offset_angle.is_some() {
                Hemisphere::Sphere
            } else {
                options.hemisphere
            },
            offset_angle: angle_bits(options.offset_angle),
        };
        get_or_build(&self.weights, key, || {
            let rows = PatchRows::new(options.division_count, options.subdivision)?;
            match (options.offset_angle, options.hemisphere) {
                (Some(angle), _) => band_weights_of(&rows, angle),
                (None, Hemisphere::Dome) => Ok(dome_weights_of(&rows)),
                (None, Hemisphere::Sphere) => Ok(dome_weights_of(&rows).repeat(2)),
            }
        })
    }

    /// Gets the patches of a dome (see [`crate::dome_patches`])
    pub fn dome(&self, division_count: usize, subdivision: Subdivision) -> Result<Arc<PatchSet>> {
        self.patches(&SchemeOptions {
            division_count,
            subdivision,
            hemisphere: Hemisphere::Dome,
            offset_angle: None,
        })
    }

    /// Gets the patches of a sphere (see [`crate::sphere_patches`])
    pub fn sphere(&self, division_count: usize, subdivision: Subdivision) -> Result<Arc<PatchSet>> {
        self.patches(&SchemeOptions {
            division_count,
            subdivision,
            hemisphere: Hemisphere::Sphere,
            offset_angle: None,
        })
    }

    /// Gets the patches within `offset_angle` degrees of the horizontal plane
    /// (see [`crate::horizontal_radial_patches`])
    pub fn horizontal_band(
        &self,
        offset_angle: Float,
        division_count: usize,
        subdivision: Subdivision,
    ) -> Result<Arc<PatchSet>> {
        check_angle("offset_angle", offset_angle)?;
        self.patches(&SchemeOptions {
            division_count,
            subdivision,
            hemisphere: Hemisphere::Sphere,
            offset_angle: Some(offset_angle),
        })
    }

    /// Gets the weights of the dome patches (`Extended` mode)
    pub fn dome_weights(&self, division_count: usize) -> Result<Arc<Vec<Float>>> {
        self.weights(&SchemeOptions {
            division_count,
            ..SchemeOptions::default()
        })
    }

    /// Gets the weights of the sphere patches (`Extended` mode)
    pub fn sphere_weights(&self, division_count: usize) -> Result<Arc<Vec<Float>>> {
        self.weights(&SchemeOptions {
            division_count,
            hemisphere: Hemisphere::Sphere,
            ..SchemeOptions::default()
        })
    }

    /// Gets the weights of the patches within `offset_angle` degrees of the
    /// horizontal plane (`Extended` mode)
    pub fn horizontal_band_weights(
        &self,
        offset_angle: Float,
        division_count: usize,
    ) -> Result<Arc<Vec<Float>>> {
        check_angle("offset_angle", offset_angle)?;
        self.weights(&SchemeOptions {
            division_count,
            hemisphere: Hemisphere::Sphere,
            offset_angle: Some(offset_angle),
            ..SchemeOptions::default()
        })
    }

    /// The 145 patches of the Tregenza sky. There is one quad face per patch
    /// except for the last circular patch, which is represented by 6 triangles.
    pub fn tregenza_dome(&self) -> Result<Arc<PatchSet>> {
        self.dome(1, Subdivision::Extended)
    }

    /// The Tregenza dome, with each patch represented by a 3x3 set of quads and
    /// the last circular patch represented by 18 triangles.
    pub fn tregenza_dome_high_res(&self) -> Result<Arc<PatchSet>> {
        self.dome(3, Subdivision::InPlace)
    }

    /// The 290 patches of a sphere made of two Tregenza domes
    pub fn tregenza_sphere(&self) -> Result<Arc<PatchSet>> {
        self.sphere(1, Subdivision::Extended)
    }

    /// The 577 patches of the Reinhart sky
    pub fn reinhart_dome(&self) -> Result<Arc<PatchSet>> {
        self.dome(2, Subdivision::Extended)
    }

    /// The 1154 patches of a sphere made of two Reinhart domes
    pub fn reinhart_sphere(&self) -> Result<Arc<PatchSet>> {
        self.sphere(2, Subdivision::Extended)
    }

    /// The tabulated solid angle (steradians) of each Tregenza patch
    pub fn tregenza_solid_angles(&self) -> Vec<Float> {
        canonical_solid_angles(1).unwrap_or_default()
    }

    /// The tabulated solid angle (steradians) of each Reinhart patch
    pub fn reinhart_solid_angles(&self) -> Vec<Float> {
        canonical_solid_angles(2).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewSphereError;

    #[test]
    fn test_named_schemes() {
        let view_sphere = ViewSphere::new();
        assert_eq!(view_sphere.tregenza_dome().unwrap().vectors.len(), 145);
        assert_eq!(view_sphere.tregenza_sphere().unwrap().vectors.len(), 290);
        assert_eq!(view_sphere.reinhart_dome().unwrap().vectors.len(), 577);
        assert_eq!(view_sphere.reinhart_sphere().unwrap().vectors.len(), 1154);

        let high_res = view_sphere.tregenza_dome_high_res().unwrap();
        assert_eq!(high_res.mesh.faces().len(), 144 * 9 + 18);

        assert_eq!(view_sphere.tregenza_solid_angles().len(), 145);
        assert_eq!(view_sphere.reinhart_solid_angles().len(), 577);
        assert_eq!(view_sphere.cached_schemes(), 5);
    }

    #[test]
    fn test_cache_returns_same_arc() {
        let view_sphere = ViewSphere::new();
        let a = view_sphere.dome(2, Subdivision::Extended).unwrap();
        let b = view_sphere.reinhart_dome().unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        // Different parameters, different entries
        let c = view_sphere.dome(2, Subdivision::InPlace).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(view_sphere.cached_schemes(), 2);

        let w1 = view_sphere.horizontal_band_weights(30., 2).unwrap();
        let w2 = view_sphere.horizontal_band_weights(30., 2).unwrap();
        assert!(Arc::ptr_eq(&w1, &w2));
        assert_eq!(w1.len(), 576);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let view_sphere = ViewSphere::new();
        assert!(matches!(
            view_sphere.horizontal_band(120., 1, Subdivision::Extended),
            Err(ViewSphereError::InvalidParameter(_))
        ));
        assert!(matches!(
            view_sphere.horizontal_band(1., 1, Subdivision::Extended),
            Err(ViewSphereError::DegenerateBand { .. })
        ));
        assert!(view_sphere.dome(0, Subdivision::Extended).is_err());
        assert_eq!(view_sphere.cached_schemes(), 0);
    }

    #[test]
    fn test_weights_align_with_patches() {
        let view_sphere = ViewSphere::new();
        for subdivision in [Subdivision::Extended, Subdivision::InPlace] {
            for division_count in 1..4 {
                for offset_angle in [None, Some(3.), Some(33.), Some(40.), Some(45.), Some(90.)] {
                    for hemisphere in [Hemisphere::Dome, Hemisphere::Sphere] {
                        let options = SchemeOptions {
                            division_count,
                            subdivision,
                            hemisphere,
                            offset_angle,
                        };
                        match (view_sphere.patches(&options), view_sphere.weights(&options)) {
                            (Ok(patches), Ok(weights)) => {
                                assert_eq!(weights.len(), patches.vectors.len(), "{:?}", options)
                            }
                            (
                                Err(ViewSphereError::DegenerateBand { .. }),
                                Err(ViewSphereError::DegenerateBand { .. }),
                            ) => {}
                            _ => panic!("patches and weights disagree for {:?}", options),
                        }
                    }
                }
            }
        }

        // 6 degree rows: 40 degrees covers 7 of them, not the 6 of Extended mode
        let options = SchemeOptions {
            division_count: 2,
            subdivision: Subdivision::InPlace,
            hemisphere: Hemisphere::Sphere,
            offset_angle: Some(40.),
        };
        assert_eq!(view_sphere.patches(&options).unwrap().vectors.len(), 768);
        assert_eq!(view_sphere.weights(&options).unwrap().len(), 768);
        assert_eq!(view_sphere.horizontal_band_weights(40., 2).unwrap().len(), 672);

        // Same lengths, different patches
        let in_place = view_sphere
            .weights(&SchemeOptions {
                division_count: 2,
                subdivision: Subdivision::InPlace,
                ..SchemeOptions::default()
            })
            .unwrap();
        let extended = view_sphere.dome_weights(2).unwrap();
        assert_eq!(in_place.len(), extended.len());
        assert!(!Arc::ptr_eq(&in_place, &extended));
        assert!(in_place[576] > extended[576]);
    }

    #[test]
    fn test_precomputed() {
        let view_sphere = ViewSphere::with_precomputed(3).unwrap();
        assert_eq!(view_sphere.cached_schemes(), 12);
        assert!(ViewSphere::with_precomputed(0).is_err());
    }

    #[test]
    fn test_shared_between_threads() {
        let view_sphere = Arc::new(ViewSphere::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let view_sphere = Arc::clone(&view_sphere);
                std::thread::spawn(move || view_sphere.reinhart_sphere().unwrap())
            })
            .collect();
        let results: Vec<Arc<PatchSet>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Whoever built it first, everyone ends up with the cached one
        let cached = view_sphere.reinhart_sphere().unwrap();
        assert!(results.iter().all(|r| r.vectors.len() == 1154));
        assert!(Arc::ptr_eq(&cached, &view_sphere.reinhart_sphere().unwrap()));
        assert_eq!(view_sphere.cached_schemes(), 1);
    }
}
