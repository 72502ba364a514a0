//! Seedable random sampling for anti-aliasing, lens and scatter directions.
//!
//! There is no global generator: every caller owns a `Sampler` and threads
//! it through camera and material calls, so renders are reproducible for a
//! given seed and parallel workers never share state.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rt_math::Vec3;

/// Upper bound on rejection-sampling iterations.
///
/// The expected number of draws is below 2 for both the disk and the
/// sphere, so this is only reached by a broken generator.
pub const MAX_REJECTION_ATTEMPTS: u32 = 64;

/// Source of uniform randoms and random points in the unit disk/sphere.
pub struct Sampler<R: RngCore = StdRng> {
    rng: R,
}

impl Sampler<StdRng> {
    /// Create a deterministic sampler from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Reset the sampler to the start of the sequence for `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

impl<R: RngCore> Sampler<R> {
    /// Wrap an arbitrary generator.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform float in [0, 1).
    #[inline]
    pub fn uniform(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Uniform float in [min, max).
    #[inline]
    pub fn uniform_in(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.uniform()
    }

    /// Random point strictly inside the unit disk in the z = 0 plane.
    pub fn in_unit_disk(&mut self) -> Vec3 {
        for _ in 0..MAX_REJECTION_ATTEMPTS {
            let p = Vec3::new(self.uniform_in(-1.0, 1.0), self.uniform_in(-1.0, 1.0), 0.0);
            if p.length_squared() < 1.0 {
                return p;
            }
        }
        log::trace!("in_unit_disk: no sample after {} attempts", MAX_REJECTION_ATTEMPTS);
        Vec3::ZERO
    }

    /// Random point strictly inside the unit sphere.
    pub fn in_unit_sphere(&mut self) -> Vec3 {
        for _ in 0..MAX_REJECTION_ATTEMPTS {
            let p = Vec3::new(
                self.uniform_in(-1.0, 1.0),
                self.uniform_in(-1.0, 1.0),
                self.uniform_in(-1.0, 1.0),
            );
            if p.length_squared() < 1.0 {
                return p;
            }
        }
        log::trace!("in_unit_sphere: no sample after {} attempts", MAX_REJECTION_ATTEMPTS);
        Vec3::ZERO
    }

    /// Random direction on the unit sphere.
    pub fn unit_vector(&mut self) -> Vec3 {
        self.in_unit_sphere().try_normalize().unwrap_or(Vec3::Y)
    }

    /// Random direction in the hemisphere around `normal`.
    pub fn in_hemisphere(&mut self, normal: Vec3) -> Vec3 {
        let v = self.unit_vector();
        if v.dot(normal) >= 0.0 {
            v
        } else {
            -v
        }
    }
}

/// Derive a well-mixed seed for stream `stream` of a render seeded with
/// `base`, so neighbouring workers do not get correlated noise.
pub fn derive_seed(base: u64, stream: u64) -> u64 {
    // splitmix64 finalizer
    let mut z = base ^ stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
