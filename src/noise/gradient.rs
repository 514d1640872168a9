//! Seedable 2D/3D gradient noise over a 256-lattice permutation table.

use noise::NoiseFn;

/// Number of distinct lattice hashes (table is stored twice this length)
const TABLE_SIZE: usize = 256;

/// SplitMix64 step used to drive the table shuffle.
///
/// Stable across releases: the same seed always yields the same table.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

/// Seeded permutation of 0..255, duplicated to 512 entries so corner
/// lookups never need to wrap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationTable {
    values: [u8; TABLE_SIZE * 2],
}

impl PermutationTable {
    /// Build a table by Fisher–Yates shuffling 0..255 with a SplitMix64
    /// stream seeded from `seed`.
    pub fn new(seed: u32) -> Self {
        let mut base = [0u8; TABLE_SIZE];
        for (i, slot) in base.iter_mut().enumerate() {
            *slot = i as u8;
        }

        let mut rng = SplitMix64::new(u64::from(seed));
        for i in (1..TABLE_SIZE).rev() {
            let j = (rng.next_u64() % (i as u64 + 1)) as usize;
            base.swap(i, j);
        }

        let mut values = [0u8; TABLE_SIZE * 2];
        values[..TABLE_SIZE].copy_from_slice(&base);
        values[TABLE_SIZE..].copy_from_slice(&base);
        Self { values }
    }

    #[inline]
    fn at(&self, index: usize) -> usize {
        self.values[index] as usize
    }

    /// The full 512-entry table
    pub fn as_slice(&self) -> &[u8] {
        &self.values
    }
}

/// Deterministic gradient noise field.
///
/// Sampling is read-only, so one instance can be shared across threads.
/// The field repeats every 256 units along each axis.
#[derive(Clone, Debug)]
pub struct GradientNoise {
    seed: u32,
    table: PermutationTable,
}

impl GradientNoise {
    /// Create a new noise field with seed
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            table: PermutationTable::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn table(&self) -> &PermutationTable {
        &self.table
    }

    /// Sample 2D noise at position
    ///
    /// Returns value in range [0, 1]
    pub fn sample2(&self, x: f64, y: f64) -> f64 {
        let (xi, fx) = lattice(x);
        let (yi, fy) = lattice(y);

        let u = fade(fx);
        let v = fade(fy);

        let p = &self.table;
        let aa = p.at(p.at(xi) + yi);
        let ab = p.at(p.at(xi) + yi + 1);
        let ba = p.at(p.at(xi + 1) + yi);
        let bb = p.at(p.at(xi + 1) + yi + 1);

        let res = lerp(
            v,
            lerp(u, grad(aa, fx, fy), grad(ba, fx - 1.0, fy)),
            lerp(u, grad(ab, fx, fy - 1.0), grad(bb, fx - 1.0, fy - 1.0)),
        );
        (res + 1.0) / 2.0
    }

    /// Sample 3D noise at position
    ///
    /// Returns value in range [0, 1]
    pub fn sample3(&self, x: f64, y: f64, z: f64) -> f64 {
        let (xi, fx) = lattice(x);
        let (yi, fy) = lattice(y);
        let (zi, fz) = lattice(z);

        let u = fade(fx);
        let v = fade(fy);
        let w = fade(fz);

        let p = &self.table;
        let a = p.at(xi) + yi;
        let aa = p.at(a) + zi;
        let ab = p.at(a + 1) + zi;
        let b = p.at(xi + 1) + yi;
        let ba = p.at(b) + zi;
        let bb = p.at(b + 1) + zi;

        let res = lerp(
            w,
            lerp(
                v,
                lerp(u, grad3(p.at(aa), fx, fy, fz), grad3(p.at(ba), fx - 1.0, fy, fz)),
                lerp(
                    u,
                    grad3(p.at(ab), fx, fy - 1.0, fz),
                    grad3(p.at(bb), fx - 1.0, fy - 1.0, fz),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad3(p.at(aa + 1), fx, fy, fz - 1.0),
                    grad3(p.at(ba + 1), fx - 1.0, fy, fz - 1.0),
                ),
                lerp(
                    u,
                    grad3(p.at(ab + 1), fx, fy - 1.0, fz - 1.0),
                    grad3(p.at(bb + 1), fx - 1.0, fy - 1.0, fz - 1.0),
                ),
            ),
        );
        // The 16-direction lattice can overshoot the unit range by a few percent
        ((res + 1.0) / 2.0).clamp(0.0, 1.0)
    }
}

impl NoiseFn<f64, 2> for GradientNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample2(point[0], point[1])
    }
}

impl NoiseFn<f64, 3> for GradientNoise {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.sample3(point[0], point[1], point[2])
    }
}

/// Split a coordinate into its masked lattice cell and fractional offset.
#[inline]
fn lattice(t: f64) -> (usize, f64) {
    let floor = t.floor();
    let cell = (floor as i64 & 255) as usize;
    (cell, t - floor)
}

/// Quintic fade curve 6t^5 - 15t^4 + 10t^3
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product with one of four diagonal gradients picked by the low two hash bits.
#[inline]
pub fn grad(hash: usize, x: f64, y: f64) -> f64 {
    let h = hash & 3;
    let u = if h < 2 { x } else { y };
    let v = if h < 2 { y } else { x };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

/// Dot product with one of the 12 cube-edge gradients (16 slots, four repeated).
#[inline]
pub fn grad3(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
