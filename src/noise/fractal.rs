//! Multi-octave composition of gradient noise.
//!
//! Every variant starts at frequency 1 and amplitude 1, multiplies them by
//! lacunarity and persistence after each octave, and divides the sum by the
//! accumulated amplitude so the result stays in [0, 1].

use std::fmt;
use std::str::FromStr;

use noise::NoiseFn;

use super::cellular;
use super::gradient::GradientNoise;

/// Lacunarity used by the overloads that do not take one explicitly
pub const DEFAULT_LACUNARITY: f64 = 2.0;

/// Octave sum variant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FractalKind {
    /// Plain fractal sum
    Classic,
    /// Sharpened folded noise with inter-octave weighting
    Ridged,
    /// Folded noise without sharpening
    Billow,
    /// Distance to nearest feature point
    Cellular,
}

impl FromStr for FractalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "ridged" => Ok(Self::Ridged),
            "billow" => Ok(Self::Billow),
            "cellular" | "voronoi" => Ok(Self::Cellular),
            other => Err(format!(
                "unknown noise variant '{}' (expected classic, ridged, billow or cellular)",
                other
            )),
        }
    }
}

impl fmt::Display for FractalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Classic => "classic",
            Self::Ridged => "ridged",
            Self::Billow => "billow",
            Self::Cellular => "cellular",
        };
        f.write_str(name)
    }
}

/// Combines octaves of one [`GradientNoise`] field
#[derive(Clone, Debug)]
pub struct FractalCompositor {
    noise: GradientNoise,
}

impl FractalCompositor {
    pub fn new(noise: GradientNoise) -> Self {
        Self { noise }
    }

    pub fn with_seed(seed: u32) -> Self {
        Self::new(GradientNoise::new(seed))
    }

    pub fn noise(&self) -> &GradientNoise {
        &self.noise
    }

    /// Classic fractal sum with lacunarity fixed at 2
    pub fn classic2(&self, x: f64, y: f64, octaves: u32, persistence: f64) -> f64 {
        self.classic2_with_lacunarity(x, y, octaves, persistence, DEFAULT_LACUNARITY)
    }

    /// Classic fractal sum with explicit lacunarity
    pub fn classic2_with_lacunarity(
        &self,
        x: f64,
        y: f64,
        octaves: u32,
        persistence: f64,
        lacunarity: f64,
    ) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            total += self.noise.sample2(x * frequency, y * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }

        normalize(total, max_value)
    }

    /// Ridged multifractal: each octave is folded, sharpened and then
    /// weighted by the previous octave's signal.
    pub fn ridged2(&self, x: f64, y: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;
        let mut weight = 1.0;

        for _ in 0..octaves {
            let sample = self.noise.sample2(x * frequency, y * frequency);
            let mut signal = fold(sample);
            signal = (1.0 - signal) * (1.0 - signal);
            signal *= weight;
            weight = (signal * 2.0).clamp(0.0, 1.0);

            total += signal * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= DEFAULT_LACUNARITY;
        }

        normalize(total, max_value)
    }

    /// Billow: folded noise without sharpening
    pub fn billow2(&self, x: f64, y: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            let sample = self.noise.sample2(x * frequency, y * frequency);
            total += fold(sample) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= DEFAULT_LACUNARITY;
        }

        normalize(total, max_value)
    }

    /// Distance to the nearest cellular feature point after scaling by `frequency`.
    ///
    /// Unbounded; callers scale the distance themselves.
    pub fn voronoi2(&self, x: f64, y: f64, frequency: f64) -> f64 {
        cellular::nearest_feature_distance(x * frequency, y * frequency)
    }

    /// 3D classic fractal sum with lacunarity fixed at 2
    pub fn classic3(&self, x: f64, y: f64, z: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            total += self
                .noise
                .sample3(x * frequency, y * frequency, z * frequency)
                * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= DEFAULT_LACUNARITY;
        }

        normalize(total, max_value)
    }

    /// Bind a variant and its settings into a 2D field
    pub fn field(&self, kind: FractalKind, octaves: u32, persistence: f64) -> FractalField<'_> {
        FractalField {
            compositor: self,
            kind,
            octaves,
            persistence,
        }
    }
}

/// A fractal variant with fixed octave settings, usable anywhere a
/// `NoiseFn<f64, 2>` is accepted.
///
/// Cellular output is the raw feature distance scaled by `1/sqrt(2)` and
/// clamped to [0, 1]; frequency for that variant is 1.
#[derive(Clone, Copy, Debug)]
pub struct FractalField<'a> {
    compositor: &'a FractalCompositor,
    kind: FractalKind,
    octaves: u32,
    persistence: f64,
}

impl FractalField<'_> {
    pub fn kind(&self) -> FractalKind {
        self.kind
    }
}

impl NoiseFn<f64, 2> for FractalField<'_> {
    fn get(&self, point: [f64; 2]) -> f64 {
        let [x, y] = point;
        let c = self.compositor;
        match self.kind {
            FractalKind::Classic => c.classic2(x, y, self.octaves, self.persistence),
            FractalKind::Ridged => c.ridged2(x, y, self.octaves, self.persistence),
            FractalKind::Billow => c.billow2(x, y, self.octaves, self.persistence),
            FractalKind::Cellular => {
                (c.voronoi2(x, y, 1.0) * std::f64::consts::FRAC_1_SQRT_2).clamp(0.0, 1.0)
            }
        }
    }
}

/// Fold a [0, 1] sample around its midpoint into [0, 1]
#[inline]
fn fold(sample: f64) -> f64 {
    2.0 * (sample - 0.5).abs()
}

#[inline]
fn normalize(total: f64, max_value: f64) -> f64 {
    if max_value > 0.0 {
        total / max_value
    } else {
        0.0
    }
}
