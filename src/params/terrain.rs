//! Terrain synthesis parameters with documented ranges.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

/// Upper bound on octaves; keeps the amplitude sums well away from degenerate
pub const MAX_OCTAVES: u32 = 10;

/// Largest grid accepted, in vertices (32 bytes each)
pub const MAX_VERTICES: u32 = 1 << 24;

/// Largest first-layer amplitude; summed heights stay well inside f32
pub const MAX_AMPLITUDE: f64 = 1.0e6;

/// Largest frequency any height layer may reach
pub const MAX_FREQUENCY: f64 = 1.0e6;

/// Parameters for one terrain regeneration.
///
/// Plain value: the owning application keeps the current one and passes
/// copies into synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TerrainParameters {
    /// Grid vertices along X (>= 2)
    pub width: u32,

    /// Grid vertices along Z (>= 2)
    pub height: u32,

    /// Octave count, used both for height layers and inside each noise call (1..=10)
    pub octaves: u32,

    /// Per-octave amplitude decay (0, 1]
    pub persistence: f64,

    /// Per-layer frequency growth (>= 1)
    pub lacunarity: f64,

    /// Height scale of the first layer (> 0)
    pub base_amplitude: f64,

    /// Spatial frequency of the first layer in cycles per grid span (> 0)
    pub base_frequency: f64,
}

impl Default for TerrainParameters {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            base_amplitude: 0.5,
            base_frequency: 0.4,
        }
    }
}

/// Outer height-layer loop: one noise call per layer, amplitude and
/// frequency stepping between layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerStack {
    pub layers: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    pub base_amplitude: f64,
    pub base_frequency: f64,
}

/// Inner octave loop run by every noise call (lacunarity fixed at 2).
///
/// Shares its octave count with [`LayerStack::layers`], so a height sample
/// costs `octaves²` gradient evaluations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseDetail {
    pub octaves: u32,
    pub persistence: f64,
}

impl TerrainParameters {
    /// Check every range; returns the first violation found.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.width < 2 {
            return Err(TerrainError::invalid(
                "width",
                format!("must be at least 2, got {}", self.width),
            ));
        }
        if self.height < 2 {
            return Err(TerrainError::invalid(
                "height",
                format!("must be at least 2, got {}", self.height),
            ));
        }
        if u64::from(self.width) * u64::from(self.height) > u64::from(MAX_VERTICES) {
            return Err(TerrainError::MeshTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.octaves < 1 || self.octaves > MAX_OCTAVES {
            return Err(TerrainError::invalid(
                "octaves",
                format!("must be in 1..={}, got {}", MAX_OCTAVES, self.octaves),
            ));
        }
        if !(self.persistence > 0.0 && self.persistence <= 1.0) {
            return Err(TerrainError::invalid(
                "persistence",
                format!("must be in (0, 1], got {}", self.persistence),
            ));
        }
        if !(self.lacunarity >= 1.0 && self.lacunarity.is_finite()) {
            return Err(TerrainError::invalid(
                "lacunarity",
                format!("must be a finite value >= 1, got {}", self.lacunarity),
            ));
        }
        if !(self.base_amplitude > 0.0 && self.base_amplitude <= MAX_AMPLITUDE) {
            return Err(TerrainError::invalid(
                "baseAmplitude",
                format!("must be in (0, {:e}], got {}", MAX_AMPLITUDE, self.base_amplitude),
            ));
        }
        if !(self.base_frequency > 0.0 && self.base_frequency <= MAX_FREQUENCY) {
            return Err(TerrainError::invalid(
                "baseFrequency",
                format!("must be in (0, {:e}], got {}", MAX_FREQUENCY, self.base_frequency),
            ));
        }
        let top = self.top_layer_frequency();
        if !(top <= MAX_FREQUENCY) {
            return Err(TerrainError::invalid(
                "lacunarity",
                format!(
                    "layer frequency reaches {:e} after {} octaves (limit {:e})",
                    top, self.octaves, MAX_FREQUENCY
                ),
            ));
        }
        Ok(())
    }

    /// Frequency of the last height layer, stepped the same way synthesis does
    pub fn top_layer_frequency(&self) -> f64 {
        let mut frequency = self.base_frequency;
        for _ in 1..self.octaves {
            frequency *= self.lacunarity;
        }
        frequency
    }

    pub fn layering(&self) -> LayerStack {
        LayerStack {
            layers: self.octaves,
            persistence: self.persistence,
            lacunarity: self.lacunarity,
            base_amplitude: self.base_amplitude,
            base_frequency: self.base_frequency,
        }
    }

    pub fn noise_detail(&self) -> NoiseDetail {
        NoiseDetail {
            octaves: self.octaves,
            persistence: self.persistence,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn index_count(&self) -> usize {
        6 * (self.width.saturating_sub(1) as usize) * (self.height.saturating_sub(1) as usize)
    }

    /// Pull every field into its valid range.
    ///
    /// NaN floats fall back to the default value for that field. Lacunarity
    /// is capped so the top layer stays within [`MAX_FREQUENCY`].
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let width = self.width.clamp(2, MAX_VERTICES / 2);
        let octaves = self.octaves.clamp(1, MAX_OCTAVES);
        let base_frequency = clamp_or(
            self.base_frequency,
            f64::MIN_POSITIVE,
            MAX_FREQUENCY,
            defaults.base_frequency,
        );

        // Log form keeps the ratio finite for tiny base frequencies; the
        // margin absorbs rounding in the repeated multiplication
        let max_lacunarity = if octaves > 1 {
            let headroom = (MAX_FREQUENCY.ln() - base_frequency.ln()) / f64::from(octaves - 1);
            (headroom.exp() * (1.0 - 1e-9)).clamp(1.0, f64::MAX)
        } else {
            f64::MAX
        };

        Self {
            width,
            height: self.height.clamp(2, MAX_VERTICES / width),
            octaves,
            persistence: clamp_or(self.persistence, f64::MIN_POSITIVE, 1.0, defaults.persistence),
            lacunarity: clamp_or(self.lacunarity, 1.0, max_lacunarity, defaults.lacunarity),
            base_amplitude: clamp_or(
                self.base_amplitude,
                f64::MIN_POSITIVE,
                MAX_AMPLITUDE,
                defaults.base_amplitude,
            ),
            base_frequency,
        }
    }

    /// Copy with one field replaced (integers are rounded). Not validated.
    pub fn with_field(&self, field: ParameterField, value: f64) -> Self {
        let mut next = *self;
        match field {
            ParameterField::Width => next.width = round_to_u32(value),
            ParameterField::Height => next.height = round_to_u32(value),
            ParameterField::Octaves => next.octaves = round_to_u32(value),
            ParameterField::Persistence => next.persistence = value,
            ParameterField::Lacunarity => next.lacunarity = value,
            ParameterField::BaseAmplitude => next.base_amplitude = value,
            ParameterField::BaseFrequency => next.base_frequency = value,
        }
        next
    }

    pub fn field(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::Width => f64::from(self.width),
            ParameterField::Height => f64::from(self.height),
            ParameterField::Octaves => f64::from(self.octaves),
            ParameterField::Persistence => self.persistence,
            ParameterField::Lacunarity => self.lacunarity,
            ParameterField::BaseAmplitude => self.base_amplitude,
            ParameterField::BaseFrequency => self.base_frequency,
        }
    }

    /// Copy with one field multiplied by `factor`. Not validated.
    pub fn scaled(&self, field: ParameterField, factor: f64) -> Self {
        self.with_field(field, self.field(field) * factor)
    }
}

impl fmt::Display for TerrainParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} grid, {} octaves, persistence {}, lacunarity {}, amplitude {}, frequency {}",
            self.width,
            self.height,
            self.octaves,
            self.persistence,
            self.lacunarity,
            self.base_amplitude,
            self.base_frequency
        )
    }
}

/// Addressable field of [`TerrainParameters`], for command-driven edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterField {
    Width,
    Height,
    Octaves,
    Persistence,
    Lacunarity,
    BaseAmplitude,
    BaseFrequency,
}

impl ParameterField {
    pub const ALL: [ParameterField; 7] = [
        Self::Width,
        Self::Height,
        Self::Octaves,
        Self::Persistence,
        Self::Lacunarity,
        Self::BaseAmplitude,
        Self::BaseFrequency,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::Octaves => "octaves",
            Self::Persistence => "persistence",
            Self::Lacunarity => "lacunarity",
            Self::BaseAmplitude => "amplitude",
            Self::BaseFrequency => "frequency",
        }
    }
}

impl FromStr for ParameterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_lowercase().replace(['_', '-'], "");
        match key.as_str() {
            "width" => Ok(Self::Width),
            "height" => Ok(Self::Height),
            "octaves" => Ok(Self::Octaves),
            "persistence" => Ok(Self::Persistence),
            "lacunarity" => Ok(Self::Lacunarity),
            "amplitude" | "baseamplitude" => Ok(Self::BaseAmplitude),
            "frequency" | "basefrequency" => Ok(Self::BaseFrequency),
            _ => Err(format!("unknown parameter '{}'", s)),
        }
    }
}

fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

fn round_to_u32(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.round().min(f64::from(u32::MAX)) as u32
    }
}
