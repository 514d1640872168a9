//! Command-line argument parsing.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::noise::FractalKind;
use crate::params::{ParameterField, TerrainParameters};
use crate::DEFAULT_SEED;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "terrasynth")]
#[command(about = "Procedural heightfield terrain from layered gradient noise", long_about = None)]
pub struct Args {
    /// Noise seed
    #[arg(long, global = true, default_value_t = DEFAULT_SEED)]
    pub seed: u32,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synthesize a mesh once and print a summary
    Generate {
        #[command(flatten)]
        terrain: TerrainArgs,

        /// Write a grayscale heightmap PNG
        #[arg(long, value_name = "PATH")]
        heightmap: Option<PathBuf>,

        /// Write the resolved parameters as JSON
        #[arg(long, value_name = "PATH")]
        save_params: Option<PathBuf>,
    },

    /// Render one noise variant to a PNG
    Preview {
        /// Variant: classic, ridged, billow, cellular
        #[arg(long, default_value = "classic")]
        kind: FractalKind,

        #[arg(long, default_value_t = 4)]
        octaves: u32,

        #[arg(long, default_value_t = 0.5)]
        persistence: f64,

        /// Image side length (pixels)
        #[arg(long, default_value_t = 256)]
        size: u32,

        /// Noise units per pixel
        #[arg(long, default_value_t = 0.05)]
        frequency: f64,

        #[arg(long, default_value = "preview.png")]
        output: PathBuf,
    },

    /// Edit parameters interactively from stdin with undo
    Session {
        #[command(flatten)]
        terrain: TerrainArgs,
    },
}

/// Terrain parameters: an optional JSON preset with per-field overrides
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct TerrainArgs {
    /// JSON parameter preset (missing fields use defaults)
    #[arg(long, value_name = "PATH")]
    pub params: Option<PathBuf>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    #[arg(long)]
    pub octaves: Option<u32>,

    #[arg(long)]
    pub persistence: Option<f64>,

    #[arg(long)]
    pub lacunarity: Option<f64>,

    #[arg(long)]
    pub amplitude: Option<f64>,

    #[arg(long)]
    pub frequency: Option<f64>,
}

impl TerrainArgs {
    /// Load the preset (or defaults) and apply overrides. Not validated.
    pub fn resolve(&self) -> anyhow::Result<TerrainParameters> {
        let mut params = match &self.params {
            Some(path) => load_params(path)?,
            None => TerrainParameters::default(),
        };

        let overrides = [
            (ParameterField::Width, self.width.map(f64::from)),
            (ParameterField::Height, self.height.map(f64::from)),
            (ParameterField::Octaves, self.octaves.map(f64::from)),
            (ParameterField::Persistence, self.persistence),
            (ParameterField::Lacunarity, self.lacunarity),
            (ParameterField::BaseAmplitude, self.amplitude),
            (ParameterField::BaseFrequency, self.frequency),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                params = params.with_field(field, value);
            }
        }

        Ok(params)
    }
}

pub fn load_params(path: &Path) -> anyhow::Result<TerrainParameters> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read parameters from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse parameters in {}", path.display()))
}

pub fn save_params(path: &Path, params: &TerrainParameters) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(params)?;
    fs::write(path, text)
        .with_context(|| format!("failed to write parameters to {}", path.display()))
}

/// One line of session input
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// `set <field> <value>`
    Set(ParameterField, f64),
    /// `scale <field> <factor>`
    Scale(ParameterField, f64),
    Undo,
    Show,
    /// `save <path>` writes the current heightmap
    Save(PathBuf),
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or_else(|| "empty command".to_string())?;
        let rest: Vec<&str> = words.collect();

        match (verb.to_lowercase().as_str(), rest.as_slice()) {
            ("set", [field, value]) => Ok(Self::Set(field.parse()?, parse_number(value)?)),
            ("scale", [field, factor]) => Ok(Self::Scale(field.parse()?, parse_number(factor)?)),
            ("undo", []) => Ok(Self::Undo),
            ("show", []) => Ok(Self::Show),
            ("save", [path]) => Ok(Self::Save(PathBuf::from(path))),
            ("help", []) => Ok(Self::Help),
            ("quit" | "exit", []) => Ok(Self::Quit),
            (other, _) => Err(format!("cannot parse '{}' (try 'help')", other)),
        }
    }
}

fn parse_number(text: &str) -> Result<f64, String> {
    text.parse::<f64>()
        .map_err(|_| format!("'{}' is not a number", text))
}

pub const SESSION_HELP: &str = "\
commands:
  set <field> <value>     replace a parameter
  scale <field> <factor>  multiply a parameter
  undo                    revert the last change
  show                    print current parameters
  save <path>             write the heightmap PNG
  quit
fields: width height octaves persistence lacunarity amplitude frequency";
