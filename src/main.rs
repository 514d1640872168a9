//! Terrasynth - procedural terrain synthesis from the command line
//!
//! Generates heightfield meshes, previews noise variants, and runs an
//! interactive editing session with undo.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use terrasynth::cli::{self, Args, Command, SessionCommand, TerrainArgs, SESSION_HELP};
use terrasynth::export;
use terrasynth::noise::FractalCompositor;
use terrasynth::params::ExportConfig;
use terrasynth::{HeightfieldSynthesizer, Mesh, TerrainSession};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match &args.command {
        Command::Generate {
            terrain,
            heightmap,
            save_params,
        } => run_generate(args.seed, terrain, heightmap.as_deref(), save_params.as_deref()),
        Command::Preview {
            kind,
            octaves,
            persistence,
            size,
            frequency,
            output,
        } => {
            let config = ExportConfig {
                output: output.clone(),
                size: *size,
                frequency: *frequency,
            };
            let fractal = FractalCompositor::with_seed(args.seed);
            let start = Instant::now();
            let img = export::noise_image(&fractal.field(*kind, *octaves, *persistence), &config);
            img.save(&config.output)
                .with_context(|| format!("failed to write {}", config.output.display()))?;

            println!("Noise preview ({})", kind);
            println!("  Seed: {}", args.seed);
            println!("  Size: {}x{}", config.size, config.size);
            println!("  Output: {}", config.output.display());
            println!("  Time: {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);
            Ok(())
        }
        Command::Session { terrain } => run_session(args.seed, terrain),
    }
}

fn run_generate(
    seed: u32,
    terrain: &TerrainArgs,
    heightmap: Option<&Path>,
    save_params: Option<&Path>,
) -> anyhow::Result<()> {
    let params = terrain.resolve()?;
    let synthesizer = HeightfieldSynthesizer::new(seed);

    let start = Instant::now();
    let mesh = synthesizer.synthesize(&params)?;
    let elapsed = start.elapsed();

    println!("Terrain ({})", params);
    print_summary(&mesh);
    println!("  Time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);

    if let Some(path) = heightmap {
        export::save_heightmap(&mesh, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("  Heightmap: {}", path.display());
    }
    if let Some(path) = save_params {
        cli::save_params(path, &params)?;
        println!("  Parameters: {}", path.display());
    }

    Ok(())
}

fn run_session(seed: u32, terrain: &TerrainArgs) -> anyhow::Result<()> {
    let initial = terrain.resolve()?;
    let mut session = TerrainSession::new(seed, initial)?;

    println!("Terrain ({})", session.parameters());
    print_summary(&session.mesh());
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };

        match command {
            SessionCommand::Set(field, value) => {
                let next = session.parameters().with_field(field, value);
                regenerate(&mut session, next);
            }
            SessionCommand::Scale(field, factor) => {
                let next = session.parameters().scaled(field, factor);
                regenerate(&mut session, next);
            }
            SessionCommand::Undo => match session.undo_last_change()? {
                Some(params) => {
                    println!("Reverted to ({})", params);
                    print_summary(&session.mesh());
                }
                None => println!("Nothing to revert"),
            },
            SessionCommand::Show => {
                println!("{}", session.parameters());
                println!("  Undo depth: {}", session.history().len());
            }
            SessionCommand::Save(path) => match export::save_heightmap(&session.mesh(), &path) {
                Ok(()) => println!("Heightmap: {}", path.display()),
                Err(e) => eprintln!("Failed to write {}: {}", path.display(), e),
            },
            SessionCommand::Help => println!("{}", SESSION_HELP),
            SessionCommand::Quit => break,
        }
    }

    Ok(())
}

/// Invalid edits are reported and the current mesh stays published
fn regenerate(session: &mut TerrainSession, next: terrasynth::TerrainParameters) {
    match session.synthesize_terrain(next) {
        Ok(mesh) => {
            println!("Regenerated ({})", session.parameters());
            print_summary(&mesh);
        }
        Err(e) => eprintln!("Rejected: {}", e),
    }
}

fn print_summary(mesh: &Mesh) {
    println!("  Vertices: {}", mesh.vertices.len());
    println!("  Triangles: {}", mesh.triangle_count());
    if let Some((lo, hi)) = mesh.height_range() {
        println!("  Height: {:.4} .. {:.4}", lo, hi);
    }
    if mesh.degenerate_faces > 0 {
        println!("  Degenerate faces: {}", mesh.degenerate_faces);
    }
}
