//! relief: turn an image into a 3D-printable relief solid.
//!
//! The pipeline maps image luminance (linear light, Rec.709) through a tone
//! window into a thickness field in millimeters, then extrudes that field
//! into a watertight mesh with a flat base and side walls.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=relief_field=info,relief_mesh=info` - basic operation logging
//! - `RUST_LOG=debug` - all debug output
//!
//! # Example
//!
//! ```bash
//! # 100mm wide backlit lithophane from a photo
//! relief generate -i photo.jpg --width-mm 100
//!
//! # Bright areas thick instead of thin, mirrored for mounting
//! relief generate -i logo.png --invert=false --flip-x
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod input;
mod output;

use commands::{generate, heightmap, info};

/// relief - make 3D-printable relief solids from images.
#[derive(Parser)]
#[command(name = "relief")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

/// Relief synthesis options shared by all subcommands.
///
/// Defaults are tuned for a backlit lithophane around 100mm wide.
#[derive(Args, Debug, Clone)]
pub struct ReliefOptions {
    /// Physical width of the printed relief in mm
    #[arg(long = "width-mm", default_value_t = 100.0)]
    pub width_mm: f64,

    /// Raster width in pixels after resampling
    #[arg(long = "px", default_value_t = 600)]
    pub width_px: u32,

    /// Base (minimum) thickness in mm
    #[arg(long = "base-mm", default_value_t = 0.8)]
    pub base_mm: f64,

    /// Relief height above the base in mm
    #[arg(long = "relief-mm", default_value_t = 1.5)]
    pub relief_mm: f64,

    /// Black cut: luminance at or below this maps to the signal floor
    #[arg(long = "black", default_value_t = 0.02)]
    pub black_cut: f64,

    /// White cut: luminance at or above this maps to the signal ceiling
    #[arg(long = "white", default_value_t = 0.98)]
    pub white_cut: f64,

    /// Tone gamma (1.0 = linear)
    #[arg(long = "tone", default_value_t = 1.15)]
    pub tone_gamma: f64,

    /// Bright areas print thin (backlit viewing). Pass --invert=false for bright=thick
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub invert: bool,

    /// Mirror left-right
    #[arg(long)]
    pub flip_x: bool,

    /// Mirror top-bottom
    #[arg(long)]
    pub flip_y: bool,

    /// Rotate 180 degrees (same as --flip-x --flip-y)
    #[arg(long)]
    pub rot180: bool,

    /// Output basename (no extension). Relative paths resolve next to the
    /// input image. Default: <input_stem>_W<width-mm>mm
    #[arg(long)]
    pub out: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate heightmap artifacts and a printable mesh
    Generate {
        /// Input image file (jpg/png/webp/...)
        #[arg(short, long = "in")]
        input: PathBuf,

        #[command(flatten)]
        options: ReliefOptions,

        /// Mesh output path; extension selects the format (stl, obj).
        /// Default: <out_base>.stl
        #[arg(long)]
        mesh_out: Option<PathBuf>,
    },

    /// Export only the heightmap (16-bit PNG preview + raw .npy array)
    Heightmap {
        /// Input image file (jpg/png/webp/...)
        #[arg(short, long = "in")]
        input: PathBuf,

        #[command(flatten)]
        options: ReliefOptions,
    },

    /// Compute the field and mesh in memory and print statistics
    Info {
        /// Input image file (jpg/png/webp/...)
        #[arg(short, long = "in")]
        input: PathBuf,

        #[command(flatten)]
        options: ReliefOptions,
    },
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "relief_field=info,relief_mesh=info",
            2 => "relief_field=debug,relief_mesh=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    #[cfg(debug_assertions)]
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Generate {
            input,
            options,
            mesh_out,
        } => generate::run(input, options, mesh_out.as_deref(), &cli),
        Commands::Heightmap { input, options } => heightmap::run(input, options, &cli),
        Commands::Info { input, options } => info::run(input, options, &cli),
    };

    if let Err(e) = &result {
        if !cli.quiet {
            eprintln!("{}: {}", "Error".red().bold(), e);
            if let Some(mesh_err) = e.downcast_ref::<relief_mesh::MeshError>() {
                eprintln!("  {}: {}", "Code".cyan(), mesh_err.code());
                eprintln!("  {}: {}", "Suggestion".green(), mesh_err.suggestion());
            } else if let Some(field_err) = e.downcast_ref::<relief_field::FieldError>() {
                eprintln!("  {}: {}", "Code".cyan(), field_err.code());
            } else {
                for cause in e.chain().skip(1) {
                    eprintln!("  {}: {}", "Caused by".yellow(), cause);
                }
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
