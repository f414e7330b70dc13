use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use gordon_wixom::curves::presets::{self, Preset};
use gordon_wixom::{Estimate, Point2, Surface, SurfaceCfg};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod config;
mod mesh;
mod provenance;

/// Default interior grid spacing for `mesh`.
const DEFAULT_SPACING: f64 = 0.05;

#[derive(Parser)]
#[command(name = "gwsurf")]
#[command(about = "Boundary-interpolated height fields over closed curves")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

/// Surface selection shared by the subcommands.
#[derive(Args, Clone)]
struct SurfaceArgs {
    /// Preset name (see `presets`)
    #[arg(long, default_value = "surface0")]
    preset: String,
    /// JSON file with configuration overrides
    #[arg(long)]
    config: Option<PathBuf>,
    /// Boundary samples N (overrides the config file)
    #[arg(long)]
    samples: Option<usize>,
    /// Sampled directions M (overrides the config file)
    #[arg(long)]
    directions: Option<usize>,
}

#[derive(Subcommand)]
enum Action {
    /// Triangulate a preset, evaluate heights, and write an OBJ mesh
    Mesh {
        #[command(flatten)]
        surface: SurfaceArgs,
        /// Output path; a directory when `--all` is set
        #[arg(long)]
        out: PathBuf,
        /// Interior grid spacing
        #[arg(long)]
        spacing: Option<f64>,
        /// Write every preset into `--out`
        #[arg(long)]
        all: bool,
    },
    /// Evaluate one point and print the estimate as JSON
    Eval {
        #[command(flatten)]
        surface: SurfaceArgs,
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
    },
    /// List the available presets
    Presets,
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Mesh {
            surface,
            out,
            spacing,
            all,
        } => mesh_cmd(&surface, &out, spacing, all),
        Action::Eval { surface, x, y } => eval_cmd(&surface, Point2::new(x, y)),
        Action::Presets => presets_cmd(),
        Action::Report => report(),
    }
}

fn lookup(name: &str) -> Result<Preset> {
    match presets::by_name(name) {
        Some(p) => Ok(p),
        None => bail!("unknown preset {name:?}; run `gwsurf presets`"),
    }
}

fn mesh_cmd(args: &SurfaceArgs, out: &Path, spacing: Option<f64>, all: bool) -> Result<()> {
    let (cfg, file) =
        config::resolve(args.config.as_deref(), args.samples, args.directions)?;
    let spacing = spacing.or(file.spacing).unwrap_or(DEFAULT_SPACING);
    if all {
        std::fs::create_dir_all(out)
            .with_context(|| format!("creating output dir {}", out.display()))?;
        for preset in presets::all() {
            let path = out.join(format!("{}.obj", preset.name));
            write_mesh(&preset, cfg, spacing, &path)?;
        }
        return Ok(());
    }
    let preset = lookup(&args.preset)?;
    write_mesh(&preset, cfg, spacing, out)
}

fn write_mesh(preset: &Preset, cfg: SurfaceCfg, spacing: f64, path: &Path) -> Result<()> {
    tracing::info!(preset = preset.name, out = %path.display(), spacing, "mesh");
    let surface = preset.surface(cfg)?;
    let mesh = mesh::build(&surface, spacing)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    mesh.write_obj(BufWriter::new(file))
        .with_context(|| format!("writing {}", path.display()))?;
    let params = serde_json::json!({
        "curve_samples": cfg.curve_samples,
        "directions": cfg.directions,
        "phase": cfg.phase,
        "exclude_concave_hits": cfg.exclude_concave_hits,
        "spacing": spacing,
        "vertices": mesh.points.len(),
        "faces": mesh.faces.len(),
    });
    provenance::write_sidecar(path, provenance::Payload::new(preset.name, params))?;
    tracing::info!(preset = preset.name, "written");
    Ok(())
}

fn eval_cmd(args: &SurfaceArgs, x: Point2) -> Result<()> {
    let (cfg, _) = config::resolve(args.config.as_deref(), args.samples, args.directions)?;
    let preset = lookup(&args.preset)?;
    let surface: Surface = preset.surface(cfg)?;
    let estimate = surface.try_eval(x);
    tracing::info!(preset = preset.name, x = x.x, y = x.y, ?estimate, "eval");
    let kind = match estimate {
        Estimate::Boundary(_) => "boundary",
        Estimate::Interior(_) => "interior",
        Estimate::Degenerate => "fallback",
    };
    let obj = serde_json::json!({
        "preset": preset.name,
        "x": x.x,
        "y": x.y,
        "value": surface.eval(x),
        "height": surface.height_at(x),
        "kind": kind,
        "inside": surface.contains(x),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn presets_cmd() -> Result<()> {
    for p in presets::all() {
        println!(
            "{}\tradius={} amplitude={} lobes={}",
            p.name, p.curve.radius, p.curve.amplitude, p.curve.lobes
        );
    }
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "lib_version": gordon_wixom::VERSION,
        "defaults": {
            "curve_samples": SurfaceCfg::default().curve_samples,
            "directions": SurfaceCfg::default().directions,
            "spacing": DEFAULT_SPACING,
        },
        "presets": presets::all().iter().map(|p| p.name).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
