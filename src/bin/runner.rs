//! Galaxy headless runner
//!
//! Loads a parameter preset (JSON), applies command line overrides, and
//! drives the generate → perturb → render loop for a number of frames
//! against a renderer that only records statistics.
//!
//! Usage: `galaxy-runner [preset.json] --frames 600 --set branches=5 --set insideColor=#ffaa00`

use anyhow::Context;
use clap::Parser;
use galaxy::prelude::*;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "galaxy-runner", about = "Drive a procedural galaxy without a window")]
struct Args {
    /// JSON parameter preset. Defaults are used when omitted.
    preset: Option<PathBuf>,

    /// Number of frames to run.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Seed for reproducible output. OS entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Parameter override as `name=value`, applied after the preset.
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_override)]
    overrides: Vec<(ParamKey, String)>,

    /// Write the final parameters to this path.
    #[arg(long)]
    save: Option<PathBuf>,
}

fn parse_override(s: &str) -> Result<(ParamKey, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    let key: ParamKey = name.parse().map_err(|e: GalaxyError| e.to_string())?;
    Ok((key, value.to_string()))
}

/// Renderer that keeps counters and the last drawn extent.
#[derive(Default)]
struct StatsRenderer {
    attaches: u32,
    style_changes: u32,
    uploads: u64,
    uploaded_bytes: u64,
    frames: u64,
    particles: usize,
    extent: Option<(Vec3, Vec3)>,
}

impl Renderer for StatsRenderer {
    fn attach(&mut self, field: &Field, style: &PointStyle) {
        self.attaches += 1;
        self.particles = field.len();
        let bytes = field.render_position_bytes().len() + field.color_bytes().len();
        self.uploaded_bytes += bytes as u64;
        info!(
            "attached field: {} particles, point size {}, {:?} blending",
            field.len(),
            style.size,
            style.blend
        );
    }

    fn style_changed(&mut self, style: &PointStyle) {
        self.style_changes += 1;
        info!("point size now {}", style.size);
    }

    fn positions_changed(&mut self, field: &Field) {
        self.uploads += 1;
        self.uploaded_bytes += field.render_position_bytes().len() as u64;
    }

    fn render(&mut self, field: &Field) {
        self.frames += 1;
        self.extent = field.bounds();
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut store = match &args.preset {
        Some(path) => ParameterStore::load_preset(path)
            .with_context(|| format!("loading preset {}", path.display()))?,
        None => ParameterStore::new(),
    };
    for (key, value) in &args.overrides {
        let value = key.parse_value(value)?;
        store
            .set(*key, value)
            .with_context(|| format!("applying override for {key}"))?;
    }

    let params = store.parameters().clone();
    info!(
        "count={} radius={} branches={} spin={} randomness={} noise={} colors {} -> {}",
        params.count,
        params.radius,
        params.branches,
        params.spin,
        params.randomness,
        params.noise,
        params.inside_color,
        params.outside_color
    );

    let mut galaxy = match args.seed {
        Some(seed) => Galaxy::with_seed(params, seed)?,
        None => Galaxy::new(params)?,
    };

    let mut renderer = StatsRenderer::default();
    for _ in 0..args.frames {
        galaxy.tick(&mut renderer);
        let clock = galaxy.clock();
        if clock.frame() % 60 == 0 {
            info!("frame {} ({:.1} fps)", clock.frame(), clock.fps());
        }
    }

    info!(
        "{} frames, {} attaches, {} style changes, {} position uploads, {:.1} MiB uploaded",
        renderer.frames,
        renderer.attaches,
        renderer.style_changes,
        renderer.uploads,
        renderer.uploaded_bytes as f64 / (1024.0 * 1024.0)
    );
    if let Some((min, max)) = renderer.extent {
        info!("{} particles within {:?} .. {:?}", renderer.particles, min, max);
    }

    if let Some(path) = &args.save {
        galaxy
            .store()
            .save_preset(path)
            .with_context(|| format!("saving preset {}", path.display()))?;
        info!("saved parameters to {}", path.display());
    }

    Ok(())
}
