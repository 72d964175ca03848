//! Sphere mesh demo: generates the configured sphere meshes and validates each
//! one before it would be handed to the renderer.

mod config;

use anyhow::{bail, Context, Result};
use config::{default_config_path, DemoConfig, MeshSpec};
use icosphere::{distinct_vertex_count, generate, leaf_count, uv_sphere, MeshReport, SphereMesh};
use std::path::PathBuf;
use std::time::Instant;

/// Counts a mesh must reproduce for the run to pass.
struct Expected {
    triangles: u64,
    vertices: u64,
}

fn build(spec: &MeshSpec) -> Result<(String, SphereMesh, f32, Expected)> {
    match spec {
        MeshSpec::Ico(cfg) => {
            let mesh = generate(cfg).with_context(|| format!("icosphere {:?}", cfg))?;
            let expected = Expected {
                triangles: leaf_count(cfg.depth),
                vertices: distinct_vertex_count(cfg.depth),
            };
            let label = format!("icosphere r={} depth={}", cfg.radius, cfg.depth);
            Ok((label, mesh, cfg.radius, expected))
        }
        MeshSpec::Uv(cfg) => {
            let mesh = uv_sphere(cfg).with_context(|| format!("uv sphere {:?}", cfg))?;
            let expected = Expected {
                triangles: cfg.triangle_count(),
                vertices: cfg.distinct_vertex_count(),
            };
            let label = format!("uv sphere r={} {}x{}", cfg.radius, cfg.stacks, cfg.sectors);
            Ok((label, mesh, cfg.radius, expected))
        }
    }
}

fn run(config: &DemoConfig) -> Result<()> {
    let mut failures = 0;
    for spec in &config.meshes {
        let start = Instant::now();
        let (label, mesh, radius, expected) = build(spec)?;
        let elapsed = start.elapsed();
        let report = MeshReport::analyze(&mesh.vertices, radius);

        log::info!(
            "{}: {} ({} floats, {:.2?})",
            label,
            report,
            mesh.as_floats().len(),
            elapsed
        );

        let counts_ok = report.triangle_count as u64 == expected.triangles
            && report.distinct_positions as u64 == expected.vertices;
        if !counts_ok || !report.is_watertight() || report.inward_normals > 0 {
            log::error!(
                "{}: expected {} triangles / {} vertices on a closed outward mesh",
                label,
                expected.triangles,
                expected.vertices
            );
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{} of {} meshes failed validation", failures, config.meshes.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let path = match args.len() {
        0 | 1 => default_config_path(),
        2 => PathBuf::from(&args[1]),
        _ => bail!("usage: {} [config_path]", args[0]),
    };

    let config = DemoConfig::load(&path)?;
    log::info!("Generating {} meshes from {:?}", config.meshes.len(), path);
    run(&config)
}
