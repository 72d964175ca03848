//! Latitude/longitude ("UV") sphere, the simpler alternative to the icosphere.
//!
//! Stacks run from the north pole (+y) to the south pole, sectors around the
//! y axis. Pole caps are fans of single triangles; every other stack emits two
//! triangles per sector. Vertices cluster at the poles, which is why the
//! icosphere is the default.

use crate::error::{check_radius, IcosphereError, Result};
use crate::sphere::SphereMesh;
use crate::vertex::MeshVertex;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvSphereConfig {
    #[serde(default = "default_radius")]
    pub radius: f32,
    /// Latitude bands, pole to pole.
    #[serde(default = "default_resolution")]
    pub stacks: u32,
    /// Longitude slices around the axis.
    #[serde(default = "default_resolution")]
    pub sectors: u32,
}

fn default_radius() -> f32 {
    1.0
}
fn default_resolution() -> u32 {
    10
}

impl Default for UvSphereConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            stacks: default_resolution(),
            sectors: default_resolution(),
        }
    }
}

impl UvSphereConfig {
    pub fn validate(&self) -> Result<()> {
        check_radius(self.radius)?;
        if self.stacks < 2 || self.sectors < 3 {
            return Err(IcosphereError::InvalidUvResolution {
                stacks: self.stacks,
                sectors: self.sectors,
            });
        }
        Ok(())
    }

    pub fn triangle_count(&self) -> u64 {
        self.sectors as u64 * (2 * self.stacks as u64 - 2)
    }

    /// Unique vertices: one ring per inner latitude plus the two poles.
    pub fn distinct_vertex_count(&self) -> u64 {
        self.sectors as u64 * (self.stacks as u64 - 1) + 2
    }
}

/// Point at latitude row `stack` (0 = north pole) and longitude column `sector`.
/// Poles and the 360° seam are snapped so shared vertices match exactly.
fn grid_point(config: &UvSphereConfig, stack: u32, sector: u32) -> Vec3 {
    let r = config.radius;
    if stack == 0 {
        return Vec3::new(0.0, r, 0.0);
    }
    if stack == config.stacks {
        return Vec3::new(0.0, -r, 0.0);
    }
    let phi = FRAC_PI_2 - stack as f32 * PI / config.stacks as f32;
    let theta = (sector % config.sectors) as f32 * 2.0 * PI / config.sectors as f32;
    Vec3::new(r * phi.cos() * theta.sin(), r * phi.sin(), r * phi.cos() * theta.cos())
}

/// Generate a UV sphere with radial normals and outward winding.
pub fn uv_sphere(config: &UvSphereConfig) -> Result<SphereMesh> {
    config.validate()?;

    let mut vertices = Vec::with_capacity(config.triangle_count() as usize * 3);
    let mut push = |p: Vec3| vertices.push(MeshVertex::new(p, p / config.radius));

    for stack in 0..config.stacks {
        for sector in 0..config.sectors {
            let p0 = grid_point(config, stack, sector);
            let p1 = grid_point(config, stack, sector + 1);
            let p2 = grid_point(config, stack + 1, sector);
            let p3 = grid_point(config, stack + 1, sector + 1);

            if stack != config.stacks - 1 {
                // Upper triangle; degenerate on the north cap, so skipped there.
                if stack != 0 {
                    push(p0);
                    push(p2);
                    push(p1);
                }
                push(p1);
                push(p2);
                push(p3);
            } else {
                // South cap
                push(p0);
                push(p2);
                push(p1);
            }
        }
    }

    let triangle_count = (vertices.len() / 3) as u32;
    log::debug!(
        "Generated uv sphere r={} {}x{}: {} triangles",
        config.radius,
        config.stacks,
        config.sectors,
        triangle_count
    );
    Ok(SphereMesh {
        vertices,
        triangle_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MeshReport;

    #[test]
    fn default_resolution_counts() {
        let cfg = UvSphereConfig::default();
        let mesh = uv_sphere(&cfg).unwrap();
        assert_eq!(mesh.triangle_count, 180);
        assert_eq!(mesh.triangle_count as u64, cfg.triangle_count());
        let report = MeshReport::analyze(&mesh.vertices, cfg.radius);
        assert_eq!(report.distinct_positions as u64, cfg.distinct_vertex_count());
    }

    #[test]
    fn uv_sphere_is_closed_and_outward() {
        let cfg = UvSphereConfig {
            radius: 2.0,
            stacks: 7,
            sectors: 12,
        };
        let mesh = uv_sphere(&cfg).unwrap();
        let report = MeshReport::analyze(&mesh.vertices, 2.0);
        assert!(report.is_watertight(), "{report}");
        assert_eq!(report.euler_characteristic(), 2);
        assert!(report.max_radius_error < 1e-5);
        assert_eq!(report.inward_normals, 0);

        for tri in mesh.triangles() {
            let [a, b, c] = [tri[0].position(), tri[1].position(), tri[2].position()];
            assert!((b - a).cross(c - a).dot(a + b + c) > 0.0);
        }
    }

    #[test]
    fn minimal_resolution_is_a_bipyramid() {
        let cfg = UvSphereConfig {
            radius: 1.0,
            stacks: 2,
            sectors: 3,
        };
        let mesh = uv_sphere(&cfg).unwrap();
        assert_eq!(mesh.triangle_count, 6);
        assert!(MeshReport::analyze(&mesh.vertices, 1.0).is_watertight());
    }

    #[test]
    fn rejects_degenerate_resolution() {
        let cfg = UvSphereConfig {
            stacks: 1,
            ..Default::default()
        };
        assert_eq!(
            uv_sphere(&cfg),
            Err(IcosphereError::InvalidUvResolution { stacks: 1, sectors: 10 })
        );
        let cfg = UvSphereConfig {
            radius: -1.0,
            ..Default::default()
        };
        assert!(uv_sphere(&cfg).is_err());
    }
}
