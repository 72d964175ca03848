//! Demo configuration: the list of sphere meshes to build. Loaded from a RON file.

use anyhow::{Context, Result};
use icosphere::{IcosphereConfig, UvSphereConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "spheres.ron";

/// One mesh to generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeshSpec {
    Ico(IcosphereConfig),
    Uv(UvSphereConfig),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_meshes")]
    pub meshes: Vec<MeshSpec>,
}

/// Icospheres at depth 0..=3 plus the classic 10x10 UV sphere.
fn default_meshes() -> Vec<MeshSpec> {
    let mut meshes: Vec<MeshSpec> = (0..=3)
        .map(|depth| MeshSpec::Ico(IcosphereConfig::new(0.5, depth)))
        .collect();
    meshes.push(MeshSpec::Uv(UvSphereConfig::default()));
    meshes
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            meshes: default_meshes(),
        }
    }
}

impl DemoConfig {
    /// Load from `path`. A missing file falls back to defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("No config at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(e).with_context(|| format!("reading {:?}", path)),
        };
        ron::from_str(&data).with_context(|| format!("parsing {:?}", path))
    }

    /// Pretty RON text for this config, e.g. to seed a new `spheres.ron`.
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("serializing demo config")
    }
}

pub fn default_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DEFAULT_CONFIG_FILE)
}
