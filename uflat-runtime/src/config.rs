// Configuration for the headless engine, deserialized from a TOML file.

use std::path::Path;

use serde::Deserialize;
use uflat_ffi::{Kind, ObjectType};

use crate::classes::NativeClass;
use crate::dispatch::{in_family, Family};
use crate::error::{FlatError, FlatResult};

/// Top-level config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadlessConfig {
    pub application: ApplicationConfig,
    pub engine: EngineConfig,
    pub log: LogConfig,
    pub assets: Vec<AssetEntry>,
    pub actors: Vec<ActorEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApplicationConfig {
    pub project_name: String,
    pub project_dir: String,
    pub default_language: String,
    pub command_line: String,
    pub volume_multiplier: f32,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        ApplicationConfig {
            project_name: "Headless".to_string(),
            project_dir: ".".to_string(),
            default_language: "en".to_string(),
            command_line: String::new(),
            volume_multiplier: 1.0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub version: String,
    pub max_fps: f32,
    /// Viewport width and height in pixels.
    pub viewport: [f32; 2],
    pub gravity_z: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            version: concat!(env!("CARGO_PKG_VERSION"), "-headless").to_string(),
            max_fps: 0.0,
            viewport: [1280.0, 720.0],
            gravity_z: -980.0,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Mirror log records to stderr.
    pub echo: bool,
}

/// A loadable asset. Blueprints register a generated class deriving from
/// `parent` (a native class name, `Actor` when omitted).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetEntry {
    pub kind: String,
    pub path: String,
    #[serde(default)]
    pub parent: Option<String>,
}

/// An actor present when the engine starts.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActorEntry {
    /// Spawnable kind tag name, e.g. `PointLight`.
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl AssetEntry {
    pub fn object_type(&self) -> FlatResult<ObjectType> {
        ObjectType::ALL
            .iter()
            .copied()
            .find(|ty| ty.name() == self.kind)
            .ok_or_else(|| FlatError::Config(format!("unknown asset kind '{}' for {}", self.kind, self.path)))
    }

    pub fn parent_class(&self) -> FlatResult<NativeClass> {
        let name = self.parent.as_deref().unwrap_or(NativeClass::Actor.name());
        NativeClass::from_name(name)
            .ok_or_else(|| FlatError::Config(format!("unknown parent class '{name}' for {}", self.path)))
    }
}

impl ActorEntry {
    pub fn spawn_kind(&self) -> FlatResult<Kind> {
        Kind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == self.kind)
            .filter(|kind| in_family(*kind, Family::Spawnable))
            .ok_or_else(|| FlatError::Config(format!("'{}' is not a spawnable kind", self.kind)))
    }
}

impl HeadlessConfig {
    pub fn from_toml_str(text: &str) -> FlatResult<HeadlessConfig> {
        let config: HeadlessConfig = toml::from_str(text).map_err(|e| FlatError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> FlatResult<HeadlessConfig> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| FlatError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Check every name in the file resolves.
    pub fn validate(&self) -> FlatResult<()> {
        for asset in &self.assets {
            let ty = asset.object_type()?;
            if ty == ObjectType::Blueprint {
                asset.parent_class()?;
            } else if asset.parent.is_some() {
                return Err(FlatError::Config(format!("only blueprints take a parent: {}", asset.path)));
            }
        }
        for actor in &self.actors {
            actor.spawn_kind()?;
        }
        Ok(())
    }
}
