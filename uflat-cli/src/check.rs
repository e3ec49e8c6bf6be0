// check-config: load a headless config, build an engine from it and report
// what it contains.

use std::fmt;
use std::path::Path;

use uflat_runtime::engine::WorldApi;
use uflat_runtime::{FlatResult, HeadlessConfig, HeadlessEngine};

#[derive(Debug, PartialEq)]
pub struct Report {
    pub project_name: String,
    pub assets: usize,
    pub blueprints: usize,
    pub actors: i32,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  project:    {}", self.project_name)?;
        writeln!(f, "  assets:     {} ({} blueprints)", self.assets, self.blueprints)?;
        writeln!(f, "  actors:     {}", self.actors)
    }
}

pub fn check_file(path: &Path) -> FlatResult<Report> {
    check(&HeadlessConfig::load(path)?)
}

pub fn check(config: &HeadlessConfig) -> FlatResult<Report> {
    let engine = HeadlessEngine::from_config(config)?;
    let blueprints = config
        .assets
        .iter()
        .filter(|asset| asset.object_type().is_ok_and(|ty| ty == uflat_ffi::ObjectType::Blueprint))
        .count();
    Ok(Report {
        project_name: config.application.project_name.clone(),
        assets: config.assets.len(),
        blueprints,
        actors: engine.actor_count(),
    })
}
