use std::{fs, path::Path};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, InitSummary, helper::finish};
use crate::{
    cli::args::OutputFormat,
    config::{CONFIG_FILE_NAME, default_config_json},
};

/// Write the default configuration to the current directory.
pub fn init() -> Result<CommandResult> {
    let summary = write_default_config(Path::new("."))?;
    Ok(finish(
        CommandSummary::Init(summary),
        OutputFormat::Text,
        Vec::new(),
        0,
        0,
        true,
    ))
}

fn write_default_config(dir: &Path) -> Result<InitSummary> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        return Ok(InitSummary {
            created: false,
            error: Some(format!("{} already exists", CONFIG_FILE_NAME)),
        });
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    Ok(InitSummary {
        created: true,
        error: None,
    })
}
