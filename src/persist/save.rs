use crate::config::Config;
use anyhow::Result;
use ron::ser::PrettyConfig;
use std::fs;

use super::CONFIG_FILE;

pub fn save_config(config: &Config) -> Result<()> {
    let pretty = PrettyConfig::new();
    let serialized = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(CONFIG_FILE, serialized)?;
    Ok(())
}
