use crate::config::Config;
use anyhow::Result;
use std::fs;
use std::io::ErrorKind;

use super::CONFIG_FILE;

pub fn load_config() -> Result<Option<Config>> {
    match fs::read_to_string(CONFIG_FILE) {
        Ok(content) => {
            let config = ron::from_str(&content)?;
            Ok(Some(config))
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}
