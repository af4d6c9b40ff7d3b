//! Config command implementation

use crate::config_loader;
use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, ConfigOutput};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

pub fn execute(output: &OutputWriter, config_path: Option<&Path>) -> Result<()> {
    let config = config_loader::load_config(config_path)?;
    let config_file = config_loader::config_file(config_path).map(|p| p.display().to_string());

    let mut values: Vec<ConfigEntry> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigEntry { key, value, source })
        .collect();
    values.sort_by(|a, b| a.key.cmp(&b.key));

    if output.is_json() {
        output.result(ConfigOutput { config_file, values })?;
        return Ok(());
    }

    output.section("Configuration");
    output.kv("Config file", config_file.as_deref().unwrap_or("(none)"));

    #[derive(Tabled, Serialize)]
    struct ConfigRow {
        #[tabled(rename = "Key")]
        key: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Source")]
        source: String,
    }

    let rows: Vec<ConfigRow> = values
        .into_iter()
        .map(|v| ConfigRow { key: v.key, value: v.value, source: format!("{:?}", v.source) })
        .collect();
    output.table(rows);

    Ok(())
}
