// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for artifact-replay.

use std::path::Path;

use crate::cli::global::GlobalOptions;
use crate::config::loader::ConfigLoader;
use crate::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use crate::error::Result;

/// Assemble the layered loader: optional file in `base_dir`, `--config`
/// files, environment, then CLI overrides.
///
/// # Errors
///
/// Returns an error if an override key is rejected by the loader.
pub fn build_config_loader(
    base_dir: &Path,
    global: &GlobalOptions,
    overrides: &[(&'static str, String)],
) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(base_dir.join(DEFAULT_CONFIG_FILE));
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);

    for (key, value) in global.to_config_overrides().iter().chain(overrides) {
        loader = loader.set(key, value.as_str())?;
    }
    Ok(loader)
}

/// Display current configuration options.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Display loaded configuration files.
pub fn run_configs_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}
