//! `simvest setup`: writes a commented starting configuration.

use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");

/// Writes the example configuration to `config_path`, or to the platform
/// config directory, and reports where simulations will be kept.
pub fn setup(config_path: Option<&str>) -> Result<()> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => AppConfig::default_config_path()?,
    };
    write_example_config(&path)?;

    let config = AppConfig::load_from_path(&path)?;
    println!("Created configuration at {}", path.display());
    println!("Simulations are stored in {}", config.data_path()?.display());
    Ok(())
}

/// Copies the bundled example to `path`. An existing file is never replaced.
pub fn write_example_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Example configuration written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_example_written_into_missing_directory() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("simvest").join("config.yaml");

        write_example_config(&config_path)?;

        let config = AppConfig::load_from_path(&config_path)?;
        assert_eq!(config.ids.prefix, "SIM");
        assert_eq!(config.defaults.term_months, 12);
        Ok(())
    }

    #[test]
    fn test_existing_config_is_kept() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "data_path: \"/srv/plans\"\n")?;

        let err = write_example_config(&config_path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(
            fs::read_to_string(&config_path)?,
            "data_path: \"/srv/plans\"\n"
        );
        Ok(())
    }

    #[test]
    fn test_example_matches_built_in_defaults() -> Result<()> {
        let config: AppConfig = serde_yaml::from_str(EXAMPLE_CONFIG)
            .context("Failed to parse example config as YAML")?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    }
}
