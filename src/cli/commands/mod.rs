//! CLI command handlers for `NuRecords`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod config;
pub mod load;
pub mod report;
pub mod shell;

use nu_records::config::Config;
use nu_records::core::seed::{load_seed, SeedError};
use nu_records::core::Registry;
use std::path::{Path, PathBuf};

/// Resolve a seed argument
///
/// Paths that exist are used as given. Otherwise the name is looked up in the
/// configured seeds directory, with a `.toml` extension added when missing.
pub fn resolve_seed_path(seed: &Path, config: &Config) -> PathBuf {
    if seed.exists() || config.paths.seeds_dir.is_empty() {
        return seed.to_path_buf();
    }
    let mut candidate = Path::new(&config.paths.seeds_dir).join(seed);
    if candidate.extension().is_none() {
        candidate.set_extension("toml");
    }
    if candidate.exists() {
        candidate
    } else {
        seed.to_path_buf()
    }
}

/// Load a registry from a seed argument, resolving it against the seeds directory
///
/// # Errors
/// Returns the seed error when the file cannot be read or applied.
pub fn open_seed(seed: &Path, config: &Config) -> Result<Registry, SeedError> {
    load_seed(&resolve_seed_path(seed, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_seed_uses_seeds_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("campus.toml"), "").unwrap();
        let mut config = Config::default();
        config.paths.seeds_dir = dir.path().to_string_lossy().to_string();

        assert_eq!(
            resolve_seed_path(Path::new("campus"), &config),
            dir.path().join("campus.toml")
        );
    }

    #[test]
    fn test_resolve_seed_keeps_unknown_path() {
        let config = Config::default();
        assert_eq!(
            resolve_seed_path(Path::new("missing.toml"), &config),
            PathBuf::from("missing.toml")
        );
    }
}
