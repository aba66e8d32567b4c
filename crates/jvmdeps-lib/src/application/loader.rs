//! Configuration loading
//!
//! Coordinates loading configuration from `.env` files and the standard
//! environment before the command line is applied on top.

use crate::primitives::{ColorIntent, ConfigError};

use super::{config::AppConfig, env::EnvironmentConfig};

const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Load `.env.local` and `.env` into the process environment
///
/// Missing files are fine; a file that exists but cannot be parsed is not.
pub fn load_env_files() -> Result<(), ConfigError> {
    for env_file in ENV_FILES {
        if let Err(e) = dotenvy::from_filename(env_file) {
            if !e.not_found() {
                return Err(ConfigError::EnvFileError {
                    file: env_file.to_string(),
                    source: e,
                });
            }
        }
    }
    Ok(())
}

impl AppConfig {
    /// Apply standard environment variables and validate a CLI-parsed config
    pub fn finalize(config: AppConfig) -> Result<Self, ConfigError> {
        let env_config = EnvironmentConfig::load()?;
        Self::finalize_with_env(config, &env_config)
    }

    /// Same as [`AppConfig::finalize`] with an explicit environment
    pub fn finalize_with_env(
        mut config: AppConfig,
        env_config: &EnvironmentConfig,
    ) -> Result<Self, ConfigError> {
        // An explicit --color wins over NO_COLOR and friends
        if config.color == ColorIntent::Auto {
            config.color = env_config.apply_color_config(ColorIntent::Auto);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
