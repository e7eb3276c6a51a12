//! Configuration loader with file resolution and environment override support.

use super::error::{ConfigError, ConfigResult};
use super::schema::Config;
use std::path::{Path, PathBuf};

/// Environment variable prefix for overrides
const ENV_PREFIX: &str = "UART_FIXTURE";

/// Config file name
const CONFIG_FILE_NAME: &str = "uart-fixture.toml";

/// Environment variable for explicit config path
const CONFIG_PATH_ENV: &str = "UART_FIXTURE_CONFIG";

/// Configuration loader with resolution and override logic.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Resolved config file path (if any)
    pub config_path: Option<PathBuf>,
    /// The loaded configuration
    pub config: Config,
}

impl ConfigLoader {
    /// Load configuration using standard resolution order.
    ///
    /// Resolution priority (highest to lowest):
    /// 1. `UART_FIXTURE_CONFIG` environment variable (explicit path)
    /// 2. `./uart-fixture.toml` (current directory)
    /// 3. `~/.config/uart-fixture/uart-fixture.toml` (XDG on Linux/macOS)
    /// 4. `%APPDATA%\uart-fixture\uart-fixture.toml` (Windows)
    /// 5. Built-in defaults (no file required)
    ///
    /// Environment variables can override any file value afterwards.
    pub fn load() -> ConfigResult<Self> {
        let config_path = resolve_config_path();

        let mut config = if let Some(ref path) = config_path {
            load_from_file(path)?
        } else {
            Config::default()
        };

        apply_env_overrides(&mut config)?;

        Ok(Self { config_path, config })
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut config = load_from_file(&path)?;
        apply_env_overrides(&mut config)?;

        Ok(Self {
            config_path: Some(path),
            config,
        })
    }

    /// Create a loader with default configuration (no file).
    pub fn with_defaults() -> Self {
        let mut config = Config::default();
        // Still apply env overrides even with defaults
        let _ = apply_env_overrides(&mut config);

        Self {
            config_path: None,
            config,
        }
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the loader and return the configuration.
    pub fn into_config(self) -> Config {
        self.config
    }
}

/// Resolve the configuration file path using standard locations.
pub fn resolve_config_path() -> Option<PathBuf> {
    // 1. Explicit environment variable
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. Current directory
    let cwd_config = PathBuf::from(CONFIG_FILE_NAME);
    if cwd_config.exists() {
        return Some(cwd_config);
    }

    // 3. XDG config directory (Linux/macOS) or APPDATA (Windows)
    if let Some(config_dir) = get_config_dir() {
        let app_config = config_dir.join("uart-fixture").join(CONFIG_FILE_NAME);
        if app_config.exists() {
            return Some(app_config);
        }
    }

    // 4. No config file found - will use defaults
    None
}

/// Get the platform-specific config directory.
fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA").ok().map(PathBuf::from)
    }

    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|h| PathBuf::from(h).join(".config"))
            })
    }
}

/// Load configuration from a file.
fn load_from_file(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(ConfigError::ParseError)
}

/// Apply environment variable overrides to the configuration.
///
/// Variables follow the pattern `UART_FIXTURE_<SECTION>_<KEY>`:
/// - `UART_FIXTURE_SERIAL_DEVICE=/dev/ttyUSB0`
/// - `UART_FIXTURE_SERIAL_BAUD=9600`
/// - `UART_FIXTURE_RENDEZVOUS_HOST=127.0.0.1`
/// - `UART_FIXTURE_RENDEZVOUS_PORT=40007`
fn apply_env_overrides(config: &mut Config) -> ConfigResult<()> {
    if let Ok(val) = std::env::var(format!("{}_SERIAL_DEVICE", ENV_PREFIX)) {
        config.serial.device = val;
    }
    if let Ok(val) = std::env::var(format!("{}_SERIAL_BAUD", ENV_PREFIX)) {
        config.serial.baud = val.parse().map_err(|_| {
            ConfigError::env_parse(format!("{}_SERIAL_BAUD", ENV_PREFIX), "Invalid baud rate")
        })?;
    }
    if let Ok(val) = std::env::var(format!("{}_SERIAL_READ_TIMEOUT_SECS", ENV_PREFIX)) {
        config.serial.read_timeout_secs = val.parse().map_err(|_| {
            ConfigError::env_parse(
                format!("{}_SERIAL_READ_TIMEOUT_SECS", ENV_PREFIX),
                "Invalid timeout",
            )
        })?;
    }
    if let Ok(val) = std::env::var(format!("{}_RENDEZVOUS_HOST", ENV_PREFIX)) {
        config.rendezvous.host = val;
    }
    if let Ok(val) = std::env::var(format!("{}_RENDEZVOUS_PORT", ENV_PREFIX)) {
        config.rendezvous.port = val.parse().map_err(|_| {
            ConfigError::env_parse(
                format!("{}_RENDEZVOUS_PORT", ENV_PREFIX),
                "Invalid port number",
            )
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        for key in [
            "UART_FIXTURE_SERIAL_DEVICE",
            "UART_FIXTURE_SERIAL_BAUD",
            "UART_FIXTURE_SERIAL_READ_TIMEOUT_SECS",
            "UART_FIXTURE_RENDEZVOUS_HOST",
            "UART_FIXTURE_RENDEZVOUS_PORT",
            "UART_FIXTURE_CONFIG",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn defaults_when_no_file_or_env() {
        clear_env();
        let loader = ConfigLoader::with_defaults();
        assert_eq!(loader.config().serial.device, "/dev/ttyAMA0");
        assert_eq!(loader.config().rendezvous.port, 50007);
        assert!(loader.config_path.is_none());
    }

    #[test]
    #[serial]
    fn load_from_explicit_file() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [serial]
            device = "/dev/ttyUSB3"
            baud = 57600

            [rendezvous]
            port = 40007
            "#
        )
        .unwrap();

        let loader = ConfigLoader::load_from(file.path()).unwrap();
        assert_eq!(loader.config().serial.device, "/dev/ttyUSB3");
        assert_eq!(loader.config().serial.baud, 57600);
        assert_eq!(loader.config().rendezvous.port, 40007);
        // Unspecified keys fall back to defaults.
        assert_eq!(loader.config().serial.read_timeout_secs, 15);
    }

    #[test]
    #[serial]
    fn env_overrides_beat_file_values() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[serial]\nbaud = 57600").unwrap();

        std::env::set_var("UART_FIXTURE_SERIAL_BAUD", "19200");
        std::env::set_var("UART_FIXTURE_RENDEZVOUS_HOST", "127.0.0.1");

        let loader = ConfigLoader::load_from(file.path()).unwrap();
        assert_eq!(loader.config().serial.baud, 19200);
        assert_eq!(loader.config().rendezvous.host, "127.0.0.1");

        clear_env();
    }

    #[test]
    #[serial]
    fn invalid_env_value_is_an_error() {
        clear_env();
        std::env::set_var("UART_FIXTURE_RENDEZVOUS_PORT", "not-a-port");

        let mut config = Config::default();
        let result = apply_env_overrides(&mut config);
        assert!(matches!(result, Err(ConfigError::EnvParseError { .. })));

        clear_env();
    }

    #[test]
    #[serial]
    fn malformed_toml_is_an_error() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[serial\ndevice =").unwrap();

        let result = ConfigLoader::load_from(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
