use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::logging::LoggingConfig;
use super::service::ServiceConfig;

/// Path of the optional YAML configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "./config.yaml";
/// Prefix for environment overrides, nested keys split on `__`.
pub const ENV_PREFIX: &str = "GREETER_";
/// Name of the variable selecting the listening port.
pub const PORT_ENV_VAR: &str = "PORT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Top-level configuration for the server.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct AppConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port used when `PORT` is unset or unusable.
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: default_host(),
            port: DEFAULT_PORT,
            service: ServiceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Address string handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Applies the raw value of the `PORT` variable.
    ///
    /// A value that parses as a port replaces `self.port`. Anything else
    /// leaves the configured port in place and is handed back to the caller
    /// so it can be reported once logging is up.
    pub fn apply_port_env(&mut self, raw: Option<&str>) -> Option<String> {
        let raw = raw?;
        match parse_port(raw) {
            Some(port) => {
                self.port = port;
                None
            }
            None => Some(raw.to_string()),
        }
    }
}

/// Parses a port number, ignoring surrounding whitespace.
pub fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse::<u16>().ok()
}

/// Defaults, then the YAML file at `path` (if present), then `GREETER_*` env.
pub fn figment(path: &str) -> Figment {
    Figment::from(Serialized::defaults(AppConfig::default()))
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load the configuration from the layered providers.
///
/// The `PORT` variable is not consulted here, see [`AppConfig::apply_port_env`].
pub fn load_config(path: &str) -> Result<AppConfig, figment::Error> {
    figment(path).extract::<AppConfig>()
}

/// Configuration with the `PORT` variable applied.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub config: AppConfig,
    /// Raw `PORT` value that could not be used, if any.
    pub rejected_port: Option<String>,
}

impl ResolvedConfig {
    /// Warns about an unusable `PORT`. Call once logging is initialized.
    pub fn report_rejected_port(&self) {
        if let Some(raw) = &self.rejected_port {
            warn!(
                value = %raw,
                fallback = self.config.port,
                "{} is not a valid port, using the configured default",
                PORT_ENV_VAR
            );
        }
    }
}

/// Load the configuration and apply the process's `PORT` variable.
pub fn resolve_config(path: &str) -> Result<ResolvedConfig, figment::Error> {
    let mut config = load_config(path)?;
    let port = std::env::var_os(PORT_ENV_VAR).map(|raw| raw.to_string_lossy().into_owned());
    let rejected_port = config.apply_port_env(port.as_deref());
    Ok(ResolvedConfig {
        config,
        rejected_port,
    })
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(AppConfig);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use figment::Jail;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("9100"), Some(9100));
        assert_eq!(parse_port(" 9100\n"), Some(9100));
        assert_eq!(parse_port("abc"), None);
        assert_eq!(parse_port(""), None);
        assert_eq!(parse_port("-1"), None);
        assert_eq!(parse_port("70000"), None);
        assert_eq!(parse_port("80.5"), None);
    }

    #[test]
    fn test_apply_port_env_unset_keeps_default() {
        let mut config = AppConfig::default();
        assert_eq!(config.apply_port_env(None), None);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_apply_port_env_overrides_port() {
        let mut config = AppConfig::default();
        assert_eq!(config.apply_port_env(Some("9100")), None);
        assert_eq!(config.port, 9100);
        assert_eq!(config.bind_address(), "0.0.0.0:9100");
    }

    #[test]
    fn test_apply_port_env_invalid_falls_back() {
        let mut config = AppConfig::default();
        assert_eq!(
            config.apply_port_env(Some("not-a-port")),
            Some("not-a-port".to_string())
        );
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_load_config_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = load_config("missing.yaml")?;
            assert_eq!(config.host, "0.0.0.0");
            assert_eq!(config.port, 8000);
            assert_eq!(config.service.name, "python");
            assert_eq!(config.logging.level, "info");
            Ok(())
        });
    }

    #[test]
    fn test_load_config_from_yaml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
port: 3000
service:
  name: nodejs
  message: Hello from Node.js Application!
logging:
  format: json
"#,
            )?;
            let config = load_config("config.yaml")?;
            assert_eq!(config.port, 3000);
            assert_eq!(config.service.name, "nodejs");
            assert_eq!(config.service.message, "Hello from Node.js Application!");
            assert_eq!(config.service.version, "1.0.0");
            assert_eq!(config.logging.format, "json");
            assert_eq!(config.logging.level, "info");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "port: 3000\n")?;
            jail.set_env("GREETER_PORT", "4000");
            jail.set_env("GREETER_LOGGING__LEVEL", "debug");
            let config = load_config("config.yaml")?;
            assert_eq!(config.port, 4000);
            assert_eq!(config.logging.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_yaml_type_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "port: lots\n")?;
            assert!(load_config("config.yaml").is_err());
            Ok(())
        });
    }

    #[test]
    fn test_resolve_config_reads_port_variable() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "port: 3000\n")?;
            jail.set_env("PORT", "9100");
            let resolved = resolve_config("config.yaml")?;
            assert_eq!(resolved.config.port, 9100);
            assert_eq!(resolved.config.bind_address(), "0.0.0.0:9100");
            assert!(resolved.rejected_port.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_resolve_config_rejects_unusable_port_variable() {
        Jail::expect_with(|jail| {
            jail.set_env("PORT", "eighty");
            let resolved = resolve_config("missing.yaml")?;
            assert_eq!(resolved.config.port, DEFAULT_PORT);
            assert_eq!(resolved.rejected_port.as_deref(), Some("eighty"));
            Ok(())
        });
    }

    #[test]
    fn test_numeric_identity_overrides_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env("GREETER_SERVICE__VERSION", "2.0");
            jail.set_env("GREETER_SERVICE__NAME", "123");
            let config = load_config("missing.yaml")?;
            assert_eq!(config.service.version, "2.0");
            assert_eq!(config.service.name, "123");
            assert_eq!(config.service.message, "Hello from Python Application!");
            Ok(())
        });
    }

    #[test]
    fn test_rejected_port_is_logged_at_warn() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let resolved = ResolvedConfig {
            config: AppConfig::default(),
            rejected_port: Some("abc".to_string()),
        };
        tracing::subscriber::with_default(subscriber, || resolved.report_rejected_port());

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "output: {}", output);
        assert!(output.contains("value=abc"), "output: {}", output);
        assert!(output.contains("fallback=8000"), "output: {}", output);
    }

    #[test]
    fn test_accepted_port_logs_nothing() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .finish();

        let resolved = ResolvedConfig {
            config: AppConfig::default(),
            rejected_port: None,
        };
        tracing::subscriber::with_default(subscriber, || resolved.report_rejected_port());

        assert!(captured.0.lock().unwrap().is_empty());
    }
}
