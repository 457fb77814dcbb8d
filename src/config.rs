//! Environment-based configuration types for the authorization server runtime settings.

use anyhow::Result;

use crate::errors::ConfigError;

/// HTTP server port configuration
#[derive(Clone, Debug)]
pub struct HttpPort(u16);

/// Whether the client registration API is mounted
#[derive(Clone, Debug)]
pub struct EnableClientApi(bool);

/// Clients registered at startup, one redirect URI list per client
#[derive(Clone, Debug, Default)]
pub struct BootstrapClients(Vec<Vec<String>>);

/// Main application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub version: String,
    pub http_port: HttpPort,
    pub http_templates_path: String,
    pub external_base: String,
    pub enable_client_api: EnableClientApi,
    pub bootstrap_clients: BootstrapClients,
}

impl Config {
    /// Create a new configuration from environment variables
    pub fn new() -> Result<Self> {
        let http_port: HttpPort = default_env("HTTP_PORT", "9001").try_into()?;
        let http_templates_path = optional_env("HTTP_TEMPLATES_PATH")
            .unwrap_or_else(|| format!("{}/templates", env!("CARGO_MANIFEST_DIR")));
        let external_base = default_env("EXTERNAL_BASE", "http://localhost:9001");
        let enable_client_api: EnableClientApi =
            default_env("ENABLE_CLIENT_API", "true").try_into()?;
        let bootstrap_clients: BootstrapClients = optional_env("BOOTSTRAP_CLIENTS").try_into()?;

        Ok(Self {
            version: version()?,
            http_port,
            http_templates_path,
            external_base,
            enable_client_api,
            bootstrap_clients,
        })
    }
}

/// Get application version from build environment
pub fn version() -> Result<String> {
    option_env!("GIT_HASH")
        .or(option_env!("CARGO_PKG_VERSION"))
        .map(|val| val.to_string())
        .ok_or(ConfigError::VersionNotSet.into())
}

pub(crate) fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn default_env(name: &str, default_value: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default_value.to_string())
}

impl TryFrom<String> for HttpPort {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Ok(Self(9001))
        } else {
            value
                .parse::<u16>()
                .map(Self)
                .map_err(|err| ConfigError::PortParsingFailed(err).into())
        }
    }
}

impl AsRef<u16> for HttpPort {
    fn as_ref(&self) -> &u16 {
        &self.0
    }
}

impl TryFrom<String> for EnableClientApi {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Self(true)),
            "false" | "0" | "no" | "off" => Ok(Self(false)),
            _ => Err(ConfigError::BoolParsingFailed(value).into()),
        }
    }
}

impl AsRef<bool> for EnableClientApi {
    fn as_ref(&self) -> &bool {
        &self.0
    }
}

/// Parses `uri,uri;uri` into one redirect URI list per client.
///
/// Empty segments between `;` are skipped, but a segment that only holds separators
/// is rejected: such a client could never pass registration.
impl TryFrom<Option<String>> for BootstrapClients {
    type Error = anyhow::Error;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        let value = match value {
            None => return Ok(Self(Vec::new())),
            Some(v) if v.trim().is_empty() => return Ok(Self(Vec::new())),
            Some(v) => v,
        };

        let clients = value
            .split(';')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .enumerate()
            .map(|(index, entry)| {
                let redirect_uris = entry
                    .split(',')
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_string())
                    .collect::<Vec<String>>();
                if redirect_uris.is_empty() {
                    Err(ConfigError::BootstrapClientEmpty(index))
                } else {
                    Ok(redirect_uris)
                }
            })
            .collect::<Result<Vec<Vec<String>>, ConfigError>>()?;

        Ok(Self(clients))
    }
}

impl TryFrom<String> for BootstrapClients {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(Some(value))
    }
}

impl AsRef<Vec<Vec<String>>> for BootstrapClients {
    fn as_ref(&self) -> &Vec<Vec<String>> {
        &self.0
    }
}
