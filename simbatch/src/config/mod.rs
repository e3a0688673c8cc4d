//! Configuration file handling.
//!
//! Settings live in an INI file at `<config dir>/simbatch/config.ini`:
//!
//! ```ini
//! [es2plus]
//! host = smdp.example
//! port = 8443
//! requester_id = ostelco
//! cert = /etc/simbatch/es2plus.crt
//! key = /etc/simbatch/es2plus.key
//! accept_invalid_server_certs = true
//! timeout_secs = 30
//!
//! [upload]
//! hostname = localhost
//! port = 8080
//! hss_vendor = M1
//! profile_vendor = Idemia
//! initial_hss_state = ACTIVATED
//! ```
//!
//! Every key is optional. Command-line flags override file values, which
//! override the built-in defaults.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::{Ini, Properties};
use thiserror::Error;

use crate::batch::{
    DEFAULT_HSS_VENDOR, DEFAULT_INITIAL_HSS_STATE, DEFAULT_PROFILE_VENDOR,
    DEFAULT_UPLOAD_HOSTNAME, DEFAULT_UPLOAD_PORT,
};

const ES2PLUS_SECTION: &str = "es2plus";
const UPLOAD_SECTION: &str = "upload";

/// Errors loading or saving the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform has no per-user configuration directory.
    #[error("could not determine the user configuration directory")]
    NoConfigDir,

    /// The file exists but could not be read or parsed.
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: ini::Error },

    /// The file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A key holds a value of the wrong type.
    #[error("invalid value '{value}' for [{section}] {key}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
    },
}

/// `[es2plus]` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Es2PlusSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub requester_id: Option<String>,
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
    pub accept_invalid_server_certs: Option<bool>,
    pub timeout_secs: Option<u64>,
}

/// `[upload]` settings, with the inventory defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    pub hostname: String,
    pub port: u16,
    pub hss_vendor: String,
    pub profile_vendor: String,
    pub initial_hss_state: String,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            hostname: DEFAULT_UPLOAD_HOSTNAME.to_string(),
            port: DEFAULT_UPLOAD_PORT,
            hss_vendor: DEFAULT_HSS_VENDOR.to_string(),
            profile_vendor: DEFAULT_PROFILE_VENDOR.to_string(),
            initial_hss_state: DEFAULT_INITIAL_HSS_STATE.to_string(),
        }
    }
}

/// Contents of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub es2plus: Es2PlusSettings,
    pub upload: UploadSettings,
}

/// Default location of the configuration file.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("simbatch").join("config.ini"))
        .ok_or(ConfigError::NoConfigDir)
}

fn parse<T: FromStr>(
    props: &Properties,
    section: &'static str,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match props.get(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                section,
                key,
                value: raw.to_string(),
            }),
    }
}

impl ConfigFile {
    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path()?)
    }

    /// Load from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(props) = ini.section(Some(ES2PLUS_SECTION)) {
            let s = ES2PLUS_SECTION;
            config.es2plus = Es2PlusSettings {
                host: props.get("host").map(str::to_string),
                port: parse(props, s, "port")?,
                requester_id: props.get("requester_id").map(str::to_string),
                cert: props.get("cert").map(PathBuf::from),
                key: props.get("key").map(PathBuf::from),
                accept_invalid_server_certs: parse(props, s, "accept_invalid_server_certs")?,
                timeout_secs: parse(props, s, "timeout_secs")?,
            };
        }

        if let Some(props) = ini.section(Some(UPLOAD_SECTION)) {
            let s = UPLOAD_SECTION;
            let upload = &mut config.upload;
            if let Some(v) = props.get("hostname") {
                upload.hostname = v.to_string();
            }
            if let Some(port) = parse(props, s, "port")? {
                upload.port = port;
            }
            if let Some(v) = props.get("hss_vendor") {
                upload.hss_vendor = v.to_string();
            }
            if let Some(v) = props.get("profile_vendor") {
                upload.profile_vendor = v.to_string();
            }
            if let Some(v) = props.get("initial_hss_state") {
                upload.initial_hss_state = v.to_string();
            }
        }

        Ok(config)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();

        let e = &self.es2plus;
        let es2plus_values = [
            ("host", e.host.clone()),
            ("port", e.port.map(|v| v.to_string())),
            ("requester_id", e.requester_id.clone()),
            ("cert", e.cert.as_ref().map(|p| p.display().to_string())),
            ("key", e.key.as_ref().map(|p| p.display().to_string())),
            (
                "accept_invalid_server_certs",
                e.accept_invalid_server_certs.map(|v| v.to_string()),
            ),
            ("timeout_secs", e.timeout_secs.map(|v| v.to_string())),
        ];
        for (key, value) in es2plus_values {
            if let Some(value) = value {
                ini.with_section(Some(ES2PLUS_SECTION)).set(key, value);
            }
        }

        ini.with_section(Some(UPLOAD_SECTION))
            .set("hostname", self.upload.hostname.as_str())
            .set("port", self.upload.port.to_string())
            .set("hss_vendor", self.upload.hss_vendor.as_str())
            .set("profile_vendor", self.upload.profile_vendor.as_str())
            .set("initial_hss_state", self.upload.initial_hss_state.as_str());

        ini
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        self.to_ini().write_to_file(path).map_err(write_err)
    }
}
