//! Configuration management for assetsync.
//!
//! Values are read once per run, in this order (later wins):
//! built-in defaults, a TOML file (`--config`, `./assetsync.toml` or
//! `~/.config/assetsync/config.toml`), the `PUBLIC_GRAPHQL_ENDPOINT`
//! environment variable, and finally command-line flags.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::AssetKind;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/graphql";

/// Environment variable that overrides the configured endpoint
pub const ENDPOINT_ENV: &str = "PUBLIC_GRAPHQL_ENDPOINT";

pub const DEFAULT_CONCURRENCY: usize = 5;

/// Upper bound on downloads in flight per chunk
pub const MAX_CONCURRENCY: usize = 256;

pub const DEFAULT_USER_AGENT: &str = concat!("assetsync/", env!("CARGO_PKG_VERSION"));

pub const CONFIG_FILE_NAME: &str = "assetsync.toml";

pub const PLAYER_IMAGE_TEMPLATE: &str = "https://pga-tour-res.cloudinary.com/image/upload/c_thumb,g_face,z_0.7,q_auto,f_auto,dpr_2.0,w_80,h_80,b_rgb:F2F2F2,d_stub:default_avatar_light.webp/headshots_{id}";

const ID_PLACEHOLDER: &str = "{id}";

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GraphQL endpoint queried for players and tournaments
    pub endpoint: String,

    /// Directory that receives `images/players` and `images/tournaments`
    pub output_root: PathBuf,

    /// Number of downloads in flight per chunk (default: 5)
    pub concurrency: usize,

    /// Per-request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    pub user_agent: String,

    /// Extension used when a tournament URL carries none (default: "jpg")
    pub default_extension: String,

    /// Player headshot URL; `{id}` is replaced with the player id
    pub player_image_template: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            output_root: PathBuf::from("public"),
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_extension: "jpg".to_string(),
            player_image_template: PLAYER_IMAGE_TEMPLATE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the first config file found.
    ///
    /// Missing files are not an error when no explicit path is given; the
    /// defaults are used instead. The endpoint environment variable is
    /// applied on top of whatever the file provided.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::discover() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_env(std::env::var(ENDPOINT_ENV).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn discover() -> Option<PathBuf> {
        Self::discover_in(Path::new("."), dirs::config_dir().as_deref())
    }

    /// Look for `assetsync.toml` in `work_dir`, then `assetsync/config.toml`
    /// under the user config directory.
    fn discover_in(work_dir: &Path, user_config_dir: Option<&Path>) -> Option<PathBuf> {
        let local = work_dir.join(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }

        let user = user_config_dir?.join("assetsync").join("config.toml");
        user.exists().then_some(user)
    }

    /// Override the endpoint with an environment value. Empty values are ignored.
    pub fn apply_env(&mut self, endpoint: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            source: e,
        })?;

        if !self.player_image_template.contains(ID_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "player_image_template must contain {}",
                ID_PLACEHOLDER
            )));
        }

        if self.concurrency > MAX_CONCURRENCY {
            return Err(ConfigError::Invalid(format!(
                "concurrency must be at most {}, got {}",
                MAX_CONCURRENCY, self.concurrency
            )));
        }

        if self.default_extension.is_empty() || self.default_extension.contains('.') {
            return Err(ConfigError::Invalid(format!(
                "default_extension must be a bare extension, got {:?}",
                self.default_extension
            )));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.output_root.join("images")
    }

    /// Directory holding the cached images of one kind
    pub fn kind_dir(&self, kind: AssetKind) -> PathBuf {
        self.images_dir().join(kind.dir_name())
    }

    pub fn player_image_url(&self, id: &str) -> String {
        self.player_image_template.replace(ID_PLACEHOLDER, id)
    }

    /// Write a commented default config file. Refuses to overwrite.
    pub fn write_default(path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    pub fn default_config_content() -> String {
        format!(
            r##"# assetsync configuration
#
# The endpoint can also be set with the {env} environment
# variable, which takes precedence over this file.

# GraphQL endpoint serving getAllPlayers and getAllTournaments
endpoint = "{endpoint}"

# Images are written to <output_root>/images/players and
# <output_root>/images/tournaments
output_root = "public"

# Downloads in flight at once; each chunk finishes before the next starts
concurrency = {concurrency}

# Per-request timeout in seconds
timeout_secs = 30

# User-Agent sent with every request
user_agent = "{user_agent}"

# Extension used when a tournament image URL has none
default_extension = "jpg"

# Player headshot URL, {{id}} is replaced with the player id
player_image_template = "{template}"
"##,
            env = ENDPOINT_ENV,
            endpoint = DEFAULT_ENDPOINT,
            concurrency = DEFAULT_CONCURRENCY,
            template = PLAYER_IMAGE_TEMPLATE,
            user_agent = DEFAULT_USER_AGENT,
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid endpoint {endpoint}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },

    #[error("Config file already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
