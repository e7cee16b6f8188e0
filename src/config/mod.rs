use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::Serialize;

pub const DEFAULT_DATA: &str = "./projects-data.xml";
pub const DEFAULT_PAGE_PATH: &str = "/projects.html";
/// Seconds allowed for a remote fetch; 0 leaves the client without a timeout.
pub const DEFAULT_TIMEOUT: u64 = 0;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(alias = "data_url")]
    pub data: Option<String>,
    pub page_path: Option<String>,
    pub history: Option<String>,
    pub query: Option<String>,
    pub output: Option<String>,
    pub output_format: Option<String>,
    pub timeout: Option<u64>,
    pub no_color: Option<bool>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .or_else(|| {
            let drive = env::var_os("HOMEDRIVE")?;
            let path = env::var_os("HOMEPATH")?;
            Some(PathBuf::from(drive).join(path))
        })
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".folio").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn expand_tilde_string(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}

pub fn load_config(path: &Path, allow_missing: bool) -> Result<ConfigFile, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_yaml::from_str::<ConfigFile>(&contents)
            .map_err(|e| format!("{}: not a valid folio config: {e}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(format!("no folio config at {}", path.display()))
        }
        Err(e) => Err(format!("cannot open folio config {}: {e}", path.display())),
    }
}

fn default_config_yaml() -> String {
    r#"# Folio config
#
# Location (default):
#   ~/.folio/config.yml

# Project data file: a local path or an http(s) URL
data: ./projects-data.xml

# Page path used when building deep links
page_path: /projects.html

# How filter changes are recorded: replace or push
history: replace

# Deep-link filters applied at startup (optional)
# query: "type=Game&platform=VR"

# Output (optional)
# output: ./gallery.html
# output_format: html

# Seconds to wait for a remote data file (0 = no timeout)
timeout: 0

# Output styling
no_color: false
"#
    .to_string()
}

pub fn ensure_default_config_file(path: &Path) -> Result<bool, String> {
    if path.exists() {
        return Ok(false);
    }
    let parent = path
        .parent()
        .ok_or_else(|| format!("config path {} has no parent directory", path.display()))?;
    std::fs::create_dir_all(parent).map_err(|e| {
        format!("cannot create folio config directory {}: {e}", parent.display())
    })?;
    let contents = default_config_yaml();
    std::fs::write(path, contents)
        .map_err(|e| format!("cannot write folio config {}: {e}", path.display()))?;
    Ok(true)
}
