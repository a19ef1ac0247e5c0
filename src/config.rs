use std::path::{Path, PathBuf};

use facet::Facet;

use crate::error::VbxError;

/// Default VBoxManage location when no config file overrides it.
pub const DEFAULT_VBOXMANAGE: &str = "/usr/bin/VBoxManage";

#[derive(Debug, Clone, Default, Facet)]
#[facet(default)]
pub struct Config {
    /// Path to the VBoxManage executable.
    #[facet(default)]
    pub vboxmanage: String,
}

impl Config {
    pub fn vboxmanage_path(&self) -> PathBuf {
        if self.vboxmanage.is_empty() {
            PathBuf::from(DEFAULT_VBOXMANAGE)
        } else {
            PathBuf::from(&self.vboxmanage)
        }
    }
}

/// Load the config, resolving the file in order: explicit `--config` path
/// (must exist), `./vbx.toml`, `~/.config/vbx/vbx.toml`. When no file is
/// found, built-in defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, VbxError> {
    if let Some(path) = explicit {
        return parse_file(path);
    }

    let local = Path::new("vbx.toml");
    if local.exists() {
        return parse_file(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join("vbx").join("vbx.toml");
        if user.exists() {
            return parse_file(&user);
        }
    }

    Ok(Config::default())
}

fn parse_file(path: &Path) -> Result<Config, VbxError> {
    let contents = std::fs::read_to_string(path).map_err(|source| VbxError::ConfigLoad {
        path: path.display().to_string(),
        source,
    })?;

    facet_toml::from_str(&contents).map_err(|e| VbxError::ConfigParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_default_path() {
        let config = Config::default();
        assert_eq!(config.vboxmanage_path(), PathBuf::from(DEFAULT_VBOXMANAGE));
    }

    #[test]
    fn config_overrides_path() {
        let config: Config =
            facet_toml::from_str(r#"vboxmanage = "/opt/vbox/VBoxManage""#).unwrap();
        assert_eq!(
            config.vboxmanage_path(),
            PathBuf::from("/opt/vbox/VBoxManage")
        );
    }

    #[test]
    fn missing_explicit_config_errors() {
        let err = load_config(Some(Path::new("/nonexistent/vbx.toml"))).unwrap_err();
        assert!(matches!(err, VbxError::ConfigLoad { .. }));
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vbx.toml");
        std::fs::write(&path, "vboxmanage = [").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, VbxError::ConfigParse { .. }));
    }
}
