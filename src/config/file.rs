use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::orientation::Orientation;
use crate::screen_map::Rect;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub params_dir: Option<PathBuf>,
    pub device: Option<String>,
    pub screen_size: Option<Rect>,
    pub screen_map: Option<Rect>,
    #[serde(default)]
    pub full_screen: bool,
    pub orientation: Option<Orientation>,
    pub pressure_preset: Option<String>,
    pub pressure_coefs: Option<[i16; 4]>,
}

/// Load a config file the user named explicitly. Any failure is an error.
pub fn load_from_path(path: &Path) -> Result<FileConfig, Box<dyn std::error::Error + Send + Sync>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let config = parse(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// First default location that holds a parseable file; broken files are skipped.
pub fn load_from_default_paths() -> Option<FileConfig> {
    for path in default_config_paths() {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return Some(config),
                Err(e) => log::warn!("{}", e),
            }
        }
    }
    None
}

fn parse(content: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(content)
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("veikk-config.toml")];

    if let Ok(home) = std::env::var("HOME") {
        paths.push(PathBuf::from(home).join(".config").join("veikk-config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let config = parse(
            r#"
            params_dir = "/tmp/veikk"
            device = "A50"
            screen_size = "2560x1440"
            screen_map = "0,0,1280,720"
            orientation = "rotate-90-cw"
            pressure_coefs = [0, 200, -100, 0]
            "#,
        )
        .unwrap();

        assert_eq!(config.params_dir, Some(PathBuf::from("/tmp/veikk")));
        assert_eq!(config.screen_size, Some(Rect::from_size(2560, 1440)));
        assert_eq!(config.screen_map, Some(Rect::new(0, 0, 1280, 720)));
        assert_eq!(config.orientation, Some(Orientation::Rotate90Cw));
        assert_eq!(config.pressure_coefs, Some([0, 200, -100, 0]));
        assert!(!config.full_screen);
    }

    #[test]
    fn test_rejects_unknown_and_malformed() {
        assert!(parse("colour = \"red\"").is_err());
        assert!(parse("orientation = \"sideways\"").is_err());
        assert!(parse("screen_map = \"1,2,3\"").is_err());
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("veikk-config.toml");
        std::fs::write(&path, "full_screen = true\npressure_preset = \"cubic-1\"\n").unwrap();

        let config = load_from_path(&path).unwrap();
        assert!(config.full_screen);
        assert_eq!(config.pressure_preset.as_deref(), Some("cubic-1"));

        assert!(load_from_path(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_explicit_file_with_typo_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mine.toml");
        std::fs::write(&path, "orientaton = \"flipped\"\n").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("mine.toml"));
    }
}
