use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which manifest shape to traverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Pick `modules` when the manifest has a top-level `modules` object, else `flat`.
    #[default]
    Auto,
    /// `assets` wrapper, every category lands in `images/`, manifest order.
    Flat,
    /// `modules` wrapper with the fixed per-screen checklist.
    Modules,
}

/// Global configuration loaded from `~/.config/assetpull/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetpullConfig {
    /// JSON manifest mapping filenames to URLs.
    pub manifest_path: PathBuf,
    /// Base output directory; category directories are created below it.
    pub assets_root: PathBuf,
    /// Upper bound on each GET, connect included.
    pub request_timeout_secs: u64,
    /// Upper bound on establishing the connection.
    pub connect_timeout_secs: u64,
    /// Manifest layout; missing means auto-detect.
    #[serde(default)]
    pub layout: LayoutKind,
    /// Tried in order when `manifest_path` does not exist.
    #[serde(default = "default_fallback_manifests")]
    pub fallback_manifest_paths: Vec<PathBuf>,
}

fn default_fallback_manifests() -> Vec<PathBuf> {
    vec![PathBuf::from("scripts/figma_asset_urls.json")]
}

impl Default for AssetpullConfig {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from("scripts/all_project_images.json"),
            assets_root: PathBuf::from("assets"),
            request_timeout_secs: 30,
            connect_timeout_secs: 15,
            layout: LayoutKind::Auto,
            fallback_manifest_paths: default_fallback_manifests(),
        }
    }
}

impl AssetpullConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.min(self.request_timeout_secs))
    }

    /// Reject values that would leave a request unbounded.
    ///
    /// libcurl reads a zero timeout as "never time out".
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be at least 1");
        }
        if self.connect_timeout_secs == 0 {
            bail!("connect_timeout_secs must be at least 1");
        }
        Ok(())
    }

    /// The manifest to load: `manifest_path` if it exists, else the first
    /// existing fallback, else `manifest_path` so the error names it.
    pub fn effective_manifest_path(&self) -> &Path {
        if self.manifest_path.exists() {
            return &self.manifest_path;
        }
        match self.fallback_manifest_paths.iter().find(|p| p.exists()) {
            Some(fallback) => {
                tracing::info!(
                    missing = %self.manifest_path.display(),
                    using = %fallback.display(),
                    "manifest not found, using fallback"
                );
                fallback
            }
            None => &self.manifest_path,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("assetpull")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit path. The file must exist.
pub fn load_from_path(path: &Path) -> Result<AssetpullConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: AssetpullConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AssetpullConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = AssetpullConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = AssetpullConfig::default();
        assert_eq!(
            cfg.manifest_path,
            PathBuf::from("scripts/all_project_images.json")
        );
        assert_eq!(cfg.assets_root, PathBuf::from("assets"));
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
        assert_eq!(cfg.layout, LayoutKind::Auto);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = AssetpullConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: AssetpullConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.manifest_path, cfg.manifest_path);
        assert_eq!(parsed.assets_root, cfg.assets_root);
        assert_eq!(parsed.request_timeout_secs, cfg.request_timeout_secs);
        assert_eq!(parsed.layout, cfg.layout);
    }

    #[test]
    fn config_toml_custom_values_without_layout() {
        let toml = r#"
            manifest_path = "scripts/figma_asset_urls.json"
            assets_root = "/srv/app/assets"
            request_timeout_secs = 10
            connect_timeout_secs = 5
        "#;
        let cfg: AssetpullConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            cfg.manifest_path,
            PathBuf::from("scripts/figma_asset_urls.json")
        );
        assert_eq!(cfg.assets_root, PathBuf::from("/srv/app/assets"));
        assert_eq!(cfg.request_timeout_secs, 10);
        assert_eq!(cfg.layout, LayoutKind::Auto);
    }

    #[test]
    fn config_toml_layout() {
        let toml = r#"
            manifest_path = "m.json"
            assets_root = "assets"
            request_timeout_secs = 30
            connect_timeout_secs = 15
            layout = "flat"
        "#;
        let cfg: AssetpullConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.layout, LayoutKind::Flat);
    }

    #[test]
    fn connect_timeout_never_exceeds_request_timeout() {
        let cfg = AssetpullConfig {
            request_timeout_secs: 5,
            connect_timeout_secs: 15,
            ..AssetpullConfig::default()
        };
        assert_eq!(cfg.connect_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "manifest_path = \"a.json\"\nassets_root = \"out\"\nrequest_timeout_secs = 7\nconnect_timeout_secs = 3\nlayout = \"modules\"\n",
        )
        .unwrap();
        let cfg = load_from_path(&path).unwrap();
        assert_eq!(cfg.assets_root, PathBuf::from("out"));
        assert_eq!(cfg.layout, LayoutKind::Modules);
    }

    #[test]
    fn zero_timeouts_are_refused() {
        let cfg = AssetpullConfig {
            request_timeout_secs: 0,
            ..AssetpullConfig::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = AssetpullConfig {
            connect_timeout_secs: 0,
            ..AssetpullConfig::default()
        };
        assert!(cfg.validate().is_err());
        assert!(AssetpullConfig::default().validate().is_ok());
    }

    #[test]
    fn load_from_path_rejects_zero_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "manifest_path = \"a.json\"\nassets_root = \"out\"\nrequest_timeout_secs = 0\nconnect_timeout_secs = 3\n",
        )
        .unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("request_timeout_secs must be at least 1"));
    }

    #[test]
    fn missing_fallback_list_gets_default() {
        let toml = r#"
            manifest_path = "m.json"
            assets_root = "assets"
            request_timeout_secs = 30
            connect_timeout_secs = 15
        "#;
        let cfg: AssetpullConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            cfg.fallback_manifest_paths,
            [PathBuf::from("scripts/figma_asset_urls.json")]
        );
    }

    #[test]
    fn effective_manifest_prefers_primary_then_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("all_project_images.json");
        let flat = dir.path().join("figma_asset_urls.json");
        let cfg = AssetpullConfig {
            manifest_path: primary.clone(),
            fallback_manifest_paths: vec![flat.clone()],
            ..AssetpullConfig::default()
        };

        // Neither exists: the primary is reported.
        assert_eq!(cfg.effective_manifest_path(), primary);

        fs::write(&flat, "{}").unwrap();
        assert_eq!(cfg.effective_manifest_path(), flat);

        fs::write(&primary, "{}").unwrap();
        assert_eq!(cfg.effective_manifest_path(), primary);
    }

    #[test]
    fn load_from_path_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from_path(&dir.path().join("nope.toml")).is_err());
    }
}
