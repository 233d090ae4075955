use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::error::Error;
use crate::preview::{DEFAULT_LIMIT, DEFAULT_MAX_CHARS};

pub const CONFIG_FILENAME: &str = "docx-extract.toml";
pub const CONFIG_ENV: &str = "DOCX_EXTRACT_CONFIG";
pub const DEFAULT_INPUT: &str = "data/ifrs16.docx";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputSection,
    #[serde(default)]
    pub preview: PreviewSection,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct InputSection {
    /// Relative paths resolve against the config file's directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct PreviewSection {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub max_chars: Option<usize>,
}

/// Settings after merging command line, config file and defaults (in that order).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub input: PathBuf,
    pub config_path: Option<PathBuf>,
    pub limit: usize,
    pub max_chars: usize,
}

impl ResolvedConfig {
    pub fn from_args(
        input: Option<PathBuf>,
        config_path: Option<PathBuf>,
        limit: Option<usize>,
        max_chars: Option<usize>,
    ) -> anyhow::Result<Self> {
        let cfg_file = config_path
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
            .or_else(|| {
                std::env::current_dir()
                    .ok()
                    .and_then(|cwd| find_file_upwards(&cwd, CONFIG_FILENAME, 8))
            });

        let mut file_cfg = AppConfig::default();
        if let Some(p) = cfg_file.as_ref() {
            if p.exists() {
                file_cfg = load_config(p)?;
            }
        }
        Ok(Self::merge(input, cfg_file, file_cfg, limit, max_chars))
    }

    fn merge(
        input: Option<PathBuf>,
        cfg_file: Option<PathBuf>,
        file_cfg: AppConfig,
        limit: Option<usize>,
        max_chars: Option<usize>,
    ) -> Self {
        let config_dir = cfg_file
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let input = input
            .or_else(|| {
                file_cfg.input.path.map(|p| {
                    if p.is_relative() {
                        config_dir.join(p)
                    } else {
                        p
                    }
                })
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));

        Self {
            input,
            config_path: cfg_file,
            limit: limit.or(file_cfg.preview.limit).unwrap_or(DEFAULT_LIMIT),
            max_chars: max_chars
                .or(file_cfg.preview.max_chars)
                .unwrap_or(DEFAULT_MAX_CHARS),
        }
    }

    /// Existence check done before extraction.
    pub fn check_input(&self) -> Result<(), Error> {
        if self.input.exists() {
            Ok(())
        } else {
            Err(Error::FileNotFound {
                path: self.input.clone(),
            })
        }
    }
}

pub fn find_file_upwards(start_dir: &Path, filename: &str, max_levels: usize) -> Option<PathBuf> {
    let mut dir = start_dir;
    for _ in 0..=max_levels {
        let candidate = dir.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
    None
}

pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: AppConfig = toml::from_str(&text).context("parse config toml")?;
    Ok(cfg)
}

const DEFAULT_CONFIG_TOML: &str = r#"# docx-extract configuration

[input]
# Document to read when no path is given on the command line.
# Relative paths resolve against this file's directory.
path = "data/ifrs16.docx"

[preview]
# Number of elements printed.
limit = 5
# Characters of content shown per element.
max_chars = 200
"#;

/// Writes `docx-extract.toml` into `dir`. An existing file is kept unless `force`.
pub fn init_default_config(dir: &Path, force: bool) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create config dir: {}", dir.display()))?;
    let cfg_path = dir.join(CONFIG_FILENAME);
    if cfg_path.exists() && !force {
        return Ok(cfg_path);
    }
    std::fs::write(&cfg_path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("write config: {}", cfg_path.display()))?;
    Ok(cfg_path)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn default_config_parses_to_defaults() {
        let cfg: AppConfig = toml::from_str(DEFAULT_CONFIG_TOML).expect("parse");
        assert_eq!(cfg.input.path, Some(PathBuf::from(DEFAULT_INPUT)));
        assert_eq!(cfg.preview.limit, Some(DEFAULT_LIMIT));
        assert_eq!(cfg.preview.max_chars, Some(DEFAULT_MAX_CHARS));
    }

    #[test]
    fn empty_config_is_valid() {
        let cfg: AppConfig = toml::from_str("").expect("parse");
        assert!(cfg.input.path.is_none());
        assert!(cfg.preview.limit.is_none());
    }

    #[test]
    fn cli_overrides_file_and_relative_input_follows_config_dir() {
        let file_cfg: AppConfig = toml::from_str(
            "[input]\npath = \"docs/a.docx\"\n[preview]\nlimit = 9\nmax_chars = 40\n",
        )
        .expect("parse");
        let cfg_path = PathBuf::from("/etc/proj/docx-extract.toml");

        let merged = ResolvedConfig::merge(
            None,
            Some(cfg_path.clone()),
            file_cfg.clone(),
            Some(2),
            None,
        );
        assert_eq!(merged.input, PathBuf::from("/etc/proj/docs/a.docx"));
        assert_eq!(merged.limit, 2);
        assert_eq!(merged.max_chars, 40);

        let merged = ResolvedConfig::merge(
            Some(PathBuf::from("x.docx")),
            Some(cfg_path),
            file_cfg,
            None,
            None,
        );
        assert_eq!(merged.input, PathBuf::from("x.docx"));
        assert_eq!(merged.limit, 9);
    }

    #[test]
    fn falls_back_to_builtin_defaults() {
        let merged = ResolvedConfig::merge(None, None, AppConfig::default(), None, None);
        assert_eq!(merged.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(merged.limit, DEFAULT_LIMIT);
        assert_eq!(merged.max_chars, DEFAULT_MAX_CHARS);
    }

    #[test]
    fn init_config_respects_force_and_is_found_upwards() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = init_default_config(dir.path(), false).expect("init");
        std::fs::write(&path, "[preview]\nlimit = 1\n").expect("edit");

        init_default_config(dir.path(), false).expect("init again");
        assert_eq!(load_config(&path).expect("load").preview.limit, Some(1));

        init_default_config(dir.path(), true).expect("force");
        assert_eq!(load_config(&path).expect("load").preview.limit, Some(5));

        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).expect("mkdir");
        assert_eq!(find_file_upwards(&nested, CONFIG_FILENAME, 8), Some(path));
    }

    #[test]
    fn check_input_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = ResolvedConfig {
            input: dir.path().join("nope.docx"),
            config_path: None,
            limit: DEFAULT_LIMIT,
            max_chars: DEFAULT_MAX_CHARS,
        };
        assert!(matches!(cfg.check_input(), Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn bad_toml_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[preview\nlimit = ").expect("write");
        assert!(load_config(&path).is_err());
    }
}
