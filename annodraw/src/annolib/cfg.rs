use crate::file_util;
use annodraw_domain::{DEFAULT_COLOR, DrawResult, drawerr, to_draw};
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::Level;

const CFG_DEFAULT: &str = r#"
    color = [255, 0, 0]  # outline color as [r, g, b]
    log_level = "info"   # "error", "warn", "info", "debug" or "trace"
    log_to_file = true   # logs are written to <home>/.annodraw/logs
    "#;

pub fn get_default_cfg() -> Cfg {
    toml::from_str(CFG_DEFAULT).expect("default config broken")
}

pub fn get_cfg_path(homedir: &Path) -> PathBuf {
    homedir.join("annodraw_cfg.toml")
}

pub fn get_log_folder(homedir: &Path) -> PathBuf {
    homedir.join("logs")
}

/// Reads the config at `cfg_toml_path` or returns the default if there is no such file.
pub fn read_cfg(cfg_toml_path: &Path) -> DrawResult<Cfg> {
    if cfg_toml_path.exists() {
        let toml_str = file_util::read_to_string(cfg_toml_path)?;
        toml::from_str(&toml_str)
            .map_err(|e| drawerr!("could not parse config {:?}, {}", cfg_toml_path, e))
    } else {
        Ok(get_default_cfg())
    }
}

pub fn write_cfg(cfg_toml_path: &Path, cfg: &Cfg) -> DrawResult<()> {
    let cfg_str = toml::to_string_pretty(cfg).map_err(to_draw)?;
    file_util::write(cfg_toml_path, cfg_str)
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Cfg {
    pub color: Option<[u8; 3]>,
    log_level: Option<String>,
    log_to_file: Option<bool>,
}
impl Cfg {
    pub fn color(&self) -> Rgb<u8> {
        self.color.map(Rgb).unwrap_or(DEFAULT_COLOR)
    }
    pub fn log_level(&self) -> DrawResult<Level> {
        match &self.log_level {
            Some(level) => Level::from_str(level)
                .map_err(|e| drawerr!("unknown log level '{}' in config, {}", level, e)),
            None => Ok(Level::INFO),
        }
    }
    pub fn log_to_file(&self) -> bool {
        self.log_to_file.unwrap_or(true)
    }
}

#[cfg(test)]
use crate::{defer_folder_removal, file_util::tmp_folder};

#[test]
fn test_default_cfg() {
    let cfg = get_default_cfg();
    assert_eq!(cfg.color(), DEFAULT_COLOR);
    assert_eq!(cfg.log_level().unwrap(), Level::INFO);
    assert!(cfg.log_to_file());
    let empty = Cfg::default();
    assert_eq!(empty.color(), DEFAULT_COLOR);
    assert_eq!(empty.log_level().unwrap(), Level::INFO);
    // a missing key falls back to the built-in default
    assert_eq!(empty.log_to_file(), cfg.log_to_file());
}

#[test]
fn test_read_write_cfg() {
    let folder = tmp_folder("cfg_test_read_write").unwrap();
    defer_folder_removal!(&folder);
    let cfg_path = get_cfg_path(&folder);
    assert_eq!(read_cfg(&cfg_path).unwrap(), get_default_cfg());

    let cfg = Cfg {
        color: Some([0, 128, 255]),
        log_level: Some("debug".to_string()),
        log_to_file: Some(false),
    };
    write_cfg(&cfg_path, &cfg).unwrap();
    let cfg_read = read_cfg(&cfg_path).unwrap();
    assert_eq!(cfg_read, cfg);
    assert_eq!(cfg_read.color(), Rgb([0, 128, 255]));
    assert_eq!(cfg_read.log_level().unwrap(), Level::DEBUG);

    file_util::write(&cfg_path, "color = [1, 2]").unwrap();
    assert!(read_cfg(&cfg_path).is_err());
    file_util::write(&cfg_path, "log_level = \"loud\"").unwrap();
    assert!(read_cfg(&cfg_path).unwrap().log_level().is_err());
    assert_eq!(get_log_folder(&folder), folder.join("logs"));
}
