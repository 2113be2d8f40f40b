use directories::BaseDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::geometry::RingGeometry;
use crate::seekbar::SeekBar;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("profile not found: {0}")]
    NotFound(PathBuf),
    #[error("invalid profile: {0}")]
    Invalid(String),
    #[error("invalid profile name '{0}'")]
    BadName(String),
    #[error("no home directory available")]
    NoHome,
}

type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
    #[serde(default)]
    pub progress: f32,
    #[serde(default = "one")]
    pub speed_multiplier: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ring {
    pub width: f32,
    pub height: f32,
    pub ring_width_factor: f32,
    #[serde(default = "yes")]
    pub enabled: bool,
    #[serde(default = "yes")]
    pub show_indicator: bool,
}

/// Presentation only; the seek bar itself reads `progress_text` and
/// `text_decimals`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appearance {
    #[serde(default = "ring_color")]
    pub ring_color: String,
    #[serde(default = "white")]
    pub inner_circle_color: String,
    #[serde(default = "black")]
    pub progress_text_color: String,
    #[serde(default = "text_size")]
    pub progress_text_size: f32,
    #[serde(default = "yes")]
    pub show_text: bool,
    #[serde(default = "yes")]
    pub show_inner_circle: bool,
    pub progress_text: Option<String>,
    #[serde(default = "one_usize")]
    pub text_decimals: usize,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            ring_color: ring_color(),
            inner_circle_color: white(),
            progress_text_color: black(),
            progress_text_size: text_size(),
            show_text: true,
            show_inner_circle: true,
            progress_text: None,
            text_decimals: 1,
        }
    }
}

fn one() -> f32 {
    1.0
}
fn one_usize() -> usize {
    1
}
fn yes() -> bool {
    true
}
fn ring_color() -> String {
    "#c0ff8c".into()
}
fn white() -> String {
    "#ffffff".into()
}
fn black() -> String {
    "#000000".into()
}
fn text_size() -> f32 {
    24.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub meta: Meta,
    pub bounds: Bounds,
    pub ring: Ring,
    #[serde(default)]
    pub appearance: Appearance,
}

impl Profile {
    pub fn from_toml(txt: &str, origin: &Path) -> Result<Self> {
        let p: Profile = toml::from_str(txt).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        p.validate()?;
        Ok(p)
    }

    pub fn validate(&self) -> Result<()> {
        let b = &self.bounds;
        for (name, v) in [
            ("bounds.min", b.min),
            ("bounds.max", b.max),
            ("bounds.progress", b.progress),
            ("bounds.speed_multiplier", b.speed_multiplier),
            ("ring.width", self.ring.width),
            ("ring.height", self.ring.height),
            ("ring.ring_width_factor", self.ring.ring_width_factor),
            ("appearance.progress_text_size", self.appearance.progress_text_size),
        ] {
            if !v.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }
        if b.speed_multiplier < 0.0 {
            return Err(ConfigError::Invalid(
                "bounds.speed_multiplier must be >= 0".into(),
            ));
        }
        if b.min > b.max {
            warn!(
                "bounds.min ({}) > bounds.max ({}); drag updates will pin to min",
                b.min, b.max
            );
        }
        if !(0.0..=1.0).contains(&self.ring.ring_width_factor) {
            return Err(ConfigError::Invalid(
                "ring.ring_width_factor must be in [0,1]".into(),
            ));
        }
        if self.ring.width <= 0.0 || self.ring.height <= 0.0 {
            return Err(ConfigError::Invalid("ring size must be positive".into()));
        }
        if self.appearance.progress_text_size < 0.0 {
            return Err(ConfigError::Invalid(
                "appearance.progress_text_size must be >= 0".into(),
            ));
        }
        for (name, c) in [
            ("appearance.ring_color", &self.appearance.ring_color),
            ("appearance.inner_circle_color", &self.appearance.inner_circle_color),
            ("appearance.progress_text_color", &self.appearance.progress_text_color),
        ] {
            if !is_hex_color(c) {
                return Err(ConfigError::Invalid(format!(
                    "{name} '{c}' is not a #rrggbb color"
                )));
            }
        }
        Ok(())
    }

    /// Builds a seek bar in the profile's initial state.
    pub fn build_seekbar(&self) -> SeekBar {
        let g = RingGeometry::new(self.ring.width, self.ring.height, self.ring.ring_width_factor);
        let mut bar = SeekBar::new(g);
        // bounds before progress so the one-sided re-clamps don't touch it
        bar.set_max(self.bounds.max);
        bar.set_min(self.bounds.min);
        bar.set_progress(self.bounds.progress);
        bar.set_speed_multiplier(self.bounds.speed_multiplier);
        bar.set_enabled(self.ring.enabled);
        bar.set_indicator(self.ring.show_indicator);
        bar.set_progress_text(self.appearance.progress_text.clone());
        bar.set_text_decimals(self.appearance.text_decimals);
        bar
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

pub fn default_profile_text() -> &'static str {
    include_str!("../profiles/default.toml")
}

/// Profiles live in `<dir>/profiles/<name>.toml`; `<dir>/active` names the
/// current one.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    pub fn open_default() -> Result<Self> {
        let base = BaseDirs::new().ok_or(ConfigError::NoHome)?;
        Ok(Self::at(base.config_dir().join("ringseek")))
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.dir.join("profiles")
    }

    fn active_ptr(&self) -> PathBuf {
        self.dir.join("active")
    }

    /// Names are plain file stems; anything that could leave `profiles/` is
    /// rejected.
    fn profile_path(&self, name: &str) -> Result<PathBuf> {
        let bad = name.is_empty()
            || name.starts_with('.')
            || name.chars().any(|c| c == '/' || c == '\\' || c == std::path::MAIN_SEPARATOR);
        if bad {
            return Err(ConfigError::BadName(name.to_string()));
        }
        Ok(self.profiles_dir().join(format!("{name}.toml")))
    }

    /// Installs the built-in default profile and active pointer if missing,
    /// then loads the active profile.
    pub fn load_or_install_default(&self) -> Result<(String, Profile)> {
        let profdir = self.profiles_dir();
        fs::create_dir_all(&profdir).map_err(|e| io_err(&profdir, e))?;

        let def_path = self.profile_path("default")?;
        if !def_path.exists() {
            fs::write(&def_path, default_profile_text()).map_err(|e| io_err(&def_path, e))?;
            info!("installed default profile at {}", def_path.display());
        }

        let ptr = self.active_ptr();
        if !ptr.exists() {
            fs::write(&ptr, b"default").map_err(|e| io_err(&ptr, e))?;
        }

        let name = self.active_name()?;
        let profile = self.load(&name)?;
        Ok((name, profile))
    }

    pub fn active_name(&self) -> Result<String> {
        let ptr = self.active_ptr();
        let name = fs::read_to_string(&ptr).map_err(|e| io_err(&ptr, e))?;
        Ok(name.trim().to_string())
    }

    pub fn set_active(&self, name: &str) -> Result<Profile> {
        let profile = self.load(name)?;
        let ptr = self.active_ptr();
        fs::write(&ptr, name.as_bytes()).map_err(|e| io_err(&ptr, e))?;
        info!("switched active profile to {name}");
        Ok(profile)
    }

    pub fn load(&self, name: &str) -> Result<Profile> {
        let path = self.profile_path(name)?;
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }
        let txt = fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        Profile::from_toml(&txt, &path)
    }

    pub fn list_profiles(&self) -> Vec<String> {
        let mut v = Vec::new();
        if let Ok(rd) = fs::read_dir(self.profiles_dir()) {
            for e in rd.flatten() {
                let p = e.path();
                if p.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) = p.file_stem().and_then(|s| s.to_str()) {
                        v.push(stem.to_string());
                    }
                }
            }
        }
        v.sort();
        v
    }
}

fn io_err(path: &Path, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.to_path_buf(),
        source,
    }
}
