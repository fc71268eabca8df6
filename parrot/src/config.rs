use std::path::PathBuf;

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use course::{Course, Statement};

pub mod course;
pub mod theme;

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub theme: theme::Theme,
    pub courses_dir: Option<PathBuf>,
    /// Whether a Space after the final word also submits the sentence.
    pub space_submits: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: theme::Theme::default(),
            courses_dir: None,
            space_submits: true,
        }
    }
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create config directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),

    #[error("Failed to parse courses: {0}")]
    ParseCourses(course::CourseError),
}

#[derive(Debug, Default)]
pub struct Config {
    pub settings: Settings,
    pub courses: Vec<Course>,
}

impl Config {
    /// Default settings plus the starter course, for when the on-disk
    /// configuration could not be loaded at all.
    pub fn fallback() -> Self {
        Self {
            settings: Settings::default(),
            courses: vec![Course::starter()],
        }
    }

    pub fn get(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Grab default configuration
        let mut settings = Figment::from(Serialized::defaults(Settings::default()));

        // Check for toml file location
        let config_dir = override_path
            .or_else(|| {
                ProjectDirs::from("com", "Parrot", "Parrot")
                    .map(|dirs| dirs.config_dir().to_path_buf())
            })
            .ok_or(ConfigError::NoDirectory)?;

        // Ensure path exists
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }

        let mut settings_toml = config_dir.clone();
        settings_toml.push("settings.toml");

        if settings_toml.exists() {
            settings = settings.merge(Toml::file(settings_toml));
        }

        let mut settings: Settings = settings.extract().map_err(Box::new)?;

        let courses_dir = settings.courses_dir.clone().unwrap_or_else(|| {
            let mut dir = config_dir.clone();
            dir.push("courses");
            dir
        });
        let mut courses = course::get_courses(&courses_dir)?;
        settings.courses_dir = Some(courses_dir);

        // Keep the app usable out of the box
        if courses.is_empty() {
            courses.push(Course::starter());
        }

        Ok(Self { settings, courses })
    }
}
