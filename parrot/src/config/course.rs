use std::path::PathBuf;

use derive_more::From;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, From, Error)]
pub enum CourseError {
    #[error("Failed to read courses directory '{directory}': {error}")]
    #[from(skip)]
    ReadDirectory {
        directory: PathBuf,
        error: std::io::Error,
    },

    #[error("Failed to read file")]
    ReadFile(std::io::Error),

    #[error("Failed to parse file")]
    ParseFile(toml::de::Error),

    #[error("Course '{0}' has no statements")]
    Empty(String),
}

/// One sentence of a course: the target text, plus an optional prompt shown
/// above the input (typically a native-language cue to translate).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    pub text: String,
    #[serde(default)]
    pub prompt: Option<String>,
}

/// An ordered set of statements, practiced front to back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub statements: Vec<Statement>,
}

impl Course {
    /// The course shipped with the binary, used when no course files exist.
    pub fn starter() -> Self {
        let statements = [
            ("I love you", "Three words, one sentence"),
            ("How are you doing today", "A greeting"),
            ("Practice makes perfect", "A proverb"),
            ("The quick brown fox jumps over the lazy dog", "A pangram"),
        ]
        .into_iter()
        .map(|(text, prompt)| Statement {
            text: text.to_string(),
            prompt: Some(prompt.to_string()),
        })
        .collect();

        Self {
            name: "Starter".to_string(),
            statements,
        }
    }
}

pub fn get_courses(from_dir: &PathBuf) -> Result<Vec<Course>, CourseError> {
    if !from_dir.exists() {
        std::fs::create_dir_all(from_dir)?;
    }

    let files = from_dir
        .read_dir()
        .map_err(|error| CourseError::ReadDirectory {
            directory: from_dir.clone(),
            error,
        })?;

    let mut paths: Vec<PathBuf> = files
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();

    // Course order follows file order
    paths.sort();

    let mut courses = Vec::with_capacity(paths.len());

    for path in paths {
        let content = std::fs::read_to_string(path)?;
        let course: Course = toml::from_str(&content)?;
        if course.statements.is_empty() {
            return Err(CourseError::Empty(course.name));
        }
        courses.push(course);
    }

    Ok(courses)
}
