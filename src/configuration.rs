use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub quiz: QuizSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub cors_origin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: PathBuf,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizSettings {
    #[serde(default)]
    pub order: QuizOrder,
}

/// How the next quiz question is picked from the questions not yet asked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizOrder {
    /// First remaining question by id.
    #[default]
    Sequential,
    /// Any remaining question, uniformly at random.
    Shuffled,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Settings {
    /// Loads defaults, then `config_file` (or `trivia.*` in the working
    /// directory), then `TRIVIA_*` environment variables.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let env = Environment::with_prefix("TRIVIA")
            .prefix_separator("_")
            .separator("__");
        Self::load_from(config_file, env)
    }

    fn load_from(config_file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name("trivia").required(false),
        };
        Config::builder()
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 8080)?
            .set_default("application.cors_origin", "http://localhost:3000")?
            .set_default("database.path", "trivia.db")?
            .set_default("database.max_connections", 5)?
            .set_default("quiz.order", "sequential")?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}
