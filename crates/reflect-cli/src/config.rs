use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Runtime configuration. Layering: built-in defaults, then the TOML config
/// file, then `REFLECT_*` environment variables; CLI flags are applied on
/// top by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub iterations: usize,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/v1".to_string(),
            api_key: None,
            model: "llama-3.2-1b-instruct".to_string(),
            max_tokens: 4000,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 40,
            frequency_penalty: 0.5,
            presence_penalty: 0.0,
            iterations: 500,
            log_dir: PathBuf::from("."),
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".reflect").join(CONFIG_FILE_NAME))
}

impl Config {
    /// Load from the given path, or the default `~/.reflect/config.toml`
    /// when none is given. A missing file is not an error; a file that
    /// exists but does not parse is.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = Config::default();

        let path = path
            .map(PathBuf::from)
            .or_else(default_config_path);
        if let Some(path) = path {
            if path.exists() {
                let content = std::fs::read_to_string(&path)?;
                config = toml::from_str(&content)?;
                log::debug!("loaded config from {}", path.display());
            }
        }

        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(api_url) = std::env::var("REFLECT_API_URL") {
            self.api_url = api_url;
        }
        if let Ok(api_key) = std::env::var("REFLECT_API_KEY") {
            self.api_key = Some(api_key);
        }
        if let Ok(model) = std::env::var("REFLECT_MODEL") {
            self.model = model;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_generation_knobs() {
        let config = Config::default();
        assert_eq!(config.max_tokens, 4000);
        assert_eq!(config.iterations, 500);
        assert!((config.temperature - 0.7).abs() < 1e-6);
        assert_eq!(config.top_k, 40);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: Config =
            toml::from_str("model = \"custom-model\"\niterations = 12\n").expect("parse");
        assert_eq!(config.model, "custom-model");
        assert_eq!(config.iterations, 12);
        assert_eq!(config.max_tokens, 4000);
    }

    // Single test for everything that goes through `Config::load`: it is the
    // only test that touches the process environment, so parallel test
    // threads cannot observe a half-set REFLECT_* variable.
    #[test]
    fn env_values_override_file_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::env::remove_var("REFLECT_API_URL");
        std::env::remove_var("REFLECT_API_KEY");
        std::env::remove_var("REFLECT_MODEL");

        // missing file: defaults only
        let config = Config::load(Some(&dir.path().join("nope.toml"))).expect("load");
        assert_eq!(config.model, Config::default().model);

        // file layer wins over defaults
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "model = \"file-model\"\napi_key = \"file-key\"\n")
            .expect("write");
        let config = Config::load(Some(&path)).expect("load");
        assert_eq!(config.model, "file-model");
        assert_eq!(config.api_key.as_deref(), Some("file-key"));

        // env layer wins over the file; untouched fields keep the file value
        std::env::set_var("REFLECT_MODEL", "env-model");
        std::env::set_var("REFLECT_API_URL", "http://env:9999/v1");
        let config = Config::load(Some(&path)).expect("load");
        assert_eq!(config.model, "env-model");
        assert_eq!(config.api_url, "http://env:9999/v1");
        assert_eq!(config.api_key.as_deref(), Some("file-key"));

        std::env::remove_var("REFLECT_MODEL");
        std::env::remove_var("REFLECT_API_URL");
    }
}
