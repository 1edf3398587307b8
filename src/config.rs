use crate::error::{CaliperError, Result};
use optical_caliper_common::gemini::{
    DEFAULT_ANALYSIS_MODEL, DEFAULT_API_BASE, DEFAULT_ASPECT_RATIO, DEFAULT_BLUEPRINT_MODEL,
    DEFAULT_IMAGE_SIZE, DEFAULT_THINKING_BUDGET,
};
use optical_caliper_common::ModelSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// APIキーを探す環境変数（先頭優先）
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// APIエンドポイントの上書き用環境変数
pub const API_BASE_ENV_VAR: &str = "GEMINI_API_BASE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: String,
    pub analysis_model: String,
    pub blueprint_model: String,
    pub thinking_budget: u32,
    pub aspect_ratio: String,
    pub image_size: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.into(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.into(),
            blueprint_model: DEFAULT_BLUEPRINT_MODEL.into(),
            thinking_budget: DEFAULT_THINKING_BUDGET,
            aspect_ratio: DEFAULT_ASPECT_RATIO.into(),
            image_size: DEFAULT_IMAGE_SIZE.into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込む（ファイルがなければデフォルト）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CaliperError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("optical-caliper").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        self.api_key_from(|name| std::env::var(name).ok())
    }

    /// 環境変数 → 設定ファイルの順でAPIキーを解決
    pub fn api_key_from<F>(&self, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .chain(self.api_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .ok_or(CaliperError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    /// 環境変数の上書きを反映したエンドポイント
    pub fn api_base(&self) -> String {
        std::env::var(API_BASE_ENV_VAR)
            .ok()
            .filter(|base| !base.trim().is_empty())
            .unwrap_or_else(|| self.api_base.clone())
    }

    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings {
            analysis_model: self.analysis_model.clone(),
            blueprint_model: self.blueprint_model.clone(),
            thinking_budget: self.thinking_budget,
            aspect_ratio: self.aspect_ratio.clone(),
            image_size: self.image_size.clone(),
        }
    }

    /// 表示用にマスクしたAPIキー
    pub fn masked_api_key(&self) -> String {
        match self.api_key.as_deref() {
            Some(key) if key.chars().count() > 8 => {
                let chars: Vec<char> = key.chars().collect();
                let head: String = chars[..4].iter().collect();
                let tail: String = chars[chars.len() - 4..].iter().collect();
                format!("{}...{}", head, tail)
            }
            Some(_) => "****".into(),
            None => "(未設定)".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.analysis_model, "gemini-3-pro-preview");
        assert_eq!(config.blueprint_model, "gemini-3-pro-image-preview");
        assert_eq!(config.thinking_budget, 16384);
        assert_eq!(config.model_settings(), ModelSettings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"api_key": "abc"}"#).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.image_size, "2K");
    }

    #[test]
    fn test_api_key_env_order() {
        let config = Config {
            api_key: Some("from-file".into()),
            ..Default::default()
        };

        let both = |name: &str| match name {
            "GEMINI_API_KEY" => Some("gemini".to_string()),
            "API_KEY" => Some("generic".to_string()),
            _ => None,
        };
        assert_eq!(config.api_key_from(both).unwrap(), "gemini");

        let generic = |name: &str| (name == "API_KEY").then(|| "generic".to_string());
        assert_eq!(config.api_key_from(generic).unwrap(), "generic");

        assert_eq!(config.api_key_from(no_env).unwrap(), "from-file");
    }

    #[test]
    fn test_api_key_missing() {
        let config = Config::default();
        assert!(matches!(config.api_key_from(no_env), Err(CaliperError::MissingApiKey)));

        let blank = Config {
            api_key: Some("  ".into()),
            ..Default::default()
        };
        assert!(matches!(blank.api_key_from(no_env), Err(CaliperError::MissingApiKey)));
    }

    #[test]
    fn test_masked_api_key() {
        let config = Config {
            api_key: Some("AIzaSyExample1234".into()),
            ..Default::default()
        };
        assert_eq!(config.masked_api_key(), "AIza...1234");
        assert_eq!(Config::default().masked_api_key(), "(未設定)");
    }
}
