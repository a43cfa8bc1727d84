use crate::error::{GaitAiError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// サーバーURLを上書きする環境変数
pub const SERVER_ENV: &str = "GAIT_AI_SERVER";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    /// Djangoの csrftoken クッキー値（削除時のヘッダーにも使う）
    pub csrf_token: Option<String>,
    /// Djangoの sessionid クッキー値
    pub session_cookie: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".into(),
            csrf_token: None,
            session_cookie: None,
            timeout_seconds: 300, // 500MBの動画送信を想定
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込む（無ければデフォルト）
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
            .ok_or_else(|| GaitAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("gait-ai").join("config.json"))
    }

    /// 実際に使うサーバーURL（環境変数を優先）
    pub fn server_url(&self) -> String {
        self.server_url_with(std::env::var(SERVER_ENV).ok())
    }

    pub fn server_url_with(&self, env_value: Option<String>) -> String {
        env_value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| self.server_url.clone())
    }
}
