//! APIキーの選択
//!
//! 起動時にキーがない場合と、認証切れのエラーが返った場合に呼ばれる。

use crate::config::Config;
use crate::error::{CaliperError, Result};
use dialoguer::Password;

pub trait CredentialSelector {
    /// 新しいAPIキーを選択して返す
    fn select(&mut self) -> Result<String>;
}

/// 端末でキーを入力させ、設定ファイルに保存する
pub struct PromptSelector {
    config: Config,
}

impl PromptSelector {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl CredentialSelector for PromptSelector {
    fn select(&mut self) -> Result<String> {
        println!("Gemini APIキーを入力してください（https://aistudio.google.com/apikey で発行）");

        let input: String = Password::new()
            .with_prompt("APIキー")
            .interact()
            .map_err(|e| CaliperError::CredentialSelection(e.to_string()))?;

        let key = input.trim().to_string();
        if key.is_empty() {
            return Err(CaliperError::CredentialSelection("キーが空です".into()));
        }

        self.config.set_api_key(key.clone())?;
        println!("✔ APIキーを保存しました");
        Ok(key)
    }
}
