//! セッションの制御
//!
//! `Session` の状態遷移とゲートウェイ呼び出しをつなぐ。
//! 操作のエラーはここで捕まえてセッションのエラーに書き込むため、
//! 呼び出し側に返るのは開始を拒否された場合だけ。

use crate::config::Config;
use crate::credential::{CredentialSelector, PromptSelector};
use crate::error::{CaliperError, Result};
use crate::gateway::{Gateway, HttpTransport, Transport};
use crate::intake;
use optical_caliper_common::{ErrorDisposition, Operation, Rejected, Session};
use std::path::PathBuf;
use tracing::{info, warn};

/// 結果なしで終わった操作のメッセージ
pub const NO_RESULT_MESSAGE: &str = "結果がありません。APIキーを再選択した場合はもう一度実行してください";

pub struct Caliper<T: Transport, C: CredentialSelector> {
    session: Session,
    gateway: Gateway<T>,
    selector: C,
}

impl Caliper<HttpTransport, PromptSelector> {
    /// 設定からHTTP接続の制御を組み立てる
    ///
    /// キーが見つからなければ端末で入力させる
    pub fn connect(config: &Config) -> Result<Self> {
        let (api_key, selected) = match config.get_api_key() {
            Ok(key) => (key, true),
            Err(CaliperError::MissingApiKey) => (String::new(), false),
            Err(e) => return Err(e),
        };

        let transport = HttpTransport::new(config.api_base(), api_key);
        let gateway = Gateway::new(transport, config.model_settings());
        let mut caliper = Self::new(gateway, PromptSelector::new(config.clone()), selected);
        caliper.ensure_credential()?;
        Ok(caliper)
    }
}

impl<T: Transport, C: CredentialSelector> Caliper<T, C> {
    pub fn new(gateway: Gateway<T>, selector: C, credential_selected: bool) -> Self {
        Self {
            session: Session::new(credential_selected),
            gateway,
            selector,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn gateway(&self) -> &Gateway<T> {
        &self.gateway
    }

    /// キーが未選択なら選択フローを実行
    pub fn ensure_credential(&mut self) -> Result<()> {
        if self.session.credential_selected() {
            return Ok(());
        }
        let key = self.selector.select()?;
        self.gateway.transport_mut().update_credential(&key);
        self.session.select_credential();
        Ok(())
    }

    /// ファイル/フォルダを読み込んで画像リストの末尾に追加
    pub fn add_paths(&mut self, paths: &[PathBuf]) -> Result<usize> {
        let images = intake::load_images(paths)?;
        let count = images.len();
        self.session.add_images(images);
        Ok(count)
    }

    /// 寸法解析を実行し、結果またはエラーをセッションに記録
    pub async fn analyze(&mut self) -> std::result::Result<(), Rejected> {
        let ticket = self.session.begin(Operation::Analyze)?;
        let outcome = self
            .gateway
            .analyze(self.session.images())
            .await
            .map_err(|e| e.user_message());

        if let Some(disposition) = self.session.finish_analysis(ticket, outcome) {
            self.handle_failure(disposition);
        }
        Ok(())
    }

    /// 図面生成を実行（直前の解析結果があれば寸法を固定）
    pub async fn generate_blueprint(&mut self) -> std::result::Result<(), Rejected> {
        let ticket = self.session.begin(Operation::Blueprint)?;
        let outcome = self
            .gateway
            .generate_blueprint(self.session.images(), self.session.analysis())
            .await
            .map_err(|e| e.user_message());

        if let Some(disposition) = self.session.finish_blueprint(ticket, outcome) {
            self.handle_failure(disposition);
        }
        Ok(())
    }

    /// 操作が結果を残したかを確認する（CLIの終了コード用）
    ///
    /// キー再選択に成功するとエラーは消えるが結果は空のままなので、
    /// エラーがなくても結果がなければ失敗扱いにする
    pub fn outcome(&self, op: Operation) -> Result<()> {
        if let Some(message) = self.session.error() {
            return Err(CaliperError::Operation(message.to_string()));
        }
        let produced = match op {
            Operation::Analyze => self.session.analysis().is_some(),
            Operation::Blueprint => self.session.blueprint().is_some(),
        };
        if produced {
            Ok(())
        } else {
            Err(CaliperError::Operation(NO_RESULT_MESSAGE.to_string()))
        }
    }

    fn handle_failure(&mut self, disposition: ErrorDisposition) {
        if disposition != ErrorDisposition::Reauthenticate {
            return;
        }

        warn!("APIキーが無効または失効しています。再選択します");
        match self.selector.select() {
            Ok(key) => {
                self.gateway.transport_mut().update_credential(&key);
                self.session.credential_reselected(true);
                info!("APIキーを再選択しました");
            }
            Err(e) => {
                warn!(error = %e, "APIキーの再選択に失敗");
                self.session.credential_reselected(false);
            }
        }
    }
}
