//! セッション状態
//!
//! 画像リスト・実行中の操作・最新の解析結果/図面/エラーを1つの値で保持する。
//! 状態遷移はすべてメソッド経由で行い、UI側はこの値を1か所で所有する。
//!
//! 実行中の操作は `InFlight` の1スロットだけなので、寸法解析と図面生成が
//! 同時に走ることは構造上起こらない。

use crate::error::is_auth_expired;
use crate::image::UploadedImage;
use crate::types::{AnalysisResult, BlueprintImage};
use thiserror::Error;

/// ユーザーが起動できる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Analyze,
    Blueprint,
}

/// 実行中の操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InFlight {
    #[default]
    Idle,
    Analyzing,
    DrawingBlueprint,
}

impl From<Operation> for InFlight {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Analyze => InFlight::Analyzing,
            Operation::Blueprint => InFlight::DrawingBlueprint,
        }
    }
}

/// 操作の開始を拒否した理由
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    #[error("No images provided")]
    NoImages,

    #[error("Another operation is in progress ({0:?})")]
    Busy(InFlight),
}

/// エラー発生後にUIが取るべき対応
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDisposition {
    /// エラーバナーに表示するだけ
    Shown,
    /// APIキーの再選択フローに戻る
    Reauthenticate,
}

/// `begin` が発行する実行券
///
/// 実行中に画像リストが変わった場合、完了時の結果は破棄される。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    op: Operation,
    generation: u64,
}

impl Ticket {
    pub fn op(&self) -> Operation {
        self.op
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    images: Vec<UploadedImage>,
    /// `images` と同じ並びの画像ID（削除しても他の画像のIDは変わらない）
    image_ids: Vec<u64>,
    next_image_id: u64,
    in_flight: InFlight,
    analysis: Option<AnalysisResult>,
    blueprint: Option<BlueprintImage>,
    error: Option<String>,
    credential_selected: bool,
    generation: u64,
}

impl Session {
    pub fn new(credential_selected: bool) -> Self {
        Self {
            credential_selected,
            ..Default::default()
        }
    }

    pub fn images(&self) -> &[UploadedImage] {
        &self.images
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn blueprint(&self) -> Option<&BlueprintImage> {
        self.blueprint.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn in_flight(&self) -> InFlight {
        self.in_flight
    }

    pub fn is_analyzing(&self) -> bool {
        self.in_flight == InFlight::Analyzing
    }

    pub fn is_drawing(&self) -> bool {
        self.in_flight == InFlight::DrawingBlueprint
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight != InFlight::Idle
    }

    pub fn credential_selected(&self) -> bool {
        self.credential_selected
    }

    // =============================================
    // 画像リスト
    // =============================================

    /// 画像を末尾に追加（既存のリストは置き換えない）
    pub fn add_images(&mut self, images: impl IntoIterator<Item = UploadedImage>) {
        let before = self.images.len();
        for image in images {
            self.images.push(image);
            self.image_ids.push(self.next_image_id);
            self.next_image_id += 1;
        }
        if self.images.len() != before {
            self.generation += 1;
        }
    }

    /// IDと画像の組（表示の並び順）
    pub fn image_entries(&self) -> impl Iterator<Item = (u64, &UploadedImage)> {
        self.image_ids.iter().copied().zip(self.images.iter())
    }

    /// IDで画像を1枚削除（見つからなければ何もしない）
    pub fn remove_image_by_id(&mut self, id: u64) -> Option<UploadedImage> {
        let index = self.image_ids.iter().position(|&i| i == id)?;
        self.remove_image(index)
    }

    /// 指定位置の画像を1枚だけ削除（範囲外は何もしない）
    pub fn remove_image(&mut self, index: usize) -> Option<UploadedImage> {
        if index >= self.images.len() {
            return None;
        }
        self.generation += 1;
        self.image_ids.remove(index);
        Some(self.images.remove(index))
    }

    /// 画像・解析結果・図面・エラーをすべて破棄
    ///
    /// 画像セットが変わった後に古い寸法や図面が残らないようにする
    pub fn clear_all(&mut self) {
        self.images.clear();
        self.image_ids.clear();
        self.analysis = None;
        self.blueprint = None;
        self.error = None;
        self.generation += 1;
    }

    /// 保存済みの解析結果を読み戻す（図面の寸法固定用）
    ///
    /// 実行中は何もしない
    pub fn restore_analysis(&mut self, analysis: AnalysisResult) -> bool {
        if self.is_busy() {
            return false;
        }
        self.analysis = Some(analysis);
        true
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // =============================================
    // 操作の実行
    // =============================================

    /// 操作ボタンが押せる状態か
    pub fn can_trigger(&self) -> bool {
        !self.images.is_empty() && !self.is_busy()
    }

    /// 操作を開始
    ///
    /// 画像なし・実行中は拒否する。寸法解析は図面も破棄する
    /// （新しい寸法と古い図面の食い違いを防ぐ）。
    pub fn begin(&mut self, op: Operation) -> Result<Ticket, Rejected> {
        if self.is_busy() {
            return Err(Rejected::Busy(self.in_flight));
        }
        if self.images.is_empty() {
            return Err(Rejected::NoImages);
        }

        self.in_flight = op.into();
        self.error = None;
        match op {
            Operation::Analyze => {
                self.analysis = None;
                self.blueprint = None;
            }
            Operation::Blueprint => {
                self.blueprint = None;
            }
        }

        Ok(Ticket {
            op,
            generation: self.generation,
        })
    }

    /// 実行券の発行後に画像リストが変わっていないか
    ///
    /// falseなら完了時の結果は破棄される
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation
    }

    fn settle(&mut self, ticket: Ticket) -> bool {
        if self.in_flight == InFlight::from(ticket.op) {
            self.in_flight = InFlight::Idle;
        }
        self.is_current(&ticket)
    }

    /// 寸法解析の完了
    ///
    /// 失敗時は解析結果を空のままにしてエラーを記録する
    pub fn finish_analysis(
        &mut self,
        ticket: Ticket,
        result: Result<AnalysisResult, String>,
    ) -> Option<ErrorDisposition> {
        if !self.settle(ticket) {
            return None;
        }
        match result {
            Ok(analysis) => {
                self.analysis = Some(analysis);
                None
            }
            Err(message) => Some(self.fail(message)),
        }
    }

    /// 図面生成の完了
    pub fn finish_blueprint(
        &mut self,
        ticket: Ticket,
        result: Result<BlueprintImage, String>,
    ) -> Option<ErrorDisposition> {
        if !self.settle(ticket) {
            return None;
        }
        match result {
            Ok(image) => {
                self.blueprint = Some(image);
                None
            }
            Err(message) => Some(self.fail(message)),
        }
    }

    /// エラーを記録し、認証切れならキー選択状態を解除する
    pub fn fail(&mut self, message: impl Into<String>) -> ErrorDisposition {
        let message = message.into();
        let disposition = if is_auth_expired(&message) {
            self.credential_selected = false;
            ErrorDisposition::Reauthenticate
        } else {
            ErrorDisposition::Shown
        };
        self.error = Some(message);
        disposition
    }

    /// APIキーの選択が完了した（起動時）
    pub fn select_credential(&mut self) {
        self.credential_selected = true;
    }

    /// 認証切れ後の再選択結果
    ///
    /// 成功すればエラーを消す。失敗ならエラーを残す。
    pub fn credential_reselected(&mut self, success: bool) {
        if success {
            self.credential_selected = true;
            self.error = None;
        }
    }
}
