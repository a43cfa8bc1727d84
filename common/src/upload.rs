//! アップロードコントローラー
//!
//! 状態遷移: Idle → Validating → Uploading → Processing → Complete → (遅延後)一覧へ遷移
//!                                     └──────────→ Error → Idle
//!
//! 進捗率は実測値ではなく段階ごとの固定値（25% / 75% / 100%）。
//! 失敗は記憶しない（フォームはそのまま残り、再送信できる）。

use crate::error::{Error, Result, ValidationError};
use crate::platform::{Host, HttpReply, SelectedFile, Transport};
use crate::route::{RESULTS_PAGE, UPLOAD_ENDPOINT};
use crate::types::{non_empty, UploadResponse};
use serde::Serialize;
use std::cell::RefCell;
use std::time::Duration;

/// ファイルサイズ上限（500 MiB）
pub const MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// 完了表示から結果表示までの待ち時間
pub const RESULT_DELAY: Duration = Duration::from_millis(1000);

/// 結果表示から一覧ページへ遷移するまでの待ち時間
pub const REDIRECT_DELAY: Duration = Duration::from_millis(3000);

/// 送信ボタンの通常表示
pub const SUBMIT_LABEL: &str = "🚀 Запустить ML анализ";

/// 送信ボタンの送信中表示
pub const SUBMIT_BUSY_LABEL: &str = "⏳ Загрузка...";

/// 送信の段階
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStage {
    #[default]
    Idle,
    Validating,
    Uploading,
    /// レスポンス受信後の解釈中（擬似的な段階）
    Processing,
    Complete,
    Error,
}

impl UploadStage {
    /// 段階ごとの固定の進捗率
    pub fn percent(&self) -> u8 {
        match self {
            UploadStage::Idle | UploadStage::Validating | UploadStage::Error => 0,
            UploadStage::Uploading => 25,
            UploadStage::Processing => 75,
            UploadStage::Complete => 100,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UploadStage::Idle | UploadStage::Error => "",
            UploadStage::Validating => "Проверка данных...",
            UploadStage::Uploading => "Загрузка файла на сервер...",
            UploadStage::Processing => "Обработка ответа сервера...",
            UploadStage::Complete => "✅ Анализ завершен!",
        }
    }
}

/// 選択ファイルの概要表示
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub name: String,
    pub size_label: String,
}

impl FileSummary {
    pub fn of<F>(file: &SelectedFile<F>) -> Self {
        Self {
            name: file.name.clone(),
            size_label: format_size_mb(file.size),
        }
    }
}

/// バイト数をMB（小数2桁）で表示
pub fn format_size_mb(size: u64) -> String {
    format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
}

/// 解析結果の概要
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    pub video_id: String,
    pub analysis_id: String,
    pub animal_name: String,
    pub diagnosis: String,
    pub is_lame: bool,
}

impl UploadSummary {
    pub fn from_response(response: &UploadResponse) -> Self {
        let id_or_na = |id: &Option<crate::types::IdValue>| {
            id.as_ref()
                .map(|v| v.to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Н/Д".to_string())
        };

        Self {
            video_id: id_or_na(&response.video_id),
            analysis_id: id_or_na(&response.analysis_id),
            animal_name: non_empty(&response.animal_name).unwrap_or("Авто").to_string(),
            diagnosis: non_empty(&response.diagnosis).unwrap_or("Норма").to_string(),
            is_lame: response.is_lame.unwrap_or(false),
        }
    }

    pub fn lameness_label(&self) -> &'static str {
        if self.is_lame { "ДА ⚠️" } else { "НЕТ ✅" }
    }

    pub fn lameness_color(&self) -> &'static str {
        if self.is_lame { "#dc3545" } else { "#28a745" }
    }
}

/// アップロード画面の描画先
pub trait UploadView {
    /// ファイル名とサイズの表示（None で非表示）
    fn show_file_summary(&self, summary: Option<FileSummary>);

    /// ファイル入力欄のクリア
    fn clear_file_input(&self);

    /// 動物選択欄へフォーカス
    fn focus_animal(&self);

    /// 送信ボタンの無効化とラベル切替
    fn set_submit_busy(&self, busy: bool);

    /// 進捗表示（None で非表示）
    fn show_progress(&self, stage: Option<UploadStage>);

    fn show_result(&self, summary: &UploadSummary);
}

/// アップロードの一時状態（永続化しない）
#[derive(Debug, Clone)]
pub struct UploadJobState<F> {
    pub file: Option<SelectedFile<F>>,
    pub animal: String,
    pub stage: UploadStage,
    pub result: Option<UploadSummary>,
}

impl<F> Default for UploadJobState<F> {
    fn default() -> Self {
        Self {
            file: None,
            animal: String::new(),
            stage: UploadStage::Idle,
            result: None,
        }
    }
}

/// アップロードコントローラー
pub struct UploadController<T: Transport, H, V> {
    transport: T,
    host: H,
    view: V,
    state: RefCell<UploadJobState<T::File>>,
}

impl<T, H, V> UploadController<T, H, V>
where
    T: Transport,
    H: Host,
    V: UploadView,
{
    pub fn new(transport: T, host: H, view: V) -> Self {
        Self {
            transport,
            host,
            view,
            state: RefCell::new(UploadJobState::default()),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn stage(&self) -> UploadStage {
        self.state.borrow().stage
    }

    pub fn has_file(&self) -> bool {
        self.state.borrow().file.is_some()
    }

    pub fn result(&self) -> Option<UploadSummary> {
        self.state.borrow().result.clone()
    }

    pub fn set_animal(&self, animal: impl Into<String>) {
        self.state.borrow_mut().animal = animal.into();
    }

    /// ファイル選択（クリック選択とドラッグ&ドロップ共通の入口）
    ///
    /// 概要は常に一度表示し、上限超過なら選択ごと取り消す。
    pub fn handle_file(&self, file: SelectedFile<T::File>) -> bool {
        self.view.show_file_summary(Some(FileSummary::of(&file)));

        if file.size > MAX_FILE_SIZE {
            tracing::warn!("file rejected: {} ({} bytes)", file.name, file.size);
            self.state.borrow_mut().file = None;
            self.view.clear_file_input();
            self.view.show_file_summary(None);
            self.host.alert(&ValidationError::FileTooLarge.to_string());
            return false;
        }

        tracing::debug!("file selected: {} ({} bytes)", file.name, file.size);
        self.state.borrow_mut().file = Some(file);
        true
    }

    fn set_stage(&self, stage: UploadStage) {
        self.state.borrow_mut().stage = stage;
        if stage.percent() > 0 {
            self.view.show_progress(Some(stage));
        }
    }

    /// 送信前の必須チェック（動物 → ファイルの順）
    fn validate(&self) -> std::result::Result<(String, SelectedFile<T::File>), ValidationError> {
        let state = self.state.borrow();
        if state.animal.is_empty() {
            return Err(ValidationError::MissingAnimal);
        }
        let file = state.file.clone().ok_or(ValidationError::MissingFile)?;
        Ok((state.animal.clone(), file))
    }

    /// 送信
    pub async fn submit(&self) {
        self.set_stage(UploadStage::Validating);
        let (animal, file) = match self.validate() {
            Ok(fields) => fields,
            Err(e) => {
                self.set_stage(UploadStage::Idle);
                self.host.alert(&e.to_string());
                if e == ValidationError::MissingAnimal {
                    self.view.focus_animal();
                }
                return;
            }
        };

        self.view.set_submit_busy(true);
        self.set_stage(UploadStage::Uploading);

        match self.send(&animal, &file).await {
            Ok(summary) => self.complete(summary).await,
            Err(e) => {
                tracing::error!("upload failed: {}", e);
                self.set_stage(UploadStage::Error);
                self.view.set_submit_busy(false);
                self.view.show_progress(None);
                self.set_stage(UploadStage::Idle);
                self.host.alert(&format!("❌ Ошибка: {}", e));
            }
        }
    }

    async fn send(&self, animal: &str, file: &SelectedFile<T::File>) -> Result<UploadSummary> {
        tracing::debug!("POST {} ({})", UPLOAD_ENDPOINT, file.name);
        let reply = self
            .transport
            .post_upload(UPLOAD_ENDPOINT, animal, file)
            .await
            .map_err(|e| Error::Action(e.to_string()))?;

        self.set_stage(UploadStage::Processing);
        decode_upload(&reply)
    }

    async fn complete(&self, summary: UploadSummary) {
        self.set_stage(UploadStage::Complete);
        self.host.sleep(RESULT_DELAY).await;

        self.view.show_result(&summary);
        self.view.show_progress(None);
        self.state.borrow_mut().result = Some(summary);

        self.host.sleep(REDIRECT_DELAY).await;
        self.host.navigate(RESULTS_PAGE);
    }
}

/// アップロードAPIのレスポンスを解釈する
///
/// 本文はまずテキストとして受け、JSONとして読めなければ
/// 「サーバーが不正な応答を返した」として扱う。
pub fn decode_upload(reply: &HttpReply) -> Result<UploadSummary> {
    let response: UploadResponse =
        serde_json::from_str(&reply.body).map_err(|_| Error::MalformedResponse)?;

    if !response.success {
        return Err(Error::Action(
            response.error_message().unwrap_or("Ошибка сервера").to_string(),
        ));
    }
    Ok(UploadSummary::from_response(&response))
}
