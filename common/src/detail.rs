//! 解析詳細コントローラー
//!
//! 処理の流れ:
//! 1. URLから解析IDを取得（失敗 → 画面全体をエラー表示）
//! 2. 詳細APIを1回だけ取得（失敗 → 画面全体をエラー表示）
//! 3. コア描画（ヘッダー/ステータス/指標/動画2枚）を完了させる
//! 4. レポート3種を読み込む（各パネルで独立して失敗）
//!
//! 読み込んだレコードは不変のスナップショットとして保持し、
//! ダウンロード/削除/共有/印刷はそれに対して行う。

use crate::download::{self, DownloadKind};
use crate::error::{Error, Result};
use crate::notify::Notification;
use crate::platform::{Host, HttpReply, ShareData, ShareOutcome, Transport};
use crate::reports::{
    graphic_report_panel, pose_data_panel, text_report_panel, ReportKind, ReportPanel, ReportTabs,
};
use crate::route::{delete_endpoint, detail_endpoint, extract_identifier, AnalysisId, RESULTS_PAGE};
use crate::types::{AnalysisRecord, DeleteResponse, DetailResponse};
use crate::view::AnalysisView;
use chrono::Local;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// 削除成功から一覧ページへ遷移するまでの待ち時間
pub const DELETE_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// 削除確認の文言
pub const DELETE_CONFIRMATION: &str =
    "Вы уверены, что хотите удалить этот анализ?\nЭто действие нельзя отменить.";

const NOT_LOADED: &str = "Данные анализа не загружены";

/// 詳細画面の描画先
pub trait DetailView {
    /// 画面全体をエラー表示に置き換える（「戻る」ボタン付き）
    fn show_fatal(&self, message: &str);

    /// ヘッダー/ステータス/指標/動画パネル
    fn show_core(&self, view: &AnalysisView);

    fn show_report(&self, kind: ReportKind, panel: ReportPanel);

    /// タブの選択状態とパネルの表示切替
    fn show_tabs(&self, tabs: ReportTabs);
}

/// ユーザー操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    SwitchReport(ReportKind),
    Download(DownloadKind),
    Delete,
    Share,
    Print,
    GoBack,
}

impl DetailAction {
    /// 画面下部の操作ボタン
    pub const TOOLBAR: [(DetailAction, &'static str); 4] = [
        (DetailAction::Share, "🔗 Поделиться"),
        (DetailAction::Print, "🖨️ Печать"),
        (DetailAction::Delete, "🗑️ Удалить"),
        (DetailAction::GoBack, "← Назад"),
    ];
}

#[derive(Debug, Default)]
struct DetailState {
    identifier: Option<AnalysisId>,
    record: Option<Rc<AnalysisRecord>>,
    tabs: ReportTabs,
    graphic_failed: bool,
}

/// 解析詳細コントローラー
pub struct AnalysisDetailController<T, H, V> {
    transport: T,
    host: H,
    view: V,
    state: RefCell<DetailState>,
}

impl<T, H, V> AnalysisDetailController<T, H, V>
where
    T: Transport,
    H: Host,
    V: DetailView,
{
    pub fn new(transport: T, host: H, view: V) -> Self {
        Self {
            transport,
            host,
            view,
            state: RefCell::new(DetailState::default()),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn identifier(&self) -> Option<AnalysisId> {
        self.state.borrow().identifier.clone()
    }

    pub fn record(&self) -> Option<Rc<AnalysisRecord>> {
        self.state.borrow().record.clone()
    }

    /// 画面の初期化（ID取得 → 詳細取得 → コア描画 → レポート読み込み）
    pub async fn mount(&self, location_path: &str) {
        let id = match extract_identifier(location_path) {
            Ok(id) => id,
            Err(e) => return self.fail(&e),
        };
        tracing::debug!("loading analysis {}", id);
        self.state.borrow_mut().identifier = Some(id.clone());

        let record = match self.load_record(&id).await {
            Ok(record) => record,
            Err(e) => return self.fail(&e),
        };

        self.render_core(&record);
        self.load_reports(&record).await;
    }

    /// 読み込み失敗の表示。致命的なものだけ画面全体を置き換える
    fn fail(&self, error: &Error) {
        if !error.is_fatal() {
            tracing::warn!("analysis load step failed: {}", error);
            self.host.notify(Notification::error(error.to_string()));
            return;
        }
        tracing::error!("analysis load failed: {}", error);
        self.host
            .notify(Notification::error("Ошибка загрузки данных анализа"));
        self.view.show_fatal(&error.to_string());
    }

    /// 詳細を取得して保持する
    pub async fn load_record(&self, id: &AnalysisId) -> Result<Rc<AnalysisRecord>> {
        let url = detail_endpoint(id);
        tracing::debug!("GET {}", url);
        let reply = self
            .transport
            .get(&url)
            .await
            .map_err(|e| Error::Load(e.to_string()))?;

        let record = Rc::new(decode_detail(&reply)?);
        let mut state = self.state.borrow_mut();
        state.identifier = Some(id.clone());
        state.record = Some(record.clone());
        Ok(record)
    }

    /// コア描画（通信なし）
    pub fn render_core(&self, record: &AnalysisRecord) {
        let view = AnalysisView::from_record(record, Local::now());
        self.view.show_core(&view);
        self.view.show_tabs(self.state.borrow().tabs);
    }

    /// レポート3種を読み込む。どれが失敗しても他に影響しない
    pub async fn load_reports(&self, record: &AnalysisRecord) {
        self.state.borrow_mut().graphic_failed = false;
        self.view
            .show_report(ReportKind::Graphic, graphic_report_panel(record));
        self.view.show_report(ReportKind::Data, pose_data_panel(record));

        let text = text_report_panel(&self.transport, record).await;
        self.view.show_report(ReportKind::Text, text);
    }

    /// グラフィックレポート画像の読み込み失敗（再試行しない）
    pub fn graphic_failed(&self) {
        {
            let mut state = self.state.borrow_mut();
            let has_image = state
                .record
                .as_ref()
                .is_some_and(|r| r.graphic_report_path().is_some());
            if !has_image || state.graphic_failed {
                return;
            }
            state.graphic_failed = true;
        }
        tracing::warn!("graphic report image failed to load");
        self.view
            .show_report(ReportKind::Graphic, ReportPanel::graphic_not_found());
    }

    /// タブ切替（再読み込みはしない）
    pub fn switch_report(&self, kind: ReportKind) {
        let tabs = {
            let mut state = self.state.borrow_mut();
            state.tabs.switch(kind);
            state.tabs
        };
        self.view.show_tabs(tabs);
    }

    /// ダウンロード開始
    pub fn download(&self, kind: DownloadKind) {
        let Some(record) = self.record() else {
            self.host.notify(Notification::error(NOT_LOADED));
            return;
        };

        match download::resolve(kind, &record) {
            Some(target) => {
                tracing::debug!("download {} -> {}", kind, target.filename);
                self.host.trigger_download(&target);
                self.host.notify(Notification::success(kind.started_message()));
            }
            None => {
                self.host.notify(Notification::error(kind.missing_message()));
            }
        }
    }

    /// 削除（確認ダイアログ → DELETE → 一覧ページへ）
    ///
    /// 失敗時は通知のみで、表示中の画面には手を付けない。
    pub async fn delete_record(&self) {
        let (Some(id), Some(_)) = (self.identifier(), self.record()) else {
            self.host.notify(Notification::error(NOT_LOADED));
            return;
        };

        if !self.host.confirm(DELETE_CONFIRMATION) {
            return;
        }

        match self.request_delete(&id).await {
            Ok(()) => {
                self.host.notify(Notification::success("Анализ удален"));
                self.host.sleep(DELETE_REDIRECT_DELAY).await;
                self.host.navigate(RESULTS_PAGE);
            }
            Err(e) => {
                tracing::error!("delete failed: {}", e);
                self.host.notify(Notification::error(e.to_string()));
            }
        }
    }

    async fn request_delete(&self, id: &AnalysisId) -> Result<()> {
        let url = delete_endpoint(id);
        let token = self.host.csrf_token();
        tracing::debug!("DELETE {}", url);

        let network_error = || Error::Action("Ошибка сети при удалении".to_string());
        let reply = self
            .transport
            .delete(&url, &token)
            .await
            .map_err(|_| network_error())?;
        let response: DeleteResponse =
            serde_json::from_str(&reply.body).map_err(|_| network_error())?;

        if response.success {
            Ok(())
        } else {
            Err(Error::Action(
                response.error_message().unwrap_or("Ошибка удаления").to_string(),
            ))
        }
    }

    /// 共有（ネイティブ共有 → 失敗/非対応ならURLをクリップボードへ）
    pub async fn share_record(&self) {
        let Some(record) = self.record() else {
            self.host.notify(Notification::error(NOT_LOADED));
            return;
        };

        let data = share_data(&record, self.host.current_url());
        match self.host.share(&data).await {
            ShareOutcome::Shared => {
                self.host
                    .notify(Notification::success("Результат успешно расшарен"));
            }
            ShareOutcome::Unsupported => self.copy_link(&data.url).await,
            ShareOutcome::Failed(reason) => {
                tracing::warn!("share failed: {}", reason);
                self.copy_link(&data.url).await;
            }
        }
    }

    async fn copy_link(&self, url: &str) {
        match self.host.copy_to_clipboard(url).await {
            Ok(()) => self
                .host
                .notify(Notification::success("Ссылка скопирована в буфер обмена")),
            Err(reason) => {
                tracing::warn!("clipboard write failed: {}", reason);
                self.host
                    .notify(Notification::error("Не удалось скопировать ссылку"));
            }
        }
    }

    /// 操作の振り分け
    pub async fn dispatch(&self, action: DetailAction) {
        match action {
            DetailAction::SwitchReport(kind) => self.switch_report(kind),
            DetailAction::Download(kind) => self.download(kind),
            DetailAction::Delete => self.delete_record().await,
            DetailAction::Share => self.share_record().await,
            DetailAction::Print => self.host.print(),
            DetailAction::GoBack => self.host.go_back(),
        }
    }
}

/// 詳細APIのレスポンスを解釈する
///
/// - 2xx以外: レスポンスのエラー文言、無ければ "HTTP ошибка: {status}"
/// - success が偽 / analysis が無い: エラー文言、無ければ汎用文言
pub fn decode_detail(reply: &HttpReply) -> Result<AnalysisRecord> {
    if !reply.ok() {
        let message = serde_json::from_str::<DetailResponse>(&reply.body)
            .ok()
            .and_then(|r| r.error_message().map(str::to_string))
            .unwrap_or_else(|| format!("HTTP ошибка: {}", reply.status));
        return Err(Error::Load(message));
    }

    let response: DetailResponse =
        serde_json::from_str(&reply.body).map_err(|_| Error::MalformedResponse)?;

    match response {
        DetailResponse {
            success: true,
            analysis: Some(record),
            ..
        } => Ok(record),
        other => Err(Error::Load(
            other
                .error_message()
                .unwrap_or("Ошибка загрузки данных")
                .to_string(),
        )),
    }
}

/// 共有テンプレート
pub fn share_data(record: &AnalysisRecord, url: String) -> ShareData {
    ShareData {
        title: format!(
            "Анализ походки: {}",
            record.animal_name().unwrap_or("Лошадь")
        ),
        text: format!("Вероятность хромоты: {}%", record.probability()),
        url,
    }
}
