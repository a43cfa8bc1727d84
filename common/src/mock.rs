//! テスト用のモック実装

use crate::detail::DetailView;
use crate::download::DownloadTarget;
use crate::error::TransportError;
use crate::notify::Notification;
use crate::platform::{Host, HttpReply, SelectedFile, ShareData, ShareOutcome, Transport};
use crate::reports::{ReportKind, ReportPanel, ReportTabs};
use crate::upload::{FileSummary, UploadStage, UploadSummary, UploadView};
use crate::view::AnalysisView;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;

/// 記録されたリクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub url: String,
    pub csrf_token: Option<String>,
    pub animal: Option<String>,
}

/// URLごとに応答を返すだけのTransport
#[derive(Default)]
pub struct MockTransport {
    replies: HashMap<String, Result<HttpReply, TransportError>>,
    calls: RefCell<Vec<Call>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, url: &str, reply: HttpReply) -> Self {
        self.replies.insert(url.to_string(), Ok(reply));
        self
    }

    pub fn fail(mut self, url: &str, message: &str) -> Self {
        self.replies
            .insert(url.to_string(), Err(TransportError::new(message)));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn respond(&self, call: Call) -> Result<HttpReply, TransportError> {
        let url = call.url.clone();
        self.calls.borrow_mut().push(call);
        self.replies
            .get(&url)
            .cloned()
            .unwrap_or_else(|| Err(TransportError::new(format!("no mock for {}", url))))
    }
}

impl Transport for MockTransport {
    type File = ();

    async fn get(&self, url: &str) -> Result<HttpReply, TransportError> {
        self.respond(Call {
            method: "GET",
            url: url.to_string(),
            csrf_token: None,
            animal: None,
        })
    }

    async fn delete(&self, url: &str, csrf_token: &str) -> Result<HttpReply, TransportError> {
        self.respond(Call {
            method: "DELETE",
            url: url.to_string(),
            csrf_token: Some(csrf_token.to_string()),
            animal: None,
        })
    }

    async fn post_upload(
        &self,
        url: &str,
        animal: &str,
        _file: &SelectedFile<()>,
    ) -> Result<HttpReply, TransportError> {
        self.respond(Call {
            method: "POST",
            url: url.to_string(),
            csrf_token: None,
            animal: Some(animal.to_string()),
        })
    }
}

/// 呼び出しを記録するHost
pub struct MockHost {
    pub alerts: RefCell<Vec<String>>,
    pub confirms: RefCell<Vec<String>>,
    pub confirm_answer: Cell<bool>,
    pub notifications: RefCell<Vec<Notification>>,
    pub navigations: RefCell<Vec<String>>,
    pub downloads: RefCell<Vec<DownloadTarget>>,
    pub sleeps: RefCell<Vec<Duration>>,
    pub shared: RefCell<Vec<ShareData>>,
    pub share_outcome: RefCell<ShareOutcome>,
    pub clipboard: RefCell<Vec<String>>,
    pub clipboard_ok: Cell<bool>,
    pub csrf: RefCell<String>,
    pub printed: Cell<usize>,
    pub went_back: Cell<usize>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            alerts: RefCell::default(),
            confirms: RefCell::default(),
            confirm_answer: Cell::new(true),
            notifications: RefCell::default(),
            navigations: RefCell::default(),
            downloads: RefCell::default(),
            sleeps: RefCell::default(),
            shared: RefCell::default(),
            share_outcome: RefCell::new(ShareOutcome::Unsupported),
            clipboard: RefCell::default(),
            clipboard_ok: Cell::new(true),
            csrf: RefCell::new("csrf".to_string()),
            printed: Cell::new(0),
            went_back: Cell::new(0),
        }
    }
}

impl Host for MockHost {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.confirm_answer.get()
    }

    fn notify(&self, notification: Notification) {
        self.notifications.borrow_mut().push(notification);
    }

    fn navigate(&self, url: &str) {
        self.navigations.borrow_mut().push(url.to_string());
    }

    fn go_back(&self) {
        self.went_back.set(self.went_back.get() + 1);
    }

    fn print(&self) {
        self.printed.set(self.printed.get() + 1);
    }

    fn trigger_download(&self, target: &DownloadTarget) {
        self.downloads.borrow_mut().push(target.clone());
    }

    fn current_url(&self) -> String {
        "http://localhost:8000/analysis/42/".to_string()
    }

    fn csrf_token(&self) -> String {
        self.csrf.borrow().clone()
    }

    // 実時間は待たない
    async fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }

    async fn share(&self, data: &ShareData) -> ShareOutcome {
        self.shared.borrow_mut().push(data.clone());
        self.share_outcome.borrow().clone()
    }

    async fn copy_to_clipboard(&self, text: &str) -> Result<(), String> {
        if self.clipboard_ok.get() {
            self.clipboard.borrow_mut().push(text.to_string());
            Ok(())
        } else {
            Err("NotAllowedError".to_string())
        }
    }
}

/// 詳細画面の描画記録
#[derive(Default)]
pub struct MockDetailView {
    pub fatal: RefCell<Vec<String>>,
    pub cores: RefCell<Vec<AnalysisView>>,
    pub reports: RefCell<Vec<(ReportKind, ReportPanel)>>,
    pub tabs: RefCell<Vec<ReportTabs>>,
    pub order: RefCell<Vec<String>>,
}

impl DetailView for MockDetailView {
    fn show_fatal(&self, message: &str) {
        self.order.borrow_mut().push("fatal".into());
        self.fatal.borrow_mut().push(message.to_string());
    }

    fn show_core(&self, view: &AnalysisView) {
        self.order.borrow_mut().push("core".into());
        self.cores.borrow_mut().push(view.clone());
    }

    fn show_report(&self, kind: ReportKind, panel: ReportPanel) {
        self.order.borrow_mut().push(format!("report:{}", kind.as_str()));
        self.reports.borrow_mut().push((kind, panel));
    }

    fn show_tabs(&self, tabs: ReportTabs) {
        self.order.borrow_mut().push("tabs".into());
        self.tabs.borrow_mut().push(tabs);
    }
}

/// アップロード画面の描画記録
#[derive(Default)]
pub struct MockUploadView {
    pub summaries: RefCell<Vec<Option<FileSummary>>>,
    pub cleared: Cell<usize>,
    pub focused: Cell<usize>,
    pub busy: RefCell<Vec<bool>>,
    pub progress: RefCell<Vec<Option<UploadStage>>>,
    pub results: RefCell<Vec<UploadSummary>>,
}

impl UploadView for MockUploadView {
    fn show_file_summary(&self, summary: Option<FileSummary>) {
        self.summaries.borrow_mut().push(summary);
    }

    fn clear_file_input(&self) {
        self.cleared.set(self.cleared.get() + 1);
    }

    fn focus_animal(&self) {
        self.focused.set(self.focused.get() + 1);
    }

    fn set_submit_busy(&self, busy: bool) {
        self.busy.borrow_mut().push(busy);
    }

    fn show_progress(&self, stage: Option<UploadStage>) {
        self.progress.borrow_mut().push(stage);
    }

    fn show_result(&self, summary: &UploadSummary) {
        self.results.borrow_mut().push(summary.clone());
    }
}
