//! ターミナル用の Host / View 実装
//!
//! - 通知は標準出力、アラートは標準エラーへ
//! - 確認は dialoguer（`--yes` 指定時は常に承認）
//! - ダウンロードはキューに積み、コマンド側でディスクへ保存する
//! - アップロード進捗は indicatif のバー

use gait_ai_common::detail::DetailView;
use gait_ai_common::download::DownloadTarget;
use gait_ai_common::notify::{Notification, NotificationKind};
use gait_ai_common::platform::{Host, ShareData, ShareOutcome};
use gait_ai_common::reports::{ReportKind, ReportPanel, ReportTabs};
use gait_ai_common::upload::{FileSummary, UploadStage, UploadSummary, UploadView};
use gait_ai_common::view::{AnalysisView, VideoPanel};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;
use std::cell::RefCell;
use std::time::Duration;

/// ターミナルの Host
pub struct TerminalHost {
    base: Url,
    page_url: String,
    csrf_token: String,
    assume_yes: bool,
    downloads: RefCell<Vec<DownloadTarget>>,
    last_error: RefCell<Option<String>>,
    navigations: RefCell<Vec<String>>,
}

impl TerminalHost {
    pub fn new(base: Url, csrf_token: Option<String>, assume_yes: bool) -> Self {
        Self {
            page_url: base.to_string(),
            base,
            csrf_token: csrf_token.unwrap_or_default(),
            assume_yes,
            downloads: RefCell::default(),
            last_error: RefCell::default(),
            navigations: RefCell::default(),
        }
    }

    /// 共有用の「現在のページ」
    pub fn with_page(mut self, path: &str) -> Self {
        if let Ok(url) = self.base.join(path) {
            self.page_url = url.to_string();
        }
        self
    }

    /// キューに積まれたダウンロードを取り出す
    pub fn take_downloads(&self) -> Vec<DownloadTarget> {
        std::mem::take(&mut *self.downloads.borrow_mut())
    }

    /// 最後に出たエラー通知
    pub fn last_error(&self) -> Option<String> {
        self.last_error.borrow().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    fn absolute(&self, path: &str) -> String {
        self.base
            .join(path)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| path.to_string())
    }
}

impl Host for TerminalHost {
    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        dialoguer::Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                tracing::warn!("confirmation prompt failed: {}", e);
                false
            })
    }

    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                println!("{} {}", notification.kind.icon(), notification.message);
            }
            NotificationKind::Error => {
                eprintln!("{} {}", notification.kind.icon(), notification.message);
                *self.last_error.borrow_mut() = Some(notification.message);
            }
        }
    }

    fn navigate(&self, url: &str) {
        let target = self.absolute(url);
        println!("→ {}", target);
        self.navigations.borrow_mut().push(target);
    }

    fn go_back(&self) {
        tracing::debug!("go back is a no-op in the terminal");
    }

    fn print(&self) {
        tracing::debug!("print is a no-op in the terminal");
    }

    fn trigger_download(&self, target: &DownloadTarget) {
        self.downloads.borrow_mut().push(target.clone());
    }

    fn current_url(&self) -> String {
        self.page_url.clone()
    }

    fn csrf_token(&self) -> String {
        self.csrf_token.clone()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    async fn share(&self, _data: &ShareData) -> ShareOutcome {
        ShareOutcome::Unsupported
    }

    async fn copy_to_clipboard(&self, _text: &str) -> Result<(), String> {
        Err("clipboard is not available in the terminal".to_string())
    }
}

/// 詳細の表示先（標準出力）
#[derive(Default)]
pub struct TerminalDetailView {
    fatal: RefCell<Option<String>>,
}

impl TerminalDetailView {
    pub fn fatal(&self) -> Option<String> {
        self.fatal.borrow().clone()
    }
}

impl DetailView for TerminalDetailView {
    fn show_fatal(&self, message: &str) {
        eprintln!("❌ Ошибка загрузки анализа: {}", message);
        *self.fatal.borrow_mut() = Some(message.to_string());
    }

    fn show_core(&self, view: &AnalysisView) {
        print!("{}", format_core(view));
    }

    fn show_report(&self, kind: ReportKind, panel: ReportPanel) {
        println!("\n{}", kind.tab_label());
        println!("{}", format_panel(&panel));
    }

    // ターミナルでは全パネルを順に出すのでタブ状態は使わない
    fn show_tabs(&self, _tabs: ReportTabs) {}
}

/// コア部分（ヘッダー/ステータス/指標/動画）を文字列にする
pub fn format_core(view: &AnalysisView) -> String {
    let mut out = String::new();
    out.push_str(&format!("🐴 Лошадь: {}\n", view.header.animal_name));
    out.push_str(&format!("📅 Дата анализа: {}\n", view.header.date));
    out.push_str(&format!("🎥 Видео: {}\n\n", view.header.video_filename));
    out.push_str(&format!("{} {}\n\n", view.status.icon(), view.status.label()));
    out.push_str(&format!(
        "Вероятность хромоты: {} ({})\n",
        view.probability.display(),
        view.probability.description()
    ));
    out.push_str(&format!(
        "Уверенность анализа: {} ({})\n\n",
        view.confidence.display(),
        view.confidence.description()
    ));
    out.push_str(&format!(
        "Оригинальное видео: {} [{}]\n",
        format_video(&view.original_video),
        view.original_format
    ));
    out.push_str(&format!("Видео с разметкой: {}\n", format_video(&view.annotated_video)));
    out
}

fn format_video(panel: &VideoPanel) -> String {
    match panel {
        VideoPanel::Player { src } => src.clone(),
        VideoPanel::Missing { icon, message, note } => match note {
            Some(note) => format!("{} {} ({})", icon, message, note),
            None => format!("{} {}", icon, message),
        },
    }
}

fn format_panel(panel: &ReportPanel) -> String {
    match panel {
        ReportPanel::Text(text) => text.clone(),
        ReportPanel::Image { src } => src.clone(),
        ReportPanel::Placeholder { icon, message } => format!("{} {}", icon, message),
    }
}

/// アップロードの表示先（進捗バー）
#[derive(Default)]
pub struct TerminalUploadView {
    bar: RefCell<Option<ProgressBar>>,
}

impl TerminalUploadView {
    fn bar(&self) -> ProgressBar {
        self.bar
            .borrow_mut()
            .get_or_insert_with(|| {
                let bar = ProgressBar::new(100);
                if let Ok(style) =
                    ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}% {msg}")
                {
                    bar.set_style(style.progress_chars("=>-"));
                }
                bar
            })
            .clone()
    }
}

impl UploadView for TerminalUploadView {
    fn show_file_summary(&self, summary: Option<FileSummary>) {
        if let Some(summary) = summary {
            println!("🎥 {} ({})", summary.name, summary.size_label);
        }
    }

    fn clear_file_input(&self) {}

    fn focus_animal(&self) {}

    fn set_submit_busy(&self, busy: bool) {
        tracing::debug!("submit busy: {}", busy);
    }

    fn show_progress(&self, stage: Option<UploadStage>) {
        match stage {
            Some(stage) => {
                let bar = self.bar();
                bar.set_position(stage.percent() as u64);
                bar.set_message(stage.label());
            }
            None => {
                if let Some(bar) = self.bar.borrow_mut().take() {
                    bar.finish_and_clear();
                }
            }
        }
    }

    fn show_result(&self, summary: &UploadSummary) {
        println!("\nРезультаты анализа");
        println!("  ID видео:   {}", summary.video_id);
        println!("  ID анализа: {}", summary.analysis_id);
        println!("  Животное:   {}", summary.animal_name);
        println!("  Диагноз:    {}", summary.diagnosis);
        println!("  Хромота:    {}", summary.lameness_label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use gait_ai_common::AnalysisRecord;

    fn host(assume_yes: bool) -> TerminalHost {
        let base = Url::parse("http://localhost:8000/").unwrap();
        TerminalHost::new(base, Some("tok".into()), assume_yes)
    }

    #[test]
    fn test_assume_yes_confirms_without_prompt() {
        assert!(host(true).confirm("delete?"));
    }

    #[test]
    fn test_downloads_are_queued_and_taken_once() {
        let host = host(true);
        host.trigger_download(&DownloadTarget {
            url: "/media/a.mp4".into(),
            filename: "a.mp4".into(),
        });
        assert_eq!(host.take_downloads().len(), 1);
        assert!(host.take_downloads().is_empty());
    }

    #[test]
    fn test_last_error_tracks_error_notifications_only() {
        let host = host(true);
        host.notify(Notification::success("ok"));
        assert_eq!(host.last_error(), None);
        host.notify(Notification::error("Файл не найден"));
        assert_eq!(host.last_error().as_deref(), Some("Файл не найден"));
    }

    #[test]
    fn test_navigation_and_page_url_are_absolute() {
        let host = host(true).with_page("/analysis/42/");
        assert_eq!(host.current_url(), "http://localhost:8000/analysis/42/");
        host.navigate("/analysis/results/");
        assert_eq!(host.navigations(), ["http://localhost:8000/analysis/results/"]);
        assert_eq!(host.csrf_token(), "tok");
    }

    #[test]
    fn test_format_core_contains_all_regions() {
        let record = AnalysisRecord {
            animal_name: Some("Буран".into()),
            is_lame: Some(true),
            lameness_probability: Some(85.3),
            video_path: Some("/media/v.mp4".into()),
            ..Default::default()
        };
        let text = format_core(&AnalysisView::from_record(&record, Local::now()));

        assert!(text.contains("Буран"));
        assert!(text.contains("Обнаружена хромота"));
        assert!(text.contains("85.3%"));
        assert!(text.contains("/media/v.mp4 [MP4]"));
        assert!(text.contains("Размеченное видео не найдено"));
    }
}
