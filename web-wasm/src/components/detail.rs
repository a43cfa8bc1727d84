//! 解析詳細ページ
//!
//! AnalysisDetailController の描画先。コア部分（ヘッダー/ステータス/指標/動画）と
//! レポート3パネルは別々のシグナルに載せ、レポートの失敗がコアに波及しないようにする。

use crate::api::FetchTransport;
use crate::host::BrowserHost;
use gait_ai_common::detail::{AnalysisDetailController, DetailAction, DetailView};
use gait_ai_common::download::DownloadKind;
use gait_ai_common::reports::{ReportKind, ReportPanel, ReportTabs};
use gait_ai_common::view::{AnalysisView, VideoPanel};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

/// 詳細画面の描画状態
#[derive(Clone, Copy)]
pub struct DetailSignals {
    fatal: RwSignal<Option<String>>,
    core: RwSignal<Option<AnalysisView>>,
    text: RwSignal<Option<ReportPanel>>,
    graphic: RwSignal<Option<ReportPanel>>,
    data: RwSignal<Option<ReportPanel>>,
    tabs: RwSignal<ReportTabs>,
}

impl DetailSignals {
    fn new() -> Self {
        Self {
            fatal: RwSignal::new(None),
            core: RwSignal::new(None),
            text: RwSignal::new(None),
            graphic: RwSignal::new(None),
            data: RwSignal::new(None),
            tabs: RwSignal::new(ReportTabs::default()),
        }
    }

    fn panel(&self, kind: ReportKind) -> RwSignal<Option<ReportPanel>> {
        match kind {
            ReportKind::Text => self.text,
            ReportKind::Graphic => self.graphic,
            ReportKind::Data => self.data,
        }
    }
}

impl DetailView for DetailSignals {
    fn show_fatal(&self, message: &str) {
        self.fatal.set(Some(message.to_string()));
    }

    fn show_core(&self, view: &AnalysisView) {
        self.core.set(Some(view.clone()));
    }

    fn show_report(&self, kind: ReportKind, panel: ReportPanel) {
        self.panel(kind).set(Some(panel));
    }

    fn show_tabs(&self, tabs: ReportTabs) {
        self.tabs.set(tabs);
    }
}

type BrowserDetail = AnalysisDetailController<FetchTransport, BrowserHost, DetailSignals>;

fn download_label(kind: DownloadKind) -> &'static str {
    match kind {
        DownloadKind::Original => "⬇️ Оригинальное видео",
        DownloadKind::Annotated => "⬇️ Видео с разметкой",
        DownloadKind::TextReport => "📄 Текстовый отчет",
        DownloadKind::GraphicReport => "📊 Графический отчет",
        DownloadKind::PoseData => "📁 Данные поз (H5)",
    }
}

#[component]
pub fn DetailPage(host: BrowserHost, path: String) -> impl IntoView {
    let signals = DetailSignals::new();
    let controller: StoredValue<Rc<BrowserDetail>, LocalStorage> = StoredValue::new_local(Rc::new(
        AnalysisDetailController::new(FetchTransport, host, signals),
    ));

    let c = controller.get_value();
    spawn_local(async move {
        c.mount(&path).await;
    });

    let dispatch = move |action: DetailAction| {
        let c = controller.get_value();
        spawn_local(async move {
            c.dispatch(action).await;
        });
    };

    let on_graphic_error = move || controller.with_value(|c| c.graphic_failed());

    move || {
        if let Some(message) = signals.fatal.get() {
            return view! { <FatalError message=message on_back=move || dispatch(DetailAction::GoBack) /> }
                .into_any();
        }

        let Some(analysis) = signals.core.get() else {
            return view! { <div class="loading">"Загрузка анализа..."</div> }.into_any();
        };

        view! {
            <div class="analysis-detail-container">
                <AnalysisHeader analysis={analysis.clone()} />
                <Metrics analysis={analysis.clone()} />

                <div class="video-grid">
                    <div class="video-card">
                        <h3>"Оригинальное видео"</h3>
                        <VideoPlayer panel={analysis.original_video.clone()} />
                        <div class="video-info">
                            <span>"Формат: "</span>
                            <span class="video-format">{analysis.original_format}</span>
                        </div>
                    </div>
                    <div class="video-card">
                        <h3>"Видео с разметкой"</h3>
                        <VideoPlayer panel={analysis.annotated_video.clone()} />
                    </div>
                </div>

                <div class="reports-section">
                    <div class="report-tabs">
                        {ReportKind::ALL
                            .into_iter()
                            .map(|kind| {
                                view! {
                                    <button
                                        class=move || {
                                            if signals.tabs.get().is_visible(kind) {
                                                "report-tab active"
                                            } else {
                                                "report-tab"
                                            }
                                        }
                                        on:click=move |_| dispatch(DetailAction::SwitchReport(kind))
                                    >
                                        {kind.tab_label()}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                    {ReportKind::ALL
                        .into_iter()
                        .map(|kind| {
                            view! {
                                <div
                                    class="report-panel"
                                    style:display=move || {
                                        if signals.tabs.get().is_visible(kind) { "block" } else { "none" }
                                    }
                                >
                                    {move || report_body(signals.panel(kind).get(), on_graphic_error)}
                                </div>
                            }
                        })
                        .collect_view()}
                </div>

                <div class="download-section">
                    <h3>"Скачать"</h3>
                    <div class="download-buttons">
                        {DownloadKind::ALL
                            .into_iter()
                            .map(|kind| {
                                view! {
                                    <button
                                        class="btn btn-secondary"
                                        on:click=move |_| dispatch(DetailAction::Download(kind))
                                    >
                                        {download_label(kind)}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>

                <div class="action-buttons">
                    {DetailAction::TOOLBAR
                        .into_iter()
                        .map(|(action, label)| {
                            view! {
                                <button class="btn" on:click=move |_| dispatch(action)>
                                    {label}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        }
        .into_any()
    }
}

#[component]
fn FatalError(message: String, on_back: impl Fn() + Send + Sync + 'static) -> impl IntoView {
    view! {
        <div class="fatal-error">
            <div class="fatal-icon">"❌"</div>
            <h2>"Ошибка загрузки анализа"</h2>
            <p>{message}</p>
            <button class="btn btn-primary" on:click=move |_| on_back()>
                "Вернуться назад"
            </button>
        </div>
    }
}

#[component]
fn AnalysisHeader(analysis: AnalysisView) -> impl IntoView {
    let header = analysis.header;
    let status = analysis.status;

    view! {
        <div class="analysis-header">
            <div class="analysis-meta">
                <div class="meta-item">
                    <span class="meta-label">"Лошадь"</span>
                    <span class="meta-value">"🐴 " {header.animal_name}</span>
                </div>
                <div class="meta-item">
                    <span class="meta-label">"Дата анализа"</span>
                    <span class="meta-value">"📅 " {header.date}</span>
                </div>
                <div class="meta-item">
                    <span class="meta-label">"Видео"</span>
                    <span class="meta-value">"🎥 " {header.video_filename}</span>
                </div>
            </div>
            <div class={status.css_class()}>
                <span>{status.icon()}</span>
                " "
                {status.label()}
            </div>
        </div>
    }
}

#[component]
fn Metrics(analysis: AnalysisView) -> impl IntoView {
    let probability = analysis.probability;
    let confidence = analysis.confidence;

    view! {
        <div class="metrics-grid">
            <div class="metric-card">
                <h3>"Вероятность хромоты"</h3>
                <div class={format!("metric-value probability-{}", probability.tier.as_str())}>
                    {probability.display()}
                </div>
                <div class="progress-bar">
                    <div
                        class="progress-fill"
                        style={format!("width: {}%", probability.bar_width())}
                    />
                </div>
                <p class="metric-description">{probability.description()}</p>
            </div>
            <div class="metric-card">
                <h3>"Уверенность анализа"</h3>
                <div class="metric-value">
                    <span class={confidence.dot_class()} />
                    {confidence.display()}
                </div>
                <p class="metric-description">{confidence.description()}</p>
            </div>
        </div>
    }
}

#[component]
fn VideoPlayer(panel: VideoPanel) -> impl IntoView {
    match panel {
        VideoPanel::Player { src } => view! {
            <video controls class="video-player">
                <source src=src type="video/mp4" />
                "Ваш браузер не поддерживает видео."
            </video>
        }
        .into_any(),
        VideoPanel::Missing { icon, message, note } => view! {
            <div class="video-placeholder">
                <div class="placeholder-icon">{icon}</div>
                <div>{message}</div>
                {note.map(|note| view! { <small class="placeholder-note">{note}</small> })}
            </div>
        }
        .into_any(),
    }
}

/// パネル本体（None は読み込み中）
fn report_body(panel: Option<ReportPanel>, on_image_error: impl Fn() + Copy + Send + Sync + 'static) -> AnyView {
    match panel {
        None => view! { <div class="loading">"Загрузка отчета..."</div> }.into_any(),
        Some(ReportPanel::Text(text)) => view! { <pre class="report-text">{text}</pre> }.into_any(),
        Some(ReportPanel::Image { src }) => view! {
            <img class="report-image" src=src alt="Графический отчет" on:error=move |_| on_image_error() />
        }
        .into_any(),
        Some(ReportPanel::Placeholder { icon, message }) => view! {
            <div class="report-placeholder">
                <div class="placeholder-icon">{icon}</div>
                <p>{message}</p>
            </div>
        }
        .into_any(),
    }
}
