//! アップロードページ
//!
//! フォーム（動物の選択 + 動画ファイル）を UploadController に渡し、
//! コントローラーからの描画指示を UploadSignals で受け取る。

use crate::api::FetchTransport;
use crate::components::progress_bar::ProgressBar;
use crate::host::BrowserHost;
use gait_ai_common::platform::SelectedFile;
use gait_ai_common::upload::{
    FileSummary, UploadController, UploadStage, UploadSummary, UploadView, SUBMIT_BUSY_LABEL,
    SUBMIT_LABEL,
};
use gait_ai_common::IdValue;
use leptos::html::{Input, Select};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::Deserialize;
use std::rc::Rc;
use web_sys::{DragEvent, HtmlInputElement};

/// ページに埋め込まれた動物リストの要素ID（Django の json_script）
const ANIMAL_OPTIONS_ID: &str = "animal-options";

/// 動物の選択肢
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnimalOption {
    pub id: IdValue,
    pub name: String,
}

/// json_script の中身を読む（壊れていれば空）
pub fn parse_animal_options(json: &str) -> Vec<AnimalOption> {
    serde_json::from_str(json).unwrap_or_else(|e| {
        tracing::warn!("animal options unreadable: {}", e);
        Vec::new()
    })
}

fn load_animal_options() -> Vec<AnimalOption> {
    gloo::utils::document()
        .get_element_by_id(ANIMAL_OPTIONS_ID)
        .and_then(|el| el.text_content())
        .map(|json| parse_animal_options(&json))
        .unwrap_or_default()
}

/// アップロード画面の描画状態
#[derive(Clone, Copy)]
pub struct UploadSignals {
    file_summary: RwSignal<Option<FileSummary>>,
    busy: RwSignal<bool>,
    progress: RwSignal<Option<UploadStage>>,
    result: RwSignal<Option<UploadSummary>>,
    file_input: NodeRef<Input>,
    animal_select: NodeRef<Select>,
}

impl UploadSignals {
    fn new() -> Self {
        Self {
            file_summary: RwSignal::new(None),
            busy: RwSignal::new(false),
            progress: RwSignal::new(None),
            result: RwSignal::new(None),
            file_input: NodeRef::new(),
            animal_select: NodeRef::new(),
        }
    }
}

impl UploadView for UploadSignals {
    fn show_file_summary(&self, summary: Option<FileSummary>) {
        self.file_summary.set(summary);
    }

    fn clear_file_input(&self) {
        if let Some(input) = self.file_input.get_untracked() {
            input.set_value("");
        }
    }

    fn focus_animal(&self) {
        if let Some(select) = self.animal_select.get_untracked() {
            let _ = select.focus();
        }
    }

    fn set_submit_busy(&self, busy: bool) {
        self.busy.set(busy);
    }

    fn show_progress(&self, stage: Option<UploadStage>) {
        self.progress.set(stage);
    }

    fn show_result(&self, summary: &UploadSummary) {
        self.result.set(Some(summary.clone()));
    }
}

type BrowserUpload = UploadController<FetchTransport, BrowserHost, UploadSignals>;

#[component]
pub fn UploadPage(host: BrowserHost) -> impl IntoView {
    let signals = UploadSignals::new();
    let controller: StoredValue<Rc<BrowserUpload>, LocalStorage> =
        StoredValue::new_local(Rc::new(UploadController::new(FetchTransport, host, signals)));
    let animals = load_animal_options();
    let (is_dragover, set_is_dragover) = signal(false);

    let select_file = move |file: web_sys::File| {
        let selected = SelectedFile {
            name: file.name(),
            size: file.size() as u64,
            payload: file,
        };
        controller.with_value(|c| {
            c.handle_file(selected);
        });
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);

        let file = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            select_file(file);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    // ドロップエリアのクリックで隠しinputを開く
    let on_browse = move |_: leptos::ev::MouseEvent| {
        if let Some(input) = signals.file_input.get_untracked() {
            input.click();
        }
    };

    let on_file_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            select_file(file);
        }
    };

    let on_animal_change = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        controller.with_value(|c| c.set_animal(value));
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let c = controller.get_value();
        spawn_local(async move {
            c.submit().await;
        });
    };

    view! {
        <div class="upload-page">
            <form class="upload-form" on:submit=on_submit>
                <div class="form-group">
                    <label for="animalSelect">"Животное"</label>
                    <select
                        id="animalSelect"
                        node_ref=signals.animal_select
                        on:change=on_animal_change
                    >
                        <option value="">"-- Выберите животное --"</option>
                        {animals
                            .into_iter()
                            .map(|animal| {
                                view! { <option value={animal.id.to_string()}>{animal.name}</option> }
                            })
                            .collect_view()}
                    </select>
                </div>

                <div
                    class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
                    on:drop=on_drop
                    on:dragover=on_dragover
                    on:dragleave=on_dragleave
                    on:click=on_browse
                >
                    <div class="upload-icon">"🎥"</div>
                    <p>"Перетащите видео сюда или нажмите для выбора"</p>
                    <p class="text-muted">"Максимальный размер: 500MB"</p>
                </div>
                <input
                    type="file"
                    accept="video/*"
                    style="display: none"
                    node_ref=signals.file_input
                    on:change=on_file_change
                />

                {move || {
                    signals.file_summary.get().map(|summary| {
                        view! {
                            <div class="file-info">
                                <span class="file-name">{summary.name}</span>
                                <span class="file-size">{summary.size_label}</span>
                            </div>
                        }
                    })
                }}

                <button type="submit" class="btn btn-primary" disabled=move || signals.busy.get()>
                    {move || if signals.busy.get() { SUBMIT_BUSY_LABEL } else { SUBMIT_LABEL }}
                </button>
            </form>

            <ProgressBar stage=signals.progress.read_only() />

            {move || signals.result.get().map(|summary| view! { <ResultGrid summary=summary /> })}
        </div>
    }
}

/// 解析結果の概要
#[component]
fn ResultGrid(summary: UploadSummary) -> impl IntoView {
    let lameness_style = format!("color: {}", summary.lameness_color());
    let lameness_label = summary.lameness_label();

    view! {
        <div class="result-section">
            <h3>"Результаты анализа"</h3>
            <div class="result-grid">
                <div class="result-item">
                    <div class="result-label">"ID видео"</div>
                    <div class="result-value">{summary.video_id}</div>
                </div>
                <div class="result-item">
                    <div class="result-label">"ID анализа"</div>
                    <div class="result-value">{summary.analysis_id}</div>
                </div>
                <div class="result-item">
                    <div class="result-label">"Животное"</div>
                    <div class="result-value">{summary.animal_name}</div>
                </div>
                <div class="result-item">
                    <div class="result-label">"Диагноз"</div>
                    <div class="result-value">{summary.diagnosis}</div>
                </div>
                <div class="result-item">
                    <div class="result-label">"Хромота"</div>
                    <div class="result-value" style=lameness_style>{lameness_label}</div>
                </div>
            </div>
        </div>
    }
}
