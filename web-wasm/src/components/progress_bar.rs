//! プログレスバーコンポーネント

use gait_ai_common::upload::UploadStage;
use leptos::prelude::*;

/// 段階ごとの固定パーセンテージを表示（None の間は非表示）
#[component]
pub fn ProgressBar(stage: ReadSignal<Option<UploadStage>>) -> impl IntoView {
    move || {
        stage.get().map(|stage| {
            view! {
                <div class="progress-section">
                    <div class="progress-bar">
                        <div
                            class="progress-fill"
                            style={format!("width: {}%", stage.percent())}
                        />
                    </div>
                    <p class="progress-text">{stage.label()}</p>
                </div>
            }
        })
    }
}
