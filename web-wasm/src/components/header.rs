//! ヘッダーコンポーネント

use gait_ai_common::route::{RESULTS_PAGE, UPLOAD_PAGE};
use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"🐴 Gait AI - Анализ походки"</h1>
            <nav class="header-nav">
                <a href=UPLOAD_PAGE>"Загрузить видео"</a>
                <a href=RESULTS_PAGE>"Мои анализы"</a>
            </nav>
        </header>
    }
}
