//! トースト通知
//!
//! 表示は常に最新の1件のみ。フェード中は `show` クラスを外して透明度を落とす。

use gait_ai_common::notify::{ToastPhase, Toaster};
use leptos::prelude::*;

#[component]
pub fn ToastView(toaster: RwSignal<Toaster>) -> impl IntoView {
    move || {
        toaster.with(|t| t.current().cloned()).map(|toast| {
            let kind = toast.notification.kind;
            let class = match toast.phase {
                ToastPhase::Visible => format!("{} show", kind.css_class()),
                ToastPhase::Fading => kind.css_class().to_string(),
            };
            view! {
                <div class=class role="status">
                    <span class="toast-icon">{kind.icon()}</span>
                    <span class="toast-message">{toast.notification.message}</span>
                </div>
            }
        })
    }
}
