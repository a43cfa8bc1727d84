//! トースト通知
//!
//! 同時に表示されるのは常に1件だけ。新しい通知は表示中のものを置き換える（キューなし）。
//! 表示3秒 → フェード0.3秒 → 消去。置き換えられた通知のタイマーは
//! ID不一致で無視されるため、後続の通知に影響しない。

use serde::Serialize;
use std::time::Duration;

/// 表示時間
pub const DISPLAY_DURATION: Duration = Duration::from_millis(3000);

/// フェードアウト時間
pub const FADE_DURATION: Duration = Duration::from_millis(300);

/// 通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Success => "✅",
            NotificationKind::Error => "❌",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "toast toast-success",
            NotificationKind::Error => "toast toast-error",
        }
    }
}

/// 通知
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// トーストの表示段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Fading,
}

/// 表示中のトースト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
    pub phase: ToastPhase,
}

/// トーストの状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toaster {
    next_id: u64,
    current: Option<Toast>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// 通知を表示し、タイマー照合用のIDを返す
    pub fn show(&mut self, notification: Notification) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.current = Some(Toast {
            id,
            notification,
            phase: ToastPhase::Visible,
        });
        id
    }

    /// 表示時間経過。対象が表示中ならフェードへ
    pub fn begin_fade(&mut self, id: u64) -> bool {
        match self.current.as_mut() {
            Some(toast) if toast.id == id && toast.phase == ToastPhase::Visible => {
                toast.phase = ToastPhase::Fading;
                true
            }
            _ => false,
        }
    }

    /// フェード完了。対象が現在のトーストなら消去
    pub fn dismiss(&mut self, id: u64) -> bool {
        match &self.current {
            Some(toast) if toast.id == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_then_fade_then_dismiss() {
        let mut toaster = Toaster::new();
        let id = toaster.show(Notification::success("Анализ удален"));

        assert_eq!(toaster.current().unwrap().phase, ToastPhase::Visible);
        assert!(toaster.begin_fade(id));
        assert_eq!(toaster.current().unwrap().phase, ToastPhase::Fading);
        assert!(toaster.dismiss(id));
        assert!(toaster.current().is_none());
    }

    #[test]
    fn test_new_notification_replaces_current() {
        let mut toaster = Toaster::new();
        let first = toaster.show(Notification::success("первое"));
        let second = toaster.show(Notification::error("второе"));

        let current = toaster.current().unwrap();
        assert_eq!(current.id, second);
        assert_eq!(current.notification.message, "второе");

        // 置き換えられた通知のタイマーは何もしない
        assert!(!toaster.begin_fade(first));
        assert!(!toaster.dismiss(first));
        assert_eq!(toaster.current().unwrap().id, second);
        assert_eq!(toaster.current().unwrap().phase, ToastPhase::Visible);
    }

    #[test]
    fn test_kind_presentation() {
        assert_eq!(NotificationKind::Success.icon(), "✅");
        assert_eq!(NotificationKind::Error.icon(), "❌");
        assert!(NotificationKind::Error.css_class().contains("toast-error"));
    }

    #[test]
    fn test_durations() {
        assert_eq!(DISPLAY_DURATION.as_millis(), 3000);
        assert_eq!(FADE_DURATION.as_millis(), 300);
    }
}
