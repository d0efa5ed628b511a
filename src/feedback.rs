//! Haptic and on-screen feedback
//!
//! Fire-and-forget signals toward the host: vibration pulses and transient
//! toast notices. Nothing here returns a value or can fail.

use serde::{Deserialize, Serialize};

/// Physical impact strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactStyle {
    Light,
    Medium,
    Heavy,
}

/// Outcome-style notification pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

/// A haptic signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Haptic {
    Impact(ImpactStyle),
    Notification(NotificationKind),
}

impl Haptic {
    pub const LIGHT: Haptic = Haptic::Impact(ImpactStyle::Light);
    pub const MEDIUM: Haptic = Haptic::Impact(ImpactStyle::Medium);
    pub const HEAVY: Haptic = Haptic::Impact(ImpactStyle::Heavy);
    pub const SUCCESS: Haptic = Haptic::Notification(NotificationKind::Success);
    pub const WARNING: Haptic = Haptic::Notification(NotificationKind::Warning);
    pub const ERROR: Haptic = Haptic::Notification(NotificationKind::Error);
}

/// A transient notice shown to the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: NotificationKind,
    pub title: String,
    pub description: Option<String>,
}

impl Toast {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Where feedback goes
pub trait FeedbackSink {
    fn haptic(&mut self, signal: Haptic);
    fn notify(&mut self, toast: Toast);
}

/// Writes feedback to the log (native runs)
#[derive(Debug, Default)]
pub struct LogFeedback;

impl FeedbackSink for LogFeedback {
    fn haptic(&mut self, signal: Haptic) {
        log::trace!("haptic: {:?}", signal);
    }

    fn notify(&mut self, toast: Toast) {
        match toast.kind {
            NotificationKind::Error => log::warn!("{}", toast.title),
            _ => log::info!("{}", toast.title),
        }
    }
}

/// Keeps every signal in order (tests, replays)
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    pub haptics: Vec<Haptic>,
    pub toasts: Vec<Toast>,
}

impl FeedbackSink for RecordingFeedback {
    fn haptic(&mut self, signal: Haptic) {
        self.haptics.push(signal);
    }

    fn notify(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }
}

/// Drops haptics (player turned them off) but still shows notices
pub struct Muted<'a>(pub &'a mut dyn FeedbackSink);

impl FeedbackSink for Muted<'_> {
    fn haptic(&mut self, _signal: Haptic) {}

    fn notify(&mut self, toast: Toast) {
        self.0.notify(toast);
    }
}
