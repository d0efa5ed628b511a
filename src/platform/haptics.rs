//! Feedback sink for the Telegram Mini App host
//!
//! Haptics go to `Telegram.WebApp.HapticFeedback` when the page runs inside
//! Telegram and are silently dropped elsewhere. Notices are held as a
//! short-lived banner the HUD draws.

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use crate::feedback::{FeedbackSink, Haptic, ImpactStyle, NotificationKind, Toast};

/// How long a notice stays on screen (ms)
const BANNER_MS: f64 = 2000.0;

fn host_haptics() -> Option<JsValue> {
    let window = web_sys::window()?;
    let telegram = Reflect::get(&window, &"Telegram".into()).ok()?;
    let app = Reflect::get(&telegram, &"WebApp".into()).ok()?;
    let haptics = Reflect::get(&app, &"HapticFeedback".into()).ok()?;
    (!haptics.is_undefined() && !haptics.is_null()).then_some(haptics)
}

fn call(target: &JsValue, method: &str, arg: &str) -> Result<(), JsValue> {
    let f: Function = Reflect::get(target, &method.into())?.dyn_into()?;
    f.call1(target, &arg.into())?;
    Ok(())
}

#[derive(Debug, Default)]
pub struct WebFeedback {
    banner: Option<(Toast, f64)>,
}

impl WebFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notice to show at `now_ms`, if one is still live
    pub fn banner(&self, now_ms: f64) -> Option<&Toast> {
        self.banner
            .as_ref()
            .filter(|(_, until)| now_ms < *until)
            .map(|(toast, _)| toast)
    }
}

impl FeedbackSink for WebFeedback {
    fn haptic(&mut self, signal: Haptic) {
        let Some(target) = host_haptics() else { return };
        let (method, arg) = match signal {
            Haptic::Impact(style) => (
                "impactOccurred",
                match style {
                    ImpactStyle::Light => "light",
                    ImpactStyle::Medium => "medium",
                    ImpactStyle::Heavy => "heavy",
                },
            ),
            Haptic::Notification(kind) => (
                "notificationOccurred",
                match kind {
                    NotificationKind::Success => "success",
                    NotificationKind::Warning => "warning",
                    NotificationKind::Error => "error",
                },
            ),
        };
        if let Err(e) = call(&target, method, arg) {
            log::debug!("haptic {} failed: {:?}", method, e);
        }
    }

    fn notify(&mut self, toast: Toast) {
        log::info!("{}", toast.title);
        self.banner = Some((toast, js_sys::Date::now() + BANNER_MS));
    }
}
