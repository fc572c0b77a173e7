//! Chat-platform host shell as an optional capability.
//!
//! Gameplay only talks to [`Host`]; when the page runs outside a mini-app
//! container [`NoHost`] swallows every call.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};

/// Fire-and-forget haptic cues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Haptic {
    /// Round started.
    SelectionChanged,
    /// Target hit.
    ImpactLight,
    /// Tap that hit nothing.
    NotificationWarning,
}

pub trait Host {
    fn ready(&self) {}
    fn expand(&self) {}
    fn haptic(&self, _cue: Haptic) {}
    /// Show a single-button modal. Returns false when the host has no popup
    /// support so the caller can fall back.
    fn show_popup(&self, _title: &str, _message: &str) -> bool {
        false
    }
}

/// Used when no host shell is present.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHost;

impl Host for NoHost {}

/// `window.Telegram.WebApp`, reached through reflection so a missing or
/// partial host object never throws.
pub struct TelegramHost {
    web_app: JsValue,
}

impl TelegramHost {
    pub fn detect() -> Option<Self> {
        let win = web_sys::window()?;
        let telegram = lookup(&win, "Telegram")?;
        let web_app = lookup(&telegram, "WebApp")?;
        Some(Self { web_app })
    }

    fn call(&self, target: &JsValue, method: &str, args: &[JsValue]) -> bool {
        let Some(func) = lookup(target, method) else {
            return false;
        };
        let Some(func) = func.dyn_ref::<Function>() else {
            return false;
        };
        let args: Array = args.iter().collect();
        match func.apply(target, &args) {
            Ok(_) => true,
            Err(err) => {
                log::debug!("host call {method} failed: {err:?}");
                false
            }
        }
    }
}

impl Host for TelegramHost {
    fn ready(&self) {
        self.call(&self.web_app, "ready", &[]);
    }

    fn expand(&self) {
        self.call(&self.web_app, "expand", &[]);
    }

    fn haptic(&self, cue: Haptic) {
        let Some(feedback) = lookup(&self.web_app, "HapticFeedback") else {
            return;
        };
        match cue {
            Haptic::SelectionChanged => self.call(&feedback, "selectionChanged", &[]),
            Haptic::ImpactLight => self.call(&feedback, "impactOccurred", &["light".into()]),
            Haptic::NotificationWarning => {
                self.call(&feedback, "notificationOccurred", &["warning".into()])
            }
        };
    }

    fn show_popup(&self, title: &str, message: &str) -> bool {
        let params = Object::new();
        let button = Object::new();
        let ok = Reflect::set(&button, &"type".into(), &"ok".into()).is_ok()
            && Reflect::set(&params, &"title".into(), &title.into()).is_ok()
            && Reflect::set(&params, &"message".into(), &message.into()).is_ok()
            && Reflect::set(
                &params,
                &"buttons".into(),
                &Array::of1(&button).into(),
            )
            .is_ok();
        ok && self.call(&self.web_app, "showPopup", &[params.into()])
    }
}

fn lookup(target: &JsValue, key: &str) -> Option<JsValue> {
    let value = Reflect::get(target, &JsValue::from_str(key)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

/// Telegram host if the page runs inside one, otherwise [`NoHost`].
pub fn detect_host() -> Box<dyn Host> {
    match TelegramHost::detect() {
        Some(host) => {
            log::info!("running inside mini-app host");
            Box::new(host)
        }
        None => {
            log::info!("no host shell detected");
            Box::new(NoHost)
        }
    }
}
