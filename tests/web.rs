// Browser tests; run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use burrow_tap::host::{Haptic, Host, NoHost, TelegramHost};
use js_sys::{Function, JSON, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn no_telegram_object_outside_mini_app() {
    assert!(TelegramHost::detect().is_none());
}

// Installs a recording `window.Telegram.WebApp` and removes it on drop.
struct FakeTelegram {
    calls: JsValue,
}

impl FakeTelegram {
    fn install() -> Self {
        let setup = Function::new_no_args(
            r#"
            const calls = [];
            const rec = (name) => (...args) => { calls.push([name, ...args]); };
            window.Telegram = {
                WebApp: {
                    ready: rec("ready"),
                    expand: rec("expand"),
                    showPopup: rec("showPopup"),
                    HapticFeedback: {
                        selectionChanged: rec("selectionChanged"),
                        impactOccurred: rec("impactOccurred"),
                        notificationOccurred: rec("notificationOccurred"),
                    },
                },
            };
            return calls;
            "#,
        );
        let calls = setup.call0(&JsValue::NULL).unwrap();
        Self { calls }
    }

    fn recorded(&self) -> String {
        JSON::stringify(&self.calls).unwrap().into()
    }
}

impl Drop for FakeTelegram {
    fn drop(&mut self) {
        let win = web_sys::window().unwrap();
        Reflect::delete_property(&win, &JsValue::from_str("Telegram")).unwrap();
    }
}

#[wasm_bindgen_test]
fn telegram_host_forwards_every_call() {
    let fake = FakeTelegram::install();
    let host = TelegramHost::detect().expect("fake WebApp should be detected");

    host.ready();
    host.expand();
    host.haptic(Haptic::SelectionChanged);
    host.haptic(Haptic::ImpactLight);
    host.haptic(Haptic::NotificationWarning);
    assert!(host.show_popup("Game over", "Score: 30"));

    assert_eq!(
        fake.recorded(),
        concat!(
            r#"[["ready"],["expand"],["selectionChanged"],"#,
            r#"["impactOccurred","light"],["notificationOccurred","warning"],"#,
            r#"["showPopup",{"title":"Game over","message":"Score: 30","buttons":[{"type":"ok"}]}]]"#,
        )
    );
}

#[wasm_bindgen_test]
fn telegram_without_haptics_is_ignored() {
    let fake = FakeTelegram::install();
    let win = web_sys::window().unwrap();
    let telegram = Reflect::get(&win, &"Telegram".into()).unwrap();
    let web_app = Reflect::get(&telegram, &"WebApp".into()).unwrap();
    Reflect::delete_property(web_app.unchecked_ref(), &"HapticFeedback".into()).unwrap();

    let host = TelegramHost::detect().unwrap();
    host.haptic(Haptic::ImpactLight);
    host.ready();
    assert_eq!(fake.recorded(), r#"[["ready"]]"#);
}

#[wasm_bindgen_test]
fn no_host_declines_popup() {
    assert!(!NoHost.show_popup("Game over", "Score: 0"));
}

#[wasm_bindgen_test]
fn start_game_mounts_and_scores_zero() {
    burrow_tap::start_game().unwrap();
    assert_eq!(burrow_tap::score(), 0.0);
    let document = web_sys::window().unwrap().document().unwrap();
    assert!(document.get_element_by_id("c").is_some());
}

#[wasm_bindgen_test]
fn toggle_flips_state() {
    burrow_tap::start_game().unwrap();
    let first = burrow_tap::toggle_haptics();
    assert_ne!(first, burrow_tap::toggle_haptics());
}
