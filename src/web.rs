//! Browser glue: canvas and HUD lookup, the requestAnimationFrame loop,
//! pointer and button listeners, and the canvas-backed [`Surface`].

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlImageElement, PointerEvent,
    window,
};

use crate::assets::{self, AssetSet, SharedImages, Sprite};
use crate::config::GameConfig;
use crate::error::MountError;
use crate::game::{FrameOutcome, Game, TapOutcome, Viewport};
use crate::host::{self, Host};
use crate::render::{self, Surface};

const CANVAS_ID: &str = "c";
const TIME_ID: &str = "time";
const SCORE_ID: &str = "score";
const MULT_ID: &str = "mult";
const START_ID: &str = "start";
const HAPTIC_ID: &str = "haptic";

struct HudElements {
    time: Option<Element>,
    score: Option<Element>,
    mult: Option<Element>,
}

struct App {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    game: Game<SmallRng>,
    viewport: Viewport,
    images: SharedImages,
    host: Box<dyn Host>,
    hud: HudElements,
    haptic_button: Option<Element>,
    loop_scheduled: bool,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static FRAME: RefCell<Option<Closure<dyn FnMut(f64)>>> = const { RefCell::new(None) };
}

pub(crate) fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Attach to the page. Calling it again once mounted is a no-op.
pub fn mount(config: GameConfig) -> Result<(), MountError> {
    if APP.with(|cell| cell.borrow().is_some()) {
        return Ok(());
    }
    config.validate()?;

    let win = window().ok_or(MountError::NoWindow)?;
    let doc = win.document().ok_or(MountError::NoDocument)?;
    let canvas = find_or_create_canvas(&doc)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(MountError::NoContext)?
        .dyn_into()
        .map_err(|_| MountError::NoContext)?;

    let host = host::detect_host();
    host.ready();
    host.expand();

    let images: SharedImages = Rc::new(RefCell::new(AssetSet::new()));
    assets::load_images(&config.assets, &images);

    let app = App {
        viewport: fit_canvas(&canvas),
        canvas: canvas.clone(),
        ctx,
        game: Game::new(config, SmallRng::from_entropy())?,
        images,
        host,
        hud: HudElements {
            time: doc.get_element_by_id(TIME_ID),
            score: doc.get_element_by_id(SCORE_ID),
            mult: doc.get_element_by_id(MULT_ID),
        },
        haptic_button: doc.get_element_by_id(HAPTIC_ID),
        loop_scheduled: false,
    };
    app.write_hud();
    app.write_haptic_label();
    APP.with(|cell| cell.replace(Some(app)));

    install_frame_callback();
    install_listeners(&win, &doc, &canvas)?;
    log::info!("mounted on #{CANVAS_ID}");
    Ok(())
}

fn find_or_create_canvas(doc: &Document) -> Result<HtmlCanvasElement, MountError> {
    if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        return el
            .dyn_into()
            .map_err(|_| MountError::MissingElement(CANVAS_ID));
    }
    let body = doc.body().ok_or(MountError::MissingElement("body"))?;
    let canvas: HtmlCanvasElement = doc
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| MountError::NoContext)?;
    canvas.set_id(CANVAS_ID);
    canvas
        .set_attribute("style", "display:block; width:100vw; height:100vh; touch-action:none;")
        .ok();
    body.append_child(&canvas)?;
    log::debug!("created #{CANVAS_ID}");
    Ok(canvas)
}

/// Match the backing store to the CSS size at an integer pixel ratio.
fn fit_canvas(canvas: &HtmlCanvasElement) -> Viewport {
    let dpr = window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .floor()
        .max(1.0);
    let width = (canvas.client_width() as f64 * dpr).floor();
    let height = (canvas.client_height() as f64 * dpr).floor();
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    Viewport::new(width, height, dpr)
}

fn install_listeners(
    win: &web_sys::Window,
    doc: &Document,
    canvas: &HtmlCanvasElement,
) -> Result<(), MountError> {
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            with_app(|app| {
                app.viewport = fit_canvas(&app.canvas);
                log::debug!("resized to {}x{}", app.viewport.width, app.viewport.height);
            });
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let canvas_down = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: PointerEvent| {
            canvas_down.set_pointer_capture(evt.pointer_id()).ok();
            let client = (evt.client_x() as f64, evt.client_y() as f64);
            with_app(|app| app.on_pointer(client));
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    if let Some(button) = doc.get_element_by_id(START_ID) {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            start_round();
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    if let Some(button) = doc.get_element_by_id(HAPTIC_ID) {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            toggle_haptics();
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn with_app<T>(f: impl FnOnce(&mut App) -> T) -> Option<T> {
    APP.with(|cell| cell.borrow_mut().as_mut().map(f))
}

// --- Frame loop -------------------------------------------------------------

fn install_frame_callback() {
    let closure = Closure::wrap(Box::new(move |ts: f64| {
        let keep_going = with_app(|app| app.on_frame(ts)).unwrap_or(false);
        if keep_going {
            request_frame();
        } else {
            with_app(|app| app.loop_scheduled = false);
        }
    }) as Box<dyn FnMut(f64)>);
    FRAME.with(|cell| cell.replace(Some(closure)));
}

fn request_frame() {
    FRAME.with(|cell| {
        if let (Some(cb), Some(w)) = (cell.borrow().as_ref(), window()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    });
}

impl App {
    /// Returns whether another frame should be scheduled.
    fn on_frame(&mut self, ts: f64) -> bool {
        match self.game.frame(ts) {
            FrameOutcome::Continue => {
                self.draw(ts);
                self.write_hud();
                true
            }
            FrameOutcome::Ended { score } => {
                self.draw(ts);
                self.write_hud();
                self.announce(score);
                false
            }
            FrameOutcome::Idle => false,
        }
    }

    fn on_pointer(&mut self, client: (f64, f64)) {
        let rect = self.canvas.get_bounding_client_rect();
        let point = self.viewport.to_canvas(client, (rect.left(), rect.top()));
        let outcome = self
            .game
            .tap(point, &self.viewport, now_ms(), self.host.as_ref());
        if let TapOutcome::Hit { .. } = outcome {
            self.write_hud();
        }
    }

    fn draw(&self, ts: f64) {
        let images = self.images.borrow();
        let mut surface = CanvasSurface {
            ctx: &self.ctx,
            images: &images,
        };
        render::render(
            &mut surface,
            self.game.holes(),
            &self.viewport,
            self.game.config(),
            ts,
        );
    }

    fn write_hud(&self) {
        let hud = self.game.hud();
        set_text(&self.hud.time, &hud.seconds_left.to_string());
        set_text(&self.hud.score, &hud.score.to_string());
        set_text(&self.hud.mult, &hud.multiplier);
    }

    fn write_haptic_label(&self) {
        let state = if self.game.haptics_enabled() { "ON" } else { "OFF" };
        set_text(&self.haptic_button, &format!("Haptics: {state}"));
    }

    fn announce(&self, score: u64) {
        let message = format!("Score: {score}");
        if self.host.show_popup("Game over", &message) {
            return;
        }
        if let Some(w) = window() {
            w.alert_with_message(&format!("Game over. {message}")).ok();
        }
    }
}

fn set_text(el: &Option<Element>, text: &str) {
    if let Some(el) = el {
        el.set_text_content(Some(text));
    }
}

// --- Public operations ------------------------------------------------------

pub fn start_round() {
    let schedule = with_app(|app| {
        app.game.start(app.host.as_ref());
        app.write_hud();
        let first = !app.loop_scheduled;
        app.loop_scheduled = true;
        first
    });
    match schedule {
        Some(true) => request_frame(),
        Some(false) => {}
        None => log::warn!("start requested before mount"),
    }
}

pub fn toggle_haptics() -> bool {
    with_app(|app| {
        let on = app.game.toggle_haptics();
        app.write_haptic_label();
        on
    })
    .unwrap_or(false)
}

pub fn score() -> u64 {
    with_app(|app| app.game.scores().score()).unwrap_or(0)
}

/// Swap the gameplay config, or mount with it if nothing is mounted yet.
#[cfg(feature = "serde_json")]
pub fn configure(config: GameConfig) -> Result<(), MountError> {
    let mut pending = Some(config);
    let updated = with_app(|app| match pending.take() {
        Some(config) => app.game.set_config(config),
        None => Ok(()),
    });
    match (updated, pending) {
        (Some(result), _) => {
            result?;
            log::info!("config updated, applies from next round");
            Ok(())
        }
        (None, Some(config)) => mount(config),
        (None, None) => Ok(()),
    }
}

// --- Canvas surface ---------------------------------------------------------

struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    images: &'a AssetSet<HtmlImageElement>,
}

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn draw_sprite(&mut self, sprite: Sprite, x: f64, y: f64, w: f64, h: f64) -> bool {
        match self.images.get(sprite) {
            Some(img) => self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
                .is_ok(),
            None => false,
        }
    }

    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: &str) {
        self.ctx.begin_path();
        self.ctx.ellipse(cx, cy, rx, ry, 0.0, 0.0, TAU).ok();
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, line_width: f64, color: &str) {
        self.ctx.begin_path();
        self.ctx.arc(cx, cy, r, 0.0, TAU).ok();
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
        self.ctx.stroke();
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }
}
