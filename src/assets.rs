//! Best-effort image loading. Each sprite slot fills in whenever its image
//! arrives; until then (or forever, on failure) the renderer draws primitives.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlImageElement};

use crate::config::AssetPaths;
use crate::error::AssetError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Hole,
    Target,
    Bonus,
    Hit,
}

impl Sprite {
    pub const ALL: [Sprite; 4] = [Sprite::Hole, Sprite::Target, Sprite::Bonus, Sprite::Hit];

    pub fn name(self) -> &'static str {
        match self {
            Sprite::Hole => "hole",
            Sprite::Target => "target",
            Sprite::Bonus => "bonus",
            Sprite::Hit => "hit",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    pub fn source(self, paths: &AssetPaths) -> &str {
        match self {
            Sprite::Hole => &paths.hole,
            Sprite::Target => &paths.target,
            Sprite::Bonus => &paths.bonus,
            Sprite::Hit => &paths.hit,
        }
    }
}

/// One optional slot per sprite.
#[derive(Debug)]
pub struct AssetSet<T> {
    slots: [Option<T>; 4],
}

impl<T> AssetSet<T> {
    pub fn new() -> Self {
        Self {
            slots: [None, None, None, None],
        }
    }

    pub fn insert(&mut self, sprite: Sprite, asset: T) {
        self.slots[sprite.index()] = Some(asset);
    }

    pub fn get(&self, sprite: Sprite) -> Option<&T> {
        self.slots[sprite.index()].as_ref()
    }

    pub fn loaded(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

impl<T> Default for AssetSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub type SharedImages = Rc<RefCell<AssetSet<HtmlImageElement>>>;

/// Kick off loading for every sprite. Returns immediately; failures are
/// logged and leave the slot empty.
pub fn load_images(paths: &AssetPaths, store: &SharedImages) {
    for sprite in Sprite::ALL {
        if let Err(err) = load_one(sprite, sprite.source(paths), store) {
            log::warn!("{err}");
        }
    }
}

fn load_one(
    sprite: Sprite,
    src: &str,
    store: &SharedImages,
) -> Result<HtmlImageElement, AssetError> {
    let img = HtmlImageElement::new().map_err(|_| AssetError::Element(sprite.name()))?;

    // One callback serves both `load` and `error`. Only one of them fires per
    // `src`, so the closure always runs exactly once and is freed afterwards.
    let settle = {
        let store = store.clone();
        let img = img.clone();
        let err = AssetError::Load {
            name: sprite.name(),
            src: src.to_owned(),
        };
        Closure::once_into_js(move |event: Event| {
            img.set_onload(None);
            img.set_onerror(None);
            if event.type_() == "load" {
                let mut set = store.borrow_mut();
                set.insert(sprite, img);
                log::debug!("loaded {} ({}/4)", sprite.name(), set.loaded());
            } else {
                log::warn!("{err}, using fallback shape");
            }
        })
    };
    img.set_onload(Some(settle.unchecked_ref()));
    img.set_onerror(Some(settle.unchecked_ref()));
    img.set_src(src);
    Ok(img)
}
