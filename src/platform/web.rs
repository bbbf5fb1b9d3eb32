//! Browser implementations of the platform traits

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Performance};

use super::{AssetProvider, AssetStatus, Clock};

/// `performance.now()` in seconds (falls back to `Date.now()`)
pub struct PerformanceClock {
    performance: Option<Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

impl Default for PerformanceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for PerformanceClock {
    fn now(&self) -> f64 {
        let ms = match &self.performance {
            Some(p) => p.now(),
            None => js_sys::Date::now(),
        };
        ms / 1000.0
    }
}

/// Waits for the page's web fonts so kanji glyphs render on the first frame
pub struct FontAssets {
    status: Rc<RefCell<Option<AssetStatus>>>,
}

impl FontAssets {
    /// Start waiting on `document.fonts.ready`
    pub fn load(document: &Document) -> Self {
        let status = Rc::new(RefCell::new(None));

        match document.fonts().ready() {
            Ok(promise) => {
                let status = status.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = match JsFuture::from(promise).await {
                        Ok(_) => AssetStatus::Ready,
                        Err(e) => AssetStatus::Failed(format!("font loading failed: {:?}", e)),
                    };
                    *status.borrow_mut() = Some(result);
                });
            }
            Err(e) => {
                *status.borrow_mut() =
                    Some(AssetStatus::Failed(format!("document.fonts unavailable: {:?}", e)));
            }
        }

        Self { status }
    }
}

impl AssetProvider for FontAssets {
    fn poll_status(&mut self) -> Option<AssetStatus> {
        self.status.borrow_mut().take()
    }
}
