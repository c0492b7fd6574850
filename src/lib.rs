#![cfg(target_arch = "wasm32")]
use parallax_core::{Callbacks, Options};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod dom;
mod host;

use host::WebHost;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(constants::LOG_LEVEL).ok();
    log::info!("parallax-web loaded");
    Ok(())
}

/// Parallax media bound to one host element.
///
/// ```js
/// const p = new Parallax(el, { height: 400, speed: 0.6, src: "sky.jpg" },
///                        (percent) => console.log(percent));
/// p.height = 600;
/// p.destroy();
/// ```
#[wasm_bindgen]
pub struct Parallax {
    inner: parallax_core::Parallax<WebHost>,
    host: web::HtmlElement,
}

#[wasm_bindgen]
impl Parallax {
    /// `options` is `{ height?, speed?, src? }`. `media` replaces the default
    /// `<img>`; `content(percent, contentElement)` runs after each update.
    #[wasm_bindgen(constructor)]
    pub fn new(
        host: web::HtmlElement,
        options: JsValue,
        on_scroll: Option<js_sys::Function>,
        media: Option<web::HtmlElement>,
        content: Option<js_sys::Function>,
    ) -> Result<Parallax, JsValue> {
        mount(host, options, on_scroll, media, content)
            .map_err(|e| JsValue::from_str(&format!("{e:#}")))
    }

    #[wasm_bindgen(getter, js_name = percentScrolled)]
    pub fn percent_scrolled(&self) -> f64 {
        self.inner.percent_scrolled()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.config().height()
    }

    #[wasm_bindgen(setter)]
    pub fn set_height(&mut self, height: f64) {
        // a rejected height is logged by the core and leaves the box as is
        if self.inner.set_height(height).is_ok() {
            dom::sync_host_height(&self.host, height);
        }
    }

    #[wasm_bindgen(getter)]
    pub fn speed(&self) -> f64 {
        self.inner.config().speed()
    }

    #[wasm_bindgen(setter)]
    pub fn set_speed(&mut self, speed: f64) {
        // a rejected speed is logged by the core; the previous one stays
        if self.inner.set_speed(speed).is_err() {
            log::debug!("[parallax] speed is still {}", self.inner.config().speed());
        }
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.inner.is_active()
    }

    pub fn destroy(&mut self) {
        self.inner.deactivate();
    }
}

fn mount(
    host: web::HtmlElement,
    options: JsValue,
    on_scroll: Option<js_sys::Function>,
    media: Option<web::HtmlElement>,
    content: Option<js_sys::Function>,
) -> anyhow::Result<Parallax> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let options: Options = if options.is_undefined() || options.is_null() {
        Options::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| anyhow::anyhow!("invalid options: {e}"))?
    };
    let config = options.to_config();
    let markup = dom::build(
        &document,
        &host,
        config.height(),
        options.src.as_deref(),
        media,
    )?;

    let mut callbacks = Callbacks::new();
    if let Some(f) = on_scroll {
        callbacks = callbacks.on_scroll(move |percent| {
            if let Err(e) = f.call1(&JsValue::NULL, &JsValue::from_f64(percent)) {
                log::error!("scroll callback error: {:?}", e);
            }
        });
    }
    if let Some(f) = content {
        let el = markup.content.clone();
        callbacks = callbacks.on_content(move |percent| {
            if let Err(e) = f.call2(&JsValue::NULL, &JsValue::from_f64(percent), &el) {
                log::error!("content callback error: {:?}", e);
            }
        });
    }

    let mut inner = parallax_core::Parallax::new(Rc::new(WebHost::new(window)), config);
    inner.activate(host.clone(), markup.media, callbacks);
    log::debug!("[parallax] mounted at height {}", config.height());
    Ok(Parallax { inner, host })
}
