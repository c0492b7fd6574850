use crate::constants::{px, CONTENT_CLASS, DEFAULT_MEDIA_TAG, HOST_CLASS, MEDIA_WRAPPER_CLASS};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Elements produced by [`build`].
pub struct Markup {
    pub media: web::HtmlElement,
    pub content: web::HtmlElement,
}

#[inline]
fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

fn create_div(document: &web::Document, class: &str) -> anyhow::Result<web::HtmlElement> {
    let el = document.create_element("div").map_err(js_err)?;
    el.set_class_name(class);
    el.dyn_into::<web::HtmlElement>().map_err(js_err)
}

#[inline]
pub fn sync_host_height(host: &web::HtmlElement, height: f64) {
    if let Err(e) = host.style().set_property("height", &px(height)) {
        log::warn!("[dom] host height not applied: {:?}", e);
    }
}

/// Lay out the host: a media layer (the caller's element, or an `<img>` for
/// `src`) and a content layer that takes over the host's existing children.
pub fn build(
    document: &web::Document,
    host: &web::HtmlElement,
    height: f64,
    src: Option<&str>,
    custom_media: Option<web::HtmlElement>,
) -> anyhow::Result<Markup> {
    host.class_list().add_1(HOST_CLASS).map_err(js_err)?;
    sync_host_height(host, height);

    let wrapper = create_div(document, MEDIA_WRAPPER_CLASS)?;
    let media = match custom_media {
        Some(media) => media,
        None => {
            let img = document
                .create_element(DEFAULT_MEDIA_TAG)
                .map_err(js_err)?
                .dyn_into::<web::HtmlImageElement>()
                .map_err(js_err)?;
            if let Some(src) = src {
                img.set_src(src);
            }
            img.unchecked_into::<web::HtmlElement>()
        }
    };
    // a custom media element may currently sit inside the host; move it first
    wrapper.append_child(&media).map_err(js_err)?;

    let content = create_div(document, CONTENT_CLASS)?;
    while let Some(child) = host.first_child() {
        content.append_child(&child).map_err(js_err)?;
    }
    host.append_child(&wrapper).map_err(js_err)?;
    host.append_child(&content).map_err(js_err)?;

    Ok(Markup { media, content })
}
