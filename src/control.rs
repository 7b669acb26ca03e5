//! Intensity slider bound to a `Snowfall`.
//!
//! One 0..=100 level drives both density and speed through
//! [`Intensity::from_level`].

use crate::dom::{self, EventListener};
use crate::events;
use crate::style::{percent_label, CONTROL_CHANGE_EVENT, DEFAULT_CONTROL_LABEL};
use crate::{Shared, Snowfall};
use snowfall_core::{config::parse_leading_int, Intensity, DEFAULT_DENSITY};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[wasm_bindgen]
pub struct SnowControl {
    slider: web::HtmlInputElement,
    value_label: web::Element,
    target: Weak<Shared>,
    input_listener: Option<EventListener>,
}

#[wasm_bindgen]
impl SnowControl {
    /// Render the slider into `host` and apply its initial level to `target`.
    /// `initial-value` and the host's text content seed level and label.
    #[wasm_bindgen(constructor)]
    pub fn new(host: web::Element, target: &Snowfall) -> Result<SnowControl, JsValue> {
        build(host, target.shared()).map_err(|e| JsValue::from_str(&format!("{e:#}")))
    }

    #[wasm_bindgen(getter)]
    pub fn value(&self) -> u32 {
        read_level(&self.slider)
    }

    #[wasm_bindgen(setter)]
    pub fn set_value(&self, level: u32) -> Result<(), JsValue> {
        self.slider.set_value(&level.to_string());
        apply_level(&self.target, &self.value_label, read_level(&self.slider))
    }

    pub fn destroy(&mut self) {
        self.input_listener.take();
    }
}

fn read_level(slider: &web::HtmlInputElement) -> u32 {
    match parse_leading_int(&slider.value()) {
        Some(v) => v.clamp(0, 100) as u32,
        None => DEFAULT_DENSITY,
    }
}

fn apply_level(
    target: &Weak<Shared>,
    value_label: &web::Element,
    level: u32,
) -> Result<(), JsValue> {
    value_label.set_text_content(Some(&percent_label(level)));
    let Some(shared) = target.upgrade() else {
        log::debug!("[control] target snowfall is gone");
        return Ok(());
    };
    shared.set_intensity(Intensity::from_level(level))?;
    Ok(())
}

fn create(document: &web::Document, tag: &str, class: &str) -> anyhow::Result<web::Element> {
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create {tag}: {:?}", e))?;
    el.set_class_name(class);
    Ok(el)
}

fn append(parent: &web::Element, child: &web::Element) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("append: {:?}", e))
}

fn build(host: web::Element, target: &Rc<Shared>) -> anyhow::Result<SnowControl> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let initial = host
        .get_attribute("initial-value")
        .as_deref()
        .and_then(parse_leading_int)
        .filter(|v| *v != 0)
        .map(|v| v.clamp(0, 100) as u32)
        .unwrap_or(DEFAULT_DENSITY);
    let label_text = host
        .text_content()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_CONTROL_LABEL.to_string());

    let root = create(&document, "div", "snow-control")?;
    let label = create(&document, "label", "snow-control__label")?;
    let text = create(&document, "span", "snow-control__text")?;
    text.set_text_content(Some(&label_text));
    let value_label = create(&document, "span", "snow-control__value")?;
    value_label.set_text_content(Some(&percent_label(initial)));

    let slider: web::HtmlInputElement = create(&document, "input", "snow-control__slider")?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    slider.set_type("range");
    slider.set_min("0");
    slider.set_max("100");
    slider.set_value(&initial.to_string());
    let _ = slider.set_attribute("aria-label", &label_text);

    append(&label, &text)?;
    append(&label, &value_label)?;
    append(&root, &label)?;
    append(&root, &slider)?;
    host.set_text_content(None);
    append(&host, &root)?;

    let target = Rc::downgrade(target);
    let listener = {
        let slider_in = slider.clone();
        let value_in = value_label.clone();
        let target_in = target.clone();
        let host_in = host.clone();
        EventListener::new(slider.as_ref(), "input", move |_| {
            let level = read_level(&slider_in);
            if let Err(e) = apply_level(&target_in, &value_in, level) {
                log::warn!("[control] apply level {level} failed: {:?}", e);
            }
            let detail = js_sys::Object::new();
            events::set_number(&detail, "intensity", level as f64);
            events::dispatch_custom(host_in.as_ref(), CONTROL_CHANGE_EVENT, &detail.into());
        })?
    };

    apply_level(&target, &value_label, initial)
        .map_err(|e| anyhow::anyhow!("initial level: {:?}", e))?;

    Ok(SnowControl {
        slider,
        value_label,
        target,
        input_listener: Some(listener),
    })
}
