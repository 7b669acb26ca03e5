use snowfall_core::IntensityChange;
use wasm_bindgen::JsValue;
use web_sys as web;

/// `{density, speed, count}` as a plain JS object.
pub fn change_detail(change: &IntensityChange) -> JsValue {
    let detail = js_sys::Object::new();
    set_number(&detail, "density", change.density as f64);
    set_number(&detail, "speed", change.speed as f64);
    set_number(&detail, "count", change.count as f64);
    detail.into()
}

pub fn set_number(target: &js_sys::Object, key: &str, value: f64) {
    let _ = js_sys::Reflect::set(target, &JsValue::from_str(key), &JsValue::from_f64(value));
}

/// Dispatch a bubbling `CustomEvent` carrying `detail` on `target`.
pub fn dispatch_custom(target: &web::EventTarget, name: &str, detail: &JsValue) {
    let init = web::CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(detail);
    match web::CustomEvent::new_with_event_init_dict(name, &init) {
        Ok(event) => {
            if let Err(e) = target.dispatch_event(&event) {
                log::warn!("[events] dispatch {name} failed: {:?}", e);
            }
        }
        Err(e) => log::warn!("[events] create {name} failed: {:?}", e),
    }
}
