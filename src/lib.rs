#![cfg(target_arch = "wasm32")]
//! Snowfall overlay for the browser.
//!
//! `Snowfall` mounts a full-viewport canvas inside a host element and drives
//! the core render loop from `requestAnimationFrame`. Intensity changes are
//! reported as bubbling `snowfall-change` events on the host and to any
//! callback registered with `onChange`.

use snowfall_core::{
    density_from_host, speed_from_host, AttributeWrite, Intensity, IntensityChange, Population,
    RenderLoop, SnowfallConfig,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod control;
mod dom;
mod events;
mod frame;
mod style;
mod surface;

pub use control::SnowControl;

type SnowLoop = RenderLoop<frame::RafScheduler, surface::CanvasSurface>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("snowfall-web loaded");
    Ok(())
}

pub(crate) struct Shared {
    host: web::Element,
    engine: RefCell<SnowLoop>,
    frame_callback: frame::FrameCallback,
    changes: Rc<RefCell<Vec<IntensityChange>>>,
    listeners: RefCell<Vec<(u32, js_sys::Function)>>,
    next_listener: Cell<u32>,
    resize_listener: RefCell<Option<dom::EventListener>>,
    attribute_write: AttributeWrite,
}

fn busy() -> JsValue {
    JsValue::from_str("snowfall engine is busy")
}

impl Shared {
    fn with_engine<R>(&self, f: impl FnOnce(&mut SnowLoop) -> R) -> Result<R, JsValue> {
        let mut engine = self.engine.try_borrow_mut().map_err(|_| busy())?;
        Ok(f(&mut engine))
    }

    pub(crate) fn set_intensity(&self, intensity: Intensity) -> Result<IntensityChange, JsValue> {
        let change = self.with_engine(|e| e.set_intensity(intensity.density, intensity.speed))?;
        // observers run with the engine released so they may call back in
        self.flush_changes();
        Ok(change)
    }

    fn flush_changes(&self) {
        let pending: Vec<IntensityChange> = self.changes.borrow_mut().drain(..).collect();
        for change in pending {
            let detail = events::change_detail(&change);
            events::dispatch_custom(&self.host, style::CHANGE_EVENT, &detail);
            let listeners = self.listeners.borrow().clone();
            for (_, callback) in listeners {
                if let Err(e) = callback.call1(&JsValue::NULL, &detail) {
                    log::warn!("[snowfall] change callback threw: {:?}", e);
                }
            }
        }
    }

    fn start(&self) -> Result<(), JsValue> {
        if self.with_engine(|e| e.start())? {
            let _ = self.host.remove_attribute("paused");
        }
        Ok(())
    }

    fn stop(&self) -> Result<(), JsValue> {
        if self.with_engine(|e| e.stop())? {
            let _ = self.host.set_attribute("paused", "");
        }
        Ok(())
    }

    fn resize(&self, width: u32, height: u32) -> Result<(), JsValue> {
        self.with_engine(|e| e.resize(width, height))
    }

    fn config(&self) -> SnowfallConfig {
        let density = self.host.get_attribute("density");
        let speed = self.host.get_attribute("speed");
        SnowfallConfig::from_attributes(
            density.as_deref(),
            speed.as_deref(),
            self.host.has_attribute("paused"),
        )
    }

    fn apply_attributes(&self) -> Result<IntensityChange, JsValue> {
        self.set_intensity(self.config().intensity())
    }

    /// Write an intensity attribute and apply it once, whether or not the
    /// host forwards `attributeChangedCallback` to [`Snowfall::attribute_changed`].
    fn write_attribute(&self, name: &str, value: u32) -> Result<(), JsValue> {
        self.attribute_write.begin();
        let written = self.host.set_attribute(name, &value.to_string());
        let unapplied = self.attribute_write.finish();
        written?;
        if unapplied {
            self.apply_attributes()?;
        }
        Ok(())
    }

    /// Mirror a halt the loop took on its own (surface lost, scheduling
    /// failure) onto the host's `paused` attribute.
    fn report_halt(&self) {
        log::info!("[snowfall] loop halted, marking host paused");
        if let Err(e) = self.host.set_attribute("paused", "") {
            log::warn!("[snowfall] could not mark host paused: {:?}", e);
        }
    }
}

#[wasm_bindgen]
pub struct Snowfall {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl Snowfall {
    /// Mount on `host`, reading `density`, `speed` and `paused` attributes.
    #[wasm_bindgen(constructor)]
    pub fn new(host: web::Element) -> Result<Snowfall, JsValue> {
        build(host).map_err(|e| JsValue::from_str(&format!("{e:#}")))
    }

    /// Returns `{density, speed, count}`; `speed` defaults to 5. Any JS
    /// number is accepted and clamped, so `-10` means density 0.
    #[wasm_bindgen(js_name = setIntensity)]
    pub fn set_intensity(&self, density: f64, speed: Option<f64>) -> Result<JsValue, JsValue> {
        let change = self.shared.set_intensity(Intensity::from_host(density, speed))?;
        Ok(events::change_detail(&change))
    }

    pub fn start(&self) -> Result<(), JsValue> {
        self.shared.start()
    }

    pub fn stop(&self) -> Result<(), JsValue> {
        self.shared.stop()
    }

    pub fn resize(&self, width: u32, height: u32) -> Result<(), JsValue> {
        self.shared.resize(width, height)
    }

    #[wasm_bindgen(getter)]
    pub fn density(&self) -> u32 {
        self.shared.config().density
    }

    #[wasm_bindgen(setter)]
    pub fn set_density(&self, value: f64) -> Result<(), JsValue> {
        self.shared.write_attribute("density", density_from_host(value))
    }

    #[wasm_bindgen(getter)]
    pub fn speed(&self) -> u32 {
        self.shared.config().speed
    }

    #[wasm_bindgen(setter)]
    pub fn set_speed(&self, value: f64) -> Result<(), JsValue> {
        self.shared.write_attribute("speed", speed_from_host(value))
    }

    /// Hook for a custom element's `attributeChangedCallback`.
    #[wasm_bindgen(js_name = attributeChanged)]
    pub fn attribute_changed(&self, name: &str) -> Result<(), JsValue> {
        match name {
            "density" | "speed" => {
                self.shared.attribute_write.settle();
                self.shared.apply_attributes().map(|_| ())
            }
            "paused" => {
                if self.shared.host.has_attribute("paused") {
                    self.shared.stop()
                } else {
                    self.shared.start()
                }
            }
            _ => Ok(()),
        }
    }

    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: js_sys::Function) -> u32 {
        let id = self.shared.next_listener.get();
        self.shared.next_listener.set(id.wrapping_add(1));
        self.shared.listeners.borrow_mut().push((id, callback));
        id
    }

    #[wasm_bindgen(js_name = offChange)]
    pub fn off_change(&self, id: u32) -> bool {
        let mut listeners = self.shared.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(entry, _)| *entry != id);
        listeners.len() != before
    }

    #[wasm_bindgen(getter, js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.shared
            .with_engine(|e| e.is_running())
            .unwrap_or(false)
    }

    #[wasm_bindgen(getter)]
    pub fn count(&self) -> u32 {
        self.shared
            .with_engine(|e| e.population().len() as u32)
            .unwrap_or(0)
    }

    /// Permanent teardown: stops the loop, deregisters the resize listener,
    /// drops the frame callback and removes the canvas.
    pub fn destroy(&self) -> Result<(), JsValue> {
        self.shared.stop()?;
        self.shared.with_engine(|e| {
            e.shutdown();
            e.surface().canvas().remove();
        })?;
        self.shared.resize_listener.borrow_mut().take();
        self.shared.frame_callback.borrow_mut().take();
        self.shared.listeners.borrow_mut().clear();
        log::info!("[snowfall] destroyed");
        Ok(())
    }
}

impl Snowfall {
    pub(crate) fn shared(&self) -> &Rc<Shared> {
        &self.shared
    }
}

fn build(host: web::Element) -> anyhow::Result<Snowfall> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let canvas = dom::create_overlay_canvas(&host)?;
    let ctx = dom::context_2d(&canvas)?;

    let scheduler = frame::RafScheduler::new()?;
    let frame_callback = scheduler.callback_slot();
    let in_flight = scheduler.in_flight();

    let mut engine = RenderLoop::new(
        scheduler,
        surface::CanvasSurface::new(canvas, ctx),
        dom::viewport_size(),
        Population::new(),
    );
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = changes.clone();
    engine.subscribe(move |change| sink.borrow_mut().push(*change));

    let shared = Rc::new(Shared {
        host,
        engine: RefCell::new(engine),
        frame_callback: frame_callback.clone(),
        changes,
        listeners: RefCell::new(Vec::new()),
        next_listener: Cell::new(0),
        resize_listener: RefCell::new(None),
        attribute_write: AttributeWrite::default(),
    });

    // Weak refs only: the loop owns the closure slot, so a strong ref here
    // would keep the whole engine alive forever.
    let weak = Rc::downgrade(&shared);
    frame::install_frame_callback(&frame_callback, in_flight, move |handle| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let halted = match shared.engine.try_borrow_mut() {
            Ok(mut engine) => engine.on_frame(handle),
            Err(_) => {
                log::error!("[frame] engine busy, frame {handle} dropped");
                false
            }
        };
        // engine released: a `paused` hook calling stop() finds it stopped
        if halted {
            shared.report_halt();
        }
    });

    let weak = Rc::downgrade(&shared);
    let resize = dom::EventListener::new(window.as_ref(), "resize", move |_| {
        if let Some(shared) = weak.upgrade() {
            let dims = dom::viewport_size();
            if let Err(e) = shared.resize(dims.width, dims.height) {
                log::warn!("[snowfall] resize skipped: {:?}", e);
            }
        }
    })?;
    *shared.resize_listener.borrow_mut() = Some(resize);

    let config = shared.config();
    shared
        .set_intensity(config.intensity())
        .map_err(|e| anyhow::anyhow!("initial intensity: {:?}", e))?;
    if !config.paused {
        shared
            .start()
            .map_err(|e| anyhow::anyhow!("start: {:?}", e))?;
    }
    log::info!(
        "[snowfall] mounted density={} speed={} paused={}",
        config.density,
        config.speed,
        config.paused
    );
    Ok(Snowfall { shared })
}
