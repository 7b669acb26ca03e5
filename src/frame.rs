use snowfall_core::{FrameScheduler, SnowfallError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Slot holding the single reusable frame closure. Emptying it drops the
/// closure, which is how the loop is torn down.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` scheduler handing out the browser's request ids.
pub struct RafScheduler {
    window: web::Window,
    callback: FrameCallback,
    in_flight: Rc<Cell<Option<i32>>>,
}

impl RafScheduler {
    pub fn new() -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        Ok(Self {
            window,
            callback: Rc::new(RefCell::new(None)),
            in_flight: Rc::new(Cell::new(None)),
        })
    }

    pub fn callback_slot(&self) -> FrameCallback {
        self.callback.clone()
    }

    pub fn in_flight(&self) -> Rc<Cell<Option<i32>>> {
        self.in_flight.clone()
    }
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Result<i32, SnowfallError> {
        let slot = self.callback.borrow();
        let callback = slot
            .as_ref()
            .ok_or_else(|| SnowfallError::Schedule("frame callback not installed".into()))?;
        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| SnowfallError::Schedule(format!("{:?}", e)))?;
        self.in_flight.set(Some(id));
        Ok(id)
    }

    fn cancel_frame(&mut self, handle: i32) {
        let _ = self.window.cancel_animation_frame(handle);
        if self.in_flight.get() == Some(handle) {
            self.in_flight.set(None);
        }
    }
}

/// Install the frame closure into `slot`. Each invocation forwards the id of
/// the request that fired; a cancelled request leaves nothing to forward.
pub fn install_frame_callback(
    slot: &FrameCallback,
    in_flight: Rc<Cell<Option<i32>>>,
    mut on_frame: impl FnMut(i32) + 'static,
) {
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Some(handle) = in_flight.take() {
            on_frame(handle);
        }
    }) as Box<dyn FnMut()>));
}
