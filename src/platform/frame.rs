//! requestAnimationFrame loop with scoped lifetime

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A running frame loop. Dropping it cancels the pending frame and frees
/// the callback.
///
/// Must not be dropped from inside its own frame callback.
pub struct AnimationLoop {
    window: web_sys::Window,
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
}

impl AnimationLoop {
    /// Call `on_frame` with the frame timestamp (ms) once per display frame
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let next = Rc::downgrade(&callback);
        let pending_inner = pending.clone();
        let win = window.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            pending_inner.set(None);
            on_frame(ts);

            let Some(cb) = next.upgrade() else { return };
            let cb = cb.borrow();
            if let Some(f) = cb.as_ref() {
                match win.request_animation_frame(f.as_ref().unchecked_ref()) {
                    Ok(id) => pending_inner.set(Some(id)),
                    Err(e) => log::error!("request_animation_frame failed: {:?}", e),
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let id = {
            let cb = callback.borrow();
            let f = cb
                .as_ref()
                .ok_or_else(|| JsValue::from_str("frame callback missing"))?;
            window.request_animation_frame(f.as_ref().unchecked_ref())?
        };
        pending.set(Some(id));
        log::debug!("animation loop started");

        Ok(Self {
            window,
            callback,
            pending,
        })
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let Some(id) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
        log::debug!("animation loop stopped");
    }
}
