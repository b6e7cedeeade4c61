use crate::audio::AudioBackend;
use crate::controller::{Controller, Renderer};
use crate::error::{VizError, VizResult};
use log::{info, warn};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::window;

use super::ui::Page;

struct LoopState {
    // `callback` holds the animation-frame closure so that it can keep calling
    // `request_animation_frame` on itself. The closure only holds a `Weak`
    // back to this state, so dropping the `FrameLoop` frees both.
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
    handle: Cell<Option<i32>>,
    cancelled: Cell<bool>,
}

impl LoopState {
    fn schedule(&self) -> VizResult<()> {
        let win = window().ok_or(VizError::Unsupported("window"))?;
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return Ok(());
        };
        let id = win.request_animation_frame(callback.as_ref().unchecked_ref())?;
        self.handle.set(Some(id));
        Ok(())
    }
}

/// Running render loop. Dropping it cancels the loop.
pub struct FrameLoop {
    state: Rc<LoopState>,
}

impl FrameLoop {
    pub fn cancel(&self) {
        if self.state.cancelled.replace(true) {
            return;
        }
        if let (Some(id), Some(win)) = (self.state.handle.take(), window()) {
            if let Err(e) = win.cancel_animation_frame(id) {
                warn!("cancelAnimationFrame failed: {e:?}");
            }
        }
        self.state.callback.borrow_mut().take();
        info!("render loop stopped");
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Start the per-frame loop: reschedule, update the progress label, draw.
pub fn start<A, R>(
    page: Rc<Page>,
    controller: Rc<RefCell<Controller<A>>>,
    mut renderer: R,
) -> VizResult<FrameLoop>
where
    A: AudioBackend + 'static,
    R: Renderer + 'static,
{
    let state = Rc::new(LoopState {
        callback: RefCell::new(None),
        handle: Cell::new(None),
        cancelled: Cell::new(false),
    });

    let weak: Weak<LoopState> = Rc::downgrade(&state);
    *state.callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let Some(state) = weak.upgrade() else {
            return;
        };
        if state.cancelled.get() {
            return;
        }
        // schedule next
        if let Err(e) = state.schedule() {
            warn!("could not schedule next frame: {e}");
        }
        let progress = controller.borrow_mut().tick(&mut renderer);
        page.apply(progress);
    }) as Box<dyn FnMut()>));

    state.schedule()?;
    info!("render loop started");
    Ok(FrameLoop { state })
}
