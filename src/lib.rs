#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Browser audio visualizer.
//!
//! The state and event handling live in host-testable modules; the `wasm`
//! module binds them to the DOM, Web Audio and the 2D canvas.

pub mod audio;
pub mod config;
pub mod controller;
pub mod effects;
pub mod error;
pub mod params;
pub mod spectrum;
pub mod time;

pub use controller::{Controller, PlayState, Renderer, UiEvent, UiUpdate};
pub use error::{VizError, VizResult};
pub use params::{DrawParams, Effect};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    pub mod audio;
    pub mod canvas;
    pub mod console;
    pub mod render;
    pub mod ui;
    pub mod utils;

    use crate::config::VizConfig;
    use crate::controller::Controller;
    use crate::error::VizError;
    use std::cell::RefCell;
    use std::rc::Rc;

    thread_local! {
        static FRAME_LOOP: RefCell<Option<render::FrameLoop>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console::init(log::LevelFilter::Info);
        log::info!("init called");
        log::debug!("random color check: {}", utils::random_color());

        let window = web_sys::window().ok_or(VizError::Unsupported("window"))?;
        let document = window.document().ok_or(VizError::Unsupported("document"))?;

        let mut config = VizConfig::default();
        config.apply_query(ui::query_pairs(&window));

        let web_audio = audio::WebAudio::new(&config.initial_track_path(), config.fft_size)?;
        let analyser = web_audio.analyser().clone();
        let media = web_audio.element().clone();

        let canvas = document
            .query_selector("canvas")?
            .ok_or_else(|| VizError::MissingElement("canvas".into()))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| VizError::WrongElementType {
                id: "canvas".into(),
                expected: "HtmlCanvasElement",
            })?;

        let controller = Rc::new(RefCell::new(Controller::new(web_audio, &config)));
        let page = ui::wire(&document, &canvas, &config, &controller)?;

        let visualizer = canvas::CanvasVisualizer::setup(canvas, analyser, media)?;
        let frame_loop = render::start(page, controller, visualizer)?;
        FRAME_LOOP.with(|slot| *slot.borrow_mut() = Some(frame_loop));
        Ok(())
    }

    /// Stop the render loop. Event handlers stay wired.
    #[wasm_bindgen]
    pub fn stop() {
        FRAME_LOOP.with(|slot| {
            if let Some(frame_loop) = slot.borrow_mut().take() {
                frame_loop.cancel();
            }
        });
    }
}
