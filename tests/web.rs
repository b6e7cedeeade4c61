#![cfg(target_arch = "wasm32")]

use audio_viz::audio::{AudioBackend, ContextState};
use audio_viz::config::{TrackRegistry, VizConfig};
use audio_viz::wasm::{audio::WebAudio, canvas::CanvasVisualizer, render, ui, utils};
use audio_viz::{Controller, DrawParams, Effect, Renderer, VizError, VizResult};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const PAGE: &str = r#"
  <canvas width="64" height="32"></canvas>
  <button id="playButton" data-playing="no"></button>
  <button id="fsButton"></button>
  <span id="progress"></span>
  <select id="trackSelect">
    <option value="media/Koi no Uta.mp3">Koi no Uta</option>
    <option value="media/b.mp3">B</option>
  </select>
  <input type="range" id="volumeSlider" min="0" max="2" value="1" step="0.01">
  <span id="volumeLabel"></span>
  <input type="range" id="waveformSlider" min="0" max="400" value="200">
  <span id="waveformLabel"></span>
  <input type="checkbox" id="gradientCB"><input type="checkbox" id="barsCB">
  <input type="checkbox" id="invertCB"><input type="checkbox" id="embossCB">
  <input type="checkbox" id="barCircleCB"><input type="checkbox" id="dateCB">
  <input type="checkbox" id="bounceCB"><input type="checkbox" id="circleWaveformCB">
  <input type="checkbox" id="progressCB"><input type="checkbox" id="waveformCB">
  <input type="checkbox" id="pixelsCB"><input type="checkbox" id="grayscaleCB">
  <input type="checkbox" id="sepiaCB">
"#;

#[derive(Default)]
struct SilentAudio {
    loaded: Vec<String>,
    playing: bool,
    volume: f64,
    time: f64,
}

impl AudioBackend for SilentAudio {
    fn load(&mut self, path: &str) -> VizResult<()> {
        self.loaded.push(path.to_string());
        Ok(())
    }

    fn play(&mut self) -> VizResult<()> {
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_volume(&mut self, level: f64) {
        self.volume = level;
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn duration(&self) -> Option<f64> {
        None
    }

    fn context_state(&self) -> ContextState {
        ContextState::Running
    }

    fn resume(&mut self) {}
}

struct FrameCounter(Rc<Cell<u32>>);

impl Renderer for FrameCounter {
    fn draw(&mut self, _params: &DrawParams, _waveform_height: f64) {
        self.0.set(self.0.get() + 1);
    }
}

/// Control markup mounted into the body, removed on drop.
struct Fixture {
    root: web_sys::Element,
}

impl Fixture {
    fn mount() -> Self {
        let doc = document();
        let root = doc.create_element("div").unwrap();
        root.set_inner_html(PAGE);
        doc.body().unwrap().append_child(&root).unwrap();
        Self { root }
    }

    fn canvas(&self) -> web_sys::HtmlCanvasElement {
        self.root.query_selector("canvas").unwrap().unwrap().dyn_into().unwrap()
    }

    fn wire(&self, audio: SilentAudio) -> (Rc<RefCell<Controller<SilentAudio>>>, Rc<ui::Page>) {
        let config = VizConfig::default();
        let controller = Rc::new(RefCell::new(Controller::new(audio, &config)));
        let page = ui::wire(&document(), &self.canvas(), &config, &controller).unwrap();
        (controller, page)
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.root.remove();
    }
}

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn by_id<T: JsCast>(id: &str) -> T {
    ui::element(&document(), id).unwrap()
}

fn text(id: &str) -> String {
    by_id::<web_sys::HtmlElement>(id).inner_html()
}

fn playing_flag() -> Option<String> {
    by_id::<web_sys::HtmlElement>("playButton").get_attribute("data-playing")
}

fn fire(target: &web_sys::EventTarget, kind: &str) {
    target.dispatch_event(&web_sys::Event::new(kind).unwrap()).unwrap();
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn canvas() -> web_sys::HtmlCanvasElement {
    let canvas = document()
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(64);
    canvas.set_height(32);
    canvas
}

#[wasm_bindgen_test]
fn random_color_is_css_rgba() {
    let color = utils::random_color();
    assert!(color.starts_with("rgba(") && color.ends_with(",0.75)"), "{color}");
    assert_eq!(color.matches(',').count(), 3);
}

#[wasm_bindgen_test]
fn element_lookup_reports_missing_and_mistyped() {
    let doc = document();
    let err = ui::element::<web_sys::HtmlInputElement>(&doc, "noSuchControl").unwrap_err();
    assert_eq!(err, VizError::MissingElement("noSuchControl".into()));

    let div = doc.create_element("div").unwrap();
    div.set_id("notAnInput");
    doc.body().unwrap().append_child(&div).unwrap();
    let err = ui::element::<web_sys::HtmlInputElement>(&doc, "notAnInput").unwrap_err();
    assert!(matches!(err, VizError::WrongElementType { expected: "HtmlInputElement", .. }));
    div.remove();
}

#[wasm_bindgen_test]
fn wiring_fires_initial_slider_labels() {
    let fixture = Fixture::mount();
    let (controller, _page) = fixture.wire(SilentAudio::default());

    assert_eq!(text("volumeLabel"), "50");
    assert_eq!(text("waveformLabel"), "200");
    assert_eq!(controller.borrow().audio().volume, 1.0);
    assert_eq!(controller.borrow().waveform_height(), 200.0);
    assert_eq!(playing_flag().as_deref(), Some("no"));

    let volume: web_sys::HtmlInputElement = by_id("volumeSlider");
    volume.set_value("2");
    fire(&volume, "input");
    assert_eq!(text("volumeLabel"), "100");
}

#[wasm_bindgen_test]
fn waveform_slider_without_max_uses_range_default() {
    let fixture = Fixture::mount();
    let slider: web_sys::HtmlInputElement = by_id("waveformSlider");
    slider.remove_attribute("max").unwrap();
    slider.set_value("30");
    let (controller, _page) = fixture.wire(SilentAudio::default());

    assert_eq!(text("waveformLabel"), "70");
    assert_eq!(controller.borrow().waveform_height(), 30.0);
}

#[wasm_bindgen_test]
fn checkbox_change_reaches_draw_params() {
    let fixture = Fixture::mount();
    let (controller, _page) = fixture.wire(SilentAudio::default());

    let sepia: web_sys::HtmlInputElement = by_id(Effect::Sepia.checkbox_id());
    assert!(!sepia.checked());
    sepia.set_checked(true);
    fire(&sepia, "change");

    let mut expected = DrawParams::default();
    expected.set(Effect::Sepia, true);
    assert_eq!(*controller.borrow().params(), expected);
}

#[wasm_bindgen_test]
fn play_button_clicks_flip_the_flag() {
    let fixture = Fixture::mount();
    let (controller, _page) = fixture.wire(SilentAudio::default());
    let button: web_sys::HtmlElement = by_id("playButton");

    button.click();
    assert_eq!(playing_flag().as_deref(), Some("yes"));
    assert!(controller.borrow().audio().playing);
    button.click();
    assert_eq!(playing_flag().as_deref(), Some("no"));
    assert!(!controller.borrow().audio().playing);
}

#[wasm_bindgen_test]
fn track_change_while_playing_leaves_flag_paused() {
    let fixture = Fixture::mount();
    let (controller, _page) = fixture.wire(SilentAudio::default());
    by_id::<web_sys::HtmlElement>("playButton").click();
    assert_eq!(playing_flag().as_deref(), Some("yes"));

    let select: web_sys::HtmlSelectElement = by_id("trackSelect");
    select.set_value("media/b.mp3");
    fire(&select, "change");

    assert_eq!(playing_flag().as_deref(), Some("no"));
    let c = controller.borrow();
    assert_eq!(c.audio().loaded, ["media/b.mp3"]);
    assert!(!c.audio().playing);
}

#[wasm_bindgen_test]
fn registry_tracks_are_added_to_an_empty_select() {
    let select: web_sys::HtmlSelectElement =
        document().create_element("select").unwrap().dyn_into().unwrap();
    let tracks = TrackRegistry::default();
    ui::fill_tracks(&select, &tracks, "media/Koi no Uta.mp3").unwrap();
    ui::fill_tracks(&select, &tracks, "media/Koi no Uta.mp3").unwrap();
    assert_eq!(select.length(), 1);
    assert_eq!(select.value(), "media/Koi no Uta.mp3");
}

#[wasm_bindgen_test]
async fn frame_loop_draws_until_cancelled() {
    let fixture = Fixture::mount();
    let audio = SilentAudio {
        time: 65.0,
        ..SilentAudio::default()
    };
    let (controller, page) = fixture.wire(audio);
    let frames = Rc::new(Cell::new(0));
    let frame_loop = render::start(page, controller, FrameCounter(frames.clone())).unwrap();

    sleep(200).await;
    assert!(frames.get() > 0, "no frame was drawn");
    assert_eq!(text("progress"), "01:05");

    frame_loop.cancel();
    let drawn = frames.get();
    sleep(200).await;
    assert_eq!(frames.get(), drawn);
}

#[wasm_bindgen_test]
fn draw_never_fails_for_any_single_effect() {
    let audio = WebAudio::new("", 64).unwrap();
    let analyser = audio.analyser().clone();
    let mut viz = CanvasVisualizer::setup(canvas(), analyser, audio.element().clone()).unwrap();
    viz.draw(&DrawParams::none(), 16.0);
    for effect in Effect::ALL {
        let mut params = DrawParams::none();
        params.set(effect, true);
        viz.draw(&params, 16.0);
    }
    viz.draw(&DrawParams::default(), 16.0);
}

#[wasm_bindgen_test]
fn fresh_track_has_no_duration_and_starts_at_zero() {
    let mut audio = WebAudio::new("", 256).unwrap();
    audio.set_volume(0.5);
    assert_eq!(audio.current_time(), 0.0);
    assert_eq!(audio.duration(), None);
}
