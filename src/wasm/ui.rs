//! DOM wiring: every control is bound once and forwards a [`UiEvent`] to the
//! controller.

use crate::audio::AudioBackend;
use crate::config::{TrackRegistry, VizConfig};
use crate::controller::{
    Controller, UiEvent, UiUpdate, PROGRESS_LABEL, VOLUME_LABEL, WAVEFORM_LABEL,
};
use crate::error::{VizError, VizResult};
use crate::params::Effect;
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    Document, Event, EventTarget, HtmlCanvasElement, HtmlElement, HtmlInputElement,
    HtmlOptionElement, HtmlSelectElement, Window,
};

use super::utils;

const QUERY_KEYS: [&str; 3] = ["track", "fft", "trackchange"];

/// Range inputs without a `max` attribute default to 100.
const DEFAULT_SLIDER_MAX: f64 = 100.0;

/// Elements that updates are written back to.
pub struct Page {
    document: Document,
    canvas: HtmlCanvasElement,
    play_button: HtmlElement,
}

impl Page {
    pub fn apply(&self, update: UiUpdate) {
        match update {
            UiUpdate::Label { id, text } => match self.document.get_element_by_id(id) {
                Some(el) => el.set_inner_html(&text),
                None => warn!("label #{id} disappeared"),
            },
            UiUpdate::PlayState(state) => {
                if let Err(e) = self.play_button.dataset().set("playing", state.as_data_attr()) {
                    warn!("could not set play flag: {e:?}");
                }
            }
            UiUpdate::RequestFullscreen => {
                if let Err(e) = utils::go_fullscreen(&self.canvas) {
                    warn!("fullscreen rejected: {e}");
                }
            }
        }
    }
}

/// Look up `id` and cast it to `T`.
pub fn element<T: JsCast>(document: &Document, id: &str) -> VizResult<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| VizError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| VizError::WrongElementType {
            id: id.to_string(),
            expected: std::any::type_name::<T>().rsplit("::").next().unwrap_or("element"),
        })
}

/// Config overrides from the page's query string.
pub fn query_pairs(window: &Window) -> Vec<(String, String)> {
    let Ok(search) = window.location().search() else {
        return Vec::new();
    };
    let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
        return Vec::new();
    };
    QUERY_KEYS
        .iter()
        .filter_map(|&key| params.get(key).map(|v| (key.to_string(), v)))
        .collect()
}

fn on<F>(target: &EventTarget, event: &str, handler: F) -> VizResult<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Handlers live as long as the page.
    closure.forget();
    Ok(())
}

/// Add registry tracks the markup does not already list, then select
/// `initial` so the control agrees with what is loaded.
pub fn fill_tracks(
    select: &HtmlSelectElement,
    tracks: &TrackRegistry,
    initial: &str,
) -> VizResult<()> {
    let listed: Vec<String> = (0..select.length())
        .filter_map(|i| select.item(i))
        .filter_map(|el| el.dyn_into::<HtmlOptionElement>().ok())
        .map(|opt| opt.value())
        .collect();
    for (name, path) in tracks.iter() {
        if !listed.iter().any(|v| v == path) {
            let option = HtmlOptionElement::new_with_text_and_value(name, path)?;
            select.add_with_html_option_element(&option)?;
        }
    }
    select.set_value(initial);
    Ok(())
}

fn dispatch<A: AudioBackend>(page: &Page, controller: &RefCell<Controller<A>>, event: UiEvent) {
    let updates = controller.borrow_mut().handle(event);
    for update in updates {
        page.apply(update);
    }
}

/// Bind every control and fire the sliders once so their labels match.
pub fn wire<A: AudioBackend + 'static>(
    document: &Document,
    canvas: &HtmlCanvasElement,
    config: &VizConfig,
    controller: &Rc<RefCell<Controller<A>>>,
) -> VizResult<Rc<Page>> {
    // Labels are only written through `Page::apply`; make sure they exist now.
    for id in [VOLUME_LABEL, WAVEFORM_LABEL, PROGRESS_LABEL] {
        element::<HtmlElement>(document, id)?;
    }

    let play_button: HtmlElement = element(document, "playButton")?;
    play_button
        .dataset()
        .set("playing", controller.borrow().play_state().as_data_attr())?;

    let page = Rc::new(Page {
        document: document.clone(),
        canvas: canvas.clone(),
        play_button: play_button.clone(),
    });

    let fs_button: HtmlElement = element(document, "fsButton")?;
    {
        let (page, controller) = (page.clone(), controller.clone());
        on(&fs_button, "click", move |_| {
            dispatch(&page, &controller, UiEvent::Fullscreen);
        })?;
    }
    {
        let (page, controller) = (page.clone(), controller.clone());
        on(&play_button, "click", move |_| {
            dispatch(&page, &controller, UiEvent::PlayToggle);
        })?;
    }

    let volume: HtmlInputElement = element(document, "volumeSlider")?;
    {
        let (page, controller, slider) = (page.clone(), controller.clone(), volume.clone());
        on(&volume, "input", move |_| {
            dispatch(&page, &controller, UiEvent::VolumeChanged(slider.value_as_number()));
        })?;
    }
    volume.dispatch_event(&Event::new("input")?)?;

    let waveform: HtmlInputElement = element(document, "waveformSlider")?;
    {
        let (page, controller, slider) = (page.clone(), controller.clone(), waveform.clone());
        on(&waveform, "input", move |_| {
            let max = slider.max().parse::<f64>().unwrap_or_else(|_| {
                warn!("waveform slider has no numeric max, assuming {DEFAULT_SLIDER_MAX}");
                DEFAULT_SLIDER_MAX
            });
            let value = slider.value_as_number();
            dispatch(&page, &controller, UiEvent::WaveformChanged { value, max });
        })?;
    }
    waveform.dispatch_event(&Event::new("input")?)?;

    let track: HtmlSelectElement = element(document, "trackSelect")?;
    fill_tracks(&track, &config.tracks, &config.initial_track_path())?;
    {
        let (page, controller, select) = (page.clone(), controller.clone(), track.clone());
        on(&track, "change", move |_| {
            dispatch(&page, &controller, UiEvent::TrackSelected(select.value()));
        })?;
    }

    for effect in Effect::ALL {
        let checkbox: HtmlInputElement = element(document, effect.checkbox_id())?;
        checkbox.set_checked(controller.borrow().params().get(effect));
        let (page, controller, cb) = (page.clone(), controller.clone(), checkbox.clone());
        on(&checkbox, "change", move |_| {
            dispatch(&page, &controller, UiEvent::EffectToggled(effect, cb.checked()));
        })?;
    }

    Ok(page)
}
