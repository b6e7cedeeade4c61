//! UI state and the input-event dispatch table.
//!
//! The controller owns every piece of mutable page state. DOM handlers turn
//! browser events into [`UiEvent`]s, feed them to [`Controller::handle`] and
//! apply the returned [`UiUpdate`]s; nothing here touches the DOM.

use crate::audio::{AudioBackend, ContextState};
use crate::config::{TrackChangePolicy, VizConfig};
use crate::params::{DrawParams, Effect};
use crate::time::format_progress;
use log::{debug, warn};

pub const VOLUME_LABEL: &str = "volumeLabel";
pub const WAVEFORM_LABEL: &str = "waveformLabel";
pub const PROGRESS_LABEL: &str = "progress";

/// Per-frame drawing collaborator.
pub trait Renderer {
    /// Draw one frame. Must not fail for any combination of `params`.
    fn draw(&mut self, params: &DrawParams, waveform_height: f64);
}

/// Playback flag mirrored into the play button's `data-playing` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    Playing,
    #[default]
    Paused,
}

impl PlayState {
    pub fn as_data_attr(self) -> &'static str {
        match self {
            PlayState::Playing => "yes",
            PlayState::Paused => "no",
        }
    }
}

/// Input from one of the page controls.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Fullscreen,
    PlayToggle,
    VolumeChanged(f64),
    WaveformChanged { value: f64, max: f64 },
    TrackSelected(String),
    EffectToggled(Effect, bool),
}

/// Change the page has to apply after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    Label { id: &'static str, text: String },
    PlayState(PlayState),
    RequestFullscreen,
}

pub struct Controller<A> {
    audio: A,
    params: DrawParams,
    waveform_height: f64,
    play_state: PlayState,
    track_change: TrackChangePolicy,
}

impl<A: AudioBackend> Controller<A> {
    pub fn new(audio: A, config: &VizConfig) -> Self {
        Self {
            audio,
            params: config.draw_params,
            waveform_height: config.waveform_height,
            play_state: PlayState::Paused,
            track_change: config.track_change,
        }
    }

    pub fn params(&self) -> &DrawParams {
        &self.params
    }

    pub fn waveform_height(&self) -> f64 {
        self.waveform_height
    }

    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn handle(&mut self, event: UiEvent) -> Vec<UiUpdate> {
        debug!("ui event: {event:?}");
        match event {
            UiEvent::Fullscreen => vec![UiUpdate::RequestFullscreen],
            UiEvent::PlayToggle => vec![self.toggle_playback()],
            UiEvent::VolumeChanged(level) => {
                self.audio.set_volume(level);
                vec![UiUpdate::Label {
                    id: VOLUME_LABEL,
                    text: volume_label(level),
                }]
            }
            UiEvent::WaveformChanged { value, max } => {
                self.waveform_height = value;
                vec![UiUpdate::Label {
                    id: WAVEFORM_LABEL,
                    text: format_number(max - value),
                }]
            }
            UiEvent::TrackSelected(path) => self.select_track(&path),
            UiEvent::EffectToggled(effect, on) => {
                self.params.set(effect, on);
                Vec::new()
            }
        }
    }

    /// Draw one frame and return the progress label text for it.
    pub fn tick<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> UiUpdate {
        let text = format_progress(self.audio.current_time());
        renderer.draw(&self.params, self.waveform_height);
        UiUpdate::Label { id: PROGRESS_LABEL, text }
    }

    fn toggle_playback(&mut self) -> UiUpdate {
        if self.audio.context_state() == ContextState::Suspended {
            self.audio.resume();
        }
        self.play_state = match self.play_state {
            PlayState::Paused => match self.audio.play() {
                Ok(()) => PlayState::Playing,
                Err(e) => {
                    warn!("play failed: {e}");
                    PlayState::Paused
                }
            },
            PlayState::Playing => {
                self.audio.pause();
                PlayState::Paused
            }
        };
        UiUpdate::PlayState(self.play_state)
    }

    fn select_track(&mut self, path: &str) -> Vec<UiUpdate> {
        if let Err(e) = self.audio.load(path) {
            warn!("could not load {path}: {e}");
        }
        let pause = match self.track_change {
            TrackChangePolicy::PauseIfPlaying => self.play_state == PlayState::Playing,
            TrackChangePolicy::AlwaysPause => {
                self.play_state = PlayState::Playing;
                true
            }
        };
        if pause {
            vec![self.toggle_playback()]
        } else {
            Vec::new()
        }
    }
}

/// Slider range is `0..=2`, shown as a percentage.
pub fn volume_label(level: f64) -> String {
    format!("{}", (level / 2.0 * 100.0).round() as i64)
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
