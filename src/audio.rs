//! Contract between the controller and whatever plays the sound.

use crate::error::VizResult;

/// State of the underlying audio context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Suspended,
    Running,
    Closed,
}

/// Playback backend driven by the controller.
///
/// On the web this is `wasm::audio::WebAudio`; tests use a recording fake.
pub trait AudioBackend {
    /// Replace the current source with the file at `path`.
    fn load(&mut self, path: &str) -> VizResult<()>;
    fn play(&mut self) -> VizResult<()>;
    fn pause(&mut self);
    /// `level` is the raw slider value, `0.0..=2.0`.
    fn set_volume(&mut self, level: f64);
    /// Seconds into the current track.
    fn current_time(&self) -> f64;
    /// Track length in seconds, `None` while unknown.
    fn duration(&self) -> Option<f64>;
    fn context_state(&self) -> ContextState;
    fn resume(&mut self);
}
