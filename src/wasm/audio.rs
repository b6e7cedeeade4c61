//! Web Audio graph: `<audio>` → analyser → gain → speakers.

use crate::audio::{AudioBackend, ContextState};
use crate::error::VizResult;
use log::{info, warn};
use web_sys::{
    AnalyserNode, AudioContext, AudioContextState, GainNode, HtmlAudioElement,
    MediaElementAudioSourceNode,
};

pub struct WebAudio {
    ctx: AudioContext,
    element: HtmlAudioElement,
    analyser: AnalyserNode,
    gain: GainNode,
    _source: MediaElementAudioSourceNode,
}

impl WebAudio {
    pub fn new(path: &str, fft_size: u32) -> VizResult<Self> {
        let ctx = AudioContext::new()?;
        let element = HtmlAudioElement::new_with_src(path)?;
        let source = ctx.create_media_element_source(&element)?;

        let analyser = ctx.create_analyser()?;
        analyser.set_fft_size(fft_size);

        let gain = ctx.create_gain()?;
        gain.gain().set_value(1.0);

        source.connect_with_audio_node(&analyser)?;
        analyser.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;

        info!("audio graph ready, track {path}, fft {fft_size}");
        Ok(Self {
            ctx,
            element,
            analyser,
            gain,
            _source: source,
        })
    }

    pub fn analyser(&self) -> &AnalyserNode {
        &self.analyser
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }
}

impl AudioBackend for WebAudio {
    fn load(&mut self, path: &str) -> VizResult<()> {
        self.element.set_src(path);
        info!("loaded {path}");
        Ok(())
    }

    fn play(&mut self) -> VizResult<()> {
        // The returned promise only settles once playback actually starts.
        self.element.play()?;
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            warn!("pause failed: {e:?}");
        }
    }

    fn set_volume(&mut self, level: f64) {
        self.gain.gain().set_value(level as f32);
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn duration(&self) -> Option<f64> {
        let d = self.element.duration();
        d.is_finite().then_some(d)
    }

    fn context_state(&self) -> ContextState {
        match self.ctx.state() {
            AudioContextState::Suspended => ContextState::Suspended,
            AudioContextState::Running => ContextState::Running,
            _ => ContextState::Closed,
        }
    }

    fn resume(&mut self) {
        if let Err(e) = self.ctx.resume() {
            warn!("resume failed: {e:?}");
        }
    }
}
