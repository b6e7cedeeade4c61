//! Visual-effect toggles read by the renderer once per frame.

/// One of the renderer's optional visual effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    Gradient,
    Bars,
    Invert,
    Emboss,
    BarCircle,
    Progress,
    Date,
    Bounce,
    Waveform,
    Pixels,
    CircleWaveform,
    Grayscale,
    Sepia,
}

impl Effect {
    pub const ALL: [Effect; 13] = [
        Effect::Gradient,
        Effect::Bars,
        Effect::Invert,
        Effect::Emboss,
        Effect::BarCircle,
        Effect::Progress,
        Effect::Date,
        Effect::Bounce,
        Effect::Waveform,
        Effect::Pixels,
        Effect::CircleWaveform,
        Effect::Grayscale,
        Effect::Sepia,
    ];

    /// Id of the checkbox that toggles this effect.
    pub fn checkbox_id(self) -> &'static str {
        match self {
            Effect::Gradient => "gradientCB",
            Effect::Bars => "barsCB",
            Effect::Invert => "invertCB",
            Effect::Emboss => "embossCB",
            Effect::BarCircle => "barCircleCB",
            Effect::Progress => "progressCB",
            Effect::Date => "dateCB",
            Effect::Bounce => "bounceCB",
            Effect::Waveform => "waveformCB",
            Effect::Pixels => "pixelsCB",
            Effect::CircleWaveform => "circleWaveformCB",
            Effect::Grayscale => "grayscaleCB",
            Effect::Sepia => "sepiaCB",
        }
    }
}

/// Flat set of effect toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawParams {
    pub show_gradient: bool,
    pub show_bars: bool,
    pub show_invert: bool,
    pub show_emboss: bool,
    pub show_bar_circle: bool,
    pub show_progress: bool,
    pub show_date: bool,
    pub show_bounce: bool,
    pub show_waveform: bool,
    pub show_pixels: bool,
    pub show_circle_waveform: bool,
    pub show_grayscale: bool,
    pub show_sepia: bool,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            show_gradient: false,
            show_bars: false,
            show_invert: false,
            show_emboss: false,
            show_bar_circle: true,
            show_progress: true,
            show_date: true,
            show_bounce: true,
            show_waveform: true,
            show_pixels: true,
            show_circle_waveform: true,
            show_grayscale: false,
            show_sepia: false,
        }
    }
}

impl DrawParams {
    /// Everything off.
    pub fn none() -> Self {
        let mut p = Self::default();
        for e in Effect::ALL {
            p.set(e, false);
        }
        p
    }

    fn field_mut(&mut self, effect: Effect) -> &mut bool {
        match effect {
            Effect::Gradient => &mut self.show_gradient,
            Effect::Bars => &mut self.show_bars,
            Effect::Invert => &mut self.show_invert,
            Effect::Emboss => &mut self.show_emboss,
            Effect::BarCircle => &mut self.show_bar_circle,
            Effect::Progress => &mut self.show_progress,
            Effect::Date => &mut self.show_date,
            Effect::Bounce => &mut self.show_bounce,
            Effect::Waveform => &mut self.show_waveform,
            Effect::Pixels => &mut self.show_pixels,
            Effect::CircleWaveform => &mut self.show_circle_waveform,
            Effect::Grayscale => &mut self.show_grayscale,
            Effect::Sepia => &mut self.show_sepia,
        }
    }

    pub fn set(&mut self, effect: Effect, on: bool) {
        *self.field_mut(effect) = on;
    }

    pub fn get(&self, effect: Effect) -> bool {
        match effect {
            Effect::Gradient => self.show_gradient,
            Effect::Bars => self.show_bars,
            Effect::Invert => self.show_invert,
            Effect::Emboss => self.show_emboss,
            Effect::BarCircle => self.show_bar_circle,
            Effect::Progress => self.show_progress,
            Effect::Date => self.show_date,
            Effect::Bounce => self.show_bounce,
            Effect::Waveform => self.show_waveform,
            Effect::Pixels => self.show_pixels,
            Effect::CircleWaveform => self.show_circle_waveform,
            Effect::Grayscale => self.show_grayscale,
            Effect::Sepia => self.show_sepia,
        }
    }

    /// True when any per-pixel post effect is enabled.
    pub fn needs_pixel_pass(&self) -> bool {
        self.show_pixels
            || self.show_invert
            || self.show_grayscale
            || self.show_sepia
            || self.show_emboss
    }
}
