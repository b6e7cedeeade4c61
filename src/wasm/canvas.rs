//! 2D canvas renderer fed by the analyser node.

use crate::controller::Renderer;
use crate::effects;
use crate::error::{VizError, VizResult};
use crate::params::DrawParams;
use crate::spectrum::{self, progress_fraction};
use log::warn;
use std::f64::consts::TAU;
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{
    AnalyserNode, CanvasRenderingContext2d, HtmlAudioElement, HtmlCanvasElement, ImageData,
};

use super::utils;

const BACKGROUND: &str = "black";
const BAR_COLOR: &str = "rgba(255,255,255,0.50)";
const CIRCLE_BAR_COLOR: &str = "rgba(0,200,255,0.70)";
const WAVEFORM_COLOR: &str = "rgba(255,255,255,0.90)";
const PROGRESS_COLOR: &str = "rgba(255,80,120,0.85)";

pub struct CanvasVisualizer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    analyser: AnalyserNode,
    media: HtmlAudioElement,
    freq: Vec<u8>,
    time: Vec<u8>,
    warned: bool,
}

impl CanvasVisualizer {
    pub fn setup(
        canvas: HtmlCanvasElement,
        analyser: AnalyserNode,
        media: HtmlAudioElement,
    ) -> VizResult<Self> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(VizError::Unsupported("2d canvas context"))?
            .dyn_into()
            .map_err(|_| VizError::Unsupported("2d canvas context"))?;

        let freq = vec![0; analyser.frequency_bin_count() as usize];
        let time = vec![0; analyser.fft_size() as usize];
        Ok(Self {
            canvas,
            ctx,
            analyser,
            media,
            freq,
            time,
            warned: false,
        })
    }

    fn size(&self) -> (f64, f64) {
        (f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn try_draw(&mut self, params: &DrawParams, waveform_height: f64) -> Result<(), JsValue> {
        self.analyser.get_byte_frequency_data(&mut self.freq);
        self.analyser.get_byte_time_domain_data(&mut self.time);

        let (w, h) = self.size();
        let center = (w / 2.0, h / 2.0);
        let radius = w.min(h) / 4.0;
        let ctx = &self.ctx;

        ctx.save();
        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, w, h);

        if params.show_gradient {
            let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
            gradient.add_color_stop(0.0, "#1a2a6c")?;
            gradient.add_color_stop(0.5, "#b21f1f")?;
            gradient.add_color_stop(1.0, "#fdbb2d")?;
            ctx.set_global_alpha(0.6);
            ctx.set_fill_style_canvas_gradient(&gradient);
            ctx.fill_rect(0.0, 0.0, w, h);
            ctx.set_global_alpha(1.0);
        }

        if params.show_bars {
            ctx.set_fill_style_str(BAR_COLOR);
            for bar in spectrum::bars(&self.freq, w, h, h * 0.6) {
                ctx.fill_rect(bar.x, bar.y, bar.w, bar.h);
            }
        }

        if params.show_bar_circle {
            ctx.set_stroke_style_str(CIRCLE_BAR_COLOR);
            ctx.set_line_width(2.0);
            ctx.begin_path();
            for seg in spectrum::radial_bars(&self.freq, center, radius, radius * 0.8) {
                ctx.move_to(seg.from.0, seg.from.1);
                ctx.line_to(seg.to.0, seg.to.1);
            }
            ctx.stroke();
        }

        if params.show_waveform {
            let points = spectrum::waveform(&self.time, w, waveform_height, h / 4.0);
            stroke_path(ctx, &points, WAVEFORM_COLOR);
        }

        if params.show_circle_waveform {
            let points = spectrum::circle_waveform(&self.time, center, radius * 0.9, radius * 0.3);
            stroke_path(ctx, &points, &utils::random_color());
        }

        if params.show_bounce {
            let level = spectrum::low_band_level(&self.freq, 0.1);
            ctx.set_fill_style_str("rgba(255,220,0,0.8)");
            ctx.begin_path();
            ctx.arc(center.0, h - 20.0 - level * (h - 60.0), 12.0 + level * 12.0, 0.0, TAU)?;
            ctx.fill();
        }

        if params.show_progress {
            let duration = finite(self.media.duration());
            let fraction = progress_fraction(self.media.current_time(), duration);
            ctx.set_fill_style_str(PROGRESS_COLOR);
            ctx.fill_rect(0.0, h - 6.0, w * fraction, 6.0);
        }

        if params.show_date {
            let now: String = js_sys::Date::new_0()
                .to_locale_string("en-US", &JsValue::UNDEFINED)
                .into();
            ctx.set_fill_style_str("white");
            ctx.set_font("16px sans-serif");
            ctx.fill_text(&now, 10.0, 24.0)?;
        }
        ctx.restore();

        if params.needs_pixel_pass() && w >= 1.0 && h >= 1.0 {
            let image = ctx.get_image_data(0.0, 0.0, w, h)?;
            let mut data = image.data().0;
            effects::apply(params, &mut data, image.width() as usize, &mut || utils::random());
            let out = ImageData::new_with_u8_clamped_array_and_sh(
                Clamped(&data[..]),
                image.width(),
                image.height(),
            )?;
            ctx.put_image_data(&out, 0.0, 0.0)?;
        }
        Ok(())
    }
}

impl Renderer for CanvasVisualizer {
    fn draw(&mut self, params: &DrawParams, waveform_height: f64) {
        if let Err(e) = self.try_draw(params, waveform_height) {
            if !self.warned {
                warn!("frame skipped: {e:?}");
                self.warned = true;
            }
        }
    }
}

fn stroke_path(ctx: &CanvasRenderingContext2d, points: &[(f64, f64)], color: &str) {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return;
    };
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(x0, y0);
    for &(x, y) in rest {
        ctx.line_to(x, y);
    }
    ctx.stroke();
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}
