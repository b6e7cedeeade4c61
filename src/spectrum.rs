//! Canvas geometry derived from analyser data.

use std::f64::consts::TAU;

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Line segment in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

pub const BAR_SPACING: f64 = 4.0;
pub const BAR_MARGIN: f64 = 5.0;

/// Frequency bars standing on the bottom edge, one per bin.
///
/// A bin value of 255 reaches `max_height`.
pub fn bars(bins: &[u8], width: f64, height: f64, max_height: f64) -> Vec<Rect> {
    if bins.is_empty() {
        return Vec::new();
    }
    let n = bins.len() as f64;
    let usable = width - BAR_MARGIN * 2.0 - BAR_SPACING * (n - 1.0);
    let w = (usable / n).max(1.0);
    bins.iter()
        .enumerate()
        .map(|(i, &v)| {
            let h = f64::from(v) / 255.0 * max_height;
            Rect {
                x: BAR_MARGIN + i as f64 * (w + BAR_SPACING),
                y: height - h,
                w,
                h,
            }
        })
        .collect()
}

/// Bars radiating out of a circle of `radius`, evenly spread around it.
pub fn radial_bars(bins: &[u8], center: (f64, f64), radius: f64, max_len: f64) -> Vec<Segment> {
    let n = bins.len() as f64;
    bins.iter()
        .enumerate()
        .map(|(i, &v)| {
            let angle = i as f64 / n * TAU;
            let len = f64::from(v) / 255.0 * max_len;
            let (s, c) = angle.sin_cos();
            Segment {
                from: (center.0 + c * radius, center.1 + s * radius),
                to: (center.0 + c * (radius + len), center.1 + s * (radius + len)),
            }
        })
        .collect()
}

/// Time-domain samples as a polyline across the full width, centred on
/// `baseline`. Sample 128 is silence.
pub fn waveform(samples: &[u8], width: f64, baseline: f64, amplitude: f64) -> Vec<(f64, f64)> {
    if samples.is_empty() {
        return Vec::new();
    }
    let step = if samples.len() > 1 {
        width / (samples.len() - 1) as f64
    } else {
        0.0
    };
    samples
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64 * step, baseline + centered(v) * amplitude))
        .collect()
}

/// Time-domain samples wrapped around a circle; the path is closed.
pub fn circle_waveform(
    samples: &[u8],
    center: (f64, f64),
    radius: f64,
    amplitude: f64,
) -> Vec<(f64, f64)> {
    let n = samples.len() as f64;
    let mut points: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let (s, c) = (i as f64 / n * TAU).sin_cos();
            let r = radius + centered(v) * amplitude;
            (center.0 + c * r, center.1 + s * r)
        })
        .collect();
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

/// Mean level of the lowest `fraction` of bins, `0.0..=1.0`.
pub fn low_band_level(bins: &[u8], fraction: f64) -> f64 {
    let take = ((bins.len() as f64 * fraction).ceil() as usize).clamp(1, bins.len().max(1));
    let slice = &bins[..take.min(bins.len())];
    if slice.is_empty() {
        return 0.0;
    }
    slice.iter().map(|&v| f64::from(v)).sum::<f64>() / (slice.len() as f64 * 255.0)
}

/// Played fraction of the track, `0.0` while the duration is unknown.
pub fn progress_fraction(current: f64, duration: Option<f64>) -> f64 {
    match duration {
        Some(d) if d.is_finite() && d > 0.0 => (current / d).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

fn centered(v: u8) -> f64 {
    (f64::from(v) - 128.0) / 128.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn bars_fill_width_between_margins() {
        let r = bars(&[0, 255, 51], 110.0, 300.0, 200.0);
        assert_eq!(r.len(), 3);
        // usable = 110 - 10 - 8 = 92
        let w = 92.0 / 3.0;
        assert!(close(r[0].w, w));
        assert!(close(r[2].x + r[2].w, 110.0 - BAR_MARGIN));
        assert!(close(r[1].h, 200.0) && close(r[1].y, 100.0));
        assert!(close(r[2].h, 40.0));
        assert!(close(r[0].h, 0.0) && close(r[0].y, 300.0));
        assert!(bars(&[], 100.0, 100.0, 10.0).is_empty());
    }

    #[test]
    fn radial_bars_start_on_circle() {
        let segs = radial_bars(&[255; 4], (0.0, 0.0), 10.0, 5.0);
        assert_eq!(segs.len(), 4);
        assert!(close(segs[0].from.0, 10.0) && close(segs[0].to.0, 15.0));
        assert!(close(segs[1].from.1, 10.0) && close(segs[1].to.1, 15.0));
    }

    #[test]
    fn silent_waveform_is_flat_on_baseline() {
        let pts = waveform(&[128; 5], 100.0, 200.0, 50.0);
        assert_eq!(pts.len(), 5);
        assert!(pts.iter().all(|&(_, y)| close(y, 200.0)));
        assert!(close(pts[4].0, 100.0));
        assert!(close(waveform(&[0], 100.0, 10.0, 8.0)[0].1, 2.0));
    }

    #[test]
    fn circle_waveform_closes_path() {
        let pts = circle_waveform(&[128; 8], (5.0, 5.0), 3.0, 1.0);
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[0], pts[8]);
        assert!(circle_waveform(&[], (0.0, 0.0), 1.0, 1.0).is_empty());
    }

    #[test]
    fn low_band_and_progress() {
        assert!(close(low_band_level(&[255, 255, 0, 0], 0.5), 1.0));
        assert!(close(low_band_level(&[], 0.5), 0.0));
        assert!(close(progress_fraction(30.0, Some(120.0)), 0.25));
        assert!(close(progress_fraction(500.0, Some(120.0)), 1.0));
        assert!(close(progress_fraction(3.0, None), 0.0));
        assert!(close(progress_fraction(3.0, Some(f64::NAN)), 0.0));
    }
}
