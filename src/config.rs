//! Startup configuration: built-in defaults, optionally overridden from the
//! page URL query string.

use crate::params::DrawParams;
use log::warn;

/// Named tracks known at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRegistry {
    entries: Vec<(&'static str, &'static str)>,
}

impl Default for TrackRegistry {
    fn default() -> Self {
        Self {
            entries: vec![("sound1", "media/Koi no Uta.mp3")],
        }
    }
}

impl TrackRegistry {
    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }
}

/// What a track change does to a running playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackChangePolicy {
    /// Pause only if the play flag says a track is playing.
    #[default]
    PauseIfPlaying,
    /// Force the flag to playing and then pause, whatever the prior state.
    /// This is how the first version of the page behaved.
    AlwaysPause,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VizConfig {
    pub tracks: TrackRegistry,
    /// Registry name or literal path of the track loaded at startup.
    pub initial_track: String,
    pub draw_params: DrawParams,
    pub waveform_height: f64,
    pub fft_size: u32,
    pub track_change: TrackChangePolicy,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            tracks: TrackRegistry::default(),
            initial_track: "sound1".to_string(),
            draw_params: DrawParams::default(),
            waveform_height: 200.0,
            fft_size: 256,
            track_change: TrackChangePolicy::default(),
        }
    }
}

impl VizConfig {
    /// Path of the startup track, resolving registry names.
    pub fn initial_track_path(&self) -> String {
        self.tracks
            .get(&self.initial_track)
            .map(str::to_string)
            .unwrap_or_else(|| self.initial_track.clone())
    }

    /// Apply `key=value` overrides. Unknown keys are ignored and bad values are
    /// logged and skipped.
    pub fn apply_query<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "track" if !value.is_empty() => self.initial_track = value.to_string(),
                "fft" => match value.parse::<u32>() {
                    Ok(n) if n.is_power_of_two() && (32..=32768).contains(&n) => self.fft_size = n,
                    _ => warn!("ignoring fft={value}: expected a power of two in 32..=32768"),
                },
                "trackchange" => match value {
                    "legacy" => self.track_change = TrackChangePolicy::AlwaysPause,
                    "when-playing" => self.track_change = TrackChangePolicy::PauseIfPlaying,
                    _ => warn!("ignoring trackchange={value}"),
                },
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_track_resolves_through_registry() {
        let cfg = VizConfig::default();
        assert_eq!(cfg.initial_track_path(), "media/Koi no Uta.mp3");
        let tracks: Vec<_> = cfg.tracks.iter().collect();
        assert_eq!(tracks, [("sound1", "media/Koi no Uta.mp3")]);
    }

    #[test]
    fn query_overrides() {
        let mut cfg = VizConfig::default();
        cfg.apply_query([
            ("track", "media/other.mp3"),
            ("fft", "1024"),
            ("trackchange", "legacy"),
            ("x", "y"),
        ]);
        assert_eq!(cfg.initial_track_path(), "media/other.mp3");
        assert_eq!(cfg.fft_size, 1024);
        assert_eq!(cfg.track_change, TrackChangePolicy::AlwaysPause);
    }

    #[test]
    fn bad_query_values_keep_defaults() {
        let mut cfg = VizConfig::default();
        cfg.apply_query([
            ("fft", "1000"),
            ("fft", "16"),
            ("trackchange", "sometimes"),
            ("track", ""),
        ]);
        assert_eq!(cfg, VizConfig::default());
    }
}
