//! Ambient audio using Kira: one looping ambience channel per process.

use anyhow::{bail, Result};
use kira::{
    manager::{backend::DefaultBackend, AudioManager, AudioManagerSettings},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    tween::Tween,
};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// The single ambient output a planet's soundscape is bound to.
pub trait AmbientSink {
    /// Bind `clip` to the ambient output and start it from the beginning.
    fn play(&mut self, clip: &str) -> Result<()>;
    /// Silence the ambient output. No-op when nothing is playing.
    fn stop(&mut self);
    /// Clip currently bound and playing.
    fn current_clip(&self) -> Option<&str>;
}

/// Kira-backed ambience with a clip library.
pub struct AudioSystem {
    manager: AudioManager,
    clips: HashMap<String, StaticSoundData>,
    ambient: Option<(String, StaticSoundHandle)>,
    crossfade: Duration,
}

impl AudioSystem {
    /// Open the default audio device.
    pub fn new() -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())?;
        Ok(Self {
            manager,
            clips: HashMap::new(),
            ambient: None,
            crossfade: Duration::from_millis(400),
        })
    }

    /// Load an ambient clip from a file.
    pub fn load_clip(&mut self, name: &str, path: &Path) -> Result<()> {
        let data = StaticSoundData::from_file(path)?;
        self.clips.insert(name.to_string(), data);
        Ok(())
    }

    /// Fade applied when ambience is replaced or stopped.
    pub fn set_crossfade(&mut self, fade: Duration) {
        self.crossfade = fade;
    }

    fn fade(&self) -> Tween {
        Tween {
            duration: self.crossfade,
            ..Default::default()
        }
    }
}

impl AmbientSink for AudioSystem {
    /// The previous ambience stops even when `clip` cannot be played.
    fn play(&mut self, clip: &str) -> Result<()> {
        self.stop();
        let Some(data) = self.clips.get(clip).cloned() else {
            bail!("unknown ambient clip {:?}", clip);
        };
        let settings = StaticSoundSettings::new()
            .loop_region(..)
            .fade_in_tween(Some(self.fade()));
        let handle = self.manager.play(data.with_settings(settings))?;
        self.ambient = Some((clip.to_string(), handle));
        Ok(())
    }

    fn stop(&mut self) {
        let fade = self.fade();
        if let Some((_, mut handle)) = self.ambient.take() {
            let _ = handle.stop(fade);
        }
    }

    fn current_clip(&self) -> Option<&str> {
        self.ambient.as_ref().map(|(name, _)| name.as_str())
    }
}

/// Ambience stand-in for headless runs: tracks the bound clip, makes no sound.
#[derive(Debug, Default)]
pub struct SilentAmbient {
    current: Option<String>,
    /// Total `play` calls, including restarts of the same clip.
    pub plays: usize,
    /// `stop` calls that actually silenced something.
    pub stops: usize,
}

impl SilentAmbient {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AmbientSink for SilentAmbient {
    fn play(&mut self, clip: &str) -> Result<()> {
        log::debug!("(silent) ambient -> {}", clip);
        self.current = Some(clip.to_string());
        self.plays += 1;
        Ok(())
    }

    fn stop(&mut self) {
        if self.current.take().is_some() {
            log::debug!("(silent) ambient stopped");
            self.stops += 1;
        }
    }

    fn current_clip(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

/// Open the audio device and load `clips`, falling back to [`SilentAmbient`] when there is no device.
///
/// A clip that fails to load is skipped with a warning; playing it later reports the error.
pub fn open_ambient<P: AsRef<Path>>(
    enabled: bool,
    clips: &[(String, P)],
    crossfade: Duration,
) -> Box<dyn AmbientSink> {
    if !enabled {
        return Box::new(SilentAmbient::new());
    }
    match AudioSystem::new() {
        Ok(mut system) => {
            system.set_crossfade(crossfade);
            for (name, path) in clips {
                if let Err(e) = system.load_clip(name, path.as_ref()) {
                    log::warn!("Ambient clip {} not loaded: {}", name, e);
                }
            }
            Box::new(system)
        }
        Err(e) => {
            log::warn!("Audio device unavailable ({}), ambience muted", e);
            Box::new(SilentAmbient::new())
        }
    }
}

// Re-export for convenience
pub use kira;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_ambient_tracks_bound_clip() {
        let mut sink = SilentAmbient::new();
        assert!(sink.current_clip().is_none());
        sink.play("wind").unwrap();
        sink.play("wind").unwrap();
        assert_eq!(sink.current_clip(), Some("wind"));
        assert_eq!(sink.plays, 2);
        sink.stop();
        sink.stop();
        assert!(sink.current_clip().is_none());
        assert_eq!(sink.stops, 1);
    }

    #[test]
    fn disabled_audio_is_silent() {
        let sink = open_ambient(
            false,
            &[("wind".to_string(), "assets/audio/wind.ogg")],
            Duration::from_millis(400),
        );
        assert!(sink.current_clip().is_none());
    }
}
