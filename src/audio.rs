//! Background music
//!
//! Audio is optional: a missing output device or track is logged and the game
//! runs silently.

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Audio manager handles music playback
pub struct AudioManager {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    bgm_sink: Option<Sink>,
    track: PathBuf,
    volume: f32,
}

impl AudioManager {
    /// Open the default output device
    pub fn new(track: &Path, volume: f32) -> Option<Self> {
        let (stream, stream_handle) = match OutputStream::try_default() {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("No audio output device: {}", e);
                return None;
            }
        };

        Some(Self {
            _stream: stream,
            stream_handle,
            bgm_sink: None,
            track: track.to_path_buf(),
            volume: volume.clamp(0.0, 1.0),
        })
    }

    /// Play background music (loops indefinitely)
    pub fn play_bgm(&mut self) {
        if let Some(sink) = &self.bgm_sink {
            sink.play();
            return;
        }

        let file = match File::open(&self.track) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Could not open music {}: {}", self.track.display(), e);
                return;
            }
        };
        let decoder = match Decoder::new(BufReader::new(file)) {
            Ok(decoder) => decoder,
            Err(e) => {
                tracing::warn!("Could not decode music {}: {}", self.track.display(), e);
                return;
            }
        };
        let sink = match Sink::try_new(&self.stream_handle) {
            Ok(sink) => sink,
            Err(e) => {
                tracing::warn!("Could not create audio sink: {}", e);
                return;
            }
        };

        sink.set_volume(self.volume);
        sink.append(decoder.repeat_infinite());
        self.bgm_sink = Some(sink);
        tracing::info!("Playing music {}", self.track.display());
    }

    /// Pause background music
    pub fn pause_bgm(&mut self) {
        if let Some(sink) = &self.bgm_sink {
            sink.pause();
        }
    }

    /// Stop background music
    pub fn stop_bgm(&mut self) {
        if let Some(sink) = self.bgm_sink.take() {
            sink.stop();
        }
    }
}
