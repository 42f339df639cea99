// audio_player.rs

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream};
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::karplus_strong::KarplusStrong;
use crate::music_theory::Pitch;

/// How long a clicked cell rings out.
const PLUCK_SECONDS: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timbre {
    Acoustic,
    Electric,
    Nylon,
    Custom,
}

impl fmt::Display for Timbre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timbre::Acoustic => write!(f, "Acoustic"),
            Timbre::Electric => write!(f, "Electric"),
            Timbre::Nylon => write!(f, "Nylon"),
            Timbre::Custom => write!(f, "Custom"),
        }
    }
}

/// String-model parameters for one guitar timbre.
#[derive(Clone)]
pub struct GuitarConfig {
    pub timbre: Timbre,
    pub decay: f32,
    pub string_damping: f32,
    pub body_resonance: f32,
    pub body_damping: f32,
    pub string_tension: f32,
}

impl GuitarConfig {
    pub fn acoustic() -> Self {
        Self {
            timbre: Timbre::Acoustic,
            decay: 0.995,
            string_damping: 0.4,
            body_resonance: 150.0,
            body_damping: 0.2,
            string_tension: 0.8,
        }
    }

    pub fn electric() -> Self {
        Self {
            timbre: Timbre::Electric,
            decay: 0.999,
            string_damping: 0.1,
            body_resonance: 70.0,
            body_damping: 0.8,
            string_tension: 0.8,
        }
    }

    pub fn nylon() -> Self {
        Self {
            timbre: Timbre::Nylon,
            decay: 0.990,
            string_damping: 0.6,
            body_resonance: 120.0,
            body_damping: 0.3,
            string_tension: 0.5,
        }
    }

    pub fn custom() -> Self {
        Self {
            timbre: Timbre::Custom,
            decay: 0.996,
            string_damping: 0.5,
            body_resonance: 100.0,
            body_damping: 0.5,
            string_tension: 0.7,
        }
    }
}

/// Output half of the audio path: one cpal stream summing whatever
/// plucked voices are currently ringing. Plucks are fire-and-forget.
pub struct AudioPlayer {
    _stream: Stream,
    active_voices: Arc<Mutex<Vec<KarplusStrong>>>,
    volume: Arc<Mutex<f32>>,
    pub sample_rate: f32,
}

impl AudioPlayer {
    pub fn new() -> Result<Self, String> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("No output device available")?;
        let config = device.default_output_config().map_err(|e| e.to_string())?;
        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let active_voices = Arc::new(Mutex::new(Vec::new()));
        let volume = Arc::new(Mutex::new(0.5f32));

        let voices_for_stream = Arc::clone(&active_voices);
        let volume_for_stream = Arc::clone(&volume);

        let stream = match config.sample_format() {
            SampleFormat::F32 => device
                .build_output_stream(
                    &config.into(),
                    move |data: &mut [f32], _| {
                        write_frames(data, channels, &voices_for_stream, &volume_for_stream);
                    },
                    |err| eprintln!("Output stream error: {}", err),
                    None,
                )
                .map_err(|e| e.to_string())?,
            other => return Err(format!("Unsupported sample format: {:?}", other)),
        };

        stream.play().map_err(|e| e.to_string())?;

        Ok(Self {
            _stream: stream,
            active_voices,
            volume,
            sample_rate,
        })
    }

    pub fn set_volume(&self, volume: f32) {
        *self.volume.lock().unwrap() = volume.clamp(0.0, 1.0);
    }

    /// Starts a pluck of the given absolute pitch.
    pub fn pluck(&self, pitch: Pitch, config: &GuitarConfig) {
        let voice = KarplusStrong::new(pitch.frequency(), PLUCK_SECONDS, self.sample_rate, config);
        self.active_voices.lock().unwrap().push(voice);
    }
}

fn write_frames(
    output: &mut [f32],
    channels: usize,
    active_voices: &Arc<Mutex<Vec<KarplusStrong>>>,
    volume: &Arc<Mutex<f32>>,
) {
    let mut voices = active_voices.lock().unwrap();
    let volume = *volume.lock().unwrap();

    for frame in output.chunks_mut(channels) {
        let mut value = 0.0;

        // Sum samples from all ringing voices, dropping finished ones.
        voices.retain_mut(|voice| match voice.next_sample() {
            Some(sample) => {
                value += sample;
                true
            }
            None => false,
        });

        value = (value * volume).clamp(-1.0, 1.0);

        for sample in frame.iter_mut() {
            *sample = value;
        }
    }
}
