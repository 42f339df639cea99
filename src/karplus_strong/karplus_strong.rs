// karplus_strong.rs

use rand::random;
use std::f32::consts::PI;

use crate::audio_player::GuitarConfig;

/// One plucked-string voice. The timbre parameters are captured at pluck
/// time; a voice plays itself out unchanged once started.
pub struct KarplusStrong {
    buffer: Vec<f32>,
    position: usize,
    remaining_samples: usize,
    decay: f32,
    string_damping: f32,
    body_gain: f32,
}

impl KarplusStrong {
    pub fn new(
        frequency: f32,
        duration_seconds: f32,
        sample_rate: f32,
        config: &GuitarConfig,
    ) -> Self {
        // The delay line length sets the pitch; at least two samples so
        // the feedback loop always has a neighbor to average with.
        let buffer_length = ((sample_rate / frequency).ceil() as usize).max(2);
        let mut buffer = Vec::with_capacity(buffer_length);

        let mut prev = 0.0;
        for _ in 0..buffer_length {
            let white = random::<f32>() * 2.0 - 1.0;
            let excitation = config.string_tension * white;
            let filtered =
                config.string_damping * prev + (1.0 - config.string_damping) * excitation;
            buffer.push(filtered);
            prev = filtered;
        }

        let body_gain =
            (2.0 * PI * config.body_resonance / sample_rate).sin() * (1.0 - config.body_damping);

        KarplusStrong {
            buffer,
            position: 0,
            remaining_samples: (duration_seconds * sample_rate) as usize,
            decay: config.decay,
            string_damping: config.string_damping,
            body_gain,
        }
    }

    /// Next output sample, or None once the voice has decayed out.
    pub fn next_sample(&mut self) -> Option<f32> {
        if self.remaining_samples == 0 {
            return None;
        }

        let current = self.buffer[self.position];
        let next_index = (self.position + 1) % self.buffer.len();
        let next = self.buffer[next_index];

        let string_sample =
            self.decay * (self.string_damping * current + (1.0 - self.string_damping) * next);
        let body_sample = string_sample * self.body_gain;

        self.buffer[self.position] = string_sample;
        self.position = next_index;
        self.remaining_samples -= 1;

        Some(string_sample * 0.7 + body_sample * 0.3)
    }
}
