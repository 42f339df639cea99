// tuner.rs

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream};
use rustfft::{num_complex::Complex, FftPlanner};
use std::sync::{Arc, Mutex};

use crate::music_theory::{freq_to_midi, PitchClass};

// Analysis frame and hop sizes in samples.
pub const FRAME_SIZE: usize = 2048;
const HOP_SIZE: usize = 512;

// RMS below this is treated as silence.
const SILENCE_THRESHOLD: f32 = 0.01;

// Absolute threshold on the normalized difference function.
const YIN_THRESHOLD: f32 = 0.1;

// Detection range, generously bracketing the guitar.
const MIN_FREQUENCY: f32 = 60.0;
const MAX_FREQUENCY: f32 = 1500.0;

const MAX_HISTORY: usize = 100;

/// One published tuner result: the nearest note and how far off it the
/// detected pitch is.
#[derive(Clone, Debug, PartialEq)]
pub struct PitchReading {
    pub note: &'static str,
    pub cents: i32,
    pub frequency: f32,
}

/// Snaps a detected frequency to the nearest note name plus a signed
/// cents offset.
pub(crate) fn reading_from_frequency(frequency: f32) -> PitchReading {
    let midi = freq_to_midi(frequency);
    let rounded = midi.round();
    let note = PitchClass::new((rounded as i32).rem_euclid(12) as u8).name();
    let cents = ((midi - rounded) * 100.0).round() as i32;
    PitchReading {
        note,
        cents,
        frequency,
    }
}

/// Microphone side of the tuner. The cpal callback appends samples to a
/// shared buffer; complete frames are analyzed in place and the latest
/// result published. `reading` holds None while no clear pitch is heard.
pub struct Tuner {
    stream: Option<Stream>,
    pub sample_rate: f32,
    input_buffer: Arc<Mutex<Vec<f32>>>,
    pub reading: Arc<Mutex<Option<PitchReading>>>,
    pub waveform_history: Arc<Mutex<Vec<Vec<f32>>>>,
    pub spectrum_history: Arc<Mutex<Vec<Vec<f32>>>>,
}

impl Tuner {
    pub fn new() -> Result<Self, String> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or("No input device available")?;
        let config = device.default_input_config().map_err(|e| e.to_string())?;
        let sample_rate = config.sample_rate().0 as f32;

        Ok(Self {
            stream: None,
            sample_rate,
            input_buffer: Arc::new(Mutex::new(Vec::new())),
            reading: Arc::new(Mutex::new(None)),
            waveform_history: Arc::new(Mutex::new(Vec::new())),
            spectrum_history: Arc::new(Mutex::new(Vec::new())),
        })
    }

    pub fn start(&mut self) -> Result<(), String> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or("No input device available")?;
        let config = device.default_input_config().map_err(|e| e.to_string())?;

        let sample_rate = self.sample_rate;
        let input_buffer = Arc::clone(&self.input_buffer);
        let reading = Arc::clone(&self.reading);
        let waveform_history = Arc::clone(&self.waveform_history);
        let spectrum_history = Arc::clone(&self.spectrum_history);

        let stream = match config.sample_format() {
            SampleFormat::F32 => device
                .build_input_stream(
                    &config.into(),
                    move |data: &[f32], _| {
                        process_audio_input(
                            data,
                            sample_rate,
                            &input_buffer,
                            &reading,
                            &waveform_history,
                            &spectrum_history,
                        );
                    },
                    |err| eprintln!("Input stream error: {}", err),
                    None,
                )
                .map_err(|e| e.to_string())?,
            other => return Err(format!("Unsupported sample format: {:?}", other)),
        };

        stream.play().map_err(|e| e.to_string())?;
        self.stream = Some(stream);

        Ok(())
    }

    /// Dropping the stream closes the capture session and releases the
    /// device handle.
    pub fn stop(&mut self) {
        self.stream = None;
        *self.reading.lock().unwrap() = None;
    }
}

impl Drop for Tuner {
    fn drop(&mut self) {
        self.stop();
    }
}

fn process_audio_input(
    data: &[f32],
    sample_rate: f32,
    input_buffer: &Arc<Mutex<Vec<f32>>>,
    reading: &Arc<Mutex<Option<PitchReading>>>,
    waveform_history: &Arc<Mutex<Vec<Vec<f32>>>>,
    spectrum_history: &Arc<Mutex<Vec<Vec<f32>>>>,
) {
    {
        let mut buffer = input_buffer.lock().unwrap();
        buffer.extend_from_slice(data);
    }

    loop {
        let mut buffer = input_buffer.lock().unwrap();

        if buffer.len() < FRAME_SIZE {
            break;
        }

        let frame = buffer[..FRAME_SIZE].to_vec();
        // Remove the processed samples, keeping the overlap.
        buffer.drain(..HOP_SIZE);
        drop(buffer);

        let energy = frame.iter().map(|x| x * x).sum::<f32>() / frame.len() as f32;
        if energy < SILENCE_THRESHOLD * SILENCE_THRESHOLD {
            *reading.lock().unwrap() = None;
            continue;
        }

        let normalized = normalize_frame(&frame);

        {
            let mut waveform_hist = waveform_history.lock().unwrap();
            waveform_hist.push(normalized.clone());
            if waveform_hist.len() > MAX_HISTORY {
                waveform_hist.remove(0);
            }
        }

        {
            let mut spectrum_hist = spectrum_history.lock().unwrap();
            spectrum_hist.push(compute_spectrum(&frame));
            if spectrum_hist.len() > MAX_HISTORY {
                spectrum_hist.remove(0);
            }
        }

        // Latest-wins publication; a frame with no clear pitch clears
        // the readout rather than holding a stale note.
        *reading.lock().unwrap() = yin_pitch(&frame, sample_rate).map(reading_from_frequency);
    }
}

/// YIN pitch estimate over one frame. Returns None when no lag inside
/// the detection range clears the threshold.
pub(crate) fn yin_pitch(frame: &[f32], sample_rate: f32) -> Option<f32> {
    let min_tau = (sample_rate / MAX_FREQUENCY) as usize;
    let max_tau = ((sample_rate / MIN_FREQUENCY) as usize).min(frame.len() / 2);
    if min_tau.max(2) >= max_tau {
        return None;
    }

    // Squared difference against the lagged frame, for every candidate lag.
    let mut difference = vec![0.0f32; max_tau + 1];
    for (tau, diff) in difference.iter_mut().enumerate().skip(1) {
        let mut sum = 0.0;
        for i in 0..frame.len() - tau {
            let delta = frame[i] - frame[i + tau];
            sum += delta * delta;
        }
        *diff = sum;
    }

    // Cumulative mean normalization removes the zero-lag bias.
    let mut cmndf = vec![1.0f32; max_tau + 1];
    let mut running_sum = 0.0;
    for tau in 1..=max_tau {
        running_sum += difference[tau];
        if running_sum > 0.0 {
            cmndf[tau] = difference[tau] * tau as f32 / running_sum;
        }
    }

    // First lag under the threshold, walked down to its local minimum.
    let mut tau = min_tau.max(2);
    let tau = loop {
        if tau > max_tau {
            return None;
        }
        if cmndf[tau] < YIN_THRESHOLD {
            while tau + 1 <= max_tau && cmndf[tau + 1] < cmndf[tau] {
                tau += 1;
            }
            break tau;
        }
        tau += 1;
    };

    // Parabolic interpolation around the minimum for sub-sample accuracy.
    let refined = if tau > 0 && tau < max_tau {
        let s0 = cmndf[tau - 1];
        let s1 = cmndf[tau];
        let s2 = cmndf[tau + 1];
        let denom = s0 - 2.0 * s1 + s2;
        if denom.abs() > f32::EPSILON {
            tau as f32 + (s0 - s2) / (2.0 * denom)
        } else {
            tau as f32
        }
    } else {
        tau as f32
    };

    Some(sample_rate / refined)
}

/// FFT magnitude spectrum of one frame, DC through Nyquist.
pub(crate) fn compute_spectrum(frame: &[f32]) -> Vec<f32> {
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(frame.len());
    let mut buffer: Vec<Complex<f32>> =
        frame.iter().map(|&s| Complex { re: s, im: 0.0 }).collect();
    fft.process(&mut buffer);
    buffer
        .iter()
        .take(frame.len() / 2 + 1)
        .map(|c| c.norm())
        .collect()
}

/// Scales a frame by its own peak amplitude for display.
fn normalize_frame(frame: &[f32]) -> Vec<f32> {
    let max_amplitude = frame.iter().map(|x| x.abs()).fold(0.0, f32::max);
    if max_amplitude == 0.0 {
        vec![0.0; frame.len()]
    } else {
        frame.iter().map(|&x| x / max_amplitude).collect()
    }
}
