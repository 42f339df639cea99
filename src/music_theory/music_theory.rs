// music_theory.rs

use std::fmt;

/// Canonical sharp spellings, indexed by chromatic semitone.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// One of the twelve chromatic pitch classes. Always stored reduced
/// modulo 12; equality compares the chromatic index, so enharmonic
/// spellings of the same pitch parse to equal values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const fn new(semitone: u8) -> Self {
        PitchClass(semitone % 12)
    }

    /// Parses a textual note name: one letter, optionally followed by a
    /// single `#` or `b`. Case-insensitive, flats normalize to the sharp
    /// spelling. Anything else is an invalid note.
    pub fn parse(text: &str) -> Result<Self, String> {
        let text = text.trim();
        let mut chars = text.chars();
        let letter = chars
            .next()
            .ok_or_else(|| "Invalid note: empty string".to_owned())?;
        let base: i8 = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            other => return Err(format!("Invalid note letter: {}", other)),
        };
        let alter: i8 = match chars.next() {
            None => 0,
            Some('#') => 1,
            Some('b') => -1,
            Some(other) => return Err(format!("Invalid accidental: {}", other)),
        };
        if chars.next().is_some() {
            return Err(format!("Invalid note: {}", text));
        }
        Ok(PitchClass((base + alter).rem_euclid(12) as u8))
    }

    pub fn semitone(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        NOTE_NAMES[self.0 as usize]
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The pitch class sounding `fret` semitones above an open string.
pub fn note_at_fret(open: PitchClass, fret: u8) -> PitchClass {
    PitchClass::new(((open.0 as u32 + fret as u32) % 12) as u8)
}

/// A pitch class pinned to an octave. Only needed where absolute pitch
/// matters: playback frequency and the tuner readout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pitch {
    pub class: PitchClass,
    pub octave: u8,
}

impl Pitch {
    pub const fn new(class: PitchClass, octave: u8) -> Self {
        Pitch { class, octave }
    }

    /// MIDI note number (C4 = 60).
    pub fn midi(self) -> u8 {
        (self.octave + 1) * 12 + self.class.0
    }

    /// Inverse of `midi`. Callers only hand in guitar-range numbers, so
    /// the octave subtraction cannot underflow.
    pub fn from_midi(midi: u8) -> Self {
        Pitch {
            class: PitchClass::new(midi % 12),
            octave: midi / 12 - 1,
        }
    }

    /// The absolute pitch sounding `fret` semitones above this one.
    pub fn at_fret(self, fret: u8) -> Self {
        Pitch::from_midi(self.midi() + fret)
    }

    /// Equal-temperament frequency, A4 = 440 Hz.
    pub fn frequency(self) -> f32 {
        440.0 * 2.0_f32.powf((self.midi() as f32 - 69.0) / 12.0)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class.name(), self.octave)
    }
}

/// Converts a frequency in Hz to a fractional MIDI note number.
pub fn freq_to_midi(freq: f32) -> f32 {
    69.0 + 12.0 * (freq / 440.0).log2()
}

/// Standard tuning, low string first: E2 A2 D3 G3 B3 E4.
pub const STANDARD_TUNING: [Pitch; 6] = [
    Pitch::new(PitchClass::new(4), 2),
    Pitch::new(PitchClass::new(9), 2),
    Pitch::new(PitchClass::new(2), 3),
    Pitch::new(PitchClass::new(7), 3),
    Pitch::new(PitchClass::new(11), 3),
    Pitch::new(PitchClass::new(4), 4),
];

pub const STRING_COUNT: usize = 6;
