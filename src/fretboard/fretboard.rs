// fretboard.rs

use crate::music_theory::{note_at_fret, PitchClass, STANDARD_TUNING, STRING_COUNT};

/// Scale degrees assigned to each string by the three-notes-per-string
/// shape, low string first. The shape itself is fixed; position changes
/// rotate the degrees, not this table.
pub const THREE_NPS_DEGREES: [[usize; 3]; STRING_COUNT] = [
    [2, 3, 4],
    [6, 7, 1],
    [3, 4, 5],
    [7, 1, 2],
    [4, 5, 6],
    [1, 2, 3],
];

/// The five pentatonic box shapes, two degrees per string, low string
/// first. Position changes select a box; the degrees inside a box are
/// fixed.
pub const PENTATONIC_BOXES: [[[usize; 2]; STRING_COUNT]; 5] = [
    [[5, 6], [1, 2], [4, 5], [1, 3], [2, 4], [5, 6]],
    [[6, 1], [2, 3], [5, 6], [2, 4], [3, 5], [6, 1]],
    [[1, 2], [3, 4], [6, 1], [3, 5], [4, 6], [1, 2]],
    [[2, 3], [4, 5], [1, 2], [4, 6], [5, 1], [2, 3]],
    [[3, 4], [5, 6], [2, 3], [5, 1], [6, 2], [3, 4]],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelMode {
    Note,
    Degree,
}

/// Classification of a single grid cell, consumed by the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub pitch_class: PitchClass,
    pub is_root: bool,
    pub is_in_scale: bool,
    pub label: Option<String>,
}

/// Classifies one (string, fret) cell against the current scale.
/// Total over every in-range cell; out-of-scale cells carry no label.
pub fn classify(
    string_idx: usize,
    fret: u8,
    root: PitchClass,
    scale_notes: &[PitchClass],
    label_mode: LabelMode,
) -> Cell {
    let pitch_class = note_at_fret(STANDARD_TUNING[string_idx].class, fret);
    let is_root = pitch_class == root;
    let is_in_scale = scale_notes.contains(&pitch_class);
    let label = match (is_in_scale, label_mode) {
        (false, _) => None,
        (true, LabelMode::Note) => Some(pitch_class.name().to_owned()),
        (true, LabelMode::Degree) => scale_notes
            .iter()
            .position(|&n| n == pitch_class)
            .map(|i| (i + 1).to_string()),
    };
    Cell {
        pitch_class,
        is_root,
        is_in_scale,
        label,
    }
}

/// Per-string fret sets for the rotated technique pattern.
///
/// Pentatonic scales rotate through the five fixed boxes; seven-note
/// scales keep the single 3NPS table and rotate the degree instead. The
/// two schemes are deliberately asymmetric and must not be unified.
/// Every resolved fret is the lowest in-range match for its target pitch
/// class, then duplicated an octave up where it still fits. Degrees with
/// no in-range fret are dropped silently.
pub fn pattern_positions(
    scale_notes: &[PitchClass],
    pentatonic: bool,
    enabled: bool,
    offset: i32,
    fret_count: u8,
) -> [Vec<u8>; STRING_COUNT] {
    let mut positions: [Vec<u8>; STRING_COUNT] = Default::default();
    if !enabled || scale_notes.is_empty() {
        return positions;
    }

    let n = scale_notes.len();
    // A degenerate one-note scale still needs a box count of at least 1.
    let box_count = if pentatonic { 5 } else { n };
    let norm_offset = offset.rem_euclid(box_count as i32) as usize;

    for (string_idx, frets) in positions.iter_mut().enumerate() {
        let degrees: &[usize] = if pentatonic {
            &PENTATONIC_BOXES[norm_offset][string_idx]
        } else {
            &THREE_NPS_DEGREES[string_idx]
        };
        let open = STANDARD_TUNING[string_idx].class;

        for &degree in degrees {
            let degree_idx = if pentatonic {
                (degree - 1) % n
            } else {
                (degree as i32 - 1 + norm_offset as i32).rem_euclid(n as i32) as usize
            };
            let target = scale_notes[degree_idx];

            if let Some(fret) = (0..=fret_count).find(|&f| note_at_fret(open, f) == target) {
                frets.push(fret);
                if fret + 12 <= fret_count {
                    frets.push(fret + 12);
                }
            }
        }

        frets.sort_unstable();
        frets.dedup();
    }

    positions
}
