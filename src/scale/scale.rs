// scale.rs

use std::fmt;

use crate::music_theory::{note_at_fret, PitchClass};

/// The scales offered by the key/scale selectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleId {
    Major,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
    Minor,
    Pentatonic,
    MinorPentatonic,
}

impl ScaleId {
    pub const ALL: [ScaleId; 10] = [
        Self::Major,
        Self::Dorian,
        Self::Phrygian,
        Self::Lydian,
        Self::Mixolydian,
        Self::Aeolian,
        Self::Locrian,
        Self::Minor,
        Self::Pentatonic,
        Self::MinorPentatonic,
    ];

    /// Name in the vocabulary of the scale dictionary. The selector
    /// vocabulary and the dictionary vocabulary differ for three entries.
    pub fn lookup_name(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Dorian => "dorian",
            Self::Phrygian => "phrygian",
            Self::Lydian => "lydian",
            Self::Mixolydian => "mixolydian",
            Self::Aeolian => "aeolian",
            Self::Locrian => "locrian",
            Self::Minor => "natural minor",
            Self::Pentatonic => "major pentatonic",
            Self::MinorPentatonic => "minor pentatonic",
        }
    }

    pub fn is_pentatonic(self) -> bool {
        matches!(self, Self::Pentatonic | Self::MinorPentatonic)
    }
}

impl fmt::Display for ScaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Major => "Major (Ionian)",
            Self::Dorian => "Dorian",
            Self::Phrygian => "Phrygian",
            Self::Lydian => "Lydian",
            Self::Mixolydian => "Mixolydian",
            Self::Aeolian => "Minor (Aeolian)",
            Self::Locrian => "Locrian",
            Self::Minor => "Minor",
            Self::Pentatonic => "Pentatonic",
            Self::MinorPentatonic => "Minor Pentatonic",
        };
        write!(f, "{}", label)
    }
}

/// Capability the resolver needs from a scale dictionary: a
/// `"<root> <scale name>"` query answered with pitch-class names, empty
/// when the combination is unknown. Kept narrow so tests can substitute
/// a deterministic stand-in.
pub trait ScaleLookup {
    fn resolve(&self, query: &str) -> Vec<String>;
}

/// Dictionary backed by fixed semitone interval tables.
pub struct IntervalTableLookup;

impl ScaleLookup for IntervalTableLookup {
    fn resolve(&self, query: &str) -> Vec<String> {
        let (root_text, scale_name) = match query.split_once(' ') {
            Some(parts) => parts,
            None => return Vec::new(),
        };
        let root = match PitchClass::parse(root_text) {
            Ok(root) => root,
            Err(_) => return Vec::new(),
        };
        let intervals: &[u8] = match scale_name {
            "major" => &[0, 2, 4, 5, 7, 9, 11],
            "dorian" => &[0, 2, 3, 5, 7, 9, 10],
            "phrygian" => &[0, 1, 3, 5, 7, 8, 10],
            "lydian" => &[0, 2, 4, 6, 7, 9, 11],
            "mixolydian" => &[0, 2, 4, 5, 7, 9, 10],
            "aeolian" | "natural minor" => &[0, 2, 3, 5, 7, 8, 10],
            "locrian" => &[0, 1, 3, 5, 6, 8, 10],
            "major pentatonic" => &[0, 2, 4, 7, 9],
            "minor pentatonic" => &[0, 3, 5, 7, 10],
            _ => return Vec::new(),
        };
        intervals
            .iter()
            .map(|&i| note_at_fret(root, i).name().to_owned())
            .collect()
    }
}

/// Resolves a root and scale identifier into ordered pitch classes,
/// index 0 = root. The root's textual form is normalized before the
/// query. An unrecognized combination falls back to the root alone, so
/// callers never observe an empty scale.
pub fn scale_notes(
    root: &str,
    id: ScaleId,
    lookup: &dyn ScaleLookup,
) -> Result<Vec<PitchClass>, String> {
    let root = PitchClass::parse(root)?;
    let names = lookup.resolve(&format!("{} {}", root.name(), id.lookup_name()));
    let mut notes: Vec<PitchClass> = Vec::with_capacity(names.len());
    for name in &names {
        let pc = PitchClass::parse(name)?;
        if !notes.contains(&pc) {
            notes.push(pc);
        }
    }
    if notes.is_empty() {
        notes.push(root);
    }
    Ok(notes)
}

/// Pentatonic means "pentatonic identifier or a five-note resolution";
/// the resolved note count stays authoritative over the identifier.
pub fn is_pentatonic(id: ScaleId, notes: &[PitchClass]) -> bool {
    id.is_pentatonic() || notes.len() == 5
}
