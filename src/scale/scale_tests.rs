#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use crate::music_theory::PitchClass;
    use crate::scale::scale::{
        is_pentatonic, scale_notes, IntervalTableLookup, ScaleId, ScaleLookup,
    };

    fn names(notes: &[PitchClass]) -> Vec<&'static str> {
        notes.iter().map(|pc| pc.name()).collect()
    }

    struct EmptyLookup;

    impl ScaleLookup for EmptyLookup {
        fn resolve(&self, _query: &str) -> Vec<String> {
            Vec::new()
        }
    }

    struct RecordingLookup {
        queries: RefCell<Vec<String>>,
    }

    impl ScaleLookup for RecordingLookup {
        fn resolve(&self, query: &str) -> Vec<String> {
            self.queries.borrow_mut().push(query.to_owned());
            Vec::new()
        }
    }

    #[test]
    fn test_c_major_notes() {
        let notes = scale_notes("C", ScaleId::Major, &IntervalTableLookup).unwrap();
        assert_eq!(names(&notes), vec!["C", "D", "E", "F", "G", "A", "B"]);
    }

    #[test]
    fn test_minor_matches_aeolian() {
        let minor = scale_notes("A", ScaleId::Minor, &IntervalTableLookup).unwrap();
        let aeolian = scale_notes("A", ScaleId::Aeolian, &IntervalTableLookup).unwrap();
        assert_eq!(minor, aeolian);
        assert_eq!(names(&minor), vec!["A", "B", "C", "D", "E", "F", "G"]);
    }

    #[test]
    fn test_minor_pentatonic_notes() {
        let notes = scale_notes("E", ScaleId::MinorPentatonic, &IntervalTableLookup).unwrap();
        assert_eq!(names(&notes), vec!["E", "G", "A", "B", "D"]);
    }

    #[test]
    fn test_every_scale_resolves_with_root_first() {
        for id in ScaleId::ALL {
            let notes = scale_notes("F#", id, &IntervalTableLookup).unwrap();
            let expected_len = if id.is_pentatonic() { 5 } else { 7 };
            assert_eq!(notes.len(), expected_len, "{}", id);
            assert_eq!(notes[0], PitchClass::parse("F#").unwrap(), "{}", id);
        }
    }

    #[test]
    fn test_root_text_is_normalized_before_lookup() {
        let sharp = scale_notes("c#", ScaleId::Dorian, &IntervalTableLookup).unwrap();
        let flat = scale_notes("Db", ScaleId::Dorian, &IntervalTableLookup).unwrap();
        assert_eq!(sharp, flat);
    }

    #[test]
    fn test_unrecognized_combination_falls_back_to_root() {
        let notes = scale_notes("G", ScaleId::Major, &EmptyLookup).unwrap();
        assert_eq!(names(&notes), vec!["G"]);
    }

    #[test]
    fn test_invalid_root_is_an_error() {
        assert!(scale_notes("X", ScaleId::Major, &IntervalTableLookup).is_err());
    }

    #[test]
    fn test_lookup_vocabulary_translation() {
        let lookup = RecordingLookup {
            queries: RefCell::new(Vec::new()),
        };
        scale_notes("C", ScaleId::Minor, &lookup).unwrap();
        scale_notes("C", ScaleId::Pentatonic, &lookup).unwrap();
        scale_notes("C", ScaleId::MinorPentatonic, &lookup).unwrap();
        scale_notes("C", ScaleId::Phrygian, &lookup).unwrap();
        assert_eq!(
            *lookup.queries.borrow(),
            vec![
                "C natural minor",
                "C major pentatonic",
                "C minor pentatonic",
                "C phrygian",
            ]
        );
    }

    #[test]
    fn test_pentatonic_detection_follows_cardinality() {
        let penta = scale_notes("A", ScaleId::MinorPentatonic, &IntervalTableLookup).unwrap();
        assert!(is_pentatonic(ScaleId::MinorPentatonic, &penta));

        let major = scale_notes("A", ScaleId::Major, &IntervalTableLookup).unwrap();
        assert!(!is_pentatonic(ScaleId::Major, &major));

        // A pentatonic identifier stays pentatonic even when the lookup
        // fell back to a single note.
        let fallback = scale_notes("A", ScaleId::Pentatonic, &EmptyLookup).unwrap();
        assert_eq!(fallback.len(), 1);
        assert!(is_pentatonic(ScaleId::Pentatonic, &fallback));
    }
}
