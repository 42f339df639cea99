#[cfg(test)]
mod tests {
    use crate::music_theory::{
        freq_to_midi, note_at_fret, Pitch, PitchClass, NOTE_NAMES, STANDARD_TUNING,
    };

    #[test]
    fn test_parse_normalizes_spellings() {
        assert_eq!(PitchClass::parse("C").unwrap().name(), "C");
        assert_eq!(PitchClass::parse("c#").unwrap().name(), "C#");
        assert_eq!(PitchClass::parse("Db").unwrap().name(), "C#");
        assert_eq!(PitchClass::parse("Eb").unwrap().name(), "D#");
        assert_eq!(PitchClass::parse("e").unwrap().name(), "E");
        assert_eq!(PitchClass::parse("Cb").unwrap().name(), "B");
        assert_eq!(PitchClass::parse("B#").unwrap().name(), "C");
    }

    #[test]
    fn test_parse_rejects_invalid_notes() {
        assert!(PitchClass::parse("").is_err());
        assert!(PitchClass::parse("H").is_err());
        assert!(PitchClass::parse("C%").is_err());
        assert!(PitchClass::parse("C##").is_err());
    }

    #[test]
    fn test_note_at_fret_walks_the_chromatic_cycle() {
        let open = PitchClass::parse("E").unwrap();
        let expected = [
            "E", "F", "F#", "G", "G#", "A", "A#", "B", "C", "C#", "D", "D#",
        ];
        for (fret, name) in expected.iter().enumerate() {
            assert_eq!(note_at_fret(open, fret as u8).name(), *name);
        }
    }

    #[test]
    fn test_note_at_fret_is_octave_periodic() {
        for semitone in 0..12u8 {
            let open = PitchClass::new(semitone);
            for fret in 0..12u8 {
                assert_eq!(note_at_fret(open, fret), note_at_fret(open, fret + 12));
            }
        }
    }

    #[test]
    fn test_standard_tuning_midi_numbers() {
        let midis: Vec<u8> = STANDARD_TUNING.iter().map(|p| p.midi()).collect();
        assert_eq!(midis, vec![40, 45, 50, 55, 59, 64]);
    }

    #[test]
    fn test_pitch_at_fret_tracks_octaves() {
        let low_e = STANDARD_TUNING[0];
        assert_eq!(low_e.at_fret(5), STANDARD_TUNING[1]);
        assert_eq!(low_e.at_fret(12).to_string(), "E3");
        assert_eq!(low_e.at_fret(8).to_string(), "C3");
    }

    #[test]
    fn test_frequencies() {
        let a4 = Pitch::from_midi(69);
        assert!((a4.frequency() - 440.0).abs() < 1e-3);
        let low_e = STANDARD_TUNING[0];
        assert!((low_e.frequency() - 82.41).abs() < 0.01);
    }

    #[test]
    fn test_freq_to_midi() {
        assert!((freq_to_midi(440.0) - 69.0).abs() < 1e-4);
        assert!((freq_to_midi(880.0) - 81.0).abs() < 1e-4);
        // A quarter tone above A4 sits halfway between MIDI 69 and 70.
        let quarter = 440.0 * 2.0_f32.powf(0.5 / 12.0);
        assert!((freq_to_midi(quarter) - 69.5).abs() < 1e-3);
    }

    #[test]
    fn test_note_names_cover_all_classes() {
        for (semitone, name) in NOTE_NAMES.iter().enumerate() {
            let pc = PitchClass::parse(name).unwrap();
            assert_eq!(pc.semitone() as usize, semitone);
        }
    }
}
