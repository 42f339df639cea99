#[cfg(test)]
mod tests {
    use crate::audio_player::GuitarConfig;
    use crate::karplus_strong::karplus_strong::KarplusStrong;

    #[test]
    fn test_voice_ends_after_duration() {
        let config = GuitarConfig::acoustic();
        let mut voice = KarplusStrong::new(440.0, 0.01, 44100.0, &config);
        let expected_samples = (0.01 * 44100.0) as usize;
        let mut produced = 0;
        while voice.next_sample().is_some() {
            produced += 1;
        }
        assert_eq!(produced, expected_samples);
        // Once exhausted the voice stays exhausted.
        assert!(voice.next_sample().is_none());
    }

    #[test]
    fn test_output_is_bounded() {
        let config = GuitarConfig::electric();
        let mut voice = KarplusStrong::new(110.0, 0.1, 44100.0, &config);
        while let Some(sample) = voice.next_sample() {
            assert!(sample.abs() <= 2.0, "sample out of range: {}", sample);
        }
    }

    #[test]
    fn test_extreme_frequency_keeps_minimum_buffer() {
        let config = GuitarConfig::acoustic();
        // A frequency above the sample rate would round the delay line
        // down to a single sample; the voice must still produce output.
        let mut voice = KarplusStrong::new(96000.0, 0.001, 44100.0, &config);
        assert!(voice.next_sample().is_some());
    }
}
