#[cfg(test)]
mod tests {
    use crate::tuner::tuner::{compute_spectrum, reading_from_frequency, yin_pitch};
    use std::f32::consts::PI;

    const SAMPLE_RATE: f32 = 44100.0;

    fn sine(frequency: f32, samples: usize) -> Vec<f32> {
        (0..samples)
            .map(|i| (2.0 * PI * frequency * i as f32 / SAMPLE_RATE).sin())
            .collect()
    }

    #[test]
    fn test_yin_detects_a440() {
        let frame = sine(440.0, 2048);
        let detected = yin_pitch(&frame, SAMPLE_RATE).expect("no pitch detected");
        assert!(
            (detected - 440.0).abs() < 1.0,
            "detected {} Hz instead of 440",
            detected
        );
    }

    #[test]
    fn test_yin_detects_low_e_string() {
        let frame = sine(82.41, 2048);
        let detected = yin_pitch(&frame, SAMPLE_RATE).expect("no pitch detected");
        assert!(
            (detected - 82.41).abs() < 0.5,
            "detected {} Hz instead of 82.41",
            detected
        );
    }

    #[test]
    fn test_yin_rejects_silence() {
        let frame = vec![0.0; 2048];
        assert!(yin_pitch(&frame, SAMPLE_RATE).is_none());
    }

    #[test]
    fn test_reading_on_exact_pitch() {
        let reading = reading_from_frequency(440.0);
        assert_eq!(reading.note, "A");
        assert_eq!(reading.cents, 0);
    }

    #[test]
    fn test_reading_on_sharp_pitch() {
        // 445 Hz is A4 plus roughly 20 cents.
        let reading = reading_from_frequency(445.0);
        assert_eq!(reading.note, "A");
        assert!((reading.cents - 20).abs() <= 1, "cents = {}", reading.cents);
    }

    #[test]
    fn test_reading_on_flat_pitch() {
        // A quarter-tone-flat C4 still snaps to C with negative cents.
        let c4 = 261.63;
        let flat = c4 * 2.0f32.powf(-0.3 / 12.0);
        let reading = reading_from_frequency(flat);
        assert_eq!(reading.note, "C");
        assert!((reading.cents + 30).abs() <= 1, "cents = {}", reading.cents);
    }

    #[test]
    fn test_spectrum_peaks_at_the_signal_frequency() {
        let frame = sine(430.6640625, 2048); // exactly bin 20 at 44.1 kHz
        let spectrum = compute_spectrum(&frame);
        let peak_bin = spectrum
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak_bin, 20);
    }
}
