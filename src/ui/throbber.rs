//! Time-driven glyphs for the reactor animations.

use std::time::{SystemTime, UNIX_EPOCH};

/// Pulse frames for the rage warning; one frame per 150ms.
const PULSE: [char; 4] = ['◐', '◓', '◑', '◒'];

/// Wave glyphs by distance from the crest.
const WAVE: [char; 4] = ['≋', '≈', '∼', '·'];

fn current_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

pub fn pulse_char() -> char {
    pulse_char_at(current_millis())
}

pub fn pulse_char_at(millis: u128) -> char {
    PULSE[((millis / 150) % PULSE.len() as u128) as usize]
}

/// Rage text blinks: visible for the first half of each 800ms cycle.
pub fn blink_on() -> bool {
    blink_on_at(current_millis())
}

pub fn blink_on_at(millis: u128) -> bool {
    millis % 800 < 400
}

/// A row of wave glyphs for a replenish wave `progress` of the way through.
pub fn wave_line(progress: f64, width: usize) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let crest = (progress * width as f64) as usize;
    (0..width)
        .map(|col| {
            let distance = crest.abs_diff(col);
            WAVE[distance.min(WAVE.len() - 1)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_cycles() {
        assert_eq!(pulse_char_at(0), '◐');
        assert_eq!(pulse_char_at(150), '◓');
        assert_eq!(pulse_char_at(600), '◐');
    }

    #[test]
    fn test_blink() {
        assert!(blink_on_at(0));
        assert!(!blink_on_at(400));
        assert!(blink_on_at(800));
    }

    #[test]
    fn test_wave_line_width_and_crest() {
        let line = wave_line(0.5, 10);
        assert_eq!(line.chars().count(), 10);
        assert_eq!(line.chars().nth(5), Some('≋'));
        assert_eq!(line.chars().nth(6), Some('≈'));
        assert_eq!(line.chars().next(), Some('·'));
    }
}
