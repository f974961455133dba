//! Nearest-note mapping
//!
//! Maps a frequency to the closest entry of the reference note table. The
//! table is scanned in its fixed order and only a strictly smaller distance
//! replaces the current best, so ties resolve to the earliest entry.
//!
//! # Example
//!
//! ```
//! use audio_kmedoids::features::notes::find_note;
//!
//! let label = find_note(440.0);
//! assert_eq!(label.note, "A");
//! assert_eq!(label.octave, 4);
//! ```

pub mod table;

use serde::Serialize;

pub use table::NoteEntry;

/// Note name and octave attached to a spectral peak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NoteLabel {
    /// Note name ("C", "C#", ..., "B")
    pub note: &'static str,
    /// Octave number (0-7)
    pub octave: u8,
}

/// Find the nearest note for a frequency in Hz
pub fn find_note(frequency: f64) -> NoteLabel {
    nearest_entry(table::entries(), frequency)
}

/// Nearest entry of an ordered note table; the first of equally distant entries wins
///
/// Falls back to C0 when `entries` is empty.
pub fn nearest_entry<I>(entries: I, frequency: f64) -> NoteLabel
where
    I: IntoIterator<Item = NoteEntry>,
{
    let mut best_distance = f64::INFINITY;
    let mut best = NoteLabel {
        note: table::NOTE_NAMES[0],
        octave: 0,
    };

    for entry in entries {
        let distance = (entry.frequency - frequency).abs();
        if distance < best_distance {
            best_distance = distance;
            best = NoteLabel {
                note: entry.note,
                octave: entry.octave,
            };
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_note_exact() {
        assert_eq!(find_note(440.0), NoteLabel { note: "A", octave: 4 });
        assert_eq!(find_note(261.63), NoteLabel { note: "C", octave: 4 });
        assert_eq!(find_note(3951.07), NoteLabel { note: "B", octave: 7 });
    }

    #[test]
    fn test_find_note_low_frequencies() {
        // 16.35 Hz (C0) is the lowest table entry
        assert_eq!(find_note(0.0), NoteLabel { note: "C", octave: 0 });
        assert_eq!(find_note(-50.0), NoteLabel { note: "C", octave: 0 });
    }

    #[test]
    fn test_find_note_high_frequencies() {
        assert_eq!(find_note(4000.0), NoteLabel { note: "B", octave: 7 });
    }

    #[test]
    fn test_find_note_nearest() {
        // Between A4 (440) and A#4 (466.16): 450 is closer to A4
        assert_eq!(find_note(450.0), NoteLabel { note: "A", octave: 4 });
        assert_eq!(find_note(460.0), NoteLabel { note: "A#", octave: 4 });
    }

    #[test]
    fn test_tie_keeps_first_entry() {
        let entries = [
            NoteEntry {
                note: "A",
                octave: 2,
                frequency: 100.0,
            },
            NoteEntry {
                note: "B",
                octave: 1,
                frequency: 120.0,
            },
            NoteEntry {
                note: "C",
                octave: 3,
                frequency: 110.0,
            },
        ];

        // 110 is exactly between A2 and B1, but C3 matches it exactly
        assert_eq!(nearest_entry(entries, 110.0).note, "C");
        // 105 is 5 Hz from both A2 and C3; A2 comes first
        assert_eq!(nearest_entry(entries, 105.0), NoteLabel { note: "A", octave: 2 });
        // 115 is 5 Hz from both B1 and C3; B1 comes first
        assert_eq!(nearest_entry(entries, 115.0), NoteLabel { note: "B", octave: 1 });
    }

    #[test]
    fn test_midpoints_keep_earlier_note() {
        // Decimal midpoints between adjacent table entries
        assert_eq!(find_note(142.71), NoteLabel { note: "C#", octave: 3 });
        assert_eq!(find_note(169.71), NoteLabel { note: "E", octave: 3 });
        assert_eq!(find_note(285.42), NoteLabel { note: "C#", octave: 4 });
    }

    #[test]
    fn test_near_midpoint_resolves_by_distance() {
        // 44.95 sits a hair closer to F#1 (46.25) than to F1 (43.65)
        assert_eq!(find_note(44.95), NoteLabel { note: "F#", octave: 1 });
    }
}
