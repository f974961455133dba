//! Reference note frequencies
//!
//! Equal-tempered frequencies (A4 = 440 Hz) for the 12 chromatic notes across
//! octaves 0-7, rounded to 2 decimals.

/// One row of the note table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEntry {
    /// Note name ("C", "C#", ..., "B")
    pub note: &'static str,
    /// Octave number (0-7)
    pub octave: u8,
    /// Reference frequency in Hz
    pub frequency: f64,
}

/// Chromatic note names in table order
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Number of octaves per note
pub const OCTAVES: usize = 8;

const FREQUENCIES: [[f64; OCTAVES]; 12] = [
    [16.35, 32.70, 65.41, 130.81, 261.63, 523.25, 1046.50, 2093.00],
    [17.32, 34.65, 69.30, 138.59, 277.18, 554.37, 1108.73, 2217.46],
    [18.35, 36.71, 73.42, 146.83, 293.66, 587.33, 1174.66, 2349.32],
    [19.45, 38.89, 77.78, 155.56, 311.13, 622.25, 1244.51, 2489.02],
    [20.60, 41.20, 82.41, 164.81, 329.63, 659.26, 1318.51, 2637.02],
    [21.83, 43.65, 87.31, 174.61, 349.23, 698.46, 1396.91, 2793.83],
    [23.12, 46.25, 92.50, 185.00, 369.99, 739.99, 1479.98, 2959.96],
    [24.50, 49.00, 98.00, 196.00, 392.00, 783.99, 1567.98, 3135.96],
    [25.96, 51.91, 103.83, 207.65, 415.30, 830.61, 1661.22, 3322.44],
    [27.50, 55.00, 110.00, 220.00, 440.00, 880.00, 1760.00, 3520.00],
    [29.14, 58.27, 116.54, 233.08, 466.16, 932.33, 1864.66, 3729.31],
    [30.87, 61.74, 123.47, 246.94, 493.88, 987.77, 1975.53, 3951.07],
];

/// Iterate the 96 table entries in lookup order: note name C..B, then ascending octave
///
/// # Example
///
/// ```
/// use audio_kmedoids::features::notes::table::entries;
///
/// let first = entries().next().unwrap();
/// assert_eq!((first.note, first.octave), ("C", 0));
/// assert_eq!(entries().count(), 96);
/// ```
pub fn entries() -> impl Iterator<Item = NoteEntry> {
    NOTE_NAMES
        .iter()
        .zip(FREQUENCIES.iter())
        .flat_map(|(&note, octaves)| {
            octaves
                .iter()
                .enumerate()
                .map(move |(octave, &frequency)| NoteEntry {
                    note,
                    octave: octave as u8,
                    frequency,
                })
        })
}
