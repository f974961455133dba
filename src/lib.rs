//! # Audio K-medoids
//!
//! Groups the beats of a piece of music by their dominant pitch.
//!
//! Each beat-to-beat segment of a recording is reduced to its strongest
//! spectral peak. Peaks inside the audible band are labeled with the nearest
//! musical note and clustered on frequency with k-medoids (PAM). The result
//! is handed to a visualization sink as two scatter views, one coloured by
//! note and one by medoid.
//!
//! ## Quick Start
//!
//! ```no_run
//! use audio_kmedoids::{analyze_file, AnalysisConfig, AudioFrontEnd};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let config = AnalysisConfig::default();
//! let front_end = AudioFrontEnd::new(&config);
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let result = analyze_file(&front_end, "song.mp3", &config, &mut rng)?;
//! for point in &result.points {
//!     println!("{:.2} Hz {} -> medoid {:?}", point.frequency, point.note_name(), point.medoid);
//! }
//! # Ok::<(), audio_kmedoids::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! File → Front-end (decode, beats) → Segments → Spectral peaks → Filter → Notes → K-medoids → Sink
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod clustering;
pub mod config;
pub mod error;
pub mod features;
pub mod frontend;
pub mod io;
pub mod preprocessing;
pub mod sink;

use std::path::Path;
use std::time::Instant;

use rand::Rng;

// Re-export main types
pub use analysis::metadata::AnalysisMetadata;
pub use analysis::result::{AnalysisResult, DataPoint};
pub use clustering::{Clustering, KMedoids};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use frontend::{AudioFrontEnd, FrontEndOutput, SignalFrontEnd};
pub use io::AudioSignal;
pub use sink::{JsonSink, TextSink, VisualizationSink};

use analysis::filter::FrequencyFilter;
use clustering::cluster_points;
use features::segmentation::segment_beats;
use features::spectral_peak::SpectralPeakExtractor;

/// Label and cluster the beat segments of a decoded signal
///
/// # Arguments
///
/// * `signal` - Mono signal
/// * `beats` - Beat onsets in samples, ascending
/// * `tempo` - Tempo estimate in beats per minute, carried into the result
/// * `config` - Analysis configuration
/// * `rng` - Source of the initial medoid draw
///
/// # Errors
///
/// * `AnalysisError::InvalidInput` for an invalid config, an empty signal or
///   unsorted beats
/// * `AnalysisError::InsufficientBeats` if `beats` is empty
/// * `AnalysisError::ClusterSize` if fewer peaks survive the frequency filter
///   than clusters were requested
///
/// # Example
///
/// ```
/// use audio_kmedoids::{analyze_signal, AnalysisConfig, AudioSignal};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let sample_rate = 8000;
/// let tone = |f: f32| (0..800).map(move |i| (2.0 * std::f32::consts::PI * f * i as f32 / 8000.0).sin());
/// let samples: Vec<f32> = [200.0, 1000.0, 210.0, 1010.0].into_iter().flat_map(tone).collect();
/// let signal = AudioSignal::new(samples, sample_rate)?;
///
/// let config = AnalysisConfig { cluster_size: 2, ..Default::default() };
/// let mut rng = StdRng::seed_from_u64(1);
/// let result = analyze_signal(&signal, &[0, 800, 1600, 2400], 120.0, &config, &mut rng)?;
///
/// assert_eq!(result.points.len(), 4);
/// assert_eq!(result.points[0].note_name(), "G3");
/// # Ok::<(), audio_kmedoids::AnalysisError>(())
/// ```
pub fn analyze_signal<R>(
    signal: &AudioSignal,
    beats: &[usize],
    tempo: f32,
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<AnalysisResult, AnalysisError>
where
    R: Rng + ?Sized,
{
    let start_time = Instant::now();
    config.validate()?;

    log::debug!(
        "Starting analysis: {} samples at {} Hz, {} beats",
        signal.len(),
        signal.sample_rate(),
        beats.len()
    );

    if signal.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Empty audio samples".to_string(),
        ));
    }

    // Beat segments
    let segments = segment_beats(beats, signal.len())?;

    // One spectral peak per segment
    let mut extractor = SpectralPeakExtractor::new(signal.sample_rate())?;
    let mut peaks = Vec::with_capacity(segments.len());
    for (index, segment) in segments.iter().enumerate() {
        match extractor.extract(signal.segment(segment)) {
            Some(peak) => peaks.push(peak),
            None => log::warn!(
                "Skipping segment {} [{}, {}): too short for a spectral peak",
                index,
                segment.start,
                segment.end
            ),
        }
    }

    // Audible band
    let filter = FrequencyFilter::new(config.min_frequency, config.max_frequency);
    let peaks = filter.apply(peaks);
    let discarded_points = segments.len() - peaks.len();

    // Note labels, then clustering
    let points: Vec<DataPoint> = peaks.into_iter().map(DataPoint::from).collect();
    let clusterer = KMedoids::new(config.cluster_size).with_max_iterations(config.max_iterations);
    let (points, clustering) = cluster_points(points, &clusterer, rng)?;

    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;
    log::debug!(
        "Clustered {} points into {} groups in {:.2} ms",
        points.len(),
        config.cluster_size,
        processing_time_ms
    );

    Ok(AnalysisResult {
        tempo,
        points,
        clustering,
        metadata: AnalysisMetadata {
            duration_seconds: signal.duration_seconds(),
            sample_rate: signal.sample_rate(),
            beat_count: beats.len(),
            segment_count: segments.len(),
            discarded_points,
            frequency_range: [config.min_frequency, config.max_frequency],
            processing_time_ms,
            ..Default::default()
        },
    })
}

/// Load `path` through `front_end` and analyze it
///
/// # Errors
///
/// Front-end errors (`DecodingError`, `NoBeatsDetected`) and every error of
/// [`analyze_signal`].
pub fn analyze_file<F, P, R>(
    front_end: &F,
    path: P,
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<AnalysisResult, AnalysisError>
where
    F: SignalFrontEnd + ?Sized,
    P: AsRef<Path>,
    R: Rng + ?Sized,
{
    config.validate()?;
    let loaded = front_end.load(path.as_ref())?;
    analyze_signal(&loaded.signal, &loaded.beats, loaded.tempo, config, rng)
}

/// Analyze `path` and hand the result to `sink`
///
/// # Errors
///
/// Every error of [`analyze_file`], plus `AnalysisError::Sink` if rendering
/// fails.
pub fn run<F, P, R, S>(
    front_end: &F,
    path: P,
    config: &AnalysisConfig,
    rng: &mut R,
    sink: &mut S,
) -> Result<AnalysisResult, AnalysisError>
where
    F: SignalFrontEnd + ?Sized,
    P: AsRef<Path>,
    R: Rng + ?Sized,
    S: VisualizationSink + ?Sized,
{
    let result = analyze_file(front_end, path, config, rng)?;
    sink.render(&result)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SAMPLE_RATE: u32 = 8000;
    const BEAT: usize = 800;

    fn tone(frequency: f64, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| {
                let t = i as f64 / SAMPLE_RATE as f64;
                (0.5 * (2.0 * std::f64::consts::PI * frequency * t).sin()) as f32
            })
            .collect()
    }

    /// One 800-sample beat per frequency, so every tone sits on a 10 Hz bin
    fn beat_signal(frequencies: &[f64]) -> (AudioSignal, Vec<usize>) {
        let samples: Vec<f32> = frequencies.iter().flat_map(|&f| tone(f, BEAT)).collect();
        let beats = (0..frequencies.len()).map(|i| i * BEAT).collect();
        (AudioSignal::new(samples, SAMPLE_RATE).unwrap(), beats)
    }

    struct StubFrontEnd {
        frequencies: Vec<f64>,
    }

    impl SignalFrontEnd for StubFrontEnd {
        fn load(&self, _path: &Path) -> Result<FrontEndOutput, AnalysisError> {
            let (signal, beats) = beat_signal(&self.frequencies);
            Ok(FrontEndOutput {
                signal,
                tempo: 600.0,
                beats,
            })
        }
    }

    struct FailingFrontEnd;

    impl SignalFrontEnd for FailingFrontEnd {
        fn load(&self, _path: &Path) -> Result<FrontEndOutput, AnalysisError> {
            Err(AnalysisError::NoBeatsDetected)
        }
    }

    fn two_groups() -> Vec<f64> {
        vec![200.0, 1000.0, 210.0, 1010.0, 220.0, 1020.0, 230.0, 1030.0]
    }

    fn config(cluster_size: usize) -> AnalysisConfig {
        AnalysisConfig {
            cluster_size,
            ..Default::default()
        }
    }

    #[test]
    fn test_analyze_signal_groups_beats() {
        let (signal, beats) = beat_signal(&two_groups());
        let mut rng = StdRng::seed_from_u64(3);
        let result = analyze_signal(&signal, &beats, 600.0, &config(2), &mut rng).unwrap();

        assert_eq!(result.points.len(), 8);
        let frequencies: Vec<f64> = result.points.iter().map(|p| p.frequency).collect();
        assert_eq!(frequencies, two_groups());

        let low = result.points[0].medoid.unwrap();
        let high = result.points[1].medoid.unwrap();
        assert!((200.0..=230.0).contains(&low));
        assert!((1000.0..=1030.0).contains(&high));
        for (i, point) in result.points.iter().enumerate() {
            let expected = if i % 2 == 0 { low } else { high };
            assert_eq!(point.medoid, Some(expected));
        }
    }

    #[test]
    fn test_notes_are_labeled() {
        let (signal, beats) = beat_signal(&[440.0, 260.0, 880.0]);
        let mut rng = StdRng::seed_from_u64(0);
        let result = analyze_signal(&signal, &beats, 120.0, &config(2), &mut rng).unwrap();

        let names: Vec<String> = result.points.iter().map(|p| p.note_name()).collect();
        assert_eq!(names, vec!["A4", "C4", "A5"]);
    }

    #[test]
    fn test_metadata() {
        let (signal, beats) = beat_signal(&two_groups());
        let mut rng = StdRng::seed_from_u64(0);
        let result = analyze_signal(&signal, &beats, 600.0, &config(2), &mut rng).unwrap();

        assert_eq!(result.tempo, 600.0);
        assert_eq!(result.metadata.sample_rate, SAMPLE_RATE);
        assert_eq!(result.metadata.beat_count, 8);
        assert_eq!(result.metadata.segment_count, 8);
        assert_eq!(result.metadata.discarded_points, 0);
        assert_eq!(result.metadata.duration_seconds, 0.8);
        assert_eq!(result.metadata.frequency_range, [0.0, 4000.0]);
    }

    #[test]
    fn test_out_of_band_and_short_segments_are_discarded() {
        let (signal, mut beats) = beat_signal(&[200.0, 1000.0, 300.0]);
        let mut samples = signal.samples().to_vec();

        // Nyquist beat, then a single-sample beat at the very end
        beats.push(samples.len());
        samples.extend((0..BEAT).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }));
        beats.push(samples.len());
        samples.push(0.25);

        let signal = AudioSignal::new(samples, SAMPLE_RATE).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let result = analyze_signal(&signal, &beats, 120.0, &config(2), &mut rng).unwrap();

        assert_eq!(result.metadata.segment_count, 5);
        assert_eq!(result.metadata.discarded_points, 2);
        assert_eq!(result.points.len(), 3);
        assert!(result.points.iter().all(|p| p.frequency >= 0.0 && p.frequency <= 4000.0));
    }

    #[test]
    fn test_too_few_points_for_clusters() {
        let (signal, beats) = beat_signal(&[200.0, 1000.0, 300.0]);
        let mut rng = StdRng::seed_from_u64(0);
        let result = analyze_signal(&signal, &beats, 120.0, &config(4), &mut rng);
        assert_eq!(
            result.unwrap_err(),
            AnalysisError::ClusterSize {
                requested: 4,
                available: 3
            }
        );
    }

    #[test]
    fn test_invalid_inputs() {
        let mut rng = StdRng::seed_from_u64(0);
        let (signal, beats) = beat_signal(&two_groups());

        let result = analyze_signal(&signal, &[], 120.0, &config(2), &mut rng);
        assert_eq!(result.unwrap_err(), AnalysisError::InsufficientBeats);

        let result = analyze_signal(&signal, &beats, 120.0, &config(9), &mut rng);
        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));

        let empty = AudioSignal::new(Vec::new(), SAMPLE_RATE).unwrap();
        let result = analyze_signal(&empty, &[0], 120.0, &config(2), &mut rng);
        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let front_end = StubFrontEnd {
            frequencies: vec![200.0, 400.0, 600.0, 800.0, 1000.0, 1200.0, 1400.0],
        };
        let first = analyze_file(&front_end, "stub", &config(3), &mut StdRng::seed_from_u64(11)).unwrap();
        let second = analyze_file(&front_end, "stub", &config(3), &mut StdRng::seed_from_u64(11)).unwrap();

        assert_eq!(first.points, second.points);
        assert_eq!(first.clustering, second.clustering);
    }

    #[test]
    fn test_run_renders_to_sink() {
        let front_end = StubFrontEnd {
            frequencies: two_groups(),
        };
        let mut sink = TextSink::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(5);

        let result = run(&front_end, "stub", &config(2), &mut rng, &mut sink).unwrap();
        assert_eq!(result.points.len(), 8);

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("Audio K-medoids (Tempo: 600 beats per minute)"));
    }

    #[test]
    fn test_front_end_errors_propagate() {
        let mut sink = TextSink::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(0);
        let result = run(&FailingFrontEnd, "stub", &config(2), &mut rng, &mut sink);

        assert_eq!(result.unwrap_err(), AnalysisError::NoBeatsDetected);
        assert!(sink.into_inner().is_empty());
    }
}
