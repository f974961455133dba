//! Tempo estimation from an onset envelope
//!
//! Autocorrelates the mean-removed envelope over the lags allowed by the BPM
//! range, weights each lag with a log-normal tempo prior centred on 120 BPM,
//! and refines the winning lag with parabolic interpolation.

/// Tempo the prior is centred on
const PRIOR_CENTER_BPM: f32 = 120.0;

/// Width of the tempo prior in octaves
const PRIOR_OCTAVES: f32 = 1.0;

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Centered envelope energy, relative to total energy, below which the envelope is flat
const FLAT_TOLERANCE: f64 = 1e-9;

/// Tempo estimate in both BPM and envelope frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempoEstimate {
    /// Tempo in beats per minute
    pub bpm: f32,
    /// Beat period in envelope frames
    pub period_frames: f32,
}

/// Log-normal prior over tempo, 1.0 at the centre
fn tempo_prior(bpm: f32) -> f32 {
    let octaves = (bpm / PRIOR_CENTER_BPM).log2() / PRIOR_OCTAVES;
    (-0.5 * octaves * octaves).exp()
}

/// Estimate tempo from an onset envelope
///
/// # Arguments
///
/// * `envelope` - Onset strength per frame
/// * `frame_duration` - Seconds between envelope frames (`hop_size / sample_rate`)
/// * `min_bpm` - Slowest tempo to consider
/// * `max_bpm` - Fastest tempo to consider
///
/// # Returns
///
/// `None` if the envelope is too short for the BPM range or carries no energy
pub fn estimate_tempo(
    envelope: &[f32],
    frame_duration: f32,
    min_bpm: f32,
    max_bpm: f32,
) -> Option<TempoEstimate> {
    if envelope.is_empty() || frame_duration <= 0.0 || min_bpm <= 0.0 || min_bpm >= max_bpm {
        return None;
    }

    let n = envelope.len();
    let min_lag = ((60.0 / (max_bpm * frame_duration)).floor() as usize).max(1);
    let max_lag = ((60.0 / (min_bpm * frame_duration)).ceil() as usize).min(n / 2);

    if min_lag >= max_lag {
        log::debug!(
            "Envelope of {} frames too short for lags [{}, {}]",
            n,
            min_lag,
            max_lag
        );
        return None;
    }

    let mean = envelope.iter().map(|&x| x as f64).sum::<f64>() / n as f64;
    let centered: Vec<f64> = envelope.iter().map(|&x| x as f64 - mean).collect();
    let energy: f64 = centered.iter().map(|&x| x * x).sum();
    let power: f64 = envelope.iter().map(|&x| (x as f64) * (x as f64)).sum();

    // Variation must stand out from the rounding left by removing the mean
    if energy <= FLAT_TOLERANCE * power {
        log::debug!("Flat onset envelope, no tempo");
        return None;
    }

    let correlation = |lag: usize| -> f32 {
        (centered[..n - lag]
            .iter()
            .zip(centered[lag..].iter())
            .map(|(&a, &b)| a * b)
            .sum::<f64>()
            / energy) as f32
    };
    let lag_bpm = |lag: f32| 60.0 / (lag * frame_duration);

    let mut best_lag = min_lag;
    let mut best_score = f32::NEG_INFINITY;
    for lag in min_lag..=max_lag {
        let score = correlation(lag) * tempo_prior(lag_bpm(lag as f32));
        if score > best_score {
            best_score = score;
            best_lag = lag;
        }
    }

    if best_score <= 0.0 {
        log::debug!("No positive autocorrelation peak in tempo range");
        return None;
    }

    // Parabolic interpolation around the peak for sub-frame precision
    let period_frames = if best_lag > min_lag && best_lag < max_lag {
        let prev = correlation(best_lag - 1);
        let curr = correlation(best_lag);
        let next = correlation(best_lag + 1);
        let denom = prev - 2.0 * curr + next;
        if denom.abs() > EPSILON {
            let offset = (0.5 * (prev - next) / denom).clamp(-0.5, 0.5);
            best_lag as f32 + offset
        } else {
            best_lag as f32
        }
    } else {
        best_lag as f32
    };

    Some(TempoEstimate {
        bpm: lag_bpm(period_frames),
        period_frames,
    })
}
