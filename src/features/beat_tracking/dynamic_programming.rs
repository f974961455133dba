//! Dynamic-programming beat placement
//!
//! Chooses the beat sequence that maximises total onset strength while
//! keeping inter-beat intervals close to the estimated period.
//!
//! # Algorithm
//!
//! For every frame `t`:
//!
//! ```text
//! score[t] = onset[t] + max_p ( score[p] - tightness * ln((t - p) / period)² )
//! ```
//!
//! with predecessors `p` in `[t - 2·period, t - period/2]`. The best-scoring
//! frame within the final period starts a backtrace through the stored
//! predecessors.
//!
//! # Reference
//!
//! Ellis, D. P. W. (2007). Beat Tracking by Dynamic Programming.
//! *Journal of New Music Research*, 36(1), 51-60.

/// Place beats on an onset envelope
///
/// # Arguments
///
/// * `envelope` - Onset strength per frame (already normalized)
/// * `period` - Beat period in frames
/// * `tightness` - Penalty weight for deviating from `period`
///
/// # Returns
///
/// Beat frame indices in ascending order; empty if `envelope` is empty or
/// `period` is not positive
pub fn track_beats(envelope: &[f32], period: f32, tightness: f32) -> Vec<usize> {
    let n = envelope.len();
    if n == 0 || period <= 0.0 {
        return Vec::new();
    }

    let min_step = (period / 2.0).round().max(1.0) as usize;
    let max_step = (period * 2.0).round().max(min_step as f32) as usize;

    let mut score = vec![0.0f32; n];
    let mut backlink: Vec<Option<usize>> = vec![None; n];

    for t in 0..n {
        let mut best: Option<(usize, f32)> = None;

        if t >= min_step {
            let earliest = t.saturating_sub(max_step);
            for p in earliest..=(t - min_step) {
                let ratio = (t - p) as f32 / period;
                let penalty = tightness * ratio.ln().powi(2);
                let candidate = score[p] - penalty;
                if best.map_or(true, |(_, s)| candidate > s) {
                    best = Some((p, candidate));
                }
            }
        }

        match best {
            Some((p, s)) => {
                score[t] = envelope[t] + s;
                backlink[t] = Some(p);
            }
            None => score[t] = envelope[t],
        }
    }

    // Start the backtrace from the best frame within the last period
    let tail_start = n.saturating_sub(period.round().max(1.0) as usize);
    let mut current = (tail_start..n).fold(tail_start, |best, t| {
        if score[t] > score[best] {
            t
        } else {
            best
        }
    });

    let mut beats = vec![current];
    while let Some(prev) = backlink[current] {
        beats.push(prev);
        current = prev;
    }
    beats.reverse();

    beats
}
