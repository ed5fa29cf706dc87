// ============================================================================
// scenecut-core/src/peaks.rs
// ============================================================================
//
// PEAK FILTER: Shot Boundary Selection from the Diff Signal
//
// Shot boundaries are local maxima of the diff signal whose jump from the
// previous sample is larger than a height threshold. The threshold comes
// from a ThresholdStrategy so fixed and adaptive rules are interchangeable.
//
// RULES:
// - Position i is a local maximum when it is not smaller than either
//   neighbour. Missing neighbours at the edges count as satisfied.
// - A local maximum is kept when |signal[i-1] - signal[i]| > threshold
//   (strict, ties are dropped).
// - Index 0 starts the first shot and is always emitted for a non-empty
//   signal.

use log::debug;

use crate::error::{CoreError, CoreResult};

/// Computes the height threshold for a signal and its candidate peaks.
pub trait ThresholdStrategy {
    /// Returns the threshold that candidate jumps must exceed.
    fn threshold(&self, signal: &[f64], candidates: &[usize]) -> f64;

    /// Human-readable name for logging.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// A constant threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedThreshold(pub f64);

impl ThresholdStrategy for FixedThreshold {
    fn threshold(&self, _signal: &[f64], _candidates: &[usize]) -> f64 {
        self.0
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Mean plus `k` standard deviations of the candidate jumps, capped at
/// `cap_fraction` of the largest jump.
///
/// With `cap_fraction < 1` the largest jump always exceeds the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanStdThreshold {
    pub k: f64,
    pub cap_fraction: f64,
}

impl ThresholdStrategy for MeanStdThreshold {
    fn threshold(&self, signal: &[f64], candidates: &[usize]) -> f64 {
        let jumps = candidate_jumps(signal, candidates);
        if jumps.is_empty() {
            return 0.0;
        }
        let n = jumps.len() as f64;
        let mean = jumps.iter().sum::<f64>() / n;
        let variance = jumps.iter().map(|j| (j - mean).powi(2)).sum::<f64>() / n;
        let max_jump = jumps.iter().copied().fold(0.0, f64::max);
        (mean + self.k * variance.sqrt()).min(self.cap_fraction * max_jump)
    }

    fn name(&self) -> &str {
        "mean-std"
    }
}

/// A fraction of the largest candidate jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxFractionThreshold {
    pub fraction: f64,
}

impl ThresholdStrategy for MaxFractionThreshold {
    fn threshold(&self, signal: &[f64], candidates: &[usize]) -> f64 {
        let max_jump = candidate_jumps(signal, candidates)
            .into_iter()
            .fold(0.0, f64::max);
        self.fraction * max_jump
    }

    fn name(&self) -> &str {
        "max-fraction"
    }
}

/// Wraps a closure `(signal, candidates) -> threshold` as a strategy.
pub struct FnThreshold<F>(pub F);

impl<F> ThresholdStrategy for FnThreshold<F>
where
    F: Fn(&[f64], &[usize]) -> f64,
{
    fn threshold(&self, signal: &[f64], candidates: &[usize]) -> f64 {
        (self.0)(signal, candidates)
    }

    fn name(&self) -> &str {
        "custom"
    }
}

/// Jump magnitudes at candidate positions other than index 0.
fn candidate_jumps(signal: &[f64], candidates: &[usize]) -> Vec<f64> {
    candidates
        .iter()
        .filter(|&&i| i > 0 && i < signal.len())
        .map(|&i| jump(signal, i))
        .collect()
}

fn jump(signal: &[f64], index: usize) -> f64 {
    (signal[index - 1] - signal[index]).abs()
}

/// Local-maximum mask of a signal.
///
/// `local_maxima(&[1.0, 5.0, 2.0, 5.0, 1.0])` flags positions 1 and 3.
pub fn local_maxima(signal: &[f64]) -> Vec<bool> {
    let n = signal.len();
    (0..n)
        .map(|i| {
            let left = i == 0 || signal[i] >= signal[i - 1];
            let right = i + 1 == n || signal[i] >= signal[i + 1];
            left && right
        })
        .collect()
}

/// Positions flagged by [`local_maxima`].
pub fn local_maxima_indices(signal: &[f64]) -> Vec<usize> {
    local_maxima(signal)
        .into_iter()
        .enumerate()
        .filter_map(|(i, is_max)| is_max.then_some(i))
        .collect()
}

/// Keeps the candidates whose jump exceeds the strategy's threshold.
///
/// Candidates must be positions inside `signal`. The output is sorted,
/// de-duplicated and starts with 0 whenever the signal is non-empty.
pub fn filter_local_maxima(
    signal: &[f64],
    candidates: &[usize],
    strategy: &dyn ThresholdStrategy,
) -> CoreResult<Vec<usize>> {
    if let Some(&bad) = candidates.iter().find(|&&i| i >= signal.len()) {
        return Err(CoreError::InvalidInput(format!(
            "peak candidate {bad} is outside a signal of {} samples",
            signal.len()
        )));
    }
    Ok(retain_peaks(signal, candidates, strategy))
}

/// Full peak detection: local maxima followed by threshold filtering.
pub fn detect_shots(signal: &[f64], strategy: &dyn ThresholdStrategy) -> Vec<usize> {
    let candidates = local_maxima_indices(signal);
    retain_peaks(signal, &candidates, strategy)
}

fn retain_peaks(
    signal: &[f64],
    candidates: &[usize],
    strategy: &dyn ThresholdStrategy,
) -> Vec<usize> {
    if signal.is_empty() {
        return Vec::new();
    }

    let height = strategy.threshold(signal, candidates);
    let mut peaks: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&i| i == 0 || jump(signal, i) > height)
        .collect();
    peaks.push(0);
    peaks.sort_unstable();
    peaks.dedup();

    debug!(
        "Peak filter ({}): threshold {:.3}, {} of {} candidates kept",
        strategy.name(),
        height,
        peaks.len(),
        candidates.len()
    );
    peaks
}
