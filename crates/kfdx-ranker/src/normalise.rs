//! Score normalisation functions.

use kfdx_common::{KfdxError, Result};

/// Max normalisation: n_i = x_i / max(x). Returns values in [0, 1] in the
/// same order as input.
///
/// An empty slice is `EmptyInput`; an all-zero slice is `DegenerateEvidence`
/// (the division is undefined and must never surface as NaN).
pub fn max_normalise(counts: &[u64]) -> Result<Vec<f64>> {
    let max = counts.iter().copied().max().ok_or(KfdxError::EmptyInput)?;
    if max == 0 {
        return Err(KfdxError::DegenerateEvidence);
    }
    let max = max as f64;
    Ok(counts.iter().map(|&c| c as f64 / max).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_normalise_basic() {
        let normed = max_normalise(&[1250, 380, 0, 625]).unwrap();
        assert_eq!(normed[0], 1.0);
        assert!((normed[1] - 0.304).abs() < 1e-9);
        assert_eq!(normed[2], 0.0);
        assert_eq!(normed[3], 0.5);
    }

    #[test]
    fn test_all_zero_is_degenerate() {
        let err = max_normalise(&[0, 0, 0]).unwrap_err();
        assert!(matches!(err, KfdxError::DegenerateEvidence));
    }

    #[test]
    fn test_empty_is_rejected() {
        assert!(matches!(max_normalise(&[]), Err(KfdxError::EmptyInput)));
    }
}
