//! Vector utility functions: NaN-aware aggregates, distinct values, nearest index.
//!
//! NaN marks a missing value. Every aggregate here skips NaN instead of
//! treating it as zero and returns None when nothing is left.

pub fn nan_max(vec: &[f64]) -> Option<f64> {
    vec.iter().copied().filter(|v| !v.is_nan()).max_by(f64::total_cmp)
}

pub fn nan_min(vec: &[f64]) -> Option<f64> {
    vec.iter().copied().filter(|v| !v.is_nan()).min_by(f64::total_cmp)
}

pub fn nan_mean(vec: &[f64]) -> Option<f64> {
    let (sum, n) = vec
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

pub fn nan_median(vec: &[f64]) -> Option<f64> {
    let mut vals: Vec<f64> = vec.iter().copied().filter(|v| !v.is_nan()).collect();
    if vals.is_empty() {
        return None;
    }
    vals.sort_by(f64::total_cmp);
    let mid = vals.len() / 2;
    if vals.len() % 2 == 0 {
        Some((vals[mid - 1] + vals[mid]) / 2.0)
    } else {
        Some(vals[mid])
    }
}

/// Sorted distinct values. Values closer than `tol` to the previous kept
/// value are treated as the same value.
pub fn distinct_sorted(vec: &[f64], tol: f64) -> Vec<f64> {
    let mut vals: Vec<f64> = vec.iter().copied().filter(|v| !v.is_nan()).collect();
    vals.sort_by(f64::total_cmp);
    let mut out: Vec<f64> = Vec::with_capacity(vals.len());
    for v in vals {
        if out.last().is_none_or(|&last| (v - last).abs() > tol) {
            out.push(v);
        }
    }
    out
}

/// Index of the element of `vec` closest to `target` (first one on ties).
pub fn nearest_index(vec: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in vec.iter().enumerate() {
        let d = (v - target).abs();
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_min_skip_nan() {
        let v = [1.0, f64::NAN, 3.0, 2.0];
        assert_eq!(nan_max(&v), Some(3.0));
        assert_eq!(nan_min(&v), Some(1.0));
        assert_eq!(nan_max(&[f64::NAN]), None);
        assert_eq!(nan_min(&[]), None);
    }

    #[test]
    fn test_mean_ignores_nan() {
        // NaN cells must not count as zero
        assert_eq!(nan_mean(&[2.0, f64::NAN, 4.0]), Some(3.0));
        assert_eq!(nan_mean(&[f64::NAN, f64::NAN]), None);
    }

    #[test]
    fn test_median() {
        assert_eq!(nan_median(&[5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(nan_median(&[4.0, 1.0, f64::NAN, 3.0, 2.0]), Some(2.5));
        assert_eq!(nan_median(&[]), None);
    }

    #[test]
    fn test_distinct_sorted() {
        let v = [3.0, 1.0, 2.0, 1.0, 3.0 + 1e-12];
        assert_eq!(distinct_sorted(&v, 1e-9), vec![1.0, 2.0, 3.0]);
        assert_eq!(distinct_sorted(&v, 0.0).len(), 4);
    }

    #[test]
    fn test_nearest_index() {
        let axis = [0.0, 1.08, 2.16, 3.24];
        assert_eq!(nearest_index(&axis, 2.1600000001), Some(2));
        assert_eq!(nearest_index(&axis, -5.0), Some(0));
        assert_eq!(nearest_index(&axis, 0.54), Some(0));
        assert_eq!(nearest_index(&[], 1.0), None);
    }
}
