//! Wavelet coefficient variance.
//!
//! Single-level 2-D discrete wavelet decomposition on a Daubechies-6 basis
//! with reflect padding; the score is the sum of the variances of the three
//! detail sub-bands (horizontal, vertical, diagonal). Blur suppresses the
//! high-frequency detail coefficients, so higher = sharper.

use super::{variance, GrayPatch};

/// Daubechies-6 lowpass decomposition filter (12 taps).
const DEC_LO: [f64; 12] = [
    -0.001_077_301_084_995_58,
    0.004_777_257_511_010_651,
    0.000_553_842_200_993_801_6,
    -0.031_582_039_318_031_156,
    0.027_522_865_530_016_29,
    0.097_501_605_587_079_36,
    -0.129_766_867_567_095_63,
    -0.226_264_693_965_169_13,
    0.315_250_351_709_243_2,
    0.751_133_908_021_577_5,
    0.494_623_890_398_385_4,
    0.111_540_743_350_080_17,
];

/// Highpass filter derived from the lowpass taps by the quadrature mirror
/// relation hi[k] = (-1)^(k+1) * lo[L-1-k].
fn dec_hi() -> [f64; 12] {
    let mut hi = [0.0; 12];
    for (k, h) in hi.iter_mut().enumerate() {
        let sign = if k % 2 == 0 { -1.0 } else { 1.0 };
        *h = sign * DEC_LO[DEC_LO.len() - 1 - k];
    }
    hi
}

/// Reflects an index into `0..n` without repeating the edge sample
/// (whole-sample symmetry): for n=4 the pattern is `dcb|abcd|cba`.
fn reflect_whole(i: i64, n: usize) -> usize {
    debug_assert!(n > 0);
    if n == 1 {
        return 0;
    }
    let period = 2 * (n as i64 - 1);
    let mut i = i.rem_euclid(period);
    if i >= n as i64 {
        i = period - i;
    }
    #[allow(clippy::cast_sign_loss)]
    {
        i as usize
    }
}

/// Single-level 1-D DWT of one signal: convolve the reflect-padded signal
/// with the filter, then keep every second sample. Output length is
/// floor((n + L - 1) / 2).
fn dwt1d(signal: &[f64], filter: &[f64; 12]) -> Vec<f64> {
    let n = signal.len();
    let l = filter.len();
    let out_len = (n + l - 1) / 2;
    let mut out = Vec::with_capacity(out_len);
    for i in 0..out_len {
        // Convolution output index kept for this coefficient.
        let j = (2 * i + 1) as i64;
        let mut acc = 0.0;
        for (k, &f) in filter.iter().enumerate() {
            acc += f * signal[reflect_whole(j - k as i64, n)];
        }
        out.push(acc);
    }
    out
}

/// Transposes a rows-of-vecs matrix.
fn transpose(rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    if rows.is_empty() {
        return Vec::new();
    }
    let cols = rows[0].len();
    (0..cols)
        .map(|c| rows.iter().map(|r| r[c]).collect())
        .collect()
}

/// Applies `dwt1d` with both filters to every row, returning the lowpass
/// and highpass halves.
fn analyze_rows(rows: &[Vec<f64>], hi: &[f64; 12]) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let lo_rows = rows.iter().map(|r| dwt1d(r, &DEC_LO)).collect();
    let hi_rows = rows.iter().map(|r| dwt1d(r, hi)).collect();
    (lo_rows, hi_rows)
}

/// Sum of detail sub-band variances after one 2-D decomposition level.
#[must_use]
pub fn wavelet_coefficients_variance(patch: &GrayPatch) -> f64 {
    if patch.is_empty() {
        return 0.0;
    }
    let hi = dec_hi();

    let rows: Vec<Vec<f64>> = (0..patch.height())
        .map(|y| {
            (0..patch.width())
                .map(|x| patch.get_reflect(x as i64, y as i64))
                .collect()
        })
        .collect();

    // Rows first, then columns of each half: L/H -> LL, LH, HL, HH.
    let (lo, hi_band) = analyze_rows(&rows, &hi);
    let (_ll, lh) = analyze_rows(&transpose(&lo), &hi);
    let (hl, hh) = analyze_rows(&transpose(&hi_band), &hi);

    let flat = |m: &[Vec<f64>]| m.iter().flatten().copied().collect::<Vec<f64>>();
    variance(&flat(&lh)) + variance(&flat(&hl)) + variance(&flat(&hh))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highpass_is_orthogonal_to_lowpass() {
        let hi = dec_hi();
        let dot: f64 = DEC_LO.iter().zip(&hi).map(|(a, b)| a * b).sum();
        assert!(dot.abs() < 1e-12);
    }

    #[test]
    fn test_reflect_whole() {
        assert_eq!(reflect_whole(0, 4), 0);
        assert_eq!(reflect_whole(-1, 4), 1);
        assert_eq!(reflect_whole(-2, 4), 2);
        assert_eq!(reflect_whole(4, 4), 2);
        assert_eq!(reflect_whole(5, 4), 1);
        assert_eq!(reflect_whole(7, 4), 1);
    }

    #[test]
    fn test_dwt_output_length() {
        let signal = vec![0.0; 96];
        assert_eq!(dwt1d(&signal, &DEC_LO).len(), (96 + 11) / 2);
    }

    #[test]
    fn test_flat_patch_has_no_detail() {
        let patch = GrayPatch::from_fn(32, 32, |_, _| 99);
        assert!(wavelet_coefficients_variance(&patch) < 1e-9);
    }

    #[test]
    fn test_dwt_keeps_odd_convolution_phase() {
        // On a linear ramp every fully interior coefficient equals
        // j * sum(f) - firstmoment(f) with j = 2i + 1; a shifted
        // downsampling phase would produce different values.
        let signal: Vec<f64> = (0..32).map(f64::from).collect();
        let out = dwt1d(&signal, &DEC_LO);
        let sum: f64 = DEC_LO.iter().sum();
        let moment: f64 = DEC_LO
            .iter()
            .enumerate()
            .map(|(k, &f)| k as f64 * f)
            .sum();
        for (i, &coeff) in out.iter().enumerate().take(16).skip(5) {
            let expected = (2 * i + 1) as f64 * sum - moment;
            assert!((coeff - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_textured_patch_has_detail() {
        // Deterministic noise. A strictly periodic texture such as a
        // per-pixel checkerboard extends periodically under whole-sample
        // reflection, so its detail coefficients are constant and their
        // variance is zero.
        let patch = GrayPatch::from_fn(32, 32, |x, y| {
            let seed = (x as u64).wrapping_mul(6_364_136_223_846_793_005)
                ^ (y as u64).wrapping_mul(1_442_695_040_888_963_407);
            (seed.wrapping_mul(2_862_933_555_777_941_757) >> 56) as u8
        });
        assert!(wavelet_coefficients_variance(&patch) > 1.0);
    }

    #[test]
    fn test_deterministic() {
        let patch = GrayPatch::from_fn(24, 24, |x, y| ((x * 5 + y * 29) % 256) as u8);
        let a = wavelet_coefficients_variance(&patch);
        let b = wavelet_coefficients_variance(&patch);
        assert!((a - b).abs() < f64::EPSILON);
    }
}
