//! Lag-polynomial helpers for seasonal ARIMA models.
//!
//! A polynomial in the backshift operator `B` is stored as its coefficient
//! vector indexed by lag, so `poly[0]` is always `1.0` and `poly[k]` is the
//! coefficient of `B^k`.

/// Multiply two lag polynomials.
pub fn multiply(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return vec![];
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// Autoregressive polynomial `1 - c_1 B^s - c_2 B^{2s} - ...`.
pub fn autoregressive(coefficients: &[f64], stride: usize) -> Vec<f64> {
    let mut poly = vec![0.0; coefficients.len() * stride + 1];
    poly[0] = 1.0;
    for (i, c) in coefficients.iter().enumerate() {
        poly[(i + 1) * stride] = -c;
    }
    poly
}

/// Moving-average polynomial `1 + c_1 B^s + c_2 B^{2s} + ...`.
pub fn moving_average(coefficients: &[f64], stride: usize) -> Vec<f64> {
    let mut poly = vec![0.0; coefficients.len() * stride + 1];
    poly[0] = 1.0;
    for (i, c) in coefficients.iter().enumerate() {
        poly[(i + 1) * stride] = *c;
    }
    poly
}

/// Differencing polynomial `(1 - B)^d (1 - B^s)^D`.
pub fn differencing(d: usize, seasonal_d: usize, period: usize) -> Vec<f64> {
    let mut poly = vec![1.0];
    for _ in 0..d {
        poly = multiply(&poly, &[1.0, -1.0]);
    }
    if period > 0 {
        let mut seasonal = vec![0.0; period + 1];
        seasonal[0] = 1.0;
        seasonal[period] = -1.0;
        for _ in 0..seasonal_d {
            poly = multiply(&poly, &seasonal);
        }
    }
    poly
}

/// Apply a lag polynomial to a series: `out_t = sum_k poly[k] * y_{t-k}`.
///
/// Only positions with a full lag history are produced, so the output is
/// `poly.len() - 1` shorter than the input (empty if the input is too short).
pub fn apply(series: &[f64], poly: &[f64]) -> Vec<f64> {
    let order = poly.len().saturating_sub(1);
    if series.len() <= order {
        return vec![];
    }
    (order..series.len())
        .map(|t| {
            poly.iter()
                .enumerate()
                .map(|(k, c)| c * series[t - k])
                .sum::<f64>()
        })
        .collect()
}

/// Undo [`apply`] for values that continue `history`.
///
/// `poly` must be monic. Each value of `continuation` is the polynomial
/// applied at the next position; the returned values are on the scale of
/// `history`.
pub fn integrate(continuation: &[f64], history: &[f64], poly: &[f64]) -> Vec<f64> {
    let mut extended = history.to_vec();
    for w in continuation {
        let t = extended.len();
        let mut y = *w;
        for (k, c) in poly.iter().enumerate().skip(1) {
            if t >= k {
                y -= c * extended[t - k];
            }
        }
        extended.push(y);
    }
    extended.split_off(history.len())
}

/// First `count` MA(infinity) weights of the model `ar(B) y_t = ma(B) e_t`.
pub fn psi_weights(ar: &[f64], ma: &[f64], count: usize) -> Vec<f64> {
    let mut psi: Vec<f64> = Vec::with_capacity(count);
    for j in 0..count {
        if j == 0 {
            psi.push(1.0);
            continue;
        }
        let mut weight = ma.get(j).copied().unwrap_or(0.0);
        for k in 1..=j.min(ar.len().saturating_sub(1)) {
            weight -= ar[k] * psi[j - k];
        }
        psi.push(weight);
    }
    psi
}
