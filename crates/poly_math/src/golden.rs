//! Golden-ratio constants
//!
//! Every coordinate and every distance-class center in the kernel is derived
//! from these functions, so classification is checked against the closed
//! form rather than against observed floating-point output.

/// √5
#[inline]
pub fn sqrt5() -> f64 {
    5.0f64.sqrt()
}

/// The golden ratio `g = (1 + √5) / 2` (≈ 1.618)
#[inline]
pub fn golden_ratio() -> f64 {
    (1.0 + sqrt5()) / 2.0
}

/// The reciprocal `h = 2 / (1 + √5) = 1/g = g - 1` (≈ 0.618)
#[inline]
pub fn inverse_golden_ratio() -> f64 {
    2.0 / (1.0 + sqrt5())
}

/// `h²`, which equals `2 - g` (≈ 0.382)
#[inline]
pub fn inverse_golden_ratio_squared() -> f64 {
    let h = inverse_golden_ratio();
    h * h
}
