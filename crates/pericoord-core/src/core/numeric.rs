//! Trig-domain clamps.
//!
//! Floating-point round-off can push a computed cosine fractionally outside
//! `[-1, 1]`, or a sine to exactly `0`, which turns `acos`/`asin`/divisions
//! into NaN factories. These clamps confine such arguments to the open domain.
//! They are the only error-avoidance mechanism in the crate: genuine
//! geometric singularities are not recovered from.

/// Margin by which trig arguments are kept inside their open domain.
pub(crate) const TRIG_DOMAIN_MARGIN: f64 = 1e-10;

/// Confines a cosine to `[-1 + ε, 1 - ε]`.
#[inline]
pub(crate) fn clamp_cosine(cos_theta: f64) -> f64 {
    let max = 1.0 - TRIG_DOMAIN_MARGIN;
    let min = -1.0 + TRIG_DOMAIN_MARGIN;
    if cos_theta > max {
        max
    } else if cos_theta < min {
        min
    } else {
        cos_theta
    }
}

/// Pushes a near-zero sine to `±ε`, preserving its sign.
///
/// An exact zero is left untouched.
#[inline]
pub(crate) fn clamp_sine(sin_theta: f64) -> f64 {
    if sin_theta < 0.0 && sin_theta > -TRIG_DOMAIN_MARGIN {
        -TRIG_DOMAIN_MARGIN
    } else if sin_theta > 0.0 && sin_theta < TRIG_DOMAIN_MARGIN {
        TRIG_DOMAIN_MARGIN
    } else {
        sin_theta
    }
}
