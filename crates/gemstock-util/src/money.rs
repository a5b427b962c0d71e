//! Money helpers
//!
//! Prices are plain `f64` values kept at two fractional digits. Every price is
//! rounded at the point it is written, and every aggregate is rounded once
//! after summing.

/// Round a monetary amount to two fractional digits (half away from zero).
pub fn round_cents(amount: f64) -> f64 {
    let rounded = (amount * 100.0).round() / 100.0;
    // Normalize -0.0 so serialized output never shows "-0.0"
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Sum an iterator of amounts and round the total to two fractional digits.
pub fn sum_cents<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    round_cents(amounts.into_iter().sum())
}
