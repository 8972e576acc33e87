//! Clamp

/// Clamps a value into the range [low, high].
///
/// * `val`  - The value to clamp.
/// * `low`  - Lower bound of the range.
/// * `high` - Upper bound of the range.
#[inline(always)]
pub fn clamp<T>(val: T, low: T, high: T) -> T
where
    T: PartialOrd + Copy,
{
    if val < low {
        low
    } else if val > high {
        high
    } else {
        val
    }
}
