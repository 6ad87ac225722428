//! Float helpers that are not available in `core`.
//!
//! With `std` these forward to the inherent `f64` methods; without it they use `libm`.

#[inline]
pub(crate) fn powi(x: f64, n: i32) -> f64 {
    #[cfg(feature = "std")]
    {
        x.powi(n)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::pow(x, n as f64)
    }
}

#[inline]
pub(crate) fn powf(x: f64, y: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        x.powf(y)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::pow(x, y)
    }
}

#[inline]
pub(crate) fn trunc(x: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        x.trunc()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::trunc(x)
    }
}

/// Returns `x` as an `i32` when it is an exact integer in range.
#[inline]
pub(crate) fn as_exact_i32(x: f64) -> Option<i32> {
    if x.is_finite() && trunc(x) == x && x >= i32::MIN as f64 && x <= i32::MAX as f64 {
        Some(x as i32)
    } else {
        None
    }
}
