use num_bigint::BigUint;
use num_traits::One;
use std::sync::OnceLock;

/// Decimal digits of fixed-point precision carried by every field element
pub const SCALE_DIGITS: u32 = 20;

/// Fixed-point scale as a float, for the final conversion only
pub const SCALE_F64: f64 = 1e20;

/// Pixels per simulation unit
pub const DISPLAY_SCALE: f64 = 60.0;

/// Most recent snapshots drawn as a trail
pub const TRAIL_WINDOW_CAP: usize = 300;

/// Divisor applied to the on-chain impulse vector
pub const IMPULSE_SCALE: f64 = 1e-4;

/// Universe lifetime in ticks
pub const MAX_UNIVERSE_AGE: usize = 2160;

/// Viewport used when no window dimensions are known
pub const FALLBACK_VIEWPORT: (f64, f64) = (700.0, 815.0);

static PRIME: OnceLock<BigUint> = OnceLock::new();
static HALF_PRIME: OnceLock<BigUint> = OnceLock::new();
static SCALE: OnceLock<BigUint> = OnceLock::new();

/// Field prime `2^251 + 17 * 2^192 + 1`
pub fn prime() -> &'static BigUint {
    PRIME.get_or_init(|| {
        (BigUint::one() << 251u32) + (BigUint::from(17u32) << 192u32) + BigUint::one()
    })
}

/// `(PRIME - 1) / 2`, the largest residue decoded as non-negative
pub fn half_prime() -> &'static BigUint {
    HALF_PRIME.get_or_init(|| (prime() - BigUint::one()) >> 1u32)
}

/// `10^20`
pub fn scale() -> &'static BigUint {
    SCALE.get_or_init(|| BigUint::from(10u32).pow(SCALE_DIGITS))
}
