//! Prime capacity selection and the double-hashing probe sequence.
//!
//! The table keeps its capacity prime so that every probe step in
//! `1..capacity` is coprime to the capacity. Under double hashing that makes
//! each key's probe sequence a full permutation of the slots: probing a
//! `size`-slot table for `size` attempts visits every slot exactly once.

/// Polynomial base for the primary hash. A prime larger than the byte
/// alphabet (256 would collide all single-byte keys with base 256).
const PRIMARY_BASE: u128 = 151;

/// Polynomial base for the step hash, independent of [`PRIMARY_BASE`].
const STEP_BASE: u128 = 163;

/// Returns the smallest prime at least 7 that is strictly greater than `x`
/// (or exactly 7 when `x` is below it).
///
/// Candidates advance by two from the first odd number above `x` and are
/// tested by trial division up to their integer square root. Used for every
/// table allocation, so capacities are always prime.
///
/// ```
/// use dhtable::hashing::next_prime;
///
/// assert_eq!(next_prime(0), 7);
/// assert_eq!(next_prime(50), 53);
/// assert_eq!(next_prime(106), 107);
/// ```
#[must_use]
#[allow(clippy::arithmetic_side_effects)] // candidates stay far below usize::MAX
pub fn next_prime(x: usize) -> usize {
    if x < 7 {
        return 7;
    }

    // First odd number strictly greater than x. Lowest candidate is 9.
    let mut candidate = if x % 2 == 0 { x + 1 } else { x + 2 };
    while !is_odd_prime(candidate) {
        candidate += 2;
    }

    candidate
}

/// Trial division primality test for odd candidates of at least 9.
#[allow(clippy::arithmetic_side_effects)]
fn is_odd_prime(n: usize) -> bool {
    let mut divisor: usize = 3;
    // Saturation only kicks in past sqrt(usize::MAX), where no divisor this
    // large can divide n anyway.
    while divisor.saturating_mul(divisor) <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Polynomial rolling hash of `key`'s bytes, reduced modulo `modulus`.
///
/// Accumulation runs in `u128` with both the running power and the
/// accumulator reduced modulo `modulus` every step, so the multiply-add can
/// never wrap before its reduction for any table size that fits in memory.
#[allow(clippy::arithmetic_side_effects)] // modulus is nonzero, operands stay below it
fn poly_hash(key: &str, base: u128, modulus: u128) -> u128 {
    let mut hash = 0;
    let mut power = 1 % modulus;
    for &byte in key.as_bytes() {
        hash = (hash + power * u128::from(byte)) % modulus;
        power = (power * base) % modulus;
    }
    hash
}

/// Slot index for probe `attempt` of `key` in a table of `size` slots.
///
/// Classic double hashing: `(h1 + attempt * h2) mod size`. The step hash is
/// taken modulo `size - 1` and shifted up by one, so it is never congruent
/// to 0 modulo `size` and the sequence cannot stall on one slot. `size` must
/// be at least 2; the table guarantees a prime of at least 7.
#[must_use]
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
pub fn probe_index(key: &str, size: usize, attempt: usize) -> usize {
    let size = size as u128;
    let h1 = poly_hash(key, PRIMARY_BASE, size);
    let h2 = poly_hash(key, STEP_BASE, size - 1) + 1;
    // The sum stays far below u128::MAX and the result below size, which
    // came in as a usize.
    ((h1 + attempt as u128 * h2) % size) as usize
}
