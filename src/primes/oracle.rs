//! Trial-division primality test
//!
//! Numbers `<= 1` are not prime, 2 is prime, other even numbers are not, and
//! an odd `n` is prime when no odd `d` with `3 <= d*d <= n` divides it.

/// Check whether `n` is prime
///
/// Total over `i64`: negative numbers, zero and one are reported as not prime.
///
/// # Examples
///
/// ```
/// use primesum::primes::is_prime;
///
/// assert!(is_prime(2));
/// assert!(is_prime(97));
/// assert!(!is_prime(91));
/// assert!(!is_prime(-7));
/// ```
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    is_prime_u64(n.unsigned_abs())
}

/// Unsigned form of [`is_prime`], used by the workers' range scan
pub fn is_prime_u64(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut d: u64 = 3;
    // A square that overflows u64 is necessarily larger than n.
    while let Some(square) = d.checked_mul(d) {
        if square > n {
            break;
        }
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
