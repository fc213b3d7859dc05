/// Error code registry for primesum
///
/// Error codes are organized by category:
/// - 1000-1999: Invalid argument errors
/// - 2000-2999: Resource exhaustion errors
/// - 3000-3999: Range and overflow errors
/// - 4000-4999: Worker errors
/// - 5000-5999: Cancellation
/// - 6000-6999: Configuration errors
#[allow(dead_code)]
pub struct ErrorCode;

impl ErrorCode {
    // Invalid argument errors (1000-1999)
    pub const ARG_GENERIC: u16 = 1000;
    pub const ARG_WRONG_COUNT: u16 = 1001;
    pub const ARG_NOT_NUMERIC: u16 = 1002;
    pub const ARG_NOT_POSITIVE: u16 = 1003;
    pub const ARG_TOO_MANY_THREADS: u16 = 1004;
    pub const ARG_OUT_OF_RANGE: u16 = 1005;

    // Resource exhaustion errors (2000-2999)
    pub const RESOURCE_ALLOCATION_FAILED: u16 = 2001;
    pub const RESOURCE_SPAWN_FAILED: u16 = 2002;

    // Range and overflow errors (3000-3999)
    pub const OVERFLOW_WORKER_SUM: u16 = 3001;
    pub const OVERFLOW_GRAND_SUM: u16 = 3002;
    pub const OVERFLOW_COUNT: u16 = 3003;

    // Worker errors (4000-4999)
    pub const WORKER_PANICKED: u16 = 4001;

    // Cancellation (5000-5999)
    pub const CANCELLED_GENERIC: u16 = 5000;

    // Configuration errors (6000-6999)
    pub const CONFIG_NOT_FOUND: u16 = 6001;
    pub const CONFIG_INVALID_TOML: u16 = 6002;
    pub const CONFIG_INVALID_VALUE: u16 = 6003;
    pub const CONFIG_IO_ERROR: u16 = 6004;
}
