pub mod config;
pub mod math;
pub mod trace;

// ============================================================================
// Sweep Progress Macros
// ============================================================================

/// Conditionally log sweep progress based on sample interval when the perf_stats
/// feature is enabled.
///
/// This macro logs a message every 100,000 samples. When the perf_stats feature
/// is disabled, this macro compiles to nothing - zero runtime cost.
///
/// # Example
/// ```ignore
/// sweep_log!(sample, "Swept {} patterns for {}", sample, op_name);
/// ```
///
/// # Zero-Cost Abstraction
/// When compiled without the `perf_stats` feature, this expands to an empty block.
/// Even the arguments (e.g., a formatted op name) are not evaluated.
#[macro_export]
#[cfg(feature = "perf_stats")]
macro_rules! sweep_log {
    ($sample:expr, $($arg:tt)*) => {
        if $sample % 100_000 == 0 {
            tracing::info!($($arg)*);
        }
    };
}

#[macro_export]
#[cfg(not(feature = "perf_stats"))]
macro_rules! sweep_log {
    ($sample:expr, $($arg:tt)*) => {};
}
