//! Macros for common CLI error handling patterns.

/// Write a line to a stream and return the error exit code if writing fails.
///
/// # Examples
///
/// ```ignore
/// write_or_exit!(err, "Error: {}", message);
/// write_or_exit!(err);
/// ```
#[macro_export]
macro_rules! write_or_exit {
    ($dest:expr) => {
        if writeln!($dest).is_err() {
            return $crate::exit_code::ERROR;
        }
    };
    ($dest:expr, $($arg:tt)*) => {
        if writeln!($dest, $($arg)*).is_err() {
            return $crate::exit_code::ERROR;
        }
    };
}
