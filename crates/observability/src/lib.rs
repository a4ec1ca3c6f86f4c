//! Process-wide logging setup.

pub mod subscriber;

pub use subscriber::LogFormat;

/// Initialize process-wide logging.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    subscriber::init(LogFormat::from_env());
}

/// Install a subscriber that writes through the test harness capture.
pub fn init_for_tests() {
    subscriber::init_for_tests();
}
