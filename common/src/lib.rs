//! Types shared by the netcheck crates: targets, outcomes, errors and the
//! probe configuration.

pub mod config;
pub mod error;
pub mod network;

#[doc(hidden)]
pub use tracing as __tracing;

/// Progress information for the operator.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "netcheck::info", $($arg)*)
    };
}

/// A step that completed as expected.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "netcheck::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!(target: "netcheck::warn", $($arg)*)
    };
}
