//! Internal logging macros.
//!
//! With the `tracing` feature enabled these forward to the matching `tracing`
//! macro under the `keyed_dag` target. Without it they expand to nothing, and the
//! arguments are not evaluated.

macro_rules! dag_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::trace!(target: "keyed_dag", $($arg)*);
    }};
}

macro_rules! dag_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::debug!(target: "keyed_dag", $($arg)*);
    }};
}

pub(crate) use dag_debug;
pub(crate) use dag_trace;
