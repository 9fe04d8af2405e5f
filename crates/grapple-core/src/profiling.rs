//! Profiling hooks based on the `puffin` crate.
//!
//! Scopes are only recorded with the `profiling` feature. Without it,
//! [`profile_function!`](crate::profile_function) and
//! [`profile_scope!`](crate::profile_scope) expand to nothing so hot paths such as
//! pointer-move handling pay no cost.

/// Default address for the puffin HTTP server.
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8585";

#[cfg(feature = "profiling")]
mod enabled {
    use std::sync::OnceLock;

    pub use puffin::GlobalProfiler;

    static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

    /// Enable puffin scopes and start the HTTP server on `addr`.
    ///
    /// # Example
    /// ```no_run
    /// use grapple_core::profiling::{init_profiling, DEFAULT_SERVER_ADDR};
    ///
    /// init_profiling(DEFAULT_SERVER_ADDR);
    /// ```
    pub fn init_profiling(addr: &str) {
        puffin::set_scopes_on(true);

        match puffin_http::Server::new(addr) {
            Ok(server) => {
                tracing::info!("Puffin profiler server started on http://{}", addr);
                let _ = PROFILING_SERVER.set(server);
            }
            Err(e) => {
                tracing::error!("Failed to start puffin server: {}", e);
            }
        }
    }

    /// Mark the end of one host event-processing frame.
    #[inline]
    pub fn new_frame() {
        puffin::GlobalProfiler::lock().new_frame();
    }
}

#[cfg(feature = "profiling")]
pub use enabled::*;

#[cfg(feature = "profiling")]
#[doc(hidden)]
pub use puffin as __puffin;

#[cfg(not(feature = "profiling"))]
pub fn init_profiling(_addr: &str) {
    tracing::warn!("grapple-core built without the `profiling` feature; profiler not started");
}

#[cfg(not(feature = "profiling"))]
#[inline]
pub fn new_frame() {}

#[cfg(feature = "profiling")]
#[macro_export]
macro_rules! profile_function {
    () => {
        $crate::profiling::__puffin::profile_function!();
    };
}

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_function {
    () => {};
}

#[cfg(feature = "profiling")]
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        $crate::profiling::__puffin::profile_scope!($name);
    };
}

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {};
}
