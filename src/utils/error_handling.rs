use std::sync::{Mutex, MutexGuard};
use tokio::runtime::Runtime;

/// Creates a lightweight single-threaded Tokio runtime
///
/// Uses current_thread scheduler to avoid thread explosion: every background
/// task (sign-in, avatar download, clock ticker) owns one short-lived runtime.
pub fn create_runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Safely locks a mutex with poisoning recovery
///
/// If the mutex is poisoned (previous holder panicked), the inner value is
/// recovered. Only used for cached token state where a stale value is harmless.
pub fn safe_lock<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("[{}] Mutex poisoned, recovering from panic", context);
            poisoned.into_inner()
        }
    }
}
