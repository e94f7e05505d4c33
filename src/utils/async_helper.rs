use futures_util::future::BoxFuture;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

/// Boxed async task producing `Result<T, E>`
pub type AsyncTask<T, E> = BoxFuture<'static, Result<T, E>>;

/// Spawns a background thread that runs an async task and sends the result via a channel
///
/// The UI keeps the receiver and polls it with `try_recv` once per frame.
/// Runtime creation failures are reported through the same channel, so the
/// receiver always gets exactly one message unless it was dropped.
///
/// # Example
/// ```ignore
/// let (tx, rx) = std::sync::mpsc::channel();
/// spawn_and_send(move || provider.sign_in(), tx);
/// // Later: if let Ok(result) = rx.try_recv() { ... }
/// ```
pub fn spawn_and_send<F, T, E>(task_factory: F, tx: Sender<Result<T, E>>) -> JoinHandle<()>
where
    F: FnOnce() -> AsyncTask<T, E> + Send + 'static,
    T: Send + 'static,
    E: From<std::io::Error> + Send + 'static,
{
    std::thread::spawn(move || {
        let rt = match crate::utils::error_handling::create_runtime() {
            Ok(r) => r,
            Err(e) => {
                log::error!("[AsyncHelper] Failed to create runtime: {}", e);
                let _ = tx.send(Err(E::from(e)));
                return;
            }
        };

        let result = rt.block_on(task_factory());
        let _ = tx.send(result);
    })
}
