//! Async glue that differs per platform.

/// Fire-and-forget future on the browser event loop. Desktop code paths run
/// their futures to completion inline instead (see the export panel).
#[cfg(target_arch = "wasm32")]
pub fn spawn_future<F>(future: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}
