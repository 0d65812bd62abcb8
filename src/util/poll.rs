use std::{future::Future, io, panic, sync::OnceLock, thread};

use tokio::runtime::{Builder, Handle, Runtime};

static RUNTIME: OnceLock<io::Result<Runtime>> = OnceLock::new();

fn runtime() -> io::Result<&'static Runtime> {
    RUNTIME
        .get_or_init(|| {
            Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("objectsync-io")
                .enable_all()
                .build()
        })
        .as_ref()
        .map_err(|err| io::Error::new(err.kind(), err.to_string()))
}

/// Blocks the calling thread until `future` completes.
///
/// Every storage request goes through the same process-wide runtime so that
/// SDK clients built here keep their connection pools alive between calls.
/// Called from inside an async context, the future is driven from a scoped
/// thread instead, since `block_on` may not nest.
pub fn poll_until_ready<Fut>(future: Fut) -> io::Result<Fut::Output>
where
    Fut: Future + Send,
    Fut::Output: Send,
{
    let rt = runtime()?;

    if Handle::try_current().is_err() {
        return Ok(rt.block_on(future));
    }

    thread::scope(|scope| match scope.spawn(|| rt.block_on(future)).join() {
        Ok(output) => Ok(output),
        Err(payload) => panic::resume_unwind(payload),
    })
}
