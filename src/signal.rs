use crate::logger::Logger;
use std::io;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Why a reopen loop stopped on its own.
///
/// Either case means output may still be going to a rotated-away file,
/// silently losing every subsequent line; the owner should treat the
/// affected logger as broken rather than keep writing blind.
#[derive(Debug, thiserror::Error)]
pub enum SignalLoopError {
    /// [`Logger::reopen`] failed; the sink may still point at the old
    /// file.
    #[error("reopen after signal failed: {0}")]
    Reopen(#[source] io::Error),

    /// The signal stream yielded `None`, which signals a runtime
    /// lifecycle bug in the host program, not a normal condition.
    #[error("signal stream closed unexpectedly")]
    StreamClosed,

    /// The loop task itself was cancelled or panicked.
    #[error("reopen loop task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Handle to a running reopen-on-signal loop.
///
/// The loop calls [`Logger::reopen`] exactly once per delivered
/// signal, so an external rotator can rename the live log file and
/// then signal this process to move off the stale handle. A reopen
/// failure or a closed signal stream stops the loop; nothing is
/// retried, and the error stays observable through
/// [`join`](ReopenOnSignal::join) instead of being swallowed.
///
/// One loop handles one signal; spawn several for several signals.
pub struct ReopenOnSignal {
    stop: watch::Sender<bool>,
    handle: JoinHandle<Result<(), SignalLoopError>>,
}

impl ReopenOnSignal {
    /// Register for `kind` and start the loop on the current tokio
    /// runtime.
    ///
    /// **Parameters**
    /// - `logger`: the logger whose sink is reopened on each delivery.
    /// - `kind`: the Unix signal to listen for, e.g.
    ///   `SignalKind::hangup()`.
    ///
    /// **Returns**
    /// - `Err(..)` if the OS signal handler could not be registered.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(logger: Logger, kind: SignalKind) -> io::Result<ReopenOnSignal> {
        let mut stream = signal(kind)?;
        let (stop, mut stopped) = watch::channel(false);

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = stopped.changed() => return Ok(()),
                    received = stream.recv() => match received {
                        Some(()) => {
                            if let Err(err) = logger.reopen() {
                                return Err(SignalLoopError::Reopen(err));
                            }
                        }
                        None => return Err(SignalLoopError::StreamClosed),
                    },
                }
            }
        });

        Ok(ReopenOnSignal { stop, handle })
    }

    /// Ask the loop to exit and wait for it to finish.
    pub async fn stop(self) -> Result<(), SignalLoopError> {
        let _ = self.stop.send(true);
        self.handle.await?
    }

    /// Wait for the loop to terminate on its own. Resolves with `Err`
    /// when a reopen failed or the signal stream closed.
    pub async fn join(self) -> Result<(), SignalLoopError> {
        self.handle.await?
    }

    /// Whether the loop has already terminated.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
