//! Pair the file logger with an external rotator: run this, then
//! `mv` the log file away and `kill -HUP <pid>` to watch writing move
//! to a fresh file at the original path.

#[cfg(unix)]
#[tokio::main]
async fn main() -> std::io::Result<()> {
    use fieldline::init;
    use fieldline::signal::ReopenOnSignal;
    use tokio::signal::unix::SignalKind;
    use tokio::time::{sleep, Duration};

    let path = std::env::temp_dir().join("fieldline-rotate.log");
    let logger = init::file_logger("rotate-demo", &path)?;
    let reopen_loop = ReopenOnSignal::spawn(logger.clone(), SignalKind::hangup())?;

    println!(
        "pid {} logging to {}; send SIGHUP after rotating the file",
        std::process::id(),
        path.display()
    );

    for i in 0..30 {
        fieldline::info!(logger, "tick {}", i);
        sleep(Duration::from_secs(1)).await;
    }

    reopen_loop
        .stop()
        .await
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    Ok(())
}

#[cfg(not(unix))]
fn main() {
    eprintln!("signal-driven rotation is only available on unix");
}
