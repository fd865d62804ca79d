use fieldline::init;

fn main() -> std::io::Result<()> {
    let path = std::env::temp_dir().join("fieldline-demo.log");
    let logger = init::file_logger("demo", &path)?;

    fieldline::info!(logger, "service started");
    fieldline::warning!(logger, "cache miss rate {}%", 12);
    fieldline::error!(logger, "upstream unavailable, retry in {}s", 5);
    logger.flush()?;

    println!("wrote 3 lines to {}", path.display());
    Ok(())
}
