use std::time::Instant;

use mazegrow::{GeneratorConfig, generate_with, logging};

fn main() -> std::io::Result<()> {
    let _guard = logging::init(Some("info"), None)?;

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10);

    let started = Instant::now();
    for i in 0..num_iters {
        let config = GeneratorConfig::new(u8::MAX as u16, u8::MAX as u16, Some(i as u64));
        let maze = generate_with(&config).map_err(std::io::Error::other)?;
        tracing::debug!("[profile] iteration {} carved {} passages", i, maze.edge_count());
    }
    tracing::info!(
        "[profile] {} mazes in {:?} ({:?} each)",
        num_iters,
        started.elapsed(),
        started.elapsed() / num_iters.max(1) as u32
    );
    Ok(())
}
