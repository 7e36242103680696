//! Minimal end-to-end reduction with an in-process oracle.
//!
//! Run with: `cargo run --example basic_reduce`

use frankenbisect::{BisectResult, Bisector, Verdict};

fn main() -> BisectResult<()> {
    // A synthetic "crash log": the failure needs both markers to survive.
    let log: Vec<String> = [
        "boot ok",
        "config loaded",
        "ALLOC spike",
        "cache warm",
        "worker started",
        "FREE of live pointer",
        "shutdown",
    ]
    .iter()
    .map(|line| (*line).to_string())
    .collect();

    let oracle = |candidate: &[String]| {
        let alloc = candidate.iter().any(|line| line.contains("ALLOC"));
        let free = candidate.iter().any(|line| line.contains("FREE"));
        Ok(Verdict::from_success(!(alloc && free)))
    };

    let reduced = Bisector::new().run(&oracle, &log)?;

    println!("reduced {} lines to {}:", log.len(), reduced.len());
    for line in &reduced {
        println!("  {line}");
    }
    Ok(())
}
