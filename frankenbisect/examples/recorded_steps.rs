//! Reduction with a recording observer, dumping the descent as JSONL.
//!
//! Run with: `cargo run --example recorded_steps`

use frankenbisect::{BisectResult, Bisector, RecordingObserver, Verdict};

fn main() -> BisectResult<()> {
    let items: Vec<i32> = (0..256).collect();

    // The failure needs 17 and 200, one from each side of the first split.
    let oracle = |candidate: &[i32]| {
        let joint = candidate.contains(&17) && candidate.contains(&200);
        Ok(Verdict::from_success(!joint))
    };

    let mut observer = RecordingObserver::new();
    let reduced = Bisector::new().run_observed(&oracle, &items, &mut observer)?;

    println!("result: {reduced:?}");
    println!("steps:");
    println!("{}", observer.steps_to_jsonl());
    Ok(())
}
