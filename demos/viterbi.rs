//! Example: train from labeled sequences, then decode.
//!
//! Run with:
//! `cargo run --example viterbi`

use hmm_dp::{
    estimate, DecoderBuilder, LogProbability, StartDistribution, TrainingSequence,
};

fn main() -> hmm_dp::Result<()> {
    // Weather (0 = sunny, 1 = rainy) observed through activity
    // (10 = walk, 20 = shop, 30 = clean). Labels need not be contiguous.
    let corpus = vec![
        TrainingSequence::new(vec![0, 0, 1, 1, 0], vec![10, 20, 30, 30, 10])?,
        TrainingSequence::new(vec![1, 1, 0, 0, 0], vec![30, 20, 10, 10, 20])?,
        TrainingSequence::new(vec![0, 1, 1, 1, 0], vec![10, 30, 30, 20, 10])?,
    ];
    let model = estimate(&corpus);

    println!("States:      {:?}", model.states().labels());
    println!("Observables: {:?}", model.observables().labels());
    for (s, row) in model.transitions().iter().enumerate() {
        println!("A[{s}] = {row:?}");
    }
    for (s, row) in model.emissions().iter().enumerate() {
        println!("B[{s}] = {row:?}");
    }

    let decoder = DecoderBuilder::new(&model)
        .start(StartDistribution::Explicit(vec![0.5, 0.5]))
        .build::<LogProbability>()?;

    let raw = [10, 10, 30, 30, 20, 10];
    let obs = model.encode_observations(&raw)?;
    let path = decoder.decode(&obs)?;

    println!("Observations: {raw:?}");
    println!("Decoded states: {:?}", model.decode_states(path.states())?);
    println!("Status: {:?}", path.status());
    Ok(())
}
