use hmm_dp::{DecoderBuilder, LogProbability, Model, Probability, StartDistribution};

fn demo_model() -> Model {
    Model::from_matrices(
        vec![vec![0.9, 0.1], vec![0.2, 0.8]],
        vec![vec![0.8, 0.2], vec![0.3, 0.7]],
    )
    .unwrap()
}

#[test]
fn viterbi_example_integration() {
    let model = demo_model();
    let obs = vec![0, 0, 1, 1];
    let decoder = DecoderBuilder::new(&model)
        .start(StartDistribution::Explicit(vec![0.6, 0.4]))
        .build::<Probability>()
        .unwrap();
    let table = decoder.decode_table(&obs).unwrap();
    let path = table.backtrack();
    assert_eq!(path.len(), obs.len());
    assert_eq!(path.states(), &[0, 0, 1, 1]);

    let (best_state, score) = table.best_final().unwrap();
    assert_eq!(best_state, 1);
    // .6*.8 * .9*.8 * .1*.7 * .8*.7
    assert!((score.0 - 0.01354752).abs() < 1e-12);
}

#[test]
fn log_space_table_matches_probabilities() {
    let model = demo_model();
    let obs = vec![1, 0, 1, 1, 0];
    let start = StartDistribution::Explicit(vec![0.5, 0.5]);
    let lin = DecoderBuilder::new(&model)
        .start(start.clone())
        .build::<Probability>()
        .unwrap()
        .decode_table(&obs)
        .unwrap();
    let log = DecoderBuilder::new(&model)
        .start(start)
        .build::<LogProbability>()
        .unwrap()
        .decode_table(&obs)
        .unwrap();

    for s in 0..2 {
        for t in 0..obs.len() {
            let p = lin.score(s, t).unwrap().0;
            let l = log.score(s, t).unwrap().0.exp();
            assert!((p - l).abs() <= 1e-12 * p.max(1e-300), "({s},{t}): {p} vs {l}");
        }
    }
}

/// Two predecessors reach state 2 with products `y * x` and `w * z`.
fn converging_paths(x: f64, y: f64, z: f64, w: f64) -> (Vec<usize>, Vec<usize>) {
    let model = Model::from_matrices(
        vec![
            vec![0.0, 0.0, x],
            vec![0.0, 0.0, z],
            vec![0.0, 0.0, 1.0],
        ],
        vec![vec![1.0], vec![1.0], vec![1.0]],
    )
    .unwrap();
    let start = StartDistribution::Explicit(vec![y, w, 0.0]);
    let lin = DecoderBuilder::new(&model)
        .start(start.clone())
        .build::<Probability>()
        .unwrap()
        .decode(&[0, 0])
        .unwrap();
    let log = DecoderBuilder::new(&model)
        .start(start)
        .build::<LogProbability>()
        .unwrap()
        .decode(&[0, 0])
        .unwrap();
    (lin.into_states(), log.into_states())
}

#[test]
fn log_space_breaks_exact_ties_like_probabilities() {
    // .8 * .3 == .4 * .6 exactly, but ln(.8) + ln(.3) < ln(.4) + ln(.6)
    let (lin, log) = converging_paths(0.3, 0.8, 0.6, 0.4);
    assert_eq!(lin, vec![0, 2]);
    assert_eq!(log, lin);
}

#[test]
fn log_space_agrees_on_two_decimal_grid() {
    let vals: Vec<f64> = (1..10).map(|i| i as f64 / 10.0).collect();
    for &x in &vals {
        for &y in &vals {
            for &z in &vals {
                for &w in &vals {
                    let (p0, p1) = (y * x, w * z);
                    // products a single rounding apart are ordered by noise
                    if p0 != p1 && (p0 - p1).abs() <= 1e-12 * p0.max(p1) {
                        continue;
                    }
                    let (lin, log) = converging_paths(x, y, z, w);
                    assert_eq!(lin, log, "x={x} y={y} z={z} w={w}");
                }
            }
        }
    }
}
