use hmm_dp::io::corpus::parse_corpus;
use hmm_dp::io::matrices::{load_matrices, parse_matrices, save_matrices};
use hmm_dp::{estimate, HmmError};

const CORPUS: &str = "3\n0 1 2 2\n0 1 0 2\n0 1 1\n0 0 1\n0 2 1 2\n2 2 1 0\n";

#[test]
fn saved_model_reads_back_within_precision() {
    let model = estimate(&parse_corpus(CORPUS).unwrap());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sol-1-1.txt");

    save_matrices(&model, &path).unwrap();
    let loaded = load_matrices(&path).unwrap();

    assert_eq!(loaded.n_states(), model.n_states());
    assert_eq!(loaded.n_observables(), model.n_observables());
    for (orig, back) in model
        .transitions()
        .iter()
        .chain(model.emissions())
        .zip(loaded.transitions().iter().chain(loaded.emissions()))
    {
        for (x, y) in orig.iter().zip(back) {
            assert!((x - y).abs() < 1e-10, "{x} != {y}");
            assert_eq!(*x == 0.0, *y == 0.0);
        }
    }
}

#[test]
fn saved_text_layout() {
    let model = estimate(&parse_corpus("1\n0 1 1\n0 1 1\n").unwrap());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.txt");
    save_matrices(&model, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    // A: 0->1; 1->1.  B: 0 emits 0; 1 emits 1.
    assert_eq!(text, "0 1\n0 1\n1 0\n0 1\n");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_matrices(dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, HmmError::Io(_)));
}

#[test]
fn garbage_is_a_parse_error() {
    let err = parse_matrices("0 1\n0 x\n").unwrap_err();
    assert!(matches!(err, HmmError::Parse { line: 2, .. }));
}
