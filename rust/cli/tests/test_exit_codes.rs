use blackjack_cli::exit_code;
use blackjack_cli::run_with_input;
use std::io::Cursor;

fn run(args: &[&str]) -> (i32, String, String) {
    let mut stdin = Cursor::new(Vec::new());
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run_with_input(args.iter().copied(), &mut stdin, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn deal_succeeds_and_is_reproducible() {
    let (code, a, _) = run(&["blackjack", "deal", "--seed", "1234"]);
    assert_eq!(code, exit_code::SUCCESS);
    let (_, b, _) = run(&["blackjack", "deal", "--seed", "1234"]);
    assert_eq!(a, b);
    assert!(a.starts_with("Seed: 1234\n"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let (code, _, err) = run(&["blackjack", "play", "--bet", "10"]);
    assert_eq!(code, exit_code::ERROR);
    assert!(err.contains("Usage: blackjack [command] [options]"));
    assert!(err.contains("For full help, run: blackjack --help"));
}

#[test]
fn version_prints_to_stdout() {
    let (code, out, err) = run(&["blackjack", "--version"]);
    assert_eq!(code, exit_code::SUCCESS);
    assert!(out.contains("blackjack"));
    assert!(err.is_empty());
}
