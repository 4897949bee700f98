use pretty_assertions::assert_eq;
use std::io::Cursor;
use string_puzzles::Interpreter;
use string_puzzles::env::{Environment, GROUP_ALGORITHM_VAR, LENIENT_VAR};

fn run(env: Environment, name: &str, args: &[&str], input: &str) -> (i32, String) {
    let mut interp = Interpreter::default().with_environment(env);
    let mut stdin = Cursor::new(input.as_bytes().to_vec());
    let mut out = Vec::new();
    let code = interp.run_with_io(name, args, &mut stdin, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_group_words_canonical_example() {
    let input = "5\naba\naa\nabba\naabbbccb\nefgh\n";
    for algorithm in ["scan", "single-pass"] {
        let (code, out) = run(
            Environment::default(),
            "group-words",
            &["--algorithm", algorithm],
            input,
        );
        assert_eq!(code, 0);
        assert_eq!(out, "3\n");
    }
}

#[test]
fn test_group_words_problem_statement_examples() {
    let (code, out) = run(
        Environment::default(),
        "group-words",
        &[],
        "3\nhappy\nnew\nyear\n",
    );
    assert_eq!((code, out.as_str()), (0, "3\n"));

    let (code, out) = run(
        Environment::default(),
        "group-words",
        &[],
        "4\naba\nabab\nabcabc\na\n",
    );
    assert_eq!((code, out.as_str()), (0, "1\n"));
}

#[test]
fn test_group_words_algorithm_from_environment() {
    let mut env = Environment::default();
    env.set_var(GROUP_ALGORITHM_VAR, "single-pass");
    let (code, out) = run(env, "group-words", &["ccazzzzbb", "kin", "aabbbccb"], "");
    assert_eq!(code, 0);
    assert_eq!(out, "2\n");
}

#[test]
fn test_group_words_rejects_malformed_input() {
    for input in ["0\n", "101\n", "x\n", "2\nabc\n", "1\nhello world\n"] {
        let (code, out) = run(Environment::default(), "group-words", &[], input);
        assert_eq!(code, 1, "input {input:?} should be rejected");
        assert_eq!(out, "");
    }
}

#[test]
fn test_repeat_canonical_example() {
    let (code, out) = run(
        Environment::default(),
        "repeat",
        &[],
        "2\n3 ABC\n5 /2:\n",
    );
    assert_eq!(code, 0);
    assert_eq!(out, "AAABBBCCC\n/////2:2:2:2:2:\n");
}

#[test]
fn test_repeat_ignores_lines_past_count() {
    let (code, out) = run(
        Environment::default(),
        "repeat",
        &[],
        "1\r\n2 HI\r\n3 IGNORED\r\n",
    );
    assert_eq!(code, 0);
    assert_eq!(out, "HHII\n");
}

#[test]
fn test_repeat_lenient_from_environment() {
    let input = "1\n12 a\n";

    let (code, _) = run(Environment::default(), "repeat", &[], input);
    assert_eq!(code, 1);

    let mut env = Environment::default();
    env.set_var(LENIENT_VAR, "true");
    let (code, out) = run(env, "repeat", &[], input);
    assert_eq!(code, 0);
    assert_eq!(out, format!("{}\n", "a".repeat(12)));
}

#[test]
fn test_unknown_command_is_an_error() {
    let mut interp = Interpreter::default().with_environment(Environment::default());
    let err = interp
        .run_with_io("grep", &["x"], &mut std::io::empty(), &mut Vec::new())
        .unwrap_err();
    assert_eq!(err.to_string(), "command not found: grep");
}

#[test]
fn test_repeat_lenient_rejects_oversized_factor() {
    let mut env = Environment::default();
    env.set_var(LENIENT_VAR, "1");
    let (code, out) = run(env, "repeat", &[], "1\n18446744073709551615 AB\n");
    assert_eq!(code, 1);
    assert_eq!(out, "");
}

#[test]
fn test_inline_arguments_respect_count_bounds() {
    let words: Vec<String> = (b'a'..=b'z')
        .flat_map(|a| (b'a'..=b'z').map(move |b| format!("{}{}", a as char, b as char)))
        .take(150)
        .collect();
    let args: Vec<&str> = words.iter().map(String::as_str).collect();

    let (code, out) = run(Environment::default(), "group-words", &args, "");
    assert_eq!((code, out.as_str()), (1, ""));

    let (code, out) = run(Environment::default(), "group-words", &args[..100], "");
    assert_eq!((code, out.as_str()), (0, "100\n"));

    let mut lenient = vec!["--lenient"];
    lenient.extend(&args);
    let (code, out) = run(Environment::default(), "group-words", &lenient, "");
    assert_eq!((code, out.as_str()), (0, "150\n"));
}
