use std::fs::{self};

use combicalc::{evaluate, interpreter::evaluator::Bindings};
use walkdir::WalkDir;

/// Every ```` ```combicalc ```` block in the book is a list of lines of the
/// form `EXPRESSION => VALUE` or `EXPRESSION => error`. A line `let k = N`
/// binds `k` for the rest of its block.
#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, block) in extract_blocks(&content).into_iter().enumerate() {
            let mut bindings = Bindings::new();

            for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
                if let Some(value) = line.strip_prefix("let k = ") {
                    let value = value.parse()
                                     .unwrap_or_else(|e| panic!("Bad binding '{line}': {e}"));
                    bindings.insert("k".to_string(), value);
                    continue;
                }

                let (source, expected) =
                    line.split_once("=>")
                        .unwrap_or_else(|| panic!("Example line without '=>' in {path:?}: {line}"));
                let (source, expected) = (source.trim(), expected.trim());
                count += 1;

                let result = evaluate(source, &bindings);
                match (expected, result) {
                    ("error", Err(_)) => {},
                    ("error", Ok(value)) => {
                        panic!("Example {} in {:?} should fail but gave {}:\n{}",
                               i + 1,
                               path,
                               value,
                               source)
                    },
                    (expected, Ok(value)) => assert_eq!(value.to_string(),
                                                        expected,
                                                        "Example {} in {:?}: {}",
                                                        i + 1,
                                                        path,
                                                        source),
                    (_, Err(e)) => {
                        panic!("Example {} in {:?} failed:\n{}\nError: {:?}",
                               i + 1,
                               path,
                               source,
                               e)
                    },
                }
            }
        }
    }

    assert!(count > 0, "No examples found in book/src");
}

fn extract_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```combicalc") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn assert_value(src: &str, expected: i64) {
    match evaluate(src, &Bindings::new()) {
        Ok(value) => assert_eq!(value, expected, "Expression: {src}"),
        Err(e) => panic!("Expression '{src}' failed: {e}"),
    }
}

fn assert_failure(src: &str) {
    if evaluate(src, &Bindings::new()).is_ok() {
        panic!("Expression '{src}' succeeded but was expected to fail")
    }
}

#[test]
fn precedence_and_associativity() {
    assert_value("2 + 3 * 5", 17);
    assert_value("(2 + 3) * 5", 25);
    assert_value("2 * 3 + 5", 11);
    assert_value("9 - 4 - 2", 3);
    assert_value("64 / 4 / 2", 8);
    assert_value("17 % 5 * 2", 4);
}

#[test]
fn exponentiation_groups_to_the_right() {
    assert_value("(2 ^ 3) ^ 4", 4096);
    assert_value("2 ^ 3 ^ 2", 512);
    assert_value("-2 ^ 2", -4);
    assert_value("(-2) ^ 2", 4);
    assert_failure("2 ^ 3 ^ 4");
    assert_failure("2 ^ -1");
}

#[test]
fn prefix_signs() {
    assert_value("60/-(2 + -(1 + 1) * 2) + 3 * 2", 36);
    assert_value("--3", 3);
    assert_value("+-+3", -3);
    assert_value("-2 * 3", -6);
    assert_value("2 - -3", 5);
}

#[test]
fn factorials() {
    assert_value("5!", 120);
    assert_value("0!", 1);
    assert_value("-4!", -24);
    assert_value("2 ^ 3!", 64);
    assert_value("20!", 2_432_902_008_176_640_000);
    assert_failure("21!");
    assert_failure("(-1)!");
    assert_failure("-(3)!");
    assert_value("-(3!)", -6);
}

#[test]
fn truncating_division() {
    assert_value("7 / 2", 3);
    assert_value("-7 / 2", -3);
    assert_value("-7 % 3", -1);
    assert_value("7 % -3", 1);
    assert_failure("1 / 0");
    assert_failure("1 % 0");
    assert_failure("(-9223372036854775807 - 1) / -1");
}

#[test]
fn open_groups_close_implicitly() {
    assert_value("(1 + 2", 3);
    assert_value("2 * (3 + (4", 14);
}

#[test]
fn malformed_input_is_rejected() {
    assert_failure("");
    assert_failure("* 2");
    assert_failure("2 +");
    assert_failure("2 + * 3");
    assert_failure("(2))");
    assert_failure("()");
    assert_failure("2 (3)");
    assert_failure("k k");
    assert_failure("2.5");
    assert_failure("x");
    assert_failure("99999999999999999999");
}

#[test]
fn variable_binding() {
    let bindings = Bindings::from([("k".to_string(), 6)]);
    assert_eq!(evaluate("k * (k - 1) / 2", &bindings).unwrap(), 15);
    assert_eq!(evaluate("k!", &bindings).unwrap(), 720);
    assert_failure("k");
}
