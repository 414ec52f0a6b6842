//! Simulator phase tests on embedded programs.

use pretty_assertions::assert_eq;

use crate::common::run;

#[test]
fn test_arithmetic_program() {
    assert_eq!(run("34 35 + ."), "69\n");
    assert_eq!(run("500 80 - ."), "420\n");
}

#[test]
fn test_branching_program() {
    assert_eq!(run("1 if 34 35 + . else 0 . end"), "69\n");
    assert_eq!(run("0 if 34 35 + . else 0 . end"), "0\n");
}

#[test]
fn test_countdown_loop() {
    assert_eq!(run("5 while dup 0 > do dup . 1 - end"), "5\n4\n3\n2\n1\n");
}

#[test]
fn test_nested_loop_and_branch() {
    let source = "0 while dup 3 < do dup dup = if dup . end 1 + end";
    assert_eq!(run(source), "0\n1\n2\n");
}
