//! Prints a block of auto-numbered constants.
//!
//! The values come from declaration order, the way a C `enum` or a Go
//! `iota` block numbers its members. Adding a constant in the middle
//! renumbers everything after it.

use std::fmt::Write;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[repr(u32)]
enum Constant {
    Foo,
    Bar,
    Baz,
}

impl Constant {
    const ALL: [Constant; 3] = [Constant::Foo, Constant::Bar, Constant::Baz];

    fn name(self) -> &'static str {
        match self {
            Constant::Foo => "FOO",
            Constant::Bar => "BAR",
            Constant::Baz => "BAZ",
        }
    }

    fn value(self) -> u32 {
        self as u32
    }
}

fn render() -> String {
    let mut out = String::new();
    for constant in Constant::ALL {
        // writes to a String cannot fail
        let _ = writeln!(out, "{} = {}", constant.name(), constant.value());
    }
    out
}

fn main() {
    print!("{}", render());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_output_is_pinned() {
        assert_eq!(render(), "FOO = 0\nBAR = 1\nBAZ = 2\n");
    }

    #[test]
    fn test_values_follow_declaration_order() {
        assert_eq!(Constant::Foo.value(), 0);
        assert_eq!(Constant::Bar.value(), 1);
        assert_eq!(Constant::Baz.value(), 2);
    }
}
