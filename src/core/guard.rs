//! Detection of the `#if VERSION <op> N` and `#endif ... VERSION` markers

use std::cmp::Ordering;
use std::num::IntErrorKind;

pub const IF_MARKER: &str = "#if";
pub const ENDIF_MARKER: &str = "#endif";
pub const VERSION_TOKEN: &str = "VERSION";

/// Comparison operator of a guard expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Le,
    Ge,
    Lt,
    Gt,
    Eq,
}

impl CmpOp {
    /// Operator tokens, longest first so `<=` is not read as `<`
    const TOKENS: [(&'static str, CmpOp); 6] = [
        ("<=", CmpOp::Le),
        (">=", CmpOp::Ge),
        ("==", CmpOp::Eq),
        ("<", CmpOp::Lt),
        (">", CmpOp::Gt),
        ("=", CmpOp::Eq),
    ];

    /// Split an operator token off the front of `s`
    fn take_from(s: &str) -> Option<(Self, &str)> {
        Self::TOKENS
            .iter()
            .find_map(|(token, op)| s.strip_prefix(token).map(|rest| (*op, rest)))
    }

    /// Whether the operator holds given how `VERSION` compares to the literal
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            CmpOp::Le => ordering != Ordering::Greater,
            CmpOp::Ge => ordering != Ordering::Less,
            CmpOp::Lt => ordering == Ordering::Less,
            CmpOp::Gt => ordering == Ordering::Greater,
            CmpOp::Eq => ordering == Ordering::Equal,
        }
    }
}

/// Integer literal of a guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    /// Larger than any `i64`
    AboveRange,
    /// Smaller than any `i64`
    BelowRange,
}

impl Literal {
    /// How `version` compares to this literal
    pub fn compare(self, version: i64) -> Ordering {
        match self {
            Literal::Int(value) => version.cmp(&value),
            Literal::AboveRange => Ordering::Less,
            Literal::BelowRange => Ordering::Greater,
        }
    }
}

/// A parsed `VERSION <op> N` expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guard {
    pub op: CmpOp,
    pub value: Literal,
}

impl Guard {
    pub fn eval(&self, version: i64) -> bool {
        self.op.holds(self.value.compare(version))
    }
}

/// What a line means to the filter
#[derive(Debug, PartialEq, Eq)]
pub enum Marker {
    /// `#if VERSION <op> N`
    If(Guard),
    /// `#endif ... VERSION`
    Endif,
    /// Anything else
    None,
}

impl Marker {
    /// Classify a line.
    ///
    /// Opening guards are checked before closing markers. Anything after the
    /// integer of an opening guard is ignored.
    pub fn detect_from(line: &str) -> Marker {
        for (i, _) in line.match_indices(IF_MARKER) {
            match parse_guard(&line[i + IF_MARKER.len()..]) {
                Marker::None => continue,
                found => return found,
            }
        }
        if let Some(i) = line.find(ENDIF_MARKER) {
            if line[i + ENDIF_MARKER.len()..].contains(VERSION_TOKEN) {
                return Marker::Endif;
            }
        }
        Marker::None
    }
}

/// Parse `VERSION <op> N` at the start of `s`, with optional whitespace around the operator
fn parse_guard(s: &str) -> Marker {
    let s = match s.trim_start().strip_prefix(VERSION_TOKEN) {
        Some(s) => s.trim_start(),
        None => return Marker::None,
    };
    let (op, s) = match CmpOp::take_from(s) {
        Some(x) => x,
        None => return Marker::None,
    };
    let s = s.trim_start();
    let sign_len = if s.starts_with('-') { 1 } else { 0 };
    let digits_len = s[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len() - sign_len);
    if digits_len == 0 {
        return Marker::None;
    }
    let literal = &s[..sign_len + digits_len];
    let value = match literal.parse::<i64>() {
        Ok(value) => Literal::Int(value),
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => Literal::BelowRange,
        // only digits are left, so anything else is too large
        Err(_) => Literal::AboveRange,
    };
    Marker::If(Guard { op, value })
}

#[cfg(test)]
mod ut {
    use super::*;

    fn guard(op: CmpOp, value: i64) -> Marker {
        Marker::If(Guard {
            op,
            value: Literal::Int(value),
        })
    }

    #[test]
    fn test_plain_line() {
        assert_eq!(Marker::None, Marker::detect_from(""));
        assert_eq!(Marker::None, Marker::detect_from("int main() {"));
        assert_eq!(Marker::None, Marker::detect_from("VERSION >= 3"));
    }

    #[test]
    fn test_all_operators() {
        assert_eq!(guard(CmpOp::Le, 3), Marker::detect_from("#if VERSION <= 3"));
        assert_eq!(guard(CmpOp::Ge, 3), Marker::detect_from("#if VERSION >= 3"));
        assert_eq!(guard(CmpOp::Lt, 3), Marker::detect_from("#if VERSION < 3"));
        assert_eq!(guard(CmpOp::Gt, 3), Marker::detect_from("#if VERSION > 3"));
        assert_eq!(guard(CmpOp::Eq, 3), Marker::detect_from("#if VERSION == 3"));
        assert_eq!(guard(CmpOp::Eq, 3), Marker::detect_from("#if VERSION = 3"));
    }

    #[test]
    fn test_no_spaces() {
        assert_eq!(guard(CmpOp::Ge, 5), Marker::detect_from("#if VERSION>=5"));
        assert_eq!(guard(CmpOp::Eq, 4), Marker::detect_from("#if VERSION==4"));
        assert_eq!(guard(CmpOp::Lt, 0), Marker::detect_from("#ifVERSION<0"));
    }

    #[test]
    fn test_prefix_and_trailing_content() {
        assert_eq!(
            guard(CmpOp::Gt, 10),
            Marker::detect_from("  // #if VERSION > 10 (solution)\n")
        );
        assert_eq!(
            guard(CmpOp::Le, 2),
            Marker::detect_from("# #if VERSION <= 2abc")
        );
    }

    #[test]
    fn test_later_occurrence() {
        assert_eq!(
            guard(CmpOp::Ge, 1),
            Marker::detect_from("#if DEBUG /* #if VERSION >= 1 */")
        );
    }

    #[test]
    fn test_negative_literal() {
        assert_eq!(guard(CmpOp::Gt, -1), Marker::detect_from("#if VERSION > -1"));
    }

    #[test]
    fn test_not_a_guard() {
        assert_eq!(Marker::None, Marker::detect_from("#if DEBUG"));
        assert_eq!(Marker::None, Marker::detect_from("#ifdef VERSION"));
        assert_eq!(Marker::None, Marker::detect_from("#if VERSION != 3"));
        assert_eq!(Marker::None, Marker::detect_from("#if VERSION >= x"));
        assert_eq!(Marker::None, Marker::detect_from("#if VERSION >="));
        assert_eq!(Marker::None, Marker::detect_from("#if VERSION >= -"));
        assert_eq!(Marker::None, Marker::detect_from("#if version >= 3"));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            Marker::If(Guard {
                op: CmpOp::Lt,
                value: Literal::AboveRange
            }),
            Marker::detect_from("#if VERSION < 99999999999999999999")
        );
        assert_eq!(
            Marker::If(Guard {
                op: CmpOp::Ge,
                value: Literal::BelowRange
            }),
            Marker::detect_from("#if VERSION >= -99999999999999999999")
        );
        assert_eq!(
            guard(CmpOp::Eq, 5),
            Marker::detect_from("#if VERSION == 000000000000000000000005")
        );
    }

    #[test]
    fn test_eval_out_of_range() {
        let above = |op| Guard {
            op,
            value: Literal::AboveRange,
        };
        let below = |op| Guard {
            op,
            value: Literal::BelowRange,
        };
        for version in [i64::MIN, -1, 0, 3, i64::MAX] {
            assert!(above(CmpOp::Lt).eval(version));
            assert!(above(CmpOp::Le).eval(version));
            assert!(!above(CmpOp::Gt).eval(version));
            assert!(!above(CmpOp::Ge).eval(version));
            assert!(!above(CmpOp::Eq).eval(version));
            assert!(below(CmpOp::Gt).eval(version));
            assert!(below(CmpOp::Ge).eval(version));
            assert!(!below(CmpOp::Lt).eval(version));
            assert!(!below(CmpOp::Le).eval(version));
            assert!(!below(CmpOp::Eq).eval(version));
        }
    }

    #[test]
    fn test_endif() {
        assert_eq!(Marker::Endif, Marker::detect_from("#endif VERSION"));
        assert_eq!(Marker::Endif, Marker::detect_from("#endif //VERSION"));
        assert_eq!(
            Marker::Endif,
            Marker::detect_from("    // #endif // VERSION <= 3\r\n")
        );
    }

    #[test]
    fn test_endif_without_version() {
        assert_eq!(Marker::None, Marker::detect_from("#endif"));
        assert_eq!(Marker::None, Marker::detect_from("#endif // DEBUG"));
        assert_eq!(Marker::None, Marker::detect_from("VERSION #endif"));
    }

    #[test]
    fn test_if_takes_precedence() {
        assert_eq!(
            guard(CmpOp::Lt, 2),
            Marker::detect_from("#if VERSION < 2 #endif VERSION")
        );
    }

    #[test]
    fn test_eval() {
        let g = Guard {
            op: CmpOp::Le,
            value: Literal::Int(3),
        };
        assert!(g.eval(2));
        assert!(g.eval(3));
        assert!(!g.eval(4));
        let g = Guard {
            op: CmpOp::Eq,
            value: Literal::Int(4),
        };
        assert!(g.eval(4));
        assert!(!g.eval(5));
        let g = Guard {
            op: CmpOp::Gt,
            value: Literal::Int(4),
        };
        assert!(!g.eval(4));
        assert!(g.eval(5));
    }
}
