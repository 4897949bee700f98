//! Character repetition.
//!
//! Given `R` and `S`, every character of `S` is repeated `R` times in place:
//! `3 ABC` becomes `AAABBBCCC`.

use crate::input::{self, InputError, InvalidInput, LineReader};
use regex::Regex;
use std::io::Write;
use std::num::IntErrorKind;
use std::ops::RangeInclusive;
use std::sync::OnceLock;
use tracing::debug;

/// The QR code "alphanumeric" characters, minus the space that separates `R` from `S`.
pub const QR_ALPHANUMERIC: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ$%*+-./:";

/// Allowed repeat factors in strict mode.
pub const REPEAT_FACTOR: RangeInclusive<usize> = 1..=8;

/// Longest `S` accepted in strict mode.
pub const MAX_TEXT_LEN: usize = 20;

/// Allowed number of specs in strict mode.
pub const SPEC_COUNT: RangeInclusive<usize> = 1..=1000;

/// Largest expansion, in bytes, that lenient mode will produce for one spec.
pub const MAX_EXPANDED_LEN: usize = 1 << 20;

fn spec_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\s(\S+)$").expect("valid regex"))
}

fn qr_text() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9A-Z$%*+\-./:]+$").expect("valid regex"))
}

/// One `R S` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatSpec {
    factor: usize,
    text: String,
}

impl RepeatSpec {
    /// Checked spec: `factor` in [`REPEAT_FACTOR`], `text` of 1 to
    /// [`MAX_TEXT_LEN`] characters from [`QR_ALPHANUMERIC`].
    pub fn new(factor: usize, text: &str) -> Result<Self, InvalidInput> {
        if !REPEAT_FACTOR.contains(&factor) {
            return Err(factor_out_of_range(&factor.to_string(), &REPEAT_FACTOR));
        }
        if !qr_text().is_match(text) {
            return Err(match text.chars().find(|c| !QR_ALPHANUMERIC.contains(*c)) {
                Some(ch) => InvalidInput::OutsideAlphabet { ch },
                None => InvalidInput::MalformedRepeatLine {
                    text: text.to_owned(),
                },
            });
        }
        let len = text.chars().count();
        if len > MAX_TEXT_LEN {
            return Err(InvalidInput::RepeatTextTooLong {
                len,
                max: MAX_TEXT_LEN,
            });
        }
        Ok(Self {
            factor,
            text: text.to_owned(),
        })
    }

    /// Parses `R S` separated by exactly one whitespace character.
    pub fn parse(line: &str) -> Result<Self, InvalidInput> {
        let malformed = || InvalidInput::MalformedRepeatLine {
            text: line.to_owned(),
        };
        let caps = spec_line().captures(line.trim()).ok_or_else(malformed)?;
        // the pattern only admits digits, so a parse failure is an overflow
        let factor: usize = caps[1]
            .parse()
            .map_err(|_| factor_out_of_range(&caps[1], &REPEAT_FACTOR))?;
        Self::new(factor, &caps[2])
    }

    /// Parses the first two whitespace-separated fields, ignoring the rest.
    ///
    /// Only requires a positive factor and a non-empty text whose expansion
    /// stays within [`MAX_EXPANDED_LEN`] bytes.
    pub fn parse_lenient(line: &str) -> Result<Self, InvalidInput> {
        let malformed = || InvalidInput::MalformedRepeatLine {
            text: line.to_owned(),
        };
        let mut fields = line.split_whitespace();
        let (Some(raw), Some(text)) = (fields.next(), fields.next()) else {
            return Err(malformed());
        };
        let allowed = 1..=MAX_EXPANDED_LEN / text.len();
        let factor: usize = match raw.parse() {
            Ok(factor) => factor,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                return Err(factor_out_of_range(raw, &allowed));
            }
            Err(_) => return Err(malformed()),
        };
        if !allowed.contains(&factor) {
            return Err(factor_out_of_range(raw, &allowed));
        }
        Ok(Self {
            factor,
            text: text.to_owned(),
        })
    }

    pub fn factor(&self) -> usize {
        self.factor
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn expand(&self) -> String {
        expand(self.factor, &self.text)
    }
}

fn factor_out_of_range(value: &str, allowed: &RangeInclusive<usize>) -> InvalidInput {
    InvalidInput::RepeatFactorOutOfRange {
        value: value.to_owned(),
        min: *allowed.start(),
        max: *allowed.end(),
    }
}

/// Repeats each character of `text` `factor` times, keeping the original order.
pub fn expand(factor: usize, text: &str) -> String {
    let mut out = String::with_capacity(text.len().saturating_mul(factor).min(MAX_EXPANDED_LEN));
    for ch in text.chars() {
        for _ in 0..factor {
            out.push(ch);
        }
    }
    out
}

/// Reads `T` and then `T` spec lines, writing one expanded line per spec.
///
/// Output is written as each line is processed, so lines before a rejected
/// spec have already been emitted. Returns the number of lines written.
pub fn expand_lines(
    reader: &mut LineReader<'_>,
    out: &mut dyn Write,
    lenient: bool,
) -> anyhow::Result<usize> {
    let bounds = (!lenient).then_some(SPEC_COUNT);
    let total = reader.read_count(bounds)?;
    for _ in 0..total {
        let line = reader.expect_line("a repeat spec")?;
        let spec = parse(&line, lenient).map_err(|e| reader.invalid(e))?;
        write_expanded(&spec, out)?;
    }
    Ok(total)
}

/// Expands `R S R S ...` given as separate arguments.
///
/// Strict mode applies [`SPEC_COUNT`] to the number of pairs.
pub fn expand_pairs(args: &[String], out: &mut dyn Write, lenient: bool) -> anyhow::Result<usize> {
    if args.len() % 2 != 0 {
        anyhow::bail!("expected R S pairs, got {} arguments", args.len());
    }
    input::check_argument_count(args.len() / 2, (!lenient).then_some(SPEC_COUNT))?;
    for (i, pair) in args.chunks(2).enumerate() {
        let line = format!("{} {}", pair[0], pair[1]);
        let spec = parse(&line, lenient).map_err(|source| InputError::Argument {
            index: 2 * i + 1,
            source,
        })?;
        write_expanded(&spec, out)?;
    }
    Ok(args.len() / 2)
}

fn parse(line: &str, lenient: bool) -> Result<RepeatSpec, InvalidInput> {
    if lenient {
        RepeatSpec::parse_lenient(line)
    } else {
        RepeatSpec::parse(line)
    }
}

fn write_expanded(spec: &RepeatSpec, out: &mut dyn Write) -> Result<(), InputError> {
    let expanded = spec.expand();
    debug!(factor = spec.factor, text = %spec.text, len = expanded.len(), "expanded");
    writeln!(out, "{}", expanded)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str, lenient: bool) -> anyhow::Result<String> {
        let mut stdin = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        expand_lines(&mut LineReader::new(&mut stdin), &mut out, lenient)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_expand_examples() {
        assert_eq!(expand(3, "ABC"), "AAABBBCCC");
        assert_eq!(expand(5, "/2:"), "/////2:2:2:2:2:");
    }

    #[test]
    fn test_expand_once_is_identity() {
        for s in ["A", "HTP", "0123456789", "$%*+-./:"] {
            assert_eq!(expand(1, s), s);
        }
    }

    #[test]
    fn test_expand_length_and_positions() {
        let text = "QR$CODE:9";
        for r in REPEAT_FACTOR {
            let out: Vec<char> = expand(r, text).chars().collect();
            assert_eq!(out.len(), r * text.len());
            for (i, ch) in text.chars().enumerate() {
                for k in 0..r {
                    assert_eq!(out[i * r + k], ch);
                }
            }
        }
    }

    #[test]
    fn test_expand_lines_example() {
        assert_eq!(
            run("2\n3 ABC\n5 /2:\n", false).unwrap(),
            "AAABBBCCC\n/////2:2:2:2:2:\n"
        );
    }

    #[test]
    fn test_parse_strict() {
        let spec = RepeatSpec::parse("8 Z\r").unwrap();
        assert_eq!((spec.factor(), spec.text()), (8, "Z"));

        assert_eq!(
            RepeatSpec::parse("9 A"),
            Err(InvalidInput::RepeatFactorOutOfRange {
                value: "9".to_string(),
                min: 1,
                max: 8
            })
        );
        assert_eq!(
            RepeatSpec::parse("99999999999999999999 A"),
            Err(InvalidInput::RepeatFactorOutOfRange {
                value: "99999999999999999999".to_string(),
                min: 1,
                max: 8
            })
        );
        assert_eq!(
            RepeatSpec::parse("2 abc"),
            Err(InvalidInput::OutsideAlphabet { ch: 'a' })
        );
        assert_eq!(
            RepeatSpec::parse(&format!("2 {}", "A".repeat(21))),
            Err(InvalidInput::RepeatTextTooLong { len: 21, max: 20 })
        );
        assert!(matches!(
            RepeatSpec::parse("2  AB"),
            Err(InvalidInput::MalformedRepeatLine { .. })
        ));
        assert!(matches!(
            RepeatSpec::parse("ABC"),
            Err(InvalidInput::MalformedRepeatLine { .. })
        ));
    }

    #[test]
    fn test_parse_lenient() {
        let spec = RepeatSpec::parse_lenient("12  hello extra").unwrap();
        assert_eq!((spec.factor(), spec.text()), (12, "hello"));
        assert!(RepeatSpec::parse_lenient("0 A").is_err());
        assert!(RepeatSpec::parse_lenient("3").is_err());
        assert!(RepeatSpec::parse_lenient("x A").is_err());
    }

    #[test]
    fn test_lenient_caps_expansion_size() {
        assert_eq!(
            RepeatSpec::parse_lenient("18446744073709551615 AB"),
            Err(InvalidInput::RepeatFactorOutOfRange {
                value: "18446744073709551615".to_string(),
                min: 1,
                max: MAX_EXPANDED_LEN / 2
            })
        );
        assert!(matches!(
            RepeatSpec::parse_lenient("99999999999999999999999 A"),
            Err(InvalidInput::RepeatFactorOutOfRange { .. })
        ));

        let limit = MAX_EXPANDED_LEN / 2;
        assert!(RepeatSpec::parse_lenient(&format!("{} AB", limit)).is_ok());
        assert!(RepeatSpec::parse_lenient(&format!("{} AB", limit + 1)).is_err());

        let mut out = Vec::new();
        let err = expand_lines(
            &mut LineReader::new(&mut Cursor::new(b"1\n18446744073709551615 AB\n".to_vec())),
            &mut out,
            true,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("line 2: repeat factor"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_rejected_spec_keeps_earlier_output() {
        let mut stdin = Cursor::new(b"2\n2 AB\n2 ab\n".to_vec());
        let mut out = Vec::new();
        let err = expand_lines(&mut LineReader::new(&mut stdin), &mut out, false).unwrap_err();
        assert_eq!(String::from_utf8(out).unwrap(), "AABB\n");
        assert_eq!(
            err.to_string(),
            "line 3: character 'a' is not QR alphanumeric"
        );
    }

    #[test]
    fn test_count_bounds() {
        assert!(run("0\n", false).is_err());
        assert_eq!(run("0\n", true).unwrap(), "");
        assert!(run("1001\n", false).is_err());
    }

    #[test]
    fn test_expand_pairs() {
        let args: Vec<String> = ["3", "ABC", "5", "/2:"].iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        assert_eq!(expand_pairs(&args, &mut out, false).unwrap(), 2);
        assert_eq!(String::from_utf8(out).unwrap(), "AAABBBCCC\n/////2:2:2:2:2:\n");

        let mut out = Vec::new();
        assert!(expand_pairs(&args[..3], &mut out, false).is_err());

        let mut out = Vec::new();
        let err = expand_pairs(&["3".to_string(), "abc".to_string()], &mut out, false).unwrap_err();
        assert_eq!(err.to_string(), "argument 1: character 'a' is not QR alphanumeric");
    }

    #[test]
    fn test_expand_pairs_applies_bounds_unless_lenient() {
        let args: Vec<String> = (0..1001).flat_map(|_| ["1".to_string(), "A".to_string()]).collect();

        let mut out = Vec::new();
        let err = expand_pairs(&args, &mut out, false).unwrap_err();
        assert_eq!(err.to_string(), "1001 items given, expected 1..=1000");
        assert!(out.is_empty());

        let mut out = Vec::new();
        assert_eq!(expand_pairs(&args, &mut out, true).unwrap(), 1001);
        assert_eq!(expand_pairs(&args[..2000], &mut Vec::new(), false).unwrap(), 1000);
    }
}
