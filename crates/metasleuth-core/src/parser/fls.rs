/// Parser for `fls -arp` listings (The Sleuth Kit).
///
/// A data line looks like
///
/// ```text
/// r/r 1234-128-1:	Windows/System32/cmd.exe
/// r/r * 5678-128-1:	Users/bob/deleted.tmp
/// d/d 64:	etc
/// ```
///
/// i.e. a `<type>/<type>` pair, whitespace, an optional run of `*`
/// (deleted / unallocated), the metadata address with optional
/// `-<3 digit type>` and `-<id>` suffixes, `:` plus one whitespace
/// character, then the full path. Anything else on the stream (headers,
/// blank lines, orphan banners) simply does not match and is skipped.
use super::LineOutcome;
use crate::model::{Exclusion, MetadataRecord};
use crate::Result;
use regex::Regex;

// ASCII classes only: `\d` and `\s` are Unicode-aware in `regex`.
const FLS_LINE_PATTERN: &str = concat!(
    r"./.[[:space:]]",
    r"(?P<deleted>\**)[[:space:]]*",
    r"(?P<meta_addr>[0-9]+)",
    r"(?:-(?P<meta_type>[0-9]{3}))?",
    r"(?:-(?P<meta_id>[0-9]+))?",
    r":[[:space:]](?P<path>.*)$",
);

#[derive(Debug, Clone)]
pub struct FlsParser {
    pattern: Regex,
}

impl FlsParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(FLS_LINE_PATTERN)?,
        })
    }

    /// Parse one line. The deleted marker is the `*` run only: a non-empty
    /// run means deleted, regardless of the whitespace around it.
    pub fn parse(&self, line: &str) -> LineOutcome {
        let Some(caps) = self.pattern.captures(line) else {
            return LineOutcome::Unmatched;
        };

        if !caps["deleted"].is_empty() {
            return LineOutcome::Excluded(Exclusion::Deleted);
        }

        let raw_addr = &caps["meta_addr"];
        let address = match raw_addr.parse::<u64>() {
            Ok(a) => a,
            Err(_) => return LineOutcome::malformed_address(raw_addr),
        };

        LineOutcome::from_admission(MetadataRecord::admit(&caps["path"], address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> FlsParser {
        FlsParser::new().expect("pattern compiles")
    }

    fn record(outcome: LineOutcome) -> MetadataRecord {
        match outcome {
            LineOutcome::Record(r) => r,
            other => panic!("expected a record, got {other:?}"),
        }
    }

    #[test]
    fn parses_ntfs_line_with_type_and_id() {
        let rec = record(parser().parse("r/r 1234-128-1:\tWindows/System32/cmd.exe"));
        assert_eq!(rec.parent, "Windows/System32");
        assert_eq!(rec.name, "cmd.exe");
        assert_eq!(rec.address, 1234);
    }

    #[test]
    fn parses_plain_inode_line() {
        let rec = record(parser().parse("r/r 5021:\thome/user/notes.txt"));
        assert_eq!(rec.parent, "home/user");
        assert_eq!(rec.address, 5021);
    }

    /// fls prints root-level entries without a leading directory.
    #[test]
    fn root_level_entry_gets_slash_parent() {
        let rec = record(parser().parse("d/d 11:\tlost+found"));
        assert_eq!(rec.parent, "/");
        assert_eq!(rec.name, "lost+found");
    }

    #[test]
    fn deleted_marker_is_excluded() {
        assert_eq!(
            parser().parse("r/r * 5678-128-1:\tUsers/bob/deleted.tmp"),
            LineOutcome::Excluded(Exclusion::Deleted)
        );
        assert_eq!(
            parser().parse("-/r * 0:\tUsers/bob/gone"),
            LineOutcome::Excluded(Exclusion::Deleted)
        );
    }

    #[test]
    fn zero_address_is_excluded() {
        assert_eq!(
            parser().parse("r/r 0:\tetc/bogus"),
            LineOutcome::Excluded(Exclusion::ZeroAddress)
        );
    }

    #[test]
    fn dot_entries_are_excluded() {
        assert_eq!(
            parser().parse("d/d 2:\tetc/."),
            LineOutcome::Excluded(Exclusion::SelfOrParent)
        );
        assert_eq!(
            parser().parse("d/d 2:\tetc/.."),
            LineOutcome::Excluded(Exclusion::SelfOrParent)
        );
    }

    #[test]
    fn non_record_text_is_unmatched() {
        let p = parser();
        assert_eq!(p.parse(""), LineOutcome::Unmatched);
        assert_eq!(p.parse("Orphan files listing follows"), LineOutcome::Unmatched);
        assert_eq!(p.parse("r/r abc:\tnot/a/number"), LineOutcome::Unmatched);
    }

    /// Non-ASCII digits and spaces are not fls syntax.
    #[test]
    fn unicode_digits_and_spaces_are_unmatched() {
        let p = parser();
        assert_eq!(p.parse("r/r \u{0661}\u{0662}\u{0663}:\tetc/x"), LineOutcome::Unmatched);
        assert_eq!(p.parse("r/r \u{FF11}\u{FF12}:\tetc/x"), LineOutcome::Unmatched);
        assert_eq!(p.parse("r/r\u{00A0}12:\tetc/x"), LineOutcome::Unmatched);
    }

    #[test]
    fn address_overflow_is_malformed() {
        let outcome = parser().parse("r/r 99999999999999999999999:\tetc/huge");
        assert!(matches!(outcome, LineOutcome::Malformed(_)));
    }

    #[test]
    fn trailing_carriage_return_is_trimmed() {
        let rec = record(parser().parse("r/r 77-128-3:\tDocs/report.doc\r"));
        assert_eq!(rec.name, "report.doc");
    }
}
