/// Parser for the pipe-delimited body file format.
///
/// One record per line with exactly eleven `|`-separated columns:
///
/// ```text
/// md5|path|inode|mode|uid|gid|size|atime|mtime|ctime|crtime
/// 0|/etc/passwd|1234-128-1|r/rrw-r--r--|0|0|2048|...|...|...|...
/// ```
///
/// The inode column may carry `-<type>-<id>` suffixes; only the leading
/// number is the metadata address. This format has no deleted flag, so
/// every well-formed row is a candidate record.
use super::{LineOutcome, MalformedLine};
use crate::model::MetadataRecord;

/// Number of columns in a body file row.
pub const BODY_FIELD_COUNT: usize = 11;

const PATH_FIELD: usize = 1;
const INODE_FIELD: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct PipeParser;

impl PipeParser {
    pub fn parse(&self, line: &str) -> LineOutcome {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return LineOutcome::Unmatched;
        }

        let fields: Vec<&str> = line.split('|').collect();
        if fields.len() != BODY_FIELD_COUNT {
            return LineOutcome::Malformed(MalformedLine::FieldCount(fields.len()));
        }

        let inode = fields[INODE_FIELD];
        let raw_addr = inode.split('-').next().unwrap_or(inode).trim();
        let address = match raw_addr.parse::<u64>() {
            Ok(a) => a,
            Err(_) => return LineOutcome::malformed_address(inode),
        };

        LineOutcome::from_admission(MetadataRecord::admit(fields[PATH_FIELD], address))
    }
}
