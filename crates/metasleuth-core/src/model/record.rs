/// A single file observation, normalised from either input format.
///
/// Records are only ever constructed through [`MetadataRecord::admit`],
/// which applies the admission rules shared by both parsers: a zero
/// metadata address means "no valid metadata entry", and `.` / `..`
/// are directory self/parent references that would skew the baseline
/// of the directory they appear in.
use compact_str::CompactString;

/// One admitted `(parent, name, address)` observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    /// Directory component of the full path. Never empty; root-level
    /// entries are normalised to `"/"`.
    pub parent: String,
    /// Base-name component. Never `"."` or `".."`.
    pub name: CompactString,
    /// Inode / MFT entry number. Never zero.
    pub address: u64,
}

/// Why a well-formed line did not produce a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// The entry is flagged deleted / unallocated (fls `*` marker).
    Deleted,
    /// Metadata address is zero.
    ZeroAddress,
    /// Base name is `.` or `..`.
    SelfOrParent,
}

impl MetadataRecord {
    /// Build a record from a full path and a metadata address, or explain
    /// why the observation is excluded from the model.
    pub fn admit(full_path: &str, address: u64) -> Result<Self, Exclusion> {
        if address == 0 {
            return Err(Exclusion::ZeroAddress);
        }

        let (parent, name) = split_path(full_path);
        let name = name.trim_end();
        if name == "." || name == ".." {
            return Err(Exclusion::SelfOrParent);
        }

        let parent = parent.trim_end();
        let parent = if parent.is_empty() { "/" } else { parent };

        Ok(Self {
            parent: parent.to_owned(),
            name: CompactString::new(name),
            address,
        })
    }
}

/// Split a `/`-separated path into `(directory, base name)`.
///
/// The base name is everything after the last `/`. Trailing slashes are
/// stripped from the directory part unless it consists only of slashes,
/// so `"/etc/passwd"` → `("/etc", "passwd")`, `"/boot"` → `("/", "boot")`
/// and `"boot"` → `("", "boot")`.
pub fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(i) => {
            let head = &path[..=i];
            let tail = &path[i + 1..];
            let trimmed = head.trim_end_matches('/');
            if trimmed.is_empty() {
                (head, tail)
            } else {
                (trimmed, tail)
            }
        }
        None => ("", path),
    }
}
