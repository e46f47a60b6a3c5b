/// Per-directory index built by the aggregation pass.
///
/// Both levels are `BTreeMap`s so iteration is already in ascending
/// lexicographic order of directory path and then file name, which is
/// exactly the order the analyzer must report in. No separate sort pass
/// is needed and output is byte-identical across runs.
use super::record::MetadataRecord;
use compact_str::CompactString;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// The files observed directly under one parent directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryGroup {
    /// File name → metadata address. Later observations of a name
    /// overwrite earlier ones.
    pub files: BTreeMap<CompactString, u64>,
}

impl DirectoryGroup {
    /// Number of distinct file names in the directory.
    #[inline]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Mapping from parent path to its [`DirectoryGroup`].
///
/// Groups are created lazily on the first record for a parent path and
/// only grow while records are being inserted. The analyzer borrows the
/// finished index read-only.
#[derive(Debug, Clone, Default)]
pub struct DirectoryIndex {
    groups: BTreeMap<String, DirectoryGroup>,
}

impl DirectoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation. Last write wins for a repeated
    /// `(parent, name)` pair.
    pub fn insert(&mut self, record: MetadataRecord) {
        self.groups
            .entry(record.parent)
            .or_default()
            .files
            .insert(record.name, record.address);
    }

    /// Look up the group for a parent path.
    pub fn group(&self, parent: &str) -> Option<&DirectoryGroup> {
        self.groups.get(parent)
    }

    /// Iterate groups in ascending order of parent path.
    pub fn iter(&self) -> btree_map::Iter<'_, String, DirectoryGroup> {
        self.groups.iter()
    }

    /// Total distinct `(parent, name)` pairs held.
    pub fn file_count(&self) -> usize {
        self.groups.values().map(DirectoryGroup::file_count).sum()
    }

    /// Number of distinct parent directories.
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if no record has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Extend<MetadataRecord> for DirectoryIndex {
    fn extend<I: IntoIterator<Item = MetadataRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl FromIterator<MetadataRecord> for DirectoryIndex {
    fn from_iter<I: IntoIterator<Item = MetadataRecord>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl<'a> IntoIterator for &'a DirectoryIndex {
    type Item = (&'a String, &'a DirectoryGroup);
    type IntoIter = btree_map::Iter<'a, String, DirectoryGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
