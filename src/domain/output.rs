//! Output target classification
//!
//! A backup writes either one `.jsonl` file per collection into a directory,
//! or every collection into a single merged file.

use std::path::{is_separator, Path, PathBuf};

/// Where backup output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// One `<db>.<collection>.jsonl` file per collection
    Directory(PathBuf),
    /// All collections in one file, records tagged with provenance
    MergedFile(PathBuf),
}

impl OutputTarget {
    /// Decide whether `path` is meant as a directory or a merged file.
    ///
    /// `existing_is_dir` is `Some(is_dir)` when the path already exists.
    /// Rules, first match wins:
    /// 1. existing path: directory iff it is a directory
    /// 2. trailing path separator: directory
    /// 3. `.json` / `.jsonl` extension (any case): file
    /// 4. anything else: directory
    pub fn classify(path: &Path, existing_is_dir: Option<bool>) -> Self {
        let is_dir = match existing_is_dir {
            Some(is_dir) => is_dir,
            None => {
                ends_with_separator(path)
                    || !path
                        .extension()
                        .map(|ext| {
                            let ext = ext.to_string_lossy().to_lowercase();
                            ext == "json" || ext == "jsonl"
                        })
                        .unwrap_or(false)
            }
        };

        if is_dir {
            Self::Directory(path.to_path_buf())
        } else {
            Self::MergedFile(path.to_path_buf())
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(p) | Self::MergedFile(p) => p,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }
}

fn ends_with_separator(path: &Path) -> bool {
    path.as_os_str()
        .to_string_lossy()
        .chars()
        .last()
        .map(is_separator)
        .unwrap_or(false)
}

/// File name for a collection in directory mode.
pub fn collection_file_name(database: &str, collection: &str) -> String {
    format!("{database}.{collection}.jsonl")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("backups", true)]
    #[case("backups/", true)]
    #[case("out/mydb.jsonl", false)]
    #[case("out/mydb.json", false)]
    #[case("out/MyDb.JSONL", false)]
    #[case("out/mydb.txt", true)]
    #[case("mydb.jsonl/", true)]
    fn given_missing_path_when_classifying_then_uses_name_rules(
        #[case] input: &str,
        #[case] is_dir: bool,
    ) {
        let target = OutputTarget::classify(Path::new(input), None);
        assert_eq!(target.is_directory(), is_dir, "path: {input}");
    }

    #[test]
    fn given_existing_directory_with_jsonl_name_when_classifying_then_directory() {
        let target = OutputTarget::classify(Path::new("dump.jsonl"), Some(true));
        assert_eq!(target, OutputTarget::Directory(PathBuf::from("dump.jsonl")));
    }

    #[test]
    fn given_existing_file_without_extension_when_classifying_then_merged_file() {
        let target = OutputTarget::classify(Path::new("dump"), Some(false));
        assert_eq!(target, OutputTarget::MergedFile(PathBuf::from("dump")));
    }

    #[test]
    fn given_db_and_collection_when_naming_file_then_joins_with_dots() {
        assert_eq!(collection_file_name("shop", "orders"), "shop.orders.jsonl");
    }
}
