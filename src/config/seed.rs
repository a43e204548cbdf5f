use std::{path::Path, sync::Arc};

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::filesystem::{Children, Node, VirtualFileSystem, VirtualPath, is_valid_name};

const BUILTIN_SEED: &str = include_str!("../../assets/seed.yaml");
const ROOT_KEY: &str = "root";

/// The hierarchy a fresh filesystem starts from.
///
/// Read from a YAML document whose `root` mapping describes the root
/// directory: nested mappings are directories and strings are files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedHierarchy {
    root: Children,
}

impl SeedHierarchy {
    /// The hierarchy shipped with the binary.
    pub fn builtin() -> Result<Self, SeedError> {
        BUILTIN_SEED.try_into()
    }

    pub async fn from_path(path: &Path) -> Result<Self, SeedError> {
        debug!("Reading seed file: {}", path.display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.display().to_string(),
        })?;
        debug!("Successfully read seed file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.display().to_string(),
        })?;
        contents.as_str().try_into()
    }

    pub fn into_filesystem(self) -> VirtualFileSystem {
        VirtualFileSystem::from(self.root)
    }

    fn parse_directory(
        mapping: &LinkedHashMap<Yaml, Yaml>,
        path: &VirtualPath,
    ) -> Result<Children, SeedError> {
        mapping
            .iter()
            .try_fold(Children::new(), |mut children, (key, value)| {
                let name = key.as_str().context(InvalidNameSnafu {
                    path: path.to_string(),
                })?;
                let child_path = path.join(name);
                ensure!(
                    is_valid_name(name),
                    InvalidNameSnafu {
                        path: child_path.to_string(),
                    }
                );

                let node = match value {
                    Yaml::Mapping(entries) => Node::Directory {
                        children: Self::parse_directory(entries, &child_path)?,
                    },
                    other => Node::file(other.as_str().context(InvalidEntrySnafu {
                        path: child_path.to_string(),
                    })?),
                };
                children.insert(name.to_string(), Arc::new(node));
                Ok(children)
            })
    }
}

impl TryFrom<&str> for SeedHierarchy {
    type Error = SeedError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedSeedSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        let root = match top_level
            .iter()
            .find(|(key, _)| key.as_str() == Some(ROOT_KEY))
        {
            Some((_, value)) => {
                let mapping = value.as_mapping().context(RootNotMapSnafu)?;
                Self::parse_directory(mapping, &VirtualPath::root())?
            }
            None => {
                debug!("Seed has no '{}' section, starting from an empty root", ROOT_KEY);
                Children::new()
            }
        };

        Ok(SeedHierarchy { root })
    }
}

#[derive(Debug, Snafu)]
pub enum SeedError {
    #[snafu(display("Failed to read the seed file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Seed file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the seed file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted seed file"))]
    MalformedSeed,
    #[snafu(display("Top level of the seed should be a map"))]
    TopLevelNotMap,
    #[snafu(display("The '{}' section should be a map", ROOT_KEY))]
    RootNotMap,
    #[snafu(display("Entry {} must be a directory map or a file string", path))]
    InvalidEntry { path: String },
    #[snafu(display("Entry under {} has an invalid name", path))]
    InvalidName { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::NodeKind;
    use rstest::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn names(fs: &VirtualFileSystem, path: &str) -> Vec<String> {
        fs.list_directory(path)
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect()
    }

    #[test]
    fn builtin_seed_has_the_home_layout() {
        let fs = SeedHierarchy::builtin().unwrap().into_filesystem();
        assert_eq!(
            names(&fs, "/home/user"),
            vec![
                "Documents",
                "Desktop",
                "Pictures",
                "Music",
                "Games",
                "Programs",
                "CONFIG.SYS",
                "AUTOEXEC.BAT",
            ]
        );
        assert!(fs.directory_exists("/system/DRIVERS"));
        assert!(fs.list_directory("/home/user/Desktop").unwrap().is_empty());
        assert_eq!(
            fs.get_file_content("/home/user/Programs/BASIC", "hello_world.bas"),
            Ok("10 PRINT \"Hello, World!\"\n20 END\n")
        );
    }

    #[test]
    fn builtin_seed_ships_the_game_files() {
        let fs = SeedHierarchy::builtin().unwrap().into_filesystem();
        let kinds: Vec<_> = fs
            .list_directory("/home/user/Games")
            .unwrap()
            .into_iter()
            .map(|entry| (entry.name, entry.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("guess_number.bas".to_string(), NodeKind::File),
                ("rock_paper_scissors.bas".to_string(), NodeKind::File),
            ]
        );
    }

    #[test]
    fn keeps_the_order_of_the_document() {
        let seed: SeedHierarchy = "root:\n  zeta: {}\n  alpha: 'a'\n  mid: {}\n"
            .try_into()
            .unwrap();
        let fs = seed.into_filesystem();
        assert_eq!(names(&fs, "/"), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn missing_root_section_gives_an_empty_tree() {
        let seed: SeedHierarchy = "other: value".try_into().unwrap();
        let fs = seed.into_filesystem();
        assert!(fs.list_directory("/").unwrap().is_empty());
    }

    #[rstest]
    #[case("", "MalformedSeed")]
    #[case("invalid: yaml: content: [unclosed", "ParseError")]
    #[case("- item1\n- item2", "TopLevelNotMap")]
    #[case("just a string", "TopLevelNotMap")]
    #[case("root:\n  - a\n  - b", "RootNotMap")]
    #[case("root: plain", "RootNotMap")]
    #[case("root:\n  count: 42", "InvalidEntry")]
    #[case("root:\n  nothing:", "InvalidEntry")]
    #[case("root:\n  list:\n    - a", "InvalidEntry")]
    #[case("root:\n  123: 'numeric key'", "InvalidName")]
    #[case("root:\n  'a/b': 'slash'", "InvalidName")]
    #[case("root:\n  '': 'empty'", "InvalidName")]
    fn rejects_malformed_seeds(#[case] contents: &str, #[case] expected: &str) {
        let error = SeedHierarchy::try_from(contents).unwrap_err();
        let matched = match error {
            SeedError::MalformedSeed => "MalformedSeed",
            SeedError::ParseError { .. } => "ParseError",
            SeedError::TopLevelNotMap => "TopLevelNotMap",
            SeedError::RootNotMap => "RootNotMap",
            SeedError::InvalidEntry { .. } => "InvalidEntry",
            SeedError::InvalidName { .. } => "InvalidName",
            SeedError::ReadError { .. } | SeedError::EncodingError { .. } => "Io",
        };
        assert_eq!(matched, expected);
    }

    #[test]
    fn invalid_entry_names_the_offending_path() {
        let error = SeedHierarchy::try_from("root:\n  home:\n    user:\n      n: 7").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Entry /home/user/n must be a directory map or a file string"
        );
    }

    #[compio::test]
    async fn reads_a_seed_from_disk() {
        let mut seed_file = NamedTempFile::new().expect("Failed to create temp file");
        write!(
            seed_file,
            "root:\n  home:\n    guest:\n      notes.txt: \"remember the milk\"\n"
        )
        .expect("Failed to write to temp file");

        let seed = SeedHierarchy::from_path(seed_file.path())
            .await
            .expect("Failed to read seed");
        let fs = seed.into_filesystem();
        assert_eq!(
            fs.get_file_content("/home/guest", "notes.txt"),
            Ok("remember the milk")
        );
    }

    #[compio::test]
    async fn missing_seed_file_is_a_read_error() {
        let result = SeedHierarchy::from_path(Path::new("nonexistent-seed.yaml")).await;
        assert!(matches!(result, Err(SeedError::ReadError { .. })));
    }

    #[compio::test]
    async fn non_utf8_seed_file_is_an_encoding_error() {
        let mut seed_file = NamedTempFile::new().expect("Failed to create temp file");
        seed_file
            .write_all(&[0xff, 0xfe, 0x00])
            .expect("Failed to write to temp file");

        let result = SeedHierarchy::from_path(seed_file.path()).await;
        assert!(matches!(result, Err(SeedError::EncodingError { .. })));
    }
}
