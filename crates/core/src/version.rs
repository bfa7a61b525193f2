//! Project version stamping.
//!
//! Every platform embeds the same version label, so stamping happens once,
//! before any platform compiles, and a file that cannot be updated fails
//! the run fast.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

const VERSION_OPEN: &str = "<Version>";
const VERSION_CLOSE: &str = "</Version>";
const GROUP_OPEN: &str = "<PropertyGroup>";

/// Stamp `version` into the project file's `<Version>` element.
///
/// Replaces the existing element, or inserts one under the first property
/// group when the project never declared a version. A file with neither is
/// [`Error::VersionFileMalformed`].
pub fn stamp_version_file(path: &Path, version: &str) -> Result<()> {
    let text = fs::read_to_string(path)?;

    let stamped = match (text.find(VERSION_OPEN), text.find(VERSION_CLOSE)) {
        (Some(open), Some(close)) if open < close => {
            let mut out = String::with_capacity(text.len() + version.len());
            out.push_str(&text[..open + VERSION_OPEN.len()]);
            out.push_str(version);
            out.push_str(&text[close..]);
            out
        }
        _ => match text.find(GROUP_OPEN) {
            Some(group) => {
                let insert_at = group + GROUP_OPEN.len();
                let mut out = String::with_capacity(text.len() + version.len() + 32);
                out.push_str(&text[..insert_at]);
                out.push_str("\n    ");
                out.push_str(VERSION_OPEN);
                out.push_str(version);
                out.push_str(VERSION_CLOSE);
                out.push_str(&text[insert_at..]);
                out
            }
            None => {
                return Err(Error::VersionFileMalformed {
                    path: path.to_path_buf(),
                });
            }
        },
    };

    fs::write(path, stamped)?;
    info!(version = %version, file = %path.display(), "version stamped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn replaces_existing_version_element() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("Client.csproj");
        fs::write(
            &path,
            "<Project>\n  <PropertyGroup>\n    <Version>0.0.0</Version>\n  </PropertyGroup>\n</Project>\n",
        )
        .unwrap();

        stamp_version_file(&path, "1.2.3").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("<Version>1.2.3</Version>"));
        assert!(!text.contains("0.0.0"));
    }

    #[test]
    fn inserts_version_under_property_group() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("Client.csproj");
        fs::write(&path, "<Project>\n  <PropertyGroup>\n  </PropertyGroup>\n</Project>\n").unwrap();

        stamp_version_file(&path, "2.0.0").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("<Version>2.0.0</Version>"));
    }

    #[test]
    fn restamping_overwrites_prior_version() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("Client.csproj");
        fs::write(
            &path,
            "<Project>\n  <PropertyGroup>\n    <Version>0.0.0</Version>\n  </PropertyGroup>\n</Project>\n",
        )
        .unwrap();

        stamp_version_file(&path, "1.0.0").unwrap();
        stamp_version_file(&path, "1.0.1").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("<Version>1.0.1</Version>"));
        assert!(!text.contains("1.0.0"));
    }

    #[test]
    fn file_without_property_group_is_malformed() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("Client.csproj");
        fs::write(&path, "not a project file").unwrap();

        let result = stamp_version_file(&path, "1.2.3");
        assert!(matches!(result, Err(Error::VersionFileMalformed { .. })));
    }
}
