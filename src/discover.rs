use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::data::loader::SourceFormat;

// ---------------------------------------------------------------------------
// Source file discovery
// ---------------------------------------------------------------------------

/// Collect the source files of one format in `data_dir`, lexicographically
/// sorted so ingestion order (and therefore output order) is reproducible.
pub fn source_files(data_dir: &Path, format: SourceFormat) -> Result<Vec<PathBuf>> {
    let pattern = data_dir.join(format!("*.{}", format.extension()));
    let pattern = pattern
        .to_str()
        .with_context(|| format!("non-UTF-8 data directory {}", data_dir.display()))?;

    let mut files = Vec::new();
    for entry in glob::glob(pattern).context("invalid glob pattern")? {
        files.push(entry.context("listing data directory")?);
    }
    files.sort();
    Ok(files)
}

/// All source files in `data_dir`, grouped csv → json → xml, each group
/// sorted. Group order carries no meaning beyond determinism.
pub fn discover(data_dir: &Path) -> Result<Vec<(SourceFormat, PathBuf)>> {
    let mut found = Vec::new();
    for format in SourceFormat::ALL {
        for path in source_files(data_dir, format)? {
            found.push((format, path));
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn groups_by_format_and_sorts_within_groups() -> Result<()> {
        let dir = tempdir()?;
        for name in ["b.csv", "a.csv", "z.json", "a.xml", "notes.txt"] {
            fs::write(dir.path().join(name), "")?;
        }

        let found = discover(dir.path())?;
        let names: Vec<(SourceFormat, String)> = found
            .iter()
            .map(|(f, p)| (*f, p.file_name().unwrap().to_str().unwrap().to_string()))
            .collect();
        assert_eq!(
            names,
            vec![
                (SourceFormat::Delimited, "a.csv".to_string()),
                (SourceFormat::Delimited, "b.csv".to_string()),
                (SourceFormat::JsonLines, "z.json".to_string()),
                (SourceFormat::Markup, "a.xml".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn empty_directory_yields_no_sources() -> Result<()> {
        let dir = tempdir()?;
        assert!(discover(dir.path())?.is_empty());
        Ok(())
    }
}
