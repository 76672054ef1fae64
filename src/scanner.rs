use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A flattened catalog file discovered in the corpus.
#[derive(Debug)]
pub struct CatalogFile {
    pub path: PathBuf,
}

/// Scan the corpus root for flattened catalog files.
///
/// Any `*.json` file below the root counts, except files under the
/// `output/` and `tables/` directories — those are this tool's own
/// exports and configuration, not source catalogs.
pub fn scan_corpus(root: &Path) -> Vec<CatalogFile> {
    let skip_dirs: &[&str] = &["output", "tables"];

    let mut results = Vec::new();
    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            !(e.file_type().is_dir() && skip_dirs.contains(&name))
        })
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        results.push(CatalogFile {
            path: path.to_path_buf(),
        });
    }

    // Stable processing order regardless of filesystem iteration
    results.sort_by(|a, b| a.path.cmp(&b.path));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_json_files_and_skips_output() {
        let dir = std::env::temp_dir().join(format!("catalog_scan_{}", std::process::id()));
        std::fs::create_dir_all(dir.join("sub")).unwrap();
        std::fs::create_dir_all(dir.join("output")).unwrap();
        std::fs::write(dir.join("a.json"), "{}").unwrap();
        std::fs::write(dir.join("sub/b.json"), "{}").unwrap();
        std::fs::write(dir.join("notes.txt"), "").unwrap();
        std::fs::write(dir.join("output/export_items.json"), "{}").unwrap();

        let files = scan_corpus(&dir);
        let names: Vec<String> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.json".to_string(), "b.json".to_string()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
