//! Enumerate the files of the build output tree.

use std::path::PathBuf;

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::asset_paths::{FileClass, classify};
use crate::project::OutputLayout;

/// A file discovered in the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFile {
    /// Path on disk.
    pub path: PathBuf,
    /// Location relative to the output root, forward-slash separated.
    pub relative: String,
    /// Pass that owns the file.
    pub class: FileClass,
}

/// Walk the output tree returning every regular file, sorted by path.
///
/// Symlinks are not followed. Any walk error aborts the scan.
pub fn collect_tree_files(layout: &OutputLayout) -> Result<Vec<TreeFile>> {
    let root = &layout.output_dir;
    let mut files = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to scan {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        let relative = layout.relative_path(&path);
        let class = classify(&relative, &layout.page_data_dir);
        files.push(TreeFile {
            path,
            relative,
            class,
        });
    }

    Ok(files)
}

/// Files of the tree belonging to any of `classes`.
pub fn collect_files_of(layout: &OutputLayout, classes: &[FileClass]) -> Result<Vec<TreeFile>> {
    Ok(collect_tree_files(layout)?
        .into_iter()
        .filter(|file| classes.contains(&file.class))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn collects_and_classifies_nested_files() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("public");
        fs::create_dir_all(root.join("blog/post")).unwrap();
        fs::create_dir_all(root.join("page-data/blog")).unwrap();
        fs::write(root.join("index.html"), "<html></html>").unwrap();
        fs::write(root.join("blog/post/index.html"), "<html></html>").unwrap();
        fs::write(root.join("app.js"), "").unwrap();
        fs::write(root.join("page-data/blog/page-data.json"), "{}").unwrap();
        fs::write(root.join("logo.png"), [0u8, 1]).unwrap();

        let layout = OutputLayout::new(&root);
        let files = collect_tree_files(&layout).unwrap();
        let relatives: Vec<(&str, FileClass)> = files
            .iter()
            .map(|file| (file.relative.as_str(), file.class))
            .collect();

        assert_eq!(relatives, vec![
            ("app.js", FileClass::Script),
            ("blog/post/index.html", FileClass::Markup),
            ("index.html", FileClass::Markup),
            ("logo.png", FileClass::Binary),
            ("page-data/blog/page-data.json", FileClass::PageData),
        ]);
        assert!(files.iter().all(|file| file.path.starts_with(&root)));
    }

    #[test]
    fn filters_by_class() {
        let dir = tempdir().unwrap();
        let root = dir.path().to_path_buf();
        fs::write(root.join("a.html"), "").unwrap();
        fs::write(root.join("b.css"), "").unwrap();

        let layout = OutputLayout::new(&root);
        let files = collect_files_of(&layout, &[FileClass::Text]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative, "b.css");
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_followed() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let root = dir.path().join("public");
        let outside = dir.path().join("outside");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&outside).unwrap();
        fs::write(root.join("index.html"), "").unwrap();
        fs::write(outside.join("secret.css"), "").unwrap();
        symlink(outside.join("secret.css"), root.join("linked.css")).unwrap();
        symlink(&outside, root.join("linked-dir")).unwrap();

        let layout = OutputLayout::new(&root);
        let files = collect_tree_files(&layout).unwrap();
        let relatives: Vec<&str> = files.iter().map(|file| file.relative.as_str()).collect();
        assert_eq!(relatives, vec!["index.html"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let layout = OutputLayout::new(dir.path().join("absent"));
        assert!(collect_tree_files(&layout).is_err());
    }
}
