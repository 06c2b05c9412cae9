//! Directory primitives used while relocating bundle data.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use same_file::is_same_file;

/// Recursively copy the contents of `src` into `dst`, creating `dst` and any
/// missing parents. Existing files in `dst` are overwritten.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
  if !src.is_dir() {
    bail!("cannot copy {}: not a directory", src.display());
  }
  ensure_disjoint(src, dst)?;
  copy_dir_contents(src, dst)
}

fn copy_dir_contents(src: &Path, dst: &Path) -> Result<()> {
  fs::create_dir_all(dst).with_context(|| format!("failed to create {}", dst.display()))?;

  let entries =
    fs::read_dir(src).with_context(|| format!("failed to read directory {}", src.display()))?;
  for entry in entries {
    let entry = entry.with_context(|| format!("failed to read directory {}", src.display()))?;
    let source = entry.path();
    let destination = dst.join(entry.file_name());
    let file_type = entry
      .file_type()
      .with_context(|| format!("failed to inspect {}", source.display()))?;

    if file_type.is_dir() {
      copy_dir_contents(&source, &destination)?;
    } else {
      fs::copy(&source, &destination).with_context(|| {
        format!(
          "failed to copy {} to {}",
          source.display(),
          destination.display()
        )
      })?;
    }
  }

  Ok(())
}

/// Move the directory at `src` to `dst`, creating missing parents of `dst`.
///
/// A plain rename is attempted first; when the filesystem refuses it (for
/// example across mount points) the tree is copied and the source removed, so
/// the source never survives a successful move.
pub fn move_dir(src: &Path, dst: &Path) -> Result<()> {
  if !src.is_dir() {
    bail!("cannot move {}: not a directory", src.display());
  }
  ensure_disjoint(src, dst)?;

  if let Some(parent) = dst.parent() {
    fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
  }

  if fs::rename(src, dst).is_ok() {
    return Ok(());
  }

  copy_dir_contents(src, dst)?;
  fs::remove_dir_all(src).with_context(|| {
    format!(
      "failed to remove {} after copying to {}",
      src.display(),
      dst.display()
    )
  })
}

/// Delete the directory tree at `path` when present.
///
/// Returns whether anything was deleted; an absent directory is not an error.
pub fn remove_dir_if_exists(path: &Path) -> Result<bool> {
  if !path.exists() {
    return Ok(false);
  }
  fs::remove_dir_all(path).with_context(|| format!("failed to delete {}", path.display()))?;
  Ok(true)
}

/// Delete the directory at `path` only when it contains no entries.
///
/// Returns whether the directory was deleted. Non-empty directories are left
/// untouched so content the user placed there survives.
pub fn remove_dir_if_empty(path: &Path) -> Result<bool> {
  if !path.is_dir() {
    return Ok(false);
  }
  let mut entries =
    fs::read_dir(path).with_context(|| format!("failed to read directory {}", path.display()))?;
  if entries.next().is_some() {
    return Ok(false);
  }
  fs::remove_dir(path).with_context(|| format!("failed to delete {}", path.display()))?;
  Ok(true)
}

/// Reject destinations that are the source itself or nested inside it, which
/// would make a recursive copy feed on its own output.
fn ensure_disjoint(src: &Path, dst: &Path) -> Result<()> {
  for ancestor in dst.ancestors() {
    if !ancestor.exists() {
      continue;
    }
    if is_same_file(src, ancestor)? {
      bail!(
        "destination {} overlaps source {}",
        dst.display(),
        src.display()
      );
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;
  use tempfile::tempdir;

  fn populate(root: &Path) -> PathBuf {
    let src = root.join("source");
    fs::create_dir_all(src.join("nested")).unwrap();
    fs::write(src.join("a.bundle"), b"bundle-a").unwrap();
    fs::write(src.join("nested/catalog.json"), b"{}").unwrap();
    src
  }

  #[test]
  fn copy_preserves_nested_structure() {
    let temp = tempdir().unwrap();
    let src = populate(temp.path());
    let dst = temp.path().join("copy");

    copy_dir_recursive(&src, &dst).unwrap();

    assert_eq!(fs::read(dst.join("a.bundle")).unwrap(), b"bundle-a");
    assert_eq!(fs::read(dst.join("nested/catalog.json")).unwrap(), b"{}");
    assert!(src.exists());
  }

  #[test]
  fn copy_overwrites_existing_files() {
    let temp = tempdir().unwrap();
    let src = populate(temp.path());
    let dst = temp.path().join("copy");
    fs::create_dir_all(&dst).unwrap();
    fs::write(dst.join("a.bundle"), b"stale").unwrap();

    copy_dir_recursive(&src, &dst).unwrap();

    assert_eq!(fs::read(dst.join("a.bundle")).unwrap(), b"bundle-a");
  }

  #[test]
  fn move_clears_the_source() {
    let temp = tempdir().unwrap();
    let src = populate(temp.path());
    let dst = temp.path().join("staging/bundles");

    move_dir(&src, &dst).unwrap();

    assert!(!src.exists());
    assert_eq!(fs::read(dst.join("nested/catalog.json")).unwrap(), b"{}");
  }

  #[test]
  fn move_into_own_subtree_is_rejected() {
    let temp = tempdir().unwrap();
    let src = populate(temp.path());
    let dst = src.join("nested/inner");

    let err = move_dir(&src, &dst).unwrap_err();
    assert!(err.to_string().contains("overlaps"));
    assert!(src.join("a.bundle").exists());
  }

  #[test]
  fn moving_a_missing_directory_is_an_error() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("missing");
    assert!(move_dir(&missing, &temp.path().join("dst")).is_err());
  }

  #[test]
  fn remove_if_exists_reports_whether_it_deleted() {
    let temp = tempdir().unwrap();
    let src = populate(temp.path());

    assert!(remove_dir_if_exists(&src).unwrap());
    assert!(!src.exists());
    assert!(!remove_dir_if_exists(&src).unwrap());
  }

  #[test]
  fn remove_if_empty_skips_populated_directories() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("root");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("user.txt"), b"keep me").unwrap();

    assert!(!remove_dir_if_empty(&dir).unwrap());
    assert!(dir.join("user.txt").exists());

    fs::remove_file(dir.join("user.txt")).unwrap();
    assert!(remove_dir_if_empty(&dir).unwrap());
    assert!(!dir.exists());
  }
}
