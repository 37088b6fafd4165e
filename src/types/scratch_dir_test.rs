//! Tests for [ScratchDir].

use super::ScratchDir;

#[test]
fn create_makes_a_directory_with_prefix() {
  let mut scratch = ScratchDir::create("repoaudit_test_").unwrap();
  assert!(scratch.path().exists());
  assert!(
    scratch
      .path()
      .file_name()
      .unwrap()
      .to_string_lossy()
      .starts_with("repoaudit_test_")
  );
  scratch.release().unwrap();
}

#[test]
fn release_removes_the_directory() {
  let mut scratch = ScratchDir::create("repoaudit_test_").unwrap();
  let path = scratch.path().to_path_buf();
  std::fs::write(path.join("file.txt"), "contents").unwrap();
  scratch.release().unwrap();
  assert!(!path.exists());
  assert!(scratch.is_released());
}

#[test]
fn release_is_idempotent() {
  let mut scratch = ScratchDir::create("repoaudit_test_").unwrap();
  scratch.release().unwrap();
  scratch.release().unwrap();
  assert!(scratch.is_released());
}

#[test]
fn release_tolerates_externally_removed_directory() {
  let mut scratch = ScratchDir::create("repoaudit_test_").unwrap();
  std::fs::remove_dir_all(scratch.path()).unwrap();
  scratch.release().unwrap();
  assert!(scratch.is_released());
}
