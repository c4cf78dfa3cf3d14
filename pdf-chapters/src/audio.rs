//! Synthesized audio files: naming, saving and expiry.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use uuid::Uuid;

const PREFIX: &str = "audio_";
const EXTENSION: &str = ".mp3";

/// `audio_<8 hex>.mp3`
pub fn new_file_name() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}{}{}", PREFIX, &id[..8], EXTENSION)
}

fn is_audio_file(name: &str) -> bool {
    name.starts_with(PREFIX) && name.ends_with(EXTENSION)
}

/// Write `bytes` under a fresh name in `dir`, creating the directory.
pub async fn save(dir: &Path, bytes: &[u8]) -> io::Result<(String, PathBuf)> {
    tokio::fs::create_dir_all(dir).await?;
    let file_name = new_file_name();
    let path = dir.join(&file_name);
    tokio::fs::write(&path, bytes).await?;
    Ok((file_name, path))
}

/// Delete audio files in `dir` last modified at least `max_age` ago.
///
/// Other files are left alone. A missing directory counts as empty.
/// Returns the number of files removed.
pub async fn prune(dir: &Path, max_age: Duration) -> io::Result<usize> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let now = SystemTime::now();
    let mut removed = 0;

    while let Some(entry) = entries.next_entry().await? {
        if !is_audio_file(&entry.file_name().to_string_lossy()) {
            continue;
        }
        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        let age = metadata
            .modified()
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .unwrap_or_default();
        if age >= max_age {
            tokio::fs::remove_file(entry.path()).await?;
            removed += 1;
        }
    }

    if removed > 0 {
        log::debug!("Removed {} expired audio file(s) from {}", removed, dir.display());
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_file_name() {
        let name = new_file_name();
        assert!(is_audio_file(&name));
        assert_eq!(name.len(), "audio_12345678.mp3".len());
        assert!(name[6..14].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_save_creates_directory() {
        let dir = TempDir::new().unwrap();
        let audio_dir = dir.path().join("nested").join("audio");
        let (name, path) = save(&audio_dir, b"ID3").await.unwrap();
        assert_eq!(path, audio_dir.join(&name));
        assert_eq!(std::fs::read(path).unwrap(), b"ID3");
    }

    #[tokio::test]
    async fn test_prune_removes_only_expired_audio() {
        let dir = TempDir::new().unwrap();
        save(dir.path(), b"one").await.unwrap();
        save(dir.path(), b"two").await.unwrap();
        std::fs::write(dir.path().join("keep.txt"), b"x").unwrap();
        std::fs::write(dir.path().join("audio_notes.txt"), b"x").unwrap();

        assert_eq!(prune(dir.path(), Duration::from_secs(3600)).await.unwrap(), 0);
        assert_eq!(prune(dir.path(), Duration::ZERO).await.unwrap(), 2);

        let mut left: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(left, vec!["audio_notes.txt", "keep.txt"]);
    }

    #[tokio::test]
    async fn test_prune_missing_directory() {
        let dir = TempDir::new().unwrap();
        let removed = prune(&dir.path().join("absent"), Duration::ZERO).await.unwrap();
        assert_eq!(removed, 0);
    }
}
