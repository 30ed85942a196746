use std::{io::ErrorKind, path::Path};

use anyhow::Result;
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{self, AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
};
use tracing::debug;

/// Reads the whole file while holding a shared lock. Returns [None] if the file doesn't exist.
pub async fn read_locked(path: &Path) -> Result<Option<Vec<u8>>, io::Error> {
    let mut file = match File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    file.lock_shared()?;
    let mut buffer = Vec::new();
    let result = file.read_to_end(&mut buffer).await;
    file.unlock_async().await?;
    result?;
    debug!("Read {} bytes from {path:?}", buffer.len());
    Ok(Some(buffer))
}

/// Replaces contents of the file with `data` while holding an exclusive lock.
///
/// There is no temporary file and rename involved. A crash in the middle leaves a partially
/// written file behind.
pub async fn overwrite_locked(path: &Path, data: &[u8]) -> Result<(), io::Error> {
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .await?;
    // Semi-safe acquire-release for a file
    file.lock_exclusive()?;
    let result = overwrite_with_file(&mut file, data).await;
    file.unlock_async().await?;
    result?;
    debug!("Wrote {} bytes into {path:?}", data.len());
    Ok(())
}

async fn overwrite_with_file(file: &mut File, data: &[u8]) -> Result<(), io::Error> {
    // Truncation happens only after the lock is taken, so a reader never observes an empty file
    // because of us opening it.
    file.set_len(0).await?;
    file.rewind().await?;
    file.write_all(data).await?;
    file.flush().await?;
    file.sync_data().await?;
    Ok(())
}

/// Creates the file with `data` unless it's already present. Returns whether it was created.
pub async fn create_new(path: &Path, data: &[u8]) -> Result<bool, io::Error> {
    let mut file = match File::options()
        .write(true)
        .create_new(true)
        .open(path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e),
    };
    file.write_all(data).await?;
    file.flush().await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use super::{create_new, overwrite_locked, read_locked};

    #[tokio::test]
    async fn test_read_missing_file() -> Result<()> {
        let dir = tempdir()?;
        assert_eq!(read_locked(&dir.path().join("missing.csv")).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_overwrite_replaces_longer_contents() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("data.csv");
        overwrite_locked(&path, b"a much longer line\nand another one\n").await?;
        overwrite_locked(&path, b"short\n").await?;

        assert_eq!(read_locked(&path).await?, Some(b"short\n".to_vec()));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_new_is_idempotent() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("data.csv");

        assert!(create_new(&path, b"first\n").await?);
        assert!(!create_new(&path, b"second\n").await?);
        assert_eq!(read_locked(&path).await?, Some(b"first\n".to_vec()));
        Ok(())
    }
}
