use crate::sink::Sink;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Append-mode file sink.
///
/// The handle lives behind a mutex shared by writers and [`reopen`],
/// so a rotation-triggered swap never races an in-flight write.
///
/// [`reopen`]: Sink::reopen
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Open the file at `path` for appending, creating it if missing.
    pub fn open(path: impl AsRef<Path>) -> io::Result<FileSink> {
        let path = path.as_ref().to_path_buf();
        let file = open_append(&path)?;
        Ok(FileSink {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

// A poisoned lock still guards a usable file handle; keep writing.
fn lock(file: &Mutex<File>) -> MutexGuard<'_, File> {
    file.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Sink for FileSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut file = lock(&self.file);
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")
    }

    fn reopen(&self) -> io::Result<()> {
        let fresh = open_append(&self.path)?;
        *lock(&self.file) = fresh;
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        lock(&self.file).flush()
    }
}
