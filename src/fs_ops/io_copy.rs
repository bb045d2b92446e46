//! Streaming copy into a freshly created file.
//!
//! - The destination is opened with `create_new` and is never clobbered.
//! - Linux tries `copy_file_range` first and falls back to buffered I/O when
//!   the kernel or filesystem does not support it.
//! - The destination is fsynced before returning; the caller renames it into
//!   place and syncs the directory.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

const BUF_SIZE: usize = 1024 * 1024;

/// Copy `src` -> `dst` (which must not exist). Returns bytes written.
pub(super) fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;
    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;

    #[cfg(target_os = "linux")]
    if let Some(bytes) = copy_in_kernel(&src_f, &dst_f)? {
        dst_f.sync_all()?;
        return Ok(bytes);
    }

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(bytes)
}

/// `Ok(None)` when copy_file_range is unavailable before any byte was
/// copied, so the caller can fall back to streaming.
#[cfg(target_os = "linux")]
fn copy_in_kernel(src: &File, dst: &File) -> io::Result<Option<u64>> {
    use std::os::unix::io::AsRawFd;

    const CHUNK: usize = 16 * 1024 * 1024;
    let mut total: u64 = 0;
    loop {
        let rc = unsafe {
            libc::copy_file_range(
                src.as_raw_fd(),
                std::ptr::null_mut(),
                dst.as_raw_fd(),
                std::ptr::null_mut(),
                CHUNK,
                0,
            )
        };
        if rc > 0 {
            total += rc as u64;
            continue;
        }
        if rc == 0 {
            return Ok(Some(total));
        }

        let err = io::Error::last_os_error();
        let unsupported = matches!(
            err.raw_os_error(),
            Some(libc::EXDEV | libc::ENOSYS | libc::EINVAL | libc::EPERM | libc::EOPNOTSUPP)
        );
        return if total == 0 && unsupported {
            Ok(None)
        } else {
            Err(err)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn copy_small_file_ok() {
        let dir = tempdir().unwrap();
        let src_path = dir.path().join("src.txt");
        let dst_path = dir.path().join("dst.txt");
        fs::write(&src_path, b"hello world").unwrap();

        let n = copy_streaming(&src_path, &dst_path).unwrap();
        assert_eq!(n, 11);
        assert_eq!(fs::read(&dst_path).unwrap(), b"hello world");
    }

    #[test]
    fn copy_zero_length_ok() {
        let dir = tempdir().unwrap();
        let src_path = dir.path().join("empty");
        let dst_path = dir.path().join("out");
        File::create(&src_path).unwrap();

        assert_eq!(copy_streaming(&src_path, &dst_path).unwrap(), 0);
        assert_eq!(fs::metadata(&dst_path).unwrap().len(), 0);
    }

    #[test]
    fn fails_if_dest_exists() {
        let dir = tempdir().unwrap();
        let src_path = dir.path().join("src");
        let dst_path = dir.path().join("dst");
        fs::write(&src_path, b"data").unwrap();
        fs::write(&dst_path, b"x").unwrap();

        let err = copy_streaming(&src_path, &dst_path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&dst_path).unwrap(), b"x");
    }

    #[test]
    fn missing_source_creates_nothing() {
        let dir = tempdir().unwrap();
        let dst_path = dir.path().join("out");
        let err = copy_streaming(&dir.path().join("nope"), &dst_path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!dst_path.exists());
    }

    #[test]
    fn large_file_crosses_buffer_boundaries() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("big.bin");
        let dst = dir.path().join("big.out");
        let data: Vec<u8> = (0..2 * BUF_SIZE + 123).map(|i| (i % 251) as u8).collect();
        fs::write(&src, &data).unwrap();

        let n = copy_streaming(&src, &dst).unwrap();
        assert_eq!(n as usize, data.len());
        assert_eq!(fs::read(&dst).unwrap(), data);
    }
}
