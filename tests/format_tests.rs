//! Listing tests for the tar family and 7z containers

use assert_cmd::Command;
use flate2::{write::GzEncoder, Compression};
use predicates::prelude::*;
use sevenz_rust::{SevenZArchiveEntry, SevenZWriter};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tar::{Builder, Header};
use tempfile::TempDir;
use xz2::write::XzEncoder;
use zzdir::{CompressionMethod, Container};

type Result<T> = anyhow::Result<T>;

fn zzdir_cmd() -> Command {
    Command::cargo_bin("zzdir").expect("failed to find zzdir binary")
}

fn write_tar<W: Write>(writer: W) -> Result<W> {
    let mut builder = Builder::new(writer);
    for (name, data) in [("file.01", "one"), ("file.22", "twenty-two"), ("file.99", "")] {
        let mut header = Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, data.as_bytes())?;
    }
    Ok(builder.into_inner()?)
}

fn assert_tar_listing(path: &Path, method: &str) {
    zzdir_cmd()
        .arg(path)
        .assert()
        .success()
        .stdout(format!(
            "     3 {method:<9}  0% file.01\n    10 {method:<9}  0% file.22\n     0 {method:<9}  0% file.99\n"
        ))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_list_plain_tar() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("test2.tar");
    write_tar(File::create(&path)?)?;

    assert_tar_listing(&path, "tar");
    Ok(())
}

#[test]
fn test_list_tgz() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("test2.tgz");
    write_tar(GzEncoder::new(File::create(&path)?, Compression::default()))?.finish()?;

    assert_tar_listing(&path, "gzip");
    Ok(())
}

#[test]
fn test_list_txz() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("test2.txz");
    write_tar(XzEncoder::new(File::create(&path)?, 6))?.finish()?;

    assert_tar_listing(&path, "xz");
    Ok(())
}

#[test]
fn test_list_tar_zst() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("test2.tar.zst");
    write_tar(zstd::stream::write::Encoder::new(File::create(&path)?, 3)?)?.finish()?;

    assert_tar_listing(&path, "zstd");
    Ok(())
}

#[test]
fn test_gzip_detected_without_extension() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("renamed.dat");
    write_tar(GzEncoder::new(File::create(&path)?, Compression::default()))?.finish()?;

    let mut container = Container::open(&path)?;
    assert_eq!(container.kind(), "tar.gz");
    let first = container.next_entry()?.expect("first member");
    assert_eq!(first.method, CompressionMethod::Gzip);
    assert_eq!(container.count(), 2);
    Ok(())
}

#[test]
fn test_list_7z() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("notes.txt");
    fs::write(&source, "seven zip listing test ".repeat(100))?;
    let path = temp_dir.path().join("test.7z");

    let mut writer = SevenZWriter::create(&path)?;
    writer.push_archive_entry(
        SevenZArchiveEntry::from_path(&source, "notes.txt".to_string()),
        Some(File::open(&source)?),
    )?;
    writer.finish()?;

    zzdir_cmd()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("  2300 7z        "))
        .stdout(predicate::str::ends_with(" notes.txt\n"));

    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn test_container_reports_resolved_path() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let archive = temp_dir.path().join("test.ZIP");
    let mut writer = zip::ZipWriter::new(File::create(&archive)?);
    writer.start_file("a", zip::write::SimpleFileOptions::default())?;
    writer.write_all(b"a")?;
    writer.finish()?;

    let container = Container::open(temp_dir.path().join("test"))?;
    assert_eq!(container.path(), archive.as_path());
    assert_eq!(container.kind(), "zip");
    Ok(())
}
