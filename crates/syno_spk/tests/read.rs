use flate2::{write::GzEncoder, Compression};
use pretty_assertions::assert_eq;
use std::io::{self, Cursor, Read};
use syno_spk::{
    error::{Error, MissingEntryError, Result},
    read::{INFO_ENTRY, PACKAGE_ENTRY},
    read_package_info, InfoValue, ReadOptions, SpkReader,
};
use tracing_test::traced_test;

const INFO: &[u8] = b"package=\"ExamplePkg\"\nversion=\"1.0.0-0001\"\nchecksum_count=3\n";
const ICON: &[u8] = b"\x89PNG\r\n\x1a\nnot really an image";

fn append_file(spk: &mut tar::Builder<Vec<u8>>, name: &str, data: &[u8]) {
    let mut header = tar::Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    spk.append_data(&mut header, name, data).unwrap();
}

fn append_dir(spk: &mut tar::Builder<Vec<u8>>, name: &str) {
    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Directory);
    header.set_size(0);
    header.set_mode(0o755);
    spk.append_data(&mut header, name, io::empty()).unwrap();
}

fn package_tgz(names: &[&str]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for name in names {
        let mut header = tar::Header::new_gnu();
        header.set_size(4);
        header.set_mode(0o755);
        builder.append_data(&mut header, name, &b"data"[..]).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

fn spk(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, data) in entries {
        append_file(&mut builder, name, data);
    }
    builder.into_inner().unwrap()
}

/// Fails every read past `limit`
struct TrapReader {
    inner: Cursor<Vec<u8>>,
    limit: u64,
}

impl Read for TrapReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.limit.saturating_sub(self.inner.position());
        if remaining == 0 {
            return Err(io::Error::other("read past the trap"));
        }
        let len = buf.len().min(remaining as usize);
        self.inner.read(&mut buf[..len])
    }
}

#[traced_test]
#[test]
fn read_everything() -> Result<()> {
    let files = package_tgz(&["bin/app", "etc/app.conf"]);
    let input = spk(&[
        ("PACKAGE_ICON.PNG", ICON),
        (INFO_ENTRY, INFO),
        ("scripts/start-stop-status", &b"#!/bin/sh\nexit 0\n"[..]),
        (PACKAGE_ENTRY, files.as_slice()),
        ("PACKAGE_ICON_256.PNG", &b"large"[..]),
        ("PACKAGE_ICON_OTHER.JPG", &b"wrong format"[..]),
    ]);

    let contents = SpkReader::new(Cursor::new(input)).read(ReadOptions::default())?;

    let info = contents.info.expect("manifest");
    assert_eq!(info.get_str("package"), Some("ExamplePkg"));
    assert_eq!(info.get("CHECKSUM_COUNT"), Some(&InfoValue::Integer(3)));

    assert_eq!(
        contents.files,
        Some(vec!["bin/app".to_owned(), "etc/app.conf".to_owned()])
    );

    assert_eq!(
        contents.icons.keys().collect::<Vec<_>>(),
        vec!["PACKAGE_ICON.PNG", "PACKAGE_ICON_256.PNG"]
    );
    assert!(!contents.icons.contains_key("PACKAGE_ICON_OTHER.JPG"));
    assert_eq!(contents.icons.get("package_icon.png").map(Vec::as_slice), Some(ICON));

    Ok(())
}

#[traced_test]
#[test]
fn read_manifest_fixture() -> Result<()> {
    let manifest = std::fs::read(format!("{}/resources/INFO", env!("CARGO_MANIFEST_DIR")))?;
    let files = package_tgz(&[]);
    let input = spk(&[(INFO_ENTRY, manifest.as_slice()), (PACKAGE_ENTRY, files.as_slice())]);

    let (info, _, files) = SpkReader::new(Cursor::new(input))
        .read(ReadOptions::default())?
        .into_parts();

    let info = info.expect("manifest");
    assert_eq!(info.len(), 14);
    assert_eq!(info.get_str("maintainer_url"), Some("https://example.com/?ref=spk"));
    assert_eq!(info.get_str("install_dep_packages"), Some("WebStation>=3.0"));
    assert_eq!(info.get_str("description_fre"), Some(""));
    assert_eq!(info.get_integer("ctl_stop"), Some(1));
    assert_eq!(files, Some(vec![]));

    Ok(())
}

#[traced_test]
#[test]
fn missing_manifest() -> Result<()> {
    let files = package_tgz(&["bin/app"]);
    let input = spk(&[(PACKAGE_ENTRY, files.as_slice())]);

    let result = SpkReader::new(Cursor::new(input.clone())).read(ReadOptions::default());
    assert!(matches!(
        result,
        Err(Error::MissingEntry(MissingEntryError::Info))
    ));

    let contents = SpkReader::new(Cursor::new(input)).read(ReadOptions::builder().info(false).build())?;
    assert_eq!(contents.info, None);
    assert_eq!(contents.files, Some(vec!["bin/app".to_owned()]));

    Ok(())
}

#[traced_test]
#[test]
fn missing_package_archive() -> Result<()> {
    let input = spk(&[(INFO_ENTRY, INFO)]);

    let result = SpkReader::new(Cursor::new(input.clone())).read(ReadOptions::default());
    assert!(matches!(
        result,
        Err(Error::MissingEntry(MissingEntryError::Package))
    ));

    let (info, icons) = read_package_info(Cursor::new(input))?;
    assert_eq!(info.get_str("version"), Some("1.0.0-0001"));
    assert!(icons.is_empty());

    Ok(())
}

#[traced_test]
#[test]
fn unrequested_parts_stay_absent() -> Result<()> {
    let input = spk(&[
        (INFO_ENTRY, &b"broken = value\n"[..]),
        (PACKAGE_ENTRY, &b"not gzip"[..]),
        ("PACKAGE_ICON.PNG", ICON),
    ]);

    let contents = SpkReader::new(Cursor::new(input)).read(
        ReadOptions::builder()
            .info(false)
            .files(false)
            .icons(false)
            .build(),
    )?;

    assert_eq!(contents.info, None);
    assert_eq!(contents.files, None);
    assert!(contents.icons.is_empty());

    Ok(())
}

#[traced_test]
#[test]
fn stops_after_requested_entries() -> Result<()> {
    let files = package_tgz(&["bin/app"]);

    let mut builder = tar::Builder::new(Vec::new());
    append_file(&mut builder, INFO_ENTRY, INFO);
    append_file(&mut builder, PACKAGE_ENTRY, &files);
    let limit = builder.get_ref().len() as u64;
    append_file(&mut builder, "PACKAGE_ICON.PNG", ICON);
    let input = builder.into_inner()?;

    let reader = TrapReader {
        inner: Cursor::new(input.clone()),
        limit,
    };
    let contents = SpkReader::new(reader).read(ReadOptions::builder().icons(false).build())?;
    assert!(contents.info.is_some());
    assert_eq!(contents.files, Some(vec!["bin/app".to_owned()]));
    assert!(logs_contain("stopping early"));

    // Icons may follow anywhere, so asking for them reads to the end
    let reader = TrapReader {
        inner: Cursor::new(input),
        limit,
    };
    let result = SpkReader::new(reader).read(ReadOptions::default());
    assert!(matches!(result, Err(Error::IOError(_))));

    Ok(())
}

#[traced_test]
#[test]
fn entries_without_data_are_skipped() -> Result<()> {
    let files = package_tgz(&["bin/app"]);

    let mut builder = tar::Builder::new(Vec::new());
    append_dir(&mut builder, "PACKAGE_ICON_DIR.PNG");
    append_file(&mut builder, "PACKAGE_ICON_EMPTY.PNG", &[]);
    append_file(&mut builder, INFO_ENTRY, INFO);
    append_file(&mut builder, PACKAGE_ENTRY, &files);
    let input = builder.into_inner()?;

    let contents = SpkReader::new(Cursor::new(input)).read(ReadOptions::default())?;
    assert!(contents.icons.is_empty());
    assert!(contents.info.is_some());

    Ok(())
}

#[traced_test]
#[test]
fn later_manifest_wins() -> Result<()> {
    let input = spk(&[
        (INFO_ENTRY, &b"package=\"first\"\nbeta=1\n"[..]),
        (INFO_ENTRY, &b"package=\"second\"\n"[..]),
    ]);

    let (info, _) = read_package_info(Cursor::new(input))?;
    assert_eq!(info.get_str("package"), Some("second"));
    assert_eq!(info.get("beta"), None);

    Ok(())
}

#[traced_test]
#[test]
fn file_list_keeps_order_and_duplicates() -> Result<()> {
    let long_name = format!("usr/share/{}.txt", "x".repeat(150));
    let files = package_tgz(&["b", "a", "b", long_name.as_str()]);
    let input = spk(&[(PACKAGE_ENTRY, files.as_slice())]);

    let contents = SpkReader::new(Cursor::new(input)).read(
        ReadOptions::builder()
            .info(false)
            .icons(false)
            .build(),
    )?;
    assert_eq!(
        contents.files,
        Some(vec![
            "b".to_owned(),
            "a".to_owned(),
            "b".to_owned(),
            long_name
        ])
    );

    Ok(())
}

#[traced_test]
#[test]
fn malformed_manifest_propagates() {
    let input = spk(&[(INFO_ENTRY, &b"package=\"ok\"\nBad = notnum\n"[..])]);

    let result = read_package_info(Cursor::new(input));
    assert!(matches!(result, Err(Error::MalformedInfoLine(line)) if line == "Bad = notnum"));
}

#[traced_test]
#[test]
fn corrupt_package_archive_propagates() {
    let input = spk(&[(INFO_ENTRY, INFO), (PACKAGE_ENTRY, &b"not a gzip stream"[..])]);

    let result = SpkReader::new(Cursor::new(input)).read(ReadOptions::default());
    assert!(matches!(result, Err(Error::IOError(_))));
}
