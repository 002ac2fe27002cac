#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! End-to-end tests over real files: create, update, read back, and verify
//! the untouched parts byte for byte.

use std::fs;
use std::path::PathBuf;

use inistream::{
    DEFAULT_LINE_CAPACITY, Error, IniFile, IniOptions, error_string, read_key, read_key_into,
    section_entries, status, write_key,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn scratch_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("test.ini");
    (dir, path)
}

fn file_count(dir: &TempDir) -> usize {
    fs::read_dir(dir.path()).unwrap().count()
}

#[test]
fn test_round_trip_through_a_fresh_file() {
    let (_dir, path) = scratch_file();

    write_key(&path, "network", "host", "example.net", None).unwrap();
    assert_eq!(read_key(&path, "network", "host").unwrap(), "example.net");

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with('#'), "fresh files carry a header block");
    assert!(text.contains("[network]"));
    assert!(text.contains("host = example.net"));
}

#[test]
fn test_quoted_windows_path_round_trips() {
    let (_dir, path) = scratch_file();

    write_key(&path, "paths", "exe", r#""C:\\path\\to\\file.txt""#, None).unwrap();
    assert_eq!(read_key(&path, "paths", "exe").unwrap(), r"C:\path\to\file.txt");
}

#[test]
fn test_quoted_values_keep_whitespace_and_comment_bytes() {
    let (_dir, path) = scratch_file();

    write_key(&path, "s", "spaced", "\"  two  words ; kept \"", None).unwrap();
    assert_eq!(read_key(&path, "s", "spaced").unwrap(), "  two  words ; kept ");
}

#[test]
fn test_repeated_writes_update_in_place() {
    let (_dir, path) = scratch_file();

    write_key(&path, "MySection", "pi", "3.14", Some("Definition of PI")).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[MySection]"));
    assert!(text.contains("# Definition of PI"));
    assert!(text.contains("pi = 3.14"));

    // The second write replaces the value line and must not duplicate the
    // key or reattach a comment.
    write_key(&path, "MySection", "pi", "3.14159", Some("Unimportant")).unwrap();
    assert_eq!(read_key(&path, "MySection", "pi").unwrap(), "3.14159");

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches("pi =").count(), 1);
    assert_eq!(text.matches("[MySection]").count(), 1);
    assert_eq!(text.matches("# Definition of PI").count(), 1);
    assert!(!text.contains("Unimportant"));
}

#[test]
fn test_matching_is_case_insensitive() {
    let (_dir, path) = scratch_file();
    fs::write(&path, "[Sec]\nKey = hello\n").unwrap();

    assert_eq!(read_key(&path, "Sec", "Key").unwrap(), "hello");
    assert_eq!(read_key(&path, "sec", "key").unwrap(), "hello");
    assert_eq!(read_key(&path, "SEC", "KEY").unwrap(), "hello");
}

#[test]
fn test_caller_buffer_truncates_to_capacity_minus_one() {
    let (_dir, path) = scratch_file();
    fs::write(&path, "[m]\npi = 3.14159\n").unwrap();

    let mut buf = [0u8; 8];
    let n = read_key_into(&path, "m", "pi", &mut buf).unwrap();
    assert_eq!(n, 7);
    assert_eq!(&buf[..n], b"3.14159");

    let mut buf = [0u8; 7];
    let n = read_key_into(&path, "m", "pi", &mut buf).unwrap();
    assert_eq!(n, 6);
    assert_eq!(&buf[..n], b"3.1415");

    let mut buf = [0u8; 4];
    let n = read_key_into(&path, "m", "pi", &mut buf).unwrap();
    assert_eq!(n, 3);
    assert_eq!(&buf[..n], b"3.1");
}

#[test]
fn test_missing_key_or_section_reports_end_of_file_status() {
    let (_dir, path) = scratch_file();
    fs::write(&path, "[s]\nk = v\n").unwrap();

    let err = read_key(&path, "s", "missing").unwrap_err();
    assert!(matches!(err, Error::KeyNotFound(_)));
    assert_eq!(err.code(), status::NOT_FOUND);

    let err = read_key(&path, "absent", "k").unwrap_err();
    assert!(matches!(err, Error::SectionNotFound(_)));
    assert_eq!(err.code(), status::NOT_FOUND);
    assert_eq!(error_string(err.code()), "End of File");

    // The caller buffer stays untouched on any error.
    let mut buf = [0xAA_u8; 16];
    assert!(read_key_into(&path, "s", "missing", &mut buf).is_err());
    assert_eq!(buf, [0xAA_u8; 16]);
}

#[test]
fn test_missing_file_maps_to_the_os_error_plane() {
    let (_dir, path) = scratch_file();

    let err = read_key(&path, "s", "k").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(err.code() <= -status::OS_ERROR_OFFSET, "code {}", err.code());
    assert_ne!(error_string(err.code()), "Unknown Error");
}

#[test]
fn test_read_stops_at_the_next_section_header() {
    let (_dir, path) = scratch_file();
    fs::write(&path, "[a]\nx = 1\n\n[b]\nport = 2\n").unwrap();

    // `port` only exists in [b]; a lookup in [a] must not find it.
    let err = read_key(&path, "a", "port").unwrap_err();
    assert!(matches!(err, Error::KeyNotFound(_)));
    assert_eq!(read_key(&path, "b", "port").unwrap(), "2");
}

#[test]
fn test_insertion_lands_inside_its_section() {
    let (_dir, path) = scratch_file();
    fs::write(&path, "[a]\nx = 1\n\n[b]\ny = 2\n").unwrap();

    write_key(&path, "a", "z", "3", None).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[a]\nx = 1\nz = 3\n\n[b]\ny = 2\n"
    );
}

#[test]
fn test_comment_accompanies_newly_added_keys() {
    let (_dir, path) = scratch_file();
    fs::write(&path, "[a]\nx = 1\n\n[b]\ny = 2\n").unwrap();

    write_key(&path, "a", "z", "3", Some("added later")).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[a]\nx = 1\n\n# added later\nz = 3\n\n[b]\ny = 2\n"
    );
}

#[test]
fn test_missing_section_is_appended_at_eof() {
    let (_dir, path) = scratch_file();
    fs::write(&path, "[a]\nx = 1\n").unwrap();

    write_key(&path, "new", "k", "v", None).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[a]\nx = 1\n\n[new]\nk = v\n"
    );
}

#[test]
fn test_unrelated_lines_survive_byte_for_byte() {
    let (_dir, path) = scratch_file();
    let original = "; top comment\n\
                    \n\
                    [keep]\n\
                    \tspaced   =   value with  gaps  \n\
                    junk line without separator\n\
                    \n\
                    [target]\n\
                    old = 1\n\
                    # trailing comment\n";
    fs::write(&path, original).unwrap();

    write_key(&path, "target", "old", "2", None).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        original.replace("old = 1", "old = 2")
    );
}

#[test]
fn test_crlf_input_reads_fine_and_rewrites_normalized() {
    let (_dir, path) = scratch_file();
    fs::write(&path, "[s]\r\nk = 1\r\nother = x\r\n").unwrap();

    assert_eq!(read_key(&path, "s", "k").unwrap(), "1");

    write_key(&path, "s", "k", "2", None).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "[s]\nk = 2\nother = x\n");
}

#[test]
fn test_colon_separator_and_inline_comments() {
    let (_dir, path) = scratch_file();
    fs::write(
        &path,
        "[s]\ncolon : v1\ntrimmed = v2   ; note\nempty =\nonly_comment = ; note\n",
    )
    .unwrap();

    assert_eq!(read_key(&path, "s", "colon").unwrap(), "v1");
    assert_eq!(read_key(&path, "s", "trimmed").unwrap(), "v2");
    assert_eq!(read_key(&path, "s", "empty").unwrap(), "");
    assert_eq!(read_key(&path, "s", "only_comment").unwrap(), "");
}

#[test]
fn test_bounded_rewrite_refuses_overlong_lines_and_leaves_the_file_intact() {
    let (dir, path) = scratch_file();
    let original = format!("[app]\ndata = {}\nname = demo\n", "x".repeat(300));
    fs::write(&path, &original).unwrap();

    let file = IniFile::with_options(
        &path,
        IniOptions::new().with_line_limit(DEFAULT_LINE_CAPACITY),
    );
    let err = file.write("app", "name", "demo2", None).unwrap_err();
    assert!(matches!(err, Error::LineTooLong { capacity: 256 }));
    assert_eq!(err.code(), status::BUFFER_FULL);

    // The original is byte-identical and no temp file survived the failure.
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert_eq!(file_count(&dir), 1);
}

#[test]
fn test_bounded_rewrite_accepts_crlf_lines_at_capacity() {
    let (_dir, path) = scratch_file();
    // "ab = 0123456789" is 15 content bytes, exactly the cap at limit 16;
    // only its "\r" falls past the bound.
    fs::write(&path, "[s]\r\nab = 0123456789\r\nother = 1\r\n").unwrap();

    let file = IniFile::with_options(&path, IniOptions::new().with_line_limit(16));
    assert_eq!(file.read("s", "ab").unwrap(), "0123456789");

    file.write("s", "other", "2", None).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[s]\nab = 0123456789\nother = 2\n"
    );
}

#[test]
fn test_bounded_reads_truncate_silently() {
    let (_dir, path) = scratch_file();
    fs::write(&path, format!("[s]\nk = {}\n", "a".repeat(30))).unwrap();

    let file = IniFile::with_options(&path, IniOptions::new().with_line_limit(16));
    // Line content is capped at 15 bytes: `k = ` plus eleven `a`s.
    assert_eq!(file.read("s", "k").unwrap(), "a".repeat(11));
}

#[test]
fn test_section_entries_lists_pairs_in_file_order() {
    let (_dir, path) = scratch_file();
    fs::write(
        &path,
        "; prelude\n[empty]\n\n[main]\nalpha = 1\n; note\nbeta = \"two words\"\njunk junk\ngamma: 3\n\n[next]\nomega = 9\n",
    )
    .unwrap();

    let pairs: Vec<(String, String)> = section_entries(&path, "main")
        .unwrap()
        .collect::<inistream::Result<_>>()
        .unwrap();
    assert_eq!(
        pairs,
        vec![
            ("alpha".to_string(), "1".to_string()),
            ("beta".to_string(), "two words".to_string()),
            ("gamma".to_string(), "3".to_string()),
        ]
    );

    // A section that ends immediately yields nothing.
    let pairs: Vec<_> = section_entries(&path, "empty")
        .unwrap()
        .collect::<inistream::Result<Vec<_>>>()
        .unwrap();
    assert!(pairs.is_empty());

    // The locate runs eagerly, before any iteration.
    let err = section_entries(&path, "absent").unwrap_err();
    assert!(matches!(err, Error::SectionNotFound(_)));
}

#[test]
fn test_argument_validation_maps_to_classic_codes() {
    // Argument checks run before the file is touched; the path does not
    // need to exist.
    let path = PathBuf::from("never-created.ini");

    assert_eq!(read_key(&path, "", "k").unwrap_err().code(), status::NULL_ARG);
    assert_eq!(read_key(&path, "s", "").unwrap_err().code(), status::NULL_ARG);

    let mut empty: [u8; 0] = [];
    assert_eq!(
        read_key_into(&path, "s", "k", &mut empty).unwrap_err().code(),
        status::NULL_ARG
    );

    assert_eq!(
        write_key(&path, "a]b", "k", "v", None).unwrap_err().code(),
        status::BAD_VALUE
    );
    assert_eq!(
        write_key(&path, "s", "k=x", "v", None).unwrap_err().code(),
        status::BAD_VALUE
    );
    assert_eq!(
        write_key(&path, "s", "#k", "v", None).unwrap_err().code(),
        status::BAD_VALUE
    );
    assert_eq!(
        write_key(&path, "s", "k", "a\nb", None).unwrap_err().code(),
        status::BAD_VALUE
    );
    assert_eq!(
        write_key(&path, "s", "k", "v", Some("a\nb")).unwrap_err().code(),
        status::BAD_VALUE
    );
}

#[test]
fn test_handle_and_free_functions_agree() {
    let (_dir, path) = scratch_file();
    write_key(&path, "s", "k", "v", None).unwrap();

    let file = IniFile::new(&path);
    assert_eq!(file.read("s", "k").unwrap(), read_key(&path, "s", "k").unwrap());

    file.write("s", "k2", "w", None).unwrap();
    assert_eq!(read_key(&path, "s", "k2").unwrap(), "w");

    let pairs: Vec<_> = file
        .entries("s")
        .unwrap()
        .collect::<inistream::Result<Vec<_>>>()
        .unwrap();
    assert_eq!(pairs.len(), 2);
}
