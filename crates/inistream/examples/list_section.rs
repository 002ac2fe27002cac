//! Enumerate the key/value pairs of one section.
//!
//! `section_entries` streams the file and yields decoded pairs lazily; the
//! file is never loaded whole, so this works the same on a gigabyte-sized
//! config as on the toy file below.

use inistream::{Error, section_entries, write_key};

fn main() -> Result<(), Error> {
    println!("=== Section Listing Example ===\n");

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("limits.ini");

    println!("1. Building a file with two sections...");
    write_key(&path, "limits", "open_files", "1024", None)?;
    write_key(&path, "limits", "max_body", "65536", Some("bytes"))?;
    write_key(&path, "limits", "timeout", "\"30 s\"", None)?;
    write_key(&path, "logging", "level", "debug", None)?;

    println!("2. Entries of [limits]:");
    for entry in section_entries(&path, "limits")? {
        let (key, value) = entry?;
        println!("   {key:<12} = {value}");
    }

    println!("\n3. Entries of [logging]:");
    for entry in section_entries(&path, "logging")? {
        let (key, value) = entry?;
        println!("   {key:<12} = {value}");
    }

    // A missing section fails on open, before any iteration.
    println!("\n4. Asking for a section that does not exist:");
    match section_entries(&path, "cache") {
        Ok(_) => println!("   unexpected hit"),
        Err(err) => println!("   {err}"),
    }

    Ok(())
}
