//! Create, update, and read back a configuration file.
//!
//! Shows the full write path: fresh-file creation with a generated header,
//! appending a key with a comment block, and an in-place update that leaves
//! the rest of the file untouched.

use inistream::{Error, VERSION, error_string, read_key, version, write_key};

fn main() -> Result<(), Error> {
    println!("=== INI Round-Trip Example ===");
    println!("inistream {VERSION} (encoded version {})\n", version());

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("server.ini");

    // Create the file, the section, and the first key in one call.
    println!("1. Creating {}...", path.display());
    write_key(&path, "network", "port", "8080", Some("TCP listen port"))?;
    write_key(&path, "network", "host", "0.0.0.0", None)?;
    write_key(&path, "paths", "log", r#""C:\\logs\\server.log""#, None)?;
    println!("   ✅ Written:\n");
    print_indented(&std::fs::read_to_string(&path)?);

    // Update one key in place; comments and unrelated lines stay put.
    println!("\n2. Updating network.port in place...");
    write_key(&path, "network", "port", "9090", Some("ignored on update"))?;
    print_indented(&std::fs::read_to_string(&path)?);

    // Read values back, decoded.
    println!("\n3. Reading back:");
    println!("   port = {}", read_key(&path, "network", "port")?);
    println!("   host = {}", read_key(&path, "NETWORK", "HOST")?);
    println!("   log  = {}", read_key(&path, "paths", "log")?);

    // Missing keys are a status, not a crash.
    println!("\n4. Looking up a key that does not exist:");
    match read_key(&path, "network", "timeout") {
        Ok(value) => println!("   unexpected value: {value}"),
        Err(err @ Error::KeyNotFound(_)) => {
            println!("   {} (status {})", error_string(err.code()), err.code());
        }
        Err(err) => return Err(err),
    }

    Ok(())
}

fn print_indented(text: &str) {
    for line in text.lines() {
        println!("   | {line}");
    }
}
