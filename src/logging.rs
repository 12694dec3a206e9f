/// Diagnostic logging for the terminal binary.
///
/// The game UI owns stdout and stderr while it runs, so records are appended
/// to a file instead.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

/// An `env_logger` builder that honours `RUST_LOG` (default `warn`) and
/// appends every record to `path`, creating the file if needed.
pub fn file_logger(path: &Path) -> io::Result<env_logger::Builder> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.target(env_logger::Target::Pipe(Box::new(file)));
    Ok(builder)
}
