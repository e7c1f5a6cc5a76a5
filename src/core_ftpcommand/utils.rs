use std::path::{Path, PathBuf};

/// Resolves a client path against the session's virtual working directory.
///
/// Returns the normalized virtual path (always absolute, `/` for the root)
/// and the matching filesystem path under `home_dir`. `..` never climbs above
/// the virtual root. Pure string work: nothing here touches the filesystem.
pub fn resolve_path(current_dir: &str, home_dir: &Path, arg: &str) -> (String, PathBuf) {
    let joined = if arg.starts_with('/') {
        arg.to_string()
    } else {
        format!("{}/{}", current_dir, arg)
    };

    let parts = joined.split('/').fold(Vec::new(), |mut acc, part| {
        match part {
            "" | "." => {}
            ".." => {
                acc.pop();
            }
            part => acc.push(part),
        }
        acc
    });

    let virtual_path = format!("/{}", parts.join("/"));
    let local_path = parts
        .iter()
        .fold(home_dir.to_path_buf(), |path, part| path.join(part));

    (virtual_path, local_path)
}

/// Quotes a path for a 257 reply, doubling embedded quotes.
pub fn quote_path(path: &str) -> String {
    format!("\"{}\"", path.replace('"', "\"\""))
}
