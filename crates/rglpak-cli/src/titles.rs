use std::path::Path;

use rglpak_codec::decode_title;

use crate::CliError;

/// Decodes every `.rgl` file found directly under `titles_dir` into `<out>/<name>.rgl.json`.
///
/// Unlike extraction, a failure on one title is logged and skipped rather than aborting the
/// whole run — titles are independent records, and one corrupt file shouldn't hide the rest.
pub fn run(titles_dir: &Path, out_dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(out_dir)?;

    for entry in std::fs::read_dir(titles_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(|ext| ext.to_str()) != Some("rgl") {
            continue;
        }

        match decode_title(&path) {
            Ok(json) => {
                let name = title_name(&path);
                let out_path = out_dir.join(format!("{name}.rgl.json"));
                if let Err(err) = std::fs::write(&out_path, json) {
                    tracing::error!(path = %path.display(), %err, "failed to write decoded title");
                }
            }
            Err(err) => {
                tracing::error!(path = %path.display(), %err, "failed to decode title");
            }
        }
    }

    Ok(())
}

/// Derives the output base name from the parent directory of `path`, falling back to the
/// file's own name when no parent segment is available.
fn title_name(path: &Path) -> String {
    path.parent()
        .and_then(|parent| parent.file_name())
        .or_else(|| path.file_stem())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
