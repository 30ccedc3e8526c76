use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::path::Path;

use zip::result::ZipResult;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Writes `(name, data)` pairs into an in-memory deflated zip.
///
/// Entries keep their order. A name that was already used gets a ` (n)`
/// suffix before its extension.
pub fn zip_files<I>(entries: I) -> ZipResult<Vec<u8>>
where
    I: IntoIterator<Item = (String, Vec<u8>)>,
{
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut used = HashSet::new();

    for (name, data) in entries {
        let name = unique_name(&mut used, name);
        writer.start_file(name, options)?;
        writer.write_all(&data)?;
    }

    Ok(writer.finish()?.into_inner())
}

fn unique_name(used: &mut HashSet<String>, name: String) -> String {
    if used.insert(name.clone()) {
        return name;
    }

    let path = Path::new(&name);
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let parent = match path.parent().map(|parent| parent.to_string_lossy()) {
        Some(parent) if !parent.is_empty() => format!("{}/", parent),
        _ => String::new(),
    };

    (2..)
        .map(|n| format!("{}{} ({}){}", parent, stem, n, extension))
        .find(|candidate| used.insert(candidate.clone()))
        .unwrap_or(name)
}
