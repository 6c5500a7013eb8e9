use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::Serialize;
use tauri::{AppHandle, State};
use tauri_plugin_dialog::DialogExt;

use crate::config::{Config, ATLAS_EXT, DISPLAY_EXT, SPINE_VERSION_TAG, TEXTURE_EXT};
use crate::server::to_app_url;

/// Servable URLs of a fully converted animation bundle
#[derive(Debug, Clone, Serialize)]
pub struct ConvertedAnimation {
    pub png: String,
    pub atlas: String,
    pub skel: String,
    pub map_png: String,
    pub map_skel: String,
    pub map_atlas: String,
}

/// File names of the six outputs a complete bundle must contain,
/// located inside the per-archive cache subdirectory
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ConvertedFileNames {
    pub png: String,
    pub atlas: String,
    pub skel: String,
    pub map_png: String,
    pub map_skel: String,
    pub map_atlas: String,
}

/// Pick an animation archive, extract and convert it into the cache, and
/// return the six servable URLs. Cancelling the dialog returns None.
#[tauri::command]
pub async fn convert_animation(
    app: AppHandle,
    config: State<'_, Config>,
) -> Result<Option<ConvertedAnimation>, String> {
    fs::create_dir_all(&config.cache_dir)
        .map_err(|e| format!("Failed to create cache directory: {}", e))?;

    let picked = app
        .dialog()
        .file()
        .set_title("Select animation file")
        .set_directory(&config.downloads_dir)
        .add_filter("ZIP", &["zip"])
        .add_filter("All Files", &["*"])
        .blocking_pick_file();

    let Some(file_path) = picked else {
        return Ok(None);
    };

    let archive_path = file_path
        .into_path()
        .map_err(|e| format!("Invalid file selection: {}", e))?;

    let (out_dir_name, names) = convert_animation_archive(&config.cache_dir, &archive_path)?;

    let url = |name: &str| to_app_url(&config, &format!("{}/{}", out_dir_name, name));

    Ok(Some(ConvertedAnimation {
        png: url(&names.png),
        atlas: url(&names.atlas),
        skel: url(&names.skel),
        map_png: url(&names.map_png),
        map_skel: url(&names.map_skel),
        map_atlas: url(&names.map_atlas),
    }))
}

/// Extract the archive into `cache_dir/<archive base name>/`, convert every
/// compressed texture to the display format, patch the atlas manifests, and
/// resolve the six expected output files. All-or-nothing: any failure aborts
/// the whole conversion, and a bundle missing any expected output is rejected.
pub(crate) fn convert_animation_archive(
    cache_dir: &Path,
    archive_path: &Path,
) -> Result<(String, ConvertedFileNames), String> {
    let file_name = archive_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| "Invalid archive path".to_string())?;

    let out_dir_name = file_name.strip_suffix(".zip").unwrap_or(file_name).to_string();
    let out_dir = cache_dir.join(&out_dir_name);

    extract_archive(archive_path, &out_dir)?;

    // One pass over the extracted listing: textures are re-encoded (and the
    // originals removed), atlas manifests are patched to reference them
    for name in list_file_names(&out_dir)? {
        if name.ends_with(TEXTURE_EXT) {
            convert_texture(&out_dir.join(&name))?;
        } else if name.ends_with(ATLAS_EXT) {
            rewrite_atlas(&out_dir.join(&name))?;
        }
    }

    let names = locate_expected_outputs(&list_file_names(&out_dir)?)?;
    Ok((out_dir_name, names))
}

fn extract_archive(archive_path: &Path, out_dir: &Path) -> Result<(), String> {
    let file = fs::File::open(archive_path)
        .map_err(|e| format!("Failed to open archive {}: {}", archive_path.display(), e))?;

    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| format!("Failed to read archive {}: {}", archive_path.display(), e))?;

    archive
        .extract(out_dir)
        .map_err(|e| format!("Failed to extract archive {}: {}", archive_path.display(), e))
}

fn list_file_names(dir: &Path) -> Result<Vec<String>, String> {
    let entries = fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {}", dir.display(), e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read entry: {}", e))?;
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }

    Ok(names)
}

/// Decode a compressed texture and re-encode it as a display image with the
/// same base name, then remove the original
fn convert_texture(texture_path: &Path) -> Result<PathBuf, String> {
    let file = fs::File::open(texture_path)
        .map_err(|e| format!("Failed to open texture {}: {}", texture_path.display(), e))?;

    let mut reader = BufReader::new(file);
    let dds = ddsfile::Dds::read(&mut reader)
        .map_err(|e| format!("Failed to parse texture {}: {}", texture_path.display(), e))?;

    let decoded: RgbaImage = image_dds::image_from_dds(&dds, 0)
        .map_err(|e| format!("Failed to decode texture {}: {}", texture_path.display(), e))?;

    let display_path = texture_path.with_extension(DISPLAY_EXT.trim_start_matches('.'));
    decoded
        .save(&display_path)
        .map_err(|e| format!("Failed to write image {}: {}", display_path.display(), e))?;

    fs::remove_file(texture_path)
        .map_err(|e| format!("Failed to remove texture {}: {}", texture_path.display(), e))?;

    Ok(display_path)
}

fn rewrite_atlas(atlas_path: &Path) -> Result<(), String> {
    let content = fs::read_to_string(atlas_path)
        .map_err(|e| format!("Failed to read atlas {}: {}", atlas_path.display(), e))?;

    fs::write(atlas_path, rewrite_atlas_content(&content))
        .map_err(|e| format!("Failed to write atlas {}: {}", atlas_path.display(), e))
}

/// Swap the texture extension for the display extension on every line that
/// ends with it. Suffix match only: a line mentioning the texture extension
/// mid-line is left alone, and all other content and line structure is
/// preserved exactly.
pub(crate) fn rewrite_atlas_content(content: &str) -> String {
    content
        .split('\n')
        .map(|line| match line.strip_suffix(TEXTURE_EXT) {
            Some(stem) => format!("{}{}", stem, DISPLAY_EXT),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Suffixes of the six files a complete converted bundle contains, relative
/// to the spine version tag: the primary texture/manifest/skeleton triple
/// and its "_map" secondary triple
const EXPECTED_PART_SUFFIXES: [&str; 6] =
    [".png", ".atlas", ".skel", "_map.png", "_map.skel", "_map.atlas"];

fn find_output<'a>(names: &'a [String], part_suffix: &str) -> Option<&'a str> {
    let suffix = format!("{}{}", SPINE_VERSION_TAG, part_suffix);
    names
        .iter()
        .find(|name| name.ends_with(&suffix))
        .map(|name| name.as_str())
}

/// Resolve the six expected outputs by suffix convention. Bundles exported
/// with a different version/compression tag produce no matches and are
/// rejected here rather than auto-detected.
pub(crate) fn locate_expected_outputs(names: &[String]) -> Result<ConvertedFileNames, String> {
    let mut found = [None, None, None, None, None, None];
    for (slot, part) in found.iter_mut().zip(EXPECTED_PART_SUFFIXES) {
        *slot = find_output(names, part);
    }

    match found {
        [Some(png), Some(atlas), Some(skel), Some(map_png), Some(map_skel), Some(map_atlas)] => {
            Ok(ConvertedFileNames {
                png: png.to_string(),
                atlas: atlas.to_string(),
                skel: skel.to_string(),
                map_png: map_png.to_string(),
                map_skel: map_skel.to_string(),
                map_atlas: map_atlas.to_string(),
            })
        }
        _ => Err("Some files were not found, check if the texture format is dxt5!".to_string()),
    }
}
