use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tauri::{Emitter, Window};

use crate::assets::dragons::{self, SpriteOptions, StaticFileOptions};
use crate::assets::{DragonPhase, PlatformPrefix, SpriteQuality};
use crate::config::USER_AGENT;

/// Skin variants probed on the terminal (adult) phase
const SKIN_INDEXES: [u32; 4] = [1, 2, 3, 4];

/// A candidate static file: human-readable label plus the URL it would
/// live at if it exists upstream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DragonStaticFile {
    pub label: String,
    pub url: String,
}

/// Progress payload for probe events
#[derive(Clone, Serialize)]
pub struct ProbeProgressPayload {
    pub message: String,
    pub current: u32,
    pub total: u32,
}

/// Probe the full candidate set for a dragon and return only the files that
/// actually exist upstream, in generation order (sprites, thumbnails, flash
/// animations, spine animations).
#[tauri::command]
pub async fn find_dragon_static_files(
    image_name: String,
    platform_prefix: PlatformPrefix,
    window: Window,
) -> Result<Vec<DragonStaticFile>, String> {
    let name_shape = Regex::new(r"^\d+_dragon_\w+$")
        .map_err(|e| format!("Invalid image name pattern: {}", e))?;
    if !name_shape.is_match(&image_name) {
        return Err(format!("Invalid dragon image name: {}", image_name));
    }

    let candidates = dragon_static_file_candidates(&image_name, platform_prefix);
    let client = Client::new();
    Ok(probe_candidates(&client, candidates, &window).await)
}

/// Cross product of the known parameter values, in the exact order the
/// results are expected back: per asset kind, all qualities/phases first,
/// then the adult-phase skin variants.
pub(crate) fn dragon_static_file_candidates(
    image_name: &str,
    platform_prefix: PlatformPrefix,
) -> Vec<DragonStaticFile> {
    let mut files = Vec::new();

    // Sprites: every quality x every phase, then every quality x adult skins
    for quality in SpriteQuality::ALL {
        for phase in DragonPhase::ALL {
            files.push(DragonStaticFile {
                label: format!("Sprite of {} (quality {})", phase.name(), quality.label()),
                url: dragons::sprite(&SpriteOptions {
                    image_name,
                    phase,
                    platform_prefix,
                    quality,
                    skin: None,
                }),
            });
        }

        for skin in SKIN_INDEXES {
            let phase = DragonPhase::Adult;
            files.push(DragonStaticFile {
                label: format!(
                    "Sprite of {} skin {} (quality {})",
                    phase.name(),
                    skin,
                    quality.label()
                ),
                url: dragons::sprite(&SpriteOptions {
                    image_name,
                    phase,
                    platform_prefix,
                    quality,
                    skin: Some(&format!("_skin{}", skin)),
                }),
            });
        }
    }

    // Thumbnails: every phase, then adult skins
    for phase in DragonPhase::ALL {
        files.push(DragonStaticFile {
            label: format!("Thumbnail of {}", phase.name()),
            url: dragons::thumbnail(&StaticFileOptions {
                image_name,
                phase,
                platform_prefix,
                skin: None,
            }),
        });
    }
    for skin in SKIN_INDEXES {
        let phase = DragonPhase::Adult;
        files.push(DragonStaticFile {
            label: format!("Thumbnail of {} skin {}", phase.name(), skin),
            url: dragons::thumbnail(&StaticFileOptions {
                image_name,
                phase,
                platform_prefix,
                skin: Some(&format!("_skin{}", skin)),
            }),
        });
    }

    // Animations: flash first, then spine, each with phases then adult skins
    for (kind, build) in [
        ("Flash", dragons::flash_animation as fn(&StaticFileOptions) -> String),
        ("Spine", dragons::spine_animation as fn(&StaticFileOptions) -> String),
    ] {
        for phase in DragonPhase::ALL {
            files.push(DragonStaticFile {
                label: format!("{} Animation of {}", kind, phase.name()),
                url: build(&StaticFileOptions {
                    image_name,
                    phase,
                    platform_prefix,
                    skin: None,
                }),
            });
        }
        for skin in SKIN_INDEXES {
            let phase = DragonPhase::Adult;
            files.push(DragonStaticFile {
                label: format!("{} Animation of {} skin {}", kind, phase.name(), skin),
                url: build(&StaticFileOptions {
                    image_name,
                    phase,
                    platform_prefix,
                    skin: Some(&format!("_skin{}", skin)),
                }),
            });
        }
    }

    files
}

/// Probe every candidate sequentially and keep the ones that answer 200.
/// A failed request and a non-200 response are treated the same: the
/// candidate is dropped without retry, so transient network errors read
/// as "does not exist".
async fn probe_candidates(
    client: &Client,
    candidates: Vec<DragonStaticFile>,
    window: &Window,
) -> Vec<DragonStaticFile> {
    let total = candidates.len() as u32;
    let mut found = Vec::new();

    for (i, candidate) in candidates.into_iter().enumerate() {
        let _ = window.emit(
            "probe-progress",
            ProbeProgressPayload {
                message: format!("Checking: {}", candidate.label),
                current: i as u32 + 1,
                total,
            },
        );

        match client
            .get(&candidate.url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
        {
            Ok(response) if response.status() == StatusCode::OK => found.push(candidate),
            _ => {}
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_set_has_full_cross_product() {
        let files = dragon_static_file_candidates("1000_dragon_nature", PlatformPrefix::Ios);
        // Sprites: 2 qualities x (4 phases + 4 skins); thumbnails and both
        // animation kinds: 4 phases + 4 skins each
        assert_eq!(files.len(), 2 * 8 + 8 + 8 + 8);
    }

    #[test]
    fn candidates_are_in_generation_order() {
        let files = dragon_static_file_candidates("1000_dragon_nature", PlatformPrefix::Ios);

        assert_eq!(files[0].label, "Sprite of Egg (quality normal)");
        assert_eq!(files[4].label, "Sprite of Adult skin 1 (quality normal)");
        assert_eq!(files[8].label, "Sprite of Egg (quality large)");
        assert_eq!(files[16].label, "Thumbnail of Egg");
        assert_eq!(files[24].label, "Flash Animation of Egg");
        assert_eq!(files[32].label, "Spine Animation of Egg");
        assert_eq!(files[39].label, "Spine Animation of Adult skin 4");
    }

    #[test]
    fn skin_candidates_target_the_adult_phase() {
        let files = dragon_static_file_candidates("1000_dragon_nature", PlatformPrefix::Ios);
        let skinned = files.iter().find(|f| f.label == "Thumbnail of Adult skin 2").unwrap();
        assert!(skinned.url.ends_with("thumb_1000_dragon_nature_3_skin2.png"));
    }

    #[test]
    fn candidate_generation_is_repeatable() {
        let first = dragon_static_file_candidates("1000_dragon_nature", PlatformPrefix::Android);
        let second = dragon_static_file_candidates("1000_dragon_nature", PlatformPrefix::Android);
        assert_eq!(first, second);
    }
}
