//! URL composition for dragon static files. Only the asset families this
//! tool actually downloads or probes are covered; everything else the CDN
//! hosts is out of scope.

use super::{base_url, DragonPhase, PlatformPrefix, SpriteQuality};
use crate::config::SPINE_VERSION_TAG;

#[derive(Debug, Clone)]
pub struct SpriteOptions<'a> {
    pub image_name: &'a str,
    pub phase: DragonPhase,
    pub platform_prefix: PlatformPrefix,
    pub quality: SpriteQuality,
    /// Raw skin suffix as it appears in file names, e.g. "_skin2"
    pub skin: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct StaticFileOptions<'a> {
    pub image_name: &'a str,
    pub phase: DragonPhase,
    pub platform_prefix: PlatformPrefix,
    pub skin: Option<&'a str>,
}

/// In-game sprite sheet image
pub fn sprite(options: &SpriteOptions) -> String {
    format!(
        "{}/mobile/ui/dragons/ui_{}_{}{}{}.png",
        base_url(options.platform_prefix),
        options.image_name,
        options.phase.number(),
        options.skin.unwrap_or(""),
        options.quality.suffix()
    )
}

/// Small thumbnail shown in lists and the breeding UI
pub fn thumbnail(options: &StaticFileOptions) -> String {
    format!(
        "{}/mobile/ui/dragons/HD/thumb_{}_{}{}.png",
        base_url(options.platform_prefix),
        options.image_name,
        options.phase.number(),
        options.skin.unwrap_or("")
    )
}

/// Legacy flash animation (.swf) from the browser version of the game
pub fn flash_animation(options: &StaticFileOptions) -> String {
    format!(
        "{}/assets/sprites/{}_{}{}.swf",
        base_url(options.platform_prefix),
        options.image_name,
        options.phase.number(),
        options.skin.unwrap_or("")
    )
}

/// Spine skeletal animation bundle (zip of texture + atlas + skel),
/// tagged with the export version the converter expects
pub fn spine_animation(options: &StaticFileOptions) -> String {
    format!(
        "{}/mobile/assets/dragons/{}_{}{}_{}.zip",
        base_url(options.platform_prefix),
        options.image_name,
        options.phase.number(),
        options.skin.unwrap_or(""),
        SPINE_VERSION_TAG
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_url_matches_known_asset() {
        let url = thumbnail(&StaticFileOptions {
            image_name: "1815_dragon_tailwind",
            phase: DragonPhase::Adult,
            platform_prefix: PlatformPrefix::Ios,
            skin: None,
        });
        assert_eq!(
            url,
            "https://dci-static-s1.socialpointgames.com/static/dragoncity/mobile/ui/dragons/HD/thumb_1815_dragon_tailwind_3.png"
        );
    }

    #[test]
    fn flash_url_matches_known_asset() {
        let url = flash_animation(&StaticFileOptions {
            image_name: "1000_dragon_nature",
            phase: DragonPhase::Baby,
            platform_prefix: PlatformPrefix::Ios,
            skin: None,
        });
        assert_eq!(
            url,
            "https://dci-static-s1.socialpointgames.com/static/dragoncity/assets/sprites/1000_dragon_nature_1.swf"
        );
    }

    #[test]
    fn sprite_url_appends_skin_and_quality_suffixes() {
        let url = sprite(&SpriteOptions {
            image_name: "1000_dragon_nature",
            phase: DragonPhase::Adult,
            platform_prefix: PlatformPrefix::Ios,
            quality: SpriteQuality::Large,
            skin: Some("_skin2"),
        });
        assert!(url.ends_with("/mobile/ui/dragons/ui_1000_dragon_nature_3_skin2@2x.png"));
    }

    #[test]
    fn spine_url_carries_version_tag() {
        let url = spine_animation(&StaticFileOptions {
            image_name: "1000_dragon_nature",
            phase: DragonPhase::Egg,
            platform_prefix: PlatformPrefix::Android,
            skin: None,
        });
        assert_eq!(
            url,
            "https://dci-static-s2.socialpointgames.com/static/dragoncity/mobile/assets/dragons/1000_dragon_nature_0_spine-3-8-59_dxt5.zip"
        );
    }
}
