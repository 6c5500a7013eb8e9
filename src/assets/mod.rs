pub mod dragons;

use serde::{Deserialize, Serialize};

use crate::config::{STATIC_BASE_PATH, STATIC_CDN_HOST};

/// CDN origin variant to build static file URLs against. The wire value is
/// the subdomain prefix of the static host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformPrefix {
    #[serde(rename = "dci-static-s1")]
    Ios,
    #[serde(rename = "dci-static-s2")]
    Android,
}

impl PlatformPrefix {
    pub fn subdomain(&self) -> &'static str {
        match self {
            PlatformPrefix::Ios => "dci-static-s1",
            PlatformPrefix::Android => "dci-static-s2",
        }
    }
}

impl Default for PlatformPrefix {
    fn default() -> Self {
        PlatformPrefix::Ios
    }
}

/// Dragon growth stage, encoded as 0-3 in asset file names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragonPhase {
    Egg,
    Baby,
    Young,
    Adult,
}

impl DragonPhase {
    pub const ALL: [DragonPhase; 4] = [
        DragonPhase::Egg,
        DragonPhase::Baby,
        DragonPhase::Young,
        DragonPhase::Adult,
    ];

    pub fn number(&self) -> u8 {
        match self {
            DragonPhase::Egg => 0,
            DragonPhase::Baby => 1,
            DragonPhase::Young => 2,
            DragonPhase::Adult => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DragonPhase::Egg => "Egg",
            DragonPhase::Baby => "Baby",
            DragonPhase::Young => "Young",
            DragonPhase::Adult => "Adult",
        }
    }
}

impl TryFrom<u8> for DragonPhase {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DragonPhase::Egg),
            1 => Ok(DragonPhase::Baby),
            2 => Ok(DragonPhase::Young),
            3 => Ok(DragonPhase::Adult),
            other => Err(format!("Unknown dragon phase: {}", other)),
        }
    }
}

/// Sprite resolution variant. `Large` maps to the retina "@2x" file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpriteQuality {
    Normal,
    Large,
}

impl SpriteQuality {
    pub const ALL: [SpriteQuality; 2] = [SpriteQuality::Normal, SpriteQuality::Large];

    /// File name suffix inserted before the extension
    pub fn suffix(&self) -> &'static str {
        match self {
            SpriteQuality::Normal => "",
            SpriteQuality::Large => "@2x",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpriteQuality::Normal => "normal",
            SpriteQuality::Large => "large",
        }
    }
}

/// Root of all static asset URLs for the given CDN variant
pub fn base_url(platform_prefix: PlatformPrefix) -> String {
    format!(
        "https://{}.{}/{}",
        platform_prefix.subdomain(),
        STATIC_CDN_HOST,
        STATIC_BASE_PATH
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_selects_platform_subdomain() {
        assert_eq!(
            base_url(PlatformPrefix::Ios),
            "https://dci-static-s1.socialpointgames.com/static/dragoncity"
        );
        assert_eq!(
            base_url(PlatformPrefix::Android),
            "https://dci-static-s2.socialpointgames.com/static/dragoncity"
        );
    }

    #[test]
    fn platform_prefix_deserializes_from_wire_value() {
        let prefix: PlatformPrefix = serde_json::from_str("\"dci-static-s1\"").unwrap();
        assert_eq!(prefix, PlatformPrefix::Ios);
    }

    #[test]
    fn phase_round_trips_through_number() {
        for phase in DragonPhase::ALL {
            assert_eq!(DragonPhase::try_from(phase.number()).unwrap(), phase);
        }
        assert!(DragonPhase::try_from(4).is_err());
    }
}
