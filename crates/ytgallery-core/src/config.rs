//! Player and gallery configuration.
//!
//! [`PlayerConfig`] is always fully populated: callers supply a partial
//! [`PlayerConfigOverrides`] which is shallow-merged over the defaults.
//! [`create_config_for_yt_player`] is the only place that knows the iframe
//! API's parameter names.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Playback quality tier.
///
/// Unknown tiers are kept verbatim and passed through to the player.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Quality {
    /// Let the player pick.
    #[default]
    Default,
    /// At most 640x360.
    Small,
    /// At least 640x360.
    Medium,
    /// At least 854x480.
    Large,
    /// At least 1280x720.
    Hd720,
    /// Any other tier name.
    Other(String),
}

impl Quality {
    /// The literal name the iframe API expects.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => "default",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Hd720 => "hd720",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for Quality {
    fn from(value: &str) -> Self {
        match value {
            "default" => Self::Default,
            "small" => Self::Small,
            "medium" => Self::Medium,
            "large" => Self::Large,
            "hd720" => Self::Hd720,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Quality {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Quality> for String {
    fn from(value: Quality) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player chrome theme.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark theme (default).
    #[default]
    Dark,
    /// Light theme.
    Light,
}

impl Theme {
    /// The literal name the iframe API expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A player width or height: pixels, or any CSS length such as `"100%"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    /// Size in pixels.
    Pixels(u32),
    /// CSS length string.
    Css(String),
}

impl Dimension {
    fn validate(&self, field: &'static str) -> Result<()> {
        match self {
            Self::Pixels(0) => Err(Error::InvalidConfig {
                field,
                reason: "must be greater than zero".to_string(),
            }),
            Self::Css(value) if value.trim().is_empty() => Err(Error::InvalidConfig {
                field,
                reason: "must not be empty".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl From<u32> for Dimension {
    fn from(value: u32) -> Self {
        Self::Pixels(value)
    }
}

impl From<&str> for Dimension {
    fn from(value: &str) -> Self {
        Self::Css(value.to_string())
    }
}

/// Default player width in pixels.
pub const DEFAULT_WIDTH: u32 = 450;
/// Default player height in pixels.
pub const DEFAULT_HEIGHT: u32 = 390;

/// Fully populated player configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerConfig {
    /// Player width.
    pub width: Dimension,
    /// Player height.
    pub height: Dimension,
    /// Video cued when the player is created.
    pub video_id: Option<String>,
    /// Start playback as soon as the initial video is cued.
    pub auto_play: bool,
    /// Hide the controls once playback starts.
    pub auto_hide: bool,
    /// Show the control bar.
    pub show_controls: bool,
    /// Show the title and uploader overlay.
    pub show_info: bool,
    /// Show related videos when playback ends.
    pub show_related_videos: bool,
    /// Preferred playback quality.
    pub quality: Quality,
    /// Start offset in seconds.
    pub start_time: u32,
    /// Suppress the provider logo.
    pub disable_branding: bool,
    /// Prefer inline playback on touch devices.
    pub inline_playback: bool,
    /// Player chrome theme.
    pub theme: Theme,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: Dimension::Pixels(DEFAULT_WIDTH),
            height: Dimension::Pixels(DEFAULT_HEIGHT),
            video_id: None,
            auto_play: false,
            auto_hide: false,
            show_controls: true,
            show_info: true,
            show_related_videos: false,
            quality: Quality::Default,
            start_time: 0,
            disable_branding: true,
            inline_playback: false,
            theme: Theme::Dark,
        }
    }
}

/// Partial player configuration supplied by callers.
///
/// Every present field replaces the matching default in [`PlayerConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlayerConfigOverrides {
    /// Player width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    /// Player height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
    /// Video cued when the player is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    /// Start playback as soon as the initial video is cued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_play: Option<bool>,
    /// Hide the controls once playback starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_hide: Option<bool>,
    /// Show the control bar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_controls: Option<bool>,
    /// Show the title and uploader overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_info: Option<bool>,
    /// Show related videos when playback ends.
    #[serde(
        default,
        alias = "showRelativeVideos",
        skip_serializing_if = "Option::is_none"
    )]
    pub show_related_videos: Option<bool>,
    /// Preferred playback quality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
    /// Start offset in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u32>,
    /// Suppress the provider logo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_branding: Option<bool>,
    /// Prefer inline playback on touch devices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_playback: Option<bool>,
    /// Player chrome theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl PlayerConfigOverrides {
    /// Parse overrides from camelCase JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Configuration(format!("Failed to parse player config: {e}")))
    }

    /// Set the width.
    #[must_use]
    pub fn with_width(mut self, width: impl Into<Dimension>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Set the height.
    #[must_use]
    pub fn with_height(mut self, height: impl Into<Dimension>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// Set the initial video.
    #[must_use]
    pub fn with_video_id(mut self, video_id: impl Into<String>) -> Self {
        self.video_id = Some(video_id.into());
        self
    }

    /// Layer these overrides over `base`; present fields win.
    #[must_use]
    pub fn over(self, base: Self) -> Self {
        Self {
            width: self.width.or(base.width),
            height: self.height.or(base.height),
            video_id: self.video_id.or(base.video_id),
            auto_play: self.auto_play.or(base.auto_play),
            auto_hide: self.auto_hide.or(base.auto_hide),
            show_controls: self.show_controls.or(base.show_controls),
            show_info: self.show_info.or(base.show_info),
            show_related_videos: self.show_related_videos.or(base.show_related_videos),
            quality: self.quality.or(base.quality),
            start_time: self.start_time.or(base.start_time),
            disable_branding: self.disable_branding.or(base.disable_branding),
            inline_playback: self.inline_playback.or(base.inline_playback),
            theme: self.theme.or(base.theme),
        }
    }
}

impl PlayerConfig {
    /// Build a config by merging overrides over the defaults, then validate it.
    pub fn from_overrides(overrides: PlayerConfigOverrides) -> Result<Self> {
        let config = Self::default().merge(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Shallow-merge overrides over this config.
    #[must_use]
    pub fn merge(self, overrides: PlayerConfigOverrides) -> Self {
        Self {
            width: overrides.width.unwrap_or(self.width),
            height: overrides.height.unwrap_or(self.height),
            video_id: overrides.video_id.or(self.video_id),
            auto_play: overrides.auto_play.unwrap_or(self.auto_play),
            auto_hide: overrides.auto_hide.unwrap_or(self.auto_hide),
            show_controls: overrides.show_controls.unwrap_or(self.show_controls),
            show_info: overrides.show_info.unwrap_or(self.show_info),
            show_related_videos: overrides
                .show_related_videos
                .unwrap_or(self.show_related_videos),
            quality: overrides.quality.unwrap_or(self.quality),
            start_time: overrides.start_time.unwrap_or(self.start_time),
            disable_branding: overrides.disable_branding.unwrap_or(self.disable_branding),
            inline_playback: overrides.inline_playback.unwrap_or(self.inline_playback),
            theme: overrides.theme.unwrap_or(self.theme),
        }
    }

    /// Check dimensions and the initial video id.
    pub fn validate(&self) -> Result<()> {
        self.width.validate("width")?;
        self.height.validate("height")?;

        if let Some(video_id) = &self.video_id {
            if video_id.is_empty() {
                return Err(Error::InvalidConfig {
                    field: "videoId",
                    reason: "must not be empty".to_string(),
                });
            }
            if !video_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                return Err(Error::InvalidConfig {
                    field: "videoId",
                    reason: format!("contains invalid characters: {video_id}"),
                });
            }
        }

        Ok(())
    }
}

/// Parameters passed to `new YT.Player(elem, config)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YtPlayerConfig {
    /// Player width.
    pub width: Dimension,
    /// Player height.
    pub height: Dimension,
    /// Initial video.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    /// Low-level player parameters.
    pub player_vars: YtPlayerVars,
}

/// The iframe API's `playerVars` block. Flags are `0` or `1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YtPlayerVars {
    /// Suggested quality.
    pub vq: String,
    /// Related videos.
    pub rel: u8,
    /// Autoplay.
    pub autoplay: u8,
    /// Control bar.
    pub controls: u8,
    /// Info overlay.
    pub showinfo: u8,
    /// Auto-hide controls.
    pub autohide: u8,
    /// Start offset in seconds.
    pub start: u32,
    /// Modest branding.
    pub modestbranding: u8,
    /// Inline playback on touch devices.
    pub playsinline: u8,
    /// Chrome theme.
    pub theme: String,
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

/// Translate a [`PlayerConfig`] into the iframe API's parameter vocabulary.
#[must_use]
pub fn create_config_for_yt_player(config: &PlayerConfig) -> YtPlayerConfig {
    YtPlayerConfig {
        width: config.width.clone(),
        height: config.height.clone(),
        video_id: config.video_id.clone(),
        player_vars: YtPlayerVars {
            vq: config.quality.as_str().to_string(),
            rel: flag(config.show_related_videos),
            autoplay: flag(config.auto_play),
            controls: flag(config.show_controls),
            showinfo: flag(config.show_info),
            autohide: flag(config.auto_hide),
            start: config.start_time,
            modestbranding: flag(config.disable_branding),
            playsinline: flag(config.inline_playback),
            theme: config.theme.as_str().to_string(),
        },
    }
}

/// Bootstrap configuration for a gallery page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryConfig {
    /// Id of the element hosting the navigation tree.
    pub gallery_element_id: String,
    /// Id of the element the player mounts into.
    pub player_element_id: String,
    /// Id of the element showing the selected video's description.
    pub description_element_id: Option<String>,
    /// Where the video catalog JSON is fetched from.
    pub data_url: String,
    /// Player overrides applied on top of the player defaults.
    ///
    /// Page JSON is layered over the gallery's own player defaults.
    #[serde(deserialize_with = "gallery_player_overrides")]
    pub player: PlayerConfigOverrides,
    /// Open external links in a new browsing context.
    pub open_external_in_new_context: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            gallery_element_id: "video-gallery".to_string(),
            player_element_id: "video-player".to_string(),
            description_element_id: Some("video-description".to_string()),
            data_url: "/data/videos.json".to_string(),
            player: PlayerConfigOverrides::default()
                .with_width("100%")
                .with_height(480)
                .with_video_id("viiDaLpPfN4"),
            open_external_in_new_context: true,
        }
    }
}

fn gallery_player_overrides<'de, D>(
    deserializer: D,
) -> std::result::Result<PlayerConfigOverrides, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let page = PlayerConfigOverrides::deserialize(deserializer)?;
    Ok(page.over(GalleryConfig::default().player))
}

impl GalleryConfig {
    /// Parse a gallery config; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Configuration(format!("Failed to parse gallery config: {e}")))?;
        debug!(
            "Gallery config: root={}, player={}, data={}",
            config.gallery_element_id, config.player_element_id, config.data_url
        );
        Ok(config)
    }

    /// The merged, validated player config for this gallery.
    pub fn player_config(&self) -> Result<PlayerConfig> {
        PlayerConfig::from_overrides(self.player.clone())
    }
}
