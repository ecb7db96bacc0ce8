use serde::{Deserialize, Serialize};

/// Fallback for the VAST version and the ad title
pub const UNKNOWN: &str = "Unknown";

/// Fallback for a linear creative without a `Duration`
pub const ZERO_DURATION: &str = "00:00:00";

/// The normalized view of the first linear creative of a VAST document
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct AdCreative {
    /// The VAST version (e.g., "2.0", "3.0", "4.0", etc.)
    pub version: String,

    /// The ad title
    pub title: String,

    /// The description of the ad
    pub description: String,

    /// The duration of the linear creative, kept verbatim as `HH:MM:SS`
    pub duration: String,

    /// Media file renditions, in document order
    pub media_files: Vec<MediaFileVariant>,

    /// Impression tracking URLs, in document order
    pub impressions: Vec<Impression>,
}

impl Default for AdCreative {
    fn default() -> Self {
        AdCreative {
            version: UNKNOWN.to_string(),
            title: UNKNOWN.to_string(),
            description: String::new(),
            duration: ZERO_DURATION.to_string(),
            media_files: Vec::new(),
            impressions: Vec::new(),
        }
    }
}

/// One encoded rendition of the linear creative.
///
/// Attributes are kept as text; a missing attribute is `None`, never an empty string.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct MediaFileVariant {
    /// The media file MIME type (`@type`)
    pub mime_type: Option<String>,

    /// The media file bitrate (`@bitrate`)
    pub bitrate: Option<String>,

    /// The media file width (`@width`)
    pub width: Option<String>,

    /// The media file height (`@height`)
    pub height: Option<String>,

    /// The media file URL (element text)
    pub url: Option<String>,
}

/// Represents an impression tracking URL
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct Impression {
    /// The impression ID
    pub id: Option<String>,

    /// The impression tracking URL
    pub url: Option<String>,
}

/// One row of the media files technical table
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct MediaRow {
    #[serde(rename = "Type")]
    pub r#type: Option<String>,

    #[serde(rename = "Bitrate")]
    pub bitrate: Option<String>,

    #[serde(rename = "Width")]
    pub width: Option<String>,

    #[serde(rename = "Height")]
    pub height: Option<String>,

    #[serde(rename = "URL")]
    pub url: Option<String>,
}

impl MediaRow {
    pub const HEADERS: [&'static str; 5] = ["Type", "Bitrate", "Width", "Height", "URL"];

    /// Cells in `HEADERS` order.
    pub fn cells(&self) -> [Option<&str>; 5] {
        [
            self.r#type.as_deref(),
            self.bitrate.as_deref(),
            self.width.as_deref(),
            self.height.as_deref(),
            self.url.as_deref(),
        ]
    }
}

impl From<&MediaFileVariant> for MediaRow {
    fn from(variant: &MediaFileVariant) -> Self {
        MediaRow {
            r#type: variant.mime_type.clone(),
            bitrate: variant.bitrate.clone(),
            width: variant.width.clone(),
            height: variant.height.clone(),
            url: variant.url.clone(),
        }
    }
}
