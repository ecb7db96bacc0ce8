//! One analysis: fetch a VAST document, extract its linear creative and
//! derive what the report shows.
use crate::error::{Result, VastError};
use crate::extract;
use crate::fetch::{self, FetchConfig};
use crate::media;
use crate::models::{AdCreative, MediaRow};
use log::debug;

/// Everything derived from a successfully extracted creative
#[derive(Debug, Clone, PartialEq)]
pub struct Findings {
    pub creative: AdCreative,
    pub playable_url: Option<String>,
    pub rows: Vec<MediaRow>,
}

impl Findings {
    pub fn from_creative(creative: AdCreative) -> Self {
        let playable_url = media::select_playable(&creative.media_files).map(str::to_string);
        let rows = media::to_rows(&creative.media_files);
        Findings {
            creative,
            playable_url,
            rows,
        }
    }
}

/// The result of inspecting one fetched document.
///
/// The raw XML is kept even when extraction fails so it can still be shown.
#[derive(Debug)]
pub struct Inspection {
    pub source: String,
    pub raw_xml: String,
    pub outcome: Result<Findings>,
}

impl Inspection {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&VastError> {
        self.outcome.as_ref().err()
    }
}

/// Inspect an already fetched document
pub fn inspect_xml(source: impl Into<String>, raw_xml: String) -> Inspection {
    let outcome = extract::parse_vast(&raw_xml).map(Findings::from_creative);
    if let Err(e) = &outcome {
        debug!("Extraction failed: {}", e);
    }

    Inspection {
        source: source.into(),
        raw_xml,
        outcome,
    }
}

/// Fetch and inspect a VAST tag.
///
/// A fetch failure is returned as `Err`; extraction failures are carried in
/// the returned `Inspection`.
pub async fn inspect(url_or_path: &str, config: &FetchConfig) -> Result<Inspection> {
    let raw_xml = fetch::fetch_vast_content_async(url_or_path, config).await?;
    Ok(inspect_xml(url_or_path, raw_xml))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_extraction_keeps_raw_document() {
        let raw = "<VAST version=\"3.0\"><Ad><InLine/></Ad></VAST>".to_string();
        let inspection = inspect_xml("memory", raw.clone());

        assert!(!inspection.is_success());
        assert_eq!(inspection.raw_xml, raw);
        assert!(matches!(inspection.error(), Some(VastError::NoLinearCreative)));
    }

    #[test]
    fn findings_combine_selection_and_rows() {
        let raw = r#"<VAST version="4.1"><Ad><InLine><Creatives><Creative><Linear>
              <MediaFiles>
                <MediaFile type="video/webm">https://cdn.example.com/a.webm</MediaFile>
                <MediaFile type="video/mp4">https://cdn.example.com/b.mp4</MediaFile>
              </MediaFiles>
            </Linear></Creative></Creatives></InLine></Ad></VAST>"#;
        let inspection = inspect_xml("memory", raw.to_string());
        let findings = inspection.outcome.as_ref().unwrap();

        assert_eq!(findings.creative.version, "4.1");
        assert_eq!(findings.playable_url.as_deref(), Some("https://cdn.example.com/b.mp4"));
        assert_eq!(findings.rows.len(), 2);
        assert_eq!(inspection.source, "memory");
    }

    #[tokio::test]
    async fn fetch_failure_skips_extraction() {
        let err = inspect("file:///no/such/vast.xml", &FetchConfig::default())
            .await
            .unwrap_err();
        assert!(err.is_fetch_error());
    }
}
