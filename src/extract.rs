use crate::error::{Result, VastError};
use crate::models::*;
use crate::tree::{self, normalize_to_sequence, Node, Value};
use log::{debug, warn};

/// Decode a VAST XML string and extract its first linear creative
pub fn parse_vast(xml: &str) -> Result<AdCreative> {
    let document = tree::parse_document(xml)?;
    extract(&document)
}

/// Extract the first linear creative from a decoded VAST tree.
///
/// Missing `VAST`, `Ad`, `InLine` or `Creatives` elements degrade to empty
/// nodes so every field falls back to its default. The only hard failure is a
/// document without any `Linear` creative; a node of the wrong shape on the
/// path is reported as a parsing error.
pub fn extract(document: &Node) -> Result<AdCreative> {
    let empty = Node::default();

    let vast = child_node(document, "VAST")?.unwrap_or(&empty);

    let ads = normalize_to_sequence(vast.get("Ad"));
    if ads.len() > 1 {
        warn!("VAST document holds {} ads, inspecting the first", ads.len());
    }
    let ad = match ads.first().copied() {
        Some(value) => expect_node(value, "Ad")?.unwrap_or(&empty),
        None => &empty,
    };

    let inline = child_node(ad, "InLine")?.unwrap_or(&empty);
    if inline.is_empty() && ad.contains_key("Wrapper") {
        debug!("Ad is a Wrapper without InLine content, wrapper chains are not followed");
    }

    let creatives = child_node(inline, "Creatives")?.unwrap_or(&empty);
    let linear = find_linear(creatives)?.ok_or(VastError::NoLinearCreative)?;

    let media_files: Vec<MediaFileVariant> = match child_node(linear, "MediaFiles")? {
        Some(media) => normalize_to_sequence(media.get("MediaFile"))
            .into_iter()
            .map(media_file_variant)
            .collect(),
        None => Vec::new(),
    };
    debug!("Linear creative carries {} media files", media_files.len());

    let impressions = normalize_to_sequence(inline.get("Impression"))
        .into_iter()
        .map(impression)
        .collect();

    Ok(AdCreative {
        version: vast.attr("version").unwrap_or(UNKNOWN).to_string(),
        title: scalar(inline, "AdTitle").unwrap_or(UNKNOWN).to_string(),
        description: scalar(inline, "Description").unwrap_or_default().to_string(),
        duration: scalar(linear, "Duration").unwrap_or(ZERO_DURATION).to_string(),
        media_files,
        impressions,
    })
}

/// Find the first creative carrying a non-empty `Linear` element
fn find_linear(creatives: &Node) -> Result<Option<&Node>> {
    for creative in normalize_to_sequence(creatives.get("Creative")) {
        let Some(creative) = creative.as_node() else {
            continue;
        };
        if creative.contains_key("Linear") {
            return Ok(child_node(creative, "Linear")?.filter(|linear| !linear.is_empty()));
        }
    }

    Ok(None)
}

/// Read a child that must be a single element; `None` when absent or empty
fn child_node<'a>(node: &'a Node, key: &str) -> Result<Option<&'a Node>> {
    match node.get(key) {
        Some(value) => expect_node(value, key),
        None => Ok(None),
    }
}

fn expect_node<'a>(value: &'a Value, key: &str) -> Result<Option<&'a Node>> {
    match value {
        Value::Node(node) => Ok(Some(node)),
        Value::Null => Ok(None),
        Value::Text(_) => Err(VastError::Malformed(format!(
            "<{}> holds text where child elements were expected",
            key
        ))),
        Value::List(items) => Err(VastError::Malformed(format!(
            "<{}> appears {} times where a single element was expected",
            key,
            items.len()
        ))),
    }
}

/// Text of a child element, using the first occurrence when it repeats
fn scalar<'a>(node: &'a Node, key: &str) -> Option<&'a str> {
    normalize_to_sequence(node.get(key))
        .first()
        .copied()
        .and_then(Value::as_text)
}

fn media_file_variant(value: &Value) -> MediaFileVariant {
    match value {
        Value::Node(node) => MediaFileVariant {
            mime_type: node.attr("type").map(str::to_string),
            bitrate: node.attr("bitrate").map(str::to_string),
            width: node.attr("width").map(str::to_string),
            height: node.attr("height").map(str::to_string),
            url: node.text().map(str::to_string),
        },
        other => MediaFileVariant {
            url: other.as_text().map(str::to_string),
            ..MediaFileVariant::default()
        },
    }
}

fn impression(value: &Value) -> Impression {
    Impression {
        id: value
            .as_node()
            .and_then(|node| node.attr("id"))
            .map(str::to_string),
        url: value.as_text().map(str::to_string),
    }
}
