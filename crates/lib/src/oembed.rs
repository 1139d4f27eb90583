//! # oEmbed Documents
//!
//! The extracted metadata record and its two wire encodings. Field order in
//! both encodings follows the struct declaration order below.

use crate::errors::OembedError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Metadata scraped for a single slide page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OembedResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub author_name: String,
    pub author_url: String,
    pub provider_name: String,
    pub provider_url: String,
    /// Image of the requested slide.
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Json,
    Xml,
}

impl Format {
    pub fn content_type(self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Xml => "application/xml",
        }
    }

    /// Picks the requested format: an explicit parameter wins over the path
    /// suffix, and JSON is used when neither is given.
    pub fn resolve(explicit: Option<&str>, path_suffix: Option<&str>) -> Result<Self, OembedError> {
        match explicit.or(path_suffix) {
            Some(name) => name.parse(),
            None => Ok(Format::default()),
        }
    }
}

impl FromStr for Format {
    type Err = OembedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Format::Json),
            "xml" => Ok(Format::Xml),
            other => Err(OembedError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::Xml => write!(f, "xml"),
        }
    }
}

/// A serialized document ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedResponse {
    pub content_type: &'static str,
    pub body: String,
}

impl OembedResponse {
    pub fn encode(&self, format: Format) -> Result<EncodedResponse, OembedError> {
        let body = match format {
            Format::Json => serde_json::to_string(self)?,
            Format::Xml => {
                let xml = quick_xml::se::to_string_with_root("oembed", self)
                    .map_err(|e| OembedError::Encode(e.to_string()))?;
                format!("{XML_DECLARATION}\n{xml}")
            }
        };
        Ok(EncodedResponse {
            content_type: format.content_type(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OembedResponse {
        OembedResponse {
            kind: "rich".to_string(),
            version: "1.0".to_string(),
            author_name: "tily".to_string(),
            author_url: "http://www.slideshare.net/tily".to_string(),
            provider_name: "SlideShare".to_string(),
            provider_url: "http://www.slideshare.net".to_string(),
            url: "http://img.example/1.jpg?a=1&b=2".to_string(),
            width: 638,
            height: 442,
            title: "Rust <3 & friends".to_string(),
            description: "Slides".to_string(),
        }
    }

    #[test]
    fn test_json_keys_are_ordered() {
        let encoded = sample().encode(Format::Json).unwrap();
        assert_eq!(encoded.content_type, "application/json");
        let keys = [
            "type",
            "version",
            "author_name",
            "author_url",
            "provider_name",
            "provider_url",
            "url",
            "width",
            "height",
            "title",
            "description",
        ];
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| encoded.body.find(&format!("\"{k}\":")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let parsed: OembedResponse = serde_json::from_str(&encoded.body).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_xml_has_declaration_root_and_order() {
        let encoded = sample().encode(Format::Xml).unwrap();
        assert_eq!(encoded.content_type, "application/xml");
        assert!(encoded.body.starts_with(XML_DECLARATION));
        assert!(encoded.body.contains("<oembed><type>rich</type><version>1.0</version>"));
        assert!(encoded.body.trim_end().ends_with("</oembed>"));
        assert!(encoded.body.contains("&amp;b=2"));
        assert!(
            encoded.body.find("<width>638</width>").unwrap()
                < encoded.body.find("<height>442</height>").unwrap()
        );

        let xml = encoded.body.trim_start_matches(XML_DECLARATION);
        let parsed: OembedResponse = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_format_resolution() {
        assert_eq!(Format::resolve(None, None).unwrap(), Format::Json);
        assert_eq!(Format::resolve(None, Some("xml")).unwrap(), Format::Xml);
        assert_eq!(Format::resolve(Some("json"), Some("xml")).unwrap(), Format::Json);
        assert!(matches!(
            Format::resolve(Some("yaml"), Some("json")),
            Err(OembedError::UnsupportedFormat(f)) if f == "yaml"
        ));
        assert!(matches!(
            Format::resolve(Some(""), None),
            Err(OembedError::UnsupportedFormat(_))
        ));
    }
}
