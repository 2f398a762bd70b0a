use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Context as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::foundation::error::{MockError, MockResult};

/// A web-app manifest, as far as the preview cares.
///
/// Every field is optional. A known field holding the wrong JSON type reads as absent
/// rather than failing the whole document, and unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Full application name.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Short name used where space is limited.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Free-text description.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Launch URL.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub start_url: Option<String>,
    /// Icons in document order.
    #[serde(deserialize_with = "lenient_icons", skip_serializing_if = "Vec::is_empty")]
    pub icons: Vec<ManifestIcon>,
    /// Browser UI tint.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
    /// Splash screen background.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Display mode (`standalone`, `fullscreen`, ...).
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// Preferred orientation.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
}

/// One entry of `Manifest::icons`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    /// Icon URL, usually relative to the manifest.
    pub src: String,
    /// Space-separated `WxH` list, e.g. `"192x192"`.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    /// MIME type hint.
    #[serde(
        default,
        rename = "type",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub mime_type: Option<String>,
    /// `any`, `maskable`, `monochrome`.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl ManifestIcon {
    /// Build an icon entry from a `src` and optional `sizes`.
    pub fn new(src: impl Into<String>, sizes: Option<&str>) -> Self {
        Self {
            src: src.into(),
            sizes: sizes.map(str::to_owned),
            ..Self::default()
        }
    }

    /// The leading width of `sizes`: the digits before the first `x`.
    ///
    /// Leading whitespace and one `+` sign are skipped and trailing junk after the digits
    /// is ignored, so `"192x192"`, `"+192x192"` and `"512x512 192x192"` give 192, 192
    /// and 512. Missing or digit-less sizes (`"any"`) give 0.
    pub fn leading_size(&self) -> u64 {
        let Some(sizes) = self.sizes.as_deref() else {
            return 0;
        };
        let head = sizes.split('x').next().unwrap_or_default().trim_start();
        let head = head.strip_prefix('+').unwrap_or(head);
        let digits_end = head
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(head.len());
        head[..digits_end].parse::<u64>().unwrap_or(match digits_end {
            0 => 0,
            _ => u64::MAX,
        })
    }
}

impl Manifest {
    /// Parse manifest text.
    ///
    /// Syntax errors come back as [`MockError::Parse`] carrying the parser's message.
    /// Valid JSON that is not an object is also a parse error.
    pub fn from_json_str(raw: &str) -> MockResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| MockError::parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Parse a manifest from a JSON reader.
    pub fn from_reader<R: Read>(r: R) -> MockResult<Self> {
        let value: serde_json::Value =
            serde_json::from_reader(r).map_err(|e| MockError::parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Parse a manifest from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> MockResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open manifest '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    fn from_value(value: serde_json::Value) -> MockResult<Self> {
        if !value.is_object() {
            return Err(MockError::parse(format!(
                "manifest root must be a JSON object, found {}",
                json_kind(&value)
            )));
        }
        serde_json::from_value(value).map_err(|e| MockError::parse(e.to_string()))
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_icons<'de, D>(deserializer: D) -> Result<Vec<ManifestIcon>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/model.rs"]
mod tests;
