//! Whole-document reformatting for structured file types.

use crate::error::FormatError;

/// Structured formats that can be reformatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
    /// `.hcl` / `.tf`
    Hcl,
}

impl FormatKind {
    /// Pick a formatter from a file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Result<Self, FormatError> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "hcl" | "tf" => Ok(Self::Hcl),
            _ => Err(FormatError::Unsupported(ext.to_string())),
        }
    }

    /// Human-readable name for status messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Hcl => "HCL",
        }
    }

    /// Reformat `text`. Key order is preserved; the output has no trailing newline.
    pub fn format(self, text: &str) -> Result<String, FormatError> {
        match self {
            Self::Json => {
                let value: serde_json::Value = serde_json::from_str(text)?;
                Ok(serde_json::to_string_pretty(&value)?)
            }
            Self::Yaml => {
                let value: serde_yaml::Value = serde_yaml::from_str(text)?;
                let out = serde_yaml::to_string(&value)?;
                Ok(out.trim_end_matches('\n').to_string())
            }
            Self::Hcl => {
                let body = hcl::parse(text)?;
                let out = hcl::format::to_string(&body)?;
                Ok(out.trim_end_matches('\n').to_string())
            }
        }
    }
}
