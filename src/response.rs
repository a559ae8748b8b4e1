use crate::error::Result;
use serde::Deserialize;

/// Body returned by the shrink endpoint, e.g.
/// `{"input":{"size":30761,"type":"image/jpeg"},"output":{"size":25691,"type":"image/jpeg","width":400,"height":400,"ratio":0.8352,"url":"https://..."}}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShrinkResponse {
    #[serde(default)]
    pub input: Option<InputInfo>,
    pub output: OutputInfo,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InputInfo {
    pub size: Option<u64>,
    #[serde(rename = "type")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutputInfo {
    pub url: String,
    /// Optimized size divided by original size.
    pub ratio: f64,
    pub size: Option<u64>,
    #[serde(rename = "type")]
    pub mime_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ShrinkResponse {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Percentage saved, rounded half up: ratio 0.755 gives 25.
    pub fn saved_percent(&self) -> i64 {
        saved_percent(self.output.ratio)
    }
}

/// Rounds half up (toward positive infinity), so a file that grew by
/// exactly 37.5% reports -37, not -38.
pub fn saved_percent(ratio: f64) -> i64 {
    (100.0 * (1.0 - ratio) + 0.5).floor() as i64
}
