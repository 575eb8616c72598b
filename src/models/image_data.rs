use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the inference results file, keyed by image id.
///
/// Field names follow the dataset file verbatim. A `null` (or missing)
/// contact list means the model produced no contacts for the image.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub image_id: String,
    pub original_semantic_contacts: Vec<String>,
    #[serde(default)]
    pub llama4_scout_inference_contacts: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub llama4_scout_inference_raw: String,
    #[serde(default)]
    pub gemini_inference_contacts: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub gemini_inference_raw: String,
}

impl ImageData {
    /// Ground truth only, no inference results.
    pub fn new(image_id: &str, original: Vec<String>) -> Self {
        Self {
            image_id: image_id.to_string(),
            original_semantic_contacts: original,
            ..Default::default()
        }
    }

    pub fn with_llama4_scout(mut self, contacts: Option<Vec<String>>, raw: &str) -> Self {
        self.llama4_scout_inference_contacts = contacts;
        self.llama4_scout_inference_raw = raw.to_string();
        self
    }

    pub fn with_gemini(mut self, contacts: Option<Vec<String>>, raw: &str) -> Self {
        self.gemini_inference_contacts = contacts;
        self.gemini_inference_raw = raw.to_string();
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
