use crate::models::model_name::ModelName;
use serde::{Deserialize, Serialize};

/// One (image, model) comparison shown to an annotator.
///
/// Keys are camelCase because the annotation UI consumes this shape as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationPair {
    pub image_id: String,
    pub model_name: ModelName,
    pub image_url: String,
    pub original_contacts: Vec<String>,
    pub model_contacts: Vec<String>,
    pub model_raw_response: String,
}

/// Flat CSV row: contact lists are JSON-encoded into single cells.
#[derive(Debug, Serialize)]
pub struct EvaluationPairRecord<'a> {
    pub image_id: &'a str,
    pub model_name: &'static str,
    pub image_url: &'a str,
    pub original_contacts: String,
    pub model_contacts: String,
    pub model_raw_response: &'a str,
}

impl EvaluationPair {
    pub fn to_record(&self) -> serde_json::Result<EvaluationPairRecord<'_>> {
        Ok(EvaluationPairRecord {
            image_id: &self.image_id,
            model_name: self.model_name.as_str(),
            image_url: &self.image_url,
            original_contacts: serde_json::to_string(&self.original_contacts)?,
            model_contacts: serde_json::to_string(&self.model_contacts)?,
            model_raw_response: &self.model_raw_response,
        })
    }
}
