//! Dataset → evaluation pairs.

use crate::models::{Dataset, EvaluationPair, ImageData, ModelName};

/// Where the cropped dataset images are served from.
pub const BASE_IMAGE_URL: &str =
    "https://ml-datasets-maikyon.s3.us-west-2.amazonaws.com/cropped_images_2_total_people";

/// Raw response attached to every `original` pair. The UI shows it verbatim.
pub const ORIGINAL_RAW_RESPONSE: &str = "Ground truth semantic contacts";

/// Build the display URL of an image.
pub fn image_url(base: &str, image_id: &str) -> String {
    format!("{}/{}.png", base.trim_end_matches('/'), image_id)
}

/// Flatten a dataset into evaluation pairs using the built-in image location.
pub fn process_vision_results(dataset: &Dataset) -> Vec<EvaluationPair> {
    process_vision_results_with_base(dataset, BASE_IMAGE_URL)
}

/// Flatten a dataset into evaluation pairs.
///
/// Every image yields its `original` pair, followed by one pair for each
/// model that produced a (non-null) contact list, in `llama4_scout`,
/// `gemini` order. Image order follows the dataset.
pub fn process_vision_results_with_base(dataset: &Dataset, base_url: &str) -> Vec<EvaluationPair> {
    let mut pairs = Vec::with_capacity(dataset.len() * 3);

    for (image_id, data) in dataset.iter() {
        let url = image_url(base_url, image_id);

        for model in ModelName::ALL {
            if let Some((contacts, raw)) = model_output(data, model) {
                pairs.push(EvaluationPair {
                    image_id: image_id.to_string(),
                    model_name: model,
                    image_url: url.clone(),
                    original_contacts: data.original_semantic_contacts.clone(),
                    model_contacts: contacts.to_vec(),
                    model_raw_response: raw.to_string(),
                });
            }
        }
    }

    pairs
}

/// Contacts and raw text a model contributed for one image, if any.
fn model_output(data: &ImageData, model: ModelName) -> Option<(&[String], &str)> {
    match model {
        ModelName::Original => Some((&data.original_semantic_contacts, ORIGINAL_RAW_RESPONSE)),
        ModelName::Llama4Scout => data
            .llama4_scout_inference_contacts
            .as_deref()
            .map(|c| (c, data.llama4_scout_inference_raw.as_str())),
        ModelName::Gemini => data
            .gemini_inference_contacts
            .as_deref()
            .map(|c| (c, data.gemini_inference_raw.as_str())),
    }
}

/// Build the single pair for `(image_id, model)`, if the dataset has one.
pub fn find_pair(
    dataset: &Dataset,
    base_url: &str,
    image_id: &str,
    model: ModelName,
) -> Option<EvaluationPair> {
    let data = dataset.get(image_id)?;
    let (contacts, raw) = model_output(data, model)?;

    Some(EvaluationPair {
        image_id: image_id.to_string(),
        model_name: model,
        image_url: image_url(base_url, image_id),
        original_contacts: data.original_semantic_contacts.clone(),
        model_contacts: contacts.to_vec(),
        model_raw_response: raw.to_string(),
    })
}

/// Keep only the pairs of one model, preserving order.
pub fn filter_by_model(pairs: Vec<EvaluationPair>, model: ModelName) -> Vec<EvaluationPair> {
    pairs.into_iter().filter(|p| p.model_name == model).collect()
}
