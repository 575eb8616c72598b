//! Ordered mapping image id → inference results.
//!
//! Entries keep the order of the keys in the source document, so pairs built
//! from a dataset come out in file order. A repeated key keeps its first
//! position and takes the last value.

use crate::errors::AppResult;
use crate::models::image_data::ImageData;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    entries: Vec<(String, ImageData)>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(s: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a dataset file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Add an entry, or replace the data of an existing id in place.
    pub fn insert(&mut self, image_id: &str, data: ImageData) {
        match self.entries.iter_mut().find(|(id, _)| id == image_id) {
            Some((_, existing)) => *existing = data,
            None => self.entries.push((image_id.to_string(), data)),
        }
    }

    pub fn get(&self, image_id: &str) -> Option<&ImageData> {
        self.entries
            .iter()
            .find(|(id, _)| id == image_id)
            .map(|(_, data)| data)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ImageData)> {
        self.entries.iter().map(|(id, data)| (id.as_str(), data))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ImageData)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (String, ImageData)>>(iter: I) -> Self {
        let mut dataset = Self::new();
        for (id, data) in iter {
            dataset.insert(&id, data);
        }
        dataset
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, data) in &self.entries {
            map.serialize_entry(id, data)?;
        }
        map.end()
    }
}

// serde_json's `preserve_order` makes `Map` insertion-ordered, with a
// repeated key overwriting in place.
impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;

        let mut entries = Vec::with_capacity(raw.len());
        for (id, value) in raw {
            let data = ImageData::deserialize(value)
                .map_err(|e| D::Error::custom(format!("image '{id}': {e}")))?;
            entries.push((id, data));
        }
        Ok(Dataset { entries })
    }
}
