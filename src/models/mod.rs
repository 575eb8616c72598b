pub mod dataset;
pub mod evaluation_pair;
pub mod image_data;
pub mod model_name;

pub use dataset::Dataset;
pub use evaluation_pair::EvaluationPair;
pub use image_data::ImageData;
pub use model_name::ModelName;
