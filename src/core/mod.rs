pub mod ids;
pub mod log;
pub mod pairs;
pub mod score;
pub mod session;
pub mod shuffle;

pub use ids::generate_user_id;
pub use pairs::{process_vision_results, process_vision_results_with_base};
pub use shuffle::shuffle;
