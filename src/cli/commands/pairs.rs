use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pairs::{filter_by_model, process_vision_results_with_base};
use crate::core::shuffle::{shuffle, shuffle_with};
use crate::errors::{AppError, AppResult};
use crate::export::export_pairs;
use crate::models::{Dataset, ModelName};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Handle the `pairs` command: results file → evaluation pairs.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Pairs {
        input,
        model,
        shuffle: do_shuffle,
        seed,
        format,
        out,
        force,
    } = cmd
    {
        //
        // 1. Parse optional model filter
        //
        let model = model
            .as_deref()
            .map(|m| ModelName::from_code(m).ok_or_else(|| AppError::InvalidModel(m.to_string())))
            .transpose()?;

        //
        // 2. Load and flatten
        //
        let dataset = Dataset::load(input)?;
        let mut pairs = process_vision_results_with_base(&dataset, &cfg.image_base_url);

        if let Some(m) = model {
            pairs = filter_by_model(pairs, m);
        }

        //
        // 3. Order
        //
        if let Some(s) = seed {
            pairs = shuffle_with(&pairs, &mut StdRng::seed_from_u64(*s));
        } else if *do_shuffle {
            pairs = shuffle(&pairs);
        }

        //
        // 4. Output
        //
        export_pairs(&pairs, *format, out.as_deref(), *force)?;
    }

    Ok(())
}
