use crate::core::ids::generate_user_id;
use crate::errors::AppResult;

pub fn handle() -> AppResult<()> {
    println!("{}", generate_user_id());
    Ok(())
}
