mod auth;
mod voting;

pub use auth::{handle_register, handle_verify, handle_login};
pub use voting::{handle_vote, get_results, get_time_left};
