mod user;
mod forms;
mod vote;

pub use user::User;
pub use forms::{
    RegisterRequest, VerifyRequest, LoginRequest, VoteRequest,
    MessageResponse, LoginResponse, TallyResponse, TimeLeftResponse,
};
pub use vote::{Vote, VotedMarker};
