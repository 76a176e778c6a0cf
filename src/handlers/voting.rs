use std::collections::BTreeMap;
use axum::{
    extract::State,
    Json,
};
use crate::errors::{AppError, AppResult};
use crate::extract::AppJson;
use crate::models::{MessageResponse, TallyResponse, TimeLeftResponse, Vote, VoteRequest};
use crate::state::AppState;

pub async fn handle_vote(
    State(state): State<AppState>,
    AppJson(form): AppJson<VoteRequest>,
) -> AppResult<Json<MessageResponse>> {
    if state.store.get_user(&form.uid).await?.is_none() {
        return Err(AppError::UserNotFound);
    }

    let now = state.clock.utc();
    if !state.deadline.is_open(now) {
        return Err(AppError::VotingEnded);
    }

    // Create-only write, so concurrent requests for one uid cannot both pass.
    if !state.store.mark_voted(&form.uid).await? {
        return Err(AppError::AlreadyVoted(form.uid));
    }

    let vote = Vote::new(form.uid, form.candidate_id, now);
    state.store.append_vote(&vote).await?;
    tracing::info!("Vote {} recorded for {}", vote.id, vote.uid);

    Ok(Json(MessageResponse::new("✅ Vote submitted successfully")))
}

/// Counts votes per candidate. Votes without a candidate id are skipped.
pub fn tally_votes(votes: &[Vote]) -> BTreeMap<String, u64> {
    let mut tally = BTreeMap::new();
    for vote in votes.iter().filter(|vote| !vote.candidate_id.is_empty()) {
        *tally.entry(vote.candidate_id.clone()).or_insert(0) += 1;
    }
    tally
}

pub async fn get_results(
    State(state): State<AppState>,
) -> AppResult<Json<TallyResponse>> {
    let votes = state.store.list_votes().await?;
    tracing::debug!("Tallying {} votes", votes.len());
    Ok(Json(TallyResponse { tally: tally_votes(&votes) }))
}

pub async fn get_time_left(
    State(state): State<AppState>,
) -> Json<TimeLeftResponse> {
    Json(TimeLeftResponse {
        seconds: state.deadline.seconds_left(state.clock.utc()),
    })
}
