use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/hackathons", hackathon_routes())
        .nest("/fhe", fhe_routes())
}

fn hackathon_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::hackathon::hackathon_count).post(handlers::hackathon::create_hackathon),
        )
        .route("/{id}", get(handlers::hackathon::get_hackathon))
        .route("/{id}/register", post(handlers::hackathon::register))
        .route(
            "/{id}/participants",
            get(handlers::hackathon::list_participants),
        )
        .route(
            "/{id}/participants/{address}",
            get(handlers::hackathon::get_participant),
        )
        .route("/{id}/judges/{address}", get(handlers::hackathon::is_judge))
        .nest("/{id}/submissions", submission_routes())
        .merge(judging_routes())
}

fn submission_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::submission::submission_count).post(handlers::submission::submit_project),
        )
        .route("/{idx}", get(handlers::submission::get_submission))
        .route("/{idx}/reference", get(handlers::submission::get_reference))
        .route("/{idx}/scores", post(handlers::submission::submit_score))
}

fn judging_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/judge-access",
            post(handlers::judging::grant_judge_access),
        )
        .route("/{id}/calculate", post(handlers::judging::calculate_winners))
        .route("/{id}/aggregates", get(handlers::judging::aggregates))
        .route(
            "/{id}/decrypted-scores",
            post(handlers::judging::submit_decrypted_scores),
        )
        .route(
            "/{id}/decrypted-scores/{idx}",
            get(handlers::judging::decrypted_score),
        )
        .route("/{id}/finalize", post(handlers::judging::finalize))
        .route("/{id}/winners", get(handlers::judging::winners))
}

fn fhe_routes() -> Router<AppState> {
    Router::new()
        .route("/encrypt", post(handlers::fhe::encrypt))
        .route("/public-decrypt", post(handlers::fhe::public_decrypt))
        .route("/user-decrypt", post(handlers::fhe::user_decrypt))
}
