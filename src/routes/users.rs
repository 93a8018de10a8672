use actix_web::{web, HttpResponse, Responder};
use std::time::Instant;
use validator::Validate;

use crate::core::analytics::recommendation_stats;
use crate::models::{CompatibilityQuery, CompatibilityResponse, MatchRequest, MatchResponse};
use super::{load_pool, load_user, store_error_response, validation_failed, AppState};

/// Configure all user-facing matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/matches", web::post().to(find_matches))
        .route("/profile/{user_id}", web::get().to(get_user_profile))
        .route("/compatibility", web::post().to(calculate_compatibility))
        .route("/stats", web::get().to(get_recommendation_stats));
}

/// Find matches endpoint
///
/// POST /api/users/matches
///
/// Request body:
/// ```json
/// {
///   "user_id": "string",
///   "limit": 5,
///   "exclude_previous": true
/// }
/// ```
async fn find_matches(state: web::Data<AppState>, req: web::Json<MatchRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return validation_failed(errors);
    }

    let start = Instant::now();
    let user_id = &req.user_id;
    let limit = req.limit as usize;

    tracing::info!("Finding matches for user: {}, limit: {}", user_id, limit);

    let user = match load_user(&state, user_id).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", user_id, e);
            return store_error_response(&e);
        }
    };

    let candidates = match load_pool(&state).await {
        Ok(users) => users,
        Err(e) => {
            tracing::error!("Failed to fetch candidate pool for {}: {}", user_id, e);
            return store_error_response(&e);
        }
    };

    let matches = state
        .matcher
        .rank(&user, &candidates, limit, req.exclude_previous);

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    let response = MatchResponse {
        matches,
        // The pool includes the requester
        total_candidates: candidates.len().saturating_sub(1),
        processing_time_ms: (elapsed_ms * 100.0).round() / 100.0,
    };

    tracing::info!(
        "Returning {} matches for user {} (from {} candidates)",
        response.matches.len(),
        user_id,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// GET /api/users/profile/{user_id}
async fn get_user_profile(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();

    match load_user(&state, &user_id).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => {
            tracing::warn!("Profile lookup failed for {}: {}", user_id, e);
            store_error_response(&e)
        }
    }
}

/// Compatibility between two specific users
///
/// POST /api/users/compatibility?user1_id={id}&user2_id={id}
async fn calculate_compatibility(
    state: web::Data<AppState>,
    query: web::Query<CompatibilityQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    let user1 = match load_user(&state, &query.user1_id).await {
        Ok(user) => user,
        Err(e) => return store_error_response(&e),
    };
    let user2 = match load_user(&state, &query.user2_id).await {
        Ok(user) => user,
        Err(e) => return store_error_response(&e),
    };

    let (score, match_details) = state.matcher.score_pair(&user1, &user2);

    HttpResponse::Ok().json(CompatibilityResponse {
        user1_id: query.user1_id.clone(),
        user2_id: query.user2_id.clone(),
        compatibility_score: score,
        match_details,
    })
}

/// GET /api/users/stats
async fn get_recommendation_stats(state: web::Data<AppState>) -> impl Responder {
    match load_pool(&state).await {
        Ok(users) => HttpResponse::Ok().json(recommendation_stats(&users)),
        Err(e) => {
            tracing::error!("Failed to compute recommendation stats: {}", e);
            store_error_response(&e)
        }
    }
}
