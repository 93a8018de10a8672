use actix_web::{web, HttpResponse, Responder};

use crate::core::analytics::{categorize_skills, popular_skills, recommend_skills, supply_demand};
use crate::models::{LimitQuery, SkillRecommendationResponse};
use super::{load_pool, load_user, store_error_response, AppState};

/// Configure skill analytics routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/popular", web::get().to(get_popular_skills))
        .route("/recommendations/{user_id}", web::get().to(get_skill_recommendations))
        .route("/supply-demand", web::get().to(get_supply_demand))
        .route("/categories", web::get().to(get_skill_categories));
}

/// GET /api/skills/popular?limit=20
async fn get_popular_skills(state: web::Data<AppState>, query: web::Query<LimitQuery>) -> impl Responder {
    let limit = query.limit.unwrap_or(state.matching.popular_limit);

    match load_pool(&state).await {
        Ok(users) => HttpResponse::Ok().json(popular_skills(&users, limit)),
        Err(e) => {
            tracing::error!("Failed to load popular skills: {}", e);
            store_error_response(&e)
        }
    }
}

/// GET /api/skills/recommendations/{user_id}?limit=10
async fn get_skill_recommendations(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<LimitQuery>,
) -> impl Responder {
    let user_id = path.into_inner();
    let limit = query.limit.unwrap_or(state.matching.recommendation_limit);

    let user = match load_user(&state, &user_id).await {
        Ok(user) => user,
        Err(e) => return store_error_response(&e),
    };
    let users = match load_pool(&state).await {
        Ok(users) => users,
        Err(e) => return store_error_response(&e),
    };

    let current_skills: Vec<String> = user.all_skills().cloned().collect();
    let all_skills: Vec<String> = users.iter().flat_map(|u| u.all_skills()).cloned().collect();

    let recommended_skills = recommend_skills(&current_skills, &all_skills, limit);

    tracing::debug!("Recommending {} skills to {}", recommended_skills.len(), user_id);

    HttpResponse::Ok().json(SkillRecommendationResponse {
        user_id,
        current_skills,
        recommendation_count: recommended_skills.len(),
        recommended_skills,
    })
}

/// GET /api/skills/supply-demand
async fn get_supply_demand(state: web::Data<AppState>) -> impl Responder {
    match load_pool(&state).await {
        Ok(users) => HttpResponse::Ok().json(supply_demand(&users)),
        Err(e) => {
            tracing::error!("Failed to analyze skill supply and demand: {}", e);
            store_error_response(&e)
        }
    }
}

/// GET /api/skills/categories
async fn get_skill_categories(state: web::Data<AppState>) -> impl Responder {
    match load_pool(&state).await {
        Ok(users) => HttpResponse::Ok().json(categorize_skills(&users)),
        Err(e) => {
            tracing::error!("Failed to categorize skills: {}", e);
            store_error_response(&e)
        }
    }
}
