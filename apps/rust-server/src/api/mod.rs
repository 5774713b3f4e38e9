// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        ApplicationRequest, CareRoadmapRequest, CareRoadmapResponse, ChatRequest, ChatResponse,
        CompatibilityReportResponse, CompatibilityRequest, CreatePetRequest, PetStatus,
        ShelterAnalyticsResponse, SuccessResponse, UpdateLifestyleRequest,
    },
    state::AppState,
};

pub mod assistant;
pub mod health;
pub mod matching;
pub mod pets;
pub mod profile;
pub mod shelter;
pub mod users;

/// Build the application router.
///
/// CORS admits only `cors_origin`, with credentials.
pub fn router(state: AppState, cors_origin: HeaderValue) -> Router {
    let api_routes = Router::new()
        .route("/profile/lifestyle", post(profile::update_lifestyle))
        .route("/pets", post(pets::create_pet))
        .route("/matches", get(matching::get_matches))
        .route("/applications", post(matching::submit_application))
        .route("/compatibility-report", post(assistant::compatibility_report))
        .route("/chat", post(assistant::chat))
        .route("/care-roadmap", post(assistant::care_roadmap))
        .route("/shelter/analytics", get(shelter::shelter_analytics))
        .route("/auth/me", get(users::get_current_user))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors),
        )
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        profile::update_lifestyle,
        pets::create_pet,
        matching::get_matches,
        matching::submit_application,
        assistant::compatibility_report,
        assistant::chat,
        assistant::care_roadmap,
        shelter::shelter_analytics,
        users::get_current_user,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            UpdateLifestyleRequest,
            SuccessResponse,
            CreatePetRequest,
            PetStatus,
            ApplicationRequest,
            CompatibilityRequest,
            CompatibilityReportResponse,
            ChatRequest,
            ChatResponse,
            CareRoadmapRequest,
            CareRoadmapResponse,
            ShelterAnalyticsResponse,
            users::UserMeResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Profile", description = "Adopter lifestyle profile"),
        (name = "Pets", description = "Shelter pet listings"),
        (name = "Matching", description = "Similarity matches and adoption applications"),
        (name = "Assistant", description = "LLM-generated reports, answers, and care plans"),
        (name = "Shelter", description = "Shelter analytics"),
        (name = "Users", description = "Authenticated identity"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
