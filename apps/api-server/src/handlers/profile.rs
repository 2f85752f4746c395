//! Profile update handler.

use actix_web::{HttpResponse, web};

use postdesk_core::domain::ProfileUpdate;
use postdesk_shared::MessageResponse;
use postdesk_shared::dto::UpdateProfileRequest;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/profile
pub async fn update_profile(
    state: web::Data<AppState>,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let update = ProfileUpdate {
        username: req.username.unwrap_or_default(),
        hobby: req.hobby,
        description: req.description,
        profile_picture: req.profile_picture,
        music: req.music,
    };

    state
        .profiles
        .update_profile(&update)
        .await
        .map_err(|e| AppError::from_domain(e, "Profile update failed"))?;

    Ok(HttpResponse::Ok().json(MessageResponse::message("Profile updated successfully")))
}
