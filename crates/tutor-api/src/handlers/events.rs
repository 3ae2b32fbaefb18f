//! Inbound domain event handlers

use axum::{extract::State, Json};
use tutor_service::dto::{EnrollmentCreatedRequest, ProvisionedRoomsResponse};
use tutor_service::ProvisioningService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Handle an enrollment-created event
///
/// POST /events/enrollments
///
/// Delivered at-least-once by the enrollment system; the provisioning
/// service is idempotent, so replays return the already-provisioned
/// rooms.
pub async fn enrollment_created(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<EnrollmentCreatedRequest>,
) -> ApiResult<Json<ProvisionedRoomsResponse>> {
    tracing::info!(
        caller_id = %auth.user_id(),
        student_id = %request.student_id,
        subject_id = %request.subject_id,
        "Enrollment event received"
    );

    let service = ProvisioningService::new(state.service_context());
    let rooms = state.protect_store(service.on_enrollment_created(request)).await?;
    Ok(Json(rooms))
}
