use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::UserService;
use crate::models::{ApiResponse, ErrorCode, users::requests::UpdateUserRequest};
use crate::utils::storage_error_response;
use crate::utils::validate::{validate_email, validate_full_name};

pub async fn update_user(
    service: &UserService,
    user_id: Uuid,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref mut email) = update_data.email {
        *email = email.trim().to_string();
        if let Err(msg) = validate_email(email) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
        }
    }

    if let Some(ref full_name) = update_data.full_name
        && let Err(msg) = validate_full_name(full_name)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidParameter, msg)));
    }

    let storage = service.get_storage(request);

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            user,
            "User information updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(crate::errors::ExamSystemError::Conflict(_)) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "Email already exists",
            )))
        }
        Err(e) => Ok(storage_error_response(e)),
    }
}
