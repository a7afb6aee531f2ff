use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::UserService;
use crate::errors::ExamSystemError;
use crate::models::{
    ApiResponse, ErrorCode,
    users::requests::{CreateUserProfileRequest, UpdateUserProfileRequest},
};
use crate::utils::storage_error_response;

fn profile_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::UserProfileNotFound,
        "User profile not found",
    ))
}

pub async fn get_profile(
    service: &UserService,
    user_id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_user_profile(user_id).await {
        Ok(Some(profile)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            profile,
            "User profile retrieved successfully",
        ))),
        Ok(None) => Ok(profile_not_found()),
        Err(e) => Ok(storage_error_response(e)),
    }
}

pub async fn create_profile(
    service: &UserService,
    user_id: Uuid,
    profile_data: CreateUserProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.create_user_profile(user_id, profile_data).await {
        Ok(profile) => Ok(HttpResponse::Created().json(ApiResponse::success(
            profile,
            "User profile created successfully",
        ))),
        Err(ExamSystemError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::UserProfileAlreadyExists, msg),
        )),
        Err(e) => Ok(storage_error_response(e)),
    }
}

pub async fn update_profile(
    service: &UserService,
    user_id: Uuid,
    update_data: UpdateUserProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_user_profile(user_id, update_data).await {
        Ok(Some(profile)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            profile,
            "User profile updated successfully",
        ))),
        Ok(None) => Ok(profile_not_found()),
        Err(e) => Ok(storage_error_response(e)),
    }
}

pub async fn delete_profile(
    service: &UserService,
    user_id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_user_profile(user_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "User profile deleted successfully",
        ))),
        Ok(false) => Ok(profile_not_found()),
        Err(e) => Ok(storage_error_response(e)),
    }
}
