use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::models::exam_papers::requests::ExamPaperCursorQuery;
use crate::models::users::requests::{
    CreateUserProfileRequest, CreateUserRequest, UpdateUserProfileRequest, UpdateUserRequest,
    UserListParams,
};
use crate::services::{ExamPaperService, UserService};

// 懒加载的全局服务实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);
static EXAM_PAPER_SERVICE: Lazy<ExamPaperService> = Lazy::new(ExamPaperService::new_lazy);

// HTTP处理程序
pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(query.into_inner(), &req).await
}

pub async fn create_user(
    req: HttpRequest,
    user_data: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_user(user_data.into_inner(), &req).await
}

pub async fn get_user(req: HttpRequest, user_id: web::Path<Uuid>) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user(user_id.into_inner(), &req).await
}

pub async fn update_user(
    req: HttpRequest,
    user_id: web::Path<Uuid>,
    update_data: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_user(user_id.into_inner(), update_data.into_inner(), &req)
        .await
}

pub async fn delete_user(req: HttpRequest, user_id: web::Path<Uuid>) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(user_id.into_inner(), &req).await
}

pub async fn get_profile(req: HttpRequest, user_id: web::Path<Uuid>) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_profile(user_id.into_inner(), &req).await
}

pub async fn create_profile(
    req: HttpRequest,
    user_id: web::Path<Uuid>,
    profile_data: web::Json<CreateUserProfileRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .create_profile(user_id.into_inner(), profile_data.into_inner(), &req)
        .await
}

pub async fn update_profile(
    req: HttpRequest,
    user_id: web::Path<Uuid>,
    update_data: web::Json<UpdateUserProfileRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_profile(user_id.into_inner(), update_data.into_inner(), &req)
        .await
}

pub async fn delete_profile(
    req: HttpRequest,
    user_id: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_profile(user_id.into_inner(), &req).await
}

pub async fn get_user_summary(
    req: HttpRequest,
    user_id: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user_summary(user_id.into_inner(), &req).await
}

// 教师名下的试卷（游标分页）
pub async fn list_teacher_exam_papers(
    req: HttpRequest,
    user_id: web::Path<Uuid>,
    query: web::Query<ExamPaperCursorQuery>,
) -> ActixResult<HttpResponse> {
    EXAM_PAPER_SERVICE
        .list_teacher_exam_papers(&req, user_id.into_inner(), query.into_inner())
        .await
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/{user_id}", web::get().to(get_user))
            .route("/{user_id}", web::put().to(update_user))
            .route("/{user_id}", web::delete().to(delete_user))
            .route("/{user_id}/profile", web::get().to(get_profile))
            .route("/{user_id}/profile", web::post().to(create_profile))
            .route("/{user_id}/profile", web::put().to(update_profile))
            .route("/{user_id}/profile", web::delete().to(delete_profile))
            .route("/{user_id}/summary", web::get().to(get_user_summary))
            .route("/{user_id}/exam-papers", web::get().to(list_teacher_exam_papers)),
    );
}
