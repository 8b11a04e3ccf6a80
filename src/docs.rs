use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, MessageResponse, RegisterRequestDto};
use crate::modules::authorizations::model::{
    Authorization, AuthorizationStatus, CreateAuthorizationDto, UpdateAuthorizationDto,
};
use crate::modules::classrooms::model::{Classroom, CreateClassroomDto, UpdateClassroomDto};
use crate::modules::documents::model::{CreateDocumentDto, Document, UpdateDocumentDto};
use crate::modules::follow_ups::model::{
    CreateFollowUpDto, FollowUp, MoodLevel, QualityLevel, UpdateFollowUpDto,
};
use crate::modules::menus::model::{CreateMonthlyMenuDto, MonthlyMenu, UpdateMonthlyMenuDto};
use crate::modules::newsletters::model::{
    CreateNewsletterDto, Newsletter, NewsletterStatus, UpdateNewsletterDto,
};
use crate::modules::notifications::model::{
    CreateNotificationDto, Notification, NotificationType, UpdateNotificationDto,
};
use crate::modules::parents::model::{CreateParentDto, Parent, UpdateParentDto};
use crate::modules::students::model::{CreateStudentDto, Gender, Student, UpdateStudentDto};
use crate::modules::teachers::model::{CreateTeacherDto, Teacher, UpdateTeacherDto};
use crate::modules::users::model::{
    ChangePasswordDto, PhotoResponse, UpdateUserDto, User, UserRole,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::get_current_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::change_password,
        crate::modules::users::controller::upload_photo,
        crate::modules::users::controller::delete_user,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::classrooms::controller::get_classrooms,
        crate::modules::classrooms::controller::get_classroom,
        crate::modules::classrooms::controller::create_classroom,
        crate::modules::classrooms::controller::update_classroom,
        crate::modules::classrooms::controller::delete_classroom,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::parents::controller::get_parents,
        crate::modules::parents::controller::get_parent,
        crate::modules::parents::controller::create_parent,
        crate::modules::parents::controller::update_parent,
        crate::modules::parents::controller::delete_parent,
        crate::modules::authorizations::controller::get_authorizations,
        crate::modules::authorizations::controller::get_authorization,
        crate::modules::authorizations::controller::create_authorization,
        crate::modules::authorizations::controller::update_authorization,
        crate::modules::authorizations::controller::delete_authorization,
        crate::modules::newsletters::controller::get_newsletters,
        crate::modules::newsletters::controller::get_newsletter,
        crate::modules::newsletters::controller::create_newsletter,
        crate::modules::newsletters::controller::update_newsletter,
        crate::modules::newsletters::controller::delete_newsletter,
        crate::modules::notifications::controller::get_notifications,
        crate::modules::notifications::controller::get_notification,
        crate::modules::notifications::controller::create_notification,
        crate::modules::notifications::controller::update_notification,
        crate::modules::notifications::controller::delete_notification,
        crate::modules::menus::controller::get_menus,
        crate::modules::menus::controller::get_menu,
        crate::modules::menus::controller::create_menu,
        crate::modules::menus::controller::update_menu,
        crate::modules::menus::controller::delete_menu,
        crate::modules::documents::controller::get_documents,
        crate::modules::documents::controller::get_document,
        crate::modules::documents::controller::create_document,
        crate::modules::documents::controller::update_document,
        crate::modules::documents::controller::delete_document,
        crate::modules::follow_ups::controller::get_follow_ups,
        crate::modules::follow_ups::controller::get_follow_up,
        crate::modules::follow_ups::controller::create_follow_up,
        crate::modules::follow_ups::controller::update_follow_up,
        crate::modules::follow_ups::controller::delete_follow_up,
    ),
    components(
        schemas(
            User,
            UserRole,
            UpdateUserDto,
            ChangePasswordDto,
            PhotoResponse,
            LoginRequest,
            LoginResponse,
            RegisterRequestDto,
            MessageResponse,
            ErrorResponse,
            Student,
            Gender,
            CreateStudentDto,
            UpdateStudentDto,
            Classroom,
            CreateClassroomDto,
            UpdateClassroomDto,
            Teacher,
            CreateTeacherDto,
            UpdateTeacherDto,
            Parent,
            CreateParentDto,
            UpdateParentDto,
            Authorization,
            AuthorizationStatus,
            CreateAuthorizationDto,
            UpdateAuthorizationDto,
            Newsletter,
            NewsletterStatus,
            CreateNewsletterDto,
            UpdateNewsletterDto,
            Notification,
            NotificationType,
            CreateNotificationDto,
            UpdateNotificationDto,
            MonthlyMenu,
            CreateMonthlyMenuDto,
            UpdateMonthlyMenuDto,
            Document,
            CreateDocumentDto,
            UpdateDocumentDto,
            FollowUp,
            MoodLevel,
            QualityLevel,
            CreateFollowUpDto,
            UpdateFollowUpDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, registration and current-user endpoints"),
        (name = "Users", description = "Account management and profile photos"),
        (name = "Students", description = "Enrolled children"),
        (name = "Classrooms", description = "Classroom management"),
        (name = "Teachers", description = "Teacher profiles"),
        (name = "Parents", description = "Parent profiles"),
        (name = "Authorizations", description = "Consent requests"),
        (name = "Newsletters", description = "Authored newsletters"),
        (name = "Notifications", description = "User-to-user messages"),
        (name = "Menus", description = "Monthly lunch menus"),
        (name = "Documents", description = "File-reference records"),
        (name = "Follow-ups", description = "Daily student observations")
    ),
    info(
        title = "Nido API",
        version = "0.1.0",
        description = "Daycare administration REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
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
            )
        }
    }
}
