use escola_auth::Identity;
use escola_models::{
    Classroom, CreateClassroomDto, CreateSubjectDto, Grade, LoginForm, RecordGradeDto,
    RegisterAccountDto, RegisteredAccount, Role, StudentProfileDto, Subject, TeacherProfileDto,
    TokenResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::CurrentUserResponse;
use crate::modules::shared::{ErrorResponse, MessageResponse, SavedResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::current_user,
        crate::modules::admin::controller::admin_home,
        crate::modules::admin::controller::create_classroom,
        crate::modules::admin::controller::create_subject,
        crate::modules::admin::controller::list_classrooms,
        crate::modules::admin::controller::list_subjects,
        crate::modules::students::controller::student_home,
        crate::modules::students::controller::save_profile,
        crate::modules::students::controller::list_grades,
        crate::modules::teachers::controller::teacher_home,
        crate::modules::teachers::controller::save_profile,
        crate::modules::teachers::controller::record_grade,
    ),
    components(
        schemas(
            Role,
            Identity,
            RegisterAccountDto,
            RegisteredAccount,
            LoginForm,
            TokenResponse,
            CurrentUserResponse,
            Classroom,
            CreateClassroomDto,
            Subject,
            CreateSubjectDto,
            StudentProfileDto,
            TeacherProfileDto,
            RecordGradeDto,
            Grade,
            MessageResponse,
            SavedResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and the caller's identity"),
        (name = "Admin", description = "Classroom and subject management"),
        (name = "Students", description = "Student profile and grades"),
        (name = "Teachers", description = "Teacher profile and grade recording")
    ),
    info(
        title = "Escola API",
        version = "0.1.0",
        description = "School management API: accounts with student, teacher and admin roles, classrooms, subjects, profiles and grades.",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/auth",
            "/auth/token",
            "/",
            "/admin/criarsalas",
            "/aluno/infoalunos",
            "/professor/lancarnotas",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
