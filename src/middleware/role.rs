//! Declarative per-resource, per-operation role whitelist.
//!
//! All role gating flows through one table so role literals never scatter
//! across handlers. An empty allowed set means "any authenticated user";
//! authentication itself is the [`AuthUser`] extractor's job.
//!
//! Ownership checks (a newsletter's author, a notification's sender) are
//! deliberately NOT here: those are row filters inside the services, and a
//! failed ownership check answers `404`, never `403`, so an unauthorized
//! caller cannot probe which ids exist.

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::UserRole;
use crate::utils::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Users,
    Students,
    Classrooms,
    Teachers,
    Parents,
    Authorizations,
    Newsletters,
    Notifications,
    Menus,
    Documents,
    FollowUps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

const ADMIN: &[UserRole] = &[UserRole::Admin];
const ADMIN_TEACHER: &[UserRole] = &[UserRole::Admin, UserRole::Teacher];
/// Any authenticated user.
const ANY: &[UserRole] = &[];

/// The capability table. Sourced from the per-route whitelists of the
/// production deployment; changing a cell here changes the route's access
/// rules everywhere.
pub fn allowed_roles(resource: Resource, operation: Operation) -> &'static [UserRole] {
    use Operation::*;
    use Resource::*;

    match (resource, operation) {
        // User records: list/delete are admin-only; get/update are
        // self-or-admin, enforced in the handler on top of authentication.
        (Users, List) => ADMIN,
        (Users, Get) => ANY,
        (Users, Create) => ADMIN,
        (Users, Update) => ANY,
        (Users, Delete) => ADMIN,

        (Students, Create) | (Students, Update) => ADMIN_TEACHER,
        (Students, Delete) => ADMIN,
        (Students, _) => ANY,

        (Classrooms, List) | (Classrooms, Get) => ANY,
        (Classrooms, _) => ADMIN,

        (Teachers, List) | (Teachers, Get) => ANY,
        (Teachers, _) => ADMIN,

        (Parents, Get) | (Parents, Update) => ANY,
        (Parents, _) => ADMIN,

        (Authorizations, Get) => ANY,
        (Authorizations, List) | (Authorizations, Create) | (Authorizations, Update) => {
            ADMIN_TEACHER
        }
        (Authorizations, Delete) => ADMIN,

        (Newsletters, List) | (Newsletters, Get) => ANY,
        (Newsletters, Create) | (Newsletters, Update) => ADMIN_TEACHER,
        (Newsletters, Delete) => ADMIN,

        (Notifications, List) | (Notifications, Get) => ANY,
        (Notifications, _) => ADMIN_TEACHER,

        (Menus, List) | (Menus, Get) => ANY,
        (Menus, Create) | (Menus, Update) => ADMIN_TEACHER,
        (Menus, Delete) => ADMIN,

        (Documents, List) | (Documents, Get) => ANY,
        (Documents, Create) | (Documents, Update) => ADMIN_TEACHER,
        (Documents, Delete) => ADMIN,

        (FollowUps, Get) => ANY,
        (FollowUps, List) | (FollowUps, Create) | (FollowUps, Update) => ADMIN_TEACHER,
        (FollowUps, Delete) => ADMIN,
    }
}

/// The single generic guard handlers consult after authentication.
pub fn check_capability(
    auth_user: &AuthUser,
    resource: Resource,
    operation: Operation,
) -> Result<(), AppError> {
    let allowed = allowed_roles(resource, operation);

    if allowed.is_empty() || allowed.contains(&auth_user.role()) {
        return Ok(());
    }

    Err(AppError::forbidden(anyhow::anyhow!(
        "Role {} is not authorized for this operation",
        auth_user.role().as_str()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::CurrentUser;

    fn user_with_role(role: UserRole) -> AuthUser {
        AuthUser(CurrentUser {
            id: 7,
            email: "test@example.com".to_string(),
            role,
        })
    }

    #[test]
    fn test_teacher_cannot_delete_students() {
        let teacher = user_with_role(UserRole::Teacher);
        assert!(check_capability(&teacher, Resource::Students, Operation::Delete).is_err());
    }

    #[test]
    fn test_admin_can_delete_students() {
        let admin = user_with_role(UserRole::Admin);
        assert!(check_capability(&admin, Resource::Students, Operation::Delete).is_ok());
    }

    #[test]
    fn test_teacher_can_create_students() {
        let teacher = user_with_role(UserRole::Teacher);
        assert!(check_capability(&teacher, Resource::Students, Operation::Create).is_ok());
    }

    #[test]
    fn test_parent_can_read_students() {
        let parent = user_with_role(UserRole::Parent);
        assert!(check_capability(&parent, Resource::Students, Operation::List).is_ok());
        assert!(check_capability(&parent, Resource::Students, Operation::Get).is_ok());
    }

    #[test]
    fn test_parent_cannot_list_users() {
        let parent = user_with_role(UserRole::Parent);
        assert!(check_capability(&parent, Resource::Users, Operation::List).is_err());
    }

    #[test]
    fn test_parent_can_get_authorization_but_not_list() {
        let parent = user_with_role(UserRole::Parent);
        assert!(check_capability(&parent, Resource::Authorizations, Operation::Get).is_ok());
        assert!(check_capability(&parent, Resource::Authorizations, Operation::List).is_err());
    }

    #[test]
    fn test_empty_allowed_set_means_any_authenticated() {
        assert!(allowed_roles(Resource::Newsletters, Operation::List).is_empty());
        for role in [UserRole::Admin, UserRole::Teacher, UserRole::Parent] {
            let user = user_with_role(role);
            assert!(
                check_capability(&user, Resource::Newsletters, Operation::List).is_ok()
            );
        }
    }

    #[test]
    fn test_delete_is_admin_only_across_resources() {
        let teacher = user_with_role(UserRole::Teacher);
        for resource in [
            Resource::Classrooms,
            Resource::Teachers,
            Resource::Parents,
            Resource::Authorizations,
            Resource::Newsletters,
            Resource::Menus,
            Resource::Documents,
            Resource::FollowUps,
        ] {
            assert!(
                check_capability(&teacher, resource, Operation::Delete).is_err(),
                "teacher unexpectedly allowed to delete {:?}",
                resource
            );
        }
    }

    #[test]
    fn test_notifications_delete_allows_teacher() {
        // Notifications are the one resource where teachers may delete,
        // owner-scoped in the service.
        let teacher = user_with_role(UserRole::Teacher);
        assert!(
            check_capability(&teacher, Resource::Notifications, Operation::Delete).is_ok()
        );
    }
}
