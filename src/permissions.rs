//! Role Gating
//!
//! Which controls each role sees. The server enforces the same rules;
//! this only hides what would be refused.

use crate::models::{User, UserRole};

/// Capabilities of the signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    pub manage_users: bool,
    pub manage_api_keys: bool,
    pub manage_courses: bool,
    /// Create, rename, move, reorder, copy/paste and delete categories
    pub manage_tree: bool,
    pub create_documents: bool,
    pub edit_documents: bool,
    pub delete_documents: bool,
    pub restore_versions: bool,
    /// Permanent deletion of documents and categories
    pub purge: bool,
}

impl Permissions {
    pub const NONE: Permissions = Permissions {
        manage_users: false,
        manage_api_keys: false,
        manage_courses: false,
        manage_tree: false,
        create_documents: false,
        edit_documents: false,
        delete_documents: false,
        restore_versions: false,
        purge: false,
    };

    pub fn for_role(role: UserRole) -> Self {
        match role {
            UserRole::SuperAdmin => Permissions {
                manage_users: true,
                manage_api_keys: true,
                manage_courses: true,
                manage_tree: true,
                create_documents: true,
                edit_documents: true,
                delete_documents: true,
                restore_versions: true,
                purge: true,
            },
            UserRole::CourseAdmin => Permissions {
                manage_tree: true,
                create_documents: true,
                edit_documents: true,
                delete_documents: true,
                restore_versions: true,
                ..Self::NONE
            },
            UserRole::Proofreader => Permissions {
                edit_documents: true,
                restore_versions: true,
                ..Self::NONE
            },
        }
    }

    pub fn for_user(user: Option<&User>) -> Self {
        user.map(|u| Self::for_role(u.role)).unwrap_or(Self::NONE)
    }
}

/// "Course permissions" action on a user row
pub fn can_manage_course_grants(actor: Option<&User>, row: &User) -> bool {
    actor.is_some_and(|a| a.role == UserRole::SuperAdmin)
        && matches!(row.role, UserRole::CourseAdmin | UserRole::Proofreader)
}

/// Delete action on a user row; never for yourself
pub fn can_delete_user(actor: Option<&User>, row: &User) -> bool {
    actor.is_some_and(|a| a.role == UserRole::SuperAdmin && a.id != row.id)
}

/// Root nodes to grant and to revoke to go from `current` to `next`
pub fn course_grant_diff(current: &[i64], next: &[i64]) -> (Vec<i64>, Vec<i64>) {
    let grant = next.iter().copied().filter(|id| !current.contains(id)).collect();
    let revoke = current.iter().copied().filter(|id| !next.contains(id)).collect();
    (grant, revoke)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user(id: i64, role: UserRole) -> User {
        User {
            id,
            username: format!("user{}", id),
            display_name: None,
            role,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_super_admin_has_everything() {
        let p = Permissions::for_role(UserRole::SuperAdmin);
        assert!(p.manage_users && p.manage_api_keys && p.manage_courses);
        assert!(p.manage_tree && p.purge && p.create_documents);
    }

    #[test]
    fn test_course_admin() {
        let p = Permissions::for_role(UserRole::CourseAdmin);
        assert!(p.manage_tree);
        assert!(p.create_documents && p.edit_documents && p.delete_documents);
        assert!(p.restore_versions);
        assert!(!p.purge);
        assert!(!p.manage_users);
        assert!(!p.manage_api_keys);
    }

    #[test]
    fn test_proofreader() {
        let p = Permissions::for_role(UserRole::Proofreader);
        assert!(p.edit_documents && p.restore_versions);
        assert!(!p.create_documents);
        assert!(!p.delete_documents);
        assert!(!p.manage_tree);
        assert!(!p.purge);
    }

    #[test]
    fn test_anonymous() {
        assert_eq!(Permissions::for_user(None), Permissions::NONE);
    }

    #[test]
    fn test_course_grant_action() {
        let root = make_user(1, UserRole::SuperAdmin);
        let admin = make_user(2, UserRole::CourseAdmin);
        let reader = make_user(3, UserRole::Proofreader);
        assert!(can_manage_course_grants(Some(&root), &admin));
        assert!(can_manage_course_grants(Some(&root), &reader));
        assert!(!can_manage_course_grants(Some(&root), &root));
        assert!(!can_manage_course_grants(Some(&admin), &reader));
        assert!(!can_manage_course_grants(None, &reader));
    }

    #[test]
    fn test_delete_user_action() {
        let root = make_user(1, UserRole::SuperAdmin);
        let other_root = make_user(4, UserRole::SuperAdmin);
        let admin = make_user(2, UserRole::CourseAdmin);
        assert!(can_delete_user(Some(&root), &admin));
        assert!(can_delete_user(Some(&root), &other_root));
        assert!(!can_delete_user(Some(&root), &root));
        assert!(!can_delete_user(Some(&admin), &root));
    }

    #[test]
    fn test_course_grant_diff() {
        assert_eq!(course_grant_diff(&[1, 2, 3], &[3, 4]), (vec![4], vec![1, 2]));
        assert_eq!(course_grant_diff(&[], &[]), (vec![], vec![]));
    }
}
