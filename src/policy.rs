//! 授权策略
//!
//! 单一的判定函数 `allowed(principal, action, resource)`，按以下优先级匹配（先命中者生效）：
//! 1. 管理员：全部允许
//! 2. 读写本人账号：允许
//! 3. 教师访问班级/考勤：仅限自己任课的班级
//! 4. 学生访问考勤：只读，且仅限本人记录
//! 5. 其余一律拒绝
//!
//! 资源存在性由调用方在授权之前检查，因此不存在的资源返回 NotFound，
//! 存在但无权访问返回 Forbidden。

use crate::errors::{RecordsError, Result};
use crate::models::users::entities::{User, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Write,
}

/// 被访问资源及其归属信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// 某个用户的账号资料
    Account { owner_id: i64 },
    /// 用户与班级的目录管理（增删改、分配）
    Registry,
    /// 班级，附带其任课教师
    Class { teacher_id: Option<i64> },
    /// 考勤，附带所属班级的任课教师与学生；面向整个班级的操作 student_id 为空
    Attendance {
        teacher_id: Option<i64>,
        student_id: Option<i64>,
    },
}

pub fn allowed(principal: &User, action: Action, resource: Resource) -> bool {
    match (principal.role, resource) {
        (UserRole::Admin, _) => true,
        (_, Resource::Account { owner_id }) if owner_id == principal.id => true,
        (UserRole::Teacher, Resource::Class { teacher_id })
        | (UserRole::Teacher, Resource::Attendance { teacher_id, .. }) => {
            teacher_id == Some(principal.id)
        }
        (UserRole::Student, Resource::Attendance { student_id, .. }) => {
            action == Action::Read && student_id == Some(principal.id)
        }
        (UserRole::Teacher | UserRole::Student, _) => false,
    }
}

pub fn authorize(principal: &User, action: Action, resource: Resource) -> Result<()> {
    if allowed(principal, action, resource) {
        Ok(())
    } else {
        Err(RecordsError::forbidden(format!(
            "User '{}' is not allowed to {} this resource",
            principal.username,
            match action {
                Action::Read => "read",
                Action::Write => "modify",
            }
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::models::users::entities::{AcademicInfo, UserProfile};

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            role,
            enabled: true,
            profile: UserProfile::default(),
            academic: AcademicInfo::default(),
            class_id: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    const ALL_RESOURCES: [Resource; 5] = [
        Resource::Account { owner_id: 99 },
        Resource::Registry,
        Resource::Class { teacher_id: None },
        Resource::Attendance {
            teacher_id: Some(99),
            student_id: Some(98),
        },
        Resource::Attendance {
            teacher_id: None,
            student_id: None,
        },
    ];

    #[test]
    fn test_admin_always_allowed() {
        let admin = user(1, UserRole::Admin);
        for resource in ALL_RESOURCES {
            assert!(allowed(&admin, Action::Read, resource));
            assert!(allowed(&admin, Action::Write, resource));
        }
    }

    #[test]
    fn test_own_account() {
        for role in [UserRole::Teacher, UserRole::Student] {
            let principal = user(5, role);
            assert!(allowed(&principal, Action::Write, Resource::Account { owner_id: 5 }));
            assert!(!allowed(&principal, Action::Read, Resource::Account { owner_id: 6 }));
        }
    }

    #[test]
    fn test_teacher_scoped_to_assigned_class() {
        let bob = user(2, UserRole::Teacher);
        let own = Resource::Class { teacher_id: Some(2) };
        let other = Resource::Class { teacher_id: Some(3) };
        let unassigned = Resource::Class { teacher_id: None };
        assert!(allowed(&bob, Action::Read, own));
        assert!(allowed(&bob, Action::Write, own));
        assert!(!allowed(&bob, Action::Read, other));
        assert!(!allowed(&bob, Action::Write, unassigned));

        let own_attendance = Resource::Attendance {
            teacher_id: Some(2),
            student_id: Some(10),
        };
        let other_attendance = Resource::Attendance {
            teacher_id: Some(3),
            student_id: Some(10),
        };
        assert!(allowed(&bob, Action::Write, own_attendance));
        assert!(!allowed(&bob, Action::Read, other_attendance));
        assert!(!allowed(&bob, Action::Write, Resource::Registry));
    }

    #[test]
    fn test_student_reads_only_own_attendance() {
        let alice = user(10, UserRole::Student);
        let own = Resource::Attendance {
            teacher_id: Some(2),
            student_id: Some(10),
        };
        let other = Resource::Attendance {
            teacher_id: Some(2),
            student_id: Some(11),
        };
        assert!(allowed(&alice, Action::Read, own));
        assert!(!allowed(&alice, Action::Write, own));
        assert!(!allowed(&alice, Action::Read, other));
        assert!(!allowed(&alice, Action::Read, Resource::Class { teacher_id: Some(2) }));
        assert!(!allowed(&alice, Action::Read, Resource::Registry));
    }

    #[test]
    fn test_authorize_returns_forbidden() {
        let alice = user(10, UserRole::Student);
        let err = authorize(&alice, Action::Write, Resource::Registry).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert!(authorize(&alice, Action::Write, Resource::Account { owner_id: 10 }).is_ok());
    }
}
