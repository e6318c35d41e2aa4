use actix_web::http::Method;

use crate::error::ApiError;
use crate::models::{AuthUser, Snippet};

pub fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Anything with a single owning user.
pub trait Owned {
    fn owner_id(&self) -> i64;
}

impl Owned for Snippet {
    fn owner_id(&self) -> i64 {
        self.owner_id
    }
}

pub trait Permission {
    fn has_permission(&self, _method: &Method, _user: Option<&AuthUser>) -> bool {
        true
    }

    fn has_object_permission(&self, _method: &Method, _user: Option<&AuthUser>, _obj: &dyn Owned) -> bool {
        true
    }
}

/// Reads are open; writes need a logged-in user.
pub struct IsAuthenticatedOrReadOnly;

impl Permission for IsAuthenticatedOrReadOnly {
    fn has_permission(&self, method: &Method, user: Option<&AuthUser>) -> bool {
        is_safe_method(method) || user.is_some()
    }
}

/// Reads are open; writes are limited to the object's owner.
pub struct IsOwnerOrReadOnly;

impl Permission for IsOwnerOrReadOnly {
    fn has_object_permission(&self, method: &Method, user: Option<&AuthUser>, obj: &dyn Owned) -> bool {
        if is_safe_method(method) {
            return true;
        }
        user.is_some_and(|user| user.id == obj.owner_id())
    }
}

pub const SNIPPET_PERMISSIONS: &[&(dyn Permission + Sync)] = &[&IsAuthenticatedOrReadOnly, &IsOwnerOrReadOnly];

fn denied(user: Option<&AuthUser>) -> ApiError {
    match user {
        None => ApiError::NotAuthenticated,
        Some(_) => ApiError::PermissionDenied,
    }
}

pub fn check(permissions: &[&(dyn Permission + Sync)], method: &Method, user: Option<&AuthUser>) -> Result<(), ApiError> {
    if permissions.iter().all(|p| p.has_permission(method, user)) {
        Ok(())
    } else {
        Err(denied(user))
    }
}

pub fn check_object(
    permissions: &[&(dyn Permission + Sync)],
    method: &Method,
    user: Option<&AuthUser>,
    obj: &dyn Owned,
) -> Result<(), ApiError> {
    if permissions.iter().all(|p| p.has_object_permission(method, user, obj)) {
        Ok(())
    } else {
        Err(denied(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Thing(i64);

    impl Owned for Thing {
        fn owner_id(&self) -> i64 {
            self.0
        }
    }

    fn alice() -> AuthUser {
        AuthUser { id: 1, username: "alice".into() }
    }

    fn bob() -> AuthUser {
        AuthUser { id: 2, username: "bob".into() }
    }

    #[rstest]
    #[case(Method::GET, None, true)]
    #[case(Method::HEAD, None, true)]
    #[case(Method::POST, None, false)]
    #[case(Method::DELETE, Some(alice()), true)]
    fn authenticated_or_read_only(#[case] method: Method, #[case] user: Option<AuthUser>, #[case] allowed: bool) {
        assert_eq!(IsAuthenticatedOrReadOnly.has_permission(&method, user.as_ref()), allowed);
    }

    #[rstest]
    #[case(Method::GET, Some(bob()), true)]
    #[case(Method::PUT, Some(alice()), true)]
    #[case(Method::PUT, Some(bob()), false)]
    #[case(Method::DELETE, None, false)]
    fn owner_or_read_only(#[case] method: Method, #[case] user: Option<AuthUser>, #[case] allowed: bool) {
        assert_eq!(
            IsOwnerOrReadOnly.has_object_permission(&method, user.as_ref(), &Thing(1)),
            allowed
        );
    }

    #[rstest]
    fn anonymous_writes_are_not_authenticated() {
        let err = check(SNIPPET_PERMISSIONS, &Method::POST, None).unwrap_err();
        assert!(matches!(err, ApiError::NotAuthenticated));
    }

    #[rstest]
    fn non_owner_writes_are_denied() {
        let user = bob();
        let err = check_object(SNIPPET_PERMISSIONS, &Method::PATCH, Some(&user), &Thing(1)).unwrap_err();
        assert!(matches!(err, ApiError::PermissionDenied));
    }
}
