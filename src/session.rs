use crate::models::user::{Role, UserProfile};

/// The logged-in user's context, created once after authentication and
/// passed by reference to every service call. There is no global session:
/// whoever needs one receives it explicitly, and logout consumes it.
#[derive(Debug, Clone)]
pub struct Session {
    user: UserProfile,
    token: String,
    active_course: Option<i64>,
}

impl Session {
    pub fn new(user: UserProfile, token: impl Into<String>) -> Self {
        Self {
            user,
            token: token.into(),
            active_course: None,
        }
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn is_teacher(&self) -> bool {
        self.user.role == Role::Teacher
    }

    /// Value for the `Authorization` header on every request.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Scopes subsequent work to one course.
    pub fn select_course(&mut self, course_id: i64) {
        self.active_course = Some(course_id);
    }

    pub fn clear_course(&mut self) {
        self.active_course = None;
    }

    pub fn active_course(&self) -> Option<i64> {
        self.active_course
    }

    /// Ends the session. Consuming `self` makes any use after logout a
    /// compile error.
    pub fn logout(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> UserProfile {
        UserProfile {
            id: 7,
            username: "mgarcia".to_string(),
            email: "mgarcia@example.com".to_string(),
            role: Role::Student,
        }
    }

    #[test]
    fn test_bearer_header_value() {
        let session = Session::new(student(), "abc123");
        assert_eq!(session.bearer(), "Bearer abc123");
        assert!(!session.is_teacher());
    }

    #[test]
    fn test_course_selection() {
        let mut session = Session::new(student(), "abc123");
        assert_eq!(session.active_course(), None);

        session.select_course(42);
        assert_eq!(session.active_course(), Some(42));

        session.clear_course();
        assert_eq!(session.active_course(), None);

        // Consuming logout: the session cannot be used afterwards.
        session.logout();
    }
}
