pub mod attendance;
pub mod auth;
pub mod classes;
pub mod users;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use users::UserService;
