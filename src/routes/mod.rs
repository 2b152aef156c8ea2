pub mod attendance;

pub mod auth;

pub mod classes;

pub mod users;

pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use users::configure_user_routes;
