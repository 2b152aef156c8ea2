pub mod date;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod validate;

pub use date::{parse_date, parse_optional_date};
pub use jwt::{Claims, TokenService};
pub use parameter_error_handler::{json_error_handler, path_error_handler, query_error_handler};
pub use password::PasswordService;
