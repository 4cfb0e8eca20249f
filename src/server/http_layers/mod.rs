mod requests_logging;
mod trailing_slash;

pub use requests_logging::{log_requests, RequestsLoggingLevel};
pub use trailing_slash::redirect_trailing_slash;
