pub mod clock;
pub mod errors;
pub mod middleware;
pub mod types;

pub use clock::{Clock, FixedClock, Latency, SystemClock};
pub use errors::{AppError, AppResult, ErrorCode};
pub use types::*;
