pub mod slice;
pub mod status;

pub use slice::Slice;
pub use status::{Code, Result, Status};

/// Current wall-clock time in microseconds since the Unix epoch.
pub fn now_micros() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_micros() as i64)
        .unwrap_or(0)
}
