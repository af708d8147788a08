pub mod shift;
pub mod user;

pub use shift::{ShiftRecord, ShiftRow, WeeklyShift};
pub use user::PdUser;
