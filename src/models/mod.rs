pub mod entry;
pub mod line;

pub use entry::{CarUsage, DailyEntry, WeekData, WeekProfile};
pub use line::{DailyLine, HoursOverride, LineType};
