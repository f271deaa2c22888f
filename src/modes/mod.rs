pub mod headless;
pub mod human;
pub mod schedule;

pub use headless::HeadlessMode;
pub use human::HumanMode;
pub use schedule::TickSchedule;
