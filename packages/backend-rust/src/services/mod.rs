pub mod intake;
pub mod report;
