pub mod backup;
pub mod helpers;
pub mod log;
pub mod matching;
pub mod reminders;
pub mod scan;
pub mod sequencer;
pub mod status;
