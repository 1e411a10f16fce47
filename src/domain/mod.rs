pub mod ids;
pub mod outcome;
pub mod registration;
pub mod status;
