pub mod history;
pub mod options;
pub mod profile;
