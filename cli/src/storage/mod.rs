//! Local storage: profile file location, profiles and resolved settings

pub mod layout;
pub mod profile;
pub mod settings;
