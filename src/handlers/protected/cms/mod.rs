pub mod articles;
pub mod categories;
pub mod site_settings;
