pub mod auth;
pub mod series;
pub mod watched;
