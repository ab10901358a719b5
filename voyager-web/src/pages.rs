pub mod admin;
pub mod auth;
pub mod badge;
pub mod loading;
pub mod passport;
