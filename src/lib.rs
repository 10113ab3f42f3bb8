pub mod flows;
pub mod gateway;
pub mod models;
pub mod screens;
pub mod validation;
