pub mod examples;
pub mod history;
pub mod postgres;
