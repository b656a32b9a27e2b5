// Domain layer - Core business logic

pub mod burn;
pub mod errors;
pub mod model;
pub mod naming;
pub mod rules;
