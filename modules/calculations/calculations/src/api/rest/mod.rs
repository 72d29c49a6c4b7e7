pub mod dto;
pub mod validation;
