pub mod envelope;
pub mod info_dto;
pub mod keystore_dto;
pub mod platform_dto;
