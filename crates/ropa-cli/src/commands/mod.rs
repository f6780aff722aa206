pub mod generate;
pub mod profile_ir;
pub mod resolve_profile;
