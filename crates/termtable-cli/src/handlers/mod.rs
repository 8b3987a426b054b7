pub mod convert;
pub mod inspect;
pub mod render;
pub mod styles;
pub mod themes;
