pub mod install;
pub mod path;
pub mod versions;
