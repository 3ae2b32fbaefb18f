//! Value objects - immutable domain primitives

mod principal;
mod snowflake;

pub use principal::{Principal, Role};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
