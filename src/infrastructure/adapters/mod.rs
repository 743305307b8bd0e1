//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod epub;
pub mod storage;

pub use epub::*;
pub use storage::*;
