pub mod error;
pub mod feature_flags;

// Case tracker domain modules
pub mod calendar;
pub mod case;
pub mod config;
pub mod search;

pub use error::*;
pub use feature_flags::*;

pub use calendar::*;
pub use case::*;
pub use config::*;
pub use search::*;
