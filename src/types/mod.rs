pub mod errors;
pub mod ids;
pub mod member;
pub mod switches;

pub use errors::*;
pub use ids::*;
pub use member::*;
pub use switches::*;
