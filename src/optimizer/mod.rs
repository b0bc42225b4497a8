pub mod efficiency;
pub mod search;

pub use efficiency::*;
pub use search::*;
