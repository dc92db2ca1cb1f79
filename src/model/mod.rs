mod match_record;
mod roster;
mod team;

pub use match_record::*;
pub use roster::*;
pub use team::*;
