//! Oracle implementations backed by loaded content.

mod items;

pub use items::ItemOracleImpl;
