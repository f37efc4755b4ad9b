pub mod error;
pub mod config;

pub mod coin;
pub mod collection;
pub mod sort;

pub mod skiplist;

pub use error::{Error, Result};
pub use config::Config;
pub use coin::{AlwaysPromote, Coin, NeverPromote, RandomCoin};
pub use collection::OrderedCollection;
pub use sort::{is_sorted, merge_sort};
pub use skiplist::SkipList;
