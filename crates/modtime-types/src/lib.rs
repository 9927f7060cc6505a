pub mod entry;
pub mod key;

pub use entry::TimingEntry;
pub use key::{EventKey, ModuleKey, SeriesKey};
