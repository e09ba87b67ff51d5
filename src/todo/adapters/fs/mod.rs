//! Filesystem adapter for preference storage (cap-std capability directory).

mod preferences;

pub use preferences::FilePreferenceStore;
