pub mod suffix_tracker;

pub use suffix_tracker::SuffixTracker;
