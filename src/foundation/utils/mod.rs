mod format_utils;

pub use format_utils::{format_duration, format_subscriber_count};
