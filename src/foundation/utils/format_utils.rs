use regex::Regex;

/// Formats an ISO-8601 duration token from the YouTube API into a clock string.
///
/// This function takes a duration of the form `PT[nH][nM][nS]` and renders it as
/// `H:MM:SS` when an hour component is present, or `M:SS` otherwise. Component
/// groups the API omitted count as zero. Input that does not contain the `PT`
/// token yields an empty string.
///
/// # Arguments
///
/// * `duration` - A string slice holding the raw duration token.
///
/// # Examples
///
/// ```
/// use tunesearch::foundation::utils::format_duration;
///
/// assert_eq!(format_duration("PT1H2M3S"), "1:02:03");
/// assert_eq!(format_duration("PT4M20S"), "4:20");
/// assert_eq!(format_duration("not a duration"), "");
/// ```
pub fn format_duration(duration: &str) -> String {
    let re = Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").unwrap();

    let captures = match re.captures(duration) {
        Some(captures) => captures,
        None => return String::new(),
    };

    let hours = capture_as_u64(&captures, 1);
    let minutes = capture_as_u64(&captures, 2);
    let seconds = capture_as_u64(&captures, 3);

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

fn capture_as_u64(captures: &regex::Captures, group: usize) -> u64 {
    captures
        .get(group)
        .map_or(0, |m| m.as_str().parse().unwrap_or(0))
}

/// Formats a raw subscriber count into a short human-readable label.
///
/// Counts of a million or more are rendered with an `M` suffix to one decimal,
/// counts of a thousand or more with a `K` suffix, and anything smaller as the
/// plain number, all followed by "subscribers".
///
/// # Arguments
///
/// * `count` - The raw subscriber count reported by the API.
///
/// # Examples
///
/// ```
/// use tunesearch::foundation::utils::format_subscriber_count;
///
/// assert_eq!(format_subscriber_count(3_400_000), "3.4M subscribers");
/// assert_eq!(format_subscriber_count(2_500), "2.5K subscribers");
/// assert_eq!(format_subscriber_count(500), "500 subscribers");
/// ```
pub fn format_subscriber_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M subscribers", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K subscribers", count as f64 / 1_000.0)
    } else {
        format!("{} subscribers", count)
    }
}
