use regex::Regex;
use std::sync::LazyLock;

/// Tokens that never count as part of an episode title
pub const TECHNICAL_TERMS: &[&str] = &[
    "CR", "WEB-DL", "JPN", "ITA", "AAC2.0", "H.264", "mkv", "AMZN", "SUB", "mp4",
];

/// Pre-compiled regex patterns for episode filenames
///
/// The upstream file names come in three conventions, tried in order:
/// dotted release names (`Show.S01E05.Title.1080p...`), underscore-delimited
/// (`Ep_5_Title_SUB_ITA.mp4`) and space-delimited (`ep 5 Title.mp4`).
pub struct FilenamePatterns {
    pub season_episode_name: Regex,
    pub underscore_name: Regex,
    pub spaced_name: Regex,

    // Cleanup patterns
    pub leading_episode_prefix: Regex,
    pub resolution_token: Regex,
}

impl FilenamePatterns {
    pub fn new() -> Self {
        Self {
            season_episode_name: Regex::new(
                r"\.S\d+E\d+\.(.+?)(?:\.\d+p|\.CR\.WEB-DL|\.WEB-DL|\.JPN|\.ITA|\.AAC2\.0|\.H\.264|\.mkv|\.AMZN)",
            )
            .expect("Invalid season_episode_name regex"),
            underscore_name: Regex::new(r"Ep_\d+_(.+?)(?:_SUB_ITA|\.mp4|\.mkv)")
                .expect("Invalid underscore_name regex"),
            spaced_name: Regex::new(r"ep\s+\d+\s+(.+?)(?:\.mp4|\.mkv)")
                .expect("Invalid spaced_name regex"),

            leading_episode_prefix: Regex::new(r"(?i)^Episodio\s+\d+\s*-?\s*")
                .expect("Invalid leading_episode_prefix regex"),
            resolution_token: Regex::new(r"\d+p").expect("Invalid resolution_token regex"),
        }
    }
}

impl Default for FilenamePatterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Global singleton for patterns
pub static PATTERNS: LazyLock<FilenamePatterns> = LazyLock::new(FilenamePatterns::new);
