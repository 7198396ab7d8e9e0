use super::patterns::{PATTERNS, TECHNICAL_TERMS};

/// Best-effort extraction of a human episode title from a machine filename.
///
/// Returns an empty string when no pattern matches or when nothing
/// meaningful survives the technical-token filter; callers synthesize an
/// `"Episodio {n}"` title in that case.
#[must_use]
pub fn extract_episode_name(file_name: &str) -> String {
    if file_name.is_empty() {
        return String::new();
    }

    let patterns = &*PATTERNS;

    // Try the pattern families in order of specificity
    let captured = patterns
        .season_episode_name
        .captures(file_name)
        .or_else(|| patterns.underscore_name.captures(file_name))
        .or_else(|| patterns.spaced_name.captures(file_name))
        .and_then(|caps| caps.get(1));

    let Some(raw) = captured else {
        return String::new();
    };

    // Normalize separators
    let name = raw.as_str().replace(['.', '_'], " ");
    let name = name.trim();

    // Strip a duplicated "Episodio N" prefix
    let name = patterns
        .leading_episode_prefix
        .replace(name, "")
        .trim()
        .to_string();

    let has_meaningful_word = name.split_whitespace().any(|word| {
        word.len() > 2
            && !TECHNICAL_TERMS
                .iter()
                .any(|term| word.eq_ignore_ascii_case(term))
            && !patterns.resolution_token.is_match(word)
    });

    if has_meaningful_word { name } else { String::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_release_name() {
        let name = extract_episode_name(
            "Show.Title.S01E05.La.Promessa.1080p.CR.WEB-DL.AAC2.0.H.264.mkv",
        );
        assert_eq!(name, "La Promessa");
    }

    #[test]
    fn test_underscore_name() {
        let name = extract_episode_name("Ep_12_Il_Ritorno_SUB_ITA.mp4");
        assert_eq!(name, "Il Ritorno");
    }

    #[test]
    fn test_spaced_name() {
        let name = extract_episode_name("ep 3 Una Nuova Alba.mp4");
        assert_eq!(name, "Una Nuova Alba");
    }

    #[test]
    fn test_duplicated_prefix_is_stripped() {
        let name = extract_episode_name("Ep_7_Episodio_7_Fuga_SUB_ITA.mp4");
        assert_eq!(name, "Fuga");
    }

    #[test]
    fn test_no_pattern_returns_empty() {
        assert_eq!(extract_episode_name("randomclip.avi"), "");
        assert_eq!(extract_episode_name(""), "");
    }

    #[test]
    fn test_technical_residue_returns_empty() {
        // Pattern matches but nothing but technical tokens survives
        let name = extract_episode_name("Show.S01E05.ITA.JPN.720p.WEB-DL.mkv");
        assert_eq!(name, "");
    }
}
