/// Full-width and half-width sentence terminators.
pub const SENTENCE_DELIMITERS: [char; 9] = ['。', '？', '！', '；', ',', '.', '?', '!', ';'];

fn is_delimiter(c: char) -> bool {
    SENTENCE_DELIMITERS.contains(&c)
}

/// Splits text into trimmed, non-empty sentences.
///
/// Newlines are not delimiters; a transcript line without terminal
/// punctuation runs into the next one.
pub fn split(text: &str) -> Vec<&str> {
    text.split(is_delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_mixed_width_terminators() {
        let text = "央行下调利率,加快推进光伏产业发展。市场怎么看？很好！继续;观察；结束.";
        assert_eq!(
            split(text),
            vec!["央行下调利率", "加快推进光伏产业发展", "市场怎么看", "很好", "继续", "观察", "结束"]
        );
    }

    #[test]
    fn test_split_drops_blank_segments() {
        assert_eq!(split("。。 ,  ;\n"), Vec::<&str>::new());
        assert_eq!(split(""), Vec::<&str>::new());
        assert_eq!(split("  只有一句  "), vec!["只有一句"]);
    }

    #[test]
    fn test_split_is_repeatable() {
        let text = "第一句。第二句！";
        assert_eq!(split(text), split(text));
    }

    #[test]
    fn test_full_width_comma_is_not_a_delimiter() {
        assert_eq!(split("推进，支持。"), vec!["推进，支持"]);
    }
}
