use crate::errors::AppError;

/// Fewer words than this is not a resume.
pub const MIN_RESUME_WORDS: usize = 150;
/// A resume must mention at least this many of `SECTION_KEYWORDS`.
pub const MIN_SECTION_KEYWORDS: usize = 2;

const SECTION_KEYWORDS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "projects",
    "internship",
    "certifications",
    "summary",
    "work",
];

/// Rejects documents that are obviously not resumes before any provider is
/// called. Keywords match as case-insensitive substrings.
pub fn validate_resume_text(text: &str) -> Result<(), AppError> {
    let word_count = text.split_whitespace().count();
    if word_count < MIN_RESUME_WORDS {
        return Err(AppError::Validation(format!(
            "Invalid document detected. A full resume usually contains at least {MIN_RESUME_WORDS} words."
        )));
    }

    let lower = text.to_lowercase();
    let sections = SECTION_KEYWORDS
        .iter()
        .filter(|keyword| lower.contains(*keyword))
        .count();
    if sections < MIN_SECTION_KEYWORDS {
        return Err(AppError::Validation(
            "Invalid document detected. This looks like a marksheet or single certificate. \
             Please upload your resume (Experience, Skills and Education sections)."
                .to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filler(words: usize) -> String {
        vec!["lorem"; words].join(" ")
    }

    #[test]
    fn test_short_text_is_rejected() {
        let text = format!("Experience Education {}", filler(100));
        let err = validate_resume_text(&text).unwrap_err();
        assert!(err.to_string().contains("150 words"));
    }

    #[test]
    fn test_single_section_is_rejected() {
        let text = format!("Semester marks {}", filler(160));
        let text = format!("{text} Education");
        assert!(matches!(
            validate_resume_text(&text),
            Err(AppError::Validation(msg)) if msg.contains("marksheet")
        ));
    }

    #[test]
    fn test_resume_passes() {
        let text = format!("SUMMARY {} Work history and Skills", filler(150));
        assert!(validate_resume_text(&text).is_ok());
    }

    #[test]
    fn test_keywords_match_inside_words() {
        // "workshop" counts as "work", "projects" as itself
        let text = format!("{} workshop projects", filler(150));
        assert!(validate_resume_text(&text).is_ok());
    }
}
