//! Keyword gap between a job description and a resume

use std::collections::HashSet;

/// Vocabulary terms present in the job tokens but absent from the resume tokens.
///
/// Both documents are compared as whitespace-split token sets. The result
/// follows the vocabulary's declared order; repeated vocabulary terms are
/// reported once, ignoring case.
pub fn skill_gap(resume: &str, job: &str, vocabulary: &[String]) -> Vec<String> {
    let resume_tokens = token_set(resume);
    let job_tokens = token_set(job);

    let mut reported: HashSet<String> = HashSet::new();
    let mut missing = Vec::new();
    for skill in vocabulary {
        let term = skill.to_lowercase();
        if job_tokens.contains(&term) && !resume_tokens.contains(&term) && reported.insert(term) {
            missing.push(skill.clone());
        }
    }
    missing
}

fn token_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Reference important-skills vocabulary
pub fn default_vocabulary() -> Vec<String> {
    [
        "python", "machine", "learning", "sql", "data", "analysis", "django", "flask", "react",
        "tensorflow", "pytorch", "nlp", "statistics", "api", "cloud", "excel", "power", "bi",
        "tableau",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reports_job_terms_missing_from_resume() {
        let missing = skill_gap(
            "python sql pandas",
            "python sql tableau power bi dashboards",
            &vocab(&["python", "sql", "tableau", "power", "bi"]),
        );
        assert_eq!(missing, vec!["tableau", "power", "bi"]);
    }

    #[test]
    fn test_output_follows_vocabulary_order() {
        let missing = skill_gap("", "bi tableau api", &vocab(&["tableau", "api", "bi"]));
        assert_eq!(missing, vec!["tableau", "api", "bi"]);
    }

    #[test]
    fn test_terms_absent_from_job_are_ignored() {
        let missing = skill_gap("", "python", &vocab(&["react", "python"]));
        assert_eq!(missing, vec!["python"]);
    }

    #[test]
    fn test_matches_whole_tokens_only() {
        let missing = skill_gap("pythonic", "python", &vocab(&["python"]));
        assert_eq!(missing, vec!["python"]);

        let missing = skill_gap("", "pythonic", &vocab(&["python"]));
        assert!(missing.is_empty());
    }

    #[test]
    fn test_duplicate_vocabulary_terms_reported_once() {
        let missing = skill_gap("", "sql", &vocab(&["sql", "sql"]));
        assert_eq!(missing, vec!["sql"]);

        let missing = skill_gap("", "sql tableau", &vocab(&["SQL", "tableau", "sql"]));
        assert_eq!(missing, vec!["SQL", "tableau"]);
    }

    #[test]
    fn test_default_vocabulary() {
        let vocabulary = default_vocabulary();
        assert_eq!(vocabulary.len(), 19);
        assert_eq!(vocabulary.last().map(String::as_str), Some("tableau"));
    }
}
