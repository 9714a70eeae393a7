//! Language Ranking Module
//!
//! Counts repositories per primary language and keeps the most common ones.

use std::collections::HashMap;

use crate::models::RepoSummary;

/// Number of languages shown on the card
pub const TOP_LANGUAGES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCount {
    pub name: String,
    pub count: usize,
}

/// Counts repositories per primary language and returns the `limit` most
/// common, highest first. Ties keep the order in which the languages first
/// appear in `repos`. Repositories without a language are skipped.
pub fn top_languages(repos: &[RepoSummary], limit: usize) -> Vec<LanguageCount> {
    let mut tally: Vec<LanguageCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for language in repos.iter().filter_map(|r| r.language.as_deref()) {
        match index.get(language) {
            Some(&i) => tally[i].count += 1,
            None => {
                index.insert(language, tally.len());
                tally.push(LanguageCount {
                    name: language.to_string(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, which preserves first-seen order for equal counts
    tally.sort_by(|a, b| b.count.cmp(&a.count));
    tally.truncate(limit);
    tally
}
