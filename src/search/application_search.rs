// The MIT License (MIT)
//
// Copyright (c) 2016 AT&T
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

use std::cmp::Ordering;
use serde::Serialize;
use crate::model::Application;
use super::similarity::{fuzzy_score, jaro_winkler};

#[derive(Clone, Debug, Serialize)]
pub struct SearchHit {
    pub application: Application,
    pub score: f64,
}

pub struct ApplicationSearch {
    threshold: f64,
}

impl ApplicationSearch {
    pub fn new(threshold: f64) -> ApplicationSearch {
        ApplicationSearch { threshold: threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Best similarity between the query and any searchable field of the application.
    pub fn score(&self, application: &Application, query: &str) -> f64 {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return 1.0;
        }

        searchable_fields(application)
            .iter()
            .map(|field| {
                match field.contains(&query) {
                    true => 1.0,
                    false => jaro_winkler(&query, field),
                }
            })
            .fold(0.0, f64::max)
    }

    pub fn matches(&self, application: &Application, query: &str) -> bool {
        self.score(application, query) >= self.threshold
    }

    pub fn search(&self, applications: &[Application], query: &str) -> Vec<SearchHit> {
        let mut hits: Vec<(SearchHit, u32)> = applications.iter()
            .map(|application| {
                let hit = SearchHit {
                    application: application.clone(),
                    score: self.score(application, query),
                };
                (hit, fuzzy_score(&application.name, query.trim()))
            })
            .filter(|&(ref hit, _)| hit.score >= self.threshold)
            .collect();

        hits.sort_by(|&(ref a, a_fuzzy), &(ref b, b_fuzzy)| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(b_fuzzy.cmp(&a_fuzzy))
                .then_with(|| a.application.name.cmp(&b.application.name))
                .then_with(|| a.application.version.cmp(&b.application.version))
        });

        debug!("search '{}' matched {} of {} applications",
               query,
               hits.len(),
               applications.len());
        hits.into_iter().map(|(hit, _)| hit).collect()
    }
}

fn searchable_fields(application: &Application) -> Vec<String> {
    let name = application.name.to_lowercase();
    let mut fields = vec![format!("{} {}", name, application.version.to_lowercase()),
                          application.resource.to_lowercase()];
    fields.extend(name.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string()));
    fields.extend(application.description
        .split_whitespace()
        .map(|word| word.to_lowercase()));
    fields.push(name);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Application> {
        let mut blast = Application::new("blast", "2.2", "pbs.example.org", "/opt/blast/bin/blastall");
        blast.description = "Basic local alignment search tool".to_string();
        let blastx = Application::new("blastx", "1.0", "pbs.example.org", "/opt/blast/bin/blastx");
        let gromacs = Application::new("gromacs", "4.6", "lsf.example.org", "/usr/bin/mdrun");
        let autodock = Application::new("autodock-vina", "1.1", "workstation", "/usr/bin/vina");
        vec![gromacs, blastx, autodock, blast]
    }

    fn names(hits: &[SearchHit]) -> Vec<&str> {
        hits.iter().map(|hit| hit.application.name.as_str()).collect()
    }

    #[test]
    fn blank_query_lists_everything_by_name() {
        let search = ApplicationSearch::new(0.8);
        let hits = search.search(&catalog(), "  ");

        assert_eq!(names(&hits), vec!["autodock-vina", "blast", "blastx", "gromacs"]);
        assert!(hits.iter().all(|hit| hit.score == 1.0));
    }

    #[test]
    fn substring_and_typo_matches() {
        let search = ApplicationSearch::new(0.85);

        let hits = search.search(&catalog(), "BLAST");
        assert_eq!(names(&hits), vec!["blast", "blastx"]);

        let hits = search.search(&catalog(), "gromax");
        assert_eq!(names(&hits), vec!["gromacs"]);
        assert!(hits[0].score < 1.0);
    }

    #[test]
    fn searches_tokens_description_and_resource() {
        let search = ApplicationSearch::new(0.9);

        assert_eq!(names(&search.search(&catalog(), "vina")), vec!["autodock-vina"]);
        assert_eq!(names(&search.search(&catalog(), "alignment")), vec!["blast"]);
        assert_eq!(names(&search.search(&catalog(), "lsf")), vec!["gromacs"]);
    }

    #[test]
    fn unrelated_query_matches_nothing() {
        let search = ApplicationSearch::new(0.8);

        assert!(search.search(&catalog(), "quantum espresso").is_empty());
    }
}
