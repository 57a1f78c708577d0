use crate::core::text::{candidate_text, normalize, tokenize};
use crate::models::{CandidateProfile, JobListing, ScoringWeights};

/// Calculate a match score (0-1) between a job listing and a candidate profile
///
/// Scoring formula:
/// score = (
///     location_score +          # exact match 0.4, substring match 0.2
///     overlap_fraction * 0.6    # share of requirement tokens found in the
///                               # candidate's description + preference text
/// )
///
/// Also returns the distinct requirement terms that matched, for display.
/// Pure and deterministic; empty fields contribute zero rather than erroring.
pub fn match_score(
    job: &JobListing,
    profile: &CandidateProfile,
    weights: &ScoringWeights,
) -> (f64, Vec<String>) {
    let mut score = location_score(&job.location, &profile.location, weights);

    let (overlap_score, matched_terms) = requirements_score(
        &job.requirements,
        &candidate_text(&profile.job_description, &profile.job_preference),
        weights,
    );
    score += overlap_score;

    (score.clamp(0.0, 1.0), matched_terms)
}

/// Location component (0, `location_partial` or `location_exact`)
///
/// Exact case-insensitive equality earns the full weight. Otherwise, if either
/// location contains the other ("Thane" vs "Thane West"), the partial weight.
/// Empty locations never match anything, including each other.
#[inline]
fn location_score(job_location: &str, profile_location: &str, weights: &ScoringWeights) -> f64 {
    let job_loc = normalize(job_location);
    let profile_loc = normalize(profile_location);

    if job_loc.is_empty() || profile_loc.is_empty() {
        return 0.0;
    }

    if job_loc == profile_loc {
        weights.location_exact
    } else if profile_loc.contains(&job_loc) || job_loc.contains(&profile_loc) {
        weights.location_partial
    } else {
        0.0
    }
}

/// Requirement-overlap component (0 to `requirements`)
///
/// Each whitespace token of the requirements text counts once per occurrence
/// (no deduplication), so a repeated token weighs the fraction accordingly.
/// A token matches when it appears as a substring anywhere in the candidate
/// text. An empty token list contributes 0, never NaN.
fn requirements_score(
    requirements: &str,
    candidate_text: &str,
    weights: &ScoringWeights,
) -> (f64, Vec<String>) {
    let tokens = tokenize(requirements);
    if tokens.is_empty() {
        return (0.0, Vec::new());
    }

    let mut overlap_count = 0usize;
    let mut matched_terms: Vec<String> = Vec::new();

    for token in &tokens {
        if candidate_text.contains(token.as_str()) {
            overlap_count += 1;
            if !matched_terms.contains(token) {
                matched_terms.push(token.clone());
            }
        }
    }

    let fraction = overlap_count as f64 / tokens.len() as f64;
    (fraction * weights.requirements, matched_terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_job(location: &str, requirements: &str) -> JobListing {
        JobListing {
            id: "job1".to_string(),
            title: "Test Job".to_string(),
            location: location.to_string(),
            requirements: requirements.to_string(),
            status: "active".to_string(),
            employer_id: None,
            created_at: None,
        }
    }

    fn create_profile(location: &str, description: &str, preference: &str) -> CandidateProfile {
        CandidateProfile {
            user_id: "user1".to_string(),
            name: None,
            location: location.to_string(),
            job_description: description.to_string(),
            job_preference: preference.to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_exact_location_and_partial_overlap() {
        // Location exact (0.4) + 1 of 2 requirement tokens (0.3) = 0.7
        let job = create_job("Mumbai", "cooking cleaning");
        let profile = create_profile("mumbai", "experienced in cooking", "");

        let (score, matched) = match_score(&job, &profile, &ScoringWeights::default());
        assert!((score - 0.7).abs() < 1e-9, "expected 0.7, got {}", score);
        assert_eq!(matched, vec!["cooking"]);
    }

    #[test]
    fn test_partial_location_no_overlap() {
        // "thane" is a substring of "thane west" (0.2); "driving" is not a
        // substring of "driver", so no text overlap.
        let job = create_job("Thane West", "driving");
        let profile = create_profile("Thane", "", "driver");

        let (score, matched) = match_score(&job, &profile, &ScoringWeights::default());
        assert!((score - 0.2).abs() < 1e-9, "expected 0.2, got {}", score);
        assert!(matched.is_empty());
    }

    #[test]
    fn test_all_empty_scores_zero() {
        let job = create_job("", "");
        let profile = create_profile("", "", "");

        let (score, matched) = match_score(&job, &profile, &ScoringWeights::default());
        assert_eq!(score, 0.0);
        assert!(matched.is_empty());
        assert!(score.is_finite());
    }

    #[test]
    fn test_full_match_scores_one() {
        let job = create_job("Pune", "cooking cleaning");
        let profile = create_profile("pune", "cooking and cleaning for ten years", "cook");

        let (score, matched) = match_score(&job, &profile, &ScoringWeights::default());
        assert!((score - 1.0).abs() < 1e-9, "expected 1.0, got {}", score);
        assert_eq!(matched, vec!["cooking", "cleaning"]);
    }

    #[test]
    fn test_unrelated_locations_and_text_score_zero() {
        let job = create_job("Delhi", "welding fabrication");
        let profile = create_profile("Chennai", "tailoring", "tailor");

        let (score, _) = match_score(&job, &profile, &ScoringWeights::default());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_duplicate_tokens_count_per_occurrence() {
        // "cooking" appears twice in the requirement list: 2 of 3 tokens match.
        let job = create_job("", "cooking cooking cleaning");
        let profile = create_profile("", "cooking", "");

        let (score, matched) = match_score(&job, &profile, &ScoringWeights::default());
        assert!((score - (2.0 / 3.0) * 0.6).abs() < 1e-9);
        // Matched terms are deduplicated for display.
        assert_eq!(matched, vec!["cooking"]);
    }

    #[test]
    fn test_substring_containment_is_lenient() {
        // "clean" matches inside "cleaning" by substring containment.
        let job = create_job("", "clean");
        let profile = create_profile("", "cleaning houses", "");

        let (score, matched) = match_score(&job, &profile, &ScoringWeights::default());
        assert!((score - 0.6).abs() < 1e-9);
        assert_eq!(matched, vec!["clean"]);
    }

    #[test]
    fn test_score_is_deterministic() {
        let job = create_job("Mumbai", "cooking cleaning household work");
        let profile = create_profile("Navi Mumbai", "cooking", "household help");
        let weights = ScoringWeights::default();

        let (first, _) = match_score(&job, &profile, &weights);
        for _ in 0..10 {
            let (again, _) = match_score(&job, &profile, &weights);
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_score_within_bounds() {
        let cases = [
            ("Mumbai", "a b c d e", "mumbai", "a b c d e", "a"),
            ("", "x", "", "", ""),
            ("X", "", "x", "y", "z"),
        ];
        for (jl, req, pl, desc, pref) in cases {
            let job = create_job(jl, req);
            let profile = create_profile(pl, desc, pref);
            let (score, _) = match_score(&job, &profile, &ScoringWeights::default());
            assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
        }
    }
}
