use fedsearch_core::{ResourceDescriptor, ResourceScore, SearchResult, SelectionScorer};

/// Default resource-selection scorer.
///
/// Ranks child resources by how many query terms occur in their id or
/// name. Tombstones never score. With no query the annotation is simply
/// cleared. Ranking quality is not the engine's concern; only that
/// scoring runs at the right moments and can never fail a request.
pub struct TermOverlapScorer;

impl SelectionScorer for TermOverlapScorer {
    fn score(
        &self,
        result: &mut SearchResult,
        query: Option<&str>,
        resources: &[ResourceDescriptor],
    ) {
        result.scored_resources.clear();
        let Some(query) = query else {
            return;
        };

        let terms: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(String::from)
            .collect();

        let mut scores: Vec<ResourceScore> = resources
            .iter()
            .filter(|resource| !resource.deleted)
            .filter_map(|resource| {
                let mut haystack = resource.id.to_lowercase();
                if let Some(name) = &resource.name {
                    haystack.push(' ');
                    haystack.push_str(&name.to_lowercase());
                }
                let score = terms
                    .iter()
                    .filter(|term| haystack.contains(term.as_str()))
                    .count();
                (score > 0).then(|| ResourceScore {
                    resource_id: resource.id.clone(),
                    score,
                })
            })
            .collect();

        scores.sort_by(|a, b| b.score.cmp(&a.score).then(a.resource_id.cmp(&b.resource_id)));
        result.scored_resources = scores;
    }
}
