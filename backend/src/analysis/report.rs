use std::collections::BTreeMap;

use shared::{CompatibilityInfo, DnaAnalysis, HealthAnalysis, PredictionResponse};

use crate::analysis::compatibility::{self, BLOOD_GROUPS};
use crate::analysis::enrichment::Enrichment;
use crate::inference::model::Classification;

/// Merges a classification and its enrichment into the response payload.
/// Pure function; the handler serializes the result as-is.
pub fn assemble(classification: &Classification, enrichment: Enrichment) -> PredictionResponse {
    let probabilities: BTreeMap<String, f32> = BLOOD_GROUPS
        .iter()
        .zip(&classification.probabilities)
        .map(|(group, p)| ((*group).to_string(), *p))
        .collect();

    PredictionResponse {
        blood_group: classification.label.to_string(),
        confidence: classification.confidence,
        probabilities,
        dna_analysis: DnaAnalysis {
            genetic_markers: enrichment.genetic_markers,
            confidence: classification.confidence,
        },
        health_analysis: HealthAnalysis {
            stress_level: enrichment.stress_level,
            health_score: enrichment.health_score,
            risk_factors: enrichment.risk_factors,
        },
        compatibility: CompatibilityInfo {
            compatible_groups: compatibility::compatible_groups(classification.label)
                .iter()
                .map(|g| g.to_string())
                .collect(),
            medical_info: compatibility::medical_info(classification.label),
        },
    }
}
