use rand::Rng;

/// Synthetic per-request metrics attached to a classification. These are
/// independent random draws from fixed ranges; they carry no predictive
/// validity and are not derived from model internals.
#[derive(Debug, Clone)]
pub struct Enrichment {
    pub genetic_markers: Vec<f32>,
    pub health_score: f32,
    pub stress_level: f32,
    pub risk_factors: Vec<f32>,
}

pub fn generate() -> Enrichment {
    let mut rng = rand::rng();
    Enrichment {
        genetic_markers: (0..5).map(|_| rng.random_range(0.3..0.9)).collect(),
        health_score: rng.random_range(70.0..98.0),
        stress_level: rng.random_range(20.0..60.0),
        risk_factors: (0..3).map(|_| rng.random_range(0.1..0.7)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_in_documented_ranges() {
        for _ in 0..50 {
            let enrichment = generate();
            assert_eq!(enrichment.genetic_markers.len(), 5);
            assert_eq!(enrichment.risk_factors.len(), 3);
            assert!(enrichment
                .genetic_markers
                .iter()
                .all(|m| (0.3..0.9).contains(m)));
            assert!((70.0..98.0).contains(&enrichment.health_score));
            assert!((20.0..60.0).contains(&enrichment.stress_level));
            assert!(enrichment
                .risk_factors
                .iter()
                .all(|r| (0.1..0.7).contains(r)));
        }
    }
}
