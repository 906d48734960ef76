use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PredictionResponse {
    pub blood_group: String,
    pub confidence: f32,
    pub probabilities: BTreeMap<String, f32>,
    pub dna_analysis: DnaAnalysis,
    pub health_analysis: HealthAnalysis,
    pub compatibility: CompatibilityInfo,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DnaAnalysis {
    pub genetic_markers: Vec<f32>,
    pub confidence: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthAnalysis {
    pub stress_level: f32,
    pub health_score: f32,
    pub risk_factors: Vec<f32>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CompatibilityInfo {
    pub compatible_groups: Vec<String>,
    pub medical_info: MedicalInfo,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MedicalInfo {
    pub allergies: Vec<String>,
    pub common_conditions: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DonationRequest {
    pub donor_id: Option<String>,
    pub blood_type: Option<String>,
    pub amount: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DonationResponse {
    pub status: String,
    pub donation_hash: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DonationRecord {
    pub donor_id: String,
    pub blood_type: String,
    pub amount: f64,
    pub timestamp: String,
    pub hash: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VerifyResponse {
    pub valid: bool,
    pub donation_data: Option<DonationRecord>,
}
