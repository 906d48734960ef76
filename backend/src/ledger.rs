use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use shared::DonationRecord;

/// In-memory content-addressed donation store. Records are keyed by their
/// SHA-256 hash; `chain` keeps insertion order. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct DonationLedger {
    inner: Arc<Mutex<LedgerState>>,
}

#[derive(Default)]
struct LedgerState {
    donations: HashMap<String, DonationRecord>,
    chain: Vec<String>,
}

impl DonationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, donor_id: &str, blood_type: &str, amount: f64) -> DonationRecord {
        let timestamp = Utc::now().to_rfc3339();
        let hash = donation_hash(donor_id, blood_type, amount, &timestamp);
        let record = DonationRecord {
            donor_id: donor_id.to_string(),
            blood_type: blood_type.to_string(),
            amount,
            timestamp,
            hash: hash.clone(),
        };

        let mut state = self.inner.lock().unwrap();
        state.donations.insert(hash.clone(), record.clone());
        state.chain.push(hash);
        log::info!(
            "Donation recorded for {}; chain length {}",
            record.donor_id,
            state.chain.len()
        );
        record
    }

    pub fn verify(&self, hash: &str) -> bool {
        self.inner.lock().unwrap().donations.contains_key(hash)
    }

    pub fn get(&self, hash: &str) -> Option<DonationRecord> {
        self.inner.lock().unwrap().donations.get(hash).cloned()
    }
}

fn donation_hash(donor_id: &str, blood_type: &str, amount: f64, timestamp: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{donor_id}{blood_type}{amount}{timestamp}"));
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_then_verify_roundtrip() {
        let ledger = DonationLedger::new();
        let record = ledger.record("donor-1", "O-", 450.0);

        assert!(ledger.verify(&record.hash));
        let stored = ledger.get(&record.hash).unwrap();
        assert_eq!(stored.donor_id, "donor-1");
        assert_eq!(stored.blood_type, "O-");
        assert_eq!(stored.amount, 450.0);
        assert_eq!(stored.hash, record.hash);
    }

    #[test]
    fn unknown_hash_is_invalid() {
        let ledger = DonationLedger::new();
        assert!(!ledger.verify("no-such-hash"));
        assert!(ledger.get("no-such-hash").is_none());
    }

    #[test]
    fn distinct_donations_get_distinct_hashes() {
        let ledger = DonationLedger::new();
        let a = ledger.record("donor-1", "A+", 350.0);
        let b = ledger.record("donor-2", "A+", 350.0);
        assert_ne!(a.hash, b.hash);
        assert!(ledger.verify(&a.hash) && ledger.verify(&b.hash));
    }
}
