use shared::MedicalInfo;

/// Blood group labels in model output order. The classifier's probability
/// vector is indexed by this array.
pub const BLOOD_GROUPS: [&str; 8] = ["A-", "A+", "AB-", "AB+", "B-", "B+", "O-", "O+"];

/// Donor groups a recipient with the given blood group can accept. `O-` can
/// only receive from itself; `AB+` is the universal recipient.
pub fn compatible_groups(group: &str) -> &'static [&'static str] {
    match group {
        "A-" => &["A-", "O-"],
        "A+" => &["A-", "A+", "O-", "O+"],
        "AB-" => &["A-", "B-", "AB-", "O-"],
        "AB+" => &["A-", "A+", "B-", "B+", "AB-", "AB+", "O-", "O+"],
        "B-" => &["B-", "O-"],
        "B+" => &["B-", "B+", "O-", "O+"],
        "O-" => &["O-"],
        "O+" => &["O-", "O+"],
        other => panic!("unknown blood group label: {other}"),
    }
}

/// Illustrative medical notes keyed by the first character of the group, so
/// `AB+`/`AB-` resolve to the `A` entry.
pub fn medical_info(group: &str) -> MedicalInfo {
    let (allergies, common_conditions): (&[&str], &[&str]) = match group.chars().next() {
        Some('A') => (
            &["penicillin", "sulfa drugs"],
            &["heart disease", "diabetes"],
        ),
        Some('B') => (
            &["tetracycline"],
            &["stomach ulcers", "respiratory infections"],
        ),
        Some('O') => (&["aspirin"], &["ulcers", "thyroid problems"]),
        _ => panic!("unknown blood group label: {group}"),
    };
    MedicalInfo {
        allergies: allergies.iter().map(|s| s.to_string()).collect(),
        common_conditions: common_conditions.iter().map(|s| s.to_string()).collect(),
    }
}
