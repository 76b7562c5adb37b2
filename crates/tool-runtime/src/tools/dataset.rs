//! Mock clinical dataset backing the demo tools.
//!
//! Read-only, baked into the binary. The tool handlers treat these records
//! as opaque lookups; nothing outside this module depends on their shape.

pub struct PatientRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub age: u32,
    pub conditions: &'static [&'static str],
}

pub struct HealthCondition {
    pub name: &'static str,
    pub description: &'static str,
    pub severity: &'static str,
}

pub static PATIENTS: &[PatientRecord] = &[
    PatientRecord {
        id: "P001",
        name: "Maria Alvarez",
        age: 72,
        conditions: &["hypertension", "type 2 diabetes", "chronic kidney disease"],
    },
    PatientRecord {
        id: "P002",
        name: "James Okafor",
        age: 58,
        conditions: &["asthma"],
    },
    PatientRecord {
        id: "P003",
        name: "Lena Fischer",
        age: 45,
        conditions: &["migraine"],
    },
    PatientRecord {
        id: "P004",
        name: "Robert Chen",
        age: 81,
        conditions: &["atrial fibrillation", "hypertension"],
    },
];

pub static CONDITIONS: &[HealthCondition] = &[
    HealthCondition {
        name: "hypertension",
        description: "Persistently elevated arterial blood pressure.",
        severity: "moderate",
    },
    HealthCondition {
        name: "type 2 diabetes",
        description: "Chronic impairment of insulin regulation and blood sugar control.",
        severity: "moderate",
    },
    HealthCondition {
        name: "chronic kidney disease",
        description: "Gradual loss of kidney function over months or years.",
        severity: "high",
    },
    HealthCondition {
        name: "asthma",
        description: "Chronic inflammatory disease of the airways with reversible obstruction.",
        severity: "low",
    },
    HealthCondition {
        name: "atrial fibrillation",
        description: "Irregular, often rapid heart rhythm originating in the atria.",
        severity: "high",
    },
    HealthCondition {
        name: "migraine",
        description: "Recurrent moderate-to-severe headache, often with sensory disturbance.",
        severity: "low",
    },
];

pub fn find_patient(id: &str) -> Option<&'static PatientRecord> {
    PATIENTS.iter().find(|p| p.id == id)
}

pub fn find_condition(name: &str) -> Option<&'static HealthCondition> {
    CONDITIONS
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
}
