//! Clinical decision-support core.
//!
//! Pure classifiers (`normalizer`, `risk`, `lab`) feed the `synthesizer`,
//! which turns their outputs plus nursing narrative into routed alert drafts.
//! `engine` wires them together per encounter; `store` owns persisted alerts.

pub mod engine;
pub mod lab;
pub mod messages;
pub mod normalizer;
pub mod reference;
pub mod risk;
pub mod risk_matrix;
pub mod store;
pub mod synthesizer;
pub mod types;

pub use engine::DefaultDecisionEngine;
pub use risk::{RiskAssessment, RiskResult};
pub use store::MemoryAlertStore;
pub use types::{AlertStore, CdsError, DecisionSupport, EncounterEvaluation};
