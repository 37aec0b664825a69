use crate::storage::{keys, load_json, save_json, KeyValueStore};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

pub const CONTROL_VARIANT: &str = "control";

/// Sticky A/B assignments: experiment name -> variant.
pub struct Experiments {
    assignments: BTreeMap<String, String>,
    storage: Arc<dyn KeyValueStore>,
}

impl Experiments {
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let assignments = load_json(storage.as_ref(), keys::EXPERIMENTS).unwrap_or_default();
        Self {
            assignments,
            storage,
        }
    }

    /// The stored variant, or `control` for an experiment never assigned.
    pub fn variant(&self, experiment: &str) -> &str {
        self.assignments
            .get(experiment)
            .map(String::as_str)
            .unwrap_or(CONTROL_VARIANT)
    }

    pub fn assignments(&self) -> &BTreeMap<String, String> {
        &self.assignments
    }

    pub fn set_variant(&mut self, experiment: &str, variant: &str) {
        self.assignments
            .insert(experiment.to_string(), variant.to_string());
        self.persist();
    }

    /// Picks a random variant the first time and returns the stored one afterwards.
    pub fn assign(&mut self, experiment: &str, variants: &[&str]) -> String {
        self.assign_with(experiment, variants, &mut rand::thread_rng())
    }

    pub fn assign_with<R: Rng + ?Sized>(
        &mut self,
        experiment: &str,
        variants: &[&str],
        rng: &mut R,
    ) -> String {
        if let Some(existing) = self.assignments.get(experiment) {
            return existing.clone();
        }
        let chosen = variants.choose(rng).copied().unwrap_or(CONTROL_VARIANT);
        info!(experiment, variant = chosen, "Experiments: assigned variant");
        self.set_variant(experiment, chosen);
        chosen.to_string()
    }

    fn persist(&self) {
        if let Err(e) = save_json(self.storage.as_ref(), keys::EXPERIMENTS, &self.assignments) {
            warn!(error = %e, "Experiments: failed to persist");
        }
    }
}
