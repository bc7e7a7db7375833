//! Per-run record of every comparison, insertion-ordered for reporting.

/// One recorded comparison. Immutable once recorded.
#[derive(Debug, Clone)]
pub struct TestOutcome {
    pub scenario: String,
    pub success: bool,
    pub message: String,
}

#[derive(Debug)]
struct ScenarioRecord {
    name: String,
    outcomes: Vec<TestOutcome>,
}

/// Scenario name -> ordered outcomes, accumulated for the lifetime of one
/// run. Insertion order of scenarios is preserved for the summary table.
#[derive(Debug, Default)]
pub struct ResultLedger {
    records: Vec<ScenarioRecord>,
}

impl ResultLedger {
    pub fn record(&mut self, outcome: TestOutcome) {
        match self
            .records
            .iter_mut()
            .find(|record| record.name == outcome.scenario)
        {
            Some(record) => record.outcomes.push(outcome),
            None => self.records.push(ScenarioRecord {
                name: outcome.scenario.clone(),
                outcomes: vec![outcome],
            }),
        }
    }

    pub fn scenario_names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.name.as_str())
    }

    pub fn success_count(&self, name: &str) -> usize {
        self.outcomes(name)
            .map(|outcomes| outcomes.iter().filter(|o| o.success).count())
            .unwrap_or(0)
    }

    pub fn fail_count(&self, name: &str) -> usize {
        self.outcomes(name)
            .map(|outcomes| outcomes.iter().filter(|o| !o.success).count())
            .unwrap_or(0)
    }

    /// A scenario passes when none of its recorded outcomes failed.
    pub fn scenario_passed(&self, name: &str) -> bool {
        self.fail_count(name) == 0
    }

    /// Grand (success, fail) totals across all scenarios.
    pub fn totals(&self) -> (usize, usize) {
        let mut success = 0usize;
        let mut fail = 0usize;
        for record in &self.records {
            for outcome in &record.outcomes {
                if outcome.success {
                    success = success.saturating_add(1);
                } else {
                    fail = fail.saturating_add(1);
                }
            }
        }
        (success, fail)
    }

    fn outcomes(&self, name: &str) -> Option<&Vec<TestOutcome>> {
        self.records
            .iter()
            .find(|record| record.name == name)
            .map(|record| &record.outcomes)
    }
}
