//! Per-candidate state for the screening results view

use std::collections::HashMap;

use crate::api::{ApiClient, Evaluation, Outcome, ResumeId, ScreeningBackend, ScreeningResult, SkillTest};

/// State owned by one result row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowState {
    pub evaluation: Option<Evaluation>,
    pub skill_tests: Option<Vec<SkillTest>>,
    pub evaluating: bool,
    pub generating_tests: bool,
    /// Last failed request for this row, cleared by the next success
    pub last_error: Option<String>,
}

/// Evaluation and skill-test state for every result row, keyed by resume
#[derive(Debug, Clone, Default)]
pub struct ResultsPresenter {
    rows: HashMap<ResumeId, RowState>,
}

impl ResultsPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self, resume: &str) -> Option<&RowState> {
        self.rows.get(resume)
    }

    pub fn evaluation(&self, resume: &str) -> Option<&Evaluation> {
        self.row(resume).and_then(|r| r.evaluation.as_ref())
    }

    pub fn skill_tests(&self, resume: &str) -> Option<&[SkillTest]> {
        self.row(resume).and_then(|r| r.skill_tests.as_deref())
    }

    pub fn is_evaluating(&self, resume: &str) -> bool {
        self.row(resume).is_some_and(|r| r.evaluating)
    }

    pub fn is_generating_tests(&self, resume: &str) -> bool {
        self.row(resume).is_some_and(|r| r.generating_tests)
    }

    /// Whether the view should offer test generation for this row
    pub fn can_generate_tests(&self, resume: &str) -> bool {
        self.evaluation(resume).is_some()
    }

    /// React to a new result list; an empty list tears the rows down
    pub fn on_results_replaced(&mut self, results: &[ScreeningResult]) {
        if results.is_empty() {
            self.rows.clear();
        }
    }

    fn row_mut(&mut self, resume: &str) -> &mut RowState {
        self.rows.entry(resume.to_string()).or_default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Evaluation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn begin_evaluate(&mut self, resume: &str) {
        self.row_mut(resume).evaluating = true;
    }

    /// Store the evaluation; a failure keeps any earlier evaluation
    pub fn finish_evaluate(&mut self, resume: &str, outcome: Outcome<Evaluation>) {
        let row = self.row_mut(resume);
        match outcome {
            Outcome::Success(evaluation) => {
                row.evaluation = Some(evaluation);
                row.last_error = None;
            }
            Outcome::Failed(e) => row.last_error = Some(format!("Evaluation failed: {}", e.summary())),
        }
        row.evaluating = false;
    }

    pub async fn evaluate<B: ScreeningBackend>(
        &mut self,
        api: &ApiClient<B>,
        resume: &str,
        job_url: &str,
    ) {
        self.begin_evaluate(resume);
        let outcome = api.evaluate_resume(resume, job_url).await;
        self.finish_evaluate(resume, outcome);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Skill tests
    // ─────────────────────────────────────────────────────────────────────────

    pub fn begin_generate_tests(&mut self, resume: &str) {
        self.row_mut(resume).generating_tests = true;
    }

    /// Store the generated tests; a failure keeps any earlier tests
    pub fn finish_generate_tests(&mut self, resume: &str, outcome: Outcome<Vec<SkillTest>>) {
        let row = self.row_mut(resume);
        match outcome {
            Outcome::Success(tests) => {
                row.skill_tests = Some(tests);
                row.last_error = None;
            }
            Outcome::Failed(e) => {
                row.last_error = Some(format!("Test generation failed: {}", e.summary()))
            }
        }
        row.generating_tests = false;
    }

    /// Generate tests for a row. Does not check that the row was evaluated.
    pub async fn generate_tests<B: ScreeningBackend>(
        &mut self,
        api: &ApiClient<B>,
        resume: &str,
        job_url: &str,
    ) {
        self.begin_generate_tests(resume);
        let outcome = api.generate_skill_tests(resume, job_url).await;
        self.finish_generate_tests(resume, outcome);
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;

    use super::*;
    use crate::api::{MockScreeningBackend, Rating};
    use crate::error::ScreenError;

    const JOB: &str = "https://example.com/job/42";

    fn hire() -> Evaluation {
        Evaluation {
            relevance: Rating::Number(90.0),
            strengths: vec!["Python".into()],
            weaknesses: vec![],
            recommendation: "Hire".into(),
        }
    }

    #[tokio::test]
    async fn test_evaluate_stores_nested_evaluation() {
        let mut backend = MockScreeningBackend::new();
        backend
            .expect_evaluate_resume()
            .withf(|resume, job| resume == "alice.pdf" && job == JOB)
            .times(1)
            .returning(|_, _| Ok(hire()));
        let api = ApiClient::new(backend);

        let mut presenter = ResultsPresenter::new();
        presenter.evaluate(&api, "alice.pdf", JOB).await;

        assert_eq!(presenter.evaluation("alice.pdf"), Some(&hire()));
        assert!(presenter.evaluation("alice.pdf").unwrap().weaknesses.is_empty());
        assert!(!presenter.is_evaluating("alice.pdf"));
        assert!(presenter.can_generate_tests("alice.pdf"));
        assert!(presenter.evaluation("bob.pdf").is_none());
    }

    #[tokio::test]
    async fn test_re_evaluation_overwrites() {
        let mut seq = Sequence::new();
        let mut backend = MockScreeningBackend::new();
        backend
            .expect_evaluate_resume()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(hire()));
        backend
            .expect_evaluate_resume()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Ok(Evaluation {
                    relevance: Rating::Text("40".into()),
                    strengths: vec![],
                    weaknesses: vec!["No SQL".into()],
                    recommendation: "Reject".into(),
                })
            });
        let api = ApiClient::new(backend);

        let mut presenter = ResultsPresenter::new();
        presenter.evaluate(&api, "alice.pdf", JOB).await;
        presenter.evaluate(&api, "alice.pdf", JOB).await;

        assert_eq!(
            presenter.evaluation("alice.pdf").unwrap().recommendation,
            "Reject"
        );
    }

    #[tokio::test]
    async fn test_failed_evaluation_keeps_previous_and_clears_flag() {
        let mut seq = Sequence::new();
        let mut backend = MockScreeningBackend::new();
        backend
            .expect_evaluate_resume()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(hire()));
        backend
            .expect_evaluate_resume()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(ScreenError::Transport("timed out".into())));
        let api = ApiClient::new(backend);

        let mut presenter = ResultsPresenter::new();
        presenter.evaluate(&api, "alice.pdf", JOB).await;
        presenter.evaluate(&api, "alice.pdf", JOB).await;

        let row = presenter.row("alice.pdf").unwrap();
        assert_eq!(row.evaluation, Some(hire()));
        assert!(!row.evaluating);
        assert!(row.last_error.as_deref().unwrap().starts_with("Evaluation failed"));
    }

    #[tokio::test]
    async fn test_generate_tests_without_evaluation_is_allowed() {
        let mut backend = MockScreeningBackend::new();
        backend
            .expect_generate_skill_tests()
            .times(1)
            .returning(|_, _| Ok(vec![SkillTest::no_test_generated()]));
        let api = ApiClient::new(backend);

        let mut presenter = ResultsPresenter::new();
        assert!(!presenter.can_generate_tests("bob.pdf"));
        presenter.generate_tests(&api, "bob.pdf", JOB).await;

        assert_eq!(
            presenter.skill_tests("bob.pdf"),
            Some(&[SkillTest::no_test_generated()][..])
        );
        assert!(!presenter.is_generating_tests("bob.pdf"));
    }

    #[test]
    fn test_rows_are_independent() {
        let mut presenter = ResultsPresenter::new();
        presenter.begin_evaluate("alice.pdf");
        presenter.begin_evaluate("bob.pdf");
        presenter.begin_generate_tests("alice.pdf");

        presenter.finish_evaluate("bob.pdf", Outcome::Success(hire()));

        assert!(presenter.is_evaluating("alice.pdf"));
        assert!(presenter.is_generating_tests("alice.pdf"));
        assert!(!presenter.is_evaluating("bob.pdf"));
        assert!(presenter.evaluation("alice.pdf").is_none());
    }

    #[test]
    fn test_last_settled_request_wins() {
        let mut presenter = ResultsPresenter::new();
        presenter.begin_evaluate("alice.pdf");
        presenter.begin_evaluate("alice.pdf");

        let mut late = hire();
        late.recommendation = "Shortlist".into();

        presenter.finish_evaluate("alice.pdf", Outcome::Success(hire()));
        presenter.finish_evaluate("alice.pdf", Outcome::Success(late));

        assert_eq!(
            presenter.evaluation("alice.pdf").unwrap().recommendation,
            "Shortlist"
        );
    }

    #[test]
    fn test_empty_results_tear_down_rows() {
        let mut presenter = ResultsPresenter::new();
        presenter.finish_evaluate("alice.pdf", Outcome::Success(hire()));

        presenter.on_results_replaced(&[ScreeningResult {
            resume: "alice.pdf".into(),
            score: 0.9,
        }]);
        assert!(presenter.evaluation("alice.pdf").is_some());

        presenter.on_results_replaced(&[]);
        assert!(presenter.row("alice.pdf").is_none());
    }
}
