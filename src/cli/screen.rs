//! Screening, evaluation and skill-test CLI command handlers

use futures::future::join_all;

use crate::api::{Evaluation, SkillTest};
use crate::cli::commands::{CandidateArgs, ScreenArgs};
use crate::core::config::Config;
use crate::error::{Result, ScreenError};
use crate::screening::{match_summary, ResultsPresenter, ScreeningSession};

/// Handle `cvs screen`
pub async fn handle_screen(config: Config, args: ScreenArgs) -> Result<()> {
    let mut session = ScreeningSession::new(args.top_n.unwrap_or(config.top_n));
    session.set_job_url(args.job_url);

    // Validation runs before any connection is made
    let request = session.begin_screening()?;
    let api = super::connect(&config)?;

    println!("Screening resumes against {}...", request.job_url);
    let outcome = api.run_screening(&request.job_url, request.top_n).await;
    session.finish_screening(outcome);

    if let Some(failure) = session.last_failure() {
        println!("{}", failure);
    }
    if session.results().is_empty() {
        println!("No screening results.");
        return Ok(());
    }

    let mut presenter = ResultsPresenter::new();
    presenter.on_results_replaced(session.results());

    if args.evaluate {
        let resumes: Vec<String> = session
            .results()
            .iter()
            .map(|r| r.resume.clone())
            .collect();

        // Rows are independent, so their requests run side by side
        for resume in &resumes {
            presenter.begin_evaluate(resume);
        }
        let outcomes = join_all(
            resumes
                .iter()
                .map(|resume| api.evaluate_resume(resume, &request.job_url)),
        )
        .await;
        for (resume, outcome) in resumes.iter().zip(outcomes) {
            presenter.finish_evaluate(resume, outcome);
        }

        if args.tests {
            let evaluated: Vec<&String> = resumes
                .iter()
                .filter(|r| presenter.can_generate_tests(r))
                .collect();
            for resume in &evaluated {
                presenter.begin_generate_tests(resume);
            }
            let outcomes = join_all(
                evaluated
                    .iter()
                    .map(|resume| api.generate_skill_tests(resume, &request.job_url)),
            )
            .await;
            for (resume, outcome) in evaluated.iter().zip(outcomes) {
                presenter.finish_generate_tests(resume, outcome);
            }
        }
    }

    println!("\nScreening Results:\n");
    for result in session.results() {
        println!("{} — {}", result.resume, match_summary(result.score));

        if let Some(row) = presenter.row(&result.resume) {
            if let Some(evaluation) = &row.evaluation {
                print_evaluation(evaluation);
            }
            if let Some(tests) = &row.skill_tests {
                print_skill_tests(tests);
            }
            if let Some(err) = &row.last_error {
                println!("   {}", err);
            }
        }
        println!();
    }

    Ok(())
}

/// Handle `cvs evaluate <RESUME>`
pub async fn handle_evaluate(config: Config, args: CandidateArgs) -> Result<()> {
    let job_url = require_job_url(&args.job_url)?;
    let api = super::connect(&config)?;

    let mut presenter = ResultsPresenter::new();
    presenter.evaluate(&api, &args.resume, job_url).await;

    let row = presenter.row(&args.resume);
    match row.and_then(|r| r.evaluation.as_ref()) {
        Some(evaluation) => {
            println!("{}", args.resume);
            print_evaluation(evaluation);
            Ok(())
        }
        None => Err(row_failure(row.and_then(|r| r.last_error.clone()))),
    }
}

/// Handle `cvs test <RESUME>`
pub async fn handle_test(config: Config, args: CandidateArgs) -> Result<()> {
    let job_url = require_job_url(&args.job_url)?;
    let api = super::connect(&config)?;

    let mut presenter = ResultsPresenter::new();
    presenter.generate_tests(&api, &args.resume, job_url).await;

    let row = presenter.row(&args.resume);
    match row.and_then(|r| r.skill_tests.as_ref()) {
        Some(tests) => {
            println!("{}", args.resume);
            print_skill_tests(tests);
            Ok(())
        }
        None => Err(row_failure(row.and_then(|r| r.last_error.clone()))),
    }
}

/// Reject a blank job URL; anything else goes to the backend untouched
fn require_job_url(job_url: &str) -> Result<&str> {
    if job_url.trim().is_empty() {
        return Err(ScreenError::EmptyJobReference);
    }
    Ok(job_url)
}

fn row_failure(message: Option<String>) -> ScreenError {
    ScreenError::Backend(message.unwrap_or_else(|| "no result returned".to_string()))
}

fn print_evaluation(evaluation: &Evaluation) {
    println!("   Relevance: {}%", evaluation.relevance);
    println!("   Strengths:");
    for s in &evaluation.strengths {
        println!("     • {}", s);
    }
    println!("   Weaknesses:");
    for w in &evaluation.weaknesses {
        println!("     • {}", w);
    }
    println!("   Recommendation: {}", evaluation.recommendation);
}

fn print_skill_tests(tests: &[SkillTest]) {
    println!("   Generated Skill Tests:");
    for (i, test) in tests.iter().enumerate() {
        match &test.confidence {
            Some(confidence) => println!(
                "     {}. Skill: {} (Confidence: {})",
                i + 1,
                test.skill,
                confidence
            ),
            None => println!("     {}. Skill: {}", i + 1, test.skill),
        }
        println!("        Test: {}", test.test_text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_job_url_keeps_value_verbatim() {
        assert_eq!(
            require_job_url(" https://example.com/job/42 ").unwrap(),
            " https://example.com/job/42 "
        );
    }

    #[test]
    fn test_require_job_url_rejects_blank() {
        for blank in ["", "   ", "\t\n"] {
            assert!(matches!(
                require_job_url(blank),
                Err(ScreenError::EmptyJobReference)
            ));
        }
    }
}
