use clap::Args;
use kodex::error::AppError;
use kodex::scanner::{
    default_tier_parameters, scan, AnswerSet, EstimatorInputs, FineEstimate, QuestionCatalog,
    ScanReport,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScanArgs {
    /// JSON object mapping question ids to answer values
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Annual turnover used for the fine exposure estimate
    #[arg(long)]
    pub(crate) turnover: Option<f64>,
    /// Currency label for the fine exposure estimate
    #[arg(long, default_value = "EUR")]
    pub(crate) currency: String,
    /// Print the full report as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_scan(args: ScanArgs) -> Result<(), AppError> {
    let ScanArgs {
        answers,
        turnover,
        currency,
        json,
    } = args;

    let raw = std::fs::read_to_string(&answers)?;
    let answers: AnswerSet = serde_json::from_str(&raw)?;
    let warnings = answer_warnings(&answers, &QuestionCatalog::standard());

    let inputs = turnover.map(|turnover| EstimatorInputs {
        turnover: Some(turnover),
        currency: Some(currency),
        tier_parameters: default_tier_parameters(),
    });
    let report = scan(&answers, inputs.as_ref());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report, &warnings);
    }
    Ok(())
}

/// Unknown questions, off-catalog values and unanswered required questions.
///
/// Scanning still proceeds; these only flag answers the rule table cannot use.
pub(crate) fn answer_warnings(answers: &AnswerSet, catalog: &QuestionCatalog) -> Vec<String> {
    let mut warnings = Vec::new();

    for (question_id, value) in answers.iter() {
        match catalog.question(question_id) {
            None => warnings.push(format!("unknown question '{question_id}' ignored")),
            Some(question) if !question.accepts(value) => warnings.push(format!(
                "'{value}' is not an option for {question_id}; treated as not matching"
            )),
            Some(_) => {}
        }
    }

    for question_id in catalog.required_ids() {
        if answers.get(question_id).is_none() {
            warnings.push(format!("required question {question_id} is unanswered"));
        }
    }

    warnings
}

fn render_report(report: &ScanReport, warnings: &[String]) {
    let classification = &report.classification;

    if !warnings.is_empty() {
        println!("Input warnings");
        for warning in warnings {
            println!("- {warning}");
        }
        println!();
    }

    println!(
        "Risk bucket: {} (confidence {})",
        classification.bucket,
        classification.confidence.label()
    );
    println!("{}", classification.plain_language_summary);

    if !classification.decisive_factors.is_empty() {
        println!("\nDecisive factors");
        for factor in &classification.decisive_factors {
            println!("- [{}] {}", factor.rule_id, factor.reason);
        }
    }

    if !classification.missing_info.is_empty() {
        println!("\nMissing information");
        for missing in &classification.missing_info {
            println!("- {}: {}", missing.label, missing.follow_up_question);
        }
    }

    println!("\nWhat would change the outcome");
    for sentence in &classification.what_changes_outcome {
        println!("- {sentence}");
    }

    println!("\nRoadmap");
    for task in &report.roadmap {
        let marker = if task.is_top_5 { "*" } else { " " };
        println!(
            "{marker}{:>2}. [{:?}] {} ({}, effort {:?}, owner {})",
            task.order,
            task.priority,
            task.title,
            task.theme.label(),
            task.effort,
            task.owner
        );
    }

    match &report.estimate {
        Some(FineEstimate::Exposure {
            min,
            max,
            currency,
            tier,
            assumptions,
        }) => {
            println!("\nFine exposure (tier {tier}): {currency} {min:.2} - {max:.2}");
            for assumption in assumptions {
                println!("- {assumption}");
            }
        }
        Some(FineEstimate::Unavailable { error, .. }) => println!("\nFine exposure: {error}"),
        None => {}
    }

    println!("\nAssumptions");
    for assumption in &classification.assumptions {
        println!("- {assumption}");
    }
}
