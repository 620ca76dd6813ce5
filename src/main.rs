use clap::{Parser, Subcommand};
use std::path::PathBuf;

use kindred::catalog::{self, validation, ProfileCatalog, QuestionCatalog};
use kindred::couple::{self, compare_couple, CoupleInput};
use kindred::matching::match_profiles;
use kindred::output;
use kindred::respondent::{load_respondent, RespondentFile, ResponseSet};
use kindred::scoring::compute_scores;

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one respondent's answers and match profiles
    Score {
        /// Path to the respondent's answers (JSON)
        responses: PathBuf,

        /// Override the gender recorded in the respondent file
        #[arg(long)]
        gender: Option<String>,

        /// Emit the raw result as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Compare two respondents' assessments
    Compare {
        /// Primary respondent's answers (JSON)
        primary: PathBuf,

        /// Spouse respondent's answers (JSON)
        spouse: PathBuf,

        /// Path to comparison config (YAML); stock thresholds without it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit the raw report as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Strictly validate the catalogs and config, reporting every problem
    Check {
        /// Path to comparison config (YAML) to validate as well
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "kindred")]
#[command(about = "Relationship assessment scoring and compatibility CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to question catalog (defaults to ~/.config/kindred/questions.yaml)
    #[arg(short, long, global = true)]
    questions: Option<PathBuf>,

    /// Path to profile catalog (defaults to ~/.config/kindred/profiles.yaml)
    #[arg(short, long, global = true)]
    profiles: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
}

fn load_question_catalog(cli: &Cli) -> QuestionCatalog {
    let raw = match catalog::load_questions(cli.questions.clone()) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("Catalog error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if cli.verbose {
        eprintln!("Loaded {} questions", raw.len());
    }

    // Bad entries are skipped with a warning; one malformed question must
    // not break scoring for everyone
    let (questions, warnings) = QuestionCatalog::new(raw);
    print_warnings(&warnings);

    if questions.is_empty() {
        eprintln!("Question catalog has no usable questions.");
        std::process::exit(EXIT_CONFIG);
    }
    questions
}

fn load_profile_catalog(cli: &Cli) -> ProfileCatalog {
    let raw = match catalog::load_profiles(cli.profiles.clone()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Catalog error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if cli.verbose {
        eprintln!("Loaded {} profiles", raw.len());
    }

    let (profiles, warnings) = ProfileCatalog::new(raw);
    print_warnings(&warnings);
    profiles
}

fn load_answers(path: &PathBuf) -> (RespondentFile, ResponseSet) {
    let file = match load_respondent(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Respondent error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };
    let (responses, warnings) = ResponseSet::from_responses(file.responses.clone());
    print_warnings(&warnings);
    (file, responses)
}

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Score { responses, gender, json } => {
            let questions = load_question_catalog(&cli);
            let profiles = load_profile_catalog(&cli);
            let (file, response_set) = load_answers(responses);

            let outcome = compute_scores(&questions, &response_set);
            print_warnings(&outcome.warnings);

            let gender = gender.clone().or_else(|| file.gender.clone());
            let matched = match_profiles(&profiles, &outcome.scores.sections, gender.as_deref());
            print_warnings(&matched.warnings);

            if *json {
                let payload = serde_json::json!({
                    "scores": outcome.scores,
                    "match": matched,
                });
                println!("{}", serde_json::to_string_pretty(&payload).expect("report is serializable"));
            } else {
                let order = questions.sections();
                let report = output::format_assessment(
                    &file,
                    &outcome.scores,
                    &matched,
                    &order,
                    output::should_use_colors(),
                );
                print!("{}", report);
            }
        }
        Commands::Compare { primary, spouse, config, json } => {
            let questions = load_question_catalog(&cli);
            let compare_config = match couple::load_compare_config(config.clone()) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            if let Err(errors) = couple::validate_compare_config(&compare_config) {
                eprintln!("Compare config errors:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_CONFIG);
            }

            let (_primary_file, primary_responses) = load_answers(primary);
            let (_spouse_file, spouse_responses) = load_answers(spouse);

            let primary_outcome = compute_scores(&questions, &primary_responses);
            let spouse_outcome = compute_scores(&questions, &spouse_responses);
            print_warnings(&primary_outcome.warnings);
            print_warnings(&spouse_outcome.warnings);

            let report = compare_couple(
                &questions,
                CoupleInput {
                    responses: &primary_responses,
                    scores: &primary_outcome.scores,
                },
                CoupleInput {
                    responses: &spouse_responses,
                    scores: &spouse_outcome.scores,
                },
                &compare_config,
            );
            print_warnings(&report.warnings);

            if *json {
                println!("{}", serde_json::to_string_pretty(&report).expect("report is serializable"));
            } else {
                print!("{}", output::format_compatibility(&report, output::should_use_colors()));
            }
        }
        Commands::Check { config } => {
            let raw_questions = match catalog::load_questions(cli.questions.clone()) {
                Ok(q) => q,
                Err(e) => {
                    eprintln!("Catalog error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            let raw_profiles = match catalog::load_profiles(cli.profiles.clone()) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Catalog error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            let compare_config = match couple::load_compare_config(config.clone()) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            let mut all_errors = Vec::new();
            if let Err(errors) = validation::validate_questions(&raw_questions) {
                all_errors.extend(errors);
            }
            if let Err(errors) = validation::validate_profiles(&raw_profiles, &raw_questions) {
                all_errors.extend(errors);
            }
            if let Err(errors) = couple::validate_compare_config(&compare_config) {
                all_errors.extend(errors);
            }

            if all_errors.is_empty() {
                println!(
                    "OK: {} questions, {} profiles",
                    raw_questions.len(),
                    raw_profiles.len()
                );
            } else {
                eprintln!("Found {} problem(s):", all_errors.len());
                for error in &all_errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
