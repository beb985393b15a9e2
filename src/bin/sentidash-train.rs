//! Developer utility to train the toy TF-IDF + logistic regression sentiment model.

use std::path::PathBuf;

use sentidash::logging;
use sentidash::ml::artifacts::save_artifacts;
use sentidash::ml::trainer::{TrainerOptions, train_toy_model};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        println!("{}", help_text());
        return Ok(());
    };
    if let Err(err) = logging::init_stderr() {
        eprintln!("Logging disabled: {err}");
    }

    let report = train_toy_model(&options.trainer).map_err(|err| err.to_string())?;
    println!(
        "Trained on {} sentences, evaluated on {} ({} terms)",
        report.train_size,
        report.test_size,
        report.vocabulary_size()
    );
    println!("train accuracy: {:.4}", report.train_accuracy);
    println!();
    println!("{}", report.render());

    let paths = save_artifacts(
        &options.out_dir,
        &report.artifacts.vectorizer,
        &report.artifacts.model,
    )
    .map_err(|err| err.to_string())?;
    println!("Saved vectorizer to {}", paths.vectorizer.display());
    println!("Saved model to {}", paths.model.display());
    Ok(())
}

#[derive(Debug, Clone)]
struct CliOptions {
    out_dir: PathBuf,
    trainer: TrainerOptions,
}

fn parse_args(args: Vec<String>) -> Result<Option<CliOptions>, String> {
    let mut out_dir = PathBuf::from("artifacts");
    let mut trainer = TrainerOptions::default();

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Ok(None),
            "--out" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--out requires a value".to_string())?;
                out_dir = PathBuf::from(value);
            }
            "--seed" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--seed requires a value".to_string())?;
                trainer.seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid --seed value: {value}"))?;
            }
            "--epochs" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--epochs requires a value".to_string())?;
                trainer.logreg.epochs = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid --epochs value: {value}"))?;
            }
            "--learning-rate" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--learning-rate requires a value".to_string())?;
                trainer.logreg.learning_rate = value
                    .parse::<f32>()
                    .map_err(|_| format!("Invalid --learning-rate value: {value}"))?;
            }
            "--l2" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--l2 requires a value".to_string())?;
                trainer.logreg.l2 = value
                    .parse::<f32>()
                    .map_err(|_| format!("Invalid --l2 value: {value}"))?;
            }
            "--test-fraction" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--test-fraction requires a value".to_string())?;
                trainer.test_fraction = value
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid --test-fraction value: {value}"))?;
            }
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }

    Ok(Some(CliOptions { out_dir, trainer }))
}

fn help_text() -> String {
    [
        "sentidash-train",
        "",
        "Trains a TF-IDF + logistic regression sentiment model on the built-in toy corpus,",
        "prints a classification report and confusion matrix, and saves the artifacts.",
        "",
        "Usage:",
        "  sentidash-train [--out artifacts] [options]",
        "",
        "Options:",
        "  --out <dir>              Artifact directory (default: artifacts).",
        "  --seed <u64>             Split and initialization seed (default: 42).",
        "  --epochs <n>             Training epochs (default: 300).",
        "  --learning-rate <f32>    Learning rate (default: 0.5).",
        "  --l2 <f32>               L2 weight decay (default: 0.0001).",
        "  --test-fraction <f64>    Held-out share per class (default: 0.2).",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn defaults_write_to_artifacts() {
        let options = parse_args(Vec::new()).unwrap().unwrap();
        assert_eq!(options.out_dir, PathBuf::from("artifacts"));
        assert_eq!(options.trainer.seed, 42);
    }

    #[test]
    fn parses_overrides() {
        let options = parse_args(args(&["--out", "tmp/out", "--seed", "7", "--epochs", "5"]))
            .unwrap()
            .unwrap();
        assert_eq!(options.out_dir, PathBuf::from("tmp/out"));
        assert_eq!(options.trainer.seed, 7);
        assert_eq!(options.trainer.logreg.epochs, 5);
    }

    #[test]
    fn help_and_errors() {
        assert!(parse_args(args(&["--help"])).unwrap().is_none());
        assert!(parse_args(args(&["--seed"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
    }
}
