use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueHint};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::config::ClassifierConfig;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Train and query naive Bayes text classifiers stored on disk"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an empty classifier file
    New(NewArgs),
    /// Learn one document for a class
    Learn(LearnArgs),
    /// Add occurrences of a word to a class without counting a document
    Observe(ObserveArgs),
    /// Convert learned term frequencies to tf-idf weights
    Convert(ModelArgs),
    /// Score a document against every class
    Score(ScoreArgs),
    /// Print counters and per-class statistics
    Info(ModelArgs),
    /// Write every class to its own file inside a directory
    ExportClasses(DirArgs),
    /// Replace one class with the statistics stored inside a directory
    ImportClass(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ModelArgs {
    /// Classifier file
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub model: PathBuf,
}

#[derive(Debug, Args)]
pub struct NewArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Class name, repeat for every class (at least two)
    #[arg(long = "class", value_name = "CLASS", required_unless_present = "config")]
    pub classes: Vec<String>,

    /// JSON config with `classes` and `tf_idf`
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath, conflicts_with = "classes")]
    pub config: Option<PathBuf>,

    /// Weight words by tf-idf instead of raw counts
    #[arg(long)]
    pub tf_idf: bool,
}

impl NewArgs {
    pub fn into_config(self) -> Result<ClassifierConfig> {
        let config = match self.config {
            Some(path) => ClassifierConfig::from_file(&path)
                .with_context(|| format!("failed to read config {}", path.display()))?,
            None => ClassifierConfig::new(self.classes),
        };
        let tf_idf = config.tf_idf || self.tf_idf;
        Ok(config.with_tf_idf(tf_idf))
    }
}

#[derive(Debug, Args)]
pub struct LearnArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Class the document belongs to
    #[arg(long, value_name = "CLASS")]
    pub class: String,

    /// Document words; read from stdin when omitted
    #[arg(value_name = "WORD")]
    pub words: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ObserveArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    #[arg(long, value_name = "CLASS")]
    pub class: String,

    #[arg(long, value_name = "WORD")]
    pub word: String,

    #[arg(
        long,
        default_value_t = 1,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    pub count: u64,
}

#[derive(Debug, Args)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Scoring domain (log, prob, safe)
    #[arg(long, default_value = "log", value_name = "MODE", value_parser = parse_score_mode)]
    pub mode: ScoreMode,

    /// Document words; read from stdin when omitted. An empty document scores by the priors
    #[arg(value_name = "WORD")]
    pub words: Vec<String>,
}

#[derive(Debug, Args)]
pub struct DirArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub dir: PathBuf,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    #[arg(long, value_name = "CLASS")]
    pub class: String,

    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ScoreMode {
    Log,
    Prob,
    Safe,
}

fn parse_score_mode(raw: &str) -> Result<ScoreMode, String> {
    parse_kind::<ScoreMode>(raw).map_err(|_| {
        let known: Vec<String> = ScoreMode::iter().map(|m| m.to_string()).collect();
        format!("unknown mode '{raw}', expected one of: {}", known.join(", "))
    })
}

fn parse_kind<T>(raw: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("empty value");
    }
    for cand in [trimmed.to_string(), trimmed.to_lowercase()] {
        if let Ok(parsed) = cand.parse::<T>() {
            return Ok(parsed);
        }
    }
    Err(anyhow!("could not parse value '{raw}'"))
}

/// Splits free text into words on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}
