use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::classifiers::{Class, bayes::NaiveBayes, bayes::SafeScores, bayes::Scores};
use crate::ui::cli::args::{Command, ModelArgs, ScoreMode, tokenize};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const FG_YELLOW: &str = "\x1b[33m";

/// Runs one command. `input` is only read when a document is expected and
/// no words were given on the command line.
pub fn execute<R: BufRead, W: Write>(command: Command, input: R, out: &mut W) -> Result<()> {
    match command {
        Command::New(args) => {
            let path = args.model.model.clone();
            let nb = args
                .into_config()?
                .build()
                .context("failed to build classifier")?;
            save(&nb, &path)?;
            writeln!(out, "created {} with {} classes", path.display(), nb.classes().len())?;
        }
        Command::Learn(args) => {
            let nb = load(&args.model)?;
            let words = document(args.words, input)?;
            if words.is_empty() {
                bail!("no document given: pass words as arguments or on stdin");
            }
            nb.learn(&words, &Class::from(args.class))
                .context("failed to learn document")?;
            save(&nb, &args.model.model)?;
            writeln!(out, "learned {} words, {} documents total", words.len(), nb.learned())?;
        }
        Command::Observe(args) => {
            let nb = load(&args.model)?;
            nb.observe(&args.word, args.count, &Class::from(args.class))
                .context("failed to observe word")?;
            save(&nb, &args.model.model)?;
        }
        Command::Convert(model) => {
            let nb = load(&model)?;
            nb.convert_terms_freq_to_tf_idf()
                .context("failed to convert to tf-idf")?;
            save(&nb, &model.model)?;
            writeln!(out, "converted {} classes to tf-idf", nb.classes().len())?;
        }
        Command::Score(args) => {
            let nb = load(&args.model)?;
            let words = document(args.words, input)?;
            let scores = match args.mode {
                ScoreMode::Log => nb.log_scores(&words)?,
                ScoreMode::Prob => nb.prob_scores(&words)?,
                ScoreMode::Safe => match nb.safe_prob_scores(&words)? {
                    SafeScores::Exact(s) => s,
                    SafeScores::Underflow(s) => {
                        writeln!(
                            out,
                            "{FG_YELLOW}underflow detected, probabilities rebuilt from log scores{RESET}"
                        )?;
                        s
                    }
                },
            };
            print_scores(out, &nb.classes(), &scores, args.mode)?;
            // scoring bumps the seen counter
            save(&nb, &args.model.model)?;
        }
        Command::Info(model) => {
            let nb = load(&model)?;
            print_info(out, &nb)?;
        }
        Command::ExportClasses(args) => {
            let nb = load(&args.model)?;
            nb.write_classes_to_file(&args.dir)
                .with_context(|| format!("failed to export classes to {}", args.dir.display()))?;
            writeln!(out, "exported {} classes to {}", nb.classes().len(), args.dir.display())?;
        }
        Command::ImportClass(args) => {
            let nb = load(&args.model)?;
            let class = Class::from(args.class);
            nb.read_class_from_file(&class, &args.dir)
                .with_context(|| format!("failed to import class '{class}'"))?;
            save(&nb, &args.model.model)?;
            writeln!(out, "imported class '{class}' from {}", args.dir.display())?;
        }
    }
    Ok(())
}

fn load(model: &ModelArgs) -> Result<NaiveBayes> {
    NaiveBayes::from_file(&model.model)
        .with_context(|| format!("failed to read classifier {}", model.model.display()))
}

fn save(nb: &NaiveBayes, path: &Path) -> Result<()> {
    nb.write_to_file(path)
        .with_context(|| format!("failed to write classifier {}", path.display()))
}

fn document<R: BufRead>(words: Vec<String>, input: R) -> Result<Vec<String>> {
    if !words.is_empty() {
        return Ok(words);
    }
    let mut doc = Vec::new();
    for line in input.lines() {
        doc.extend(tokenize(&line.context("failed to read document from stdin")?));
    }
    Ok(doc)
}

fn print_scores<W: Write>(
    out: &mut W,
    classes: &[Class],
    scores: &Scores,
    mode: ScoreMode,
) -> Result<()> {
    writeln!(out, "{DIM}mode={mode}{RESET}")?;
    for (i, (class, score)) in classes.iter().zip(&scores.scores).enumerate() {
        if i == scores.likely {
            writeln!(out, "{BOLD}* {class:<20} {score:>16.10e}{RESET}")?;
        } else {
            writeln!(out, "  {class:<20} {score:>16.10e}")?;
        }
    }
    if !scores.strict {
        writeln!(out, "{DIM}tie: the most likely class is not unique{RESET}")?;
    }
    Ok(())
}

fn print_info<W: Write>(out: &mut W, nb: &NaiveBayes) -> Result<()> {
    writeln!(
        out,
        "learned={}  seen={}  tf_idf={}  converted={}",
        nb.learned(),
        nb.seen(),
        nb.is_tf_idf(),
        nb.did_convert()
    )?;
    let classes = nb.classes();
    for ((class, total), prior) in classes.iter().zip(nb.word_count()).zip(nb.priors()) {
        let vocabulary = nb.words_by_class(class)?.len();
        writeln!(
            out,
            "  {class:<20} words={total:<10} vocabulary={vocabulary:<8} prior={prior:.6}"
        )?;
    }
    Ok(())
}
