//! graphmaster CLI — driving adapter for the graphmaster matcher.
//!
//! Subcommands:
//! - `match <corpus> <input> [--that T] [--topic T] [--trace] [--sentences]` — print the winning template
//! - `star <corpus> <input> [--segment S] [--index N] [--that T] [--topic T]` — print one wildcard capture
//! - `check <corpus>` — validate a corpus file
//! - `info <corpus>` — print corpus and trie statistics
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`).

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use graphmaster::{split_sentences, CorpusConfig, MatchTrace, Segment, Trie};

#[derive(Parser)]
#[command(name = "graphmaster", version, about = "Wildcard pattern matcher for conversational rule corpora")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Match an utterance and print the winning template and its path.
    Match {
        /// Corpus file (.yaml, .yml or .json).
        corpus: PathBuf,

        /// The user's utterance.
        input: String,

        #[command(flatten)]
        context: Context,

        /// Print every edge the search entered.
        #[arg(long)]
        trace: bool,

        /// Split the input on `.`, `?` and `!` and match each sentence.
        #[arg(long)]
        sentences: bool,
    },

    /// Print the text captured by one wildcard of the winning rule.
    Star {
        /// Corpus file (.yaml, .yml or .json).
        corpus: PathBuf,

        /// The user's utterance.
        input: String,

        #[command(flatten)]
        context: Context,

        /// Segment to read: star, thatstar or topicstar.
        #[arg(long, default_value = "star")]
        segment: Segment,

        /// 1-based wildcard index within the segment.
        #[arg(long, default_value_t = 1)]
        index: usize,
    },

    /// Validate a corpus file.
    Check {
        /// Corpus file (.yaml, .yml or .json).
        corpus: PathBuf,
    },

    /// Print corpus and trie statistics.
    Info {
        /// Corpus file (.yaml, .yml or .json).
        corpus: PathBuf,
    },
}

/// Conversational context shared by `match` and `star`.
#[derive(Args, Debug, Clone, Default)]
struct Context {
    /// The previous response.
    #[arg(long, default_value = "")]
    that: String,

    /// The current topic.
    #[arg(long, default_value = "")]
    topic: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

fn run(command: Command) -> Result<String, String> {
    match command {
        Command::Match {
            corpus,
            input,
            context,
            trace,
            sentences,
        } => {
            let trie = load_corpus(&corpus)?;
            Ok(cmd_match(&trie, &input, &context, trace, sentences))
        }
        Command::Star {
            corpus,
            input,
            context,
            segment,
            index,
        } => {
            let trie = load_corpus(&corpus)?;
            Ok(cmd_star(&trie, &input, &context, segment, index))
        }
        Command::Check { corpus } => cmd_check(&load_config(&corpus)?),
        Command::Info { corpus } => cmd_info(&load_config(&corpus)?),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_match(trie: &Trie<String>, input: &str, context: &Context, trace: bool, sentences: bool) -> String {
    let utterances = if sentences {
        split_sentences(input)
    } else {
        vec![input]
    };

    let mut out = String::new();
    for utterance in utterances {
        if sentences {
            let _ = writeln!(out, "> {utterance}");
        }

        let result = if trace {
            let traced = trie.query_with_trace(utterance, &context.that, &context.topic);
            write_trace(&mut out, &traced);
            traced.result
        } else {
            trie.query(utterance, &context.that, &context.topic)
        };
        match &result {
            Some(m) => {
                let _ = writeln!(out, "{}", m.template);
                let _ = writeln!(out, "  path: {}", m.path);
            }
            None => out.push_str("(no match)\n"),
        }
    }
    out
}

fn cmd_star(trie: &Trie<String>, input: &str, context: &Context, segment: Segment, index: usize) -> String {
    let text = trie.capture(input, &context.that, &context.topic, segment, index);
    format!("{text}\n")
}

fn cmd_check(config: &CorpusConfig) -> Result<String, String> {
    let trie = config.build().map_err(|e| format!("corpus invalid: {e}"))?;

    let mut out = format!(
        "Corpus valid: {} rules, {} templates\n",
        trie.rule_count(),
        trie.template_count()
    );
    let duplicates = trie.rule_count() - trie.template_count();
    if duplicates > 0 {
        let _ = writeln!(out, "  {duplicates} duplicate rule keys ignored");
    }
    Ok(out)
}

fn cmd_info(config: &CorpusConfig) -> Result<String, String> {
    let trie = config.build().map_err(|e| format!("corpus invalid: {e}"))?;

    let mut out = String::new();
    let _ = writeln!(out, "Categories: {}", config.len());
    let _ = writeln!(out, "Topic groups: {}", config.topics.len());
    let _ = writeln!(out, "Rules: {}", trie.rule_count());
    let _ = writeln!(out, "Templates: {}", trie.template_count());
    let _ = writeln!(out, "Trie nodes: {}", trie.node_count());
    Ok(out)
}

fn write_trace(out: &mut String, trace: &MatchTrace<'_, String>) {
    for step in &trace.steps {
        let _ = writeln!(
            out,
            "{:indent$}{} [{}] {}",
            "",
            step.token,
            step.consumed,
            if step.matched { "ok" } else { "dead end" },
            indent = step.depth * 2
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Corpus loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_config(path: &Path) -> Result<CorpusConfig, String> {
    CorpusConfig::from_path(path).map_err(|e| e.to_string())
}

fn load_corpus(path: &Path) -> Result<Trie<String>, String> {
    load_config(path)?
        .build()
        .map_err(|e| format!("corpus invalid: {e}"))
}
