//! scrib - randomized markdown fixture generator

use std::fs;
use std::process::ExitCode;

use clap::Parser;

use scrib::{
    Document, Generator, RandomSource, Result, SeededSource, Sizes, ThreadSource, render_document,
};

#[derive(Parser)]
#[command(name = "scrib")]
#[command(version, about = "Randomized markdown/shortcode fixture generator", long_about = None)]
#[command(after_help = "EXAMPLES:
    scrib                        Print one random document
    scrib --seed 42              Reproducible document
    scrib --count 3 -o out.md    Three documents into a file
    scrib --dump-ast             Print the document tree as JSON")]
struct Cli {
    /// Seed for reproducible output (defaults to OS entropy)
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Block size budget
    #[arg(long, value_name = "N", default_value_t = 10)]
    blocks: usize,

    /// Inline size budget
    #[arg(long, value_name = "N", default_value_t = 10)]
    inline: usize,

    /// Sentence size budget
    #[arg(long, value_name = "N", default_value_t = 10)]
    sentence: usize,

    /// Number of documents to generate
    #[arg(long, value_name = "N", default_value_t = 1)]
    count: usize,

    /// Print the document tree as JSON instead of rendered markup
    #[arg(long)]
    dump_ast: bool,

    /// Write to a file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Suppress status messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let sizes = Sizes {
        inline: cli.inline,
        block: cli.blocks,
        sentence: cli.sentence,
    };

    let mut out = String::new();
    for i in 0..cli.count {
        let document = match cli.seed {
            // Distinct stream per document so --count doesn't repeat itself.
            Some(seed) => generate(SeededSource::new(seed.wrapping_add(i as u64)), sizes),
            None => generate(ThreadSource::new(), sizes),
        };

        if cli.dump_ast {
            out.push_str(&serde_json::to_string_pretty(&document)?);
            out.push('\n');
        } else {
            out.push_str(&render_document(&document)?);
        }
    }

    match &cli.output {
        Some(path) => {
            fs::write(path, &out)?;
            if !cli.quiet {
                eprintln!("wrote {} document(s) to {path}", cli.count);
            }
        }
        None => println!("{out}"),
    }

    Ok(())
}

fn generate<R: RandomSource>(rng: R, sizes: Sizes) -> Document {
    let mut generator = Generator::with_source(rng);
    generator.sizes = sizes;
    generator.generate_document()
}
