use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use instant::Instant;

use crossfill::{
    find_fill, letter_grid, render_grid, save_image, Crossword, CrosswordError, FillFailure, SolverOptions,
    Structure, ValueOrdering, Vocabulary,
};

/// Fill a crossword structure with words from a vocabulary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Structure file: one row per line, '_' for fillable cells and '#' for blocks
    structure: PathBuf,

    /// Vocabulary file: one word per line
    words: PathBuf,

    /// Also draw the filled grid as a PNG image at this path
    output: Option<PathBuf>,

    /// Try candidates in vocabulary order instead of least-constraining first
    #[arg(long)]
    domain_order: bool,

    /// Don't break ties between equally constrained variables by their number of crossings
    #[arg(long)]
    no_degree: bool,
}

fn main() -> ExitCode {
    crossfill::log::init_logger(std::env::var("CROSSFILL_DEBUG").is_ok());

    let cli = Cli::parse();

    match try_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e} [{}]", e.code());
            ExitCode::FAILURE
        }
    }
}

/// Load the inputs, solve, and print the grid (or "No solution."). Unsatisfiable puzzles are a
/// normal outcome; only unreadable or malformed input is an error.
fn try_main(cli: &Cli) -> Result<(), CrosswordError> {
    let start = Instant::now();

    let crossword = Crossword::new(Structure::load_from_path(&cli.structure)?);
    let vocabulary = Vocabulary::load_from_path(&cli.words)?;
    log::debug!(
        "loaded {} variables and {} words",
        crossword.variables.len(),
        vocabulary.len()
    );

    let options = SolverOptions {
        value_ordering: if cli.domain_order {
            ValueOrdering::DomainOrder
        } else {
            ValueOrdering::LeastConstraining
        },
        degree_tie_break: !cli.no_degree,
    };

    match find_fill(&crossword, &vocabulary, options) {
        Ok(result) => {
            let letters = letter_grid(&crossword, &vocabulary, &result.assignment);
            let display_grid = render_grid(&crossword, &letters);
            println!("{}", display_grid);

            if let Some(output) = &cli.output {
                save_image(&crossword, &letters, output)?;
                log::info!("saved grid image to {}", output.display());
            }

            eprintln!("{:?}", result.statistics);
        }
        Err(failure) => {
            if let FillFailure::EmptyDomain(variable_id) = failure {
                log::info!("no candidates left for {}", crossword.variable(variable_id));
            }
            println!("No solution.");
        }
    }

    eprintln!("Finished in {:.3}s", start.elapsed().as_secs_f64());

    Ok(())
}
