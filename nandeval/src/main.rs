use std::io;

use clap::Parser;
use color_eyre::eyre::bail;
use log::{error, info};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use nandgraph::reduce;

const SAMPLES: [&str; 3] = ["!(!(1.2).3)", "!(1.2).3", "!(10.20).!(30.40)"];

/// Evaluate NAND expressions such as `!(!(1.2).3)` and print the graph of paired values.
#[derive(Parser, Debug)]
#[command(author, version)]
struct Cli {
    /// Expressions to evaluate [default: a few samples]
    #[arg(value_name = "EXPR")]
    expressions: Vec<String>,

    /// Print the graph as Graphviz DOT instead of a listing
    #[arg(long)]
    dot: bool,

    /// Only print the result of each expression
    #[arg(short, long)]
    quiet: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    TermLogger::init(args.log_level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;
    info!("args = {:?}", args);

    let expressions = if args.expressions.is_empty() {
        SAMPLES.iter().map(|&s| s.to_owned()).collect()
    } else {
        args.expressions.clone()
    };

    let mut failed = 0;
    for expression in &expressions {
        if !run(&args, expression)? {
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{failed} of {} expressions could not be evaluated", expressions.len());
    }

    Ok(())
}

/// Evaluate one expression, returning false if it was rejected.
fn run(args: &Cli, expression: &str) -> color_eyre::Result<bool> {
    if !args.quiet {
        println!("Input: {expression}");
    }

    let reduction = match reduce(expression) {
        Ok(reduction) => reduction,
        Err(e) => {
            error!("{expression}: {e}");
            println!("Error: {e}");
            return Ok(false);
        }
    };
    info!("{expression} = {}", reduction.result);

    if args.quiet {
        println!("{}", reduction.result);
        return Ok(true);
    }

    for step in &reduction.trace {
        println!("\t{step}");
    }
    println!();

    if args.dot {
        reduction.graph.write_graphviz(io::stdout().lock())?;
    } else {
        println!("{}", reduction.graph);
    }

    println!("Output: {}", reduction.result);
    println!();

    Ok(true)
}
