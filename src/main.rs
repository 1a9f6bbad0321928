use clap::Parser;
use combicalc::{
    error::Error,
    interpreter::{
        evaluator::Bindings, expression::Expression, lexer::VARIABLE_NAME, summation::Summation,
        value::Numeric,
    },
    token::format_tokens,
};

/// combicalc evaluates integer expressions with checked 64-bit arithmetic.
///
/// The expression may use digits, `+ - * / % ^`, the factorial `!`,
/// parentheses and the variable `k`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Binds the variable `k` to this value.
    #[arg(short, allow_negative_numbers = true)]
    k: Option<i64>,

    /// Sums the expression over `k` from START to END, both inclusive.
    #[arg(long,
          num_args = 2,
          value_names = ["START", "END"],
          allow_negative_numbers = true,
          conflicts_with = "k")]
    sum: Option<Vec<i64>>,

    /// Prints the postfix form before the result.
    #[arg(long)]
    postfix: bool,

    expression: String,
}

fn run(args: &Args) -> Result<i64, Error> {
    let mut bindings = Bindings::new();
    if let Some(k) = args.k {
        bindings.insert(VARIABLE_NAME.to_string(), k);
    }

    let expression = Expression::parse_with(&args.expression, bindings)?;

    if args.postfix {
        println!("{}", format_tokens(&expression.postfix()?));
    }

    match args.sum.as_deref() {
        Some(&[start, end]) => Ok(Summation::new(start, end, expression)?.eval()?),
        _ => expression.evaluate(),
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(value) => println!("{value}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}
