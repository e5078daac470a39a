use clap::{error::ErrorKind, value_parser, Arg, Command};
use intrig::{Bound, Extended, Interval, IntervalLiteral};
use itertools::Itertools;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Function {
    Sin,
    Cos,
    Tan,
    Cot,
    Csc,
    Sec,
    Asin,
    Acos,
    Atan,
    Atan2,
    SinPi,
    CosPi,
}

const FUNCTIONS: [(&str, Function); 12] = [
    ("sin", Function::Sin),
    ("cos", Function::Cos),
    ("tan", Function::Tan),
    ("cot", Function::Cot),
    ("csc", Function::Csc),
    ("sec", Function::Sec),
    ("asin", Function::Asin),
    ("acos", Function::Acos),
    ("atan", Function::Atan),
    ("atan2", Function::Atan2),
    ("sinpi", Function::SinPi),
    ("cospi", Function::CosPi),
];

impl Function {
    fn arity(self) -> usize {
        match self {
            Function::Atan2 => 2,
            _ => 1,
        }
    }

    /// `args` must have `self.arity()` elements.
    fn apply<T: Bound>(self, args: &[Interval<T>]) -> Interval<T> {
        use Function::*;
        let x = &args[0];
        match self {
            Sin => x.sin(),
            Cos => x.cos(),
            Tan => x.tan(),
            Cot => x.cot(),
            Csc => x.csc(),
            Sec => x.sec(),
            Asin => x.asin(),
            Acos => x.acos(),
            Atan => x.atan(),
            Atan2 => x.atan2(&args[1]),
            SinPi => x.sinpi(),
            CosPi => x.cospi(),
        }
    }
}

fn evaluate<T: Bound>(f: Function, args: &[&IntervalLiteral], digits: Option<usize>) -> String {
    let args = args
        .iter()
        .map(|lit| lit.to_interval::<T>())
        .collect::<Vec<_>>();
    let y = f.apply(&args);
    match digits {
        Some(digits) => format!("{:.*}", digits, y),
        _ => format!("{}", y),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut cmd = Command::new("trig")
        .about("Evaluates a trigonometric function over intervals with outward rounding.")
        .after_help(format!(
            "Functions: {}",
            FUNCTIONS.iter().map(|(name, _)| name).join(", ")
        ))
        .arg(
            Arg::new("function")
                .required(true)
                .value_parser(FUNCTIONS.map(|(name, _)| name))
                .help("Function to evaluate."),
        )
        .arg(
            Arg::new("args")
                .required(true)
                .num_args(1..=2)
                .allow_hyphen_values(true)
                .value_parser(value_parser!(IntervalLiteral))
                .value_names(["X", "Y"])
                .help("Interval literals such as \"[0.1, 2]\". atan2 takes Y and X in this order."),
        )
        .arg(
            Arg::new("precision")
                .short('p')
                .long("precision")
                .value_parser(["f64", "extended"])
                .default_value("f64")
                .help("Type of the bounds of the intervals."),
        )
        .arg(
            Arg::new("digits")
                .short('d')
                .long("digits")
                .value_parser(value_parser!(usize))
                .value_name("N")
                .help("Number of significant digits of the output."),
        );
    let matches = cmd.get_matches_mut();

    let name = matches
        .get_one::<String>("function")
        .expect("the function is required");
    let f = FUNCTIONS
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, f)| *f)
        .expect("the function name is validated by clap");
    let args = matches
        .get_many::<IntervalLiteral>("args")
        .expect("the arguments are required")
        .collect::<Vec<_>>();
    if args.len() != f.arity() {
        cmd.error(
            ErrorKind::WrongNumberOfValues,
            format!("'{}' takes {} argument(s), but {} given", name, f.arity(), args.len()),
        )
        .exit();
    }
    let digits = matches.get_one::<usize>("digits").copied();

    let y = match matches.get_one::<String>("precision").map(|s| s.as_str()) {
        Some("extended") => evaluate::<Extended>(f, &args, digits),
        _ => evaluate::<f64>(f, &args, digits),
    };
    println!("{}", y);
}
