use regcalc::tools::cli;
use std::env;
use std::io;
use std::process;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let status = cli::run(&args, io::stdin().lock(), &mut io::stdout().lock());
    process::exit(status);
}
