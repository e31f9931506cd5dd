use ariadne::{Label, Report, ReportKind, Source};
use clap::{Parser as ClapParser, Subcommand};
use color_eyre::eyre::Result;
use macaque::environment::Environment;
use macaque::evaluator::evaluate;
use macaque::lexer::Lexer;
use macaque::parser::{error::ParseError, Parser};
use macaque::token::TokenKind;
use macaque::value::Object;
use std::fs::read_to_string;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, ClapParser)]
#[clap(name = "macaque", version)]
struct CLArgs {
    #[clap(subcommand)]
    routine: MacaqueCommand,
}

#[derive(Debug, Subcommand)]
enum MacaqueCommand {
    /// Print the token stream of a source file.
    Tokenize { path: PathBuf },
    /// Print the canonical rendering of the parsed program.
    Parse { path: PathBuf },
    /// Evaluate a source file and print the resulting value.
    Run { path: PathBuf },
    /// Interactive session sharing one environment across lines.
    Repl,
}

fn main() -> Result<ExitCode> {
    color_eyre::install().expect("can't fail at first call");
    let args = CLArgs::parse();
    match args.routine {
        MacaqueCommand::Tokenize { path } => {
            let source = read_to_string(path)?;
            tokenize(&source);
            Ok(ExitCode::SUCCESS)
        }
        MacaqueCommand::Parse { path } => {
            let display_path = path.display().to_string();
            let source = read_to_string(&path)?;
            Ok(parse(&source, &display_path))
        }
        MacaqueCommand::Run { path } => {
            let display_path = path.display().to_string();
            let source = read_to_string(&path)?;
            Ok(run(&source, &display_path))
        }
        MacaqueCommand::Repl => repl(),
    }
}

fn tokenize(source: &str) {
    let mut lexer = Lexer::new(source);
    loop {
        let token = lexer.next_token();
        println!("{} {:?}", token.kind, token.literal.as_str());
        if matches!(token.kind, TokenKind::Eof) {
            break;
        }
    }
}

fn parse(source: &str, path: &str) -> ExitCode {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    if !parser.errors().is_empty() {
        report_parse_errors(source, path, parser.errors());
        return ExitCode::from(65);
    }
    println!("{program}");
    ExitCode::SUCCESS
}

fn run(source: &str, path: &str) -> ExitCode {
    let env = Environment::new();
    let mut console = macaque::console::StdoutConsole;
    match evaluate(source, &env, &mut console) {
        Err(errors) => {
            report_parse_errors(source, path, &errors);
            ExitCode::from(65)
        }
        Ok(Object::Error(message)) => {
            eprintln!("ERROR: {message}");
            ExitCode::from(70)
        }
        Ok(Object::Null) => ExitCode::SUCCESS,
        Ok(object) => {
            println!("{object}");
            ExitCode::SUCCESS
        }
    }
}

fn repl() -> Result<ExitCode> {
    const PROMPT: &str = ">> ";

    let env = Environment::new();
    let mut console = macaque::console::StdoutConsole;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut line = String::new();

    loop {
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(ExitCode::SUCCESS);
        }

        match evaluate(&line, &env, &mut console) {
            Err(errors) => {
                for error in &errors {
                    println!("\t{error}");
                }
            }
            Ok(Object::Null) => {}
            Ok(object) => println!("{object}"),
        }
    }
}

fn report_parse_errors(source: &str, path: &str, errors: &[ParseError]) {
    for error in errors {
        let range = error.span.range();
        Report::build(ReportKind::Error, (path, range.clone()))
            .with_message(error.kind.to_string())
            .with_label(Label::new((path, range)).with_message(error.kind.to_string()))
            .finish()
            .eprint((path, Source::from(source)))
            .ok();
    }
}
