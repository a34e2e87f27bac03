use std::env;
use std::io::{self, BufWriter, Write};
use std::process;

use anyhow::Context;
use clap::{CommandFactory, Parser};

use passgen::password_generation::{generate_passwords, parse_parameter};
use passgen::{ByteSource, CryptoByteSource, GenerationError, GenerationRequest, Secret};

mod args;

/// PassGen: Random password generator
// Unrecognised arguments, `-h` included, are ignored, so there is no help flag; running
// without arguments prints this help instead.
#[derive(Debug, Parser)]
#[command(name = "passgen", args_override_self = true, disable_help_flag = true)]
struct Args {
    /// Length of passwords to be generated.
    #[arg(short = 'l', value_name = "LENGTH", allow_hyphen_values = true)]
    length: Option<String>,
    /// Selects which character set to use: 1 = letters, 2 = digits, 4 = symbols; add them up to
    /// combine sets (1-7).
    #[arg(short = 'm', value_name = "MODE", allow_hyphen_values = true)]
    mode: Option<String>,
    /// How many passwords to generate.
    #[arg(short = 'c', value_name = "COUNT", allow_hyphen_values = true)]
    count: Option<String>,
}

impl Args {
    fn request(&self) -> Result<GenerationRequest, GenerationError> {
        let value = |name, raw: &Option<String>, default| match raw {
            Some(raw) => parse_parameter(name, raw),
            None => Ok(default),
        };
        GenerationRequest::new(
            value("length", &self.length, GenerationRequest::DEFAULT_LENGTH)?,
            value("mode", &self.mode, i64::from(passgen::Mode::DEFAULT.get()))?,
            value("count", &self.count, GenerationRequest::DEFAULT_COUNT)?,
        )
    }
}

fn run() -> Result<(), ProgError> {
    let raw_args = env::args_os()
        .map(|a| a.to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    run_with(raw_args, CryptoByteSource::acquire, io::stdout().lock())
}

/// Run the program against `raw_args`, writing to `output`.
///
/// `acquire` is only called once the arguments have been validated.
fn run_with<F, S, W>(raw_args: Vec<String>, acquire: F, output: W) -> Result<(), ProgError>
where
    F: FnOnce() -> Result<S, GenerationError>,
    S: ByteSource,
    W: Write,
{
    let mut output = BufWriter::new(output);
    if raw_args.len() <= 1 {
        write!(output, "{}", Args::command().render_help()).context("failed to print help")?;
        output.flush().context("failed to print help")?;
        return Ok(());
    }

    let args = Args::try_parse_from(args::normalize(raw_args))
        .context("failed to parse arguments")?;
    let request = args.request()?;

    // Everything is generated before anything is printed, so a failure leaves no output.
    let passwords = {
        let mut source = acquire()?;
        generate_passwords(&mut source, &request)?
    };

    print_passwords(&mut output, &request, &passwords)
        .context("failed to write passwords to stdout")?;
    Ok(())
}

fn print_passwords(
    mut output: impl Write,
    request: &GenerationRequest,
    passwords: &[Secret],
) -> io::Result<()> {
    writeln!(output, "{request}")?;
    for password in passwords {
        writeln!(output, "{}", password.as_str())?;
    }
    output.flush()
}

fn main() {
    env_logger::init();

    match run() {
        Ok(()) => (),
        Err(ProgError::Other(err)) => {
            eprintln!("error: {err:#}");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error(transparent)]
    Generation(GenerationError),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}

impl From<GenerationError> for ProgError {
    fn from(err: GenerationError) -> ProgError {
        ProgError::Generation(err)
    }
}
