use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use version_stamp::{
    parse_version_code, update, PropertiesFile, PropertyStore, StoreError, StoreKeys,
    UpdateError, UpdateKind, UpdateRequest, VersionInfo,
};

#[derive(thiserror::Error, Debug)]
pub enum VersionStampCliError {
    #[error("{0}")]
    LibraryError(#[from] UpdateError),

    #[error("{0}")]
    StoreError(#[from] StoreError),

    #[error("Could not write outputs to `{}`: {source}", path.display())]
    OutputError { path: PathBuf, source: io::Error },
}

/// Advances a version name and its version code.
///
/// The previous name and code are read from `--version-file` if it exists, and the new ones are
/// written back to it. Otherwise they come from `--version-name` and `--version-code`, and the new
/// ones are only printed.
///
/// Every option can also be given through the environment variable GitHub Actions uses for an
/// input of the same name (e.g. `INPUT_UPDATE-TYPE`).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The kind of update: major, minor, patch, or build
    #[arg(short = 't', long, env = "INPUT_UPDATE-TYPE", value_parser = UpdateKind::from_str)]
    update_type: UpdateKind,

    /// The previous version name. Ignored if the version file exists.
    #[arg(short = 'n', long, env = "INPUT_VERSION-NAME")]
    version_name: Option<String>,

    /// The previous version code. Ignored if the version file exists.
    #[arg(short = 'c', long, env = "INPUT_VERSION-CODE")]
    version_code: Option<String>,

    /// A properties file holding the version name and code
    #[arg(short = 'f', long, env = "INPUT_VERSION-FILE", value_name = "PATH")]
    version_file: Option<PathBuf>,

    /// Text to put before the version code in the pre-release of a `build` update
    #[arg(short, long, env = "INPUT_POSTFIX")]
    postfix: Option<String>,

    /// The key of the version name in the version file
    #[arg(long, default_value = "version")]
    name_key: String,

    /// The key of the version code in the version file
    #[arg(long, default_value = "code")]
    code_key: String,

    /// File that outputs are appended to, as `key=value` lines
    #[arg(long, env = "GITHUB_OUTPUT", value_name = "PATH", hide = true)]
    github_output: Option<PathBuf>,

    /// Log debug information to stderr
    #[arg(short, long)]
    verbose: bool,
}

type Output = (String, i32);

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match do_work(cli) {
        Ok((output, exit_code)) => {
            println!("{output}");
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// GitHub Actions passes unset optional inputs as empty strings.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn do_work(cli: Cli) -> Result<Output, VersionStampCliError> {
    let keys = StoreKeys {
        name: cli.name_key,
        code: cli.code_key,
    };

    let mut request = UpdateRequest::new(cli.update_type);
    request.version_name = non_empty(&cli.version_name);
    request.version_code = cli.version_code.as_deref().and_then(parse_version_code);
    request.postfix = non_empty(&cli.postfix);

    let version_file = cli
        .version_file
        .as_deref()
        .filter(|path| !path.as_os_str().is_empty());
    let mut store = match version_file {
        Some(path) => {
            let store = PropertiesFile::open_existing(path)?;
            if store.is_none() {
                warn!(
                    path = %path.display(),
                    "version file does not exist, using version name and code arguments"
                );
            }
            store
        }
        None => None,
    };

    let info = update(
        &request,
        &keys,
        store.as_mut().map(|file| file as &mut dyn PropertyStore),
    )?;

    if let Some(path) = &cli.github_output {
        write_outputs(path, &info)?;
    }

    Ok((render_outputs(&info), 0))
}

fn render_outputs(info: &VersionInfo) -> String {
    format!(
        "new-version-name={}\nnew-version-code={}",
        info.name, info.code
    )
}

fn write_outputs(path: &Path, info: &VersionInfo) -> Result<(), VersionStampCliError> {
    let output_error = |source| VersionStampCliError::OutputError {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(output_error)?;
    writeln!(file, "{}\nsuccess=true", render_outputs(info)).map_err(output_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("version-stamp").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_update_type() {
        assert!(Cli::try_parse_from(["version-stamp", "-t", "bogus"]).is_err());
        assert_eq!(UpdateKind::Build, cli(&["-t", "build"]).update_type);
    }

    #[test]
    fn test_from_arguments() {
        let cli = cli(&["-t", "build", "-n", "1.0.0", "-c", "400", "-p", "beta"]);
        let (output, exit_code) = do_work(cli).unwrap();
        assert_eq!("new-version-name=1.0.0-beta401\nnew-version-code=401", output);
        assert_eq!(0, exit_code);
    }

    #[test]
    fn test_non_numeric_code() {
        let cli = cli(&["-t", "patch", "-n", "1.0.0", "-c", "abc"]);
        assert!(matches!(
            do_work(cli),
            Err(VersionStampCliError::LibraryError(
                UpdateError::MissingVersionCode
            ))
        ));
    }

    #[test]
    fn test_version_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("version.properties");
        fs::write(&path, "version=1.0.0-beta.400\ncode=400\n").unwrap();
        let outputs = dir.path().join("outputs");

        let cli = cli(&[
            "-t",
            "patch",
            "-f",
            path.to_str().unwrap(),
            "--github-output",
            outputs.to_str().unwrap(),
        ]);
        let (output, _) = do_work(cli).unwrap();

        assert_eq!("new-version-name=1.0.0\nnew-version-code=401", output);
        assert_eq!(
            "version=1.0.0\ncode=401\n",
            fs::read_to_string(&path).unwrap()
        );
        assert_eq!(
            "new-version-name=1.0.0\nnew-version-code=401\nsuccess=true\n",
            fs::read_to_string(&outputs).unwrap()
        );
    }

    #[test]
    fn test_missing_version_file_falls_back_to_arguments() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.properties");

        let cli = cli(&[
            "-t",
            "minor",
            "-f",
            path.to_str().unwrap(),
            "-n",
            "1.0.0",
            "-c",
            "0",
        ]);
        let (output, _) = do_work(cli).unwrap();

        assert_eq!("new-version-name=1.1.0\nnew-version-code=1", output);
        assert!(!path.exists());
    }
}
