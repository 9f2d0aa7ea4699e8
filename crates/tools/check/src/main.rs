use std::{env, fs};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context as _, Result, bail};

use mcfunction_arguments::Registries;
use mcfunction_grammar::CommandNode;
use mcfunction_parser::{CommandContext, CommandParser, ContextRules, ParseOptions, datapack_root};
use mcfunction_reader::{Issue, Severity};


const USAGE: &str = "\
usage: mcfunction-check <commands.json> [--blocks <file>] [--nbt <file>] [--context <file>] <files...>

  <commands.json>    the command tree, as reported by Minecraft's data generator
  --blocks <file>    block states, in the format of the generator's blocks.json
  --nbt <file>       the NBT schema used for suggestions
  --context <file>   rules adding context facts when certain commands are matched

Set RUST_LOG to see what the parser is doing.";


/// Prints every issue found in the given function files, one per line, and exits
/// with a failure code if any of them is an error.
fn main() -> Result<ExitCode> {
    env_logger::init();

    let args = match Args::parse(env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            println!("{err}\n\n{USAGE}");
            return Ok(ExitCode::FAILURE);
        }
    };
    let parser = load_parser(&args)?;

    let mut found_error = false;
    for file in &args.files {
        found_error |= check_file(&parser, file)?;
    }

    Ok(if found_error { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    commands:      PathBuf,
    blocks:        Option<PathBuf>,
    nbt:           Option<PathBuf>,
    context_rules: Option<PathBuf>,
    files:         Vec<PathBuf>,
}

impl Args {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self> {
        let mut commands = None;
        let mut parsed = Self::default();

        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .map(PathBuf::from)
                    .with_context(|| format!("expected a file after {flag}"))
            };

            match arg.as_str() {
                "--blocks"  => parsed.blocks = Some(value("--blocks")?),
                "--nbt"     => parsed.nbt = Some(value("--nbt")?),
                "--context" => parsed.context_rules = Some(value("--context")?),
                flag if flag.starts_with("--") => bail!("unknown option {flag}"),
                path if commands.is_none() => commands = Some(PathBuf::from(path)),
                path => parsed.files.push(PathBuf::from(path)),
            }
        }

        parsed.commands = commands.context("expected the path of a command tree")?;
        if parsed.files.is_empty() {
            bail!("expected at least one function file");
        }
        Ok(parsed)
    }
}

fn load_parser(args: &Args) -> Result<CommandParser> {
    let tree = fs::read_to_string(&args.commands)
        .with_context(|| format!("could not read {}", args.commands.display()))?;
    let tree = CommandNode::from_json(&tree)
        .with_context(|| format!("invalid command tree {}", args.commands.display()))?;

    let registries = Registries::from_files(args.blocks.as_deref(), args.nbt.as_deref())?;
    let parser = CommandParser::new(Arc::new(tree), Arc::new(registries), ParseOptions::default());

    match &args.context_rules {
        Some(path) => {
            let rules = fs::read_to_string(path)
                .with_context(|| format!("could not read {}", path.display()))?;
            let rules = ContextRules::from_json(&rules)
                .with_context(|| format!("invalid context rules {}", path.display()))?;
            Ok(parser.with_context_rules(Arc::new(rules)))
        }
        None => Ok(parser),
    }
}

/// Returns whether any error was found.
fn check_file(parser: &CommandParser, path: &Path) -> Result<bool> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;

    let mut context = CommandContext::new().with_file(path.display().to_string());
    context.set_datapack_root(datapack_root(path).map(Path::to_path_buf));

    let mut found_error = false;
    for line in parser.parse_function(&text, &context) {
        if let Some(issue) = &line.result.issue {
            println!("{}", format_issue(path, line.line, issue));
            found_error |= issue.is_error();
        }
    }

    log::debug!("Checked {}", path.display());
    Ok(found_error)
}

fn format_issue(path: &Path, line: usize, issue: &Issue) -> String {
    let severity = match issue.severity {
        Severity::Error   => "error",
        Severity::Warning => "warning",
    };
    format!(
        "{}:{line}:{}-{}: {severity} [{}] {}",
        path.display(),
        issue.start,
        issue.end,
        issue.category,
        issue.message,
    )
}


#[cfg(test)]
mod tests {
    use super::*;


    fn args(args: &[&str]) -> Result<Args> {
        Args::parse(args.iter().map(ToString::to_string))
    }

    #[test]
    fn arguments() {
        let parsed = args(&["commands.json", "--blocks", "blocks.json", "a.mcfunction", "b.mcfunction"]).unwrap();
        assert_eq!(parsed, Args {
            commands:      PathBuf::from("commands.json"),
            blocks:        Some(PathBuf::from("blocks.json")),
            nbt:           None,
            context_rules: None,
            files:         vec![PathBuf::from("a.mcfunction"), PathBuf::from("b.mcfunction")],
        });

        assert!(args(&["commands.json"]).is_err());
        assert!(args(&["commands.json", "a.mcfunction", "--nbt"]).is_err());
        assert!(args(&["commands.json", "--verbose", "a.mcfunction"]).is_err());
    }

    #[test]
    fn issue_lines() {
        let issue = Issue::new(
            "argument.integer.big",
            "Integer must not be more than 100, found 500".to_owned(),
            6..9,
            Severity::Error,
        );
        assert_eq!(
            format_issue(Path::new("tick.mcfunction"), 3, &issue),
            "tick.mcfunction:3:6-9: error [argument.integer.big] Integer must not be more than 100, found 500",
        );
    }
}
