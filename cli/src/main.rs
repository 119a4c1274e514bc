use crate::cli::{Args, Command, DataArgs, LimitArgs};
use anyhow::{bail, Context};
use clap::Parser;
use oxrdfio::RdfFormat;
use rdf_paths::engine::solutions::Solution;
use rdf_paths::engine::EvaluationOptions;
use rdf_paths::logical::paths::PathParser;
use rdf_paths::logical::patterns::PatternItem;
use rdf_paths::logical::PathTransformContext;
use rdf_paths::model::{NamedNode, Term, Variable};
use rdf_paths::sparql::parse_query;
use rdf_paths::store::Store;
use std::ffi::OsStr;
use std::io::{self, stdout, Write};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;

pub fn main() -> anyhow::Result<()> {
    let matches = Args::parse();
    init_tracing(matches.verbose);
    match matches.command {
        Command::Path {
            data,
            path,
            subject,
            object,
            prefixes,
            explain,
            limits,
        } => {
            let prefixes = prefixes
                .iter()
                .map(|prefix| parse_prefix(prefix))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let parser = prefixes
                .iter()
                .try_fold(PathParser::new(), |parser, (name, iri)| {
                    parser
                        .with_prefix(name.as_str(), iri.as_str())
                        .with_context(|| format!("The IRI of the prefix {name} is invalid"))
                })?;
            let path = parser
                .parse(&path)
                .with_context(|| format!("The property path {path} is invalid"))?;
            let subject = parse_pattern_item(&subject, &prefixes)?;
            let object = parse_pattern_item(&object, &prefixes)?;
            let store = load_store(&data, &limits)?;

            let mut output = stdout().lock();
            if explain {
                let mut context = PathTransformContext::new(subject.clone(), object.clone());
                writeln!(output, "{}", path.to_algebra(&mut context)?)?;
                writeln!(output)?;
            }

            let solutions = store.evaluate_path(&subject, &path, &object)?;
            let mut variables = Vec::new();
            for item in [&subject, &object] {
                if let PatternItem::Variable(variable) = item {
                    if !variables.contains(variable) {
                        variables.push(variable.clone());
                    }
                }
            }
            info!(solutions = solutions.len(), "Evaluated property path");
            write_solutions(&mut output, &variables, solutions.iter())?;
            Ok(())
        }
        Command::Query {
            data,
            query,
            explain,
            limits,
        } => {
            let store = load_store(&data, &limits)?;

            let mut output = stdout().lock();
            if explain {
                writeln!(output, "{}", parse_query(&query)?)?;
                writeln!(output)?;
            }

            let solutions = store.query(&query)?;
            info!(solutions = solutions.len(), "Evaluated query");
            write_solutions(&mut output, solutions.variables(), solutions.iter())?;
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_store(data: &DataArgs, limits: &LimitArgs) -> anyhow::Result<Store> {
    let format = if let Some(format) = &data.format {
        rdf_format_from_name(format)?
    } else {
        rdf_format_from_path(&data.file)?
    };

    let mut options = EvaluationOptions::default();
    if let Some(timeout_ms) = limits.timeout_ms {
        options = options.with_timeout(Duration::from_millis(timeout_ms));
    }
    if let Some(max_rounds) = limits.max_rounds {
        options = options.with_max_rounds(max_rounds);
    }

    let mut store = Store::new().with_options(options);
    let triples = store
        .load_from_path(&data.file, Some(format))
        .with_context(|| format!("Not able to load {}", data.file.display()))?;
    info!(triples, file = %data.file.display(), "Loaded data");
    Ok(store)
}

/// Writes a header line with the variables followed by one tab-separated line per solution.
/// Unbound variables are written as empty cells.
fn write_solutions<'a>(
    output: &mut impl Write,
    variables: &[Variable],
    solutions: impl Iterator<Item = &'a Solution>,
) -> io::Result<()> {
    let header = variables
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(output, "{header}")?;
    for solution in solutions {
        let row = variables
            .iter()
            .map(|variable| {
                solution
                    .get(variable)
                    .map(ToString::to_string)
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join("\t");
        writeln!(output, "{row}")?;
    }
    output.flush()
}

fn parse_prefix(prefix: &str) -> anyhow::Result<(String, String)> {
    let Some((name, iri)) = prefix.split_once('=') else {
        bail!("The prefix '{prefix}' must be written as name=iri")
    };
    Ok((name.to_owned(), iri.to_owned()))
}

/// Parses a subject or object given on the command line.
///
/// Variables start with `?` or `$`. Prefixed names are expanded with `prefixes`. Everything else
/// is read as an N-Triples term.
fn parse_pattern_item(value: &str, prefixes: &[(String, String)]) -> anyhow::Result<PatternItem> {
    if let Some(name) = value.strip_prefix('?').or_else(|| value.strip_prefix('$')) {
        let variable =
            Variable::new(name).with_context(|| format!("The variable {value} is invalid"))?;
        return Ok(PatternItem::Variable(variable));
    }
    if !value.starts_with(['<', '"', '_']) {
        if let Some((prefix, local)) = value.split_once(':') {
            let Some((_, iri)) = prefixes.iter().find(|(name, _)| name == prefix) else {
                bail!("The prefix {prefix} of {value} is not declared")
            };
            let node = NamedNode::new(format!("{iri}{local}"))
                .with_context(|| format!("The prefixed name {value} is invalid"))?;
            return Ok(PatternItem::Term(node.into()));
        }
    }
    let term = Term::from_str(value).with_context(|| format!("The term {value} is invalid"))?;
    Ok(PatternItem::Term(term))
}

fn format_from_path<T>(
    path: &Path,
    from_extension: impl FnOnce(&str) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    if let Some(ext) = path.extension().and_then(OsStr::to_str) {
        from_extension(ext).map_err(|e| {
            e.context(format!(
                "Not able to guess the file format from file name extension '{ext}'"
            ))
        })
    } else {
        bail!(
            "The path {} has no extension to guess a file format from",
            path.display()
        )
    }
}

fn rdf_format_from_path(path: &Path) -> anyhow::Result<RdfFormat> {
    format_from_path(path, |ext| {
        RdfFormat::from_extension(ext)
            .with_context(|| format!("The file extension '{ext}' is unknown"))
    })
}

fn rdf_format_from_name(name: &str) -> anyhow::Result<RdfFormat> {
    if let Some(t) = RdfFormat::from_extension(name) {
        return Ok(t);
    }
    if let Some(t) = RdfFormat::from_media_type(name) {
        return Ok(t);
    }
    bail!("The file format '{name}' is unknown")
}
