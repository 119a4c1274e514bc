use clap::{ArgAction, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "rdf-paths")]
/// Evaluates SPARQL property paths over RDF files
pub struct Args {
    /// Increases the log level (-v for debug, -vv for trace)
    ///
    /// The RUST_LOG environment variable takes precedence if it is set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate a single property path pattern
    Path {
        #[command(flatten)]
        data: DataArgs,
        /// The property path in SPARQL syntax, for example `ex:knows+/ex:name`
        #[arg(short, long)]
        path: String,
        /// The subject of the pattern: a variable like `?s`, an IRI, a prefixed name or a literal
        #[arg(long, default_value = "?s")]
        subject: String,
        /// The object of the pattern: a variable like `?o`, an IRI, a prefixed name or a literal
        #[arg(long, default_value = "?o")]
        object: String,
        /// A prefix usable in the path and the endpoints, written as `name=iri`
        #[arg(long = "prefix", value_name = "NAME=IRI")]
        prefixes: Vec<String>,
        /// Prints the algebra the path is lowered to before the solutions
        #[arg(long)]
        explain: bool,
        #[command(flatten)]
        limits: LimitArgs,
    },
    /// Evaluate a SPARQL SELECT query
    Query {
        #[command(flatten)]
        data: DataArgs,
        /// The SPARQL query
        #[arg(short, long)]
        query: String,
        /// Prints the algebra of the query before the solutions
        #[arg(long)]
        explain: bool,
        #[command(flatten)]
        limits: LimitArgs,
    },
}

#[derive(clap::Args)]
pub struct DataArgs {
    /// The RDF file to load
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub file: PathBuf,
    /// The format of the file
    ///
    /// It can be an extension like "nt" or a MIME type like "application/n-triples".
    ///
    /// By default the format is guessed from the file extension.
    #[arg(long)]
    pub format: Option<String>,
}

#[derive(clap::Args)]
pub struct LimitArgs {
    /// Aborts the evaluation after the given number of milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
    /// Aborts an unbounded path after the given number of expansion rounds
    #[arg(long)]
    pub max_rounds: Option<usize>,
}
