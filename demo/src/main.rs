//! warden demo CLI
//!
//! Evaluates authorization functions against subject fixtures and renders
//! Handlebars templates that call them.
//!
//! Usage:
//!   cargo run -p demo -- scenarios
//!   cargo run -p demo -- check --subject demo/fixtures/admin_editor.toml hasAnyRoles "superadmin, editor"
//!   cargo run -p demo -- render --subject demo/fixtures/guest.toml --template demo/templates/nav.hbs --data demo/templates/nav.json
//!
//! `nav.hbs` reads `file_permissions` from its data, so it needs the
//! `--data demo/templates/nav.json` argument; without it the render fails
//! with a missing-argument error.

mod scenarios;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use warden_contracts::{
    error::{WardenError, WardenResult},
    tokens::TokenSplitter,
};
use warden_core::FixedSubjectLookup;
use warden_subject::StaticSubject;
use warden_template::{ExpressionFunctions, FunctionName, TemplateRenderer};

// ── CLI definition ────────────────────────────────────────────────────────────

/// warden — authorization functions for templates.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "warden authorization function demo",
    long_about = "Evaluates role, permission and authentication-state functions against\n\
                  subject fixtures, and renders Handlebars templates that call them."
)]
struct Cli {
    /// Delimiter separating tokens in multi-value arguments.
    #[arg(long, global = true, default_value_t = ',')]
    delimiter: char,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the bundled reference scenarios.
    Scenarios,
    /// Evaluate one function against a subject fixture.
    Check {
        /// TOML subject fixture.
        #[arg(long)]
        subject: PathBuf,
        /// Function name as used in templates, e.g. hasAnyRoles.
        function: String,
        /// Role name, permission, or delimited list.
        argument: Option<String>,
    },
    /// Render a Handlebars template for a subject fixture.
    Render {
        /// TOML subject fixture.
        #[arg(long)]
        subject: PathBuf,
        /// Handlebars template file.
        #[arg(long)]
        template: PathBuf,
        /// JSON file with template data (demo/templates/nav.hbs needs
        /// demo/templates/nav.json).
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// List the available functions.
    Functions,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let splitter = TokenSplitter::with_delimiter(cli.delimiter);

    let result = splitter.validate().and_then(|()| match cli.command {
        Command::Scenarios => run_scenarios(splitter),
        Command::Check {
            subject,
            function,
            argument,
        } => run_check(splitter, &subject, &function, argument.as_deref()),
        Command::Render {
            subject,
            template,
            data,
        } => run_render(splitter, &subject, &template, data.as_deref()),
        Command::Functions => {
            list_functions();
            Ok(())
        }
    });

    if let Err(e) = result {
        eprintln!("demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_scenarios(splitter: TokenSplitter) -> WardenResult<()> {
    let mismatches = scenarios::run_all(splitter)?;
    if mismatches > 0 {
        eprintln!("{} check(s) did not match the expected result", mismatches);
        std::process::exit(2);
    }
    println!("All scenario checks matched.");
    Ok(())
}

fn run_check(
    splitter: TokenSplitter,
    subject: &Path,
    function: &str,
    argument: Option<&str>,
) -> WardenResult<()> {
    let functions = functions_for(splitter, subject)?;
    let allowed = functions.evaluate(function, argument)?;
    println!("{}", allowed);
    Ok(())
}

fn run_render(
    splitter: TokenSplitter,
    subject: &Path,
    template: &Path,
    data: Option<&Path>,
) -> WardenResult<()> {
    let renderer = TemplateRenderer::new(Arc::new(functions_for(splitter, subject)?));

    let source = read_file(template)?;
    let data = match data {
        Some(path) => serde_json::from_str(&read_file(path)?).map_err(|e| WardenError::ConfigError {
            reason: format!("failed to parse template data '{}': {}", path.display(), e),
        })?,
        None => serde_json::Value::Object(Default::default()),
    };

    debug!(template = %template.display(), "rendering template");
    print!("{}", renderer.render_str(&source, &data)?);
    Ok(())
}

fn list_functions() {
    for function in FunctionName::ALL {
        let argument = if function.takes_list() {
            "(delimited list)"
        } else if function.takes_argument() {
            "(value)"
        } else {
            "()"
        };
        println!("{}{}", function, argument);
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn functions_for(
    splitter: TokenSplitter,
    subject: &Path,
) -> WardenResult<ExpressionFunctions<FixedSubjectLookup>> {
    let subject = StaticSubject::from_file(subject)?;
    Ok(ExpressionFunctions::with_splitter(
        FixedSubjectLookup::new(subject),
        splitter,
    ))
}

fn read_file(path: &Path) -> WardenResult<String> {
    std::fs::read_to_string(path).map_err(|e| WardenError::ConfigError {
        reason: format!("failed to read '{}': {}", path.display(), e),
    })
}
