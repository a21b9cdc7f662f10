//! Command implementations.
//!
//! Generation paths take a generator factory so the network client is only
//! built (and its API key only required) when a description is given.

use std::fs;
use std::future::Future;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use roster_ingest::{load_workbook_dir, load_workbook_json, write_sheet_csv};
use roster_model::{EntityKind, Row, Workbook, describe_schema};
use roster_rules::{
    AnalysisKind, CodeGenerator, Compiler, FilterPipeline, OpenAiGenerator, RuleBook,
    RuleRequest, TextGenerator, filter_rows,
};
use roster_validate::validate_workbook;

use crate::cli::{AllocateArgs, AnalyzeArgs, FilterArgs, RuleArgs, ValidateArgs};
use crate::config::Settings;
use crate::types::{AnalysisResult, FilterResult, RuleResult, SheetCount, ValidateResult};

/// File name of the rules document written next to rule output.
pub const RULES_DOCUMENT: &str = "rules.json";

/// Process exit code for a report: 1 when it carries errors.
pub fn exit_status(valid: bool) -> i32 {
    if valid { 0 } else { 1 }
}

pub fn run_schema() -> String {
    EntityKind::ALL
        .into_iter()
        .map(describe_schema)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn run_validate(args: &ValidateArgs, settings: &Settings) -> Result<ValidateResult> {
    let (source, workbook) = match (&args.workbook, &args.folder) {
        (Some(path), _) => (
            path.clone(),
            load_workbook_json(path).context("load workbook document")?,
        ),
        (None, Some(folder)) => (folder.clone(), load_folder(folder)?),
        (None, None) => bail!("a folder or --workbook is required"),
    };
    let span = info_span!("validate", source = %source.display());
    let _guard = span.enter();
    let report = validate_workbook(&workbook, &settings.thresholds);
    info!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validation complete"
    );
    Ok(ValidateResult {
        source,
        sheets: sheet_counts(&workbook),
        report,
    })
}

pub fn run_filter(args: &FilterArgs, settings: &Settings) -> Result<FilterResult> {
    run_filter_with(args, settings, || openai_generator(settings))
}

pub fn run_filter_with<G, F>(
    args: &FilterArgs,
    settings: &Settings,
    make_generator: F,
) -> Result<FilterResult>
where
    G: TextGenerator,
    F: FnOnce() -> Result<G>,
{
    let kind = EntityKind::from(args.entity);
    let workbook = load_folder(&args.folder)?;
    let rows = workbook
        .dataset(kind)
        .with_context(|| format!("no {kind} sheet in {}", args.folder.display()))?;

    let outcome = match (&args.code, &args.describe) {
        (Some(code), _) => filter_rows(&Compiler::new(), rows, code)?,
        (None, Some(description)) => {
            let pipeline = FilterPipeline::new(code_generator(settings, make_generator)?);
            block_on(pipeline.filter_with_description(kind, rows, description))??
        }
        (None, None) => bail!("either --code or --describe is required"),
    };

    if let Some(path) = &args.output {
        ensure_parent(path)?;
        write_sheet_csv(path, kind, &outcome.rows).context("write filtered sheet")?;
    }
    Ok(FilterResult {
        kind,
        total: rows.len(),
        code: outcome.code,
        rows: outcome.rows,
        output: args.output.clone(),
    })
}

pub fn run_rule(args: &RuleArgs, settings: &Settings) -> Result<RuleResult> {
    run_rule_with(args, settings, || openai_generator(settings))
}

pub fn run_rule_with<G, F>(args: &RuleArgs, settings: &Settings, make_generator: F) -> Result<RuleResult>
where
    G: TextGenerator,
    F: FnOnce() -> Result<G>,
{
    let span = info_span!("rule", name = %args.name);
    let _guard = span.enter();
    let workbook = load_folder(&args.folder)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.folder.join("output"));

    let mut book = RuleBook::new();
    let (name, code) = match (&args.code, &args.describe) {
        (Some(path), description) => {
            let code = fs::read_to_string(path)
                .with_context(|| format!("read rule code {}", path.display()))?;
            let stored = book.add_rule_code(RuleRequest {
                name: args.name.clone(),
                description: description.clone(),
                code: Some(code),
            })?;
            (stored.name.clone(), stored.code.clone())
        }
        (None, Some(description)) => {
            let generator = code_generator(settings, make_generator)?;
            let request = RuleRequest::from_description(&args.name, description);
            let stored = block_on(book.add_rule(request, &generator, &workbook))??;
            (stored.name.clone(), stored.code.clone())
        }
        (None, None) => bail!("either --code or --describe is required"),
    };

    let next = book.apply(&name, &workbook)?;
    let report = validate_workbook(&next, &settings.thresholds);

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output dir {}", output_dir.display()))?;
    let mut files = Vec::new();
    for kind in EntityKind::ALL {
        let Some(rows) = next.dataset(kind) else {
            continue;
        };
        let path = output_dir.join(format!("{kind}.csv"));
        write_sheet_csv(&path, kind, rows).with_context(|| format!("write {kind} sheet"))?;
        files.push(path);
    }
    let document_path = output_dir.join(RULES_DOCUMENT);
    let document = serde_json::to_string_pretty(&book.export_document())?;
    fs::write(&document_path, document)
        .with_context(|| format!("write {}", document_path.display()))?;
    files.push(document_path);

    info!(
        files = files.len(),
        errors = report.error_count(),
        "rule applied and re-validated"
    );
    Ok(RuleResult {
        name,
        code,
        output_dir,
        before: sheet_counts(&workbook),
        after: sheet_counts(&next),
        files,
        report,
    })
}

pub fn run_analyze(args: &AnalyzeArgs, settings: &Settings) -> Result<AnalysisResult> {
    run_analyze_with(args, settings, || openai_generator(settings))
}

pub fn run_analyze_with<G, F>(
    args: &AnalyzeArgs,
    settings: &Settings,
    make_generator: F,
) -> Result<AnalysisResult>
where
    G: TextGenerator,
    F: FnOnce() -> Result<G>,
{
    let kind = AnalysisKind::from(args.kind);
    let span = info_span!("analyze", kind = %kind);
    let _guard = span.enter();
    let workbook = load_complete_folder(&args.folder)?;
    let generator = code_generator(settings, make_generator)?;
    let text = block_on(generator.analyze(&workbook, kind))??;
    info!(chars = text.len(), "analysis received");
    Ok(AnalysisResult {
        folder: args.folder.clone(),
        kind: Some(kind),
        sheets: sheet_counts(&workbook),
        text,
    })
}

pub fn run_allocate(args: &AllocateArgs, settings: &Settings) -> Result<AnalysisResult> {
    run_allocate_with(args, settings, || openai_generator(settings))
}

pub fn run_allocate_with<G, F>(
    args: &AllocateArgs,
    settings: &Settings,
    make_generator: F,
) -> Result<AnalysisResult>
where
    G: TextGenerator,
    F: FnOnce() -> Result<G>,
{
    let span = info_span!("allocate");
    let _guard = span.enter();
    let workbook = load_complete_folder(&args.folder)?;
    let generator = code_generator(settings, make_generator)?;
    let text = block_on(generator.suggest_allocations(&workbook))??;
    info!(chars = text.len(), "allocation suggestions received");
    Ok(AnalysisResult {
        folder: args.folder.clone(),
        kind: None,
        sheets: sheet_counts(&workbook),
        text,
    })
}

fn load_folder(folder: &Path) -> Result<Workbook> {
    load_workbook_dir(folder).with_context(|| format!("load sheets from {}", folder.display()))
}

/// Load a folder that must hold all three sheets.
fn load_complete_folder(folder: &Path) -> Result<Workbook> {
    let workbook = load_folder(folder)?;
    let missing: Vec<String> = EntityKind::ALL
        .into_iter()
        .filter(|kind| workbook.dataset(*kind).is_none())
        .map(|kind| kind.to_string())
        .collect();
    if !missing.is_empty() {
        bail!("no {} sheet in {}", missing.join(" or "), folder.display());
    }
    Ok(workbook)
}

fn sheet_counts(workbook: &Workbook) -> Vec<SheetCount> {
    EntityKind::ALL
        .into_iter()
        .map(|kind| SheetCount {
            kind,
            rows: workbook.dataset(kind).map(<[Row]>::len),
        })
        .collect()
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir {}", parent.display()))?;
    }
    Ok(())
}

fn code_generator<G, F>(settings: &Settings, make_generator: F) -> Result<CodeGenerator<G>>
where
    G: TextGenerator,
    F: FnOnce() -> Result<G>,
{
    Ok(CodeGenerator::new(make_generator()?).with_timeout(settings.generator.timeout()))
}

fn openai_generator(settings: &Settings) -> Result<OpenAiGenerator> {
    let client_settings = settings.generator.client_settings()?;
    Ok(OpenAiGenerator::new(client_settings)?)
}

/// Drive one generation future on a single-threaded runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    Ok(runtime.block_on(future))
}
