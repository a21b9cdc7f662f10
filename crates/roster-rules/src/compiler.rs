//! Sandboxed compilation of filter predicates and rule transforms.
//!
//! Code runs on an embedded Rhai engine with strict variables: the only
//! identifiers a script can see are its parameters (`row` for predicates,
//! `clientData`, `workerData` and `taskData` for transforms). `eval` is
//! disabled and every evaluation is bounded by the [`CompilerLimits`].

use std::fmt;
use std::sync::Arc;

use rhai::{Dynamic, Engine, Position, Scope, AST};
use serde_json::Value;
use tracing::debug;

use roster_model::{EntityKind, Row, Workbook};

use crate::error::{CompileError, RuleApplicationError};
use crate::preprocess::preprocess_code;

/// Name of the entry point a transform script may define.
pub const RULE_FUNCTION: &str = "ruleFunction";

const ROW_PARAMETER: &str = "row";

/// Resource caps applied to every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerLimits {
    pub max_operations: u64,
    pub max_call_levels: usize,
    pub max_expr_depth: usize,
    pub max_function_expr_depth: usize,
    pub max_string_size: usize,
    pub max_array_size: usize,
    pub max_map_size: usize,
}

impl Default for CompilerLimits {
    fn default() -> Self {
        Self {
            max_operations: 5_000_000,
            max_call_levels: 32,
            max_expr_depth: 64,
            max_function_expr_depth: 32,
            max_string_size: 1 << 20,
            max_array_size: 1_000_000,
            max_map_size: 10_000,
        }
    }
}

/// Loose truthiness: `()`, `false`, `0`, `0.0`, NaN and `""` are false.
pub fn is_truthy(value: &Dynamic) -> bool {
    if value.is_unit() {
        return false;
    }
    if let Ok(flag) = value.as_bool() {
        return flag;
    }
    if let Ok(number) = value.as_int() {
        return number != 0;
    }
    if let Ok(number) = value.as_float() {
        return number != 0.0 && !number.is_nan();
    }
    if value.is_string() {
        return value
            .clone()
            .into_string()
            .is_ok_and(|text| !text.is_empty());
    }
    true
}

fn build_engine(limits: CompilerLimits) -> Engine {
    let mut engine = Engine::new();
    engine
        .set_strict_variables(true)
        .set_max_operations(limits.max_operations)
        .set_max_call_levels(limits.max_call_levels)
        .set_max_expr_depths(limits.max_expr_depth, limits.max_function_expr_depth)
        .set_max_string_size(limits.max_string_size)
        .set_max_array_size(limits.max_array_size)
        .set_max_map_size(limits.max_map_size);
    engine.disable_symbol("eval");

    engine.on_print(|text| debug!(target: "roster_rules::script", "{text}"));
    engine.on_debug(|text, source, position: Position| {
        debug!(
            target: "roster_rules::script",
            source = source.unwrap_or_default(),
            line = position.line().unwrap_or_default(),
            "{text}"
        );
    });

    // String helpers under their JavaScript names.
    engine
        .register_fn("toLowerCase", |text: &str| text.to_lowercase())
        .register_fn("toUpperCase", |text: &str| text.to_uppercase())
        .register_fn("startsWith", |text: &str, prefix: &str| {
            text.starts_with(prefix)
        })
        .register_fn("endsWith", |text: &str, suffix: &str| text.ends_with(suffix))
        .register_fn("trimmed", |text: &str| text.trim().to_string());
    engine
}

fn to_dynamic(value: &impl serde::Serialize) -> Result<Dynamic, RuleApplicationError> {
    rhai::serde::to_dynamic(value).map_err(|err| RuleApplicationError::Runtime(err.to_string()))
}

fn prepare_source(code: &str) -> Result<String, CompileError> {
    let source = preprocess_code(code);
    if source.is_empty() {
        return Err(CompileError::Empty);
    }
    Ok(source)
}

/// Compiles code strings into [`Predicate`]s and [`Transform`]s.
///
/// Cheap to clone; compiled callables share the engine.
#[derive(Clone)]
pub struct Compiler {
    engine: Arc<Engine>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiler").finish_non_exhaustive()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self::with_limits(CompilerLimits::default())
    }

    pub fn with_limits(limits: CompilerLimits) -> Self {
        Self {
            engine: Arc::new(build_engine(limits)),
        }
    }

    /// Compile a bare boolean expression over `row`.
    ///
    /// The whole row is visible; a column missing from a row reads as `()`.
    pub fn compile_predicate(&self, code: &str) -> Result<Predicate, CompileError> {
        self.compile_predicate_inner(code, None)
    }

    /// Compile a predicate that sees only the given columns of each row.
    pub fn compile_predicate_with_columns(
        &self,
        code: &str,
        columns: &[String],
    ) -> Result<Predicate, CompileError> {
        self.compile_predicate_inner(code, Some(columns.to_vec()))
    }

    /// Compile a predicate restricted to an entity's declared columns.
    pub fn compile_entity_predicate(
        &self,
        kind: EntityKind,
        code: &str,
    ) -> Result<Predicate, CompileError> {
        let columns = kind
            .schema()
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        self.compile_predicate_inner(code, Some(columns))
    }

    fn compile_predicate_inner(
        &self,
        code: &str,
        columns: Option<Vec<String>>,
    ) -> Result<Predicate, CompileError> {
        let source = prepare_source(code)?;
        let mut scope = Scope::new();
        scope.push_dynamic(ROW_PARAMETER, Dynamic::UNIT);
        let ast = self
            .engine
            .compile_expression_with_scope(&scope, &source)
            .map_err(|err| {
                debug!(error = %err, source = %source, "predicate failed to compile");
                CompileError::Syntax(err.to_string())
            })?;
        Ok(Predicate {
            engine: Arc::clone(&self.engine),
            ast,
            source,
            columns,
        })
    }

    /// Compile a transform over the three datasets.
    ///
    /// The script either defines `fn ruleFunction(clientData, workerData,
    /// taskData)` or is a body that returns
    /// `#{ clientData: .., workerData: .., taskData: .. }`.
    pub fn compile_transform(&self, code: &str) -> Result<Transform, CompileError> {
        let source = prepare_source(code)?;
        let ast = self
            .engine
            .compile_with_scope(&dataset_scope(None), &source)
            .map_err(|err| {
                debug!(error = %err, "transform failed to compile");
                CompileError::Syntax(err.to_string())
            })?;

        let mut entry_point = false;
        for function in ast.iter_functions() {
            if function.name != RULE_FUNCTION {
                continue;
            }
            if function.params.len() != 3 {
                return Err(CompileError::InvalidFunction(format!(
                    "{RULE_FUNCTION} takes 3 parameters, found {}",
                    function.params.len()
                )));
            }
            entry_point = true;
        }

        Ok(Transform {
            engine: Arc::clone(&self.engine),
            ast,
            source,
            entry_point,
        })
    }
}

/// Scope holding the three dataset parameters, unit-valued when compiling.
fn dataset_scope(datasets: Option<[Dynamic; 3]>) -> Scope<'static> {
    let mut scope = Scope::new();
    let values = datasets.unwrap_or([Dynamic::UNIT, Dynamic::UNIT, Dynamic::UNIT]);
    for (kind, value) in EntityKind::ALL.into_iter().zip(values) {
        scope.push_dynamic(kind.dataset_key(), value);
    }
    scope
}

/// A compiled row predicate.
#[derive(Clone)]
pub struct Predicate {
    engine: Arc<Engine>,
    ast: AST,
    source: String,
    columns: Option<Vec<String>>,
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("source", &self.source)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

impl Predicate {
    /// Normalized source the predicate was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    fn bind_row(&self, row: &Row) -> Result<Dynamic, RuleApplicationError> {
        match &self.columns {
            None => to_dynamic(row),
            Some(columns) => {
                let projected: Row = columns
                    .iter()
                    .filter_map(|column| {
                        row.get(column)
                            .map(|value| (column.clone(), value.clone()))
                    })
                    .collect();
                to_dynamic(&projected)
            }
        }
    }

    /// Evaluate against one row.
    pub fn evaluate(&self, row: &Row) -> Result<bool, RuleApplicationError> {
        let mut scope = Scope::new();
        scope.push_dynamic(ROW_PARAMETER, self.bind_row(row)?);
        let value = self
            .engine
            .eval_ast_with_scope::<Dynamic>(&mut scope, &self.ast)
            .map_err(|err| RuleApplicationError::Runtime(err.to_string()))?;
        Ok(is_truthy(&value))
    }

    /// True when the row matches. Evaluation errors count as no match.
    pub fn matches(&self, row: &Row) -> bool {
        match self.evaluate(row) {
            Ok(matched) => matched,
            Err(err) => {
                debug!(error = %err, "predicate failed on row; treating as no match");
                false
            }
        }
    }
}

/// A compiled three-dataset transform.
#[derive(Clone)]
pub struct Transform {
    engine: Arc<Engine>,
    ast: AST,
    source: String,
    entry_point: bool,
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("source", &self.source)
            .field("entry_point", &self.entry_point)
            .finish_non_exhaustive()
    }
}

impl Transform {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Run the transform and return the three resulting datasets.
    ///
    /// The input workbook is never touched; all three datasets must be present.
    pub fn run(&self, workbook: &Workbook) -> Result<Workbook, RuleApplicationError> {
        let dataset = |kind: EntityKind| {
            let rows = workbook
                .dataset(kind)
                .ok_or(RuleApplicationError::MissingDataset(kind))?;
            to_dynamic(&rows)
        };
        let clients = dataset(EntityKind::Clients)?;
        let workers = dataset(EntityKind::Workers)?;
        let tasks = dataset(EntityKind::Tasks)?;

        let outcome = if self.entry_point {
            let mut scope = dataset_scope(None);
            self.engine.call_fn::<Dynamic>(
                &mut scope,
                &self.ast,
                RULE_FUNCTION,
                (clients, workers, tasks),
            )
        } else {
            let mut scope = dataset_scope(Some([clients, workers, tasks]));
            self.engine.eval_ast_with_scope::<Dynamic>(&mut scope, &self.ast)
        };
        let result = outcome.map_err(|err| RuleApplicationError::Runtime(err.to_string()))?;

        read_result(&result)
    }
}

/// Convert a transform's return value back into a workbook.
fn read_result(result: &Dynamic) -> Result<Workbook, RuleApplicationError> {
    let value: Value = rhai::serde::from_dynamic(result)
        .map_err(|err| RuleApplicationError::MalformedResult(err.to_string()))?;
    let Value::Object(mut datasets) = value else {
        return Err(RuleApplicationError::MalformedResult(format!(
            "expected a map of datasets, got {}",
            result.type_name()
        )));
    };

    let mut workbook = Workbook::default();
    for kind in EntityKind::ALL {
        let key = kind.dataset_key();
        let Some(Value::Array(items)) = datasets.remove(key) else {
            return Err(RuleApplicationError::MalformedResult(format!(
                "{key} must be an array of rows"
            )));
        };
        let rows = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(row) => Ok(row),
                _ => Err(RuleApplicationError::MalformedResult(format!(
                    "{key}[{index}] is not a row object"
                ))),
            })
            .collect::<Result<Vec<Row>, _>>()?;
        workbook.set_dataset(kind, rows);
    }
    Ok(workbook)
}
