//! Model-level conversions applied before ODE extraction.
//!
//! A conversion either succeeds completely or leaves the model untouched; failures are recorded
//! in the document's diagnostics and returned.
use super::math::{MathError, MathNode, is_builtin, parse_formula};
use super::model::{SbmlDocument, SbmlModel, SbmlParameter, Severity};
use super::sbml_error::SbmlError;
use log::{debug, info};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOption {
    /// move kinetic-law local parameters to the global parameter list
    PromoteLocalParameters,
    /// evaluate initial assignments into initial values
    ExpandInitialAssignments,
    /// inline user function calls in kinetic laws
    ExpandFunctionDefinitions,
}

impl SbmlDocument {
    pub fn convert(&mut self, option: ConversionOption) -> Result<(), SbmlError> {
        let mut model = self.model.clone();
        let result = match option {
            ConversionOption::PromoteLocalParameters => promote_local_parameters(&mut model),
            ConversionOption::ExpandInitialAssignments => expand_initial_assignments(&mut model),
            ConversionOption::ExpandFunctionDefinitions => expand_function_definitions(&mut model),
        };
        match result {
            Ok(()) => {
                self.model = model;
                info!("Applied conversion {:?}", option);
                Ok(())
            }
            Err(e) => {
                self.add_diagnostic(Severity::Error, &e.to_string());
                Err(SbmlError::Conversion {
                    option,
                    message: e.to_string(),
                })
            }
        }
    }
}

fn parse_in(context: &str, formula: &str) -> Result<MathNode, SbmlError> {
    parse_formula(formula).map_err(|source| SbmlError::Math {
        context: context.to_string(),
        source,
    })
}

fn promote_local_parameters(model: &mut SbmlModel) -> Result<(), SbmlError> {
    let mut taken: Vec<String> = model
        .species
        .iter()
        .map(|s| s.id.clone())
        .chain(model.parameters.iter().map(|p| p.id.clone()))
        .chain(model.reactions.iter().map(|r| r.id.clone()))
        .chain(model.function_definitions.iter().map(|f| f.id.clone()))
        .collect();
    let mut promoted: Vec<SbmlParameter> = Vec::new();
    for reaction in model.reactions.iter_mut() {
        let Some(law) = reaction.kinetic_law.as_mut() else {
            continue;
        };
        if law.local_parameters.is_empty() {
            continue;
        }
        let mut renames: HashMap<String, MathNode> = HashMap::new();
        for local in law.local_parameters.drain(..) {
            let mut id = local.id.clone();
            if taken.contains(&id) {
                id = format!("{}_{}", reaction.id, local.id);
                while taken.contains(&id) {
                    id.push('_');
                }
                debug!(
                    "Local parameter '{}' of reaction '{}' promoted as '{}'",
                    local.id, reaction.id, id
                );
                renames.insert(local.id.clone(), MathNode::Symbol(id.clone()));
            }
            taken.push(id.clone());
            promoted.push(SbmlParameter {
                id,
                value: local.value,
            });
        }
        if !renames.is_empty() {
            let node = parse_in(&format!("kinetic law of '{}'", reaction.id), &law.formula)?;
            law.formula = node.substitute(&renames).to_string();
        }
    }
    model.parameters.extend(promoted);
    Ok(())
}

fn expand_initial_assignments(model: &mut SbmlModel) -> Result<(), SbmlError> {
    if model.initial_assignments.is_empty() {
        return Ok(());
    }
    let functions = function_table(model)?;
    let mut values: HashMap<String, f64> = HashMap::new();
    for s in &model.species {
        values.insert(s.id.clone(), s.initial_value());
    }
    for p in &model.parameters {
        if let Some(value) = p.value {
            values.insert(p.id.clone(), value);
        }
    }
    let mut pending: Vec<(String, MathNode)> = Vec::new();
    for assignment in &model.initial_assignments {
        let context = format!("initial assignment of '{}'", assignment.symbol);
        let node = parse_in(&context, &assignment.math)?;
        let node = expand_calls(&node, &functions, &mut Vec::new())
            .map_err(|source| SbmlError::Math { context, source })?;
        pending.push((assignment.symbol.clone(), node));
    }
    // an initial assignment overrides the declared value: dependents wait for the assignment
    for (symbol, _) in &pending {
        values.remove(symbol);
    }
    // assignments may depend on each other: repeat until nothing is left or nothing resolves
    while !pending.is_empty() {
        let mut unresolved = Vec::new();
        let mut last_error = None;
        let before = pending.len();
        for (symbol, node) in pending {
            match node.evaluate(&values) {
                Ok(value) => {
                    assign(model, &symbol, value)?;
                    values.insert(symbol, value);
                }
                Err(e) => {
                    last_error = Some((symbol.clone(), e));
                    unresolved.push((symbol, node));
                }
            }
        }
        if unresolved.len() == before {
            if let Some((symbol, source)) = last_error {
                return Err(SbmlError::Math {
                    context: format!("initial assignment of '{}'", symbol),
                    source,
                });
            }
        }
        pending = unresolved;
    }
    model.initial_assignments.clear();
    Ok(())
}

fn assign(model: &mut SbmlModel, symbol: &str, value: f64) -> Result<(), SbmlError> {
    if let Some(i) = model.species_index(symbol) {
        let species = &mut model.species[i];
        if species.initial_amount.is_some() {
            species.initial_amount = Some(value);
        } else {
            species.initial_concentration = Some(value);
        }
        return Ok(());
    }
    if let Some(i) = model.parameter_index(symbol) {
        model.parameters[i].value = Some(value);
        return Ok(());
    }
    Err(SbmlError::UnknownAssignmentTarget(symbol.to_string()))
}

struct UserFunction {
    arguments: Vec<String>,
    body: MathNode,
}

fn function_table(model: &SbmlModel) -> Result<HashMap<String, UserFunction>, SbmlError> {
    let mut table = HashMap::new();
    for f in &model.function_definitions {
        let body = parse_in(&format!("function definition '{}'", f.id), &f.body)?;
        table.insert(
            f.id.clone(),
            UserFunction {
                arguments: f.arguments.clone(),
                body,
            },
        );
    }
    Ok(table)
}

/// Inline user function calls; `stack` holds the functions being expanded
fn expand_calls(
    node: &MathNode,
    functions: &HashMap<String, UserFunction>,
    stack: &mut Vec<String>,
) -> Result<MathNode, MathError> {
    let expanded = match node {
        MathNode::Number(_) | MathNode::Symbol(_) => node.clone(),
        MathNode::Neg(inner) => MathNode::Neg(Box::new(expand_calls(inner, functions, stack)?)),
        MathNode::Binary(op, left, right) => MathNode::binary(
            *op,
            expand_calls(left, functions, stack)?,
            expand_calls(right, functions, stack)?,
        ),
        MathNode::Call(name, args) => {
            let args = args
                .iter()
                .map(|a| expand_calls(a, functions, stack))
                .collect::<Result<Vec<MathNode>, MathError>>()?;
            if is_builtin(name) {
                return Ok(MathNode::Call(name.clone(), args));
            }
            let function = functions
                .get(name)
                .ok_or_else(|| MathError::UnknownFunction(name.clone()))?;
            if function.arguments.len() != args.len() {
                return Err(MathError::Arity {
                    function: name.clone(),
                    expected: function.arguments.len(),
                    found: args.len(),
                });
            }
            if stack.contains(name) {
                return Err(MathError::RecursiveFunction(name.clone()));
            }
            let replacements: HashMap<String, MathNode> = function
                .arguments
                .iter()
                .cloned()
                .zip(args)
                .collect();
            let body = function.body.substitute(&replacements);
            stack.push(name.clone());
            let result = expand_calls(&body, functions, stack);
            stack.pop();
            result?
        }
    };
    Ok(expanded)
}

fn expand_function_definitions(model: &mut SbmlModel) -> Result<(), SbmlError> {
    if model.function_definitions.is_empty() {
        return Ok(());
    }
    let functions = function_table(model)?;
    for reaction in model.reactions.iter_mut() {
        let Some(law) = reaction.kinetic_law.as_mut() else {
            continue;
        };
        let context = format!("kinetic law of '{}'", reaction.id);
        let node = parse_in(&context, &law.formula)?;
        if node.user_calls().is_empty() {
            continue;
        }
        let expanded = expand_calls(&node, &functions, &mut Vec::new())
            .map_err(|source| SbmlError::Math { context, source })?;
        law.formula = expanded.to_string();
    }
    model.function_definitions.clear();
    Ok(())
}
