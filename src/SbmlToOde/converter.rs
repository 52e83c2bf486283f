//! Extraction of the ODE right-hand side of a reaction network model.
//!
//! For species `x_i` the derivative is the sum over reactions of `stoich * law` for products
//! minus `stoich * law` for reactants, where `law` is the reaction's kinetic law as a
//! symbolic expression.
use super::conversion::ConversionOption;
use super::loader::SbmlLoader;
use super::math::parse_formula;
use super::model::SbmlDocument;
use super::sbml_error::SbmlError;
use RustedSciThe::symbolic::symbolic_engine::Expr;
use log::{error, info, warn};
use std::path::Path;

/// Symbolic ODE system `dx/dt = f(x, p)`
#[derive(Debug, Clone)]
pub struct OdeSystem {
    /// species symbols
    pub x: Vec<Expr>,
    /// derivative of each species, index-aligned with `x`
    pub f: Vec<Expr>,
    /// parameter symbols
    pub p: Vec<Expr>,
    /// parameter values, index-aligned with `p`
    pub params_values: Vec<f64>,
    /// initial values, index-aligned with `x`
    pub x_init: Vec<f64>,
}

fn symbol_name(symbol: &Expr) -> Option<&str> {
    match symbol {
        Expr::Var(name) => Some(name.as_str()),
        _ => None,
    }
}

impl OdeSystem {
    pub fn from_document(document: &SbmlDocument) -> Result<Self, SbmlError> {
        let model = &document.model;
        let x: Vec<Expr> = model
            .species
            .iter()
            .map(|s| Expr::Var(s.id.clone()))
            .collect();
        let x_init: Vec<f64> = model.species.iter().map(|s| s.initial_value()).collect();

        let mut p = Vec::with_capacity(model.parameters.len());
        let mut params_values = Vec::with_capacity(model.parameters.len());
        for parameter in &model.parameters {
            let value = match parameter.value {
                Some(value) => value,
                None => {
                    warn!("Parameter '{}' has no value, using 0", parameter.id);
                    0.0
                }
            };
            p.push(Expr::Var(parameter.id.clone()));
            params_values.push(value);
        }

        let mut terms: Vec<Vec<Expr>> = vec![Vec::new(); x.len()];
        for reaction in &model.reactions {
            let law = reaction
                .kinetic_law
                .as_ref()
                .ok_or_else(|| SbmlError::MissingKineticLaw(reaction.id.clone()))?;
            let node = parse_formula(&law.formula).map_err(|source| SbmlError::Math {
                context: format!("kinetic law of '{}'", reaction.id),
                source,
            })?;
            for symbol in node.symbols() {
                if model.species_index(&symbol).is_none() && model.parameter_index(&symbol).is_none()
                {
                    warn!(
                        "Kinetic law of '{}' uses '{}', which is neither a species nor a parameter",
                        reaction.id, symbol
                    );
                }
            }
            let rate = node.to_expr().map_err(|source| SbmlError::Math {
                context: format!("kinetic law of '{}'", reaction.id),
                source,
            })?;
            let sides = [(&reaction.reactants, -1.0), (&reaction.products, 1.0)];
            for (references, sign) in sides {
                for reference in references.iter() {
                    let i = model.species_index(&reference.species).ok_or_else(|| {
                        SbmlError::UnknownSpecies {
                            reaction: reaction.id.clone(),
                            species: reference.species.clone(),
                        }
                    })?;
                    let term = if reference.stoichiometry == 1.0 {
                        rate.clone()
                    } else {
                        rate.clone() * Expr::Const(reference.stoichiometry)
                    };
                    terms[i].push(if sign < 0.0 { -term } else { term });
                }
            }
        }
        let f: Vec<Expr> = terms
            .into_iter()
            .map(|species_terms| {
                species_terms
                    .into_iter()
                    .reduce(|acc, term| acc + term)
                    .unwrap_or(Expr::Const(0.0))
            })
            .collect();
        info!(
            "ODE system with {} species, {} parameters, {} reactions",
            x.len(),
            p.len(),
            model.reactions.len()
        );
        Ok(OdeSystem {
            x,
            f,
            p,
            params_values,
            x_init,
        })
    }

    pub fn species_names(&self) -> Vec<&str> {
        self.x.iter().filter_map(symbol_name).collect()
    }

    pub fn parameter_names(&self) -> Vec<&str> {
        self.p.iter().filter_map(symbol_name).collect()
    }

    /// Right-hand side with every parameter replaced by its value
    pub fn f_with_parameters(&self) -> Vec<Expr> {
        self.f
            .iter()
            .map(|f_i| {
                let mut f_i = f_i.clone();
                for (name, value) in self.parameter_names().iter().zip(&self.params_values) {
                    f_i = f_i.set_variable(name, *value);
                }
                f_i
            })
            .collect()
    }

    /// Numeric right-hand side at state `x` with the stored parameter values.
    /// Fails when a derivative uses a symbol that is neither a species nor a parameter.
    pub fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>, SbmlError> {
        let mut args: Vec<&str> = self.species_names();
        args.extend(self.parameter_names());
        for f_i in &self.f {
            if let Some(symbol) = f_i
                .all_arguments_are_variables()
                .into_iter()
                .find(|v| !args.contains(&v.trim()))
            {
                return Err(SbmlError::UnknownSymbol(symbol));
            }
        }
        let mut values: Vec<f64> = x.to_vec();
        values.extend(self.params_values.iter());
        Ok(self
            .f
            .iter()
            .map(|f_i| {
                let fun = f_i.clone().lambdify_owned(args.clone());
                fun(values.clone())
            })
            .collect())
    }
}

/// Load an SBML model and extract its ODE system.
///
/// Fatal load diagnostics abort with [`SbmlError::Fatal`]. Otherwise the diagnostics are cleared
/// and the conversions are applied in order; a failing conversion is logged and skipped.
pub fn sbml_to_ode<L: SbmlLoader>(loader: &L, path: &Path) -> Result<OdeSystem, SbmlError> {
    let mut document = loader.load(path);
    if document.has_fatal_errors() {
        return Err(SbmlError::Fatal(document.error_log()));
    }
    document.clear_log();
    for option in [
        ConversionOption::PromoteLocalParameters,
        ConversionOption::ExpandInitialAssignments,
        ConversionOption::ExpandFunctionDefinitions,
    ] {
        if let Err(e) = document.convert(option) {
            warn!("{}", e);
            warn!("{}", document.error_log());
        }
    }
    OdeSystem::from_document(&document)
}

/// [`sbml_to_ode`] for command-line use: a fatal load error is logged and ends the process
/// with exit code 1.
pub fn sbml_to_ode_or_exit<L: SbmlLoader>(loader: &L, path: &Path) -> Result<OdeSystem, SbmlError> {
    match sbml_to_ode(loader, path) {
        Err(SbmlError::Fatal(log)) => {
            error!("Encountered serious errors while reading file");
            error!("{}", log);
            std::process::exit(1);
        }
        other => other,
    }
}
