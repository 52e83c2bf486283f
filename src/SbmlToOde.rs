/// In-memory SBML document: species, parameters, reactions with kinetic laws, function
/// definitions, initial assignments, and the diagnostics collected while reading/converting.
pub mod model;
/// SbmlLoader trait and the JSON loader. Unreadable files give a document with a Fatal diagnostic,
/// invalid or duplicate SBML identifiers give Error diagnostics.
pub mod loader;
/// kinetic-law formula language: lexer tokens
pub mod token;
pub mod lexer;
/// Kinetic-law formulas: recursive-descent parser into a MathNode tree, numeric evaluation,
/// substitution, printing and lowering to RustedSciThe symbolic expressions
pub mod math;
/// Conversions applied before extraction: promotion of local parameters, expansion of initial
/// assignments and of function definitions
pub mod conversion;
pub mod sbml_error;
/// eng
/// Takes an SBML model and returns the ODE system of its reaction network:
/// 1) x - species as symbolic variables
/// 2) f - right-hand side, f[i] = dx[i]/dt
/// 3) p - parameters as symbolic variables
/// 4) params_values - parameter values, in the same order as p
/// 5) x_init - initial values, in the same order as x
/// # Examples
/// ```
/// use GeneletCRN::SbmlToOde::converter::OdeSystem;
/// use GeneletCRN::SbmlToOde::loader::JsonSbmlLoader;
/// let document = JsonSbmlLoader::new().parse_str(r#"{
///     "species": [{"id": "X", "initial_concentration": 1.0}],
///     "parameters": [{"id": "k", "value": 0.3}],
///     "reactions": [{"id": "R1", "reactants": [{"species": "X"}],
///                    "kinetic_law": {"formula": "k * X"}}]
/// }"#);
/// let ode = OdeSystem::from_document(&document).unwrap();
/// let f = ode.f[0].clone().lambdify_owned(vec!["X", "k"]);
/// assert!((f(vec![2.0, 0.3]) + 0.6).abs() < 1e-12);
/// ```
pub mod converter;
mod sbml_tests;
