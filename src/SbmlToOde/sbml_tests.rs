#[cfg(test)]
mod tests {
    use crate::SbmlToOde::converter::{OdeSystem, sbml_to_ode};
    use crate::SbmlToOde::loader::{JsonSbmlLoader, SbmlLoader};
    use crate::SbmlToOde::model::{
        KineticLaw, SbmlDocument, SbmlModel, SbmlParameter, SbmlReaction, SbmlSpecies, Severity,
        SpeciesReference,
    };
    use crate::SbmlToOde::sbml_error::SbmlError;
    use RustedSciThe::symbolic::symbolic_engine::Expr;
    use approx::assert_relative_eq;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    /// loader handing out a fixed document
    struct StaticLoader(SbmlDocument);

    impl SbmlLoader for StaticLoader {
        fn load(&self, _path: &Path) -> SbmlDocument {
            self.0.clone()
        }
    }

    fn law(formula: &str) -> Option<KineticLaw> {
        Some(KineticLaw {
            formula: formula.to_string(),
            local_parameters: vec![],
        })
    }

    fn species(id: &str, concentration: f64) -> SbmlSpecies {
        let mut s = SbmlSpecies::new(id);
        s.initial_concentration = Some(concentration);
        s
    }

    fn decay_model() -> SbmlModel {
        SbmlModel {
            id: "decay".to_string(),
            species: vec![species("X", 2.0), species("Y", 1.5)],
            parameters: vec![SbmlParameter::new("k", 0.5)],
            reactions: vec![SbmlReaction {
                id: "R1".to_string(),
                reactants: vec![SpeciesReference::new("X", 1.0)],
                products: vec![],
                kinetic_law: law("k * X"),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_decay_model() {
        let ode = OdeSystem::from_document(&SbmlDocument::new(decay_model())).unwrap();
        assert_eq!(
            ode.x,
            vec![Expr::Var("X".to_string()), Expr::Var("Y".to_string())]
        );
        assert_eq!(ode.p, vec![Expr::Var("k".to_string())]);
        assert_eq!(ode.params_values, vec![0.5]);
        assert_eq!(ode.x_init, vec![2.0, 1.5]);
        assert_eq!(ode.f.len(), 2);
        // Y takes part in no reaction
        assert_eq!(ode.f[1], Expr::Const(0.0));
        let f = ode.f[0].clone().lambdify_owned(vec!["X", "k"]);
        assert_relative_eq!(f(vec![2.0, 0.5]), -1.0, epsilon = 1e-12);
        assert_relative_eq!(f(vec![3.0, 2.0]), -6.0, epsilon = 1e-12);
        let rhs = ode.evaluate(&[4.0, 1.5]).unwrap();
        assert_relative_eq!(rhs[0], -2.0, epsilon = 1e-12);
        assert_relative_eq!(rhs[1], 0.0);
    }

    #[test]
    fn test_free_symbol_in_law_is_reported_on_evaluation() {
        let mut model = decay_model();
        // compartment size that is not declared as a parameter
        model.reactions[0].kinetic_law = law("cell * k * X");
        let ode = OdeSystem::from_document(&SbmlDocument::new(model)).unwrap();
        assert!(matches!(
            ode.evaluate(&[1.0, 0.0]),
            Err(SbmlError::UnknownSymbol(symbol)) if symbol.trim() == "cell"
        ));
        let mut model = decay_model();
        model.reactions[0].kinetic_law = law("cell * k * X");
        model.parameters.push(SbmlParameter::new("cell", 2.0));
        let ode = OdeSystem::from_document(&SbmlDocument::new(model)).unwrap();
        assert_relative_eq!(ode.evaluate(&[1.0, 0.0]).unwrap()[0], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_stoichiometry_scales_the_law() {
        let model = SbmlModel {
            species: vec![species("X", 1.0), species("Y", 0.0)],
            parameters: vec![SbmlParameter::new("k", 3.0)],
            reactions: vec![SbmlReaction {
                id: "dimerization".to_string(),
                reactants: vec![SpeciesReference::new("X", 2.0)],
                products: vec![SpeciesReference::new("Y", 1.0)],
                kinetic_law: law("k * X^2"),
            }],
            ..Default::default()
        };
        let ode = OdeSystem::from_document(&SbmlDocument::new(model)).unwrap();
        let rhs = ode.evaluate(&[2.0, 0.0]).unwrap();
        assert_relative_eq!(rhs[0], -24.0, epsilon = 1e-12);
        assert_relative_eq!(rhs[1], 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reversible_law_and_untouched_species() {
        let model = SbmlModel {
            species: vec![species("A", 1.0), species("B", 1.0), species("C", 7.0)],
            parameters: vec![SbmlParameter::new("kf", 2.0), SbmlParameter::new("kr", 1.0)],
            reactions: vec![SbmlReaction {
                id: "R".to_string(),
                reactants: vec![SpeciesReference::new("A", 1.0)],
                products: vec![SpeciesReference::new("B", 1.0)],
                kinetic_law: law("kf * A - kr * B"),
            }],
            ..Default::default()
        };
        let ode = OdeSystem::from_document(&SbmlDocument::new(model)).unwrap();
        assert_eq!(ode.f[2], Expr::Const(0.0));
        let rhs = ode.evaluate(&[3.0, 1.0, 7.0]).unwrap();
        assert_relative_eq!(rhs[0], -5.0, epsilon = 1e-12);
        assert_relative_eq!(rhs[1], 5.0, epsilon = 1e-12);
        assert_relative_eq!(rhs[2], 0.0);
    }

    #[test]
    fn test_initial_values_and_unset_parameters() {
        let mut by_amount = SbmlSpecies::new("B");
        by_amount.initial_amount = Some(4.0);
        let mut both = species("C", 5.0);
        both.initial_amount = Some(9.0);
        let model = SbmlModel {
            species: vec![SbmlSpecies::new("A"), by_amount, both],
            parameters: vec![SbmlParameter {
                id: "k".to_string(),
                value: None,
            }],
            ..Default::default()
        };
        let ode = OdeSystem::from_document(&SbmlDocument::new(model)).unwrap();
        assert_eq!(ode.x_init, vec![0.0, 4.0, 5.0]);
        assert_eq!(ode.params_values, vec![0.0]);
        assert_eq!(ode.x.len(), ode.f.len());
        assert_eq!(ode.p.len(), ode.params_values.len());
    }

    #[test]
    fn test_malformed_reactions() {
        let mut model = decay_model();
        model.reactions[0].kinetic_law = None;
        assert!(matches!(
            OdeSystem::from_document(&SbmlDocument::new(model)),
            Err(SbmlError::MissingKineticLaw(id)) if id == "R1"
        ));
        let mut model = decay_model();
        model.reactions[0].products = vec![SpeciesReference::new("Z", 1.0)];
        assert!(matches!(
            OdeSystem::from_document(&SbmlDocument::new(model)),
            Err(SbmlError::UnknownSpecies { species, .. }) if species == "Z"
        ));
        let mut model = decay_model();
        model.reactions[0].kinetic_law = law("k * (X");
        assert!(matches!(
            OdeSystem::from_document(&SbmlDocument::new(model)),
            Err(SbmlError::Math { .. })
        ));
    }

    #[test]
    fn test_fatal_documents_are_rejected() {
        let mut document = SbmlDocument::new(decay_model());
        document.add_diagnostic(Severity::Fatal, "unreadable");
        let result = sbml_to_ode(&StaticLoader(document), Path::new("ignored"));
        match result {
            Err(SbmlError::Fatal(log)) => assert!(log.contains("unreadable")),
            other => panic!("unexpected result {:?}", other.map(|o| o.x)),
        }
        let result = sbml_to_ode(&JsonSbmlLoader::new(), Path::new("/nonexistent/model.json"));
        assert!(matches!(result, Err(SbmlError::Fatal(_))));
    }

    #[test]
    fn test_non_fatal_diagnostics_do_not_stop_conversion() {
        let mut document = SbmlDocument::new(decay_model());
        document.add_diagnostic(Severity::Error, "suspicious id");
        let ode = sbml_to_ode(&StaticLoader(document), Path::new("ignored")).unwrap();
        assert_eq!(ode.x.len(), 2);
    }

    #[test]
    fn test_failed_conversion_is_skipped() {
        let mut model = decay_model();
        model
            .initial_assignments
            .push(crate::SbmlToOde::model::InitialAssignment {
                symbol: "X".to_string(),
                math: "undefined_symbol".to_string(),
            });
        let ode = sbml_to_ode(&StaticLoader(SbmlDocument::new(model)), Path::new("x")).unwrap();
        // assignment could not be expanded, original initial value is kept
        assert_eq!(ode.x_init, vec![2.0, 1.5]);
    }

    #[test]
    fn test_full_pipeline_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"model": {{
                "id": "mm",
                "species": [{{"id": "S", "initial_concentration": 10.0}},
                            {{"id": "P", "initial_amount": 0.0}}],
                "parameters": [{{"id": "Vmax", "value": 2.0}}, {{"id": "S0", "value": 4.0}}],
                "function_definitions": [{{"id": "mm", "arguments": ["s", "v", "km"],
                                           "body": "v * s / (km + s)"}}],
                "initial_assignments": [{{"symbol": "S", "math": "S0 * 2"}}],
                "reactions": [{{"id": "R1",
                               "reactants": [{{"species": "S"}}],
                               "products": [{{"species": "P"}}],
                               "kinetic_law": {{"formula": "mm(S, Vmax, Km)",
                                               "local_parameters": [{{"id": "Km", "value": 8.0}}]}}}}]
            }}}}"#
        )
        .unwrap();
        let ode = sbml_to_ode(&JsonSbmlLoader::new(), file.path()).unwrap();
        assert_eq!(ode.species_names(), vec!["S", "P"]);
        assert_eq!(ode.parameter_names(), vec!["Vmax", "S0", "Km"]);
        assert_eq!(ode.params_values, vec![2.0, 4.0, 8.0]);
        assert_eq!(ode.x_init, vec![8.0, 0.0]);
        let rhs = ode.evaluate(&[8.0, 0.0]).unwrap();
        assert_relative_eq!(rhs[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(rhs[1], 1.0, epsilon = 1e-12);
        let f_num = ode.f_with_parameters();
        let f_s = f_num[0].clone().lambdify_owned(vec!["S"]);
        assert_relative_eq!(f_s(vec![8.0]), -1.0, epsilon = 1e-12);
    }
}
