//! The rule catalog.
//!
//! A [`Catalog`] is the fixed set of checks the engine runs, split into the
//! syntactical and logical phases, together with the register's field
//! definitions. It is built once through [`CatalogBuilder`], which rejects
//! duplicate identities and checks that target undeclared fields, and is
//! then shared read-only between validation runs.

mod fields;
mod rules;

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use sblar_model::{FieldSpec, Phase};

use crate::check::Check;
use crate::error::CatalogError;

/// Version of the rule set declared by [`sblar_catalog`].
pub const CATALOG_VERSION: &str = "2024.1";

/// Build the standard SBLAR catalog.
pub fn sblar_catalog() -> Result<Catalog, CatalogError> {
    let mut builder = Catalog::builder(CATALOG_VERSION);
    for field in fields::register_fields() {
        builder.field(field);
    }
    rules::declare(&mut builder)?;
    builder.build()
}

/// Immutable, phase-ordered rule set.
#[derive(Debug, Clone)]
pub struct Catalog {
    version: String,
    fields: Vec<FieldSpec>,
    syntactical: Vec<Check>,
    logical: Vec<Check>,
    by_rule_id: BTreeMap<String, (Phase, usize)>,
}

impl Catalog {
    pub fn builder(version: impl Into<String>) -> CatalogBuilder {
        CatalogBuilder {
            version: version.into(),
            fields: Vec::new(),
            syntactical: Vec::new(),
            logical: Vec::new(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Field definitions in register order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Checks of one phase, in declaration order.
    pub fn checks(&self, phase: Phase) -> &[Check] {
        match phase {
            Phase::Syntactical => &self.syntactical,
            Phase::Logical => &self.logical,
        }
    }

    /// Every check paired with its phase, phase 1 first.
    pub fn all_checks(&self) -> impl Iterator<Item = (Phase, &Check)> {
        Phase::ALL
            .into_iter()
            .flat_map(move |phase| self.checks(phase).iter().map(move |check| (phase, check)))
    }

    pub fn check(&self, rule_id: &str) -> Option<(Phase, &Check)> {
        let (phase, idx) = *self.by_rule_id.get(rule_id)?;
        self.checks(phase).get(idx).map(|check| (phase, check))
    }

    /// Checks filed under `field`, phase 1 first.
    pub fn checks_for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = (Phase, &'a Check)> {
        self.all_checks().filter(move |(_, check)| check.field == field)
    }

    pub fn len(&self) -> usize {
        self.syntactical.len() + self.logical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Accumulates fields and checks, then validates them into a [`Catalog`].
#[derive(Debug)]
pub struct CatalogBuilder {
    version: String,
    fields: Vec<FieldSpec>,
    syntactical: Vec<Check>,
    logical: Vec<Check>,
}

impl CatalogBuilder {
    pub fn field(&mut self, field: FieldSpec) -> &mut Self {
        self.fields.push(field);
        self
    }

    pub fn check(&mut self, phase: Phase, check: Check) -> &mut Self {
        match phase {
            Phase::Syntactical => self.syntactical.push(check),
            Phase::Logical => self.logical.push(check),
        }
        self
    }

    pub fn syntactical(&mut self, check: Check) -> &mut Self {
        self.check(Phase::Syntactical, check)
    }

    pub fn logical(&mut self, check: Check) -> &mut Self {
        self.check(Phase::Logical, check)
    }

    /// Validate and freeze the catalog.
    ///
    /// When no fields were declared, checks may target any field. Enum
    /// checks on a declared field follow that field's multi-value flag.
    pub fn build(mut self) -> Result<Catalog, CatalogError> {
        let mut field_names = BTreeSet::new();
        for field in &self.fields {
            if !field_names.insert(field.name.as_str()) {
                return Err(CatalogError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }

        let mut by_rule_id = BTreeMap::new();
        let mut names = BTreeSet::new();
        for phase in Phase::ALL {
            let checks = match phase {
                Phase::Syntactical => &self.syntactical,
                Phase::Logical => &self.logical,
            };
            for (idx, check) in checks.iter().enumerate() {
                if check.rule_id.trim().is_empty() {
                    return Err(CatalogError::EmptyRuleId {
                        name: check.name.clone(),
                    });
                }
                if by_rule_id.insert(check.rule_id.clone(), (phase, idx)).is_some() {
                    return Err(CatalogError::DuplicateRuleId {
                        rule_id: check.rule_id.clone(),
                    });
                }
                if !names.insert(check.name.as_str()) {
                    return Err(CatalogError::DuplicateName {
                        name: check.name.clone(),
                    });
                }
                if field_names.is_empty() {
                    continue;
                }
                if let Some(unknown) = check
                    .target_fields()
                    .into_iter()
                    .find(|field| !field_names.contains(field))
                {
                    return Err(CatalogError::UnknownField {
                        rule_id: check.rule_id.clone(),
                        field: unknown.to_string(),
                    });
                }
            }
        }

        for check in self.syntactical.iter_mut().chain(self.logical.iter_mut()) {
            if let Some(spec) = self.fields.iter().find(|spec| spec.name == check.field) {
                check.predicate.bind_field(spec);
            }
        }

        debug!(
            version = %self.version,
            fields = self.fields.len(),
            syntactical = self.syntactical.len(),
            logical = self.logical.len(),
            "catalog built"
        );
        Ok(Catalog {
            version: self.version,
            fields: self.fields,
            syntactical: self.syntactical,
            logical: self.logical,
            by_rule_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use sblar_model::{Scope, Severity};

    use super::*;
    use crate::predicate::Predicate;

    fn blank_check(rule_id: &str, name: &str, field: &str) -> Check {
        Check::new(rule_id, name, Severity::Error, field, Predicate::TextLength { min: 1, max: 10 })
    }

    #[test]
    fn standard_catalog_shape() {
        let catalog = sblar_catalog().expect("catalog builds");
        assert_eq!(catalog.fields().len(), 81);
        assert_eq!(catalog.len(), 182);
        assert_eq!(catalog.version(), CATALOG_VERSION);
        for (idx, field) in catalog.fields().iter().enumerate() {
            assert_eq!(usize::from(field.number), idx + 1, "{}", field.name);
        }
    }

    #[test]
    fn uid_uniqueness_is_a_register_check_in_phase_two() {
        let catalog = sblar_catalog().expect("catalog builds");
        let (phase, check) = catalog.check("E3000").expect("E3000 declared");
        assert_eq!(phase, Phase::Logical);
        assert_eq!(check.scope(), Scope::Register);
        assert_eq!(check.field, "uid");
    }

    #[test]
    fn owner_rules_follow_owner_numbering() {
        let catalog = sblar_catalog().expect("catalog builds");
        let (_, check) = catalog.check("E1440").expect("owner 4 ethnicity");
        assert_eq!(check.field, "po_4_ethnicity");
        assert_eq!(check.fig_anchor.as_deref(), Some("4.1.85"));
        let (_, check) = catalog.check("E2143").expect("owner 4 gender conflict");
        assert_eq!(check.field, "po_4_gender_ff");
        assert_eq!(check.target_fields(), vec!["po_4_gender_ff", "po_4_gender_flag"]);
        assert_eq!(check.fig_anchor.as_deref(), Some("4.2.49"));
        let (phase, check) = catalog.check("W1302").expect("owner 3 race restriction");
        assert_eq!(phase, Phase::Logical);
        assert_eq!(check.name, "po_3_race.multi_value_field_restriction");
    }

    #[test]
    fn checks_for_field_lists_phase_one_first() {
        let catalog = sblar_catalog().expect("catalog builds");
        let ids: Vec<&str> = catalog
            .checks_for_field("uid")
            .map(|(_, check)| check.rule_id.as_str())
            .collect();
        assert_eq!(ids, vec!["E0001", "E0002", "E3000", "W0003"]);
    }

    #[test]
    fn duplicate_rule_id_is_rejected() {
        let mut builder = Catalog::builder("test");
        builder
            .syntactical(blank_check("E0001", "a.one", "a"))
            .logical(blank_check("E0001", "a.two", "a"));
        assert_eq!(
            builder.build().unwrap_err(),
            CatalogError::DuplicateRuleId {
                rule_id: "E0001".to_string()
            }
        );
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut builder = Catalog::builder("test");
        builder
            .syntactical(blank_check("E0001", "a.same", "a"))
            .syntactical(blank_check("E0002", "a.same", "a"));
        assert!(matches!(builder.build(), Err(CatalogError::DuplicateName { .. })));
    }

    #[test]
    fn empty_rule_id_is_rejected() {
        let mut builder = Catalog::builder("test");
        builder.syntactical(blank_check(" ", "a.blank", "a"));
        assert!(matches!(builder.build(), Err(CatalogError::EmptyRuleId { .. })));
    }

    #[test]
    fn undeclared_field_is_rejected() {
        let mut builder = Catalog::builder("test");
        builder.field(FieldSpec::new("a", 1, "A")).logical(Check::new(
            "E0100",
            "a.conflict",
            Severity::Error,
            "a",
            Predicate::ConditionalFieldConflict {
                related: "b".to_string(),
                condition: BTreeSet::from(["1".to_string()]),
            },
        ));
        assert_eq!(
            builder.build().unwrap_err(),
            CatalogError::UnknownField {
                rule_id: "E0100".to_string(),
                field: "b".to_string()
            }
        );
    }

    #[test]
    fn duplicate_field_is_rejected() {
        let mut builder = Catalog::builder("test");
        builder.field(FieldSpec::new("a", 1, "A")).field(FieldSpec::new("a", 2, "A again"));
        assert!(matches!(builder.build(), Err(CatalogError::DuplicateField { .. })));
    }
}
