//! Builds configured paths from declarative definitions.

use progression_core::{ConfigError, PathDefinition, RequirementDefinition, RequirementKind};
use tracing::{info, warn};

use super::Path;
use crate::hooks::DependencyRegistry;
use crate::requirement::Requirement;
use crate::results::ResultFactory;

/// A requirement excluded from its path during building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRequirement {
    pub path: String,
    pub id: u32,
    pub kind: String,
    pub warnings: Vec<String>,
}

/// Outcome of a configuration load, for operators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub paths: usize,
    pub requirements: usize,
    pub rejected: Vec<RejectedRequirement>,
    /// Path-level results that could not be built, as `path: message`.
    pub result_warnings: Vec<String>,
    /// Paths that declared required requirements but kept none of them.
    /// Such a path completes on its first check.
    pub unguarded_paths: Vec<String>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
            && self.result_warnings.is_empty()
            && self.unguarded_paths.is_empty()
    }
}

/// Assigns requirement ids and configures requirements against the registry.
///
/// Ids are handed out in definition order across every path built by the same
/// builder, so completion records of different paths never share a key. A
/// rejected requirement still consumes its id; the ids of its siblings do not
/// shift when it is fixed later.
pub struct PathBuilder<'a> {
    registry: &'a DependencyRegistry,
    results: ResultFactory,
    next_id: u32,
    report: BuildReport,
}

impl<'a> PathBuilder<'a> {
    pub fn new(registry: &'a DependencyRegistry, results: ResultFactory) -> Self {
        Self {
            registry,
            results,
            next_id: 0,
            report: BuildReport::default(),
        }
    }

    /// Builds every definition and returns the paths with the load report.
    pub fn build_all(mut self, definitions: &[PathDefinition]) -> (Vec<Path>, BuildReport) {
        let paths = definitions.iter().map(|d| self.build(d)).collect();
        (paths, self.finish())
    }

    /// Builds one path. Invalid requirements are dropped and reported.
    pub fn build(&mut self, definition: &PathDefinition) -> Path {
        let mut requirements = Vec::with_capacity(definition.requirements.len());

        for requirement in &definition.requirements {
            let id = self.next_id;
            self.next_id += 1;

            match self.build_requirement(id, requirement) {
                Ok(built) => requirements.push(built),
                Err(warnings) => {
                    warn!(
                        target: "progression::engine",
                        path = %definition.name,
                        requirement = id,
                        kind = %requirement.kind,
                        "Requirement excluded from path"
                    );
                    self.report.rejected.push(RejectedRequirement {
                        path: definition.name.clone(),
                        id,
                        kind: requirement.kind.clone(),
                        warnings,
                    });
                }
            }
        }

        let declared_required = definition.requirements.iter().any(|r| !r.optional);
        if declared_required && requirements.iter().all(Requirement::is_optional) {
            warn!(
                target: "progression::engine",
                path = %definition.name,
                "Every required requirement was rejected; path completes without checks"
            );
            self.report.unguarded_paths.push(definition.name.clone());
        }

        let mut results = Vec::with_capacity(definition.results.len());
        for result in &definition.results {
            match self.results.build(result) {
                Ok(built) => results.push(built),
                Err(err) => {
                    warn!(
                        target: "progression::engine",
                        path = %definition.name,
                        kind = %result.kind,
                        error = %err,
                        "Path result skipped"
                    );
                    self.report
                        .result_warnings
                        .push(format!("{}: {} result: {}", definition.name, result.kind, err));
                }
            }
        }

        info!(
            target: "progression::engine",
            path = %definition.name,
            requirements = requirements.len(),
            results = results.len(),
            "Path built"
        );

        self.report.paths += 1;
        self.report.requirements += requirements.len();
        Path::new(
            definition.name.clone(),
            definition.display_name(),
            requirements,
            results,
        )
    }

    fn build_requirement(
        &self,
        id: u32,
        definition: &RequirementDefinition,
    ) -> Result<Requirement, Vec<String>> {
        let kind: RequirementKind = definition
            .kind
            .trim()
            .parse()
            .map_err(|_| vec![ConfigError::UnknownRequirement(definition.kind.clone()).to_string()])?;

        let results = self
            .results
            .build_all(&definition.results)
            .map_err(|err| vec![format!("invalid result: {}", err)])?;

        let mut requirement = Requirement::of_kind(id, kind)
            .with_optional(definition.optional)
            .with_auto_complete(definition.auto_complete)
            .with_world(definition.world.clone())
            .with_results(results);

        if requirement.set_options(&definition.options, self.registry) {
            Ok(requirement)
        } else {
            Err(requirement.warnings().to_vec())
        }
    }

    /// Ends the load and returns what was accepted and rejected.
    pub fn finish(self) -> BuildReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use progression_core::{HookId, ResultDefinition, ResultKind};

    use super::*;
    use crate::hooks::MemoryStatHook;
    use crate::results::RecordingHost;

    fn registry() -> DependencyRegistry {
        let mut registry = DependencyRegistry::new();
        registry.register_hook(Arc::new(MemoryStatHook::new(HookId::USkyBlock)));
        registry.register_hook(Arc::new(MemoryStatHook::new(HookId::Factions)));
        registry
    }

    fn factory() -> ResultFactory {
        ResultFactory::new(Arc::new(RecordingHost::new()))
    }

    fn path(name: &str, requirements: Vec<RequirementDefinition>) -> PathDefinition {
        PathDefinition {
            name: name.to_string(),
            display_name: None,
            requirements,
            results: Vec::new(),
        }
    }

    #[test]
    fn drops_invalid_requirements_and_keeps_their_ids() {
        let registry = registry();
        let mut builder = PathBuilder::new(&registry, factory());

        let built = builder.build(&path(
            "member",
            vec![
                RequirementDefinition::new("island_level", &["5"]),
                RequirementDefinition::new("island_level", &["abc"]),
                RequirementDefinition::new("faction_power", &["-1"]),
                RequirementDefinition::new("faction_power", &["2.5"]),
            ],
        ));
        let report = builder.finish();

        let ids: Vec<u32> = built.requirements().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![0, 3]);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].id, 1);
        assert_eq!(report.rejected[1].kind, "faction_power");
        assert!(!report.rejected[0].warnings.is_empty());
        assert_eq!(report.requirements, 2);
    }

    #[test]
    fn unknown_kinds_and_missing_hooks_are_rejected() {
        let registry = registry();
        let builder = PathBuilder::new(&registry, factory());

        let (paths, report) = builder.build_all(&[path(
            "member",
            vec![
                RequirementDefinition::new("time_played", &["60"]),
                RequirementDefinition::new("money", &["100"]),
            ],
        )]);

        assert!(paths[0].requirements().is_empty());
        assert_eq!(report.unguarded_paths, vec!["member".to_string()]);
        assert_eq!(
            report.rejected[0].warnings,
            vec!["unknown requirement type 'time_played'".to_string()]
        );
        assert_eq!(report.rejected[1].warnings, vec!["Vault is not available".to_string()]);
        assert!(registry.dependencies().contains(&HookId::Vault));
    }

    #[test]
    fn ids_are_unique_across_paths() {
        let registry = registry();
        let (paths, report) = PathBuilder::new(&registry, factory()).build_all(&[
            path("member", vec![RequirementDefinition::new("island_level", &["1"])]),
            path(
                "veteran",
                vec![
                    RequirementDefinition::new("island_level", &["10"]),
                    RequirementDefinition::new("in_world", &["nether"]),
                ],
            ),
        ]);

        assert!(report.is_clean());
        assert_eq!(paths[0].requirement(0).map(|r| r.id()), Some(0));
        assert_eq!(paths[1].requirement(1).map(|r| r.kind()), Some(RequirementKind::IslandLevel));
        assert_eq!(paths[1].requirement(2).map(|r| r.kind()), Some(RequirementKind::InWorld));
    }

    #[test]
    fn flags_and_results_carry_over() {
        let registry = registry();
        let mut definition = RequirementDefinition::new("faction_power", &["10"]);
        definition.optional = true;
        definition.auto_complete = true;
        definition.world = Some("nether".into());
        definition.results = vec![ResultDefinition {
            kind: ResultKind::Message,
            options: vec!["Well done &p".into()],
        }];

        let mut builder = PathBuilder::new(&registry, factory());
        let built = builder.build(&path("member", vec![definition]));
        let requirement = &built.requirements()[0];

        assert!(requirement.is_optional());
        assert!(requirement.auto_completes());
        assert_eq!(requirement.world(), Some("nether"));
        assert_eq!(requirement.results().len(), 1);
        assert_eq!(built.required().count(), 0);
    }

    #[test]
    fn paths_left_with_only_optional_requirements_are_flagged() {
        let registry = registry();
        let mut optional = RequirementDefinition::new("island_level", &["5"]);
        optional.optional = true;

        let (paths, report) = PathBuilder::new(&registry, factory()).build_all(&[
            path(
                "member",
                vec![RequirementDefinition::new("money", &["100"]), optional.clone()],
            ),
            path(
                "veteran",
                vec![
                    RequirementDefinition::new("money", &["100"]),
                    RequirementDefinition::new("island_level", &["10"]),
                ],
            ),
            path("visitor", vec![optional]),
        ]);

        assert_eq!(paths[0].required().count(), 0);
        assert_eq!(report.unguarded_paths, vec!["member".to_string()]);
        assert!(!report.is_clean());
    }

    #[test]
    fn invalid_path_results_are_reported() {
        let registry = registry();
        let mut definition = path("member", Vec::new());
        definition.display_name = Some("Member".into());
        definition.results = vec![
            ResultDefinition {
                kind: ResultKind::RankChange,
                options: Vec::new(),
            },
            ResultDefinition {
                kind: ResultKind::RankChange,
                options: vec!["member".into()],
            },
        ];

        let mut builder = PathBuilder::new(&registry, factory());
        let built = builder.build(&definition);
        let report = builder.finish();

        assert_eq!(built.display_name(), "Member");
        assert_eq!(built.results().len(), 1);
        assert_eq!(report.result_warnings.len(), 1);
        assert!(!report.is_clean());
    }
}
