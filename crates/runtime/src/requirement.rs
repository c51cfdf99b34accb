//! Configured, evaluable requirements.
//!
//! A [`Requirement`] pairs the fields every condition shares (id, optional,
//! auto-complete, world scope, results) with a variant-specific
//! [`Checker`]. The shared evaluation path lives here and cannot be
//! overridden by a variant:
//!
//! ```text
//! meets_requirement(actor)
//!   → configured?            no  → false
//!   → resolve stable id      ??  → false
//!   → completion recorded?   yes → true   (sticky)
//!   → world scope admits?    no  → false  (no hook query)
//!   → fetch fact (timeout)   err → false  (logged)
//!   → checker.check(fact)
//! ```

use std::sync::Arc;

use progression_core::{
    Actor, ActorId, Checker, ConfigError, Fact, FactSource, HookAccess, Localization,
    RequirementKind, WorldScope,
};
use tracing::{debug, trace, warn};

use crate::context::EvaluationContext;
use crate::hooks::{DependencyRegistry, HookError, StatHook};
use crate::results::ResultAction;

/// Outcome of one evaluation: whether the requirement is met and its
/// progress line, both from the same fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Assessment {
    pub met: bool,
    pub progress: String,
}

/// Lifecycle of a requirement's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementState {
    /// Options have not been applied yet; the requirement cannot be evaluated.
    Unconfigured,
    /// Options were accepted; the requirement can be evaluated.
    Configured,
    /// Options were rejected; the requirement is excluded from its path.
    Rejected,
}

/// A single evaluable condition on an actor.
pub struct Requirement {
    id: u32,
    optional: bool,
    auto_complete: bool,
    scope: WorldScope,
    results: Vec<Box<dyn ResultAction>>,
    checker: Box<dyn Checker>,
    hook: Option<Arc<dyn StatHook>>,
    state: RequirementState,
    warnings: Vec<String>,
}

impl Requirement {
    /// Creates an unconfigured requirement. The id is fixed for the requirement's lifetime.
    pub fn new(id: u32, checker: Box<dyn Checker>) -> Self {
        Self {
            id,
            optional: false,
            auto_complete: false,
            scope: WorldScope::global(),
            results: Vec::new(),
            checker,
            hook: None,
            state: RequirementState::Unconfigured,
            warnings: Vec::new(),
        }
    }

    /// Creates an unconfigured requirement of `kind`.
    pub fn of_kind(id: u32, kind: RequirementKind) -> Self {
        Self::new(id, kind.checker())
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_auto_complete(mut self, auto_complete: bool) -> Self {
        self.auto_complete = auto_complete;
        self
    }

    pub fn with_world(mut self, world: Option<String>) -> Self {
        self.scope = WorldScope::new(world);
        self
    }

    pub fn with_results(mut self, results: Vec<Box<dyn ResultAction>>) -> Self {
        self.results = results;
        self
    }

    /// Applies configuration tokens.
    ///
    /// Returns false and records a warning when the options are rejected;
    /// malformed configuration never panics.
    pub fn set_options(&mut self, options: &[String], registry: &DependencyRegistry) -> bool {
        match self.configure(options, registry) {
            Ok(()) => true,
            Err(err) => {
                self.register_warning(err.to_string());
                false
            }
        }
    }

    /// Typed form of [`set_options`](Self::set_options).
    ///
    /// Parses the checker's options, records the hook dependency with the
    /// registry, then resolves the hook and requires it to be available. On
    /// failure no hook handle is retained.
    pub fn configure(
        &mut self,
        options: &[String],
        registry: &DependencyRegistry,
    ) -> Result<(), ConfigError> {
        self.hook = None;

        let outcome = self.try_configure(options, registry);
        self.state = match outcome {
            Ok(()) => RequirementState::Configured,
            Err(_) => RequirementState::Rejected,
        };
        outcome
    }

    fn try_configure(
        &mut self,
        options: &[String],
        registry: &DependencyRegistry,
    ) -> Result<(), ConfigError> {
        let source = self.checker.source();
        if let FactSource::Hook { hook, .. } = source {
            registry.add_dependency(hook);
        }

        self.checker.parse_options(options)?;

        if let FactSource::Hook { hook, access } = source {
            let handle = match access {
                HookAccess::Library => registry.library_hook(hook),
                HookAccess::Handler => registry.dependency_handler(hook),
            };
            let handle = handle
                .filter(|h| h.is_available())
                .ok_or(ConfigError::HookUnavailable { hook })?;
            self.hook = Some(handle);
        }

        Ok(())
    }

    /// Records a human-readable configuration warning for the operator.
    pub fn register_warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(
            target: "progression::requirement",
            requirement = self.id,
            kind = %self.checker.kind(),
            "Requirement configuration rejected: {}", message
        );
        self.warnings.push(message);
    }

    /// Returns true when `actor` satisfies the requirement.
    ///
    /// Completion recorded for this requirement wins over the live check.
    /// Hook failures and timeouts count as "not satisfied" and are logged.
    pub async fn meets_requirement(&self, actor: &Actor, ctx: &EvaluationContext) -> bool {
        if self.state != RequirementState::Configured {
            debug!(
                target: "progression::requirement",
                requirement = self.id,
                state = ?self.state,
                "Skipping evaluation of unconfigured requirement"
            );
            return false;
        }

        let Some(actor_id) = ctx.resolve(&actor.name) else {
            warn!(
                target: "progression::requirement",
                requirement = self.id,
                actor = %actor.name,
                "Cannot evaluate requirement for unknown actor"
            );
            return false;
        };

        if self.is_completed(self.id, actor_id, ctx) {
            return true;
        }

        self.evaluate(actor, actor_id, ctx).await
    }

    /// World scope check, fact fetch and comparison, without the completion short-circuit.
    pub(crate) async fn evaluate(
        &self,
        actor: &Actor,
        actor_id: ActorId,
        ctx: &EvaluationContext,
    ) -> bool {
        self.assess(actor, actor_id, ctx).await.met
    }

    /// Evaluates and renders progress from a single fact read.
    ///
    /// An actor outside the requirement's world is never queried; its
    /// progress renders `?` as current.
    pub(crate) async fn assess(
        &self,
        actor: &Actor,
        actor_id: ActorId,
        ctx: &EvaluationContext,
    ) -> Assessment {
        if !self.scope.admits(&actor.world) {
            trace!(
                target: "progression::requirement",
                requirement = self.id,
                actor = %actor_id,
                world = %actor.world,
                "Actor outside requirement world"
            );
            return Assessment {
                met: false,
                progress: self.checker.format_progress(None),
            };
        }

        match self.fetch_fact(actor, actor_id, ctx).await {
            Ok(fact) => Assessment {
                met: self.checker.check(&fact),
                progress: self.checker.format_progress(Some(&fact)),
            },
            Err(err) => {
                warn!(
                    target: "progression::requirement",
                    requirement = self.id,
                    actor = %actor_id,
                    error = %err,
                    "Requirement not satisfiable right now"
                );
                Assessment {
                    met: false,
                    progress: self.checker.format_progress(None),
                }
            }
        }
    }

    async fn fetch_fact(
        &self,
        actor: &Actor,
        actor_id: ActorId,
        ctx: &EvaluationContext,
    ) -> Result<Fact, HookError> {
        match self.checker.source() {
            FactSource::ActorWorld => Ok(Fact::Text(actor.world.clone())),
            FactSource::Hook { hook, .. } => {
                let handle = self.hook.as_ref().ok_or(HookError::Unavailable { hook })?;
                let value = tokio::time::timeout(ctx.query_timeout, handle.query(actor_id))
                    .await
                    .map_err(|_| HookError::Timeout {
                        hook,
                        timeout_ms: ctx.query_timeout.as_millis() as u64,
                    })??;
                Ok(Fact::Number(value))
            }
        }
    }

    /// Renders `"<current>/<target>"`. Unknown actors, actors outside the
    /// requirement's world and failed queries render `?` as current.
    pub async fn progress(&self, actor: &Actor, ctx: &EvaluationContext) -> String {
        match ctx.resolve(&actor.name) {
            Some(actor_id) if self.is_configured() => {
                self.assess(actor, actor_id, ctx).await.progress
            }
            _ => self.checker.format_progress(None),
        }
    }

    /// Localized description, annotated with the world scope if any.
    pub fn description(&self, lang: &dyn Localization) -> String {
        self.scope.annotate(self.checker.describe(lang))
    }

    /// Whether completion of `requirement_id` is recorded for `actor_id`.
    ///
    /// Store failures read as "not completed".
    pub fn is_completed(
        &self,
        requirement_id: u32,
        actor_id: ActorId,
        ctx: &EvaluationContext,
    ) -> bool {
        match ctx.completions.has_completed(requirement_id, actor_id) {
            Ok(completed) => completed,
            Err(err) => {
                warn!(
                    target: "progression::requirement",
                    requirement = requirement_id,
                    actor = %actor_id,
                    error = %err,
                    "Completion lookup failed"
                );
                false
            }
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> RequirementKind {
        self.checker.kind()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn auto_completes(&self) -> bool {
        self.auto_complete
    }

    pub fn world(&self) -> Option<&str> {
        self.scope.world()
    }

    pub fn is_world_specific(&self) -> bool {
        self.scope.is_world_specific()
    }

    pub fn results(&self) -> &[Box<dyn ResultAction>] {
        &self.results
    }

    pub fn state(&self) -> RequirementState {
        self.state
    }

    pub fn is_configured(&self) -> bool {
        self.state == RequirementState::Configured
    }

    /// Warnings recorded while configuring.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

impl std::fmt::Debug for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Requirement")
            .field("id", &self.id)
            .field("kind", &self.checker.kind())
            .field("optional", &self.optional)
            .field("auto_complete", &self.auto_complete)
            .field("world", &self.scope.world())
            .field("results", &self.results.len())
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use progression_core::{HookId, LangTable};

    use super::*;
    use crate::hooks::MemoryStatHook;
    use crate::oracle::IdentityOracleImpl;

    struct Fixture {
        registry: DependencyRegistry,
        island: Arc<MemoryStatHook>,
        factions: Arc<MemoryStatHook>,
        identities: Arc<IdentityOracleImpl>,
        ctx: EvaluationContext,
        steve: ActorId,
    }

    fn fixture() -> Fixture {
        let island = Arc::new(MemoryStatHook::new(HookId::USkyBlock));
        let factions = Arc::new(MemoryStatHook::new(HookId::Factions));

        let mut registry = DependencyRegistry::new();
        registry.register_hook(island.clone());
        registry.register_hook(factions.clone());

        let identities = Arc::new(IdentityOracleImpl::new());
        let steve = ActorId::new_random();
        identities.register("Steve", steve);

        let ctx = EvaluationContext::in_memory(identities.clone());
        Fixture {
            registry,
            island,
            factions,
            identities,
            ctx,
            steve,
        }
    }

    fn options(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn configured(fx: &Fixture, kind: RequirementKind, value: &str, world: Option<&str>) -> Requirement {
        let mut req = Requirement::of_kind(0, kind).with_world(world.map(str::to_string));
        assert!(req.set_options(&options(&[value]), &fx.registry));
        req
    }

    #[tokio::test]
    async fn threshold_boundary_is_inclusive() {
        let fx = fixture();
        let req = configured(&fx, RequirementKind::IslandLevel, "5", None);
        let steve = Actor::new("Steve", "world");

        for (fact, expected) in [(4.0, false), (5.0, true), (6.0, true)] {
            fx.island.set(fx.steve, fact);
            assert_eq!(req.meets_requirement(&steve, &fx.ctx).await, expected);
        }
    }

    #[tokio::test]
    async fn world_mismatch_short_circuits_before_the_hook() {
        let fx = fixture();
        let req = configured(&fx, RequirementKind::FactionPower, "10", Some("nether"));
        fx.factions.set(fx.steve, 1000.0);

        let outside = Actor::new("Steve", "world");
        assert!(!req.meets_requirement(&outside, &fx.ctx).await);
        assert_eq!(req.progress(&outside, &fx.ctx).await, "?/10.0");
        assert_eq!(fx.factions.query_count(), 0);

        let inside = Actor::new("Steve", "nether");
        assert!(req.meets_requirement(&inside, &fx.ctx).await);
        assert_eq!(fx.factions.query_count(), 1);
    }

    #[tokio::test]
    async fn completion_is_sticky() {
        let fx = fixture();
        let req = configured(&fx, RequirementKind::IslandLevel, "5", None);
        let steve = Actor::new("Steve", "world");

        fx.island.set(fx.steve, 2.0);
        assert!(!req.meets_requirement(&steve, &fx.ctx).await);

        fx.ctx.completions.mark_completed(req.id(), fx.steve).unwrap();
        assert!(req.meets_requirement(&steve, &fx.ctx).await);
        assert!(req.is_completed(req.id(), fx.steve, &fx.ctx));
        assert_eq!(fx.island.query_count(), 1);
    }

    #[tokio::test]
    async fn invalid_options_are_rejected_with_a_warning() {
        let fx = fixture();
        let steve = Actor::new("Steve", "world");

        for value in ["abc", "-1"] {
            let mut req = Requirement::of_kind(0, RequirementKind::IslandLevel);
            assert!(!req.set_options(&options(&[value]), &fx.registry));
            assert_eq!(req.state(), RequirementState::Rejected);
            assert_eq!(req.warnings().len(), 1);
            assert!(!req.meets_requirement(&steve, &fx.ctx).await);
        }
        assert_eq!(fx.island.query_count(), 0);
    }

    #[tokio::test]
    async fn missing_or_unavailable_hook_rejects_configuration() {
        let fx = fixture();

        let mut money = Requirement::of_kind(0, RequirementKind::Money);
        assert_eq!(
            money.configure(&options(&["100"]), &fx.registry),
            Err(ConfigError::HookUnavailable { hook: HookId::Vault })
        );

        fx.island.set_available(false);
        let mut island = Requirement::of_kind(1, RequirementKind::IslandLevel);
        assert!(!island.set_options(&options(&["5"]), &fx.registry));
        assert_eq!(island.warnings(), ["uSkyBlock is not available"]);

        assert!(fx.registry.dependencies().contains(&HookId::Vault));
        assert!(fx.registry.dependencies().contains(&HookId::USkyBlock));
    }

    #[tokio::test]
    async fn unconfigured_requirement_is_never_satisfied() {
        let fx = fixture();
        fx.island.set(fx.steve, 100.0);
        let req = Requirement::of_kind(0, RequirementKind::IslandLevel);

        assert!(!req.meets_requirement(&Actor::new("Steve", "world"), &fx.ctx).await);
        assert_eq!(req.state(), RequirementState::Unconfigured);
    }

    #[tokio::test]
    async fn unknown_actor_is_not_satisfied() {
        let fx = fixture();
        let req = configured(&fx, RequirementKind::IslandLevel, "0", None);

        assert!(!req.meets_requirement(&Actor::new("Alex", "world"), &fx.ctx).await);
        assert_eq!(fx.island.query_count(), 0);
    }

    #[tokio::test]
    async fn hook_errors_are_not_satisfied() {
        let fx = fixture();
        let req = configured(&fx, RequirementKind::IslandLevel, "0", None);
        let steve = Actor::new("Steve", "world");

        // No fact recorded for Steve.
        assert!(!req.meets_requirement(&steve, &fx.ctx).await);
        assert!(!fx.ctx.completions.has_completed(0, fx.steve).unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_hook_times_out() {
        let slow = Arc::new(
            MemoryStatHook::new(HookId::Factions).with_delay(Duration::from_secs(30)),
        );
        let mut registry = DependencyRegistry::new();
        registry.register_hook(slow.clone());

        let identities = Arc::new(IdentityOracleImpl::new());
        let steve = ActorId::new_random();
        identities.register("Steve", steve);
        slow.set(steve, 50.0);

        let ctx = EvaluationContext::in_memory(identities)
            .with_query_timeout(Duration::from_millis(100));
        let mut req = Requirement::of_kind(0, RequirementKind::FactionPower);
        assert!(req.set_options(&options(&["10"]), &registry));

        assert!(!req.meets_requirement(&Actor::new("Steve", "world"), &ctx).await);
        assert_eq!(req.progress(&Actor::new("Steve", "world"), &ctx).await, "?/10.0");
    }

    #[tokio::test]
    async fn progress_follows_unit_policy() {
        let fx = fixture();
        let steve = Actor::new("Steve", "world");

        let island = configured(&fx, RequirementKind::IslandLevel, "5", None);
        fx.island.set(fx.steve, 5.0);
        assert_eq!(island.progress(&steve, &fx.ctx).await, "5/5");

        let power = configured(&fx, RequirementKind::FactionPower, "10.0", None);
        fx.factions.set(fx.steve, 7.333333);
        assert_eq!(power.progress(&steve, &fx.ctx).await, "7.33/10.0");

        assert_eq!(power.progress(&Actor::new("Alex", "world"), &fx.ctx).await, "?/10.0");
    }

    #[tokio::test]
    async fn description_is_annotated_with_world() {
        let fx = fixture();
        let lang = LangTable::new();

        let scoped = configured(&fx, RequirementKind::FactionPower, "10", Some("nether"));
        assert_eq!(
            scoped.description(&lang),
            "Have at least 10.0 faction power (in world 'nether')"
        );

        let global = configured(&fx, RequirementKind::IslandLevel, "3", None);
        assert_eq!(global.description(&lang), "Have an island level of at least 3");
    }

    #[tokio::test]
    async fn in_world_requirement_reads_the_live_world() {
        let fx = fixture();
        let req = configured(&fx, RequirementKind::InWorld, "nether", None);

        assert!(req.meets_requirement(&Actor::new("Steve", "nether"), &fx.ctx).await);
        assert!(!req.meets_requirement(&Actor::new("Steve", "world"), &fx.ctx).await);
        assert!(fx.registry.dependencies().is_empty());
    }

    #[tokio::test]
    async fn concurrent_checks_for_different_actors() {
        let fx = fixture();
        let req = Arc::new(configured(&fx, RequirementKind::IslandLevel, "10", None));

        let mut tasks = Vec::new();
        for i in 0..16u32 {
            let name = format!("player{}", i);
            let id = ActorId::new_random();
            fx.identities.register(&name, id);
            fx.island.set(id, f64::from(i));

            let req = Arc::clone(&req);
            let ctx = fx.ctx.clone();
            tasks.push(tokio::spawn(async move {
                let actor = Actor::new(name, "world");
                (i, req.meets_requirement(&actor, &ctx).await)
            }));
        }

        for task in tasks {
            let (i, met) = task.await.unwrap();
            assert_eq!(met, i >= 10);
        }
    }
}
