use std::sync::Arc;
use std::time::Duration;

use progression_content::PathLoader;
use progression_core::{Actor, ActorId, EngineConfig, HookId};
use progression_runtime::{
    CompletionOutcome, DependencyRegistry, Event, HostCall, IdentityOracleImpl,
    InMemoryCompletionStore, MemoryStatHook, PathEvent, RecordingHost, Runtime, RuntimeError,
    Topic,
};

const PATHS: &str = r#"
(
    paths: [
        (
            name: "member",
            display_name: Some("Member"),
            requirements: [
                (kind: "island_level", options: ["5"], auto_complete: true),
                (kind: "faction_power", options: ["10"], world: Some("nether"), auto_complete: true),
                (kind: "in_world", options: ["nether"], optional: true),
                (kind: "island_level", options: ["abc"]),
            ],
            results: [
                (kind: rank_change, options: ["guest", "member"]),
                (kind: command, options: ["broadcast &p is now a member"]),
            ],
        ),
        (
            name: "veteran",
            requirements: [
                (
                    kind: "faction_power",
                    options: ["50.5"],
                    results: [(kind: message, options: ["Power reached, {player}"])],
                ),
            ],
        ),
    ],
)
"#;

struct World {
    runtime: Runtime,
    island: Arc<MemoryStatHook>,
    factions: Arc<MemoryStatHook>,
    host: Arc<RecordingHost>,
    steve: ActorId,
}

async fn world(config: EngineConfig) -> World {
    let island = Arc::new(MemoryStatHook::new(HookId::USkyBlock));
    let factions = Arc::new(MemoryStatHook::new(HookId::Factions));
    let mut registry = DependencyRegistry::new();
    registry.register_hook(island.clone());
    registry.register_hook(factions.clone());

    let identities = Arc::new(IdentityOracleImpl::new());
    let steve = ActorId::new_random();
    identities.register("Steve", steve);

    let host = Arc::new(RecordingHost::new());
    let runtime = Runtime::builder()
        .config(config)
        .registry(registry)
        .paths(PathLoader::parse(PATHS).unwrap())
        .identities(identities)
        .completions(Arc::new(InMemoryCompletionStore::new()))
        .host(host.clone())
        .build()
        .await
        .unwrap();

    World {
        runtime,
        island,
        factions,
        host,
        steve,
    }
}

#[tokio::test]
async fn path_completes_once_every_required_requirement_is_done() {
    let w = world(EngineConfig::default()).await;
    let handle = w.runtime.handle();
    let mut path_events = handle.subscribe(Topic::Path);

    let report = w.runtime.build_report();
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].id, 3);
    assert_eq!(
        w.runtime.registry().dependencies(),
        vec![HookId::USkyBlock, HookId::Factions]
    );

    w.island.set(w.steve, 6.0);
    w.factions.set(w.steve, 12.0);

    // In the overworld the scoped faction requirement cannot be met.
    let overworld = Actor::new("Steve", "world");
    let result = handle.check("member", overworld.clone()).await.unwrap();
    assert_eq!(result.newly_completed, vec![0]);
    assert!(!result.path_completed);
    assert_eq!(
        result.requirements[1].description,
        "Have at least 10.0 faction power (in world 'nether')"
    );
    assert_eq!(result.requirements[1].progress, "?/10.0");
    assert_eq!(w.factions.query_count(), 0);

    let nether = Actor::new("Steve", "nether");
    let result = handle.check("member", nether.clone()).await.unwrap();
    assert_eq!(result.newly_completed, vec![1]);
    assert!(result.path_completed);
    assert_eq!(result.requirements[2].progress, "nether/nether");
    assert_eq!(w.factions.query_count(), 1);

    assert_eq!(
        w.host.calls(),
        vec![
            HostCall::GroupChange {
                actor: w.steve,
                from: Some("guest".into()),
                to: "member".into(),
            },
            HostCall::Command("broadcast Steve is now a member".into()),
        ]
    );
    assert_eq!(
        path_events.recv().await.unwrap(),
        Event::Path(PathEvent::Completed {
            path: "member".into(),
            actor: w.steve,
        })
    );
    assert!(handle.has_completed_path("member", overworld).await.unwrap());

    w.runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn manual_completion_through_the_handle() {
    let w = world(EngineConfig::default()).await;
    let handle = w.runtime.handle();
    let steve = Actor::new("Steve", "world");

    w.factions.set(w.steve, 50.49);
    let progress = handle.progress("veteran", steve.clone()).await.unwrap();
    assert_eq!(progress[0].progress, "50.49/50.5");
    assert_eq!(
        handle.complete_requirement("veteran", 4, steve.clone()).await.unwrap(),
        CompletionOutcome::NotMet
    );

    w.factions.set(w.steve, 50.5);
    assert_eq!(
        handle.complete_requirement("veteran", 4, steve.clone()).await.unwrap(),
        CompletionOutcome::Completed
    );
    assert!(handle.has_completed_path("veteran", steve.clone()).await.unwrap());
    assert!(w.host.calls().contains(&HostCall::Message {
        actor: "Steve".into(),
        text: "Power reached, Steve".into(),
    }));

    assert!(matches!(
        handle.check("veteran", Actor::new("Herobrine", "world")).await,
        Err(RuntimeError::UnknownActor(_))
    ));

    w.runtime.shutdown().await.unwrap();
    assert!(matches!(
        handle.check("veteran", steve).await,
        Err(RuntimeError::CommandChannelClosed)
    ));
}

#[tokio::test(start_paused = true)]
async fn slow_hooks_do_not_satisfy_requirements() {
    let slow = Arc::new(MemoryStatHook::new(HookId::USkyBlock).with_delay(Duration::from_secs(5)));
    let mut registry = DependencyRegistry::new();
    registry.register_hook(slow.clone());

    let identities = Arc::new(IdentityOracleImpl::new());
    let steve = ActorId::new_random();
    identities.register("Steve", steve);
    slow.set(steve, 100.0);

    let paths = PathLoader::parse(
        r#"(paths: [(name: "member", requirements: [(kind: "island_level", options: ["5"], auto_complete: true)])])"#,
    )
    .unwrap();
    let runtime = Runtime::builder()
        .config(EngineConfig::default().with_query_timeout_ms(50))
        .registry(registry)
        .paths(paths)
        .identities(identities)
        .host(Arc::new(RecordingHost::new()))
        .build()
        .await
        .unwrap();

    let result = runtime
        .handle()
        .check("member", Actor::new("Steve", "world"))
        .await
        .unwrap();
    assert!(!result.requirements[0].met);
    assert_eq!(result.requirements[0].progress, "?/5");
    assert!(!result.path_completed);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn missing_components_fail_the_build() {
    let result = Runtime::builder()
        .host(Arc::new(RecordingHost::new()))
        .build()
        .await;
    assert!(matches!(result, Err(RuntimeError::MissingComponent(_))));
}
