//! Property tests for the pure guardrail functions.

use proptest::prelude::*;
use serde_json::{Map, Value};

use rentwise::application::handlers::ToolDispatcher;
use rentwise::domain::email::persona_for;
use rentwise::domain::foundation::ActorId;
use rentwise::domain::learning::classify;
use rentwise::domain::memory::Embedding;
use rentwise::domain::tools::ToolName;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn uncatalogued_names_always_fail_as_unknown(name in "[a-z_]{1,30}") {
        prop_assume!(name.parse::<ToolName>().is_err());

        let dispatcher = ToolDispatcher::new();
        let result = runtime().block_on(dispatcher.execute(
            &name,
            Map::new(),
            ActorId::new("owner-1").unwrap(),
        ));

        prop_assert!(!result.is_success());
        prop_assert_eq!(result.message().unwrap(), format!("Unknown tool: {}", name));
    }

    #[test]
    fn classification_is_deterministic(
        tool in "[a-z_]{1,20}",
        message in ".{0,200}",
        key in "[a-z]{1,10}",
        value in ".{0,300}",
    ) {
        let mut input = Map::new();
        input.insert(key, Value::String(value));

        let first = classify(&tool, &input, &message);
        let second = classify(&tool, &input, &message);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn persona_is_stable_per_actor(id in "[a-zA-Z0-9-]{1,40}") {
        let actor = ActorId::new(id).unwrap();
        let a = persona_for(&actor, "team.example.com");
        let b = persona_for(&actor, "team.example.com");
        prop_assert_eq!(&a, &b);
        prop_assert!(a.address.ends_with("@team.example.com"));
    }

    #[test]
    fn similarity_is_symmetric(
        pair in (1usize..32).prop_flat_map(|n| (
            prop::collection::vec(-10.0f32..10.0, n),
            prop::collection::vec(-10.0f32..10.0, n),
        ))
    ) {
        let (a, b) = pair;
        let a = Embedding::normalized(a);
        let b = Embedding::normalized(b);
        prop_assert!((a.similarity(&b) - b.similarity(&a)).abs() < 1e-5);
    }

    #[test]
    fn normalized_embeddings_have_unit_or_zero_norm(
        values in prop::collection::vec(-100.0f32..100.0, 1..64)
    ) {
        let e = Embedding::normalized(values);
        prop_assert!(e.is_zero() || (e.norm() - 1.0).abs() < 1e-3);
    }
}
