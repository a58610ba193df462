//! End-to-end governance scenarios against the in-memory gateway and
//! store: languages are created, amendments voted through the full
//! window, and the registry survives a restart.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use glossa_core::{
    ChatGateway, Engine, EngineConfig, InboundMessage, MemoryGateway, NO_REACTION, PassSummary,
    YES_REACTION,
};
use glossa_lang::Registry;
use glossa_store::{MemoryStore, SnapshotStore, codec};
use glossa_types::{ChannelId, MessageRef, UserId};

const CHANNEL: ChannelId = ChannelId::new(7);
const ALICE: UserId = UserId::new(11);
const BOB: UserId = UserId::new(12);

const WINDOW_MS: i64 = 172_800_000;

fn fixture() -> (Engine, Arc<MemoryGateway>, Arc<MemoryStore>) {
    let gateway = Arc::new(MemoryGateway::new());
    let store = Arc::new(MemoryStore::new());
    let (engine, _handle) = Engine::new(
        EngineConfig::default(),
        Arc::clone(&gateway) as Arc<dyn ChatGateway>,
        Arc::clone(&store) as Arc<dyn SnapshotStore>,
        None,
    )
    .unwrap();
    (engine, gateway, store)
}

fn message(author: UserId, text: &str) -> InboundMessage {
    InboundMessage {
        channel: CHANNEL,
        author,
        text: text.to_owned(),
    }
}

fn open_ballot(engine: &Engine) -> MessageRef {
    engine
        .registry()
        .get(CHANNEL)
        .unwrap()
        .amendments
        .first()
        .unwrap()
        .ballot
}

fn persisted_registry(store: &MemoryStore) -> Registry {
    codec::decode(&store.load().unwrap().unwrap()).unwrap()
}

#[tokio::test]
async fn approved_word_amendment_lands_in_the_dictionary() {
    let (mut engine, gateway, store) = fixture();

    engine
        .process(message(ALICE, "\\createlanguage \"Auri\""))
        .await
        .unwrap();
    engine
        .process(message(ALICE, "\\addword \"sol\" \"soh-l\" \"the sun\""))
        .await
        .unwrap();

    let ballot = open_ballot(&engine);
    gateway.add_votes(ballot, YES_REACTION, 2);

    // Mid-window pass: aged, re-rendered, not resolved.
    let summary = engine.reconcile(WINDOW_MS / 2).await.unwrap();
    assert_eq!(summary, PassSummary { ticked: 1, applied: 0, rejected: 0 });
    assert!(
        gateway
            .message_text(ballot)
            .unwrap()
            .starts_with("Time Remaining: 86400\n")
    );

    // The rest of the window elapses; the vote carries.
    let summary = engine.reconcile(WINDOW_MS / 2).await.unwrap();
    assert_eq!(summary, PassSummary { ticked: 1, applied: 1, rejected: 0 });

    let language = engine.registry().get(CHANNEL).unwrap();
    let word = language.get_word("sol").unwrap();
    assert_eq!(word.pronunciation, "soh-l");
    assert_eq!(word.definition, "the sun");
    assert!(language.amendments.is_empty());
    assert_eq!(gateway.deleted_messages(), vec![ballot]);

    // The resolved state is what a restart would reload.
    let restored = persisted_registry(&store);
    assert!(restored.get(CHANNEL).unwrap().get_word("sol").is_some());
}

#[tokio::test]
async fn outvoted_amendment_is_discarded() {
    let (mut engine, gateway, _store) = fixture();

    engine
        .process(message(ALICE, "\\createlanguage \"Auri\""))
        .await
        .unwrap();
    engine
        .process(message(BOB, "\\renamelanguage \"Auri\""))
        .await
        .unwrap();
    // Unknown command: no amendment was opened.
    assert!(engine.registry().get(CHANNEL).unwrap().amendments.is_empty());

    engine
        .process(message(BOB, "\\changename \"Borrelia\""))
        .await
        .unwrap();
    let ballot = open_ballot(&engine);
    gateway.add_votes(ballot, YES_REACTION, 2);
    gateway.add_votes(ballot, NO_REACTION, 2);

    let summary = engine.reconcile(WINDOW_MS).await.unwrap();
    assert_eq!(summary.rejected, 1);
    assert_eq!(engine.registry().get(CHANNEL).unwrap().name, "Auri");
    assert_eq!(gateway.deleted_messages(), vec![ballot]);
}

#[tokio::test]
async fn approved_rule_refreshes_the_summary_message() {
    let (mut engine, gateway, _store) = fixture();

    engine
        .process(message(ALICE, "\\createlanguage \"Auri\""))
        .await
        .unwrap();
    let summary_ref = engine.registry().get(CHANNEL).unwrap().summary.unwrap();
    assert_eq!(
        gateway.message_text(summary_ref).unwrap(),
        "Language: Auri\nRules:\n"
    );

    engine
        .process(message(BOB, "\\addrule \"nouns carry no plural\""))
        .await
        .unwrap();
    gateway.add_votes(open_ballot(&engine), YES_REACTION, 1);
    engine.reconcile(WINDOW_MS).await.unwrap();

    assert_eq!(
        gateway.message_text(summary_ref).unwrap(),
        "Language: Auri\nRules:\n1: nouns carry no plural\n"
    );
}

#[tokio::test]
async fn sequential_amendments_resolve_independently() {
    let (mut engine, gateway, _store) = fixture();

    engine
        .process(message(ALICE, "\\createlanguage \"Auri\""))
        .await
        .unwrap();
    engine
        .process(message(ALICE, "\\addrule \"first\""))
        .await
        .unwrap();
    engine
        .process(message(BOB, "\\addrule \"second\""))
        .await
        .unwrap();

    let language = engine.registry().get(CHANNEL).unwrap();
    assert_eq!(language.amendments.len(), 2);
    let first = language.amendments.first().unwrap().ballot;
    let second = language.amendments.get(1).unwrap().ballot;

    // Only the first proposal gathers support.
    gateway.add_votes(first, YES_REACTION, 1);
    gateway.add_votes(second, NO_REACTION, 1);

    let summary = engine.reconcile(WINDOW_MS).await.unwrap();
    assert_eq!(summary, PassSummary { ticked: 2, applied: 1, rejected: 1 });
    assert_eq!(engine.registry().get(CHANNEL).unwrap().rules, vec!["first"]);
    assert_eq!(gateway.deleted_messages(), vec![first, second]);
}

#[tokio::test]
async fn languages_in_different_channels_do_not_interfere() {
    let (mut engine, gateway, _store) = fixture();
    let other = ChannelId::new(8);

    engine
        .process(message(ALICE, "\\createlanguage \"Auri\""))
        .await
        .unwrap();
    engine
        .process(InboundMessage {
            channel: other,
            author: BOB,
            text: "\\createlanguage \"Borrelia\"".to_owned(),
        })
        .await
        .unwrap();
    engine
        .process(message(ALICE, "\\addrule \"only here\""))
        .await
        .unwrap();
    gateway.add_votes(open_ballot(&engine), YES_REACTION, 1);

    engine.reconcile(WINDOW_MS).await.unwrap();

    assert_eq!(engine.registry().get(CHANNEL).unwrap().rules, vec!["only here"]);
    assert!(engine.registry().get(other).unwrap().rules.is_empty());
}

#[tokio::test]
async fn restart_resumes_open_amendments_where_they_left_off() {
    let gateway = Arc::new(MemoryGateway::new());
    let store = Arc::new(MemoryStore::new());

    let ballot = {
        let (mut engine, _handle) = Engine::new(
            EngineConfig::default(),
            Arc::clone(&gateway) as Arc<dyn ChatGateway>,
            Arc::clone(&store) as Arc<dyn SnapshotStore>,
            None,
        )
        .unwrap();
        engine
            .process(message(ALICE, "\\createlanguage \"Auri\""))
            .await
            .unwrap();
        engine
            .process(message(ALICE, "\\addrule \"survives restarts\""))
            .await
            .unwrap();
        let ballot = open_ballot(&engine);
        // Age the window in memory before the "crash". Aging alone is
        // never snapshotted, so the restart rewinds to the clock the
        // amendment was proposed with.
        engine.reconcile(WINDOW_MS / 2).await.unwrap();
        ballot
    };

    let (mut engine, _handle) = Engine::new(
        EngineConfig::default(),
        Arc::clone(&gateway) as Arc<dyn ChatGateway>,
        store as Arc<dyn SnapshotStore>,
        None,
    )
    .unwrap();

    // The persisted amendment still has time on the clock.
    let amendment = engine
        .registry()
        .get(CHANNEL)
        .unwrap()
        .amendments
        .first()
        .unwrap();
    assert_eq!(amendment.ballot, ballot);
    assert!(!amendment.expired());

    gateway.add_votes(ballot, YES_REACTION, 1);
    let summary = engine.reconcile(WINDOW_MS).await.unwrap();
    assert_eq!(summary.applied, 1);
    assert_eq!(
        engine.registry().get(CHANNEL).unwrap().rules,
        vec!["survives restarts"]
    );
}
