//! End-to-end role engine tests
//!
//! Each test runs the engine against a fresh in-memory SQLite mirror.
//!
//! Run with: cargo test -p integration-tests --test engine_tests

use std::time::Duration;

use integration_tests::payloads::{member_add, member_update, reaction_add, role_delete};
use integration_tests::{
    role_set, service_context, sf, test_settings, wait_until, FakeGuild, RoleChange, TestEngine,
    BLUE_ROLE, GUILD, MEMBER_ROLE, RED_ROLE, ROLES_CHANNEL, TEST_SHARDS,
};
use rolekeeper_common::DispatchConfig;
use rolekeeper_core::{GuildEvent, MemberRolesUpdatedEvent, RoleSet};
use rolekeeper_gateway::dispatch::shard_for;
use rolekeeper_gateway::RoleEngine;

// ============================================================================
// Startup
// ============================================================================

#[tokio::test]
async fn test_startup_replaces_control_channel_and_seeds_mirror() {
    let guild = FakeGuild::new()
        .with_channel_backlog(&[11, 12])
        .with_member(7, &[601, 700])
        .with_member(8, &[]);

    let harness = TestEngine::start(guild).await.unwrap();
    let control = harness.control_message();
    let settled = harness.drain().await;

    assert!(settled.guild.was_deleted(sf(11)));
    assert!(settled.guild.was_deleted(sf(12)));

    let menus = settled.guild.posted_titled("Reaction Roles");
    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0].0.message_id, control);
    assert_eq!(menus[0].1.description, "🔴 - Red\n🔵 - Blue");

    let seeded: Vec<String> = settled
        .guild
        .bot_reactions
        .lock()
        .iter()
        .map(|(_, emoji)| emoji.clone())
        .collect();
    assert_eq!(seeded, vec!["🔴".to_string(), "🔵".to_string()]);

    assert_eq!(settled.mirrored(sf(7)).await.unwrap(), role_set(&[601, 700]));
    assert!(settled.mirrored(sf(8)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_startup_survives_failed_sync() {
    let guild = FakeGuild::new().with_member(7, &[601]);
    *guild.fail_listing.lock() = true;

    let harness = TestEngine::start(guild).await.unwrap();
    let settled = harness.drain().await;

    assert!(settled.mirrored(sf(7)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_startup_without_reaction_roles_fails() {
    let mut settings = test_settings();
    settings.reaction_roles.clear();

    let err = TestEngine::start_with(FakeGuild::new(), settings)
        .await
        .err()
        .unwrap();
    assert!(err.to_string().contains("no reaction roles configured"));
}

// ============================================================================
// Joins
// ============================================================================

#[tokio::test]
async fn test_new_member_gets_default_role() {
    let harness = TestEngine::start(FakeGuild::new()).await.unwrap();

    harness.guild.join(sf(7));
    harness.send("GUILD_MEMBER_ADD", member_add(7)).await.unwrap();

    let settled = harness.drain().await;
    assert_eq!(settled.guild.grants(), vec![(sf(7), MEMBER_ROLE)]);
    assert!(settled.has_joined(sf(7)).await.unwrap());
}

#[tokio::test]
async fn test_returning_member_gets_mirrored_roles_back() {
    let harness = TestEngine::start(FakeGuild::new()).await.unwrap();
    let user = sf(7);

    harness.guild.join(user);
    harness.send("GUILD_MEMBER_ADD", member_add(7)).await.unwrap();
    harness
        .send("GUILD_MEMBER_UPDATE", member_update(7, &[500, 601, 700]))
        .await
        .unwrap();

    // Leaving sends no role update; the mirror keeps the last set
    let settled = harness.drain().await;
    settled.guild.leave(user);
    settled.guild.role_changes.lock().clear();

    let ctx = service_context(&settled.guild, &settled.mirror, test_settings());
    let engine = RoleEngine::start(ctx, &DispatchConfig::default())
        .await
        .unwrap();

    settled.guild.join(user);
    engine
        .ingest("GUILD_MEMBER_ADD", member_add(7))
        .await
        .unwrap();
    engine.shutdown().await;

    let mut restored: Vec<_> = settled.guild.grants();
    restored.sort();
    assert_eq!(
        restored,
        vec![(user, MEMBER_ROLE), (user, RED_ROLE), (user, sf(700))]
    );
    assert_eq!(settled.guild.roles_of(user), role_set(&[500, 601, 700]));
}

#[tokio::test]
async fn test_returning_member_with_no_roles_gets_nothing() {
    let harness = TestEngine::start(FakeGuild::new()).await.unwrap();

    harness.guild.join(sf(7));
    harness.send("GUILD_MEMBER_ADD", member_add(7)).await.unwrap();
    harness
        .send("GUILD_MEMBER_UPDATE", member_update(7, &[]))
        .await
        .unwrap();
    harness.send("GUILD_MEMBER_ADD", member_add(7)).await.unwrap();

    let settled = harness.drain().await;
    // Only the first join grants anything
    assert_eq!(settled.guild.grants(), vec![(sf(7), MEMBER_ROLE)]);
}

// ============================================================================
// Mirror upkeep
// ============================================================================

#[tokio::test]
async fn test_role_updates_apply_in_order_per_member() {
    let harness = TestEngine::start(FakeGuild::new()).await.unwrap();

    for round in 0..20i64 {
        for user in 1..=5i64 {
            harness
                .send("GUILD_MEMBER_UPDATE", member_update(100 + user, &[round + 1, 1000 + user]))
                .await
                .unwrap();
        }
    }

    let settled = harness.drain().await;
    for user in 1..=5i64 {
        assert_eq!(
            settled.mirrored(sf(100 + user)).await.unwrap(),
            role_set(&[20, 1000 + user])
        );
    }
}

#[tokio::test]
async fn test_failed_event_does_not_block_its_shard() {
    let harness = TestEngine::start(FakeGuild::new()).await.unwrap();
    harness.mirror.fail_writes_for(sf(7));

    // Another member routed to the same worker as member 7
    let shard_of = |user: i64| {
        let event: GuildEvent =
            MemberRolesUpdatedEvent::new(GUILD, sf(user), RoleSet::new()).into();
        shard_for(&event, TEST_SHARDS)
    };
    let neighbour = (8..1000i64)
        .find(|user| shard_of(*user) == shard_of(7))
        .unwrap();

    harness
        .send("GUILD_MEMBER_UPDATE", member_update(7, &[601]))
        .await
        .unwrap();
    harness
        .send("GUILD_MEMBER_UPDATE", member_update(neighbour, &[602, 700]))
        .await
        .unwrap();

    let settled = harness.drain().await;
    assert!(settled.mirrored(sf(7)).await.unwrap().is_empty());
    assert_eq!(
        settled.mirrored(sf(neighbour)).await.unwrap(),
        role_set(&[602, 700])
    );
}

#[tokio::test]
async fn test_role_deletion_purges_every_member() {
    let guild = FakeGuild::new()
        .with_member(7, &[601, 700])
        .with_member(8, &[700])
        .with_member(9, &[601]);
    let harness = TestEngine::start(guild).await.unwrap();

    harness
        .send("GUILD_ROLE_DELETE", role_delete(700))
        .await
        .unwrap();

    let settled = harness.drain().await;
    assert_eq!(settled.mirrored(sf(7)).await.unwrap(), role_set(&[601]));
    assert!(settled.mirrored(sf(8)).await.unwrap().is_empty());
    assert_eq!(settled.mirrored(sf(9)).await.unwrap(), role_set(&[601]));
}

#[tokio::test]
async fn test_resync_heals_drift() {
    let harness = TestEngine::start(FakeGuild::new().with_member(7, &[601]))
        .await
        .unwrap();

    // Changed while no events were delivered
    harness.guild.set_roles(sf(7), role_set(&[602, 700]));
    harness.guild.set_roles(sf(8), role_set(&[601]));

    let mirrored = harness.engine.resync().await.unwrap();
    assert_eq!(mirrored, 2);

    let settled = harness.drain().await;
    assert_eq!(settled.mirrored(sf(7)).await.unwrap(), role_set(&[602, 700]));
    assert_eq!(settled.mirrored(sf(8)).await.unwrap(), role_set(&[601]));
}

// ============================================================================
// Reaction roles
// ============================================================================

#[tokio::test]
async fn test_reaction_toggles_role_and_notice_expires() {
    let harness = TestEngine::start(FakeGuild::new().with_member(7, &[]))
        .await
        .unwrap();
    let control = harness.control_message();
    let channel = ROLES_CHANNEL.into_inner();

    harness
        .send(
            "MESSAGE_REACTION_ADD",
            reaction_add(7, channel, control.into_inner(), "🔵"),
        )
        .await
        .unwrap();
    harness
        .send(
            "MESSAGE_REACTION_ADD",
            reaction_add(7, channel, control.into_inner(), "🔵"),
        )
        .await
        .unwrap();

    let settled = harness.drain().await;
    let guild = &settled.guild;

    assert_eq!(
        *guild.role_changes.lock(),
        vec![
            RoleChange::Granted {
                user_id: sf(7),
                role_id: BLUE_ROLE
            },
            RoleChange::Revoked {
                user_id: sf(7),
                role_id: BLUE_ROLE
            },
        ]
    );
    assert!(guild.roles_of(sf(7)).is_empty());
    assert_eq!(
        *guild.removed_reactions.lock(),
        vec![
            (control, "🔵".to_string(), sf(7)),
            (control, "🔵".to_string(), sf(7)),
        ]
    );

    let notices = guild.posted_titled("Role Update");
    assert_eq!(notices.len(), 2);
    assert_eq!(
        notices[0].1.description,
        "<@7> I have given the role <@&602> to you."
    );
    assert_eq!(
        notices[1].1.description,
        "<@7> I have removed the role <@&602> from you."
    );

    let notice_ids: Vec<_> = notices.iter().map(|(posted, _)| posted.message_id).collect();
    let expired = wait_until(Duration::from_secs(5), || {
        notice_ids.iter().all(|id| guild.was_deleted(*id))
    })
    .await;
    assert!(expired, "toggle notices were not deleted");
}

#[tokio::test]
async fn test_reactions_outside_the_menu_are_ignored() {
    let harness = TestEngine::start(FakeGuild::new().with_member(7, &[]))
        .await
        .unwrap();
    let control = harness.control_message().into_inner();
    let channel = ROLES_CHANNEL.into_inner();

    // The bot's own seeding reaction
    harness
        .send("MESSAGE_REACTION_ADD", reaction_add(1, channel, control, "🔴"))
        .await
        .unwrap();
    // Another message
    harness
        .send("MESSAGE_REACTION_ADD", reaction_add(7, channel, control + 1, "🔴"))
        .await
        .unwrap();
    // An emoji not on the menu
    harness
        .send("MESSAGE_REACTION_ADD", reaction_add(7, channel, control, "🟢"))
        .await
        .unwrap();

    let settled = harness.drain().await;
    assert!(settled.guild.role_changes.lock().is_empty());
    assert!(settled.guild.removed_reactions.lock().is_empty());
    assert!(settled.guild.posted_titled("Role Update").is_empty());
}

#[tokio::test]
async fn test_reaction_by_departed_member_is_dropped() {
    let harness = TestEngine::start(FakeGuild::new()).await.unwrap();
    let control = harness.control_message().into_inner();

    harness
        .send(
            "MESSAGE_REACTION_ADD",
            reaction_add(7, ROLES_CHANNEL.into_inner(), control, "🔴"),
        )
        .await
        .unwrap();

    let settled = harness.drain().await;
    assert!(settled.guild.role_changes.lock().is_empty());
    assert!(settled.guild.posted_titled("Role Update").is_empty());
}

// ============================================================================
// Wire input
// ============================================================================

#[tokio::test]
async fn test_raw_frames_reach_the_mirror() {
    let harness = TestEngine::start(FakeGuild::new()).await.unwrap();

    let frame = concat!(
        r#"{"op":0,"s":42,"t":"GUILD_MEMBER_UPDATE","#,
        r#""d":{"guild_id":"100","user":{"id":"7"},"roles":["601","602"]}}"#
    );
    let seq = harness.engine.ingest_frame(frame).await.unwrap();
    assert!(seq.is_some());

    let ignored = harness
        .engine
        .ingest_frame(r#"{"op":0,"t":"PRESENCE_UPDATE","d":{}}"#)
        .await
        .unwrap();
    assert!(ignored.is_none());

    let err = harness
        .engine
        .ingest("GUILD_MEMBER_UPDATE", serde_json::json!({ "guild_id": "100" }))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "DECODE_ERROR");

    let settled = harness.drain().await;
    assert_eq!(
        settled.mirrored(sf(7)).await.unwrap(),
        [RED_ROLE, BLUE_ROLE].into_iter().collect::<RoleSet>()
    );
}

// ============================================================================
// Bulk assignment
// ============================================================================

#[tokio::test]
async fn test_assign_default_role_to_everyone() {
    let guild = FakeGuild::new()
        .with_member(7, &[500])
        .with_member(8, &[])
        .with_member(9, &[601]);
    let harness = TestEngine::start(guild).await.unwrap();

    let report = harness.engine.assign_default_role_to_all().await.unwrap();
    assert_eq!(report.members, 3);
    assert_eq!(report.already_held, 1);
    assert_eq!(report.granted, 2);
    assert_eq!(report.failed, 0);

    let settled = harness.drain().await;
    for user in [7, 8, 9] {
        assert!(settled.guild.roles_of(sf(user)).contains(&MEMBER_ROLE));
    }
}
