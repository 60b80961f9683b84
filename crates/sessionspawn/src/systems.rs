use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::coordinator::SessionStartCoordinator;
use crate::diagnostics::{Diagnostic, validate_spawner, validate_starter};
use crate::messages::{
    JoinedSession,
    LeaderChanged,
    ParticipantJoined,
    ParticipantLeft,
    ProcessReady,
    SessionStartResult,
    SpawnAttempted,
    StartAvailabilityChanged,
    StartSessionRequested,
};
use crate::spawner::PlayerSpawnResolver;

/// System set for sessionspawn systems so downstream apps can schedule the
/// session service integration before them.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionSpawnSystems {
    /// Membership and leadership changes update the start gate.
    Gate,
    /// Spawn triggers and start requests are handled.
    Act,
}

/// Findings of the startup configuration check.
#[derive(Resource, Debug, Default, Clone)]
pub struct PreflightReport {
    /// Every finding, spawner first.
    pub diagnostics: Vec<Diagnostic>,
}

pub(crate) fn install(app: &mut App, emit_process_ready: bool) {
    app.add_message::<ProcessReady>()
        .add_message::<JoinedSession>()
        .add_message::<LeaderChanged>()
        .add_message::<ParticipantJoined>()
        .add_message::<ParticipantLeft>()
        .add_message::<StartSessionRequested>()
        .add_message::<SpawnAttempted>()
        .add_message::<SessionStartResult>()
        .add_message::<StartAvailabilityChanged>()
        .init_resource::<PreflightReport>();

    app.configure_sets(
        Update,
        (SessionSpawnSystems::Gate, SessionSpawnSystems::Act).chain(),
    )
    .add_systems(Startup, (run_preflight_diagnostics, refresh_gate_on_start))
    .add_systems(
        Update,
        refresh_start_gate.in_set(SessionSpawnSystems::Gate),
    )
    .add_systems(
        Update,
        (drive_spawn_triggers, handle_start_requests).in_set(SessionSpawnSystems::Act),
    );

    if emit_process_ready {
        app.add_systems(PostStartup, announce_process_ready);
    }
}

/// Uses the resolver's asset catalog so startup and spawn-time findings agree.
fn run_preflight_diagnostics(
    resolver: Res<PlayerSpawnResolver>,
    coordinator: Res<SessionStartCoordinator>,
    mut report: ResMut<PreflightReport>,
) {
    let mut diagnostics = validate_spawner(resolver.config(), resolver.assets());
    diagnostics.extend(validate_starter(coordinator.config(), resolver.assets()));
    if !diagnostics.is_empty() {
        info!("[SessionSpawnPlugin] Preflight found {} configuration issue(s)", diagnostics.len());
    }
    report.diagnostics = diagnostics;
}

fn refresh_gate_on_start(
    mut coordinator: ResMut<SessionStartCoordinator>,
    mut availability: MessageWriter<StartAvailabilityChanged>,
) {
    let can_start = coordinator.on_local_start();
    availability.write(StartAvailabilityChanged { can_start });
}

fn announce_process_ready(mut ready: MessageWriter<ProcessReady>) {
    ready.write(ProcessReady);
}

/// Every membership or leadership message recomputes the gate. Only actual
/// changes are announced.
fn refresh_start_gate(
    mut leaders: MessageReader<LeaderChanged>,
    mut joins: MessageReader<ParticipantJoined>,
    mut leaves: MessageReader<ParticipantLeft>,
    mut coordinator: ResMut<SessionStartCoordinator>,
    mut availability: MessageWriter<StartAvailabilityChanged>,
) {
    let before = coordinator.can_start();

    for LeaderChanged(leader) in leaders.read() {
        coordinator.on_leader_changed(*leader);
    }
    for ParticipantJoined(participant) in joins.read() {
        coordinator.on_participant_joined(*participant);
    }
    for ParticipantLeft(participant) in leaves.read() {
        coordinator.on_participant_left(*participant);
    }

    let after = coordinator.can_start();
    if before != after {
        availability.write(StartAvailabilityChanged { can_start: after });
    }
}

/// Both triggers call into the resolver; its guard makes repeats no-ops.
fn drive_spawn_triggers(
    mut ready: MessageReader<ProcessReady>,
    mut joined: MessageReader<JoinedSession>,
    mut spawner: ResMut<PlayerSpawnResolver>,
    mut outcomes: MessageWriter<SpawnAttempted>,
) {
    let triggers = ready.read().count() + joined.read().count();
    for _ in 0..triggers {
        let outcome = spawner.attempt_spawn();
        outcomes.write(SpawnAttempted(outcome));
    }
}

fn handle_start_requests(
    mut requests: MessageReader<StartSessionRequested>,
    coordinator: Res<SessionStartCoordinator>,
    mut results: MessageWriter<SessionStartResult>,
) {
    for _ in requests.read() {
        results.write(SessionStartResult(coordinator.request_session_start()));
    }
}
