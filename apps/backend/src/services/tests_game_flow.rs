use uuid::Uuid;

use crate::domain::rules::SEATS;
use crate::domain::teams::team_of_seat;
use crate::errors::domain::ValidationKind;
use crate::services::events::{GameEvent, RosterEntry, RoundOverPayload};
use crate::services::game_flow::GameFlow;

fn bot_entries(count: usize) -> Vec<RosterEntry> {
    (0..count)
        .map(|i| RosterEntry {
            player_id: Uuid::new_v4(),
            handle: format!("bot-{i}"),
            is_bot: true,
        })
        .collect()
}

fn started_flow() -> (GameFlow, Uuid) {
    let mut flow = GameFlow::with_seeds(42, 7);
    let human = Uuid::new_v4();
    flow.register(human, "alice".to_string());
    let missing = flow.missing_seats().unwrap();
    flow.start(bot_entries(missing)).unwrap();
    (flow, human)
}

/// Play the round out with each seat's first legal card.
fn drive_round(flow: &mut GameFlow) -> RoundOverPayload {
    for _ in 0..52 {
        let seat = flow.session().unwrap().turn;
        let card = flow.fallback_card(seat).unwrap();
        let events = flow.apply_play(seat, card);
        for event in events {
            if let GameEvent::RoundOver(payload) = event {
                return payload;
            }
            assert!(
                !matches!(event, GameEvent::InvalidPlay { .. }),
                "legal plays must be accepted"
            );
        }
    }
    panic!("round did not complete within 52 plays");
}

#[test]
fn register_adds_and_renames() {
    let mut flow = GameFlow::new();
    let p = Uuid::new_v4();
    flow.register(p, "alice".to_string());
    flow.register(Uuid::new_v4(), "bob".to_string());
    assert_eq!(flow.roster().len(), 2);

    let events = flow.register(p, "alicia".to_string());
    assert_eq!(flow.roster().len(), 2);
    assert_eq!(flow.roster()[0].handle, "alicia");
    assert!(matches!(events.as_slice(), [GameEvent::Roster(r)] if r.len() == 2));
}

#[test]
fn start_requires_a_human_seat() {
    let mut flow = GameFlow::new();
    let err = flow.missing_seats().unwrap_err();
    assert_eq!(*err.kind(), ValidationKind::NoHumanSeat);
    assert!(flow.start(bot_entries(4)).is_err());
    assert!(flow.session().is_none(), "rejected start must not mutate");
}

#[test]
fn start_fills_bots_deals_and_interleaves_teams() {
    let (flow, human) = started_flow();
    assert_eq!(flow.roster().len(), SEATS);
    assert_eq!(flow.roster().iter().filter(|e| e.is_bot).count(), 3);

    let session = flow.session().unwrap();
    assert!(session.seats.iter().any(|s| s.player == human));
    assert_eq!(session.cumulative, [0, 0]);
    for seat in 0..SEATS as u8 {
        assert_eq!(session.hands[seat as usize].len(), 13);
        // Interleaved seating: adjacent seats on opposite teams.
        let next = (seat + 1) % SEATS as u8;
        assert_ne!(
            session.teams.team_of(session.seats[seat as usize].player),
            session.teams.team_of(session.seats[next as usize].player),
        );
    }
}

#[test]
fn start_keeps_unseated_humans_registered() {
    let mut flow = GameFlow::with_seeds(3, 4);
    let humans: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
    for (i, &p) in humans.iter().enumerate() {
        flow.register(p, format!("human-{i}"));
    }

    assert_eq!(flow.missing_seats().unwrap(), 0);
    flow.start(Vec::new()).unwrap();

    // The first 4 registrants are seated; the 5th keeps their roster entry.
    let session = flow.session().unwrap();
    for &p in &humans[..4] {
        assert!(session.seat_of(p).is_some());
    }
    assert!(session.seat_of(humans[4]).is_none());
    assert_eq!(flow.roster().len(), 5);
    assert!(flow.roster().iter().any(|e| e.player_id == humans[4]));

    // Unseated registrants cannot act, but stay addressable.
    let events = flow.play(humans[4], "2♣");
    assert!(matches!(
        events.as_slice(),
        [GameEvent::Rejected { code: "NOT_SEATED", .. }]
    ));
}

#[test]
fn start_emits_roster_private_hands_and_snapshot() {
    let mut flow = GameFlow::with_seeds(1, 2);
    flow.register(Uuid::new_v4(), "alice".to_string());
    let events = flow.start(bot_entries(3)).unwrap();

    let hands = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Hand { .. }))
        .count();
    assert_eq!(hands, SEATS, "one private hand per seat");
    assert!(events.iter().any(|e| matches!(e, GameEvent::Roster(_))));
    assert!(events.iter().any(|e| matches!(e, GameEvent::Snapshot(_))));
}

#[test]
fn play_from_stranger_is_rejected_without_mutation() {
    let (mut flow, _) = started_flow();
    let before = flow.session().unwrap().hands.clone();
    let events = flow.play(Uuid::new_v4(), "2♣");
    assert!(matches!(
        events.as_slice(),
        [GameEvent::Rejected { code: "NOT_SEATED", .. }]
    ));
    assert_eq!(flow.session().unwrap().hands, before);
}

#[test]
fn unparseable_card_token_is_an_invalid_play() {
    let (mut flow, human) = started_flow();
    let events = flow.play(human, "Z♠");
    assert!(matches!(
        events.as_slice(),
        [GameEvent::InvalidPlay { to, .. }] if *to == human
    ));
}

#[test]
fn play_without_session_is_rejected() {
    let mut flow = GameFlow::new();
    let p = Uuid::new_v4();
    let events = flow.play(p, "2♣");
    assert!(matches!(
        events.as_slice(),
        [GameEvent::Rejected { code: "NO_ACTIVE_SESSION", .. }]
    ));
}

#[test]
fn full_round_settles_all_52_cards() {
    let (mut flow, _) = started_flow();
    let payload = drive_round(&mut flow);

    let total_collected: usize = payload.collected_by_handle.values().map(|c| c.len()).sum();
    assert_eq!(total_collected, 52);
    assert_eq!(payload.individual_scores.len(), SEATS);

    // Team round score is the sum of its members' final scores.
    for team in &payload.team_info {
        let member_sum: i32 = team
            .players
            .iter()
            .map(|h| payload.individual_scores[h])
            .sum();
        assert_eq!(team.round_score, member_sum);
        assert_eq!(team.cumulative_score, team.round_score, "first round");
    }
    assert!(!payload.game_ended, "one round cannot reach the threshold");
    assert_eq!(payload.winning_team, None);
}

#[test]
fn continue_preserves_teams_seating_and_cumulative() {
    let (mut flow, _) = started_flow();
    drive_round(&mut flow);

    let teams_before = flow.session().unwrap().teams.clone();
    let seats_before = flow.session().unwrap().seats.clone();
    let cumulative_before = flow.session().unwrap().cumulative;

    let events = flow.continue_round().unwrap();
    assert!(events.iter().any(|e| matches!(e, GameEvent::Snapshot(_))));

    let session = flow.session().unwrap();
    assert_eq!(session.teams, teams_before);
    assert_eq!(session.seats, seats_before);
    assert_eq!(session.cumulative, cumulative_before);
    assert_eq!(session.turn, 0);
    assert!(session.trick.is_empty());
    assert!(session.collected.iter().all(|c| c.is_empty()));
    assert!(session.hands.iter().all(|h| h.len() == 13));
}

#[test]
fn fresh_start_resets_cumulative_scores() {
    let (mut flow, _) = started_flow();
    drive_round(&mut flow);
    assert_ne!(flow.session().unwrap().cumulative, [0, 0]);

    let missing = flow.missing_seats().unwrap();
    flow.start(bot_entries(missing)).unwrap();
    assert_eq!(flow.session().unwrap().cumulative, [0, 0]);
}

#[test]
fn continue_without_session_is_rejected() {
    let mut flow = GameFlow::new();
    flow.register(Uuid::new_v4(), "alice".to_string());
    let err = flow.continue_round().unwrap_err();
    assert_eq!(*err.kind(), ValidationKind::NoSessionToContinue);
}

#[test]
fn continue_after_seated_human_left_is_rejected() {
    let (mut flow, human) = started_flow();
    drive_round(&mut flow);
    flow.disconnect(human);
    let err = flow.continue_round().unwrap_err();
    assert_eq!(*err.kind(), ValidationKind::WrongPlayerCount);
}

#[test]
fn disconnect_mid_round_keeps_the_session_alive() {
    let (mut flow, human) = started_flow();
    flow.disconnect(human);
    assert!(flow.session().is_some());
    // The vacated seat still plays out through the shared path.
    let payload = drive_round(&mut flow);
    let total: usize = payload.collected_by_handle.values().map(|c| c.len()).sum();
    assert_eq!(total, 52);
}

#[test]
fn game_ends_when_cumulative_crosses_threshold() {
    let (mut flow, _) = started_flow();
    flow.session_mut().unwrap().cumulative = [2000, -2000];
    let payload = drive_round(&mut flow);
    assert!(payload.game_ended);
    assert_eq!(payload.winning_team, Some(0));
    assert!(payload.team_info[0].cumulative_score >= 1000);
}

#[test]
fn bot_turns_report_through_the_same_queue() {
    let (flow, human) = started_flow();
    let session = flow.session().unwrap();
    let human_seat = session.seat_of(human).unwrap();

    match flow.current_bot_turn() {
        Some((seat, player)) => {
            assert_ne!(seat, human_seat);
            assert_eq!(session.seats[seat as usize].player, player);
            assert_eq!(seat, session.turn);
        }
        None => assert_eq!(session.turn, human_seat),
    }

    let view = flow.view_for(session.turn).unwrap();
    assert_eq!(view.hand, session.hands[session.turn as usize]);
    assert_eq!(view.team(), team_of_seat(session.turn));
}
