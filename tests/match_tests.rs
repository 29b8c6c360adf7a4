//! Match integration tests.
//!
//! Best-of-three sequencing, cross-round roster bookkeeping, forfeit
//! termination, and seed-replay determinism through the match controller.

use aquawar::{
    ActionDecision, AssertionDecision, FishId, ForfeitReason, GameError, MatchController,
    MatchResult, PlayerId, SelectionDecision, SelectionError, WinReason,
};

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);

fn skip(m: &mut MatchController, player: PlayerId) {
    m.apply_assertion(player, AssertionDecision::Skip).unwrap();
}

fn wrong_guess(m: &mut MatchController, player: PlayerId) -> Option<WinReason> {
    let outcome = m
        .apply_assertion(
            player,
            AssertionDecision::Assert {
                target: 0,
                name: "Archerfish".to_string(),
            },
        )
        .unwrap();
    outcome.result.map(|r| r.reason)
}

fn normal(actor: u8, target: u8) -> ActionDecision {
    ActionDecision::NormalAttack { actor, target }
}

fn ward(actor: u8) -> ActionDecision {
    ActionDecision::ActiveSkill {
        actor,
        teammate: Some(actor),
        enemy: None,
    }
}

/// One player throws the round by failing eight assertions against a fish
/// that is certainly not an Archerfish; the other side wards harmlessly
/// with the fish at `warder_pos`.
///
/// `loser_first` says whether the throwing player opens the round.
fn throw_round(
    m: &mut MatchController,
    loser: PlayerId,
    loser_attack: ActionDecision,
    warder_pos: u8,
    loser_first: bool,
) {
    let winner = loser.opponent();
    for fail in 1..=8 {
        if !loser_first && fail == 1 {
            skip(m, winner);
            m.apply_action(winner, ward(warder_pos)).unwrap();
        }
        let reason = wrong_guess(m, loser);
        if fail == 8 {
            assert_eq!(reason, Some(WinReason::Elimination));
            return;
        }
        m.apply_action(loser, loser_attack.clone()).unwrap();
        skip(m, winner);
        m.apply_action(winner, ward(warder_pos)).unwrap();
    }
    unreachable!("eight failed assertions always end the round");
}

#[test]
fn test_best_of_three_with_full_roster_exhaustion() {
    let mut m = MatchController::new(P0, 4242);

    // === Round 1: P0 throws, P1 wins ===
    m.submit_selection(
        P0,
        SelectionDecision::new([
            FishId::ARCHERFISH,
            FishId::PUFFERFISH,
            FishId::ELECTRIC_EEL,
            FishId::SUNFISH,
        ]),
    )
    .unwrap();
    assert!(m.round().is_none(), "round waits for both selections");
    m.submit_selection(
        P1,
        SelectionDecision::new([
            FishId::MANTA_RAY,
            FishId::SEA_WOLF,
            FishId::SEA_TURTLE,
            FishId::OCTOPUS,
        ]),
    )
    .unwrap();

    let round = m.round().expect("both teams in, round 1 running");
    assert_eq!(round.number(), 1);
    assert_eq!(round.first_player(), P0);

    // P0 pokes the shielded turtle while failing every guess.
    throw_round(&mut m, P0, normal(0, 2), 0, true);
    assert_eq!(*m.score().get(P1), 1);
    assert_eq!(m.round_number(), 2);

    // === Round 2: P1 throws, P0 wins; the round-1 winner moves second ===
    m.submit_selection(
        P0,
        SelectionDecision::new([
            FishId::OCTOPUS,
            FishId::SEA_WOLF,
            FishId::MANTA_RAY,
            FishId::SEA_TURTLE,
        ]),
    )
    .unwrap();
    m.submit_selection(
        P1,
        SelectionDecision::new([
            FishId::ARCHERFISH,
            FishId::PUFFERFISH,
            FishId::ELECTRIC_EEL,
            FishId::SUNFISH,
        ]),
    )
    .unwrap();

    let round = m.round().unwrap();
    assert_eq!(round.first_player(), P0, "round-1 winner P1 moves second");

    throw_round(&mut m, P1, normal(0, 3), 0, false);
    assert_eq!(*m.score().get(P0), 1);
    assert_eq!(*m.score().get(P1), 1);
    assert!(m.result().is_none());

    // === Round 3: the last four fish each, Mimics included ===
    m.submit_selection(
        P0,
        SelectionDecision::with_mimic(
            [
                FishId::MIMIC_FISH,
                FishId::GREAT_WHITE_SHARK,
                FishId::HAMMERHEAD_SHARK,
                FishId::CLOWNFISH,
            ],
            FishId::OCTOPUS,
        ),
    )
    .unwrap();
    m.submit_selection(
        P1,
        SelectionDecision::with_mimic(
            [
                FishId::GREAT_WHITE_SHARK,
                FishId::HAMMERHEAD_SHARK,
                FishId::CLOWNFISH,
                FishId::MIMIC_FISH,
            ],
            FishId::SEA_WOLF,
        ),
    )
    .unwrap();

    let round = m.round().unwrap();
    assert_eq!(round.first_player(), P1, "round-2 winner P0 moves second");
    // P0's Mimic copied the Octopus, so it wards like one.
    assert_eq!(
        round.team(P0).get(0).unwrap().mimic_source(),
        Some(FishId::OCTOPUS)
    );

    // P1 throws round 3; P0 wards with its Octopus-skilled Mimic.
    throw_round(&mut m, P1, normal(0, 1), 0, true);

    assert_eq!(*m.score().get(P0), 2);
    assert_eq!(m.result(), Some(&MatchResult::Decided { winner: P0 }));
    assert_eq!(m.completed_rounds().len(), 3);
    assert_eq!(m.used_fish(P0).len(), 12);
    assert_eq!(m.used_fish(P1).len(), 12);
    // The archived rounds keep their logs for external persistence.
    assert_eq!(m.past_rounds().len(), 3);
    assert!(m.past_rounds().iter().all(|r| !r.events().is_empty()));

    // Nothing further is accepted.
    assert_eq!(
        m.submit_selection(P0, SelectionDecision::new([FishId::ARCHERFISH; 4])),
        Err(GameError::MatchOver)
    );
}

#[test]
fn test_selection_bookkeeping_errors() {
    let mut m = MatchController::new(P0, 7);

    let team = SelectionDecision::new([
        FishId::ARCHERFISH,
        FishId::PUFFERFISH,
        FishId::ELECTRIC_EEL,
        FishId::SUNFISH,
    ]);
    m.submit_selection(P0, team.clone()).unwrap();

    // Resubmission is out of order.
    assert_eq!(
        m.submit_selection(P0, team.clone()),
        Err(GameError::Selection(SelectionError::NotYourSelection(P0)))
    );

    // Turn decisions before both teams are in.
    assert_eq!(
        m.apply_assertion(P1, AssertionDecision::Skip),
        Err(GameError::AwaitingSelection)
    );

    m.submit_selection(
        P1,
        SelectionDecision::new([
            FishId::MANTA_RAY,
            FishId::SEA_WOLF,
            FishId::SEA_TURTLE,
            FishId::OCTOPUS,
        ]),
    )
    .unwrap();

    // Selecting while a round is running is out of order too.
    assert_eq!(
        m.submit_selection(
            P0,
            SelectionDecision::new([
                FishId::GREAT_WHITE_SHARK,
                FishId::HAMMERHEAD_SHARK,
                FishId::CLOWNFISH,
                FishId::OCTOPUS,
            ])
        ),
        Err(GameError::Selection(SelectionError::NotYourSelection(P0)))
    );
}

#[test]
fn test_used_fish_cannot_be_reselected() {
    let mut m = MatchController::new(P0, 8);

    let p0_team = SelectionDecision::new([
        FishId::ARCHERFISH,
        FishId::PUFFERFISH,
        FishId::ELECTRIC_EEL,
        FishId::SUNFISH,
    ]);
    m.submit_selection(P0, p0_team.clone()).unwrap();
    m.submit_selection(
        P1,
        SelectionDecision::new([
            FishId::MANTA_RAY,
            FishId::SEA_WOLF,
            FishId::SEA_TURTLE,
            FishId::OCTOPUS,
        ]),
    )
    .unwrap();

    throw_round(&mut m, P0, normal(0, 2), 0, true);

    // P0 tries to field a round-1 fish again.
    assert_eq!(
        m.submit_selection(P0, p0_team),
        Err(GameError::Selection(SelectionError::FishAlreadyUsed(
            FishId::ARCHERFISH
        )))
    );

    // A fresh four is fine; the Mimic may still copy a used definition.
    m.submit_selection(
        P0,
        SelectionDecision::with_mimic(
            [
                FishId::GREAT_WHITE_SHARK,
                FishId::HAMMERHEAD_SHARK,
                FishId::CLOWNFISH,
                FishId::MIMIC_FISH,
            ],
            FishId::ARCHERFISH,
        ),
    )
    .unwrap();
}

#[test]
fn test_forfeit_terminates_immediately() {
    let mut m = MatchController::new(P0, 9);

    m.submit_selection(
        P0,
        SelectionDecision::new([
            FishId::ARCHERFISH,
            FishId::PUFFERFISH,
            FishId::ELECTRIC_EEL,
            FishId::SUNFISH,
        ]),
    )
    .unwrap();
    m.submit_selection(
        P1,
        SelectionDecision::new([
            FishId::MANTA_RAY,
            FishId::SEA_WOLF,
            FishId::SEA_TURTLE,
            FishId::OCTOPUS,
        ]),
    )
    .unwrap();

    // Mid-round, with the score at 0-0, the caller reports a timeout.
    skip(&mut m, P0);
    m.apply_action(P0, normal(0, 2)).unwrap();

    let result = m.forfeit(P1, ForfeitReason::Timeout);
    assert_eq!(
        result,
        MatchResult::Forfeited {
            loser: P1,
            reason: ForfeitReason::Timeout,
        }
    );
    assert!(m.is_over());
    assert!(m.round().is_none());
    // The interrupted round is archived with what it had so far.
    assert_eq!(m.past_rounds().len(), 1);

    // Everything after the forfeit is rejected, and a second forfeit
    // cannot overwrite the result.
    assert_eq!(
        m.apply_assertion(P1, AssertionDecision::Skip),
        Err(GameError::MatchOver)
    );
    assert_eq!(
        m.forfeit(P0, ForfeitReason::RuntimeFault),
        MatchResult::Forfeited {
            loser: P1,
            reason: ForfeitReason::Timeout,
        }
    );
}

#[test]
fn test_same_seed_same_decisions_replay_identically() {
    let play = |seed: u64| -> MatchController {
        let mut m = MatchController::new(P0, seed);
        m.submit_selection(
            P0,
            SelectionDecision::new([
                FishId::SEA_WOLF,
                FishId::ARCHERFISH,
                FishId::PUFFERFISH,
                FishId::ELECTRIC_EEL,
            ]),
        )
        .unwrap();
        m.submit_selection(
            P1,
            SelectionDecision::new([
                FishId::SEA_WOLF,
                FishId::MANTA_RAY,
                FishId::SEA_TURTLE,
                FishId::OCTOPUS,
            ]),
        )
        .unwrap();

        // Eight turns of attacks into dodge-capable fish, so the RNG
        // stream is exercised on both sides.
        for _ in 0..4 {
            skip(&mut m, P0);
            m.apply_action(P0, normal(1, 0)).unwrap();
            skip(&mut m, P1);
            m.apply_action(P1, normal(1, 0)).unwrap();
        }
        m
    };

    let a = play(123_456);
    let b = play(123_456);

    let (ra, rb) = (a.round().unwrap(), b.round().unwrap());
    assert_eq!(ra.events(), rb.events());
    for player in [P0, P1] {
        for pos in 0..4 {
            assert_eq!(
                ra.team(player).get(pos).unwrap().hp(),
                rb.team(player).get(pos).unwrap().hp()
            );
        }
    }
}
