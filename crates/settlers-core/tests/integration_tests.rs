//! Integration tests for the settlers game engine.
//!
//! These tests drive complete matches through the public command surface,
//! from the placement rounds into the dice loop.

use settlers_core::*;

const THREE: [PlayerColor; 3] = [PlayerColor::Red, PlayerColor::Blue, PlayerColor::White];

/// Place the first legal piece for whoever is acting until the dice phase
fn complete_setup(game: &mut Game) {
    let mut iterations = 0;
    let max_iterations = 100;

    while game.phase().is_setup() && iterations < max_iterations {
        let action = game
            .legal_actions()
            .into_iter()
            .next()
            .expect("setup should always offer a placement");
        game.apply(action).unwrap();
        iterations += 1;
    }

    assert_eq!(
        game.phase(),
        GamePhase::RollingDice,
        "Game should complete setup within {} iterations",
        max_iterations
    );
}

/// Seats that acted in each placement phase, in order
fn setup_visits(game: &mut Game) -> Vec<(PlayerId, GamePhase)> {
    game.start().unwrap();
    let mut visits = Vec::new();
    while game.phase().is_setup() {
        visits.push((game.current_player_id(), game.phase()));
        let action = game.legal_actions()[0];
        game.apply(action).unwrap();
    }
    visits
}

#[test]
fn test_first_settlement_and_road_pass_to_next_player() {
    let mut game = Game::new(&THREE, 1).unwrap();
    game.start().unwrap();
    assert_eq!(game.phase(), GamePhase::BuildingFirstSettlement);
    assert_eq!(game.current_player_id(), 0);
    assert_eq!(game.remaining_settlements(), 5);

    let corner = TileCorner::new(7, 3);
    let edge = TileEdge::new(13, 3);
    assert!(game.can_build_settlement_at(corner));
    game.build_settlement(corner).unwrap();
    assert_eq!(game.phase(), GamePhase::BuildingFirstRoad);
    assert_eq!(game.remaining_settlements(), 4);

    assert!(game.can_build_road_at(edge));
    game.build_road(edge).unwrap();

    assert_eq!(game.phase(), GamePhase::BuildingFirstSettlement);
    assert_eq!(game.current_player_id(), 1);
    assert_eq!(game.players()[0].remaining_settlements(), 4);
    assert_eq!(game.players()[0].remaining_roads(), 14);
}

#[test]
fn test_setup_order_three_players() {
    let mut game = Game::new(&THREE, 8).unwrap();
    let settlement_turns: Vec<(PlayerId, GamePhase)> = setup_visits(&mut game)
        .into_iter()
        .filter(|(_, phase)| phase.is_placing_settlement())
        .collect();

    assert_eq!(
        settlement_turns,
        vec![
            (0, GamePhase::BuildingFirstSettlement),
            (1, GamePhase::BuildingFirstSettlement),
            (2, GamePhase::BuildingFirstSettlement),
            (2, GamePhase::BuildingSecondSettlement),
            (1, GamePhase::BuildingSecondSettlement),
            (0, GamePhase::BuildingSecondSettlement),
        ]
    );
    assert_eq!(game.turn(), Turn::new(0, GamePhase::RollingDice));
}

#[test]
fn test_setup_phase_completes() {
    let mut game = Game::new(&PlayerColor::ALL, 3).unwrap();
    game.start().unwrap();
    complete_setup(&mut game);

    for player in game.players() {
        assert_eq!(
            player.remaining_settlements(),
            3,
            "Each player should have 3 settlements left (placed 2)"
        );
        assert_eq!(
            player.remaining_roads(),
            13,
            "Each player should have 13 roads left (placed 2)"
        );
    }
}

#[test]
fn test_last_road_reshuffles_seats() {
    let mut game = Game::new(&THREE, 5).unwrap();
    game.start().unwrap();

    let mut shuffled = None;
    while game.phase().is_setup() {
        let action = game.legal_actions()[0];
        for event in game.apply(action).unwrap() {
            if let GameEvent::TurnOrderShuffled { order } = event {
                shuffled = Some(order);
            }
        }
    }

    let order = shuffled.expect("the last second road should reshuffle seats");
    let seated: Vec<PlayerColor> = game.players().iter().map(|p| p.color).collect();
    assert_eq!(order, seated);
}

#[test]
fn test_same_seed_same_match() {
    let a = Game::new(&THREE, 77).unwrap();
    let b = Game::new(&THREE, 77).unwrap();

    assert_eq!(a.tiles(), b.tiles());
    assert_eq!(a.robber(), b.robber());
    let colors = |g: &Game| g.players().iter().map(|p| p.color).collect::<Vec<_>>();
    assert_eq!(colors(&a), colors(&b));
    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_differ() {
    let boards: Vec<Vec<Tile>> = (0..5)
        .map(|seed| Game::new(&THREE, seed).unwrap().tiles().to_vec())
        .collect();
    assert!(
        boards.windows(2).any(|pair| pair[0] != pair[1]),
        "five seeds should not all produce the same board"
    );
}

#[test]
fn test_normal_turn_flow() {
    let mut game = Game::new(&[PlayerColor::Red, PlayerColor::Orange], 2).unwrap();
    game.start().unwrap();
    complete_setup(&mut game);

    let player = game.current_player_id();
    assert_eq!(game.legal_actions(), vec![GameAction::RollDice]);

    let events = game.apply(GameAction::RollDice).unwrap();
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::DiceRolled { .. })),
        "Should have dice roll event"
    );
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::ResourcesDistributed { .. })),
        "Should have distribution event"
    );
    assert_eq!(game.phase(), GamePhase::ChoosingNextAction);
    assert!(game.legal_actions().contains(&GameAction::EndTurn));

    game.apply(GameAction::EndTurn).unwrap();
    assert_ne!(game.current_player_id(), player, "Turn should advance");
    assert_eq!(game.phase(), GamePhase::RollingDice);
}

#[test]
fn test_roll_pays_matching_tiles() {
    let mut game = Game::new(&THREE, 14).unwrap();
    game.start().unwrap();
    complete_setup(&mut game);

    let before: Vec<u32> = game.players().iter().map(|p| p.resources.total()).collect();
    let events = game.roll_dice().unwrap();
    let [a, b] = game.dice();
    let total = a + b;

    let paid: u32 = match &events[1] {
        GameEvent::ResourcesDistributed {
            total: rolled,
            distributions,
            ..
        } => {
            assert_eq!(*rolled, total);
            distributions.iter().map(|(_, _, amount)| amount).sum()
        }
        other => panic!("expected a distribution, got {:?}", other),
    };
    let after: u32 = game.players().iter().map(|p| p.resources.total()).sum();
    assert_eq!(after, before.iter().sum::<u32>() + paid);
}

#[test]
fn test_buying_without_resources_is_rejected() {
    let mut game = Game::new(&THREE, 1).unwrap();
    game.start().unwrap();
    complete_setup(&mut game);
    game.roll_dice().unwrap();

    let player = game.current_player().clone();
    for purchase in Purchase::ALL {
        if !player.resources.can_afford(&purchase.cost()) {
            assert!(!game.can_buy(purchase));
            assert!(game.buy(purchase).is_err());
        }
    }
    assert_eq!(game.current_player(), &player, "failed buys must not cost anything");
}

#[test]
fn test_apply_rejects_out_of_phase_actions() {
    let mut game = Game::new(&THREE, 1).unwrap();
    assert_eq!(
        game.apply(GameAction::RollDice).unwrap_err(),
        GameError::InvalidPhase
    );
    assert_eq!(
        game.apply(GameAction::Buy(Purchase::City)).unwrap_err(),
        GameError::InvalidPhase
    );
    game.apply(GameAction::Start).unwrap();
    assert_eq!(game.apply(GameAction::Start).unwrap_err(), GameError::InvalidPhase);
}

#[test]
fn test_tile_lookup_off_board_is_a_miss() {
    let game = Game::new(&THREE, 1).unwrap();
    assert!(game.tile_at(TilePosition::new(0, 0)).is_none());
    assert!(game.tile_at(TilePosition::new(40, 40)).is_none());
    assert!(game.tile_at(TilePosition::new(3, 0)).is_some());
}
