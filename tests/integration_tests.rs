//! Integration tests - full play sequences across field, figures and session

use graytris::core::shapes::class;
use graytris::core::{Field, FigureGenerator, Session, ShapeTable};
use graytris::types::{Block, Key, Rgb, SessionConfig, SessionState, FIELD_HEIGHT, FIELD_WIDTH};

#[test]
fn test_five_squares_complete_two_rows() {
    let table = ShapeTable::classic();
    let mut field = Field::new(FIELD_WIDTH, FIELD_HEIGHT);
    let gray = Block::filled(Rgb::new(80, 80, 80));
    for y in [23, 24] {
        for x in (0..FIELD_WIDTH as i32).filter(|x| ![3, 4].contains(x)) {
            field.set(x, y, gray);
        }
    }

    for _ in 0..5 {
        let mut figure = table.figure(class::B);
        while !field.step_collide_and_merge(&mut figure) {}
    }

    assert_eq!(field.check_for_lines(), 2);
    // Four squares (rows 15..=22) remain, shifted down by two.
    for y in 17..FIELD_HEIGHT as i32 {
        assert!(field.get(3, y).unwrap().filled, "row {}", y);
        assert!(field.get(4, y).unwrap().filled, "row {}", y);
        assert!(!field.get(0, y).unwrap().filled, "row {}", y);
    }
    assert_eq!(field.blocks().iter().filter(|b| b.filled).count(), 16);

    let mut session = Session::new(SessionConfig::default(), FigureGenerator::classic(7));
    session.add_score(2 * 1000);
    assert_eq!(session.score(), 2000);
}

#[test]
fn test_playing_until_game_over_and_restart() {
    let mut session = Session::new(SessionConfig::new(9), FigureGenerator::classic(99));

    // Dropping every figure in place stacks the middle columns up to the top.
    let mut landed = 0;
    while session.state() == SessionState::Playing {
        assert!(session.handle_input(Key::Drop));
        session.tick(session.speed() + 1);
        landed += 1;
        assert!(landed < 100, "stack never reached the spawn point");
    }
    assert_eq!(session.state(), SessionState::GameOver);
    assert!(session.field().blocks().iter().any(|b| b.filled));

    assert!(session.handle_input(Key::Confirm));
    assert_eq!(session.state(), SessionState::Playing);
    assert_eq!(session.level(), 9);
    assert!(session.field().blocks().iter().all(|b| !b.filled));
}

#[test]
fn test_stack_fades_over_time() {
    let mut session = Session::new(SessionConfig::default(), FigureGenerator::classic(3));
    session.handle_input(Key::Drop);
    session.tick(1001);
    let landed: Vec<Block> = session
        .field()
        .blocks()
        .iter()
        .copied()
        .filter(|b| b.filled)
        .collect();
    assert_eq!(landed.len(), 4);

    // Pausing leaves the figures alone, but the stack keeps fading.
    session.handle_input(Key::Pause);
    for _ in 0..300 {
        session.tick(101);
    }
    assert!(session
        .field()
        .blocks()
        .iter()
        .filter(|b| b.filled)
        .all(|b| b.color == Rgb::new(80, 80, 80)));
}
