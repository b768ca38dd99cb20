use graytris::core::shapes::class;
use graytris::core::{FigureGenerator, Session, ShapeTable};
use graytris::term::{GameView, Viewport, GAME_OVER_TEXT, NEXT_TEXT, PAUSED_TEXT};
use graytris::types::{Block, Key, Rgb, SessionConfig, NEUTRAL_GRAY};

// 44x30 puts the 24x26 frame at (10, 2).
const VP: Viewport = Viewport {
    width: 44,
    height: 30,
};

fn session() -> Session {
    let mut s = Session::new(SessionConfig::default(), FigureGenerator::classic(5));
    *s.figure_mut() = ShapeTable::classic().figure(class::B);
    s
}

#[test]
fn term_view_renders_walls_without_top() {
    let canvas = GameView::default().render(&session(), VP);

    // Left wall, top row of the frame.
    let cell = canvas.cell(10, 2).unwrap();
    assert_eq!(cell.ch, '▐');
    assert_eq!(cell.style.fg, NEUTRAL_GRAY);
    assert_eq!(canvas.cell(11, 2).unwrap().ch, '▌');
    // Right wall.
    assert_eq!(canvas.cell(10 + 11 * 2, 2).unwrap().style.fg, NEUTRAL_GRAY);
    // Bottom wall spans the frame.
    for col in 0..12 {
        assert_eq!(canvas.cell(10 + col * 2, 27).unwrap().style.fg, NEUTRAL_GRAY);
    }
    // No wall across the top of the well.
    assert_eq!(canvas.cell(12, 2).unwrap().ch, ' ');
}

#[test]
fn term_view_renders_field_block_two_tone() {
    let mut s = session();
    let color = Rgb::new(200, 100, 50);
    s.field_mut().set(0, 24, Block::filled(color));
    let canvas = GameView::default().render(&s, VP);

    let left = canvas.cell(12, 26).unwrap();
    let right = canvas.cell(13, 26).unwrap();
    assert_eq!((left.ch, right.ch), ('▐', '▌'));
    assert_eq!(left.style.fg, color);
    assert_eq!(left.style.bg, Rgb::new(100, 50, 25));
}

#[test]
fn term_view_renders_falling_figure() {
    let canvas = GameView::default().render(&session(), VP);
    let magenta = Rgb::new(255, 0, 255);

    // Square at x=3: columns 3 and 4 of the field, after the left wall.
    for (px, py) in [(18, 2), (20, 2), (18, 3), (20, 3)] {
        assert_eq!(canvas.cell(px, py).unwrap().style.fg, magenta, "({}, {})", px, py);
    }
    assert_eq!(canvas.cell(22, 2).unwrap().ch, ' ');
}

#[test]
fn term_view_renders_status_and_next_label() {
    let mut s = session();
    s.add_score(1500);
    let canvas = GameView::default().render(&s, VP);

    assert_eq!(canvas.line(0).trim_end(), " Level: 1 | Score: 1500");
    assert!(canvas.line(2).contains(NEXT_TEXT));
    let next_filled = s.next_figure().cells().count();
    let preview = (4..8)
        .flat_map(|y| (36..44).map(move |x| (x, y)))
        .filter(|&(x, y)| canvas.cell(x, y).unwrap().ch != ' ')
        .count();
    assert_eq!(preview, next_filled * 2);
}

#[test]
fn term_view_renders_banners() {
    let view = GameView::default();
    let mut s = session();
    assert_eq!(view.render(&s, VP).line(1).trim(), "");

    s.handle_input(Key::Pause);
    let canvas = view.render(&s, VP);
    assert_eq!(canvas.line(1).trim(), PAUSED_TEXT);
    let x = view.centered_x(PAUSED_TEXT, VP) as u16;
    assert_eq!(x, 7);
    assert!(canvas.cell(x, 1).unwrap().style.bold);

    s.handle_input(Key::Pause);
    s.field_mut().set(3, 0, Block::filled(Rgb::new(1, 1, 1)));
    s.field_mut().set(4, 0, Block::filled(Rgb::new(1, 1, 1)));
    s.figure_mut().x = 0;
    s.handle_input(Key::Drop);
    s.tick(1001);
    let canvas = view.render(&s, VP);
    assert_eq!(canvas.line(1).trim(), GAME_OVER_TEXT);
}
