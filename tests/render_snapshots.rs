use toruslife::engine::Engine;
use toruslife::grid::Grid;
use toruslife::render::BrailleRenderer;
use toruslife::render::GlyphRenderer;
use toruslife::render::Render;
use toruslife::rule_set::B3S23;

fn glider() -> Grid {
    "
    .#....
    ..#...
    ###...
    ......
    ......
    ......
    "
    .parse()
    .unwrap()
}

#[test]
fn glider_frames() {
    let mut engine = Engine::new(glider(), B3S23);
    let mut renderer = GlyphRenderer::new('#', '.');
    let mut frames = String::new();

    for _ in 0..5 {
        frames.push_str(&format!("generation {}\n", engine.generation()));
        frames.push_str(renderer.render(engine.current()));
        engine.step();
    }

    insta::assert_snapshot!(frames, @r"
    generation 0
    .#....
    ..#...
    ###...
    ......
    ......
    ......
    generation 1
    ......
    #.#...
    .##...
    .#....
    ......
    ......
    generation 2
    ......
    ..#...
    #.#...
    .##...
    ......
    ......
    generation 3
    ......
    .#....
    ..##..
    .##...
    ......
    ......
    generation 4
    ......
    ..#...
    ...#..
    .###..
    ......
    ......
    ");
}

#[test]
fn default_glyphs_leave_dead_cells_blank() {
    let mut renderer = GlyphRenderer::default();

    let frame = renderer.render(&glider()).to_owned();
    let lines: Vec<&str> = frame.split_terminator('\n').collect();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], " #    ");
    assert_eq!(lines[2], "###   ");
    assert!(lines[3..].iter().all(|line| line.trim().is_empty()));
}

#[test]
fn braille_glider() {
    let grid: Grid = "
        .#..
        ..#.
        ###.
        ....
    "
    .parse()
    .unwrap();

    let mut renderer = BrailleRenderer::new();

    // left column pair: dots 0x8, 0x4 and 0x20; right pair: dots 0x2 and 0x4
    assert_eq!(renderer.render(&grid), "\u{282C}\u{2806}\n");
}
