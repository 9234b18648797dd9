use criterion::{Criterion, black_box, criterion_group, criterion_main};

use cp_admin::engine::keys::decode;
use cp_admin::engine::{CursorState, Key, Renderer, transition};
use cp_admin::menu::{Group, Menu};

fn make_menu(groups: usize, children: usize) -> Menu {
    let groups = (0..groups)
        .map(|g| {
            (0..children).fold(Group::new(format!("GROUP {g}")), |group, c| {
                group.command(format!("Command {g}.{c}"), || {})
            })
        })
        .collect();
    Menu::new(groups).unwrap()
}

fn bench_decode(c: &mut Criterion) {
    let captures: [&[u8]; 5] = [b"\x1b[A", b"\x1b[B", b"q", b"\r", b"\x1b[1;5C"];

    c.bench_function("decode (5 captures)", |b| {
        b.iter(|| {
            for bytes in captures {
                black_box(decode(black_box(bytes)));
            }
        })
    });
}

fn bench_transition_walk(c: &mut Criterion) {
    let menu = make_menu(8, 12);
    let walk: Vec<Key> = (0..8)
        .flat_map(|_| {
            std::iter::once(Key::Down)
                .chain(std::iter::once(Key::Right))
                .chain(std::iter::repeat_n(Key::Down, 12))
                .chain(std::iter::once(Key::Left))
        })
        .collect();

    c.bench_function("transition walk (8x12 menu)", |b| {
        b.iter(|| {
            walk.iter().fold(CursorState::Above, |cursor, &key| {
                transition(black_box(&menu), cursor, key)
            })
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let menu = make_menu(8, 12);
    let renderer = Renderer::default();
    let mut buf = Vec::with_capacity(4096);

    c.bench_function("render + erase expanded frame", |b| {
        b.iter(|| {
            buf.clear();
            let n = renderer
                .render(&mut buf, &menu, black_box(CursorState::Child(3, 5)))
                .unwrap();
            renderer.erase_lines(&mut buf, n).unwrap();
            black_box(buf.len())
        })
    });
}

criterion_group!(benches, bench_decode, bench_transition_walk, bench_render);
criterion_main!(benches);
