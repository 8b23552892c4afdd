extern crate lyon;
extern crate vellum;

use lyon::math::{point, size, vector, Angle};
use vellum::data::*;
use vellum::eval::{construct, NoText};
use vellum::render::canvas::Canvas;
use vellum::render::draw_tree;
use vellum::scene::{self, Scene};

const WIDTH: usize = 72;
const HEIGHT: usize = 36;

fn house() -> Scene {
    let walls = construct(&Instruction::rectangle(point(0., 0.), size(20., 12.)))
        .expect("Failed to construct walls");
    let roof = construct(&Instruction::polygon(vec![
        point(-2., 0.),
        point(10., -8.),
        point(22., 0.),
    ]))
    .expect("Failed to construct roof");
    let door = construct(&Instruction::local(
        Affine::translation(8., 5.),
        Instruction::rectangle(point(0., 0.), size(4., 7.)),
    ))
    .expect("Failed to construct door");

    scene::from_list(vec![
        Scene::leaf(Tool::fill(Color::rgb(0.8, 0.7, 0.5)), walls.into()),
        Scene::leaf(Tool::fill(Color::RED), roof.into()),
        Scene::leaf(Tool::fill(Color::rgb(0.3, 0.2, 0.1)), door.into()),
    ])
}

fn sun(center: lyon::math::Point) -> Scene {
    let ray = Scene::leaf(
        Tool::stroke(Color::rgb(1., 0.8, 0.), 1.),
        Primitive::line(point(center.x + 6., center.y), point(center.x + 9., center.y)),
    );
    let rays: Scene = (0..8)
        .map(|i| scene::rotate_around_degrees(i as f32 * 45., center, ray.clone()))
        .collect();
    let disc = Scene::leaf(
        Tool::fill(Color::rgb(1., 0.9, 0.2)),
        Primitive::arc(center, vector(4., 4.), Angle::zero(), Angle::zero(), Angle::two_pi()),
    );
    rays.union(disc)
}

fn to_ascii(canvas: &Canvas) -> String {
    const RAMP: &[u8] = b" .:-=+*#%@";
    let mut out = String::with_capacity((canvas.width() + 1) * canvas.height());
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            let c = canvas.pixel(x, y).unwrap_or(Color::CLEAR);
            let luma = 0.3 * c.r + 0.59 * c.g + 0.11 * c.b;
            let ink = (1. - luma) * c.a;
            let index = (ink * (RAMP.len() - 1) as f32).round() as usize;
            out.push(RAMP[index.min(RAMP.len() - 1)] as char);
        }
        out.push('\n');
    }
    out
}

fn main() {
    let ground = Scene::leaf(
        Tool::stroke(Color::GREEN, 2.),
        Primitive::polyline(vec![point(0., 33.), point(24., 31.), point(48., 34.), point(72., 32.)]),
    );
    let tree = scene::from_list(vec![
        sun(point(56., 9.)),
        scene::translate(10., 19., house()),
        scene::translate(38., 23., scene::scale(0.5, 0.5, house())),
        ground,
    ]);

    let mut canvas = Canvas::new(WIDTH, HEIGHT);
    canvas.clear(Color::WHITE);
    draw_tree(&tree, &mut canvas, &NoText).expect("Failed to draw scene");
    print!("{}", to_ascii(&canvas));
}
