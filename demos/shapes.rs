//! Draws and serializes a mixed collection of shapes.
//!
//! Run with `cargo run --example shapes`; set `RUST_LOG=shapebox=trace` to also see the
//! lifecycle events of the boxes.

use shapebox::{DrawStrategy, InlineErasedBox, SerializeStrategy};
use tracing_subscriber::EnvFilter;

mod gl {
    #[derive(Clone, Copy, Debug)]
    pub enum Color {
        Red = 0xFF0000,
        Green = 0x00FF00,
        Blue = 0x0000FF,
    }

    pub fn to_string(color: Color) -> String {
        match color {
            Color::Red => "red (0xFF0000)".to_owned(),
            Color::Green => "green (0x00FF00)".to_owned(),
            Color::Blue => "blue (0x0000FF)".to_owned(),
        }
    }
}

/// Appends plain numbers as native-endian bytes.
#[derive(Default)]
struct Serializer {
    buffer: Vec<u8>,
}

impl Serializer {
    fn push_u64(&mut self, value: u64) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_ne_bytes());
        self
    }

    fn push_f64(&mut self, value: f64) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_ne_bytes());
        self
    }

    fn to_hex(&self) -> String {
        self.buffer.iter().map(|b| format!("{b:02x}")).collect()
    }
}

#[derive(Clone, Copy, Default, Debug)]
struct Point {
    x: f64,
    y: f64,
}

#[derive(Clone, Debug)]
struct Circle {
    radius: f64,
    center: Point,
}

impl Circle {
    const TAG: u64 = 1;

    fn new(radius: f64) -> Self {
        Circle {
            radius,
            center: Point::default(),
        }
    }
}

#[derive(Clone, Debug)]
struct Square {
    side: f64,
    center: Point,
}

impl Square {
    const TAG: u64 = 2;

    fn new(side: f64) -> Self {
        Square {
            side,
            center: Point::default(),
        }
    }
}

#[derive(Clone)]
struct FreeDraw;

impl DrawStrategy<Circle> for FreeDraw {
    fn draw(&self, circle: &Circle) {
        tracing::info!("circle: radius={}", circle.radius);
    }
}

impl DrawStrategy<Square> for FreeDraw {
    fn draw(&self, square: &Square) {
        tracing::info!("square: side={}", square.side);
    }
}

#[derive(Clone)]
struct GlDrawer {
    color: gl::Color,
}

impl DrawStrategy<Circle> for GlDrawer {
    fn draw(&self, circle: &Circle) {
        tracing::info!(
            "circle: radius={}, color = {}",
            circle.radius,
            gl::to_string(self.color)
        );
    }
}

impl DrawStrategy<Square> for GlDrawer {
    fn draw(&self, square: &Square) {
        tracing::info!(
            "square: side={}, color = {}",
            square.side,
            gl::to_string(self.color)
        );
    }
}

#[derive(Clone)]
struct FsSerializer;

impl SerializeStrategy<Circle> for FsSerializer {
    fn serialize(&self, circle: &Circle) -> String {
        Serializer::default()
            .push_u64(Circle::TAG)
            .push_f64(circle.radius)
            .push_f64(circle.center.x)
            .push_f64(circle.center.y)
            .to_hex()
    }
}

impl SerializeStrategy<Square> for FsSerializer {
    fn serialize(&self, square: &Square) -> String {
        Serializer::default()
            .push_u64(Square::TAG)
            .push_f64(square.side)
            .push_f64(square.center.x)
            .push_f64(square.center.y)
            .to_hex()
    }
}

fn draw_all_shapes(shapes: &[InlineErasedBox]) {
    for shape in shapes {
        shape.draw();
    }
}

fn serialize_all_shapes(shapes: &[InlineErasedBox]) -> String {
    shapes.iter().map(InlineErasedBox::serialize).collect()
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let color = gl::Color::Blue;
    let lambda_drawer = move |circle: &Circle| {
        tracing::info!(
            "circle: radius={}, color = {}",
            circle.radius,
            gl::to_string(color)
        );
    };

    let shapes = vec![
        InlineErasedBox::new(Circle::new(2.3), FreeDraw, FsSerializer),
        InlineErasedBox::new(
            Square::new(1.2),
            GlDrawer {
                color: gl::Color::Green,
            },
            FsSerializer,
        ),
        InlineErasedBox::new(Circle::new(4.1), lambda_drawer, FsSerializer),
        InlineErasedBox::new(
            Circle::new(0.5),
            GlDrawer {
                color: gl::Color::Red,
            },
            FsSerializer,
        ),
    ];

    draw_all_shapes(&shapes);
    tracing::info!("serialized shapes: \"{}\"", serialize_all_shapes(&shapes));
}
