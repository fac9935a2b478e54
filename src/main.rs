use macroquad::prelude::*;
use multiverse_life::{input, rendering, Config};
use tracing::{info, warn};

fn window_conf() -> Conf {
    Conf {
        window_title: "Multiverse Life - 2D / 2.5D / 3D Cellular Automata".to_owned(),
        window_width: 1000,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();

    let config = Config::from_env().unwrap_or_else(|err| {
        warn!(%err, "invalid configuration, using defaults");
        Config::default()
    });
    info!(
        dimension = %config.dimension,
        width = config.width,
        height = config.height,
        depth = config.depth,
        strategy = config.strategy.name(),
        "starting viewer"
    );

    let mut session = config.build_session().seed();
    let mut render_ms = 0.0;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        session = input::process_keyboard_input(session);
        input::handle_mouse_paint(&mut session);
        session = session.tick(get_frame_time());

        clear_background(Color::from_rgba(20, 20, 20, 255));
        let render_start = std::time::Instant::now();
        rendering::draw_world(&session);
        rendering::draw_hud(&session, render_ms);
        render_ms = render_start.elapsed().as_secs_f32() * 1000.0;

        next_frame().await;
    }

    info!(generation = session.generation, "viewer closed");
}
