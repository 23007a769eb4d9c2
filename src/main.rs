use arboard::Clipboard;
use log::{error, info, warn};
use macroquad::prelude::*;
use std::sync::OnceLock;

use shadowcast2d::camera::Camera;
use shadowcast2d::config::Config;
use shadowcast2d::logging;
use shadowcast2d::snapshot::FrameSnapshot;
use shadowcast2d::visibility::fan_triangles;
use shadowcast2d::{DirectionalInput, Point, Segment, Viewer, World};

/// Configuration is read once and shared by the window setup and the game loop
fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        logging::init("info");
        Config::load()
    })
}

fn window_conf() -> Conf {
    let config = config();
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: config.playfield.width as i32,
        window_height: config.playfield.height as i32,
        ..Default::default()
    }
}

/// Alpha of the light halo at distance `d` from the viewer
///
/// Fully transparent in the outer third of the radius, strongest at the centre.
fn falloff_alpha(d: f32, radius: f32) -> u8 {
    let shade = (3.0 * d * 255.0 / radius - 2.0 * 255.0).clamp(0.0, 255.0);
    ((255.0 - shade) / 4.0) as u8
}

/// Square RGBA texture holding the light halo
fn build_falloff_texture(radius: f32) -> Texture2D {
    let size = (radius * 2.0).max(1.0) as u16;
    let mut bytes = Vec::with_capacity(size as usize * size as usize * 4);
    for j in 0..size {
        for i in 0..size {
            let dx = i as f32 - radius;
            let dy = j as f32 - radius;
            let d = (dx * dx + dy * dy).sqrt();
            bytes.extend_from_slice(&[255, 255, 255, falloff_alpha(d, radius)]);
        }
    }
    Texture2D::from_rgba8(size, size, &bytes)
}

/// Read WASD and the arrow keys
fn read_input() -> DirectionalInput {
    DirectionalInput {
        up: is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
        down: is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
        left: is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
        right: is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
    }
}

fn rgb(c: [u8; 3], alpha: u8) -> Color {
    Color::from_rgba(c[0], c[1], c[2], alpha)
}

/// Latch that lets a repeating failure through once until it clears
#[derive(Default)]
struct WarnOnce {
    latched: bool,
}

impl WarnOnce {
    /// True only for the first failure since the last success
    fn fail(&mut self) -> bool {
        !std::mem::replace(&mut self.latched, true)
    }

    /// True when this success ends a run of failures
    fn succeed(&mut self) -> bool {
        std::mem::replace(&mut self.latched, false)
    }
}

/// Demo state
struct DemoState {
    world: World,
    viewer: Viewer,
    camera: Camera,
    rays: Vec<Segment>,
    show_rays: bool,
    falloff: Texture2D,
    falloff_radius: f32,
    ray_warning: WarnOnce,
}

impl DemoState {
    fn new(config: &Config, world: World, viewer: Viewer) -> Self {
        let mut camera = Camera::new(config.playfield.width, config.playfield.height);
        camera.follow(viewer.position());

        let mut state = DemoState {
            world,
            viewer,
            camera,
            rays: Vec::new(),
            show_rays: config.visual.show_rays,
            falloff: build_falloff_texture(config.visual.falloff_radius),
            falloff_radius: config.visual.falloff_radius,
            ray_warning: WarnOnce::default(),
        };
        state.update_rays();
        state
    }

    /// One simulation tick: movement, camera, then visibility
    fn update(&mut self, input: &DirectionalInput) {
        self.viewer.update(input, &self.world);
        self.camera.follow(self.viewer.position());
        self.update_rays();
    }

    fn update_rays(&mut self) {
        match self.world.visibility_from(self.viewer.position()) {
            Ok(rays) => {
                if self.ray_warning.succeed() {
                    info!("Visibility recovered at ({:.1}, {:.1})", self.viewer.px, self.viewer.py);
                }
                self.rays = rays;
            }
            // Keep last frame's rays, the world failed its enclosure guarantee
            Err(e) => {
                if self.ray_warning.fail() {
                    warn!("{}", e);
                }
            }
        }
    }

    fn to_screen(&self, p: Point) -> Vec2 {
        let s = self.camera.world_to_screen(p);
        vec2(s.x as f32, s.y as f32)
    }

    fn copy_to_clipboard(&self) {
        let json = match FrameSnapshot::new(self.viewer.position(), self.rays.clone()).to_json() {
            Ok(json) => json,
            Err(e) => {
                error!("{}", e);
                return;
            }
        };
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(json) {
                    warn!("Failed to copy to clipboard: {}", e);
                } else {
                    info!("Frame snapshot copied to clipboard ({} rays)", self.rays.len());
                    // Keep clipboard alive for a moment so clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                warn!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn draw(&self, config: &Config) {
        let visual = &config.visual;
        let background = rgb(visual.background, 255);
        clear_background(BLACK);

        let playfield = self.world.playfield();
        let origin = self.to_screen(Point::new(0.0, 0.0));
        draw_rectangle(origin.x, origin.y, playfield.width as f32, playfield.height as f32, background);

        // Shadow everywhere, then repaint the lit fan
        let shadow_alpha = (visual.shadow_alpha.clamp(0.0, 1.0) * 255.0) as u8;
        draw_rectangle(
            origin.x,
            origin.y,
            playfield.width as f32,
            playfield.height as f32,
            rgb(visual.shadow, shadow_alpha),
        );
        for [a, b, c] in fan_triangles(self.viewer.position(), &self.rays) {
            draw_triangle(self.to_screen(a), self.to_screen(b), self.to_screen(c), background);
        }

        let eye = self.to_screen(self.viewer.position());
        draw_texture(
            &self.falloff,
            eye.x - self.falloff_radius,
            eye.y - self.falloff_radius,
            WHITE,
        );

        if self.show_rays {
            for ray in &self.rays {
                let end = self.to_screen(ray.end());
                draw_line(eye.x, eye.y, end.x, end.y, 1.0, Color::from_rgba(255, 255, 0, 150));
            }
        }

        for obstacle in self.world.obstacles() {
            for wall in obstacle.segments() {
                let start = self.to_screen(wall.start());
                let end = self.to_screen(wall.end());
                draw_line(start.x, start.y, end.x, end.y, 1.0, RED);
            }
        }

        draw_rectangle(eye.x - 3.0, eye.y - 3.0, 6.0, 6.0, BLACK);
        draw_rectangle(eye.x - 2.0, eye.y - 2.0, 4.0, 4.0, Color::from_rgba(255, 100, 100, 255));

        let world_pos = self.camera.screen_to_world(Point::new(0.0, 0.0));
        let info = [
            format!("WASD: move   R: {} rays   C: copy frame", if self.show_rays { "hide" } else { "show" }),
            format!("FPS: {}", get_fps()),
            format!("Rays: 2*{}", self.rays.len() / 2),
            format!("Pos: ({:.0},{:.0})", self.viewer.px, self.viewer.py),
            format!("Cam: ({:.0},{:.0})", world_pos.x, world_pos.y),
        ];
        for (i, line) in info.iter().enumerate() {
            draw_text(line, 10.0, 16.0 + i as f32 * 16.0, 18.0, WHITE);
        }
    }
}

/// Print the frame snapshot for a viewer at (x, y) and exit
fn dump_frame(world: &World, args: &[String]) {
    let parsed = match (args.get(2), args.get(3)) {
        (Some(x), Some(y)) => x.parse::<f64>().ok().zip(y.parse::<f64>().ok()),
        _ => None,
    };
    let Some((x, y)) = parsed else {
        eprintln!("Usage: {} --dump <x> <y>", args[0]);
        return;
    };

    match FrameSnapshot::capture(world, Point::new(x, y)).and_then(|s| Ok(s.to_json()?)) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("{}", e),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = config();
    logging::init(&config.logging.level);

    let world = match World::default_level(config.playfield(), config.visibility_params()) {
        Ok(world) => world,
        Err(e) => {
            error!("Failed to build level: {}", e);
            return;
        }
    };

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--dump" {
        dump_frame(&world, &args);
        return;
    }

    let viewer = match world.place_viewer(config.viewer()) {
        Ok(viewer) => viewer,
        Err(e) => {
            error!("Failed to place viewer: {}", e);
            return;
        }
    };

    let mut state = DemoState::new(config, world, viewer);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        if is_key_pressed(KeyCode::R) {
            state.show_rays = !state.show_rays;
        }

        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }

        state.update(&read_input());
        state.draw(config);

        next_frame().await
    }
}
