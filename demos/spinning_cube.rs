//! A lit cube spinning under the default camera. Hold W to spin faster,
//! S to slow down, Escape to quit.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use glint::prelude::*;

struct SpinningCube {
    renderer: Option<ObjectRenderer>,
    speed: Rc<Cell<f32>>,
    angle: f32,
}

impl Scene for SpinningCube {
    fn load(&mut self, gfx: &GraphicsContext) -> glint::Result<()> {
        let mut renderer = gfx.new_renderer();
        renderer.initialize()?;
        renderer.set_mesh(geometry::cube())?;
        renderer.set_material(Material::colored([0.8, 0.45, 0.2]));
        self.renderer = Some(renderer);
        Ok(())
    }

    fn draw(&mut self, gfx: &GraphicsContext, frame: &Frame) {
        gfx.clear(0.08, 0.08, 0.1, 1.0);

        self.angle += self.speed.get() * frame.dt;
        let model = Matrix4::from_angle_y(Deg(self.angle));
        let camera = Camera::default();
        let lights = [Light::default()];

        if let Some(renderer) = &self.renderer {
            if let Err(error) = renderer.draw(
                &model,
                &camera.view_matrix(),
                &camera.projection_matrix(frame.aspect_ratio()),
                &camera,
                &lights,
            ) {
                log::error!("draw failed: {error}");
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut engine = Engine::new()?;
    engine.create_window(1280, 720, "spinning cube");

    // degrees per second, shared with the key callbacks
    let speed = Rc::new(Cell::new(45.0f32));

    let faster = speed.clone();
    engine.register_key_event(Key::W, move |dt| {
        faster.set(faster.get() + 90.0 * dt);
    });
    let slower = speed.clone();
    engine.register_key_event(Key::S, move |dt| {
        slower.set((slower.get() - 90.0 * dt).max(0.0));
    });

    engine.play_scene(SpinningCube {
        renderer: None,
        speed,
        angle: 0.0,
    })?;
    Ok(())
}
