use flock_core::{AgentSnapshot, Flock, FovGeometry};
use flock_shared::{FlockStatus, SettingsError, SimulationSettings};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const BACKGROUND: &str = "#222436";
const BOID_FILL: &str = "rgba(200, 200, 200, 0.4)";
const BOID_STROKE: &str = "#ffffff";
const FOV_STROKE: &str = "rgba(255, 255, 255, 0.25)";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

/// Parses and validates settings coming from the configuration form.
/// No JSON means the default settings.
fn parse_settings(json: Option<&str>) -> Result<SimulationSettings, SettingsError> {
    let settings = match json {
        Some(json) => SimulationSettings::from_json(json)?,
        None => SimulationSettings::default(),
    };
    settings.validate()?;
    Ok(settings)
}

fn to_js_error(err: SettingsError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct BoidSimulation {
    flock: Flock,
    settings: SimulationSettings,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    paused: bool,
    frame: u64,
}

#[wasm_bindgen]
impl BoidSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        width: f64,
        height: f64,
        settings_json: Option<String>,
    ) -> Result<BoidSimulation, JsValue> {
        let settings = parse_settings(settings_json.as_deref()).map_err(to_js_error)?;
        console_log!(
            "Initializing boid simulation with {} boids",
            settings.population
        );

        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let flock = Flock::new(
            settings.to_config(),
            settings.population,
            width as f32,
            height as f32,
        );

        Ok(BoidSimulation {
            flock,
            settings,
            canvas,
            context,
            paused: false,
            frame: 0,
        })
    }

    /// One animation frame: advance the flock unless paused, then draw it
    pub fn tick(&mut self) -> Result<(), JsValue> {
        self.step();
        self.render()
    }

    pub fn step(&mut self) {
        self.flock.step(self.paused);
        self.frame += 1;
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;

        self.context.set_fill_style_str(BACKGROUND);
        self.context.fill_rect(0.0, 0.0, width, height);

        for snapshot in self.flock.snapshots() {
            self.draw_boid(&snapshot);
            if let Some(fov) = snapshot.fov {
                self.draw_fov(&fov)?;
            }
        }

        Ok(())
    }

    fn draw_boid(&self, snapshot: &AgentSnapshot) {
        let [tip, left, right] = snapshot.glyph();

        self.context.begin_path();
        self.context.move_to(tip.x as f64, tip.y as f64);
        self.context.line_to(left.x as f64, left.y as f64);
        self.context.line_to(right.x as f64, right.y as f64);
        self.context.close_path();

        self.context.set_fill_style_str(BOID_FILL);
        self.context.fill();
        self.context.set_stroke_style_str(BOID_STROKE);
        self.context.set_line_width(1.0);
        self.context.stroke();
    }

    fn draw_fov(&self, fov: &FovGeometry) -> Result<(), JsValue> {
        let (x, y) = (fov.origin.x as f64, fov.origin.y as f64);

        self.context.begin_path();
        if let Some(rays) = fov.rays {
            for end in rays {
                self.context.move_to(x, y);
                self.context.line_to(end.x as f64, end.y as f64);
            }
        }

        let start = fov.arc_start as f64;
        self.context
            .move_to(x + fov.radius as f64 * start.cos(), y + fov.radius as f64 * start.sin());
        self.context
            .arc(x, y, fov.radius as f64, start, fov.arc_end as f64)?;

        self.context.set_stroke_style_str(FOV_STROKE);
        self.context.stroke();
        Ok(())
    }

    /// Replaces the whole flock with one built from the submitted settings
    pub fn reconfigure(&mut self, settings_json: &str) -> Result<(), JsValue> {
        let settings = parse_settings(Some(settings_json)).map_err(to_js_error)?;

        self.flock = Flock::new(
            settings.to_config(),
            settings.population,
            self.flock.width(),
            self.flock.height(),
        );
        console_log!("Reconfigured with {} boids", settings.population);
        self.settings = settings;
        Ok(())
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.flock.resize(width as f32, height as f32);
        console_log!("Resized to {}x{}", width, height);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flips the pause flag and returns the new value
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn boid_count(&self) -> usize {
        self.flock.len()
    }

    /// Current settings as form JSON, for pre-filling the configuration popup
    pub fn settings_json(&self) -> Result<String, JsValue> {
        self.settings.to_json().map_err(to_js_error)
    }

    pub fn status_json(&self) -> Result<String, JsValue> {
        let status = FlockStatus::from_flock(&self.flock, self.frame, self.paused);
        serde_json::to_string(&status).map_err(|err| JsValue::from_str(&err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings_defaults() {
        let settings = parse_settings(None).unwrap();
        assert_eq!(settings, SimulationSettings::default());
    }

    #[test]
    fn test_parse_settings_from_form() {
        let settings =
            parse_settings(Some(r#"{"boidAmount": 300, "perceptionFov": 180}"#)).unwrap();
        assert_eq!(settings.population, 300);
        assert_eq!(settings.perception_fov, Some(180.0));
    }

    #[test]
    fn test_parse_settings_rejects_out_of_range() {
        let err = parse_settings(Some(r#"{"maxVelocity": 50}"#)).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::OutOfRange {
                field: "maxVelocity",
                ..
            }
        ));
    }
}
