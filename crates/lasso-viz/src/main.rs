use std::{env, fs};

use data_lasso::{
    AxisMappings, Dataset, EntryStore, LassoConfig, Mode, SelectionCoordinator,
    SelectionModifier,
};
use lasso_viz::{LineOverlay, OrbitCamera, demo_records, draw_axes, draw_points, to_ndc};
use macroquad::prelude::*;

const DEMO_SEED: u64 = 42;
const DEMO_POINTS: usize = 400;

fn read(path: &str) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) => {
            log::error!("cannot read {path}: {err}");
            None
        }
    }
}

fn load_config(path: Option<&str>) -> LassoConfig {
    let Some(text) = path.and_then(read) else {
        return LassoConfig::default();
    };
    LassoConfig::from_json_str(&text).unwrap_or_else(|err| {
        log::error!("invalid config, using defaults: {err}");
        LassoConfig::default()
    })
}

fn load_dataset(path: Option<&str>, graph_size: f32, mappings: Option<AxisMappings>) -> Dataset {
    let loaded = path.and_then(read).and_then(|text| {
        Dataset::from_json_str(&text, graph_size)
            .inspect_err(|err| log::error!("invalid data: {err}"))
            .ok()
    });
    let mut dataset = loaded.unwrap_or_else(|| {
        log::info!("generating {DEMO_POINTS} demo points");
        Dataset::from_records(demo_records(DEMO_SEED, DEMO_POINTS), graph_size)
    });

    // Without configured mappings the first three attributes go on the axes
    // and the fourth drives the color.
    let mappings = mappings.unwrap_or_else(|| {
        let mut names = dataset.attribute_names().map(str::to_string);
        AxisMappings {
            x: names.next(),
            y: names.next(),
            z: names.next(),
            color: names.next(),
        }
    });
    if let Err(err) = dataset.set_mappings(mappings) {
        log::error!("cannot map attributes: {err}");
    }
    dataset
}

fn current_modifier() -> SelectionModifier {
    if is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift) {
        SelectionModifier::Add
    } else if is_key_down(KeyCode::LeftAlt) || is_key_down(KeyCode::RightAlt) {
        SelectionModifier::Subtract
    } else {
        SelectionModifier::None
    }
}

#[macroquad::main("Lasso Selection")]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = load_config(args.get(2).map(String::as_str));
    let graph_size = config.graph_size;
    let dataset = load_dataset(
        args.get(1).map(String::as_str),
        graph_size,
        config.mappings.clone(),
    );

    let half = graph_size / 2.0;
    let camera = OrbitCamera::new(graph_size * 2.0, 0.6, 0.4)
        .with_zoom(graph_size * 0.05, graph_size * 0.1, graph_size * 4.0)
        .with_target(vec3(half, half, half));

    let overlay = LineOverlay::new();
    let mut coordinator = match SelectionCoordinator::new(config, camera, dataset, overlay) {
        Ok(coordinator) => coordinator,
        Err(err) => {
            log::error!("cannot start: {err}");
            return;
        }
    };

    loop {
        let (width, height) = (screen_width(), screen_height());
        // A minimized window has no viewport to aim rays through.
        let ndc = to_ndc(mouse_position(), width, height);
        if ndc.is_some() {
            coordinator.camera_mut().aspect = width / height;
            if coordinator.camera_mut().update() {
                coordinator.camera_moved();
            }
        }

        coordinator.set_modifier(current_modifier());

        if is_key_pressed(KeyCode::Space) {
            coordinator.enter_selection();
        }
        if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Escape) {
            coordinator.exit_selection();
        }
        if is_key_pressed(KeyCode::Z) {
            if let Err(err) = coordinator.store_mut().zoom_in() {
                log::warn!("cannot zoom in: {err}");
            }
        }
        if is_key_pressed(KeyCode::X) {
            if let Err(err) = coordinator.store_mut().zoom_out() {
                log::warn!("cannot zoom out: {err}");
            }
        }
        if is_key_pressed(KeyCode::E) {
            match coordinator.store().export_selected_json() {
                Ok(json) => log::info!("selected entries:\n{json}"),
                Err(err) => log::error!("export failed: {err}"),
            }
        }

        if let Some(ndc) = ndc {
            coordinator.cursor_moved(ndc);
            if is_mouse_button_pressed(MouseButton::Left) {
                coordinator.primary_click(ndc);
            }
        }
        coordinator.tick(get_frame_time());

        for event in coordinator.drain_events() {
            log::info!("{event:?}");
        }

        let dataset = coordinator.store();
        let hovered = ndc.and_then(|ndc| coordinator.hovered(ndc, dataset.point_size() * 0.5));

        clear_background(Color::from_rgba(15, 15, 25, 255));
        set_camera(&coordinator.camera().to_camera3d());

        draw_points(dataset, hovered);
        draw_axes(graph_size);
        coordinator.overlay().draw();

        set_default_camera();

        let mode = match coordinator.mode() {
            Mode::Viewing => "viewing",
            Mode::Selecting => "selecting",
        };
        let modifier = coordinator.modifier();
        draw_text(
            &format!("Lasso Selection - {mode} | modifier: {modifier:?}"),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        draw_text(
            &format!(
                "Entries: {} | Selected: {} | Zoom depth: {} | Lasso: {}/{}",
                dataset.entries().len(),
                dataset.selection().len(),
                dataset.zoom_depth(),
                coordinator.lasso_points().len(),
                coordinator.config().lasso_points,
            ),
            10.0,
            45.0,
            18.0,
            GRAY,
        );
        if let Some(entry) = hovered.and_then(|id| dataset.entry(id)) {
            let attributes = serde_json::Value::Object(entry.attributes.clone());
            draw_text(
                &format!("#{}: {attributes}", entry.id),
                10.0,
                65.0,
                16.0,
                WHITE,
            );
        }

        draw_text(
            "Space: lasso | Enter/Esc: cancel | Shift: add | Alt: subtract",
            10.0,
            155.0,
            16.0,
            DARKGRAY,
        );
        draw_text(
            "Z: zoom in | X: zoom out | E: export | Drag mouse to rotate, scroll to zoom",
            10.0,
            175.0,
            16.0,
            DARKGRAY,
        );
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 195.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
