//! Standalone demo: a solid color picker and a gradient editor side by side.

use env_logger::Env;
use floem::kurbo::Size;
use floem::prelude::*;
use floem::window::WindowConfig;
use floem_gradient::{color_picker, gradient_editor, ColorPicker, GradientEditor};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let viewport = RwSignal::new(Size::new(720.0, 520.0));
    let picker = RwSignal::new(
        ColorPicker::new("#3B82F6").on_change(|change| {
            if change.is_final {
                log::info!("background color: {}", change.hex);
            }
        }),
    );
    let editor = RwSignal::new(
        GradientEditor::new(Size::new(1920.0, 1080.0)).on_change(|definition| {
            match serde_json::to_string(definition) {
                Ok(json) => log::info!("gradient: {json}"),
                Err(err) => log::warn!("could not encode gradient: {err}"),
            }
        }),
    );

    floem::Application::new()
        .window(
            move |_| {
                v_stack((
                    h_stack((label(|| "Background"), color_picker(picker, viewport)))
                        .style(|s| s.gap(8.0).items_center()),
                    gradient_editor(editor, viewport),
                ))
                .style(|s| s.size_full().padding(16.0).gap(16.0))
                .on_resize(move |r| viewport.set(r.size()))
                .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                    floem::quit_app()
                })
            },
            Some(
                WindowConfig::default()
                    .size((720.0, 520.0))
                    .title("floem-gradient"),
            ),
        )
        .run();
}
