use crate::StoryCanvasApp;
use crate::command::CanvasCommand;
use crate::components::Swatch;
use crate::renderer::background::BackgroundPattern;
use crate::stroke::{BrushKind, ShapeKind, StrokeKind};

pub fn tools_panel(app: &mut StoryCanvasApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(220.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Tools");
                kind_picker(app, ui);
                ui.separator();

                ui.label("Colors");
                color_picker(app, ui);
                ui.separator();

                ui.label("Size");
                size_picker(app, ui);
                ui.add(
                    egui::Slider::new(&mut app.tool_settings_mut().opacity, 0.0..=1.0)
                        .text("Opacity"),
                );
                ui.separator();

                ui.label("Background");
                background_picker(app, ui);
                ui.separator();

                history_buttons(app, ui);
                ui.separator();

                save_section(app, ui);
            });
        });
}

fn kind_picker(app: &mut StoryCanvasApp, ui: &mut egui::Ui) {
    let current = *app.tool_settings();

    ui.horizontal_wrapped(|ui| {
        for brush in BrushKind::ALL {
            let kind = StrokeKind::Brush(brush);
            let selected = current.kind == kind && !current.eraser;
            if ui.selectable_label(selected, brush.label()).clicked() {
                select_kind(app, kind);
            }
        }
    });
    ui.horizontal_wrapped(|ui| {
        for shape in ShapeKind::ALL {
            let kind = StrokeKind::Shape(shape);
            let selected = current.kind == kind && !current.eraser;
            if ui.selectable_label(selected, shape.label()).clicked() {
                select_kind(app, kind);
            }
        }
    });
    if ui.selectable_label(current.eraser, "Eraser").clicked() {
        let settings = app.tool_settings_mut();
        settings.eraser = !settings.eraser;
        log::info!("Eraser {}", if settings.eraser { "on" } else { "off" });
    }
}

fn select_kind(app: &mut StoryCanvasApp, kind: StrokeKind) {
    log::info!("Tool selected from UI: {}", kind.label());
    let settings = app.tool_settings_mut();
    settings.kind = kind;
    settings.eraser = false;
}

fn color_picker(app: &mut StoryCanvasApp, ui: &mut egui::Ui) {
    let palette = app.config().palette.clone();
    let current = *app.tool_settings();

    ui.horizontal_wrapped(|ui| {
        for color in palette {
            let selected = current.color == color && !current.eraser;
            if Swatch::new(color, selected).show(ui).clicked() {
                let settings = app.tool_settings_mut();
                settings.color = color;
                settings.eraser = false;
            }
        }
    });
}

fn size_picker(app: &mut StoryCanvasApp, ui: &mut egui::Ui) {
    let presets = app.config().size_presets.clone();
    let current = app.tool_settings().size;

    ui.horizontal(|ui| {
        for size in presets {
            if ui
                .selectable_label(current == size, format!("{size:.0}"))
                .clicked()
            {
                app.tool_settings_mut().size = size;
            }
        }
    });
}

fn background_picker(app: &mut StoryCanvasApp, ui: &mut egui::Ui) {
    let mut color = app.canvas().background_color();
    ui.horizontal(|ui| {
        ui.label("Paper:");
        if egui::color_picker::color_edit_button_srgba(
            ui,
            &mut color,
            egui::color_picker::Alpha::Opaque,
        )
        .changed()
        {
            app.execute(CanvasCommand::SetBackgroundColor(color));
        }
    });

    let current = app.canvas().background_pattern();
    ui.horizontal_wrapped(|ui| {
        for pattern in BackgroundPattern::ALL {
            if ui
                .selectable_label(current == pattern, pattern.label())
                .clicked()
            {
                app.execute(CanvasCommand::SetBackgroundPattern(pattern));
            }
        }
    });
}

fn history_buttons(app: &mut StoryCanvasApp, ui: &mut egui::Ui) {
    let history = app.canvas().history();
    let (can_undo, can_redo) = (history.can_undo(), history.can_redo());
    let stroke_count = history.len();

    ui.horizontal(|ui| {
        if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
            app.execute(CanvasCommand::Undo);
        }
        if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
            app.execute(CanvasCommand::Redo);
        }
        if ui
            .add_enabled(stroke_count > 0, egui::Button::new("Clear"))
            .clicked()
        {
            app.request_clear();
        }
    });
    ui.label(format!("Strokes: {stroke_count}"));
}

fn save_section(app: &mut StoryCanvasApp, ui: &mut egui::Ui) {
    ui.label("Name your drawing");
    ui.text_edit_singleline(app.drawing_name_mut());
    if ui.button("Save drawing").clicked() {
        let size = app.canvas_size();
        app.save_drawing(size);
    }
    if let Some(path) = app.last_saved() {
        ui.small(format!("Saved to {path}"));
    }
}
