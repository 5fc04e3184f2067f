use crate::StoryCanvasApp;
use crate::renderer::paint_scene;

const INSET_OUTLINE: egui::Color32 = egui::Color32::from_gray(170);

pub fn central_panel(app: &mut StoryCanvasApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;

            app.handle_input(ctx, &response);

            let scene = app.scene(rect.size());
            paint_scene(&painter, rect.min, &scene);

            // Strokes are clamped to the drawable area; show where it ends.
            let drawable = app.drawable_rect().translate(rect.min.to_vec2());
            if drawable != rect {
                painter.rect_stroke(drawable, 0.0, egui::Stroke::new(1.0, INSET_OUTLINE));
            }

            if app.canvas().active_stroke().is_some() {
                ctx.request_repaint();
            }
        });
}
